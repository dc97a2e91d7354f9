//! Analysis pipeline: scrape -> preprocess -> classify

use std::sync::Arc;

use axum::async_trait;
use validator::Validate;

use crate::{AppError, AppResult};
use crate::client::api::{AnalyzeApi, AnalyzeResponse, ClientError};
use crate::models::{AnalyzeRequest, ReviewRecord, ScrapedReview, NO_URL_PROVIDED};
use super::classifier::{parse_rating, ReviewClassifier};
use super::preprocess::preprocess_text;
use super::scraper::ReviewSource;

pub const NO_REVIEWS_FOUND: &str = "No reviews found";

#[derive(Clone)]
pub struct AnalysisService {
    source: Arc<dyn ReviewSource>,
    classifier: Arc<ReviewClassifier>,
}

impl AnalysisService {
    pub fn new(source: Arc<dyn ReviewSource>, classifier: Arc<ReviewClassifier>) -> Self {
        Self { source, classifier }
    }

    pub async fn analyze(&self, request: AnalyzeRequest) -> AppResult<Vec<ReviewRecord>> {
        request
            .validate()
            .map_err(|_| AppError::ValidationError(NO_URL_PROVIDED.to_string()))?;
        let url = request.url.unwrap_or_default();

        let reviews = match self.source.fetch_reviews(&url).await {
            Ok(reviews) => reviews,
            Err(e) => {
                tracing::warn!("Scraping {} failed: {}", url, e);
                Vec::new()
            }
        };

        if reviews.is_empty() {
            return Err(AppError::NotFound(NO_REVIEWS_FOUND.to_string()));
        }

        let classifier = self.classifier.clone();
        let records = tokio::task::spawn_blocking(move || classify_all(&classifier, reviews)).await?;

        tracing::info!("Analyzed {} reviews from {}", records.len(), url);
        Ok(records)
    }
}

/// Records keep the original text for display
fn classify_all(classifier: &ReviewClassifier, reviews: Vec<ScrapedReview>) -> Vec<ReviewRecord> {
    reviews
        .into_iter()
        .map(|review| {
            let rating = parse_rating(review.rating.as_deref());
            let prediction = classifier.classify(&preprocess_text(&review.text), rating);
            ReviewRecord {
                review: review.text,
                rating,
                prediction: Some(prediction.to_string()),
            }
        })
        .collect()
}

/// In-process client, used by the server-rendered page
#[async_trait]
impl AnalyzeApi for AnalysisService {
    async fn analyze(&self, url: &str) -> Result<AnalyzeResponse, ClientError> {
        match AnalysisService::analyze(self, AnalyzeRequest::new(url)).await {
            Ok(records) => Ok(AnalyzeResponse::Reviews(records)),
            Err(AppError::InternalError(msg)) => Err(ClientError::Network(msg)),
            Err(e) => Ok(AnalyzeResponse::Error { error: e.public_message().to_string() }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::logic::classifier::{LinearSvm, WordEmbeddings};
    use crate::logic::scraper::ScrapeError;
    use crate::models::Prediction;

    /// Serves canned reviews and counts calls
    pub struct FakeSource {
        pub reviews: Result<Vec<ScrapedReview>, u16>,
        pub calls: AtomicUsize,
    }

    impl FakeSource {
        pub fn with(reviews: Vec<ScrapedReview>) -> Self {
            Self { reviews: Ok(reviews), calls: AtomicUsize::new(0) }
        }

        pub fn failing(status: u16) -> Self {
            Self { reviews: Err(status), calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl ReviewSource for FakeSource {
        async fn fetch_reviews(&self, _url: &str) -> Result<Vec<ScrapedReview>, ScrapeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reviews.clone().map_err(ScrapeError::Status)
        }
    }

    /// "great" reads as fake, "solid" as real
    pub fn test_classifier() -> Arc<ReviewClassifier> {
        let mut vectors = HashMap::new();
        vectors.insert("great".to_string(), vec![1.0]);
        vectors.insert("solid".to_string(), vec![-1.0]);
        let svm = LinearSvm { coef: vec![0.0, 0.0, 1.0], intercept: 0.0 };
        Arc::new(ReviewClassifier::new(WordEmbeddings::new(1, vectors), svm).unwrap())
    }

    pub fn review(text: &str, rating: Option<&str>) -> ScrapedReview {
        ScrapedReview { text: text.to_string(), rating: rating.map(str::to_string) }
    }

    pub fn service(source: FakeSource) -> (AnalysisService, Arc<FakeSource>) {
        let source = Arc::new(source);
        (AnalysisService::new(source.clone(), test_classifier()), source)
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected_before_scraping() {
        let (svc, source) = service(FakeSource::with(vec![]));

        let err = svc.analyze(AnalyzeRequest::new("")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref m) if m == NO_URL_PROVIDED));
        let err = svc.analyze(AnalyzeRequest::default()).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_reviews_is_not_found() {
        let (svc, _) = service(FakeSource::with(vec![]));
        let err = svc.analyze(AnalyzeRequest::new("https://shop.example/p/1")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == NO_REVIEWS_FOUND));
    }

    #[tokio::test]
    async fn test_scrape_failure_reads_as_no_reviews() {
        let (svc, _) = service(FakeSource::failing(503));
        let err = svc.analyze(AnalyzeRequest::new("https://shop.example/p/1")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_records_keep_original_text() {
        let (svc, _) = service(FakeSource::with(vec![
            review("Great Phone!", Some("5.0")),
            review("Solid build", None),
        ]));

        let records = svc.analyze(AnalyzeRequest::new("https://shop.example/p/1")).await.unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].review, "Great Phone!");
        assert_eq!(records[0].rating, 5.0);
        assert_eq!(records[0].prediction.as_deref(), Some(Prediction::Fake.label()));

        assert_eq!(records[1].rating, 3.0);
        assert_eq!(records[1].prediction.as_deref(), Some(Prediction::Real.label()));
    }

    #[tokio::test]
    async fn test_fractional_rating_survives_unchanged() {
        let (svc, _) = service(FakeSource::with(vec![review("Great phone overall", Some("4.1"))]));

        let records = svc.analyze(AnalyzeRequest::new("https://shop.example/p/1")).await.unwrap();
        assert_eq!(records[0].rating, 4.1);

        let json = serde_json::to_string(&records).unwrap();
        assert!(json.contains(r#""Rating":4.1"#), "{}", json);
    }

    #[tokio::test]
    async fn test_in_process_api_maps_errors_to_response() {
        let (svc, _) = service(FakeSource::with(vec![]));
        let response = AnalyzeApi::analyze(&svc, "https://shop.example/p/1").await.unwrap();
        assert_eq!(response, AnalyzeResponse::Error { error: NO_REVIEWS_FOUND.to_string() });
    }
}
