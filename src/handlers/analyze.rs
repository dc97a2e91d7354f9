//! Analyze handler

use axum::{extract::State, Json};

use crate::{AppState, AppResult};
use crate::models::{AnalyzeRequest, ReviewRecord};

/// Scrape, preprocess and classify the reviews behind a product URL
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<Json<Vec<ReviewRecord>>> {
    let records = state.analysis.analyze(req).await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::logic::analysis::tests::{review, service, FakeSource};
    use crate::test_state;

    async fn call(source: FakeSource, url: Option<&str>) -> (StatusCode, serde_json::Value) {
        let (analysis, _) = service(source);
        let req = AnalyzeRequest { url: url.map(str::to_string) };

        let response = analyze(State(test_state(analysis)), Json(req)).await.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_url_is_bad_request() {
        let (status, body) = call(FakeSource::with(vec![]), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No URL provided");
    }

    #[tokio::test]
    async fn test_no_reviews_is_not_found() {
        let (status, body) = call(FakeSource::with(vec![]), Some("https://shop.example/p/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No reviews found");
    }

    #[tokio::test]
    async fn test_returns_records() {
        let source = FakeSource::with(vec![review("Great value", Some("4"))]);
        let (status, body) = call(source, Some("https://shop.example/p/1")).await;

        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Review"], "Great value");
        assert_eq!(records[0]["Rating"], 4.0);
        assert_eq!(records[0]["Prediction"], "Fake (Computer Generated)");
    }
}
