//! Review page view state
//!
//! Holds what the user sees: the URL input, the result area and the
//! loading indicator. `analyze_reviews` drives one request/response round
//! trip against any [`AnalyzeApi`].

use super::api::{AnalyzeApi, AnalyzeResponse};
use super::render;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewPage {
    pub url_input: String,
    pub result_html: String,
    pub loading: bool,
}

/// How an analyze attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    EmptyUrl,
    ServerError(String),
    NoReviews,
    Rendered(usize),
    Failed,
}

impl AnalyzeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalyzeOutcome::NoReviews | AnalyzeOutcome::Rendered(_))
    }
}

impl ReviewPage {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url_input: url.into(),
            ..Default::default()
        }
    }

    pub async fn analyze_reviews(&mut self, api: &dyn AnalyzeApi) -> AnalyzeOutcome {
        if self.url_input.is_empty() {
            self.result_html = render::empty_url_warning();
            return AnalyzeOutcome::EmptyUrl;
        }

        self.result_html.clear();
        self.loading = true;

        let result = api.analyze(&self.url_input).await;
        self.loading = false;

        match result {
            // an empty message is no usable response at all
            Ok(AnalyzeResponse::Error { error }) if error.is_empty() => {
                tracing::error!("Analyze response carried an empty error");
                self.result_html = render::unexpected_error();
                AnalyzeOutcome::Failed
            }
            Ok(AnalyzeResponse::Error { error }) => {
                tracing::warn!("Analyze failed on server: {}", error);
                self.result_html = render::server_error(&error);
                AnalyzeOutcome::ServerError(error)
            }
            Ok(AnalyzeResponse::Reviews(records)) if records.is_empty() => {
                self.result_html = render::no_reviews();
                AnalyzeOutcome::NoReviews
            }
            Ok(AnalyzeResponse::Reviews(records)) => {
                for record in &records {
                    tracing::debug!("Review data from backend: {:?}", record);
                }
                self.result_html = render::results(&records);
                self.url_input.clear();
                AnalyzeOutcome::Rendered(records.len())
            }
            Err(e) => {
                tracing::error!("Analyze request failed: {}", e);
                self.result_html = render::unexpected_error();
                AnalyzeOutcome::Failed
            }
        }
    }

    pub fn clear_results(&mut self) {
        self.url_input.clear();
        self.result_html.clear();
        self.loading = false;
    }
}
