//! Review models

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const NO_URL_PROVIDED: &str = "No URL provided";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(
        required(message = "No URL provided"),
        length(min = 1, message = "No URL provided")
    )]
    pub url: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: Some(url.into()) }
    }
}

/// One analyzed review as it travels over `/analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "Review")]
    pub review: String,
    #[serde(rename = "Rating")]
    pub rating: f64,
    #[serde(rename = "Prediction", default)]
    pub prediction: Option<String>,
}

/// Classifier verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prediction {
    /// Class 0
    Real,
    /// Class 1
    Fake,
}

impl Prediction {
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            Prediction::Fake
        } else {
            Prediction::Real
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Prediction::Real => "Real (Original)",
            Prediction::Fake => "Fake (Computer Generated)",
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw review pulled off a product page, before preprocessing
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedReview {
    pub text: String,
    /// Numeric part of the rating element, if any
    pub rating: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_empty_url_fails_validation() {
        assert!(AnalyzeRequest::default().validate().is_err());
        assert!(AnalyzeRequest::new("").validate().is_err());
        assert!(AnalyzeRequest::new("https://shop.example/p/1").validate().is_ok());
    }

    #[test]
    fn test_record_uses_capitalised_wire_keys() {
        let record = ReviewRecord {
            review: "Great".to_string(),
            rating: 5.0,
            prediction: Some(Prediction::Real.to_string()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Review"], "Great");
        assert_eq!(json["Rating"], 5.0);
        assert_eq!(json["Prediction"], "Real (Original)");
    }

    #[test]
    fn test_record_without_prediction_deserializes() {
        let record: ReviewRecord =
            serde_json::from_str(r#"{"Review": "ok", "Rating": 3}"#).unwrap();
        assert_eq!(record.prediction, None);
        assert_eq!(record.rating, 3.0);
    }

    #[test]
    fn test_prediction_labels() {
        assert_eq!(Prediction::from_class(1), Prediction::Fake);
        assert_eq!(Prediction::from_class(0), Prediction::Real);
        assert_eq!(Prediction::Fake.label(), "Fake (Computer Generated)");
    }
}
