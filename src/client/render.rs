//! HTML fragments for the result area

use std::fmt::Write;

use crate::models::ReviewRecord;

const REAL_LABEL: &str = "real (original)";

pub fn empty_url_warning() -> String {
    "<p class='text-red-400 text-lg'>⚠ Please enter a valid Amazon product URL.</p>".to_string()
}

pub fn server_error(message: &str) -> String {
    format!("<p class='text-red-400 text-lg'>⚠ Error: {}</p>", escape(message))
}

pub fn no_reviews() -> String {
    "<p class='text-yellow-400 text-lg'>ℹ️ No reviews found for this product, or unable to scrape.</p>".to_string()
}

pub fn unexpected_error() -> String {
    "<p class='text-red-400 text-lg'>⚠ An unexpected error occurred while processing your request. Please try again.</p>".to_string()
}

/// CSS class for the prediction line
pub fn prediction_class(prediction: Option<&str>) -> &'static str {
    match prediction {
        Some(p) if p.trim().to_lowercase() == REAL_LABEL => "real",
        _ => "fake",
    }
}

pub fn results(records: &[ReviewRecord]) -> String {
    let mut html = String::from(
        "<h2 class='text-2xl font-bold text-green-300 mb-4'>Analysis Results</h2><div class='review-container'>",
    );
    for record in records {
        html.push_str(&review_card(record));
    }
    html.push_str("</div>");
    html
}

pub fn review_card(record: &ReviewRecord) -> String {
    let prediction = record.prediction.as_deref().filter(|p| !p.is_empty());

    let mut card = String::new();
    // writing into a String cannot fail
    let _ = write!(
        card,
        concat!(
            "\n<div class=\"review-card\">\n",
            "  <p class=\"review-text\"><strong>Review:</strong> {review}</p>\n",
            "  <p class=\"review-rating\"><strong>Rating:</strong> ⭐ {rating}</p>\n",
            "  <p class=\"review-prediction {class}\">\n",
            "    <strong>Prediction:</strong> {prediction}\n",
            "  </p>\n",
            "</div>\n",
        ),
        review = escape(&record.review),
        rating = record.rating,
        class = prediction_class(prediction),
        prediction = escape(prediction.unwrap_or("N/A")),
    );
    card
}

/// Scraped text is shown as text, never as markup
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(review: &str, rating: f64, prediction: Option<&str>) -> ReviewRecord {
        ReviewRecord {
            review: review.to_string(),
            rating,
            prediction: prediction.map(str::to_string),
        }
    }

    #[test]
    fn test_prediction_class() {
        assert_eq!(prediction_class(Some("Real (Original)")), "real");
        assert_eq!(prediction_class(Some("  REAL (ORIGINAL) ")), "real");
        assert_eq!(prediction_class(Some("Fake (Computer Generated)")), "fake");
        assert_eq!(prediction_class(None), "fake");
    }

    #[test]
    fn test_one_card_per_record() {
        let html = results(&[
            record("a", 5.0, Some("Real (Original)")),
            record("b", 1.0, Some("Fake (Computer Generated)")),
            record("c", 3.0, None),
        ]);
        assert_eq!(html.matches("class=\"review-card\"").count(), 3);
        assert!(html.starts_with("<h2 class='text-2xl font-bold text-green-300 mb-4'>Analysis Results</h2>"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_card_contents() {
        let card = review_card(&record("Works well", 4.5, Some("Real (Original)")));
        assert!(card.contains("<strong>Review:</strong> Works well</p>"));
        assert!(card.contains("⭐ 4.5</p>"));
        assert!(card.contains("class=\"review-prediction real\""));
        assert!(card.contains("<strong>Prediction:</strong> Real (Original)"));
    }

    #[test]
    fn test_whole_ratings_render_without_fraction() {
        assert!(review_card(&record("x", 5.0, None)).contains("⭐ 5</p>"));
    }

    #[test]
    fn test_missing_prediction_shows_na() {
        let card = review_card(&record("x", 2.0, Some("")));
        assert!(card.contains("<strong>Prediction:</strong> N/A"));
        assert!(card.contains("review-prediction fake"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let card = review_card(&record("<script>alert(1)</script>", 1.0, None));
        assert!(!card.contains("<script>"));
        assert!(card.contains("&lt;script&gt;"));
        assert_eq!(server_error("a & b"), "<p class='text-red-400 text-lg'>⚠ Error: a &amp; b</p>");
    }
}
