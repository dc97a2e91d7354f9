//! Product page review scraper
//!
//! Fetches a product page and pulls every `.review` block out of it.
//! Only English reviews are kept.

use std::time::Duration;

use axum::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use scraper::{ElementRef, Html, Selector};
use whatlang::{Detector, Lang};

use crate::config::Config;
use crate::models::ScrapedReview;

const MISSING: &str = "N/A";
const READ_MORE: &str = "Read more";

/// Shorter texts carry too few trigrams for a language guess
const MIN_DETECTABLE_CHARS: usize = 40;

/// Languages a storefront review plausibly comes in
const REVIEW_LANGUAGES: &[Lang] = &[
    Lang::Eng, Lang::Deu, Lang::Fra, Lang::Spa, Lang::Ita, Lang::Por, Lang::Nld,
    Lang::Pol, Lang::Tur, Lang::Rus, Lang::Ara, Lang::Hin, Lang::Jpn, Lang::Cmn, Lang::Kor,
];

static REVIEW_BLOCK: Lazy<Selector> = Lazy::new(|| Selector::parse(".review").unwrap());
static REVIEW_TEXT: Lazy<Selector> = Lazy::new(|| Selector::parse(".review-text").unwrap());
static FULL_REVIEW: Lazy<Selector> = Lazy::new(|| Selector::parse(".full-review").unwrap());
static REVIEW_RATING: Lazy<Selector> = Lazy::new(|| Selector::parse(".review-rating").unwrap());
static RATING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.?\d*").unwrap());
static LANGUAGE: Lazy<Detector> =
    Lazy::new(|| Detector::with_allowlist(REVIEW_LANGUAGES.to_vec()));

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Product page returned status {0}")]
    Status(u16),
}

/// Anything that can turn a product URL into raw reviews
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch_reviews(&self, url: &str) -> Result<Vec<ScrapedReview>, ScrapeError>;
}

/// Scrapes reviews over HTTP
pub struct HtmlReviewScraper {
    http_client: reqwest::Client,
    user_agent: String,
}

impl HtmlReviewScraper {
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.scrape_timeout_secs))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            user_agent: config.scraper_user_agent.clone(),
        })
    }
}

#[async_trait]
impl ReviewSource for HtmlReviewScraper {
    async fn fetch_reviews(&self, url: &str) -> Result<Vec<ScrapedReview>, ScrapeError> {
        tracing::debug!("Fetching product page: {}", url);

        let response = self.http_client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT_LANGUAGE, "en-US, en;q=0.9")
            .send()
            .await
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScrapeError::Status(response.status().as_u16()));
        }

        let body = response.text().await
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let reviews = parse_reviews(&body);
        if reviews.is_empty() {
            tracing::info!("No English reviews found on {}", url);
        }
        Ok(reviews)
    }
}

/// Extract English reviews from a product page
pub fn parse_reviews(html: &str) -> Vec<ScrapedReview> {
    let document = Html::parse_document(html);
    let mut reviews = Vec::new();

    for block in document.select(&REVIEW_BLOCK) {
        let mut text = select_text(block, &REVIEW_TEXT).unwrap_or_else(|| MISSING.to_string());

        if text.contains(READ_MORE) {
            if let Some(full) = select_text(block, &FULL_REVIEW) {
                text = full;
            }
        }

        if text == MISSING {
            continue;
        }

        let rating = select_text(block, &REVIEW_RATING)
            .and_then(|raw| RATING_NUMBER.find(&raw).map(|m| m.as_str().to_string()));

        if is_english(&text) {
            reviews.push(ScrapedReview { text, rating });
        }
    }

    reviews
}

/// Only a reliable non-English guess drops a review
fn is_english(text: &str) -> bool {
    if text.chars().count() < MIN_DETECTABLE_CHARS {
        return true;
    }

    match LANGUAGE.detect(text) {
        Some(info) if info.lang() == Lang::Eng => true,
        Some(info) if info.is_reliable() => {
            tracing::debug!("Skipping {} review", info.lang().eng_name());
            false
        }
        Some(info) => {
            tracing::debug!("Unreliable {} guess, keeping review", info.lang().eng_name());
            true
        }
        None => {
            tracing::warn!("Language detection failed for a review, keeping it");
            true
        }
    }
}

/// Text of the first match, each text node trimmed and concatenated
fn select_text(block: ElementRef<'_>, selector: &Selector) -> Option<String> {
    block
        .select(selector)
        .next()
        .map(|el| el.text().map(str::trim).collect::<String>())
}
