//! Review analysis logic

pub mod analysis;
pub mod classifier;
pub mod preprocess;
pub mod scraper;

pub use analysis::AnalysisService;
pub use classifier::ReviewClassifier;
pub use scraper::HtmlReviewScraper;
