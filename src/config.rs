//! Configuration module

use std::env;
use std::path::PathBuf;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.121 Safari/537.36";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Word2vec embeddings in text format
    pub word2vec_path: PathBuf,

    /// Linear SVM weights (JSON)
    pub svm_model_path: PathBuf,

    /// Timeout for product page requests
    pub scrape_timeout_secs: u64,

    /// User-Agent sent to product pages
    pub scraper_user_agent: String,

    /// Environment (development, production)
    pub environment: String,

    /// "json" for JSON log lines, anything else for text
    pub log_format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            word2vec_path: env::var("WORD2VEC_PATH")
                .unwrap_or_else(|_| "models/word2vec.txt".to_string())
                .into(),

            svm_model_path: env::var("SVM_MODEL_PATH")
                .unwrap_or_else(|_| "models/svm.json".to_string())
                .into(),

            scrape_timeout_secs: env::var("SCRAPE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),

            scraper_user_agent: env::var("SCRAPER_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "text".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Analyze server the CLI client talks to
    pub fn client_server_url() -> String {
        env::var("REVIEWLENS_SERVER").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string())
    }
}
