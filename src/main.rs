//! ReviewLens
//!
//! Scrapes product reviews and flags the ones that look computer generated.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         REVIEWLENS                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌──────────────────────┐ │
//! │  │  Page /   │   │  /analyze    │   │  AnalysisService     │ │
//! │  │  CLI      │──▶│  (Axum)      │──▶│  scrape → preprocess │ │
//! │  │ (client)  │   │              │   │  → word2vec + SVM    │ │
//! │  └───────────┘   └──────────────┘   └──────────────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod logic;
mod client;
mod error;

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use clap::{Parser, Subcommand};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client::{HttpAnalyzeClient, ReviewPage};
use logic::{AnalysisService, HtmlReviewScraper, ReviewClassifier};

pub use error::{AppError, AppResult};

#[derive(Parser, Debug)]
#[command(name = "reviewlens", version, about = "Detect computer generated product reviews")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Analyze a product URL against a running server and print the result HTML
    Analyze {
        /// Product page URL
        url: String,
        /// Server base URL (defaults to REVIEWLENS_SERVER)
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();
    init_tracing(&config);

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await.map(|_| ExitCode::SUCCESS),
        Command::Analyze { url, server } => Ok(analyze(url, server).await),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &config::Config) {
    let default_filter = if config.is_production() {
        "reviewlens=info,tower_http=info"
    } else {
        "reviewlens=debug,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // stdout is reserved for `analyze` output
    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn serve(config: config::Config) -> anyhow::Result<()> {
    tracing::info!("ReviewLens server starting ({})...", config.environment);

    // Load models once at startup
    let classifier = ReviewClassifier::load(&config.word2vec_path, &config.svm_model_path)
        .with_context(|| format!(
            "Failed to load models from {} and {}",
            config.word2vec_path.display(),
            config.svm_model_path.display()
        ))?;

    let scraper = HtmlReviewScraper::new(&config).context("Failed to create HTTP client")?;

    // Build application state
    let state = AppState {
        analysis: AnalysisService::new(Arc::new(scraper), Arc::new(classifier)),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn analyze(url: String, server: Option<String>) -> ExitCode {
    let server = server.unwrap_or_else(config::Config::client_server_url);
    let api = HttpAnalyzeClient::new(server);

    let mut page = ReviewPage::with_url(url);
    let outcome = page.analyze_reviews(&api).await;
    println!("{}", page.result_html);

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analysis: AnalysisService,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(handlers::page::index).post(handlers::page::submit))
        .route("/clear", post(handlers::page::clear));

    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/analyze", post(handlers::analyze::analyze));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) fn test_state(analysis: AnalysisService) -> AppState {
    AppState {
        analysis,
        config: config::Config::from_env(),
    }
}
