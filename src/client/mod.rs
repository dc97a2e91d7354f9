//! Analyze client: view state, HTML rendering and the `/analyze` API

pub mod api;
pub mod page;
pub mod render;

pub use api::HttpAnalyzeClient;
pub use page::ReviewPage;
