//! Browser page handlers
//!
//! The form is rendered server-side: a submit runs the same `ReviewPage`
//! logic as the CLI client, against the in-process analysis service.

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use crate::AppState;
use crate::client::{render, ReviewPage};

#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub url: String,
}

pub async fn index() -> Html<String> {
    Html(render_page(&ReviewPage::default()))
}

pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<PageForm>,
) -> Html<String> {
    let mut page = ReviewPage::with_url(form.url);
    let outcome = page.analyze_reviews(&state.analysis).await;
    tracing::debug!("Page analyze outcome: {:?}", outcome);
    Html(render_page(&page))
}

pub async fn clear(Form(form): Form<PageForm>) -> Html<String> {
    let mut page = ReviewPage::with_url(form.url);
    page.clear_results();
    Html(render_page(&page))
}

pub fn render_page(page: &ReviewPage) -> String {
    let loading_display = if page.loading { "block" } else { "none" };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>ReviewLens - Fake Review Detector</title>
  <style>{style}</style>
</head>
<body>
  <main>
    <h1>Fake Review Detector</h1>
    <form method="post" action="/">
      <input type="text" id="url" name="url" placeholder="Paste a product URL" value="{url}">
      <button type="submit">Analyze</button>
      <button type="submit" formaction="/clear">Clear</button>
    </form>
    <div id="loading" style="display:{loading}">Analyzing reviews...</div>
    <div id="result">{result}</div>
  </main>
</body>
</html>
"#,
        style = STYLE,
        url = render::escape(&page.url_input),
        loading = loading_display,
        result = page.result_html,
    )
}

const STYLE: &str = "\
body{font-family:sans-serif;background:#111827;color:#e5e7eb;margin:0}\
main{max-width:48rem;margin:2rem auto;padding:0 1rem}\
input{width:70%;padding:.5rem}\
.text-red-400{color:#f87171}.text-yellow-400{color:#facc15}.text-green-300{color:#86efac}\
.review-card{background:#1f2937;border-radius:.5rem;padding:1rem;margin-bottom:1rem}\
.review-prediction.real{color:#4ade80}.review-prediction.fake{color:#f87171}";
