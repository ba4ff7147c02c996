//! Web interface routes.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use common::{matching_doc, plain_doc, Script, ScriptedSource};
use learnview::server::{create_router, AppState};
use learnview::FilterConfig;

async fn app() -> axum::Router {
    let loader = ScriptedSource::new()
        .with("a_learnings.json", Script::Load(matching_doc("a_learnings.json")))
        .with("b_learnings.json", Script::Load(matching_doc("b_learnings.json")))
        .with("c_learnings.json", Script::Load(plain_doc("c_learnings.json")))
        .into_loader();
    let state = AppState::with_loader(loader, FilterConfig::default(), 4).await;
    create_router(state)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn index_shows_matching_files_and_first_selection() {
    let (status, body) = get(app().await, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<option value="a_learnings.json" selected>"#));
    assert!(body.contains(r#"<option value="b_learnings.json">"#));
    assert!(!body.contains("c_learnings.json"));
    assert!(body.contains("Showing 2 files containing &#39;Testing Frameworks&#39;"));
    assert!(body.contains("<mark>Testing Frameworks</mark>"));
}

#[tokio::test]
async fn index_switches_file_and_category() {
    let app = app().await;

    let (_, body) = get(app.clone(), "/?file=b_learnings.json").await;
    assert!(body.contains(r#"<option value="b_learnings.json" selected>"#));
    assert!(body.contains("<h2>b - Tech Choices</h2>"));

    let (_, body) = get(app, "/?file=b_learnings.json&category=architecture").await;
    assert!(body.contains("<h2>b - Architecture</h2>"));
    assert!(body.contains(r#"class="type-button active" href="/?file=b_learnings.json&amp;category=architecture""#));
}

#[tokio::test]
async fn index_reports_load_errors() {
    let (status, body) = get(app().await, "/?file=nope_learnings.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("status error"));
    assert!(body.contains("Error loading nope_learnings.json"));
    // Previous document is still shown.
    assert!(body.contains("<h2>a - Tech Choices</h2>"));
}

#[tokio::test]
async fn category_link_after_error_restores_status() {
    let app = app().await;
    let (_, body) = get(app.clone(), "/?file=nope_learnings.json").await;
    assert!(body.contains("status error"));

    let (_, body) = get(app, "/?file=a_learnings.json&category=architecture").await;
    assert!(!body.contains("status error"));
    assert!(body.contains("<h2>a - Architecture</h2>"));
}

#[tokio::test]
async fn api_files_returns_report() {
    let (status, body) = get(app().await, "/api/files").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json["files"],
        serde_json::json!(["a_learnings.json", "b_learnings.json"])
    );
    assert_eq!(json["report"]["origin"], "source");
    assert_eq!(json["report"]["loaded"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn api_content_renders_category() {
    let (_, body) = get(
        app().await,
        "/api/content?file=c_learnings.json&category=patterns",
    )
    .await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["file"], "c_learnings.json");
    assert_eq!(json["active_category"], "patterns");
    assert_eq!(json["categories"][0]["label"], "Patterns");
    assert!(json["html"].as_str().unwrap().contains("Builder everywhere"));
}
