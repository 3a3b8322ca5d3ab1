//! HTTP surface

pub mod diagnostics;
pub mod search;
pub mod settings;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(search::index))
        .route("/search", post(search::search))
        .route("/api/search", post(search::api_search))
        .route("/health", get(diagnostics::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppSettings;
    use crate::test_support::{spawn_mock, RequestLog};
    use axum::body::Body;
    use axum::extract::{Query, State};
    use axum::http::{header, Request, StatusCode};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tower::ServiceExt;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <title>Paper A</title>
    <summary>First abstract.</summary>
    <author><name>Ada Lovelace</name></author>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v1</id>
    <title>Paper B</title>
    <summary>Second abstract.</summary>
  </entry>
</feed>"#;

    /// State wired to a mock arXiv endpoint; the gateway points nowhere.
    async fn state_with_mock() -> (AppState, RequestLog) {
        let log = RequestLog::default();
        let app = axum::Router::new()
            .route(
                "/api/query",
                get(
                    |State(log): State<RequestLog>, Query(params): Query<HashMap<String, String>>| async move {
                        log.record(params);
                        FEED
                    },
                ),
            )
            .with_state(log.clone());
        let base = spawn_mock(app).await;

        let settings = AppSettings {
            arxiv_base_url: format!("{}/api/query", base),
            openrouter_base_url: "http://127.0.0.1:9".to_string(),
            arxiv_min_interval_secs: 0,
            ..AppSettings::default()
        };
        let state = AppState::from_settings(settings, PathBuf::from("/tmp/logs")).unwrap();
        (state, log)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1_000_000)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let (state, log) = state_with_mock().await;
        let request = Request::builder().uri("/?style=minimal").body(Body::empty()).unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("name=\"topic\""));
        assert!(html.contains("action=\"/search?style=minimal\""));
        assert_eq!(log.count(), 0);
    }

    #[tokio::test]
    async fn test_empty_topic_warns_without_searching() {
        let (state, log) = state_with_mock().await;

        let response = router(state)
            .oneshot(form_post("/search", "topic=+++&result_count=3"))
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("Please enter a research topic to search for."));
        assert!(!html.contains("Paper A"));
        assert_eq!(log.count(), 0);
    }

    #[tokio::test]
    async fn test_search_without_key_lists_papers_with_placeholders() {
        let (state, log) = state_with_mock().await;

        let response = router(state)
            .oneshot(form_post(
                "/search?style=hero",
                "topic=quantum+computing&result_count=2&model=openai%2Fgpt-3.5-turbo&credential=",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;

        assert!(html.contains(
            "Please enter your OpenRouter API key in the sidebar to generate summaries."
        ));
        assert!(html.contains("Found 2 paper(s)!"));
        assert!(html.contains("Paper A"));
        assert!(html.contains("Paper B"));
        assert!(html.contains("API Key Required"));

        let params = log.single();
        assert_eq!(params["search_query"], "all:quantum computing");
        assert_eq!(params["max_results"], "2");
    }

    #[tokio::test]
    async fn test_out_of_range_count_is_rejected() {
        let (state, log) = state_with_mock().await;

        let response = router(state)
            .oneshot(form_post("/search", "topic=graphs&result_count=11"))
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("between 1 and 10"));
        assert_eq!(log.count(), 0);
    }

    #[tokio::test]
    async fn test_api_search_returns_json() {
        let (state, _log) = state_with_mock().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"topic": "quantum computing", "result_count": "2"}"#))
            .unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();

        assert_eq!(json["topic"], "quantum computing");
        assert_eq!(json["papers"][0]["paper"]["title"], "Paper A");
        assert_eq!(json["papers"][0]["paper"]["published"], "unknown");
        assert_eq!(
            json["papers"][1]["summary"]["value"]["reason"],
            "missing_credential"
        );
    }

    #[tokio::test]
    async fn test_api_search_accepts_numeric_count() {
        let (state, log) = state_with_mock().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"topic":"graphs","result_count":2}"#))
            .unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["papers"].as_array().map(Vec::len), Some(2));
        assert_eq!(log.single()["max_results"], "2");
    }

    #[tokio::test]
    async fn test_api_search_malformed_body_is_json_error() {
        let (state, log) = state_with_mock().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"topic": ["not", "a", "string"]}"#))
            .unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert_eq!(log.count(), 0);
    }

    #[tokio::test]
    async fn test_api_search_rejects_unknown_model() {
        let (state, _log) = state_with_mock().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"topic": "graphs", "model": "gpt-9"}"#))
            .unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_health_reports_cache() {
        let (state, _log) = state_with_mock().await;
        let app = router(state);

        app.clone()
            .oneshot(form_post("/search", "topic=quantum+computing&result_count=2"))
            .await
            .unwrap();

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["cached_searches"], 1);
        assert_eq!(json["app_version"], env!("CARGO_PKG_VERSION"));
    }
}
