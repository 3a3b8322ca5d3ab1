//! Search page handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::models::{RenderStyle, SearchForm};
use crate::services::{Notice, NoticeLevel, SearchOutcome};
use crate::views::{render_page, renderer_for};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StyleQuery {
    pub style: Option<String>,
}

impl StyleQuery {
    /// Requested style, or the configured default for unknown values
    fn resolve(&self, fallback: RenderStyle) -> RenderStyle {
        self.style
            .as_deref()
            .and_then(RenderStyle::parse_loose)
            .unwrap_or(fallback)
    }
}

/// Empty form
pub async fn index(State(state): State<AppState>, Query(query): Query<StyleQuery>) -> Html<String> {
    let renderer = renderer_for(query.resolve(state.settings.default_style));
    Html(render_page(renderer, &SearchForm::default(), None))
}

/// Run a search from the submitted form and render the results page.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<StyleQuery>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    let renderer = renderer_for(query.resolve(state.settings.default_style));
    let outcome = run_form(&state, &form).await;
    Html(render_page(renderer, &form, Some(&outcome)))
}

/// Same as `search`, for scripts: JSON in, JSON out.
pub async fn api_search(
    State(state): State<AppState>,
    body: Result<Json<SearchForm>, JsonRejection>,
) -> Result<Json<SearchOutcome>, (StatusCode, Json<serde_json::Value>)> {
    let Json(form) = body.map_err(|rejection| {
        warn!("Rejected search body: {}", rejection.body_text());
        unprocessable(rejection.body_text())
    })?;
    let config = form
        .to_configuration()
        .map_err(|e| unprocessable(e.to_string()))?;
    Ok(Json(state.session.run(&config).await))
}

fn unprocessable(message: String) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": message })),
    )
}

async fn run_form(state: &AppState, form: &SearchForm) -> SearchOutcome {
    match form.to_configuration() {
        Ok(config) => {
            info!(
                "Search requested: '{}' ({} papers, {})",
                config.topic, config.result_count, config.model
            );
            state.session.run(&config).await
        }
        Err(e) => {
            warn!("Rejected search form: {}", e);
            SearchOutcome::notice_only(form.topic(), Notice::new(NoticeLevel::Warning, e.to_string()))
        }
    }
}
