//! Diagnostic endpoint
//!
//! Reports what is useful when troubleshooting a running instance.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::AppState;

/// Diagnostic result with system checks
#[derive(Debug, Serialize)]
pub struct DiagnosticResult {
    pub status: &'static str,
    /// Application version
    pub app_version: &'static str,
    /// Searches currently answered from memory
    pub cached_searches: usize,
    /// Log directory path
    pub log_path: String,
    pub uptime_secs: u64,
}

/// Run diagnostic checks
pub async fn health(State(state): State<AppState>) -> Json<DiagnosticResult> {
    debug!("Running diagnostics");

    Json(DiagnosticResult {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        cached_searches: state.session.finder().cached_searches(),
        log_path: state.log_dir.to_string_lossy().to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
