pub mod adapters;
pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use adapters::{ArxivClient, OpenRouterClient};
use error::AppError;
use models::AppSettings;
use services::{AbstractSummarizer, PaperFinder, SamplingParams, SearchSession};

pub const APP_NAME: &str = "paperprecision";

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SearchSession>,
    pub settings: Arc<AppSettings>,
    pub log_dir: PathBuf,
    pub started_at: Instant,
}

impl AppState {
    /// Wire the HTTP clients and services described by `settings`.
    pub fn from_settings(settings: AppSettings, log_dir: PathBuf) -> Result<Self, AppError> {
        let settings = settings.normalized();

        let arxiv = ArxivClient::new(
            &settings.arxiv_base_url,
            settings.search_timeout(),
            settings.arxiv_min_interval(),
        )
        .map_err(AppError::HttpClient)?;
        let gateway = OpenRouterClient::new(&settings.openrouter_base_url, settings.summary_timeout())
            .map_err(AppError::HttpClient)?;

        let finder = PaperFinder::new(Arc::new(arxiv), settings.cache_ttl());
        let summarizer = AbstractSummarizer::new(
            Arc::new(gateway),
            settings.prompt_template,
            SamplingParams {
                temperature: settings.temperature,
                max_tokens: settings.max_tokens,
            },
        );

        Ok(Self {
            session: Arc::new(SearchSession::new(Arc::new(finder), Arc::new(summarizer))),
            settings: Arc::new(settings),
            log_dir,
            started_at: Instant::now(),
        })
    }
}

/// Start logging, load settings and serve until the process is stopped.
pub async fn run() -> Result<(), AppError> {
    let log_dir = utils::logging::default_log_dir();
    let _guard = utils::logging::init_logging(&log_dir);

    info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    info!("Log directory: {:?}", log_dir);

    let settings = commands::settings::load_or_init_settings();
    let addr = settings.bind_address.clone();
    let state = AppState::from_settings(settings, log_dir)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, commands::router(state))
        .await
        .map_err(AppError::Serve)
}
