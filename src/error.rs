//! Error types
//!
//! Each concern gets its own `thiserror` enum. Search failures and gateway
//! failures are recovered locally by the services; only `AppError` ever
//! reaches the binary.

use std::path::PathBuf;
use std::time::Duration;

/// Failure of a single arXiv search call.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("arXiv returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed feed: {0}")]
    Feed(#[from] FeedError),
}

/// Structural problems in an Atom feed document.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("XML error at byte {position}: {message}")]
    Xml { position: usize, message: String },

    #[error("document root is <{0}>, expected an Atom <feed>")]
    NotAFeed(String),

    #[error("document is empty")]
    Empty,

    #[error("document ended inside an <entry>")]
    Truncated,
}

/// Failure of a single chat-completion call.
///
/// The `Display` output of these variants is what ends up in the summary
/// panel, after the credential has been scrubbed from it.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("response contained no completion text")]
    EmptyCompletion,
}

/// Invalid values on the search form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Please enter a research topic to search for.")]
    EmptyTopic,

    #[error("Number of papers must be a whole number between {min} and {max}, got \"{value}\".")]
    ResultCount { value: String, min: u32, max: u32 },

    #[error("Unknown model \"{0}\".")]
    UnknownModel(String),
}

/// Problems reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not find a data directory for settings")]
    NoDataDir,

    #[error("failed to access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level failure of the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("{0}")]
    HttpClient(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
