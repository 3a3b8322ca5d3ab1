//! External service adapters
//!
//! This module contains adapters for the two upstream APIs:
//! - arXiv: topic search returning an Atom feed
//! - OpenRouter: OpenAI-compatible chat completions
//!
//! Services talk to them through the `PaperSource` and `ChatGateway` traits
//! so they can be exercised with in-memory fakes.

use async_trait::async_trait;

use crate::error::{GatewayError, SearchError};
use crate::models::PaperRecord;

pub mod arxiv;
pub mod openrouter;

// Re-export commonly used types
pub use arxiv::ArxivClient;
pub use openrouter::{ChatRequest, OpenRouterClient};

/// Something that can answer a topic search with paper records.
#[async_trait]
pub trait PaperSource: Send + Sync {
    async fn search(&self, topic: &str, limit: u32) -> Result<Vec<PaperRecord>, SearchError>;
}

/// A hosted chat-completion endpoint.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send one request and return the first completion's text.
    async fn complete(&self, request: &ChatRequest, credential: &str)
        -> Result<String, GatewayError>;
}
