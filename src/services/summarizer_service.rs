//! Summarizer service for abstract summaries
//!
//! This service handles:
//! - Short-circuiting when no API key was supplied
//! - Composing the prompt from the user's instruction and the abstract
//! - One chat-completion call per abstract, no retries
//! - Turning gateway failures into displayable, credential-free details

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::adapters::{ChatGateway, ChatRequest};
use crate::models::{PromptTemplate, SummaryResult};
use crate::utils::http::scrub_secret;

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Summarizer service for generating abstract summaries
pub struct AbstractSummarizer {
    gateway: Arc<dyn ChatGateway>,
    template: PromptTemplate,
    sampling: SamplingParams,
}

impl AbstractSummarizer {
    pub fn new(
        gateway: Arc<dyn ChatGateway>,
        template: PromptTemplate,
        sampling: SamplingParams,
    ) -> Self {
        Self {
            gateway,
            template,
            sampling,
        }
    }

    /// Summarize one abstract
    ///
    /// An absent or blank credential yields `MissingCredential` without any
    /// network traffic. Gateway failures yield `UpstreamError` with the
    /// credential scrubbed from the detail.
    pub async fn summarize(
        &self,
        abstract_text: &str,
        instruction_prompt: &str,
        credential: Option<&str>,
        model: &str,
    ) -> SummaryResult {
        let Some(credential) = credential.map(str::trim).filter(|c| !c.is_empty()) else {
            debug!("No API key supplied, skipping summary");
            return SummaryResult::missing_credential();
        };

        let request = ChatRequest {
            model: model.to_string(),
            prompt: build_prompt(self.template, instruction_prompt, abstract_text),
            temperature: self.sampling.temperature,
            max_tokens: self.sampling.max_tokens,
        };

        match self.gateway.complete(&request, credential).await {
            Ok(text) => {
                info!(model = %model, "Generated summary ({} chars)", text.len());
                SummaryResult::generated(text)
            }
            Err(e) => {
                let detail = scrub_secret(&e.to_string(), credential);
                warn!(model = %model, "Summary failed: {}", detail);
                SummaryResult::upstream_error(detail)
            }
        }
    }
}

/// Build the single user message sent to the gateway
pub fn build_prompt(template: PromptTemplate, instruction: &str, abstract_text: &str) -> String {
    match template {
        PromptTemplate::Plain => format!(
            "{}\n\nContent to summarize:\n{}",
            instruction.trim_end(),
            abstract_text
        ),
        PromptTemplate::Structured => format!(
            r#"{}

Organize the summary under these headings:
- Contribution: what the paper adds
- Methodology: how the work was done
- Key findings: the main results
- Impact: why it matters

Abstract:
{}"#,
            instruction.trim_end(),
            abstract_text
        ),
    }
}
