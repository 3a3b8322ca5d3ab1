//! One search-and-summarize interaction
//!
//! Runs the Paper Finder, then the Abstract Summarizer over every record in
//! discovery order, and collects the notices the results page shows above
//! the paper cards.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{RequestConfiguration, SummarizedPaper};

use super::paper_finder::PaperFinder;
use super::summarizer_service::AbstractSummarizer;

pub const MISSING_KEY_NOTICE: &str =
    "Please enter your OpenRouter API key in the sidebar to generate summaries.";
pub const NO_RESULTS_NOTICE: &str =
    "No papers found for the given topic. Please try a different search term.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A banner message shown above the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Everything the results page needs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub topic: String,
    pub papers: Vec<SummarizedPaper>,
    pub notices: Vec<Notice>,
}

impl SearchOutcome {
    /// Outcome carrying a single notice and no papers
    pub fn notice_only(topic: &str, notice: Notice) -> Self {
        Self {
            topic: topic.to_string(),
            papers: Vec::new(),
            notices: vec![notice],
        }
    }
}

pub struct SearchSession {
    finder: Arc<PaperFinder>,
    summarizer: Arc<AbstractSummarizer>,
}

impl SearchSession {
    pub fn new(finder: Arc<PaperFinder>, summarizer: Arc<AbstractSummarizer>) -> Self {
        Self { finder, summarizer }
    }

    pub fn finder(&self) -> &PaperFinder {
        &self.finder
    }

    /// Search, then summarize each paper one after another.
    ///
    /// Never fails: search errors and per-paper summary errors become
    /// notices and placeholders on the returned outcome.
    pub async fn run(&self, config: &RequestConfiguration) -> SearchOutcome {
        let mut outcome = SearchOutcome {
            topic: config.topic.clone(),
            ..Default::default()
        };

        if !config.has_credential() {
            outcome
                .notices
                .push(Notice::new(NoticeLevel::Warning, MISSING_KEY_NOTICE));
        }

        let papers = match self.finder.find(&config.topic, config.result_count).await {
            Ok(papers) => papers,
            Err(e) => {
                outcome.notices.push(Notice::new(
                    NoticeLevel::Error,
                    format!("Error fetching papers: {}", e),
                ));
                return outcome;
            }
        };

        if papers.is_empty() {
            outcome
                .notices
                .push(Notice::new(NoticeLevel::Warning, NO_RESULTS_NOTICE));
            return outcome;
        }

        info!(
            "Found {} paper(s) for '{}', summarizing with {}",
            papers.len(),
            config.topic,
            config.model
        );
        outcome.notices.push(Notice::new(
            NoticeLevel::Success,
            format!("Found {} paper(s)!", papers.len()),
        ));

        let credential = config.credential.as_ref().map(|c| c.expose());
        for paper in papers {
            let summary = self
                .summarizer
                .summarize(
                    paper.abstract_text(),
                    &config.instruction_prompt,
                    credential,
                    config.model.as_str(),
                )
                .await;
            if summary.text().is_none() && credential.is_some() {
                warn!("No summary for {}", paper.source_id());
            }
            outcome.papers.push(SummarizedPaper { paper, summary });
        }

        outcome
    }
}
