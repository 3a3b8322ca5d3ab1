//! Services module for business logic
//!
//! This module contains service implementations that coordinate
//! between adapters and the HTTP commands.

pub mod paper_finder;
pub mod search_session;
pub mod summarizer_service;

pub use paper_finder::PaperFinder;
pub use search_session::{Notice, NoticeLevel, SearchOutcome, SearchSession};
pub use summarizer_service::{AbstractSummarizer, SamplingParams};
