use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// Text shown wherever a publication date is not available.
pub const UNKNOWN_DATE: &str = "unknown";

// New format: YYMM.NNNNN (e.g., 2301.12345)
static NEW_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4}\.\d{4,5}(?:v\d+)?)").expect("valid arxiv id regex"));
// Old format: category/YYMMNNN (e.g., hep-th/9901001)
static OLD_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z-]+(?:\.[A-Z]{2})?/\d{7}(?:v\d+)?)").expect("valid arxiv id regex"));

/// Publication date of a paper, if the feed carried a usable one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishedDate {
    Known(NaiveDate),
    Unknown,
}

impl PublishedDate {
    /// Take the `YYYY-MM-DD` prefix of an ISO timestamp.
    ///
    /// Absent, short or non-calendar values become `Unknown`; an empty string
    /// is never treated as a date.
    pub fn from_timestamp(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(|s| s.get(..10))
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .map(PublishedDate::Known)
            .unwrap_or(PublishedDate::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, PublishedDate::Known(_))
    }
}

impl fmt::Display for PublishedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishedDate::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PublishedDate::Unknown => f.write_str(UNKNOWN_DATE),
        }
    }
}

impl Serialize for PublishedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One publication returned by a search.
///
/// Records are built once by the feed parser and never mutated afterwards,
/// so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperRecord {
    title: String,
    authors: Vec<String>,
    #[serde(rename = "abstract")]
    abstract_text: String,
    source_id: String,
    published: PublishedDate,
}

impl PaperRecord {
    /// Build a record, normalizing the free-text fields to single lines.
    pub fn new(
        title: &str,
        authors: Vec<String>,
        abstract_text: &str,
        source_id: &str,
        published: PublishedDate,
    ) -> Self {
        Self {
            title: normalize_single_line(title),
            authors: authors
                .iter()
                .map(|a| normalize_single_line(a))
                .filter(|a| !a.is_empty())
                .collect(),
            abstract_text: normalize_single_line(abstract_text),
            source_id: source_id.trim().to_string(),
            published,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn authors_str(&self) -> String {
        self.authors.join(", ")
    }

    pub fn abstract_text(&self) -> &str {
        &self.abstract_text
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn published(&self) -> &PublishedDate {
        &self.published
    }

    /// Short arXiv identifier taken from the source URI, when it has one.
    pub fn arxiv_id(&self) -> Option<String> {
        extract_arxiv_id(&self.source_id)
    }
}

/// Extract an arXiv ID from an identifier URI, DOI or bare ID
///
/// Handles formats like:
/// - 2301.12345
/// - http://arxiv.org/abs/2301.12345v1
/// - 10.48550/arXiv.2301.12345 (DOI format)
/// - http://arxiv.org/abs/hep-th/9901001v2
pub fn extract_arxiv_id(input: &str) -> Option<String> {
    if let Some(cap) = NEW_ID_RE.captures(input) {
        return Some(cap[1].to_string());
    }
    if let Some(cap) = OLD_ID_RE.captures(input) {
        return Some(cap[1].to_string());
    }
    None
}

/// Trim every line and join the non-empty ones with single spaces.
///
/// A lone `\r` counts as a line break too.
pub fn normalize_single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
