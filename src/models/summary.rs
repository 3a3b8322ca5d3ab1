use serde::Serialize;

use super::paper::PaperRecord;

/// Why no generated summary is available for a paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum UnavailableReason {
    MissingCredential,
    UpstreamError(String),
}

/// Outcome of one summarization attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SummaryResult {
    GeneratedText(String),
    Unavailable(UnavailableReason),
}

impl SummaryResult {
    pub fn generated(text: impl Into<String>) -> Self {
        SummaryResult::GeneratedText(text.into())
    }

    pub fn missing_credential() -> Self {
        SummaryResult::Unavailable(UnavailableReason::MissingCredential)
    }

    pub fn upstream_error(detail: impl Into<String>) -> Self {
        SummaryResult::Unavailable(UnavailableReason::UpstreamError(detail.into()))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            SummaryResult::GeneratedText(text) => Some(text),
            SummaryResult::Unavailable(_) => None,
        }
    }

    /// Text for the summary panel: the completion, or a placeholder.
    pub fn display_text(&self) -> String {
        match self {
            SummaryResult::GeneratedText(text) => text.clone(),
            SummaryResult::Unavailable(UnavailableReason::MissingCredential) => {
                "Please provide an API key in the sidebar to generate AI summaries.".to_string()
            }
            SummaryResult::Unavailable(UnavailableReason::UpstreamError(detail)) => {
                format!("Error generating summary: {}", detail)
            }
        }
    }
}

/// A paper paired with its summary, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct SummarizedPaper {
    pub paper: PaperRecord,
    pub summary: SummaryResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_variants() {
        assert_eq!(SummaryResult::generated("Short.").display_text(), "Short.");
        assert!(SummaryResult::missing_credential()
            .display_text()
            .contains("API key"));
        assert_eq!(
            SummaryResult::upstream_error("HTTP 500").display_text(),
            "Error generating summary: HTTP 500"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(SummaryResult::missing_credential()).unwrap();
        assert_eq!(json["kind"], "unavailable");
        assert_eq!(json["value"]["reason"], "missing_credential");

        let json = serde_json::to_value(SummaryResult::upstream_error("boom")).unwrap();
        assert_eq!(json["value"]["reason"], "upstream_error");
        assert_eq!(json["value"]["detail"], "boom");

        let json = serde_json::to_value(SummaryResult::generated("done")).unwrap();
        assert_eq!(json["kind"], "generated_text");
        assert_eq!(json["value"], "done");
    }
}
