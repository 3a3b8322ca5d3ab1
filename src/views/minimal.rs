//! Plain cards: title, metadata line, then the abstract and summary stacked.

use super::{authors_or_dash, escape_html, paper_link, Renderer, PAGE_TITLE};
use crate::models::{RenderStyle, SummarizedPaper, SummaryResult};

pub struct MinimalRenderer;

impl Renderer for MinimalRenderer {
    fn style(&self) -> RenderStyle {
        RenderStyle::Minimal
    }

    fn stylesheet(&self) -> &'static str {
        MINIMAL_STYLES
    }

    fn render_header(&self, html: &mut String) {
        html.push_str(&format!("<h1>{}</h1>\n", PAGE_TITLE));
        html.push_str("<p class=\"tagline\">Search arXiv and summarize abstracts.</p>\n");
    }

    fn render_paper(&self, html: &mut String, index: usize, item: &SummarizedPaper) {
        html.push_str("<article class=\"paper\">\n");
        html.push_str(&format!(
            "<h2>{}. {}</h2>\n",
            index,
            escape_html(item.paper.title())
        ));
        html.push_str(&format!(
            "<p class=\"meta\">{} | {} | {}</p>\n",
            authors_or_dash(item),
            item.paper.published(),
            paper_link(item)
        ));

        html.push_str("<h3>Abstract</h3>\n");
        html.push_str(&format!(
            "<p>{}</p>\n",
            escape_html(item.paper.abstract_text())
        ));

        html.push_str("<h3>Summary</h3>\n");
        let class = match item.summary {
            SummaryResult::GeneratedText(_) => "summary",
            SummaryResult::Unavailable(_) => "summary unavailable",
        };
        html.push_str(&format!(
            "<p class=\"{}\">{}</p>\n",
            class,
            escape_html(&item.summary.display_text())
        ));
        html.push_str("</article>\n");
    }
}

const MINIMAL_STYLES: &str = r#"
h1 { font-weight: 600; margin-bottom: 4px; }
.tagline { color: #64748b; margin-top: 0; }
.paper { border-top: 1px solid #e2e8f0; padding: 16px 0; }
.paper h2 { font-size: 1.15em; margin: 0 0 6px; }
.paper h3 { font-size: 0.95em; margin: 12px 0 4px; color: #475569; }
.meta { color: #64748b; font-size: 0.9em; margin: 0; }
.summary.unavailable { color: #92400e; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaperRecord, PublishedDate};
    use chrono::NaiveDate;

    #[test]
    fn test_card_layout() {
        let item = SummarizedPaper {
            paper: PaperRecord::new(
                "Paper A",
                vec![],
                "Body.",
                "http://arxiv.org/abs/hep-th/9901001v2",
                PublishedDate::Known(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            ),
            summary: SummaryResult::generated("Short summary."),
        };
        let mut html = String::new();
        MinimalRenderer.render_paper(&mut html, 2, &item);

        assert!(html.contains("<h2>2. Paper A</h2>"));
        assert!(html.contains("- | 2024-01-15 | "));
        assert!(html.contains(">hep-th/9901001v2</a>"));
        assert!(html.contains("<p class=\"summary\">Short summary.</p>"));
    }
}
