//! HTML front-ends
//!
//! A page is the shared form (sidebar settings plus the topic bar) followed
//! by the notices and one card per paper. The `Renderer` decides how the
//! header and each card look; everything else is shared.

pub mod hero;
pub mod minimal;

use crate::models::{
    ModelChoice, RenderStyle, SearchForm, SummarizedPaper, MAX_RESULT_COUNT, MIN_RESULT_COUNT,
};
use crate::services::{NoticeLevel, SearchOutcome};

pub use hero::HeroRenderer;
pub use minimal::MinimalRenderer;

pub const PAGE_TITLE: &str = "Research Paper Summarizer";

/// Look and feel of a results page
pub trait Renderer: Send + Sync {
    fn style(&self) -> RenderStyle;

    /// CSS embedded in the page head
    fn stylesheet(&self) -> &'static str;

    /// Title block above the search bar
    fn render_header(&self, html: &mut String);

    /// One card; `index` is 1-based
    fn render_paper(&self, html: &mut String, index: usize, item: &SummarizedPaper);
}

pub fn renderer_for(style: RenderStyle) -> &'static dyn Renderer {
    match style {
        RenderStyle::Minimal => &MinimalRenderer,
        RenderStyle::Hero => &HeroRenderer,
    }
}

/// Render a full page.
///
/// `outcome` is `None` before the first search. The credential on `form`
/// is never written into the page.
pub fn render_page(
    renderer: &dyn Renderer,
    form: &SearchForm,
    outcome: Option<&SearchOutcome>,
) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", PAGE_TITLE));
    html.push_str("<style>\n");
    html.push_str(BASE_STYLES);
    html.push_str(renderer.stylesheet());
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!(
        "<form method=\"post\" action=\"/search?style={}\" class=\"layout\">\n",
        renderer.style().as_str()
    ));
    render_sidebar(&mut html, form);

    html.push_str("<main>\n");
    renderer.render_header(&mut html);
    render_topic_bar(&mut html, form);

    if let Some(outcome) = outcome {
        for notice in &outcome.notices {
            html.push_str(&format!(
                "<div class=\"notice {}\">{}</div>\n",
                notice_class(notice.level),
                escape_html(&notice.message)
            ));
        }
        for (i, item) in outcome.papers.iter().enumerate() {
            renderer.render_paper(&mut html, i + 1, item);
        }
    }

    html.push_str("<footer>\n");
    html.push_str("<p>Powered by the arXiv API and OpenRouter</p>\n");
    html.push_str(
        "<p><strong>Security note:</strong> your API key is sent with each search and never stored.</p>\n",
    );
    html.push_str("</footer>\n</main>\n</form>\n</body>\n</html>\n");

    html
}

fn render_sidebar(html: &mut String, form: &SearchForm) {
    html.push_str("<aside class=\"sidebar\">\n<h2>Configuration</h2>\n");

    html.push_str("<label for=\"credential\">OpenRouter API Key</label>\n");
    html.push_str(
        "<input type=\"password\" id=\"credential\" name=\"credential\" autocomplete=\"off\" \
         title=\"Enter your OpenRouter API key. Never share your API keys publicly!\">\n",
    );

    html.push_str("<label for=\"model\">Select AI Model</label>\n");
    html.push_str("<select id=\"model\" name=\"model\">\n");
    let selected = form.model_or_default();
    for model in ModelChoice::ALL {
        let marker = if model == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            model.as_str(),
            marker
        ));
    }
    html.push_str("</select>\n");

    let count = form.result_count_or_default();
    html.push_str(&format!(
        "<label for=\"result_count\">Number of papers to summarize: <output>{}</output></label>\n",
        count
    ));
    html.push_str(&format!(
        "<input type=\"range\" id=\"result_count\" name=\"result_count\" min=\"{}\" max=\"{}\" value=\"{}\" \
         oninput=\"this.previousElementSibling.firstElementChild.value = this.value\">\n",
        MIN_RESULT_COUNT, MAX_RESULT_COUNT, count
    ));

    html.push_str("<label for=\"instruction_prompt\">Summary Instructions</label>\n");
    html.push_str(&format!(
        "<textarea id=\"instruction_prompt\" name=\"instruction_prompt\" rows=\"5\">{}</textarea>\n",
        escape_html(form.instruction_prompt())
    ));

    html.push_str("<hr>\n<h3>How to use</h3>\n<ol>\n");
    for step in [
        "Enter your OpenRouter API key",
        "Choose an AI model",
        "Set the number of papers to fetch",
        "Customize the summary instructions",
        "Enter a research topic",
        "Click 'Search &amp; Summarize'",
    ] {
        html.push_str(&format!("<li>{}</li>\n", step));
    }
    html.push_str("</ol>\n</aside>\n");
}

fn render_topic_bar(html: &mut String, form: &SearchForm) {
    html.push_str("<div class=\"topic-bar\">\n");
    html.push_str("<label for=\"topic\">Research Topic</label>\n");
    html.push_str(&format!(
        "<input type=\"text\" id=\"topic\" name=\"topic\" value=\"{}\" \
         placeholder=\"e.g., Machine learning, Quantum computing, Computer vision...\">\n",
        escape_html(form.topic())
    ));
    html.push_str("<button type=\"submit\">Search &amp; Summarize</button>\n</div>\n");
}

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "success",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    }
}

/// Authors joined for display, or a dash when the feed listed none.
pub(crate) fn authors_or_dash(item: &SummarizedPaper) -> String {
    if item.paper.authors().is_empty() {
        "-".to_string()
    } else {
        escape_html(&item.paper.authors_str())
    }
}

/// Link to the abstract page, falling back to the raw id.
pub(crate) fn paper_link(item: &SummarizedPaper) -> String {
    let id = item
        .paper
        .arxiv_id()
        .unwrap_or_else(|| item.paper.source_id().to_string());
    format!(
        "<a href=\"{}\">{}</a>",
        escape_html(item.paper.source_id()),
        escape_html(&id)
    )
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const BASE_STYLES: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; color: #1e293b; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 300px; padding: 24px; background: #f1f5f9; }
.sidebar label { display: block; margin: 16px 0 6px; font-weight: 600; }
.sidebar input, .sidebar select, .sidebar textarea { width: 100%; }
main { flex: 1; padding: 24px 40px; max-width: 1200px; }
.topic-bar { display: flex; gap: 12px; align-items: end; margin-bottom: 24px; }
.topic-bar label { display: none; }
.topic-bar input { flex: 1; padding: 10px; }
.topic-bar button { padding: 10px 18px; background: #ef4444; color: white; border: 0; border-radius: 8px; }
.notice { padding: 12px 16px; border-radius: 8px; margin: 8px 0; }
.notice.info { background: #e0f2fe; }
.notice.success { background: #dcfce7; color: #166534; }
.notice.warning { background: #fef3c7; color: #92400e; }
.notice.error { background: #fee2e2; color: #991b1b; }
footer { margin-top: 48px; text-align: center; color: #666; }
"#;
