//! Gradient banner per paper with the abstract and the summary side by side.

use super::{authors_or_dash, escape_html, paper_link, Renderer, PAGE_TITLE};
use crate::models::{RenderStyle, SummarizedPaper, SummaryResult, UnavailableReason};

pub struct HeroRenderer;

impl Renderer for HeroRenderer {
    fn style(&self) -> RenderStyle {
        RenderStyle::Hero
    }

    fn stylesheet(&self) -> &'static str {
        HERO_STYLES
    }

    fn render_header(&self, html: &mut String) {
        html.push_str(&format!("<h1 class=\"hero-title\">📚 {}</h1>\n", PAGE_TITLE));
        html.push_str(
            "<p class=\"hero-tagline\">Search for research papers on arXiv and get AI-powered summaries!</p>\n",
        );
    }

    fn render_paper(&self, html: &mut String, index: usize, item: &SummarizedPaper) {
        html.push_str("<section class=\"paper\">\n<div class=\"banner\">\n");
        html.push_str(&format!("<h2>📄 Paper {}</h2>\n", index));
        html.push_str(&format!("<h3>{}</h3>\n", escape_html(item.paper.title())));
        html.push_str(&format!(
            "<div><strong>👥 Authors:</strong> {}</div>\n",
            authors_or_dash(item)
        ));
        html.push_str(&format!(
            "<div><strong>📅 Published:</strong> {}</div>\n",
            item.paper.published()
        ));
        html.push_str(&format!(
            "<div><strong>🔗 ArXiv ID:</strong> {}</div>\n",
            paper_link(item)
        ));
        html.push_str("</div>\n<div class=\"columns\">\n");

        html.push_str("<div class=\"panel original\">\n<h4>📋 Original Abstract</h4>\n");
        html.push_str(&format!(
            "<div class=\"body\">{}</div>\n</div>\n",
            escape_html(item.paper.abstract_text())
        ));

        html.push_str("<div class=\"panel generated\">\n<h4>🤖 AI Generated Summary</h4>\n");
        match &item.summary {
            SummaryResult::GeneratedText(text) => {
                html.push_str(&format!("<div class=\"body\">{}</div>\n", escape_html(text)));
            }
            SummaryResult::Unavailable(UnavailableReason::MissingCredential) => {
                html.push_str(&format!(
                    "<div class=\"callout\"><div class=\"icon\">⚠️</div><strong>API Key Required</strong><br><br>{}</div>\n",
                    escape_html(&item.summary.display_text())
                ));
            }
            SummaryResult::Unavailable(UnavailableReason::UpstreamError(_)) => {
                html.push_str(&format!(
                    "<div class=\"body failed\">❌ {}</div>\n",
                    escape_html(&item.summary.display_text())
                ));
            }
        }
        html.push_str("</div>\n</div>\n<div class=\"separator\"></div>\n</section>\n");
    }
}

const HERO_STYLES: &str = r#"
.hero-title { text-align: center; }
.hero-tagline { text-align: center; color: #475569; }
.banner { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: #e0e0e0;
  padding: 20px; border-radius: 15px; margin: 20px 0; box-shadow: 0 8px 32px rgba(0,0,0,0.1); }
.banner h2 { color: white; margin: 0 0 10px; font-size: 1.5em; }
.banner h3 { color: #f0f0f0; margin: 0 0 15px; font-weight: 400; line-height: 1.4; }
.banner a { color: #f0f0f0; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 32px; }
.panel { padding: 25px; border-radius: 12px; box-shadow: 0 4px 16px rgba(0,0,0,0.05);
  height: 400px; overflow-y: auto; line-height: 1.6; font-size: 0.95em; }
.panel h4 { margin: 0 0 15px; font-size: 1.3em; }
.panel.original { background: #f8f9ff; border-left: 5px solid #4f46e5; color: #475569; }
.panel.original h4 { color: #1e293b; }
.panel.generated { background: #f0fdf4; border-left: 5px solid #22c55e; color: #047857; }
.panel.generated h4 { color: #065f46; }
.body.failed { color: #991b1b; }
.callout { background: #fef3c7; color: #92400e; padding: 20px; border-radius: 12px;
  text-align: center; max-width: 300px; margin: 40px auto; }
.callout .icon { font-size: 2em; margin-bottom: 10px; }
.separator { margin: 40px 0; height: 2px;
  background: linear-gradient(to right, transparent, #e2e8f0, transparent); }
"#;
