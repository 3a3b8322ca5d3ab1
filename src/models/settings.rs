use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::request::PromptTemplate;

pub const DEFAULT_ARXIV_BASE_URL: &str = "http://export.arxiv.org/api/query";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Which front-end renders the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    Minimal,
    #[default]
    Hero,
}

impl RenderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStyle::Minimal => "minimal",
            RenderStyle::Hero => "hero",
        }
    }

    pub fn parse_loose(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Some(RenderStyle::Minimal),
            "hero" => Some(RenderStyle::Hero),
            _ => None,
        }
    }
}

/// Application settings, stored as JSON in the data directory.
///
/// Every field has a default so a partial file still loads. The API key is
/// never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub bind_address: String,
    pub arxiv_base_url: String,
    pub openrouter_base_url: String,
    pub search_timeout_secs: u64,
    pub summary_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub arxiv_min_interval_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    pub prompt_template: PromptTemplate,
    pub default_style: RenderStyle,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8501".to_string(),
            arxiv_base_url: DEFAULT_ARXIV_BASE_URL.to_string(),
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            search_timeout_secs: 15,
            summary_timeout_secs: 20,
            cache_ttl_secs: 300,
            arxiv_min_interval_secs: 3,
            temperature: 0.7,
            max_tokens: 500,
            prompt_template: PromptTemplate::Plain,
            default_style: RenderStyle::Hero,
        }
    }
}

impl AppSettings {
    /// Clamp values that would break the finite-timeout guarantee or the
    /// gateway's accepted ranges.
    pub fn normalized(mut self) -> Self {
        self.search_timeout_secs = self.search_timeout_secs.max(1);
        self.summary_timeout_secs = self.summary_timeout_secs.max(1);
        self.max_tokens = self.max_tokens.max(1);
        if !self.temperature.is_finite() {
            self.temperature = AppSettings::default().temperature;
        }
        self.temperature = self.temperature.clamp(0.0, 2.0);
        self
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn summary_timeout(&self) -> Duration {
        Duration::from_secs(self.summary_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn arxiv_min_interval(&self) -> Duration {
        Duration::from_secs(self.arxiv_min_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"cache_ttl_secs": 60, "default_style": "minimal"}"#).unwrap();
        assert_eq!(settings.cache_ttl(), Duration::from_secs(60));
        assert_eq!(settings.default_style, RenderStyle::Minimal);
        assert_eq!(settings.search_timeout_secs, 15);
        assert_eq!(settings.prompt_template, PromptTemplate::Plain);
    }

    #[test]
    fn test_normalized_keeps_timeouts_finite() {
        let settings = AppSettings {
            search_timeout_secs: 0,
            summary_timeout_secs: 0,
            temperature: 9.0,
            max_tokens: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(settings.search_timeout(), Duration::from_secs(1));
        assert_eq!(settings.summary_timeout(), Duration::from_secs(1));
        assert_eq!(settings.temperature, 2.0);
        assert_eq!(settings.max_tokens, 1);
    }

    #[test]
    fn test_render_style_parse() {
        assert_eq!(RenderStyle::parse_loose(" Hero "), Some(RenderStyle::Hero));
        assert_eq!(RenderStyle::parse_loose("minimal"), Some(RenderStyle::Minimal));
        assert_eq!(RenderStyle::parse_loose("fancy"), None);
    }
}
