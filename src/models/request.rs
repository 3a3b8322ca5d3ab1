//! Per-interaction search configuration
//!
//! Everything here is transient: a `RequestConfiguration` lives for one
//! search and is never written anywhere.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

pub const MIN_RESULT_COUNT: u32 = 1;
pub const MAX_RESULT_COUNT: u32 = 10;
pub const DEFAULT_RESULT_COUNT: u32 = 3;

pub const DEFAULT_INSTRUCTION_PROMPT: &str = "You are an expert summarizer and I want you to understand the content and summarize under 100 words.";

/// Models offered on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelChoice {
    #[default]
    #[serde(rename = "google/gemma-2-9b-it")]
    Gemma2_9b,
    #[serde(rename = "anthropic/claude-3-haiku")]
    Claude3Haiku,
    #[serde(rename = "openai/gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "meta-llama/llama-3-8b-instruct")]
    Llama3_8b,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 4] = [
        ModelChoice::Gemma2_9b,
        ModelChoice::Claude3Haiku,
        ModelChoice::Gpt35Turbo,
        ModelChoice::Llama3_8b,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::Gemma2_9b => "google/gemma-2-9b-it",
            ModelChoice::Claude3Haiku => "anthropic/claude-3-haiku",
            ModelChoice::Gpt35Turbo => "openai/gpt-3.5-turbo",
            ModelChoice::Llama3_8b => "meta-llama/llama-3-8b-instruct",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ModelChoice::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownModel(s.to_string()))
    }
}

/// How the instruction and the abstract are combined into one prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptTemplate {
    /// Instruction followed by the abstract.
    #[default]
    Plain,
    /// Instruction, then a request for contribution, methodology, findings
    /// and impact, then the abstract.
    Structured,
}

/// Bearer token for the summarization gateway.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for absent or blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([redacted])")
    }
}

/// Validated parameters for one search + summarize cycle.
#[derive(Debug, Clone)]
pub struct RequestConfiguration {
    pub topic: String,
    pub result_count: u32,
    pub model: ModelChoice,
    pub instruction_prompt: String,
    pub credential: Option<Credential>,
}

impl RequestConfiguration {
    pub fn new(
        topic: &str,
        result_count: u32,
        model: ModelChoice,
        instruction_prompt: &str,
        credential: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ConfigError::EmptyTopic);
        }
        if !(MIN_RESULT_COUNT..=MAX_RESULT_COUNT).contains(&result_count) {
            return Err(ConfigError::ResultCount {
                value: result_count.to_string(),
                min: MIN_RESULT_COUNT,
                max: MAX_RESULT_COUNT,
            });
        }

        let instruction_prompt = if instruction_prompt.trim().is_empty() {
            DEFAULT_INSTRUCTION_PROMPT.to_string()
        } else {
            instruction_prompt.to_string()
        };

        Ok(Self {
            topic: topic.to_string(),
            result_count,
            model,
            instruction_prompt,
            credential: credential.and_then(Credential::new),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}

/// Raw values as submitted by the form or the JSON API.
///
/// Every field is optional so that a partially filled form still reaches
/// validation and can be re-rendered with the user's input.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub topic: Option<String>,
    #[serde(deserialize_with = "count_as_text")]
    pub result_count: Option<String>,
    pub model: Option<String>,
    pub instruction_prompt: Option<String>,
    pub credential: Option<String>,
}

/// JSON callers send counts as numbers, forms send them as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum CountInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn count_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<CountInput>::deserialize(deserializer)?.map(|count| match count {
            CountInput::Integer(n) => n.to_string(),
            CountInput::Float(n) => n.to_string(),
            CountInput::Text(s) => s,
        }),
    )
}

impl fmt::Debug for SearchForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchForm")
            .field("topic", &self.topic)
            .field("result_count", &self.result_count)
            .field("model", &self.model)
            .field("has_credential", &self.credential.is_some())
            .finish()
    }
}

impl SearchForm {
    pub fn topic(&self) -> &str {
        self.topic.as_deref().unwrap_or("")
    }

    pub fn instruction_prompt(&self) -> &str {
        self.instruction_prompt
            .as_deref()
            .unwrap_or(DEFAULT_INSTRUCTION_PROMPT)
    }

    /// Selected model, falling back to the default for display purposes.
    pub fn model_or_default(&self) -> ModelChoice {
        self.model
            .as_deref()
            .and_then(|m| m.parse().ok())
            .unwrap_or_default()
    }

    /// Result count as shown on the slider; invalid input shows the default.
    pub fn result_count_or_default(&self) -> u32 {
        self.result_count
            .as_deref()
            .and_then(|c| c.trim().parse::<u32>().ok())
            .filter(|c| (MIN_RESULT_COUNT..=MAX_RESULT_COUNT).contains(c))
            .unwrap_or(DEFAULT_RESULT_COUNT)
    }

    pub fn to_configuration(&self) -> Result<RequestConfiguration, ConfigError> {
        if self.topic().trim().is_empty() {
            return Err(ConfigError::EmptyTopic);
        }

        let result_count = match self.result_count.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_RESULT_COUNT,
            Some(raw) => raw.parse::<u32>().map_err(|_| ConfigError::ResultCount {
                value: raw.to_string(),
                min: MIN_RESULT_COUNT,
                max: MAX_RESULT_COUNT,
            })?,
        };

        let model = match self.model.as_deref().map(str::trim) {
            None | Some("") => ModelChoice::default(),
            Some(raw) => raw.parse()?,
        };

        RequestConfiguration::new(
            self.topic(),
            result_count,
            model,
            self.instruction_prompt(),
            self.credential.as_deref(),
        )
    }
}
