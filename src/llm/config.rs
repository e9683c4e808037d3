use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{AgentError, AgentResult};

pub const MODEL_ENV: &str = "AUTOGEN_MODEL";
pub const API_KEY_ENV: &str = "AUTOGEN_API_KEY";
pub const BASE_URL_ENV: &str = "AUTOGEN_BASE_URL";
pub const TEMPERATURE_ENV: &str = "AUTOGEN_TEMPERATURE";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Model settings handed to the assistant agent.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: String,
    /// OpenAI-compatible endpoint; the OpenAI default when unset.
    pub api_base: Option<String>,
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            api_base: None,
            temperature: None,
        }
    }
}

// api_key stays out of logs
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl LlmConfig {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> AgentResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves every setting through `lookup`, so callers can supply a map
    /// instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> AgentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let temperature = match lookup(TEMPERATURE_ENV) {
            Some(raw) => Some(raw.trim().parse::<f32>().map_err(|e| {
                AgentError::Config(format!("{} must be a number, got {:?}: {}", TEMPERATURE_ENV, raw, e))
            })?),
            None => None,
        };

        Ok(Self {
            model: lookup(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: lookup(API_KEY_ENV).unwrap_or_default(),
            api_base: lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()),
            temperature,
        })
    }
}
