//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::review::NotarizationPolicy;

use super::ConfigError;

/// LLM provider kind.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    Claude,
}

/// Configuration for the skill-parser model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Provider to use (gemini or claude).
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in the reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Base URL for the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable name for the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    "gemini-3-flash".to_string()
}

fn default_max_tokens() -> u32 {
    256
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Locations of the persisted documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Profile store document.
    pub profiles: PathBuf,
    /// Transaction document.
    pub transactions: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            profiles: PathBuf::from("freelancers.json"),
            transactions: PathBuf::from("transactions.json"),
        }
    }
}

/// Bounds for the combination search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Stop after this many combinations; unbounded when absent.
    pub max_combinations: Option<usize>,
}

/// Review notarization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotaryConfig {
    pub policy: NotarizationPolicy,
    /// HTTP endpoint receiving `{"hash": "<hex>"}`.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NotaryConfig {
    fn default() -> Self {
        Self {
            policy: NotarizationPolicy::Disabled,
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Company on whose behalf matches are requested and reviews filed.
    pub company: String,
    pub store: StoreConfig,
    pub search: SearchConfig,
    pub ai: AiConfig,
    pub notary: NotaryConfig,
}

impl AppConfig {
    /// Check settings that cannot be expressed in the type.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.company.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "company must be set (config `company` or --company)".to_string(),
            ));
        }
        if self.search.max_combinations == Some(0) {
            return Err(ConfigError::Invalid(
                "search.max_combinations must be >= 1".to_string(),
            ));
        }
        if self.notary.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "notary.timeout_secs must be >= 1".to_string(),
            ));
        }
        if self.notary.policy == NotarizationPolicy::BestEffort && self.notary.endpoint.is_none() {
            return Err(ConfigError::Invalid(
                "notary.endpoint is required when notary.policy is best_effort".to_string(),
            ));
        }
        Ok(())
    }
}
