use crate::error::{FinancialDocumentError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "gemma:2b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 2000;

/// Settings for the local inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Document text beyond this many characters is dropped from the prompt.
    pub max_context_chars: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
        }
    }
}

impl GatewayConfig {
    /// Defaults overridden by `OLLAMA_HOST`, `FINDOC_MODEL`,
    /// `FINDOC_TIMEOUT_SECS` and `FINDOC_MAX_CONTEXT_CHARS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("OLLAMA_HOST") {
            config.base_url = normalize_host(&host);
        }
        if let Some(model) = lookup("FINDOC_MODEL") {
            config.model = model;
        }
        if let Some(timeout) = lookup("FINDOC_TIMEOUT_SECS") {
            config.timeout_secs = parse_setting("FINDOC_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(limit) = lookup("FINDOC_MAX_CONTEXT_CHARS") {
            config.max_context_chars = parse_setting("FINDOC_MAX_CONTEXT_CHARS", &limit)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(FinancialDocumentError::InvalidConfig(
                "base_url must not be empty".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(FinancialDocumentError::InvalidConfig(
                "model must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(FinancialDocumentError::InvalidConfig(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn with_max_context_chars(mut self, max_context_chars: usize) -> Self {
        self.max_context_chars = max_context_chars;
        self
    }
}

/// `OLLAMA_HOST` is commonly given as `host:port` without a scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| {
        FinancialDocumentError::InvalidConfig(format!("{}='{}': {}", key, value, e))
    })
}
