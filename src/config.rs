use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::toxicity::gemini::GeminiModel;
use crate::toxicity::traits::{CompletionModel, UnconfiguredModel};

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model call timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Central configuration loaded from environment variables.
///
/// Loaded once at startup and read-only afterwards. Secrets come from env
/// vars (never hardcoded); the .env file is loaded automatically via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key (GEMINI_API_KEY). Empty when unset.
    pub api_key: String,
    /// Model name (TOXMETER_MODEL)
    pub model: String,
    /// API base URL (TOXMETER_API_BASE)
    pub api_base: String,
    /// Timeout for the single model round-trip (TOXMETER_TIMEOUT_SECS)
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything except the API key has a default. The key is only checked
    /// when a command actually needs to call the model.
    pub fn load() -> Result<Self> {
        let timeout_secs = match env::var("TOXMETER_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .with_context(|| {
                    format!("TOXMETER_TIMEOUT_SECS must be a positive integer, got {raw:?}")
                })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: env::var("TOXMETER_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: env::var("TOXMETER_API_BASE")
                .ok()
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Check that the Gemini API key is configured.
    /// Call this before any operation that sends text to the model.
    pub fn require_model(&self) -> Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!(
                "GEMINI_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Build the model client for this configuration.
    pub fn build_model(&self) -> Result<GeminiModel> {
        self.require_model()?;
        GeminiModel::new(
            &self.api_base,
            self.api_key.clone(),
            self.model.clone(),
            self.timeout,
        )
    }

    /// Like `build_model`, but falls back to a model that fails every request
    /// when no key is set. Used by long-running surfaces that should start
    /// anyway and report the problem inline.
    pub fn build_model_or_placeholder(&self) -> Result<Box<dyn CompletionModel>> {
        if self.api_key.is_empty() {
            return Ok(Box::new(UnconfiguredModel));
        }
        Ok(Box::new(self.build_model()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(api_key: &str) -> Config {
        Config {
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[test]
    fn test_require_model_without_key() {
        let err = config_with_key("").require_model().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_placeholder_when_unconfigured() {
        let model = config_with_key("").build_model_or_placeholder().unwrap();
        assert_eq!(model.name(), "unconfigured");

        let model = config_with_key("abc").build_model_or_placeholder().unwrap();
        assert_eq!(model.name(), DEFAULT_MODEL);
    }
}
