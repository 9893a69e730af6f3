// Model service boundary.
//
// The analyzer only needs "send a prompt, get text back". GeminiModel is the
// production implementation; tests substitute a scripted model so the parse
// and classify path runs without the network.

use anyhow::Result;
use async_trait::async_trait;

/// A one-shot text completion service.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Send `prompt` and return the model's raw text output.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, reported alongside results.
    fn name(&self) -> &str;
}

/// Placeholder used when no API key is configured. Always fails, so the
/// dashboard still starts and reports the problem per request instead of
/// producing fake scores.
pub struct UnconfiguredModel;

#[async_trait]
impl CompletionModel for UnconfiguredModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("GEMINI_API_KEY not set. Add it to your .env file and restart")
    }

    fn name(&self) -> &str {
        "unconfigured"
    }
}
