// Google Gemini generateContent implementation.
//
// One POST per analysis, no retries. The response may hold several parts;
// their text is concatenated and handed back raw. Whether that text contains
// a usable score is the extractor's problem, not ours.
//
// API docs: https://ai.google.dev/api/generate-content

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::CompletionModel;

/// The key travels in a header, never in the URL, so transport errors that
/// echo the request URL can't carry it into logs or user-facing messages.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini-backed completion model.
pub struct GeminiModel {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiModel {
    /// Create a client for `model` at `api_base` (e.g.
    /// `https://generativelanguage.googleapis.com/v1beta`).
    pub fn new(api_base: &str, api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl CompletionModel for GeminiModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to call Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {}: {}", status, body);
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to decode Gemini API response")?;

        let text = response_text(result)?;
        debug!(model = %self.model, chars = text.len(), "Model responded");
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Concatenate the text parts of the first candidate.
pub fn response_text(response: GenerateResponse) -> Result<String> {
    if let Some(err) = response.error {
        anyhow::bail!("Gemini API error: {}", err.message);
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .context("Gemini API returned no candidates")?;

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        anyhow::bail!("Gemini API returned no text (finish reason: {reason})");
    }

    Ok(text.trim().to_string())
}

// --- Gemini API request/response types ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub candidates: Option<Vec<Candidate>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
}
