// One analysis request: blank check, prompt, model call, extract, classify.
//
// Each step runs exactly once. A failed model call or unusable response ends
// the request with an error the caller shows to the user; nothing is retried.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::error::AnalysisError;
use super::extract::parse_scores;
use super::prompt::build_prompt;
use super::score::ToxicityScore;
use super::traits::CompletionModel;
use super::verdict::Verdict;

/// The outcome of a successful analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub scores: ToxicityScore,
    pub mean: f64,
    pub verdict: Verdict,
    /// Model that produced the scores
    pub model: String,
    /// RFC 3339 timestamp of when the analysis completed
    pub analyzed_at: String,
}

impl Analysis {
    pub fn from_score(scores: ToxicityScore, model: &str) -> Self {
        Self {
            mean: scores.mean(),
            verdict: scores.verdict(),
            scores,
            model: model.to_string(),
            analyzed_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Reject blank or whitespace-only input.
pub fn check_input(text: &str) -> Result<(), AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    Ok(())
}

/// Analyze `text` with `model`.
///
/// Blank or whitespace-only text fails with `EmptyInput` before the model is
/// contacted. Otherwise the text is sent exactly as given.
pub async fn analyze(model: &dyn CompletionModel, text: &str) -> Result<Analysis, AnalysisError> {
    check_input(text)?;

    let prompt = build_prompt(text);
    let raw = model.complete(&prompt).await.map_err(|e| {
        warn!(error = %e, model = model.name(), "Model call failed");
        AnalysisError::Service(format!("{e:#}"))
    })?;

    let scores = parse_scores(&raw).inspect_err(|e| {
        warn!(error = %e, response_preview = %preview(&raw), "Unusable model response");
    })?;

    let analysis = Analysis::from_score(scores, model.name());
    info!(
        mean = analysis.mean,
        verdict = %analysis.verdict,
        model = model.name(),
        "Analysis complete"
    );
    Ok(analysis)
}

fn preview(raw: &str) -> String {
    crate::output::truncate_chars(raw, 200)
}
