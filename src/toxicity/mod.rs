// Toxicity analysis: prompt a model, extract its JSON score, classify it.
//
// CompletionModel is the only seam to the outside world. GeminiModel is the
// one production backend; everything downstream of the raw response text
// (extraction, validation, verdict) is pure and model-agnostic.

pub mod analyzer;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod prompt;
pub mod score;
pub mod traits;
pub mod verdict;
