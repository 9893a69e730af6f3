// Failure kinds an analysis can end in.
//
// Only two kinds reach the user: EmptyInput (nothing to analyze, the model is
// never called) and ParseError (no usable score came back). A failed model
// call is reported under the ParseError kind too, since from the user's side
// the outcome is the same: no score, try again.

use serde::Serialize;
use thiserror::Error;

use super::score::Category;

/// Message shown for blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text first.";

/// Message shown when no score could be produced.
pub const PARSE_ERROR_MESSAGE: &str = "Could not parse model response. Please retry.";

/// Why a raw model response could not be turned into a ToxicityScore.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("no JSON object found in model response")]
    NoJsonObject,

    #[error("model response contained malformed JSON: {0}")]
    InvalidJson(String),

    #[error("model returned an empty JSON object")]
    EmptyObject,

    #[error("missing category '{0}'")]
    MissingCategory(Category),

    #[error("unexpected key '{0}'")]
    UnknownKey(String),

    #[error("value for '{0}' is not a number")]
    NotANumber(String),

    #[error("value {value} for '{category}' is outside [0, 1]")]
    OutOfRange { category: Category, value: f64 },
}

/// Error returned by a single analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,

    #[error("{} ({})", PARSE_ERROR_MESSAGE, .0)]
    Parse(#[from] ParseError),

    #[error("{} (model service call failed: {})", PARSE_ERROR_MESSAGE, .0)]
    Service(String),
}

/// The user-facing failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    EmptyInput,
    ParseError,
}

impl AnalysisError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AnalysisError::EmptyInput => FailureKind::EmptyInput,
            AnalysisError::Parse(_) | AnalysisError::Service(_) => FailureKind::ParseError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_failure_reports_parse_kind() {
        let err = AnalysisError::Service("timeout".to_string());
        assert_eq!(err.kind(), FailureKind::ParseError);
        assert!(err.to_string().starts_with(PARSE_ERROR_MESSAGE));
    }

    #[test]
    fn test_empty_input_message() {
        assert_eq!(AnalysisError::EmptyInput.to_string(), EMPTY_INPUT_MESSAGE);
        assert_eq!(AnalysisError::EmptyInput.kind(), FailureKind::EmptyInput);
    }

    #[test]
    fn test_parse_detail_included() {
        let err = AnalysisError::from(ParseError::MissingCategory(Category::Threat));
        assert!(err.to_string().contains("missing category 'threat'"));
    }
}
