// Pull a ToxicityScore out of free-form model output.
//
// Models rarely return bare JSON. They wrap it in prose, Markdown fences, or
// a trailing "hope this helps". Extraction is two-step:
//
//   1. Greedy span: first '{' through the last '}' (dot matches newline).
//      This is the common case and handles fences and surrounding prose.
//   2. If that span doesn't yield a valid score (a stray brace in the
//      commentary, or a format example like `{}` ahead of the real answer),
//      walk every '{' in order and let serde_json read exactly one object
//      from there. The first object that passes validation wins.
//
// A valid object has exactly the six category keys, each a number in
// [0, 1]. Nothing is repaired or defaulted. When no candidate passes, the
// error for the greedy span is reported.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::ParseError;
use super::score::{Category, ToxicityScore};

static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Parse raw model output into a validated score.
pub fn parse_scores(raw: &str) -> Result<ToxicityScore, ParseError> {
    let greedy_err = match greedy_object(raw)? {
        Ok(object) => match validate(&object) {
            Ok(score) => return Ok(score),
            Err(e) => e,
        },
        Err(e) => ParseError::InvalidJson(e.to_string()),
    };

    debug!(error = %greedy_err, "Greedy brace span unusable, scanning for a valid object");

    scan_objects(raw)
        .find_map(|object| validate(&object).ok())
        .ok_or(greedy_err)
}

/// Find the first JSON object embedded in `raw`.
/// Schema is not checked here.
pub fn locate_json_object(raw: &str) -> Result<Map<String, Value>, ParseError> {
    match greedy_object(raw)? {
        Ok(object) => Ok(object),
        Err(greedy_err) => scan_objects(raw)
            .next()
            .ok_or_else(|| ParseError::InvalidJson(greedy_err.to_string())),
    }
}

/// Parse the first-'{'-to-last-'}' span. The outer error means there are no
/// braces at all.
fn greedy_object(
    raw: &str,
) -> Result<Result<Map<String, Value>, serde_json::Error>, ParseError> {
    let span = OBJECT_SPAN
        .find(raw)
        .ok_or(ParseError::NoJsonObject)?
        .as_str();
    Ok(serde_json::from_str(span))
}

/// Every well-formed object that starts at some '{' in `raw`, in order.
fn scan_objects(raw: &str) -> impl Iterator<Item = Map<String, Value>> + '_ {
    raw.match_indices('{').filter_map(|(start, _)| {
        serde_json::Deserializer::from_str(&raw[start..])
            .into_iter::<Map<String, Value>>()
            .next()
            .and_then(Result::ok)
    })
}

/// Check a parsed object against the six-category schema.
pub fn validate(object: &Map<String, Value>) -> Result<ToxicityScore, ParseError> {
    if object.is_empty() {
        return Err(ParseError::EmptyObject);
    }

    let mut values: [Option<f64>; 6] = [None; 6];
    for (key, value) in object {
        let category =
            Category::from_key(key).ok_or_else(|| ParseError::UnknownKey(key.clone()))?;
        let number = value
            .as_f64()
            .ok_or_else(|| ParseError::NotANumber(key.clone()))?;
        values[category as usize] = Some(number);
    }

    let mut complete = [0.0; 6];
    for (slot, category) in Category::ALL.into_iter().enumerate() {
        complete[slot] = values[slot].ok_or(ParseError::MissingCategory(category))?;
    }

    ToxicityScore::new(complete)
}
