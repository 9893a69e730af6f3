// Unit tests for locating and validating the JSON score in model output.
//
// Covers the shapes models actually produce: bare JSON, prose-wrapped,
// Markdown-fenced, trailing stray braces. Also the schema checks: missing,
// extra, non-numeric and out-of-range values are all rejected outright.

use toxmeter::toxicity::error::ParseError;
use toxmeter::toxicity::extract::{locate_json_object, parse_scores};
use toxmeter::toxicity::score::Category;
use toxmeter::toxicity::verdict::Verdict;

const SAMPLE: &str = r#"{"toxic":0.9,"severe_toxic":0.8,"obscene":0.7,"threat":0.6,"insult":0.5,"identity_hate":0.4}"#;

// ============================================================
// Locating the object
// ============================================================

#[test]
fn bare_sample_parses_to_moderate() {
    let score = parse_scores(SAMPLE).unwrap();
    assert!((score.mean() - 0.65).abs() < 1e-9);
    assert_eq!(score.verdict(), Verdict::Moderate);
    assert_eq!(score.verdict().as_str(), "Moderately Toxic");
}

#[test]
fn surrounding_prose_is_ignored() {
    let raw = format!("Here is the result: {SAMPLE} Thanks!");
    let score = parse_scores(&raw).unwrap();
    assert_eq!(score.get(Category::Toxic), 0.9);
    assert_eq!(score.get(Category::IdentityHate), 0.4);
}

#[test]
fn markdown_fence_is_ignored() {
    let raw = format!("```json\n{SAMPLE}\n```");
    let score = parse_scores(&raw).unwrap();
    assert_eq!(score.get(Category::Obscene), 0.7);
}

#[test]
fn pretty_printed_multiline_object() {
    let raw = "Sure!\n{\n  \"toxic\": 0.1,\n  \"severe_toxic\": 0.0,\n  \"obscene\": 0.05,\n  \
               \"threat\": 0.0,\n  \"insult\": 0.2,\n  \"identity_hate\": 0.0\n}\n";
    let score = parse_scores(raw).unwrap();
    assert_eq!(score.verdict(), Verdict::Safe);
}

#[test]
fn no_braces_is_parse_error() {
    assert_eq!(
        parse_scores("I'm sorry, I can't analyze that text."),
        Err(ParseError::NoJsonObject)
    );
}

#[test]
fn empty_response_is_parse_error() {
    assert_eq!(parse_scores(""), Err(ParseError::NoJsonObject));
}

#[test]
fn stray_brace_in_trailing_commentary() {
    // Greedy span runs to the last '}' and fails; the scan recovers the object
    let raw = format!("{SAMPLE}\nNote: scores are estimates {{approx}}");
    let score = parse_scores(&raw).unwrap();
    assert!((score.mean() - 0.65).abs() < 1e-9);
}

#[test]
fn format_example_before_answer_is_skipped() {
    // The greedy span covers both objects and fails; `{}` parses but is not a
    // score, so the scan moves on to the real answer
    let raw = format!("Format: {{}} then {SAMPLE}");
    let score = parse_scores(&raw).unwrap();
    assert!((score.mean() - 0.65).abs() < 1e-9);
}

#[test]
fn truncated_object_is_invalid_json() {
    let err = locate_json_object(r#"{"toxic": 0.9, "severe_toxic": }"#).unwrap_err();
    assert!(matches!(err, ParseError::InvalidJson(_)));
}

#[test]
fn array_is_not_an_object() {
    assert_eq!(parse_scores("[0.1, 0.2]"), Err(ParseError::NoJsonObject));
}

// ============================================================
// Schema validation
// ============================================================

#[test]
fn empty_object_rejected() {
    assert_eq!(parse_scores("Result: {}"), Err(ParseError::EmptyObject));
}

#[test]
fn missing_key_rejected() {
    let raw = r#"{"toxic":0.9,"severe_toxic":0.8,"obscene":0.7,"threat":0.6,"insult":0.5}"#;
    assert_eq!(
        parse_scores(raw),
        Err(ParseError::MissingCategory(Category::IdentityHate))
    );
}

#[test]
fn extra_key_rejected() {
    let raw = r#"{"toxic":0.9,"severe_toxic":0.8,"obscene":0.7,"threat":0.6,"insult":0.5,"identity_hate":0.4,"overall":0.65}"#;
    assert_eq!(
        parse_scores(raw),
        Err(ParseError::UnknownKey("overall".to_string()))
    );
}

#[test]
fn key_match_is_exact() {
    let raw = r#"{"Toxic":0.9,"severe_toxic":0.8,"obscene":0.7,"threat":0.6,"insult":0.5,"identity_hate":0.4}"#;
    assert_eq!(
        parse_scores(raw),
        Err(ParseError::UnknownKey("Toxic".to_string()))
    );
}

#[test]
fn string_value_rejected() {
    let raw = r#"{"toxic":"0.9","severe_toxic":0.8,"obscene":0.7,"threat":0.6,"insult":0.5,"identity_hate":0.4}"#;
    assert_eq!(
        parse_scores(raw),
        Err(ParseError::NotANumber("toxic".to_string()))
    );
}

#[test]
fn out_of_range_rejected() {
    let raw = r#"{"toxic":90,"severe_toxic":0.8,"obscene":0.7,"threat":0.6,"insult":0.5,"identity_hate":0.4}"#;
    assert!(matches!(
        parse_scores(raw),
        Err(ParseError::OutOfRange {
            category: Category::Toxic,
            ..
        })
    ));
}

#[test]
fn integer_zero_and_one_accepted() {
    let raw = r#"{"toxic":1,"severe_toxic":0,"obscene":0,"threat":0,"insult":1,"identity_hate":0}"#;
    let score = parse_scores(raw).unwrap();
    assert_eq!(score.get(Category::Insult), 1.0);
    assert!((score.mean() - 1.0 / 3.0).abs() < 1e-9);
}
