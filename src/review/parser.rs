// src/review/parser.rs
//! Two-tier parsing of the model's free-text answer.
//!
//! The model is asked for bare JSON but often wraps it in prose or a
//! markdown fence. Tier 1 parses the whole text; tier 2 parses the span from
//! the first `{` to the last `}`. The span is greedy: two separate objects in
//! one answer are captured together and fail to parse.

use super::types::ReviewResult;
use crate::error::ReviewError;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    WholeText,
    BraceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReview {
    pub result: ReviewResult,
    pub tier: ParseTier,
}

fn brace_span() -> &'static Regex {
    static BRACE_SPAN: OnceLock<Regex> = OnceLock::new();
    BRACE_SPAN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("brace pattern is valid"))
}

/// Only a JSON object counts as a review.
fn parse_object(text: &str) -> Option<ReviewResult> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

pub fn parse_review_text(text: &str) -> Result<ParsedReview, ReviewError> {
    if let Some(result) = parse_object(text) {
        return Ok(ParsedReview {
            result,
            tier: ParseTier::WholeText,
        });
    }

    let span = brace_span()
        .find(text)
        .ok_or_else(|| ReviewError::Parse("no JSON object found in model output".to_string()))?;

    parse_object(span.as_str())
        .map(|result| ParsedReview {
            result,
            tier: ParseTier::BraceSpan,
        })
        .ok_or_else(|| ReviewError::Parse("brace-delimited span is not a JSON object".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::types::Suggestion;

    const BARE: &str = r#"{"review":"ok","ai_rating":80,"ats_score":70,"suggestions":[],"spelling_errors":[]}"#;

    #[test]
    fn test_bare_json_uses_whole_text_tier() {
        let parsed = parse_review_text(BARE).unwrap();

        assert_eq!(parsed.tier, ParseTier::WholeText);
        assert_eq!(parsed.result.review.as_deref(), Some("ok"));
        assert_eq!(parsed.result.ai_rating, Some(80));
        assert_eq!(parsed.result.ats_score, Some(70));
    }

    #[test]
    fn test_fenced_json_falls_back_to_brace_span() {
        let fenced = format!("```json\n{}\n```", BARE);

        let parsed = parse_review_text(&fenced).unwrap();

        assert_eq!(parsed.tier, ParseTier::BraceSpan);
        assert_eq!(parsed.result, parse_review_text(BARE).unwrap().result);
    }

    #[test]
    fn test_json_inside_prose() {
        let text = "Here is my assessment:\n{\"review\": \"Solid\", \"suggestions\": [{\"replace\": \"helped\", \"with\": \"led\"}]}\nGood luck!";

        let parsed = parse_review_text(text).unwrap();

        assert_eq!(parsed.tier, ParseTier::BraceSpan);
        assert_eq!(
            parsed.result.suggestions,
            vec![Suggestion::ReplacePair {
                replace: "helped".to_string(),
                with: "led".to_string()
            }]
        );
    }

    #[test]
    fn test_prose_without_braces_is_parse_error() {
        let result = parse_review_text("I'm sorry, I cannot review this resume.");
        assert!(matches!(result, Err(ReviewError::Parse(_))));
    }

    #[test]
    fn test_greedy_span_over_captures_two_objects() {
        let text = r#"First: {"review":"a"} and second: {"review":"b"}"#;

        let result = parse_review_text(text);

        assert!(matches!(result, Err(ReviewError::Parse(_))));
    }

    #[test]
    fn test_non_object_json_is_not_a_review() {
        assert!(parse_review_text("[1, 2, 3]").is_err());
        assert!(parse_review_text("\"just a string\"").is_err());
    }

    #[test]
    fn test_surrounding_whitespace_still_whole_text() {
        let padded = format!("\n  {}  \n", BARE);

        let parsed = parse_review_text(&padded).unwrap();

        assert_eq!(parsed.tier, ParseTier::WholeText);
    }
}
