// src/review/types.rs
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub resume_text: String,
    pub job_description: String,
}

impl ReviewRequest {
    pub fn new(resume_text: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            job_description: job_description.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.resume_text.trim().is_empty() && !self.job_description.trim().is_empty()
    }
}

/// One improvement suggestion, classified once when the model output is parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    PlainText(String),
    ReplacePair { replace: String, with: String },
    Unrecognized(Value),
}

impl Suggestion {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Suggestion::PlainText(text),
            Value::Object(map) => {
                let field = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                match (field("replace"), field("with")) {
                    (Some(replace), Some(with)) => Suggestion::ReplacePair { replace, with },
                    _ => Suggestion::Unrecognized(Value::Object(map)),
                }
            }
            other => Suggestion::Unrecognized(other),
        }
    }
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Suggestion::PlainText(text) => serializer.serialize_str(text),
            Suggestion::ReplacePair { replace, with } => {
                serde_json::json!({ "replace": replace, "with": with }).serialize(serializer)
            }
            Suggestion::Unrecognized(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Suggestion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Suggestion::from_value)
    }
}

/// The model's critique. Every field is decoded best-effort: a missing or
/// malformed field becomes empty instead of rejecting the whole review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub review: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub ai_rating: Option<i64>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub ats_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient_suggestions")]
    pub suggestions: Vec<Suggestion>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub spelling_errors: Vec<String>,
}

fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(value_as_text(Value::deserialize(deserializer)?))
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let score = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .map(|f| f.round() as i64),
        _ => None,
    };
    Ok(score)
}

fn lenient_suggestions<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Suggestion>, D::Error> {
    let suggestions = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(Suggestion::from_value).collect(),
        _ => Vec::new(),
    };
    Ok(suggestions)
}

fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let strings = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(value_as_text).collect(),
        _ => Vec::new(),
    };
    Ok(strings)
}

// ===== Generation API envelope =====

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestContent {
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TextPart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![TextPart { text: Some(prompt) }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<TextPart>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}
