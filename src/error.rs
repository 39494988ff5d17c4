// src/error.rs
//! Error taxonomy for the extraction and review actions.
//!
//! Every variant carries diagnostic detail for the logs, but users only ever
//! see the static string returned by `user_message()`.

use thiserror::Error;

pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract text from the PDF.";
pub const REVIEW_NETWORK_MESSAGE: &str = "Failed to get a review from the AI service.";
pub const REVIEW_PARSE_MESSAGE: &str = "Could not parse the AI response.";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no file was selected")]
    EmptySelection,

    #[error("failed to load PDF: {0}")]
    Load(String),

    #[error("failed to read text from page {page}: {reason}")]
    Page { page: u32, reason: String },

    #[error("extraction task failed: {0}")]
    Task(String),
}

impl ExtractionError {
    pub fn user_message(&self) -> &'static str {
        EXTRACTION_FAILED_MESSAGE
    }
}

#[derive(Debug, Error)]
pub enum ReviewError {
    /// The call itself failed: transport error, rejected status, or an
    /// envelope that carried no model text.
    #[error("review request failed: {0}")]
    Network(String),

    /// The call succeeded but neither parsing tier produced a review object.
    #[error("could not parse model output: {0}")]
    Parse(String),
}

impl ReviewError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ReviewError::Network(_) => REVIEW_NETWORK_MESSAGE,
            ReviewError::Parse(_) => REVIEW_PARSE_MESSAGE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ReviewError::Network(_) => "REVIEW_NETWORK_ERROR",
            ReviewError::Parse(_) => "REVIEW_PARSE_ERROR",
        }
    }
}

impl From<reqwest::Error> for ReviewError {
    fn from(e: reqwest::Error) -> Self {
        ReviewError::Network(e.to_string())
    }
}
