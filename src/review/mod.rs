// src/review/mod.rs
pub mod client;
pub mod parser;
pub mod prompt;
pub mod types;

pub use client::ReviewClient;
pub use parser::{parse_review_text, ParseTier, ParsedReview};
pub use prompt::build_prompt;
pub use types::{ReviewRequest, ReviewResult, Suggestion};
