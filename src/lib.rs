//! Résumé review: extract a PDF résumé's text, ask a generative model to
//! critique it against a job description, and render the structured answer.

pub mod logging;

pub mod cli;
pub mod core;
pub mod error;
pub mod extraction;
pub mod render;
pub mod review;
pub mod session;
pub mod web;

pub use error::{ExtractionError, ReviewError};
pub use extraction::{extract_pdf_text, extract_text, ExtractedDocument, PdfSource};
pub use review::{ReviewClient, ReviewRequest, ReviewResult, Suggestion};
pub use session::ReviewSession;
pub use web::start_web_server;
