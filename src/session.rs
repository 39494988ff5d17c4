// src/session.rs
//! State of the upload → paste → review flow.
//!
//! The web server keeps one session shared by every client; the CLI builds
//! one per run. Each action moves through idle → loading → succeeded | failed.
//! The record is handed to the renderer as-is; nothing else holds UI state.

use crate::app_log;
use crate::error::{ExtractionError, ReviewError};
use crate::extraction::ExtractedDocument;
use crate::review::{ReviewRequest, ReviewResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    resume_text: String,
    page_count: usize,
    job_description: String,
    extraction: ActionState,
    review: ActionState,
    result: Option<ReviewResult>,
    error: Option<String>,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn extraction_state(&self) -> ActionState {
        self.extraction
    }

    pub fn review_state(&self) -> ActionState {
        self.review
    }

    pub fn result(&self) -> Option<&ReviewResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_resume(&self) -> bool {
        !self.resume_text.trim().is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.extraction == ActionState::Loading || self.review == ActionState::Loading
    }

    /// Review needs both inputs and no action in flight.
    pub fn can_review(&self) -> bool {
        !self.is_busy() && self.has_resume() && !self.job_description.trim().is_empty()
    }

    /// A new file replaces the previous extraction entirely. Returns false,
    /// changing nothing, while another action is in flight.
    pub fn begin_extraction(&mut self) -> bool {
        if self.is_busy() {
            app_log!(debug, "Extraction requested while busy; ignoring");
            return false;
        }

        self.extraction = ActionState::Loading;
        self.resume_text.clear();
        self.page_count = 0;
        self.error = None;
        true
    }

    pub fn finish_extraction(&mut self, outcome: Result<ExtractedDocument, ExtractionError>) {
        match outcome {
            Ok(document) => {
                self.page_count = document.page_count();
                self.resume_text = document.text;
                self.extraction = ActionState::Succeeded;
            }
            Err(e) => {
                app_log!(error, "PDF extraction failed: {}", e);
                self.resume_text.clear();
                self.page_count = 0;
                self.extraction = ActionState::Failed;
                self.error = Some(e.user_message().to_string());
            }
        }
    }

    pub fn set_job_description(&mut self, job_description: impl Into<String>) {
        self.job_description = job_description.into();
    }

    /// Start a review if one is allowed; otherwise nothing changes.
    pub fn begin_review(&mut self) -> Option<ReviewRequest> {
        if !self.can_review() {
            app_log!(debug, "Review requested while unavailable; ignoring");
            return None;
        }

        self.review = ActionState::Loading;
        self.result = None;
        self.error = None;
        Some(ReviewRequest::new(
            self.resume_text.clone(),
            self.job_description.clone(),
        ))
    }

    pub fn finish_review(&mut self, outcome: Result<ReviewResult, ReviewError>) {
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.review = ActionState::Succeeded;
            }
            Err(e) => {
                app_log!(error, "Review failed: {}", e);
                self.result = None;
                self.review = ActionState::Failed;
                self.error = Some(e.user_message().to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXTRACTION_FAILED_MESSAGE, REVIEW_PARSE_MESSAGE};
    use crate::extraction::extract_text;
    use crate::extraction::tests::FakePdf;

    fn extracted(pages: Vec<Vec<&'static str>>) -> Result<ExtractedDocument, ExtractionError> {
        extract_text(&FakePdf::new(pages))
    }

    fn ready_session() -> ReviewSession {
        let mut session = ReviewSession::new();
        session.begin_extraction();
        session.finish_extraction(extracted(vec![vec!["Experienced", "Engineer"]]));
        session.set_job_description("Looking for a Senior Engineer");
        session
    }

    #[test]
    fn test_new_session_cannot_review() {
        let mut session = ReviewSession::new();

        assert!(!session.can_review());
        assert_eq!(session.begin_review(), None);
        assert_eq!(session.review_state(), ActionState::Idle);
    }

    #[test]
    fn test_missing_job_description_blocks_review() {
        let mut session = ready_session();
        session.set_job_description("   ");

        assert!(!session.can_review());
        assert_eq!(session.begin_review(), None);
        assert_eq!(session.begin_review(), None);
        assert_eq!(session.review_state(), ActionState::Idle);
    }

    #[test]
    fn test_missing_resume_blocks_review() {
        let mut session = ReviewSession::new();
        session.set_job_description("Looking for a Senior Engineer");

        assert!(!session.can_review());
        assert_eq!(session.begin_review(), None);
    }

    #[test]
    fn test_extraction_loading_blocks_review() {
        let mut session = ready_session();

        assert!(session.begin_extraction());

        assert_eq!(session.extraction_state(), ActionState::Loading);
        assert!(!session.has_resume());
        assert!(!session.can_review());
    }

    #[test]
    fn test_review_loading_blocks_duplicate_requests() {
        let mut session = ready_session();

        let request = session.begin_review().unwrap();

        assert_eq!(request.resume_text, "Experienced Engineer\n");
        assert_eq!(request.job_description, "Looking for a Senior Engineer");
        assert_eq!(session.review_state(), ActionState::Loading);
        assert_eq!(session.begin_review(), None);
    }

    #[test]
    fn test_extraction_failure_clears_text_and_sets_error() {
        let mut session = ready_session();
        let mut broken = FakePdf::new(vec![vec!["a"], vec!["b"]]);
        broken.failing_page = Some(2);

        session.begin_extraction();
        session.finish_extraction(extract_text(&broken));

        assert_eq!(session.extraction_state(), ActionState::Failed);
        assert_eq!(session.resume_text(), "");
        assert_eq!(session.error(), Some(EXTRACTION_FAILED_MESSAGE));
        assert!(!session.can_review());
    }

    #[test]
    fn test_blank_pdf_text_does_not_enable_review() {
        let mut session = ReviewSession::new();
        session.set_job_description("Looking for a Senior Engineer");

        session.begin_extraction();
        session.finish_extraction(extracted(vec![vec![], vec![]]));

        assert_eq!(session.extraction_state(), ActionState::Succeeded);
        assert!(!session.can_review());
    }

    #[test]
    fn test_review_success_then_failure_is_all_or_nothing() {
        let mut session = ready_session();
        session.begin_review().unwrap();
        session.finish_review(Ok(ReviewResult {
            review: Some("Good fit".to_string()),
            ai_rating: Some(75),
            ..Default::default()
        }));

        assert_eq!(session.review_state(), ActionState::Succeeded);
        assert_eq!(session.result().unwrap().ai_rating, Some(75));

        session.begin_review().unwrap();
        assert!(session.result().is_none());
        session.finish_review(Err(ReviewError::Parse("no braces".to_string())));

        assert_eq!(session.review_state(), ActionState::Failed);
        assert!(session.result().is_none());
        assert_eq!(session.error(), Some(REVIEW_PARSE_MESSAGE));
        assert!(session.can_review());
    }

    #[test]
    fn test_upload_ignored_while_extraction_in_flight() {
        let mut session = ready_session();
        assert!(session.begin_extraction());

        assert!(!session.begin_extraction());
        session.finish_extraction(extracted(vec![vec!["Second", "upload"]]));

        assert_eq!(session.resume_text(), "Second upload\n");
        assert_eq!(session.extraction_state(), ActionState::Succeeded);
    }

    #[test]
    fn test_upload_ignored_while_review_in_flight() {
        let mut session = ready_session();
        session.begin_review().unwrap();

        assert!(!session.begin_extraction());

        assert_eq!(session.resume_text(), "Experienced Engineer\n");
        assert_eq!(session.extraction_state(), ActionState::Succeeded);
        assert_eq!(session.review_state(), ActionState::Loading);
    }
}
