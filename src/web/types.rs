// src/web/types.rs
use crate::review::ReviewClient;
use crate::session::ReviewSession;
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::serde::Serialize;
use tokio::sync::Mutex;

#[derive(FromForm)]
pub struct ResumeUploadForm<'f> {
    pub resume: Option<TempFile<'f>>,
}

#[derive(FromForm)]
pub struct JobDescriptionForm {
    pub job_description: String,
}

/// Shared server state: one review session for every client. The session
/// lock is never held across an await on extraction or the network.
pub struct AppState {
    pub session: Mutex<ReviewSession>,
    pub client: ReviewClient,
}

impl AppState {
    pub fn new(client: ReviewClient) -> Self {
        Self {
            session: Mutex::new(ReviewSession::new()),
            client,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ExtractionData {
    pub text: String,
    pub page_count: usize,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}
