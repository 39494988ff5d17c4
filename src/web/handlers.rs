// src/web/handlers.rs
use crate::error::ExtractionError;
use crate::extraction::extract_pdf_text_async;
use crate::render::render_page;
use crate::review::{ReviewRequest, ReviewResult};
use crate::web::types::*;
use crate::app_log;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;
use tokio::io::AsyncReadExt;

pub type ErrorReply = (Status, Json<StandardErrorResponse>);

/// Read the uploaded bytes straight from Rocket's temp file or buffer.
async fn read_upload(file: Option<&TempFile<'_>>) -> Result<Vec<u8>, ExtractionError> {
    let file = match file {
        Some(file) if file.len() > 0 => file,
        _ => return Err(ExtractionError::EmptySelection),
    };

    let reader = file
        .open()
        .await
        .map_err(|e| ExtractionError::Load(format!("failed to open upload: {}", e)))?;
    tokio::pin!(reader);

    let mut bytes = Vec::with_capacity(file.len() as usize);
    reader
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| ExtractionError::Load(format!("failed to read upload: {}", e)))?;
    Ok(bytes)
}

pub async fn index_handler(state: &State<AppState>) -> RawHtml<String> {
    let session = state.session.lock().await;
    RawHtml(render_page(&session))
}

pub async fn upload_resume_handler(
    upload: Form<ResumeUploadForm<'_>>,
    state: &State<AppState>,
) -> Redirect {
    app_log!(info, "Resume file selected");
    if !state.session.lock().await.begin_extraction() {
        app_log!(warn, "Upload ignored while another action is running");
        return Redirect::to("/");
    }

    let outcome = match read_upload(upload.resume.as_ref()).await {
        Ok(bytes) => extract_pdf_text_async(bytes).await,
        Err(e) => Err(e),
    };

    state.session.lock().await.finish_extraction(outcome);
    Redirect::to("/")
}

pub async fn submit_review_handler(
    form: Form<JobDescriptionForm>,
    state: &State<AppState>,
) -> Redirect {
    let request = {
        let mut session = state.session.lock().await;
        session.set_job_description(form.into_inner().job_description);
        session.begin_review()
    };

    if let Some(request) = request {
        let outcome = state.client.review(&request).await;
        state.session.lock().await.finish_review(outcome);
    }

    Redirect::to("/")
}

pub async fn api_extract_handler(
    upload: Form<ResumeUploadForm<'_>>,
) -> Result<Json<DataResponse<ExtractionData>>, ErrorReply> {
    let outcome = match read_upload(upload.resume.as_ref()).await {
        Ok(bytes) => extract_pdf_text_async(bytes).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(document) => Ok(Json(DataResponse::success(
            format!("Extracted {} page(s)", document.page_count()),
            ExtractionData {
                page_count: document.page_count(),
                text: document.text,
            },
        ))),
        Err(e) => {
            app_log!(error, "PDF extraction failed: {}", e);
            Err((
                Status::UnprocessableEntity,
                Json(StandardErrorResponse::new(
                    e.user_message().to_string(),
                    "EXTRACTION_FAILED".to_string(),
                    vec![
                        "Upload a text-based PDF file".to_string(),
                        "Check the file is not corrupted".to_string(),
                    ],
                )),
            ))
        }
    }
}

pub async fn api_review_handler(
    request: Json<ReviewRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<ReviewResult>>, ErrorReply> {
    let request = request.into_inner();

    if !request.is_complete() {
        return Err((
            Status::BadRequest,
            Json(StandardErrorResponse::new(
                "Both resume text and job description are required".to_string(),
                "MISSING_INPUT".to_string(),
                vec![
                    "Extract text from a PDF resume first".to_string(),
                    "Paste a job description".to_string(),
                ],
            )),
        ));
    }

    match state.client.review(&request).await {
        Ok(result) => Ok(Json(DataResponse::success(
            "Review completed successfully".to_string(),
            result,
        ))),
        Err(e) => {
            app_log!(error, "Review failed: {}", e);
            Err((
                Status::BadGateway,
                Json(StandardErrorResponse::new(
                    e.user_message().to_string(),
                    e.error_code().to_string(),
                    vec!["Try the review again".to_string()],
                )),
            ))
        }
    }
}

pub async fn health_handler() -> Json<TextResponse> {
    app_log!(debug, "Health check");
    Json(TextResponse::success("OK".to_string()))
}
