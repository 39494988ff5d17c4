// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::app_log;
use crate::core::ConfigManager;
use crate::review::{ReviewClient, ReviewRequest, ReviewResult};
use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

// Page routes

#[get("/")]
pub async fn index(state: &State<AppState>) -> RawHtml<String> {
    handlers::index_handler(state).await
}

#[post("/upload", data = "<upload>")]
pub async fn upload_resume(upload: Form<ResumeUploadForm<'_>>, state: &State<AppState>) -> Redirect {
    handlers::upload_resume_handler(upload, state).await
}

#[post("/review", data = "<form>")]
pub async fn submit_review(form: Form<JobDescriptionForm>, state: &State<AppState>) -> Redirect {
    handlers::submit_review_handler(form, state).await
}

// JSON API routes

#[post("/extract", data = "<upload>")]
pub async fn api_extract(
    upload: Form<ResumeUploadForm<'_>>,
) -> Result<Json<DataResponse<ExtractionData>>, ErrorReply> {
    handlers::api_extract_handler(upload).await
}

#[post("/review", format = "json", data = "<request>")]
pub async fn api_review(
    request: Json<ReviewRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<ReviewResult>>, ErrorReply> {
    handlers::api_review_handler(request, state).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Check your request format".to_string()],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Open / for the review page".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request could not be processed".to_string(),
        "UNPROCESSABLE".to_string(),
        vec![
            "Verify all required fields are present".to_string(),
            "Send the PDF in a field named 'resume'".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
    ))
}

/// Default Rocket figment with upload limits sized for résumé PDFs.
pub fn base_figment() -> Figment {
    let limits = Limits::default()
        .limit("file", 10.mebibytes())
        .limit("data-form", 12.mebibytes());
    rocket::Config::figment().merge(("limits", limits))
}

pub fn build_rocket(state: AppState, figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register("/", catchers![bad_request, not_found, unprocessable, internal_error])
        .mount("/", routes![index, upload_resume, submit_review, options])
        .mount("/api", routes![api_extract, api_review, health])
}

pub async fn start_web_server(config: &ConfigManager) -> Result<()> {
    let client = ReviewClient::new(&config.reviewer)?;

    let figment = base_figment()
        .merge(("address", config.environment.address.clone()))
        .merge(("port", config.environment.port));

    app_log!(info, "Starting resume review server");
    app_log!(
        info,
        "Server: http://{}:{}",
        config.environment.address,
        config.environment.port
    );
    app_log!(info, "Generation API: {}", config.reviewer.api_url);

    let _rocket = build_rocket(AppState::new(client), figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
