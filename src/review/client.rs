// src/review/client.rs
//! HTTP client for the generative-text API.

use super::parser::parse_review_text;
use super::prompt::build_prompt;
use super::types::{GenerateContentRequest, GenerateContentResponse, ReviewRequest, ReviewResult};
use crate::core::config_manager::ReviewerConfig;
use crate::error::ReviewError;
use crate::{app_log, app_span};
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::Instrument;
use uuid::Uuid;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct ReviewClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ReviewClient {
    pub fn new(config: &ReviewerConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }

    /// Send one review request. No retries: any failure is final.
    pub async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult, ReviewError> {
        let review_id = Uuid::new_v4();
        self.run_review(request)
            .instrument(app_span!("review_request", review_id = %review_id))
            .await
    }

    async fn run_review(&self, request: &ReviewRequest) -> Result<ReviewResult, ReviewError> {
        let prompt = build_prompt(&request.resume_text, &request.job_description);
        app_log!(
            info,
            "Requesting review (resume: {} chars, job description: {} chars)",
            request.resume_text.len(),
            request.job_description.len()
        );

        let model_text = self.generate(prompt).await.map_err(|e| {
            app_log!(error, "Review request failed: {}", e);
            e
        })?;

        match parse_review_text(&model_text) {
            Ok(parsed) => {
                app_log!(info, "Parsed review via {:?}", parsed.tier);
                Ok(parsed.result)
            }
            Err(e) => {
                app_log!(
                    warn,
                    "Discarding unparseable model output ({} chars): {}",
                    model_text.len(),
                    e
                );
                Err(e)
            }
        }
    }

    /// POST the prompt and return the model's raw text answer.
    async fn generate(&self, prompt: String) -> Result<String, ReviewError> {
        let body = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        app_log!(trace, "Generation API status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ReviewError::Network(format!(
                "API returned error {}: {}",
                status, error_text
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ReviewError::Network(format!("unreadable response envelope: {}", e)))?;

        envelope
            .first_text()
            .ok_or_else(|| ReviewError::Network("response envelope carried no text".to_string()))
    }
}
