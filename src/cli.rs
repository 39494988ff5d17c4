// src/cli.rs
use crate::app_log;
use crate::core::ConfigManager;
use crate::extraction::extract_pdf_text_async;
use crate::render::render_text;
use crate::review::ReviewClient;
use crate::session::ReviewSession;
use crate::start_web_server;
use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-review")]
#[command(about = "Review a PDF resume against a job description with a generative model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file to use instead of ./config.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the review page and JSON API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the text extracted from a PDF resume
    Extract { pdf: PathBuf },
    /// Extract a resume and request a review
    #[command(group(ArgGroup::new("job").required(true).args(["job_description", "job_file"])))]
    Review {
        pdf: PathBuf,
        #[arg(long)]
        job_description: Option<String>,
        #[arg(long)]
        job_file: Option<PathBuf>,
        /// Print the parsed review as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn load_config(&self) -> Result<ConfigManager> {
        match &self.config {
            Some(path) => ConfigManager::load_from(path),
            None => ConfigManager::load(),
        }
    }
}

const JOB_DESCRIPTION_REQUIRED: &str = "A job description is required";

/// Inline text wins over a file; blank input is rejected before any work.
async fn resolve_job_description(
    inline: Option<String>,
    file: Option<PathBuf>,
) -> Result<String> {
    let text = match (inline, file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
        (None, None) => anyhow::bail!(JOB_DESCRIPTION_REQUIRED),
    };

    if text.trim().is_empty() {
        anyhow::bail!(JOB_DESCRIPTION_REQUIRED);
    }
    Ok(text)
}

pub async fn handle_command(cli: Cli, mut config: ConfigManager) -> Result<()> {
    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.environment.port = port;
            }
            start_web_server(&config).await
        }

        Command::Extract { pdf } => {
            let bytes = tokio::fs::read(&pdf)
                .await
                .with_context(|| format!("Failed to read file: {}", pdf.display()))?;

            match extract_pdf_text_async(bytes).await {
                Ok(document) => {
                    print!("{}", document.text);
                    Ok(())
                }
                Err(e) => {
                    app_log!(error, "PDF extraction failed: {}", e);
                    anyhow::bail!(e.user_message())
                }
            }
        }

        Command::Review {
            pdf,
            job_description,
            job_file,
            json,
        } => {
            let job_description = resolve_job_description(job_description, job_file).await?;

            let bytes = tokio::fs::read(&pdf)
                .await
                .with_context(|| format!("Failed to read file: {}", pdf.display()))?;

            let mut session = ReviewSession::new();
            session.begin_extraction();
            session.finish_extraction(extract_pdf_text_async(bytes).await);
            session.set_job_description(job_description);

            if let Some(error) = session.error() {
                anyhow::bail!(error.to_string());
            }

            let request = session
                .begin_review()
                .ok_or_else(|| anyhow::anyhow!("The resume has no text to review"))?;

            let client = ReviewClient::new(&config.reviewer)?;
            session.finish_review(client.review(&request).await);

            match session.result() {
                Some(result) if json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(result).context("Failed to serialize review")?
                    );
                    Ok(())
                }
                Some(result) => {
                    print!("{}", render_text(result));
                    Ok(())
                }
                None => anyhow::bail!(session.error().unwrap_or("Review failed").to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_review_requires_a_job_source() {
        let parsed = Cli::try_parse_from(["resume-review", "review", "cv.pdf"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "resume-review",
            "review",
            "cv.pdf",
            "--job-description",
            "Senior Engineer",
            "--json",
        ])
        .unwrap();
        match parsed.command {
            Command::Review {
                job_description,
                json,
                ..
            } => {
                assert_eq!(job_description.as_deref(), Some("Senior Engineer"));
                assert!(json);
            }
            _ => panic!("expected review command"),
        }
    }

    #[tokio::test]
    async fn test_blank_job_description_is_reported() {
        let err = resolve_job_description(Some("   \n".to_string()), None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), JOB_DESCRIPTION_REQUIRED);
    }

    #[tokio::test]
    async fn test_inline_job_description_is_used() {
        let text = resolve_job_description(Some("Senior Engineer".to_string()), None)
            .await
            .unwrap();

        assert_eq!(text, "Senior Engineer");
    }
}
