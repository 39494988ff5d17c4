// src/render.rs
//! HTML and plain-text views of a session and its review.

use crate::review::{ReviewResult, Suggestion};
use crate::session::{ActionState, ReviewSession};
use serde_json::Value;
use std::fmt::Write;

pub const INVALID_SUGGESTION: &str = "Invalid suggestion format";
pub const NO_SPELLING_ERRORS: &str = "None";

/// One display line per suggestion shape.
pub fn suggestion_line(suggestion: &Suggestion) -> String {
    match suggestion {
        Suggestion::PlainText(text) => text.clone(),
        Suggestion::ReplacePair { replace, with } => format!("Replace: {} With: {}", replace, with),
        Suggestion::Unrecognized(Value::Null) => INVALID_SUGGESTION.to_string(),
        Suggestion::Unrecognized(other) => other.to_string(),
    }
}

pub fn spelling_items(errors: &[String]) -> Vec<String> {
    if errors.is_empty() {
        vec![NO_SPELLING_ERRORS.to_string()]
    } else {
        errors.to_vec()
    }
}

/// Meter fill width; missing scores show an empty bar.
pub fn meter_percent(score: Option<i64>) -> u8 {
    score.map(|s| s.clamp(0, 100) as u8).unwrap_or(0)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn score_label(score: Option<i64>) -> String {
    score.map(|s| format!("{}/100", s)).unwrap_or_default()
}

fn meter_html(id: &str, label: &str, score: Option<i64>) -> String {
    format!(
        r#"<div class="meter-row"><span class="meter-label">{label}</span><div class="meter" id="{id}"><div class="meter-fill" style="width: {pct}%"></div></div><span class="meter-value">{value}</span></div>"#,
        label = label,
        id = id,
        pct = meter_percent(score),
        value = score_label(score),
    )
}

fn list_html(id: &str, items: &[String]) -> String {
    let mut html = format!(r#"<ul id="{}">"#, id);
    for item in items {
        let _ = write!(html, "<li>{}</li>", escape_html(item));
    }
    html.push_str("</ul>");
    html
}

/// Review section: summary, two meters, suggestions, spelling errors.
pub fn render_result_html(result: &ReviewResult) -> String {
    let suggestions: Vec<String> = result.suggestions.iter().map(suggestion_line).collect();

    let mut html = String::from(r#"<section id="result">"#);
    let _ = write!(
        html,
        r#"<h2>Review</h2><p id="review-text">{}</p>"#,
        escape_html(result.review.as_deref().unwrap_or_default())
    );
    html.push_str(&meter_html("ai-rating", "AI Rating", result.ai_rating));
    html.push_str(&meter_html("ats-score", "ATS Score", result.ats_score));
    html.push_str("<h3>Suggestions</h3>");
    html.push_str(&list_html("suggestions", &suggestions));
    html.push_str("<h3>Spelling Errors</h3>");
    html.push_str(&list_html(
        "spelling-errors",
        &spelling_items(&result.spelling_errors),
    ));
    html.push_str("</section>");
    html
}

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
textarea{width:100%;min-height:10rem}\
.meter{display:inline-block;width:60%;height:1rem;background:#eee;margin:0 .5rem;vertical-align:middle}\
.meter-fill{height:100%;background:#3a7}\
.error{color:#b00}.loading{color:#777}";

/// The whole single page for the current session.
pub fn render_page(session: &ReviewSession) -> String {
    let mut html = String::from("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    let _ = write!(
        html,
        "<title>Resume Reviewer</title><style>{}</style></head><body><h1>Resume Reviewer</h1>",
        STYLE
    );

    html.push_str(
        r#"<form id="upload-form" method="post" action="/upload" enctype="multipart/form-data"><label>Resume (PDF) <input type="file" name="resume" accept="application/pdf"></label> <button type="submit">Extract</button></form>"#,
    );
    match session.extraction_state() {
        ActionState::Loading => {
            html.push_str(r#"<p class="loading" id="extract-status">Extracting text...</p>"#)
        }
        ActionState::Succeeded => {
            let _ = write!(
                html,
                r#"<p id="extract-status">Extracted {} page(s).</p>"#,
                session.page_count()
            );
        }
        _ => {}
    }

    let resume_missing = !session.has_resume() || session.is_busy();
    let _ = write!(
        html,
        r#"<form id="review-form" method="post" action="/review"><label for="job-description">Job description</label><textarea id="job-description" name="job_description" oninput="document.getElementById('review-button').disabled = {missing} || !this.value.trim()">{jd}</textarea><button type="submit" id="review-button"{disabled}>Review</button></form>"#,
        missing = resume_missing,
        jd = escape_html(session.job_description()),
        disabled = if session.can_review() { "" } else { " disabled" },
    );

    if session.review_state() == ActionState::Loading {
        html.push_str(r#"<p class="loading" id="review-status">Reviewing...</p>"#);
    }

    if let Some(error) = session.error() {
        let _ = write!(html, r#"<p class="error" id="error">{}</p>"#, escape_html(error));
    }

    if let Some(result) = session.result() {
        html.push_str(&render_result_html(result));
    }

    html.push_str("</body></html>");
    html
}

/// Terminal rendition used by the CLI.
pub fn render_text(result: &ReviewResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Review:\n{}\n", result.review.as_deref().unwrap_or_default());
    let _ = writeln!(out, "AI Rating: {}", score_label(result.ai_rating));
    let _ = writeln!(out, "ATS Score: {}\n", score_label(result.ats_score));
    let _ = writeln!(out, "Suggestions:");
    for suggestion in &result.suggestions {
        let _ = writeln!(out, "  - {}", suggestion_line(suggestion));
    }
    let _ = writeln!(out, "\nSpelling Errors:");
    for item in spelling_items(&result.spelling_errors) {
        let _ = writeln!(out, "  - {}", item);
    }
    out
}
