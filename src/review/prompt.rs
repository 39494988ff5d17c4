// src/review/prompt.rs

pub const RESUME_START: &str = "----- RESUME START -----";
pub const RESUME_END: &str = "----- RESUME END -----";
pub const JOB_START: &str = "----- JOB DESCRIPTION START -----";
pub const JOB_END: &str = "----- JOB DESCRIPTION END -----";

/// Keys the model must use in its JSON answer.
pub const RESPONSE_KEYS: [&str; 5] = [
    "review",
    "ai_rating",
    "ats_score",
    "suggestions",
    "spelling_errors",
];

/// Build the review instruction. Both inputs are inserted verbatim between
/// the delimiter markers; nothing is escaped.
pub fn build_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an experienced technical recruiter and applicant tracking system (ATS) expert.
Compare the resume below with the job description and respond with:

1. A review of the resume for this job in at most 5 lines.
2. An AI match rating: an integer from 0 to 100 for how well the resume fits the job.
3. An ATS score: an integer from 0 to 100 for keyword coverage of the job description.
4. At least 3 improvement suggestions, each in the form "Replace: <old text> With: <new text>".
5. A list of spelling errors found in the resume (an empty list if there are none).

Respond ONLY with JSON using exactly these keys: "review", "ai_rating", "ats_score", "suggestions", "spelling_errors".

{RESUME_START}
{resume_text}
{RESUME_END}

{JOB_START}
{job_description}
{JOB_END}"#
    )
}
