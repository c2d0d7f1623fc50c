//! Review pipeline — one request from uploaded document to finished report.
//!
//! Flow: extract_text → split_sections → generate_feedback →
//!       resolve role (explicit or inferred) → keywords → suggestions → Report.
//!
//! Every step runs to completion before the next starts; model calls are never
//! issued concurrently.

use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::export::{Report, ReportSection, RoleKeywords};
use crate::extract::{extract_text, Document};
use crate::llm_client::TextGenerator;
use crate::review::feedback::{generate_feedback, FeedbackMode, FeedbackSettings};
use crate::review::keywords::{check_ats_keywords, get_role_keywords};
use crate::review::role::infer_role;
use crate::review::sections::split_sections;
use crate::review::suggestions::overall_suggestions;

/// Limits taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ReviewSettings {
    pub max_chunk_words: usize,
    pub feedback_max_tokens: u32,
    pub keyword_max_tokens: u32,
}

impl ReviewSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_chunk_words: config.max_chunk_words,
            feedback_max_tokens: config.feedback_max_tokens,
            keyword_max_tokens: config.keyword_max_tokens,
        }
    }
}

/// Per-request choices made by the caller.
#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    pub mode: FeedbackMode,
    /// Explicit target role; takes precedence over inference.
    pub role: Option<String>,
    /// Guess the role from the resume when none is given.
    pub infer_role: bool,
}

/// Extracts the document off the async executor.
pub async fn extract_document(document: Document) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_text(&document))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))??;
    Ok(text)
}

/// Runs the full review for already-extracted resume text.
pub async fn review_text(
    resume_text: &str,
    generator: &dyn TextGenerator,
    settings: &ReviewSettings,
    options: &ReviewOptions,
) -> Result<Report, AppError> {
    let sections = split_sections(resume_text);
    if sections.is_empty() {
        warn!("No text extracted from resume; every section will be reported missing");
    }
    info!(sections = ?sections.names(), "Resume segmented");

    let feedback_settings = FeedbackSettings {
        mode: options.mode,
        max_chunk_words: settings.max_chunk_words,
        max_tokens: settings.feedback_max_tokens,
    };
    let feedback = generate_feedback(&sections, generator, &feedback_settings).await;

    let explicit_role = options
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    let (role, inferred) = match explicit_role {
        Some(role) => (role.to_string(), false),
        None if options.infer_role => (
            infer_role(resume_text, generator, settings.keyword_max_tokens).await?,
            true,
        ),
        None => (String::new(), false),
    };

    let mut report = Report::new(
        options.mode,
        feedback
            .rendered()
            .into_iter()
            .map(|(heading, text)| ReportSection {
                heading,
                feedback: text,
            })
            .collect(),
    );

    if !role.is_empty() {
        let keywords = get_role_keywords(&role, generator, settings.keyword_max_tokens).await?;
        let matches = check_ats_keywords(resume_text, &keywords);
        if matches.is_empty() {
            warn!(role = %role, "No usable keywords returned for role");
        }
        info!(
            role = %role,
            inferred,
            present = matches.present.len(),
            missing = matches.missing.len(),
            "ATS keyword check"
        );
        report.role = Some(RoleKeywords {
            coverage_percent: matches.coverage_percent(),
            role,
            inferred,
            keywords,
            matches,
        });
    }

    report.suggestions = overall_suggestions(&feedback);

    info!(
        report_id = %report.report_id,
        sections = report.sections.len(),
        suggestions = report.suggestions.len(),
        "Review complete"
    );
    Ok(report)
}

/// Extract, then review.
pub async fn run_review(
    document: Document,
    generator: &dyn TextGenerator,
    settings: &ReviewSettings,
    options: &ReviewOptions,
) -> Result<Report, AppError> {
    let resume_text = extract_document(document).await?;
    review_text(&resume_text, generator, settings, options).await
}
