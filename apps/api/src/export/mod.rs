//! Report Exporter — renders a review report as a paginated PDF or plain text.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::review::feedback::FeedbackMode;
use crate::review::keywords::MatchResult;

pub mod font_metrics;
pub mod pdf;
pub mod text;

pub const REPORT_TITLE: &str = "Optimized Resume Feedback";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// Output document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Txt,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Txt => "text/plain; charset=utf-8",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "Optimized_Resume.pdf",
            ExportFormat::Txt => "Optimized_Resume.txt",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pdf" => Ok(ExportFormat::Pdf),
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(format!("unknown format '{other}', expected 'pdf' or 'txt'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub heading: String,
    pub feedback: String,
}

/// Keyword summary for the target role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleKeywords {
    pub role: String,
    /// True when the role was guessed from the resume rather than supplied.
    pub inferred: bool,
    pub keywords: Vec<String>,
    pub matches: MatchResult,
    pub coverage_percent: u32,
}

/// One review, built per request and discarded after serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub title: String,
    pub mode: FeedbackMode,
    pub sections: Vec<ReportSection>,
    pub role: Option<RoleKeywords>,
    pub suggestions: Vec<String>,
}

impl Report {
    pub fn new(mode: FeedbackMode, sections: Vec<ReportSection>) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            title: REPORT_TITLE.to_string(),
            mode,
            sections,
            role: None,
            suggestions: Vec::new(),
        }
    }

    /// The generated text of every section under its header, as produced.
    pub fn generated_text(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&section.heading);
            out.push('\n');
            out.push_str(&section.feedback);
            out.push_str("\n\n");
        }
        out
    }
}

/// Serializes the report in the requested format.
pub fn render(report: &Report, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Pdf => pdf::export_pdf(report),
        ExportFormat::Txt => Ok(text::export_txt(&report.generated_text())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report::new(
            FeedbackMode::Rewrite,
            vec![
                ReportSection {
                    heading: "SUMMARY".to_string(),
                    feedback: "Backend engineer, 6 years.".to_string(),
                },
                ReportSection {
                    heading: "SKILLS".to_string(),
                    feedback: "Rust, SQL".to_string(),
                },
            ],
        )
    }

    #[test]
    fn test_generated_text_keeps_section_order() {
        assert_eq!(
            sample().generated_text(),
            "SUMMARY\nBackend engineer, 6 years.\n\nSKILLS\nRust, SQL\n\n"
        );
    }

    #[test]
    fn test_txt_render_is_verbatim_utf8() {
        let report = sample();
        let bytes = render(&report, ExportFormat::Txt).unwrap();
        assert_eq!(bytes, report.generated_text().into_bytes());
    }

    #[test]
    fn test_format_parsing_and_metadata() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert!("docx".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Txt.file_name(), "Optimized_Resume.txt");
    }

    #[test]
    fn test_report_serializes_mode_lowercase() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["mode"], "rewrite");
        assert_eq!(value["sections"][1]["heading"], "SKILLS");
        assert!(value["role"].is_null());
    }
}
