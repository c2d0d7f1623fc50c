//! Document Extractor — turns an uploaded PDF or DOCX into plain resume text.
//!
//! Unsupported media types are not an error: they extract to an empty string
//! and the caller treats that as "no content". Corrupt documents fail with
//! `ExtractError::DocumentRead`.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

mod docx;
mod pdf;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Underlying parser failure, kept as the error's `source`.
pub type ParseFailure = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read {kind} document: {source}")]
    DocumentRead {
        kind: &'static str,
        #[source]
        source: ParseFailure,
    },
}

/// Declared kind of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    Docx,
    Unsupported(String),
}

impl MediaKind {
    /// Classifies by MIME type, using the file name's extension when the
    /// browser sent no useful type.
    pub fn detect(media_type: Option<&str>, file_name: Option<&str>) -> Self {
        let media_type = media_type.map(|m| m.split(';').next().unwrap_or(m).trim());
        match media_type {
            Some(PDF_MIME) => return MediaKind::Pdf,
            Some(DOCX_MIME) => return MediaKind::Docx,
            Some(m) if !m.is_empty() && m != "application/octet-stream" => {
                return MediaKind::Unsupported(m.to_string())
            }
            _ => {}
        }

        let extension = file_name
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => MediaKind::Pdf,
            Some("docx") => MediaKind::Docx,
            _ => MediaKind::Unsupported(
                media_type
                    .filter(|m| !m.is_empty())
                    .unwrap_or("unknown")
                    .to_string(),
            ),
        }
    }
}

/// An uploaded document. Consumed once by `extract_text`.
#[derive(Debug, Clone)]
pub struct Document {
    pub kind: MediaKind,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(kind: MediaKind, bytes: Bytes) -> Self {
        Self { kind, bytes }
    }
}

/// Extracts newline-delimited plain text from a document.
///
/// CPU-bound; async callers run it inside `tokio::task::spawn_blocking`.
pub fn extract_text(document: &Document) -> Result<String, ExtractError> {
    let text = match &document.kind {
        MediaKind::Pdf => pdf::extract(&document.bytes)?,
        MediaKind::Docx => docx::extract(&document.bytes)?,
        MediaKind::Unsupported(media_type) => {
            warn!(media_type = %media_type, "Unsupported document type, extracting no text");
            return Ok(String::new());
        }
    };

    debug!(
        kind = ?document.kind,
        bytes = document.bytes.len(),
        words = text.split_whitespace().count(),
        "Document text extracted"
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::export::pdf::{export_pdf, lay_out};
    use crate::export::{Report, ReportSection};
    use crate::review::feedback::FeedbackMode;
    use crate::review::sections::{split_sections, SectionName};

    #[test]
    fn test_detect_by_mime_type() {
        assert_eq!(MediaKind::detect(Some(PDF_MIME), None), MediaKind::Pdf);
        assert_eq!(MediaKind::detect(Some(DOCX_MIME), None), MediaKind::Docx);
    }

    #[test]
    fn test_detect_ignores_mime_parameters() {
        assert_eq!(
            MediaKind::detect(Some("application/pdf; charset=binary"), None),
            MediaKind::Pdf
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension_for_octet_stream() {
        assert_eq!(
            MediaKind::detect(Some("application/octet-stream"), Some("Resume.DOCX")),
            MediaKind::Docx
        );
        assert_eq!(MediaKind::detect(None, Some("cv.pdf")), MediaKind::Pdf);
    }

    #[test]
    fn test_detect_explicit_other_type_is_unsupported() {
        assert_eq!(
            MediaKind::detect(Some("text/plain"), Some("resume.pdf")),
            MediaKind::Unsupported("text/plain".to_string())
        );
    }

    #[test]
    fn test_unsupported_document_extracts_empty_text() {
        let doc = Document::new(
            MediaKind::Unsupported("image/png".to_string()),
            Bytes::from_static(b"\x89PNG"),
        );
        assert_eq!(extract_text(&doc).unwrap(), "");
    }

    #[test]
    fn test_corrupt_pdf_is_document_read_error() {
        let doc = Document::new(MediaKind::Pdf, Bytes::from_static(b"not a pdf at all"));
        let err = extract_text(&doc).unwrap_err();
        assert!(matches!(err, ExtractError::DocumentRead { kind: "PDF", .. }));
    }

    #[test]
    fn test_corrupt_docx_is_document_read_error() {
        let doc = Document::new(MediaKind::Docx, Bytes::from_static(b"PK but not really"));
        let err = extract_text(&doc).unwrap_err();
        assert!(matches!(err, ExtractError::DocumentRead { kind: "DOCX", .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_corrupt_pdf_keeps_parser_error_as_source() {
        let doc = Document::new(MediaKind::Pdf, Bytes::from_static(b"%PDF-1.5 truncated"));
        let err = extract_text(&doc).unwrap_err();
        let source = err.source().expect("parser error is chained");
        assert!(err.to_string().ends_with(&source.to_string()));
    }

    #[test]
    fn test_exported_report_extracts_in_page_order() {
        let feedback = (1..=150)
            .map(|i| format!("Item {i:03} quantified outcome"))
            .collect::<Vec<_>>()
            .join("\n");
        let report = Report::new(
            FeedbackMode::Review,
            vec![ReportSection {
                heading: "SUMMARY".to_string(),
                feedback,
            }],
        );
        assert!(lay_out(&report).len() >= 3);

        let bytes = export_pdf(&report).unwrap();
        let text = extract_text(&Document::new(MediaKind::Pdf, Bytes::from(bytes))).unwrap();

        let positions: Vec<usize> = ["Optimized Resume Feedback", "Item 001", "Item 075", "Item 150"]
            .iter()
            .map(|needle| text.find(needle).unwrap_or_else(|| panic!("{needle} not in text")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert_eq!(
            split_sections(&text).names(),
            vec![SectionName::Other, SectionName::Summary]
        );
    }
}
