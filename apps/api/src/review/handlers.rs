//! Axum route handlers for the Review API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::export::{render, ExportFormat, Report};
use crate::extract::{Document, MediaKind};
use crate::review::pipeline::{run_review, ReviewOptions, ReviewSettings};
use crate::state::AppState;

/// Parsed multipart form shared by both endpoints.
struct ReviewUpload {
    document: Document,
    options: ReviewOptions,
    format: Option<String>,
}

/// Reads the multipart body: `file` (required), `role`, `mode`, `infer_role`, `format`.
async fn read_upload(mut multipart: Multipart) -> Result<ReviewUpload, AppError> {
    let mut document = None;
    let mut options = ReviewOptions::default();
    let mut format = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let kind = MediaKind::detect(field.content_type(), field.file_name());
                let bytes = field.bytes().await?;
                if bytes.is_empty() {
                    return Err(AppError::Validation("file cannot be empty".to_string()));
                }
                document = Some(Document::new(kind, bytes));
            }
            "role" => options.role = Some(field.text().await?),
            "mode" => {
                options.mode = field.text().await?.parse().map_err(AppError::Validation)?;
            }
            "infer_role" => options.infer_role = parse_flag(&field.text().await?),
            "format" => format = Some(field.text().await?),
            _ => {}
        }
    }

    let document =
        document.ok_or_else(|| AppError::Validation("file is required".to_string()))?;
    Ok(ReviewUpload {
        document,
        options,
        format,
    })
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

async fn review_upload(state: &AppState, upload: ReviewUpload) -> Result<Report, AppError> {
    info!(
        kind = ?upload.document.kind,
        bytes = upload.document.bytes.len(),
        mode = ?upload.options.mode,
        "Resume received"
    );
    let settings = ReviewSettings::from_config(&state.config);
    run_review(
        upload.document,
        state.llm.as_ref(),
        &settings,
        &upload.options,
    )
    .await
}

/// POST /api/v1/resume/review
///
/// Section-wise feedback, keyword check and suggestions as JSON.
pub async fn handle_review(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Report>, AppError> {
    let upload = read_upload(multipart).await?;
    let report = review_upload(&state, upload).await?;
    Ok(Json(report))
}

/// POST /api/v1/resume/export
///
/// Same review, returned as a downloadable PDF (default) or TXT file.
pub async fn handle_export(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_upload(multipart).await?;
    let format: ExportFormat = upload
        .format
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(AppError::Validation)?;

    let report = review_upload(&state, upload).await?;

    let bytes = tokio::task::spawn_blocking(move || render(&report, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", format.file_name()),
        ),
    ];
    Ok((headers, bytes).into_response())
}
