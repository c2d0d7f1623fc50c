use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use super::{ExtractError, ParseFailure};

#[derive(Debug, Error)]
#[error("parser aborted on malformed content")]
struct ParserAborted;

/// Page-by-page text extraction. Image-only pages contribute an empty line.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| read_error(Box::new(ParserAborted)))?
    .map_err(|e| read_error(Box::new(e)))?;

    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}

fn read_error(source: ParseFailure) -> ExtractError {
    ExtractError::DocumentRead {
        kind: "PDF",
        source,
    }
}
