//! PDF text extraction backed by `pdf-extract`.
//!
//! Pages are extracted individually and joined with a single `\n`, in page
//! order. No other layout structure survives.

use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("{0}")]
    Parse(String),

    #[error("PDF parser aborted: {0}")]
    Panicked(String),

    #[error("Extraction task failed: {0}")]
    Join(String),
}

/// Extracts the text of every page in `bytes`, joined by newlines.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, PdfError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| PdfError::Parse(e.to_string()))?;
    Ok(join_pages(&pages))
}

/// Runs `extract_pdf_text` on the blocking pool. A panic inside the parser
/// (malformed input can trigger one) becomes a `PdfError` instead of taking
/// the worker down.
pub async fn extract_pdf_text_blocking(bytes: bytes::Bytes) -> Result<String, PdfError> {
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(join_error)?
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}

fn join_error(err: JoinError) -> PdfError {
    if !err.is_panic() {
        return PdfError::Join(err.to_string());
    }
    let payload = err.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    PdfError::Panicked(message)
}
