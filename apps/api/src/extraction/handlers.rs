use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::pdf::extract_pdf_text_blocking;

/// Multipart field carrying the uploaded PDF.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
}

/// POST /extract-text
///
/// Accepts any upload in the `file` field; no size (beyond the body limit) or
/// MIME check is made before handing it to the PDF parser.
pub async fn handle_extract_text(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let upload = read_file_field(multipart?).await?;
    info!("Extracting text from {} byte upload", upload.len());

    let text = extract_pdf_text_blocking(upload)
        .await
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    Ok(Json(ExtractTextResponse { text }))
}

async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        return field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
