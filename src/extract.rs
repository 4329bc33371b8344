//! Text extraction from uploaded documents.
//!
//! PDF parsing is delegated to the pdf-extract crate, which yields the
//! concatenated visible text of all pages joined by newlines. Parser failure
//! surfaces as a generic extraction error; no partial-text recovery.

use crate::error::{Error, ExtractionError, InputError};

/// Extract raw text from an uploaded file, dispatching on its extension.
///
/// Supports `.pdf` and `.txt` (UTF-8). Anything else is an input error,
/// distinct from an extraction failure.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, Error> {
    match file_extension(filename).as_deref() {
        Some("pdf") => Ok(extract_pdf(bytes)?),
        Some("txt") => Ok(extract_txt(bytes)?),
        other => Err(InputError::UnsupportedFileType {
            extension: other.unwrap_or("").to_string(),
        }
        .into()),
    }
}

fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn extract_txt(bytes: &[u8]) -> Result<String, ExtractionError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError::TxtDecode(e.to_string()))
}
