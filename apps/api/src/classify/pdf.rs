use crate::errors::AppError;

/// Extracts the text layer of an uploaded PDF resume.
///
/// Image-only PDFs come back empty; the caller rejects them as blank input.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))
}
