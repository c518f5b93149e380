//! Buffered multipart forms and upload validation.
//!
//! Handlers read the whole `axum` multipart stream into a `MultipartForm` so that
//! services can validate text fields and uploaded files without touching the request.

use std::collections::HashMap;

use axum::{body::Bytes, extract::Multipart};

use crate::server::error::{validation::ValidationError, AppError};

/// Largest accepted upload, in bytes (8 MiB).
pub const MAX_UPLOAD_SIZE: usize = 8_388_608;

const DOCUMENT_CONTENT_TYPES: [&str; 4] = ["application/pdf", "image/jpeg", "image/jpg", "image/png"];
const DOCUMENT_EXTENSIONS: [&str; 4] = ["pdf", "jpeg", "jpg", "png"];
const IMAGE_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// A file part of a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }

    fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    fn check_size(&self, field: &str) -> Result<(), ValidationError> {
        if self.bytes.is_empty() {
            return Err(ValidationError::new(field, "The submitted file is empty."));
        }
        if self.bytes.len() > MAX_UPLOAD_SIZE {
            return Err(ValidationError::new(field, "Maximum file size is 8MB"));
        }
        Ok(())
    }

    /// Accepts PDF, JPG, JPEG and PNG files up to 8 MiB.
    ///
    /// The declared content type decides when present, the file extension otherwise.
    pub fn validate_document(&self, field: &str) -> Result<(), ValidationError> {
        let allowed = match &self.content_type {
            Some(content_type) => DOCUMENT_CONTENT_TYPES.contains(&content_type.as_str()),
            None => self
                .extension()
                .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.as_str())),
        };
        if !allowed {
            return Err(ValidationError::new(
                field,
                "Only PDF, JPG, JPEG, PNG files are allowed",
            ));
        }

        self.check_size(field)
    }

    /// Accepts image uploads up to 8 MiB.
    pub fn validate_image(&self, field: &str) -> Result<(), ValidationError> {
        let is_image = match &self.content_type {
            Some(content_type) => content_type.starts_with("image/"),
            None => self
                .extension()
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str())),
        };
        if !is_image {
            return Err(ValidationError::new(
                field,
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
            ));
        }

        self.check_size(field)
    }
}

/// Fully buffered multipart form.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl MultipartForm {
    /// Reads every part of the request.
    ///
    /// Parts carrying a file name are treated as files, all others as text. Repeated
    /// file fields accumulate, repeated text fields keep the last value.
    ///
    /// # Returns
    /// - `Ok(MultipartForm)` - All parts read
    /// - `Err(AppError::MultipartErr)` - The body is not valid multipart data
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    // Browsers send an empty part for untouched file inputs
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.entry(name).or_default().push(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_file(mut self, name: &str, file: UploadedFile) -> Self {
        self.files.entry(name.to_string()).or_default().push(file);
        self
    }

    /// Trimmed text value, `None` when the field is absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Text value that must be present.
    pub fn required_text(&self, name: &str) -> Result<&str, ValidationError> {
        self.text(name).ok_or_else(|| ValidationError::required(name))
    }

    pub fn files(&self, name: &str) -> &[UploadedFile] {
        self.files.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First file uploaded under `name`.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files(name).first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pdf_document() {
        let file = UploadedFile::new("deed.pdf", Some("application/pdf"), vec![1u8; 10]);

        assert!(file.validate_document("documents").is_ok());
    }

    #[test]
    fn rejects_disallowed_document_type() {
        let file = UploadedFile::new("notes.txt", Some("text/plain"), vec![1u8; 10]);

        let err = file.validate_document("documents").unwrap_err();
        assert_eq!(err.message, "Only PDF, JPG, JPEG, PNG files are allowed");
    }

    #[test]
    fn falls_back_to_extension_without_content_type() {
        let file = UploadedFile::new("scan.PNG", None, vec![1u8; 10]);

        assert!(file.validate_document("documents").is_ok());
        assert!(file.validate_image("images").is_ok());
    }

    #[test]
    fn rejects_oversized_files() {
        let file = UploadedFile::new("big.png", Some("image/png"), vec![0u8; MAX_UPLOAD_SIZE + 1]);

        let err = file.validate_image("images").unwrap_err();
        assert_eq!(err.message, "Maximum file size is 8MB");
    }

    #[test]
    fn blank_text_reads_as_missing() {
        let form = MultipartForm::default().with_text("city", "   ");

        assert_eq!(form.text("city"), None);
        assert_eq!(form.required_text("city").unwrap_err().field, "city");
    }
}
