use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::core::error::{AppError, Result};

/// One uploaded file, buffered in memory. The body-size layer caps the total
/// request size before this is reached.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Text fields and files extracted from a multipart form. File parts use the
/// `files` field name; parts without a filename are treated as text fields.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl MultipartForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

pub async fn parse_multipart(mut multipart: Multipart) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name() {
            Some(file_name) if !file_name.is_empty() => {
                let original_name = file_name.to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(bad_multipart)?;
                form.files.push(UploadedFile {
                    original_name,
                    content_type,
                    data,
                });
            }
            _ => {
                let value = field.text().await.map_err(bad_multipart)?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> AppError {
    tracing::debug!(error = %e, "Rejected multipart body");
    AppError::BadRequest("Invalid multipart form data".to_string())
}
