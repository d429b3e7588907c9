use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

/// Metadata of a file attached to a master order. The bytes live in object
/// storage under `file_path`, which is treated as an opaque handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub master_order_id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}

/// Metadata to record once the object has been stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub master_order_id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
}

/// A file handed over for upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Rejects order ids that would escape their storage prefix.
pub fn validate_order_id(order_id: &str) -> Result<(), DomainError> {
    if order_id.trim().is_empty()
        || order_id.contains('/')
        || order_id.contains('\\')
        || order_id.contains("..")
    {
        return Err(DomainError::InvalidInput(format!(
            "invalid master order id '{order_id}'"
        )));
    }
    Ok(())
}

/// `{order_id}/{object_id}.{ext}`, or `{order_id}/{object_id}` when the file
/// name carries no usable extension.
pub fn storage_path(order_id: &str, object_id: Uuid, file_name: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    match ext {
        Some(ext) => format!("{order_id}/{object_id}.{ext}"),
        None => format!("{order_id}/{object_id}"),
    }
}

/// Human readable size: `0 Bytes`, `1.5 KB`, `2 MB`...
pub fn format_file_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes <= 0 {
        return "0 Bytes".to_string();
    }
    let bytes = bytes as f64;
    let exponent = ((bytes.ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}
