use std::sync::Arc;

use uuid::Uuid;

use crate::domain::document::{storage_path, validate_order_id, Document, NewDocument, UploadedFile};
use crate::domain::errors::DomainError;
use crate::domain::ports::{DocumentRepository, ObjectStorage};

/// Attachments of master orders: metadata in the repository, bytes in object
/// storage.
pub struct DocumentService {
    repo: Arc<dyn DocumentRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl DocumentService {
    pub fn new(repo: Arc<dyn DocumentRepository>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { repo, storage }
    }

    pub fn list(&self, order_id: &str) -> Result<Vec<Document>, DomainError> {
        validate_order_id(order_id)?;
        self.repo.list_for_order(order_id)
    }

    pub fn get(&self, id: Uuid) -> Result<Document, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    /// Stores the bytes first and records the metadata second. When the
    /// metadata write fails the stored object stays behind.
    pub fn upload(&self, order_id: &str, file: UploadedFile) -> Result<Document, DomainError> {
        validate_order_id(order_id)?;
        if file.file_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("file name must not be empty".to_string()));
        }

        let file_path = storage_path(order_id, Uuid::new_v4(), &file.file_name);
        let file_size = i64::try_from(file.bytes.len())
            .map_err(|_| DomainError::InvalidInput("file is too large".to_string()))?;

        self.storage.put(&file_path, &file.bytes)?;

        let document = self
            .repo
            .insert(NewDocument {
                master_order_id: order_id.to_string(),
                file_name: file.file_name,
                file_path: file_path.clone(),
                file_type: file.content_type,
                file_size,
            })
            .map_err(|e| {
                log::error!("Stored {} but could not record its metadata: {}", file_path, e);
                DomainError::Storage(format!("Failed to upload document: {e}"))
            })?;

        log::info!(
            "Uploaded document {} ({} bytes) for master order {}",
            document.id,
            document.file_size,
            order_id
        );
        Ok(document)
    }

    pub fn download(&self, id: Uuid) -> Result<(Document, Vec<u8>), DomainError> {
        let document = self.get(id)?;
        let bytes = self.storage.get(&document.file_path)?;
        Ok((document, bytes))
    }

    pub fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let document = self.get(id)?;
        self.delete_document(&document)
    }

    /// Removes the object, then the metadata. If the object cannot be removed
    /// the metadata is left alone; if only the metadata delete fails the
    /// result is a partial failure and the record stays.
    pub fn delete_document(&self, document: &Document) -> Result<(), DomainError> {
        self.storage.remove(&document.file_path)?;

        self.repo.delete(document.id).map_err(|e| {
            log::error!(
                "Removed object {} but its metadata record {} remains: {}",
                document.file_path,
                document.id,
                e
            );
            DomainError::PartialFailure(format!(
                "Document file was removed but its record could not be deleted: {e}"
            ))
        })?;

        log::info!("Deleted document {} ({})", document.id, document.file_name);
        Ok(())
    }
}
