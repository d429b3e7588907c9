pub mod bill_repo;
pub mod document_repo;
pub mod memory;
pub mod models;
pub mod object_storage;
pub mod preference_file;

pub use bill_repo::DieselBillRepository;
pub use document_repo::DieselDocumentRepository;
pub use object_storage::LocalObjectStorage;
pub use preference_file::JsonPreferenceStore;

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────
//
// `io::Error` has no blanket conversion; each file-backed adapter maps its own.

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
