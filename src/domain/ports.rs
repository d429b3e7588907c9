use uuid::Uuid;

use super::bill::Bill;
use super::document::{Document, NewDocument};
use super::errors::DomainError;
use super::preferences::Theme;

/// Document metadata records.
pub trait DocumentRepository: Send + Sync + 'static {
    /// Documents of one master order, newest first.
    fn list_for_order(&self, master_order_id: &str) -> Result<Vec<Document>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DomainError>;
    fn insert(&self, document: NewDocument) -> Result<Document, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Bucket holding the document bytes, addressed by storage path.
pub trait ObjectStorage: Send + Sync + 'static {
    fn put(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError>;
    fn get(&self, path: &str) -> Result<Vec<u8>, DomainError>;
    fn remove(&self, path: &str) -> Result<(), DomainError>;
}

pub trait BillRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Bill>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Bill>, DomainError>;
    fn insert(&self, bill: &Bill) -> Result<(), DomainError>;
    /// Adds a payment to the stored bill and returns the bill as stored.
    /// Reading the balance, validating the amount and writing the new paid
    /// amount happen as one unit, so concurrent payments never see a stale
    /// balance. A rejected payment is a `Validation` error and stores nothing.
    fn record_payment(&self, id: Uuid, amount: f64) -> Result<Bill, DomainError>;
}

/// Persisted user preferences.
pub trait PreferenceStore: Send + Sync + 'static {
    /// The saved theme, if any. A value that no longer names a theme reads as
    /// `None`.
    fn load_theme(&self) -> Result<Option<Theme>, DomainError>;
    fn save_theme(&self, theme: Theme) -> Result<(), DomainError>;
}
