//! In-process adapters for the domain ports, used by tests and local demos.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::aggregation::record_payment;
use crate::domain::bill::Bill;
use crate::domain::document::{Document, NewDocument};
use crate::domain::errors::DomainError;
use crate::domain::ports::{BillRepository, DocumentRepository, ObjectStorage, PreferenceStore};
use crate::domain::preferences::Theme;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))
}

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<Vec<Document>>,
}

impl DocumentRepository for InMemoryDocumentRepository {
    fn list_for_order(&self, master_order_id: &str) -> Result<Vec<Document>, DomainError> {
        let documents = lock(&self.documents)?;
        // Later inserts first among equal timestamps.
        let mut found: Vec<Document> = documents
            .iter()
            .rev()
            .filter(|d| d.master_order_id == master_order_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DomainError> {
        Ok(lock(&self.documents)?.iter().find(|d| d.id == id).cloned())
    }

    fn insert(&self, document: NewDocument) -> Result<Document, DomainError> {
        let document = Document {
            id: Uuid::new_v4(),
            master_order_id: document.master_order_id,
            file_name: document.file_name,
            file_path: document.file_path,
            file_type: document.file_type,
            file_size: document.file_size,
            created_at: Utc::now(),
        };
        lock(&self.documents)?.push(document.clone());
        Ok(document)
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut documents = lock(&self.documents)?;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryObjectStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl ObjectStorage for InMemoryObjectStorage {
    fn put(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError> {
        lock(&self.objects)?.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Vec<u8>, DomainError> {
        lock(&self.objects)?
            .get(path)
            .cloned()
            .ok_or_else(|| DomainError::Storage(format!("Object not found: {path}")))
    }

    fn remove(&self, path: &str) -> Result<(), DomainError> {
        lock(&self.objects)?.remove(path);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBillRepository {
    bills: Mutex<Vec<Bill>>,
}

impl BillRepository for InMemoryBillRepository {
    fn list(&self) -> Result<Vec<Bill>, DomainError> {
        Ok(lock(&self.bills)?.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Bill>, DomainError> {
        Ok(lock(&self.bills)?.iter().find(|b| b.id == id).cloned())
    }

    fn insert(&self, bill: &Bill) -> Result<(), DomainError> {
        lock(&self.bills)?.push(bill.clone());
        Ok(())
    }

    fn record_payment(&self, id: Uuid, amount: f64) -> Result<Bill, DomainError> {
        let mut bills = lock(&self.bills)?;
        let bill = bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(DomainError::NotFound)?;
        *bill = record_payment(bill, amount)?;
        Ok(bill.clone())
    }
}

#[derive(Default)]
pub struct InMemoryPreferenceStore {
    theme: Mutex<Option<Theme>>,
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn load_theme(&self) -> Result<Option<Theme>, DomainError> {
        Ok(*lock(&self.theme)?)
    }

    fn save_theme(&self, theme: Theme) -> Result<(), DomainError> {
        *lock(&self.theme)? = Some(theme);
        Ok(())
    }
}
