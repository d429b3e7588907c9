pub mod bill_service;
pub mod document_service;
pub mod preference_service;
pub mod worksheet;

pub use bill_service::{BillBoard, BillService};
pub use document_service::DocumentService;
pub use preference_service::PreferenceService;
pub use worksheet::{InvoiceSheet, OrderSheet, Worksheet, WorksheetEdit, WorksheetRow};
