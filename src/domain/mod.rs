pub mod aggregation;
pub mod bill;
pub mod columns;
pub mod document;
pub mod errors;
pub mod invoice;
pub mod line;
pub mod master_order;
pub mod ports;
pub mod preferences;
