pub mod bills;
pub mod documents;
pub mod invoices;
pub mod lines;
pub mod master_orders;
pub mod preferences;
