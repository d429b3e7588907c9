use chrono::NaiveDate;

use super::aggregation::{aggregate_invoice, InvoiceTotals};
use super::columns::CustomColumns;
use super::errors::DomainError;
use super::line::InvoiceLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Posted,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Posted => "posted",
            InvoiceStatus::Paid => "paid",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceHeader {
    pub invoice_number: String,
    pub customer: String,
    pub journal: String,
    pub payment_reference: String,
    pub fiscal_position: String,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub accounting_date: Option<NaiveDate>,
    pub currency: String,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub header: InvoiceHeader,
    pub lines: Vec<InvoiceLine>,
    pub custom_columns: CustomColumns,
}

impl Invoice {
    pub fn totals(&self) -> InvoiceTotals {
        aggregate_invoice(&self.lines)
    }

    /// Finalises a draft. Only `draft -> posted` exists.
    pub fn post(&mut self) -> Result<(), DomainError> {
        if self.header.status != InvoiceStatus::Draft {
            return Err(DomainError::Conflict(format!(
                "Invoice {} is {} and cannot be posted",
                self.header.invoice_number,
                self.header.status.as_str()
            )));
        }
        self.header.status = InvoiceStatus::Posted;
        Ok(())
    }
}

/// Row of the invoice list.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceListItem {
    pub id: String,
    pub invoice_number: String,
    pub customer: String,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub total: f64,
    pub status: InvoiceStatus,
}

/// Case-insensitive substring match on invoice number or customer.
pub fn search_invoices(items: Vec<InvoiceListItem>, query: &str) -> Vec<InvoiceListItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            item.invoice_number.to_lowercase().contains(&needle)
                || item.customer.to_lowercase().contains(&needle)
        })
        .collect()
}
