//! Document-level rollups over line collections and bills.
//!
//! Everything here is a pure function of its arguments. Notifying the user
//! and persisting results is left to the caller.

use std::collections::HashSet;

use thiserror::Error;

use super::bill::{Bill, BillStatus};
use super::errors::DomainError;
use super::line::{InvoiceLine, LineItem, OrderLine};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvoiceTotals {
    pub untaxed: f64,
    pub tax: f64,
    pub total: f64,
}

pub fn aggregate_invoice<'a>(lines: impl IntoIterator<Item = &'a InvoiceLine>) -> InvoiceTotals {
    let (untaxed, tax) = lines
        .into_iter()
        .fold((0.0, 0.0), |(untaxed, tax), line| {
            (untaxed + line.subtotal(), tax + line.tax_amount())
        });
    InvoiceTotals {
        untaxed,
        tax,
        total: untaxed + tax,
    }
}

/// Sum of order line subtotals.
pub fn order_total<'a>(lines: impl IntoIterator<Item = &'a OrderLine>) -> f64 {
    lines.into_iter().map(|line| line.subtotal()).sum()
}

/// `floor(x + 0.5)`: halves round towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds a money amount to whole cents, the precision bills are stored with.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole` as a rounded percentage, 0 when `whole` is 0.
pub fn percentage(part: f64, whole: f64) -> i64 {
    if whole > 0.0 {
        round_half_up(part / whole * 100.0) as i64
    } else {
        0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillSetSummary {
    pub bill_count: usize,
    pub total_bills: f64,
    pub total_paid: f64,
    pub total_outstanding: f64,
    /// Bills with nothing paid yet.
    pub delayed_bills: usize,
    pub total_ctn: u64,
    pub shipped_ctn: u64,
    pub total_cbm: f64,
    pub unique_customers: usize,
    pub paid_percentage: i64,
    pub shipped_percentage: i64,
}

pub fn aggregate_bill_set(bills: &[Bill]) -> BillSetSummary {
    let total_bills: f64 = bills.iter().map(|b| b.total_amount).sum();
    let total_paid: f64 = bills.iter().map(|b| b.paid_amount).sum();
    let total_ctn: u64 = bills.iter().map(|b| u64::from(b.total_ctn)).sum();
    let shipped_ctn: u64 = bills.iter().map(|b| u64::from(b.shipped_ctn)).sum();
    let unique_customers = bills
        .iter()
        .map(|b| b.customer_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    BillSetSummary {
        bill_count: bills.len(),
        total_bills,
        total_paid,
        total_outstanding: total_bills - total_paid,
        delayed_bills: bills
            .iter()
            .filter(|b| b.status() == BillStatus::NotPaid)
            .count(),
        total_ctn,
        shipped_ctn,
        total_cbm: bills.iter().map(|b| b.cbm).sum(),
        unique_customers,
        paid_percentage: percentage(total_paid, total_bills),
        shipped_percentage: percentage(shipped_ctn as f64, total_ctn as f64),
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentError {
    #[error("Please enter a valid payment amount")]
    InvalidAmount,
    #[error("Payment amount exceeds outstanding balance of {outstanding:.2}")]
    Overpayment { outstanding: f64 },
}

impl From<PaymentError> for DomainError {
    fn from(e: PaymentError) -> Self {
        DomainError::Validation(e.to_string())
    }
}

/// Applies a payment to `bill`, returning the updated bill. `bill` itself is
/// left as it was, whether or not the payment is accepted.
///
/// The amount is rounded to cents first, so an amount below half a cent is
/// invalid and the returned paid amount is exactly what gets stored.
pub fn record_payment(bill: &Bill, amount: f64) -> Result<Bill, PaymentError> {
    if !amount.is_finite() {
        return Err(PaymentError::InvalidAmount);
    }
    let amount = round_cents(amount);
    if amount <= 0.0 {
        return Err(PaymentError::InvalidAmount);
    }
    let outstanding = round_cents(bill.outstanding());
    if amount > outstanding {
        return Err(PaymentError::Overpayment { outstanding });
    }
    Ok(Bill {
        paid_amount: round_cents(bill.paid_amount + amount),
        ..bill.clone()
    })
}
