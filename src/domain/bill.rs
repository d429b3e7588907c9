use std::fmt;

use uuid::Uuid;

use super::aggregation::percentage;
use super::errors::DomainError;

/// Payment state, always derived from the amounts on a [`Bill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    NotPaid,
    Partial,
    Paid,
}

impl BillStatus {
    pub fn from_amounts(total_amount: f64, paid_amount: f64) -> Self {
        if paid_amount >= total_amount {
            BillStatus::Paid
        } else if paid_amount > 0.0 {
            BillStatus::Partial
        } else {
            BillStatus::NotPaid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::NotPaid => "not_paid",
            BillStatus::Partial => "partial",
            BillStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer's financial and shipment tracking record.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub id: Uuid,
    /// Grouping key. Not unique.
    pub customer_name: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub total_ctn: u32,
    pub shipped_ctn: u32,
    pub cbm: f64,
    // Supplied independently of the CTN counts.
    pub sent: i32,
    pub remain: i32,
}

impl Bill {
    pub fn status(&self) -> BillStatus {
        BillStatus::from_amounts(self.total_amount, self.paid_amount)
    }

    pub fn outstanding(&self) -> f64 {
        self.total_amount - self.paid_amount
    }

    pub fn payment_percentage(&self) -> i64 {
        percentage(self.paid_amount, self.total_amount)
    }

    pub fn shipped_percentage(&self) -> i64 {
        percentage(f64::from(self.shipped_ctn), f64::from(self.total_ctn))
    }
}

/// Fields supplied when a bill is registered. Status is never supplied; it
/// follows from the amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub customer_name: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub total_ctn: u32,
    pub shipped_ctn: u32,
    pub cbm: f64,
    pub sent: i32,
    pub remain: i32,
}

impl NewBill {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Customer name must not be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("total amount", self.total_amount),
            ("paid amount", self.paid_amount),
            ("CBM", self.cbm),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::Validation(format!(
                    "The {name} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }

    pub fn into_bill(self, id: Uuid) -> Bill {
        Bill {
            id,
            customer_name: self.customer_name.trim().to_string(),
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
            total_ctn: self.total_ctn,
            shipped_ctn: self.shipped_ctn,
            cbm: self.cbm,
            sent: self.sent,
            remain: self.remain,
        }
    }
}

/// Bill board filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BillFilter {
    pub hide_fully_paid: bool,
}

impl BillFilter {
    pub fn apply(&self, bills: Vec<Bill>) -> Vec<Bill> {
        if !self.hide_fully_paid {
            return bills;
        }
        bills
            .into_iter()
            .filter(|bill| bill.status() != BillStatus::Paid)
            .collect()
    }
}
