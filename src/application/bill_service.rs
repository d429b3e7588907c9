use std::sync::Arc;

use uuid::Uuid;

use crate::domain::aggregation::{aggregate_bill_set, BillSetSummary};
use crate::domain::bill::{Bill, BillFilter, NewBill};
use crate::domain::errors::DomainError;
use crate::domain::ports::BillRepository;

/// Bills shown on the tracking board and the rollup over exactly those bills.
#[derive(Debug, Clone, PartialEq)]
pub struct BillBoard {
    pub bills: Vec<Bill>,
    pub summary: BillSetSummary,
}

pub struct BillService {
    repo: Arc<dyn BillRepository>,
}

impl BillService {
    pub fn new(repo: Arc<dyn BillRepository>) -> Self {
        Self { repo }
    }

    pub fn board(&self, filter: BillFilter) -> Result<BillBoard, DomainError> {
        let bills = filter.apply(self.repo.list()?);
        let summary = aggregate_bill_set(&bills);
        Ok(BillBoard { bills, summary })
    }

    pub fn create(&self, new_bill: NewBill) -> Result<Bill, DomainError> {
        new_bill.validate()?;
        let bill = new_bill.into_bill(Uuid::new_v4());
        self.repo.insert(&bill)?;
        log::info!("Registered bill {} for {}", bill.id, bill.customer_name);
        Ok(bill)
    }

    /// Validates the payment against the stored bill and persists the new
    /// paid amount. A rejected payment leaves the stored bill untouched.
    pub fn record_payment(&self, id: Uuid, amount: f64) -> Result<Bill, DomainError> {
        let updated = self.repo.record_payment(id, amount).map_err(|e| {
            if let DomainError::Validation(reason) = &e {
                log::warn!("Rejected payment of {} on bill {}: {}", amount, id, reason);
            }
            e
        })?;
        log::info!(
            "Recorded payment of {} on bill {} ({})",
            amount,
            id,
            updated.status()
        );
        Ok(updated)
    }
}
