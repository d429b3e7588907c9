use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::aggregation::record_payment;
use crate::domain::bill::Bill;
use crate::domain::errors::DomainError;
use crate::domain::ports::BillRepository;
use crate::schema::bills;

use super::models::{BillRow, NewBillRow};

/// Amounts are stored with two decimal places.
fn to_decimal(value: f64) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_f64(value)
        .map(|d| d.round(2).with_scale(2))
        .ok_or_else(|| DomainError::InvalidInput(format!("{value} is not a storable amount")))
}

fn to_amount(value: &BigDecimal) -> Result<f64, DomainError> {
    value
        .to_f64()
        .ok_or_else(|| DomainError::Internal(format!("amount {value} does not fit in f64")))
}

fn to_count(value: i32, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::Internal(format!("negative {column} ({value}) in bills table")))
}

fn to_column(value: u32, column: &str) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| DomainError::InvalidInput(format!("{column} is too large")))
}

impl TryFrom<BillRow> for Bill {
    type Error = DomainError;

    fn try_from(row: BillRow) -> Result<Self, Self::Error> {
        Ok(Bill {
            id: row.id,
            customer_name: row.customer_name,
            total_amount: to_amount(&row.total_amount)?,
            paid_amount: to_amount(&row.paid_amount)?,
            total_ctn: to_count(row.total_ctn, "total_ctn")?,
            shipped_ctn: to_count(row.shipped_ctn, "shipped_ctn")?,
            cbm: row.cbm,
            sent: row.sent,
            remain: row.remain,
        })
    }
}

pub struct DieselBillRepository {
    pool: DbPool,
}

impl DieselBillRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl BillRepository for DieselBillRepository {
    fn list(&self) -> Result<Vec<Bill>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = bills::table
            .select(BillRow::as_select())
            .order(bills::created_at.asc())
            .load(&mut conn)?;

        rows.into_iter().map(Bill::try_from).collect()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Bill>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = bills::table
            .filter(bills::id.eq(id))
            .select(BillRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(Bill::try_from).transpose()
    }

    fn insert(&self, bill: &Bill) -> Result<(), DomainError> {
        let row = NewBillRow {
            id: bill.id,
            customer_name: bill.customer_name.clone(),
            total_amount: to_decimal(bill.total_amount)?,
            paid_amount: to_decimal(bill.paid_amount)?,
            total_ctn: to_column(bill.total_ctn, "total_ctn")?,
            shipped_ctn: to_column(bill.shipped_ctn, "shipped_ctn")?,
            cbm: bill.cbm,
            sent: bill.sent,
            remain: bill.remain,
        };

        let mut conn = self.pool.get()?;
        diesel::insert_into(bills::table)
            .values(&row)
            .execute(&mut conn)?;
        Ok(())
    }

    fn record_payment(&self, id: Uuid, amount: f64) -> Result<Bill, DomainError> {
        let mut conn = self.pool.get()?;

        // The row stays locked until commit, so a concurrent payment on the
        // same bill waits and then validates against this one's result.
        conn.transaction::<_, DomainError, _>(|conn| {
            let row = bills::table
                .filter(bills::id.eq(id))
                .select(BillRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound)?;

            let updated = record_payment(&Bill::try_from(row)?, amount)?;

            let row = diesel::update(bills::table.filter(bills::id.eq(id)))
                .set((
                    bills::paid_amount.eq(to_decimal(updated.paid_amount)?),
                    bills::updated_at.eq(diesel::dsl::now),
                ))
                .returning(BillRow::as_returning())
                .get_result(conn)?;

            Bill::try_from(row)
        })
    }
}
