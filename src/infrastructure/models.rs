use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{bills, documents};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentRow {
    pub id: Uuid,
    pub master_order_id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocumentRow {
    pub id: Uuid,
    pub master_order_id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BillRow {
    pub id: Uuid,
    pub customer_name: String,
    pub total_amount: BigDecimal,
    pub paid_amount: BigDecimal,
    pub total_ctn: i32,
    pub shipped_ctn: i32,
    pub cbm: f64,
    pub sent: i32,
    pub remain: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = bills)]
pub struct NewBillRow {
    pub id: Uuid,
    pub customer_name: String,
    pub total_amount: BigDecimal,
    pub paid_amount: BigDecimal,
    pub total_ctn: i32,
    pub shipped_ctn: i32,
    pub cbm: f64,
    pub sent: i32,
    pub remain: i32,
}
