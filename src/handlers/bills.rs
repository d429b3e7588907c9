use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::BillBoard;
use crate::domain::aggregation::BillSetSummary;
use crate::domain::bill::{Bill, BillFilter, NewBill};
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBillRequest {
    pub customer_name: String,
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub total_ctn: u32,
    #[serde(default)]
    pub shipped_ctn: u32,
    #[serde(default)]
    pub cbm: f64,
    #[serde(default)]
    pub sent: i32,
    #[serde(default)]
    pub remain: i32,
}

impl From<CreateBillRequest> for NewBill {
    fn from(req: CreateBillRequest) -> Self {
        NewBill {
            customer_name: req.customer_name,
            total_amount: req.total_amount,
            paid_amount: req.paid_amount,
            total_ctn: req.total_ctn,
            shipped_ctn: req.shipped_ctn,
            cbm: req.cbm,
            sent: req.sent,
            remain: req.remain,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BillResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub outstanding: f64,
    /// One of `not_paid`, `partial` or `paid`, derived from the amounts.
    pub status: String,
    pub payment_percentage: i64,
    pub total_ctn: u32,
    pub shipped_ctn: u32,
    pub shipped_percentage: i64,
    pub cbm: f64,
    pub sent: i32,
    pub remain: i32,
}

impl From<&Bill> for BillResponse {
    fn from(bill: &Bill) -> Self {
        BillResponse {
            id: bill.id,
            customer_name: bill.customer_name.clone(),
            total_amount: bill.total_amount,
            paid_amount: bill.paid_amount,
            outstanding: bill.outstanding(),
            status: bill.status().to_string(),
            payment_percentage: bill.payment_percentage(),
            total_ctn: bill.total_ctn,
            shipped_ctn: bill.shipped_ctn,
            shipped_percentage: bill.shipped_percentage(),
            cbm: bill.cbm,
            sent: bill.sent,
            remain: bill.remain,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BillSummaryResponse {
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

impl From<BillSetSummary> for BillSummaryResponse {
    fn from(s: BillSetSummary) -> Self {
        BillSummaryResponse {
            bill_count: s.bill_count,
            total_bills: s.total_bills,
            total_paid: s.total_paid,
            total_outstanding: s.total_outstanding,
            delayed_bills: s.delayed_bills,
            total_ctn: s.total_ctn,
            shipped_ctn: s.shipped_ctn,
            total_cbm: s.total_cbm,
            unique_customers: s.unique_customers,
            paid_percentage: s.paid_percentage,
            shipped_percentage: s.shipped_percentage,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BillBoardResponse {
    pub bills: Vec<BillResponse>,
    pub summary: BillSummaryResponse,
}

impl From<BillBoard> for BillBoardResponse {
    fn from(board: BillBoard) -> Self {
        BillBoardResponse {
            bills: board.bills.iter().map(BillResponse::from).collect(),
            summary: board.summary.into(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BillBoardParams {
    /// Leave out bills whose paid amount covers the total.
    #[serde(default)]
    pub hide_fully_paid: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /bills
///
/// Returns the bill board and the summary over the bills it shows.
#[utoipa::path(
    get,
    path = "/bills",
    params(BillBoardParams),
    responses(
        (status = 200, description = "Bills and their summary", body = BillBoardResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "bills"
)]
pub async fn bill_board(
    state: web::Data<AppState>,
    query: web::Query<BillBoardParams>,
) -> Result<HttpResponse, AppError> {
    let filter = BillFilter {
        hide_fully_paid: query.hide_fully_paid,
    };
    let bills = state.bills.clone();

    let board = web::block(move || bills.board(filter)).await??;

    Ok(HttpResponse::Ok().json(BillBoardResponse::from(board)))
}

/// POST /bills
#[utoipa::path(
    post,
    path = "/bills",
    request_body = CreateBillRequest,
    responses(
        (status = 201, description = "Bill registered", body = BillResponse),
        (status = 422, description = "Invalid bill"),
    ),
    tag = "bills"
)]
pub async fn create_bill(
    state: web::Data<AppState>,
    body: web::Json<CreateBillRequest>,
) -> Result<HttpResponse, AppError> {
    let new_bill = NewBill::from(body.into_inner());
    let bills = state.bills.clone();

    let bill = web::block(move || bills.create(new_bill)).await??;

    Ok(HttpResponse::Created().json(BillResponse::from(&bill)))
}

/// POST /bills/{id}/payments
///
/// Adds a payment to the bill. Non-positive amounts and amounts above the
/// outstanding balance are rejected and nothing is stored.
#[utoipa::path(
    post,
    path = "/bills/{id}/payments",
    params(
        ("id" = Uuid, Path, description = "Bill UUID"),
    ),
    request_body = RecordPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = BillResponse),
        (status = 404, description = "Bill not found"),
        (status = 422, description = "Payment rejected"),
    ),
    tag = "bills"
)]
pub async fn record_payment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let amount = body.amount;
    let bills = state.bills.clone();

    let bill = web::block(move || bills.record_payment(id, amount)).await??;

    Ok(HttpResponse::Ok().json(BillResponse::from(&bill)))
}
