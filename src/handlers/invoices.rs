use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::InvoiceSheet;
use crate::domain::aggregation::InvoiceTotals;
use crate::domain::columns::CustomColumns;
use crate::domain::invoice::{search_invoices, Invoice, InvoiceHeader, InvoiceListItem, InvoiceStatus};
use crate::errors::AppError;

use super::lines::{EditDto, InvoiceLineDto, RowDto};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatusDto {
    #[default]
    Draft,
    Posted,
    Paid,
}

impl From<InvoiceStatusDto> for InvoiceStatus {
    fn from(status: InvoiceStatusDto) -> Self {
        match status {
            InvoiceStatusDto::Draft => InvoiceStatus::Draft,
            InvoiceStatusDto::Posted => InvoiceStatus::Posted,
            InvoiceStatusDto::Paid => InvoiceStatus::Paid,
        }
    }
}

impl From<InvoiceStatus> for InvoiceStatusDto {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Draft => InvoiceStatusDto::Draft,
            InvoiceStatus::Posted => InvoiceStatusDto::Posted,
            InvoiceStatus::Paid => InvoiceStatusDto::Paid,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct InvoiceHeaderDto {
    pub invoice_number: String,
    pub customer: String,
    pub journal: String,
    pub payment_reference: String,
    pub fiscal_position: String,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub accounting_date: Option<NaiveDate>,
    pub currency: String,
    pub status: InvoiceStatusDto,
}

impl From<InvoiceHeaderDto> for InvoiceHeader {
    fn from(dto: InvoiceHeaderDto) -> Self {
        InvoiceHeader {
            invoice_number: dto.invoice_number,
            customer: dto.customer,
            journal: dto.journal,
            payment_reference: dto.payment_reference,
            fiscal_position: dto.fiscal_position,
            invoice_date: dto.invoice_date,
            due_date: dto.due_date,
            accounting_date: dto.accounting_date,
            currency: dto.currency,
            status: dto.status.into(),
        }
    }
}

impl From<InvoiceHeader> for InvoiceHeaderDto {
    fn from(header: InvoiceHeader) -> Self {
        InvoiceHeaderDto {
            invoice_number: header.invoice_number,
            customer: header.customer,
            journal: header.journal,
            payment_reference: header.payment_reference,
            fiscal_position: header.fiscal_position,
            invoice_date: header.invoice_date,
            due_date: header.due_date,
            accounting_date: header.accounting_date,
            currency: header.currency,
            status: header.status.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct InvoiceTotalsDto {
    pub untaxed: f64,
    pub tax: f64,
    pub total: f64,
}

impl From<InvoiceTotals> for InvoiceTotalsDto {
    fn from(totals: InvoiceTotals) -> Self {
        InvoiceTotalsDto {
            untaxed: totals.untaxed,
            tax: totals.tax,
            total: totals.total,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceWorksheetRequest {
    #[serde(default)]
    pub header: InvoiceHeaderDto,
    #[serde(default)]
    pub lines: Vec<InvoiceLineDto>,
    #[serde(default)]
    pub custom_columns: Vec<String>,
    /// Edits applied to the lines, in order.
    #[serde(default)]
    pub edits: Vec<EditDto<InvoiceLineDto>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceWorksheetResponse {
    pub header: InvoiceHeaderDto,
    pub custom_columns: Vec<String>,
    pub rows: Vec<RowDto<InvoiceLineDto>>,
    pub totals: InvoiceTotalsDto,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostInvoiceRequest {
    pub header: InvoiceHeaderDto,
    #[serde(default)]
    pub lines: Vec<InvoiceLineDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostInvoiceResponse {
    pub header: InvoiceHeaderDto,
    pub totals: InvoiceTotalsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceListItemDto {
    pub id: String,
    pub invoice_number: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub status: InvoiceStatusDto,
}

impl From<InvoiceListItemDto> for InvoiceListItem {
    fn from(dto: InvoiceListItemDto) -> Self {
        InvoiceListItem {
            id: dto.id,
            invoice_number: dto.invoice_number,
            customer: dto.customer,
            invoice_date: dto.invoice_date,
            due_date: dto.due_date,
            total: dto.total,
            status: dto.status.into(),
        }
    }
}

impl From<InvoiceListItem> for InvoiceListItemDto {
    fn from(item: InvoiceListItem) -> Self {
        InvoiceListItemDto {
            id: item.id,
            invoice_number: item.invoice_number,
            customer: item.customer,
            invoice_date: item.invoice_date,
            due_date: item.due_date,
            total: item.total,
            status: item.status.into(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchInvoicesRequest {
    /// Matched against invoice number and customer, ignoring case.
    #[serde(default)]
    pub query: String,
    pub invoices: Vec<InvoiceListItemDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchInvoicesResponse {
    pub items: Vec<InvoiceListItemDto>,
    pub total: usize,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /invoices/worksheet
///
/// Replays the submitted edits over an invoice's lines and returns the grid
/// with untaxed amount, tax and total.
#[utoipa::path(
    post,
    path = "/invoices/worksheet",
    request_body = InvoiceWorksheetRequest,
    responses(
        (status = 200, description = "Edited worksheet", body = InvoiceWorksheetResponse),
        (status = 404, description = "An edit names a line that does not exist"),
        (status = 422, description = "An edit was rejected"),
    ),
    tag = "invoices"
)]
pub async fn revise_worksheet(
    body: web::Json<InvoiceWorksheetRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let mut sheet = InvoiceSheet::new(
        body.lines.into_iter().map(Into::into).collect(),
        CustomColumns::new(body.custom_columns),
    );
    sheet.apply_all(body.edits.into_iter().map(Into::into))?;
    let rows: Vec<RowDto<InvoiceLineDto>> = sheet.rows().into_iter().map(RowDto::from).collect();
    let (lines, custom_columns) = sheet.into_parts();
    let invoice = Invoice {
        header: body.header.into(),
        lines,
        custom_columns,
    };

    let response = InvoiceWorksheetResponse {
        totals: invoice.totals().into(),
        custom_columns: invoice.custom_columns.names().to_vec(),
        header: invoice.header.into(),
        rows,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// POST /invoices/post
///
/// Moves a draft invoice to `posted`. Any other status is a conflict.
#[utoipa::path(
    post,
    path = "/invoices/post",
    request_body = PostInvoiceRequest,
    responses(
        (status = 200, description = "Invoice posted", body = PostInvoiceResponse),
        (status = 409, description = "Invoice is not a draft"),
    ),
    tag = "invoices"
)]
pub async fn post_invoice(body: web::Json<PostInvoiceRequest>) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let mut invoice = Invoice {
        header: body.header.into(),
        lines: body.lines.into_iter().map(Into::into).collect(),
        custom_columns: CustomColumns::default(),
    };

    invoice.post()?;
    log::info!("Posted invoice {}", invoice.header.invoice_number);

    Ok(HttpResponse::Ok().json(PostInvoiceResponse {
        totals: invoice.totals().into(),
        header: invoice.header.into(),
    }))
}

/// POST /invoices/search
///
/// Filters the submitted invoice list. An empty query returns every item.
#[utoipa::path(
    post,
    path = "/invoices/search",
    request_body = SearchInvoicesRequest,
    responses(
        (status = 200, description = "Matching invoices", body = SearchInvoicesResponse),
    ),
    tag = "invoices"
)]
pub async fn search(body: web::Json<SearchInvoicesRequest>) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let items: Vec<InvoiceListItemDto> = search_invoices(
        body.invoices.into_iter().map(Into::into).collect(),
        &body.query,
    )
    .into_iter()
    .map(Into::into)
    .collect();

    Ok(HttpResponse::Ok().json(SearchInvoicesResponse {
        total: items.len(),
        items,
    }))
}
