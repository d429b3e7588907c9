use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::OrderSheet;
use crate::domain::columns::CustomColumns;
use crate::domain::master_order::{MasterOrder, MasterOrderHeader};
use crate::errors::AppError;

use super::lines::{EditDto, OrderLineDto, RowDto};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MasterOrderHeaderDto {
    pub order_number: String,
    pub project_name: String,
    pub client: String,
    pub order_date: Option<NaiveDate>,
    pub expected_delivery: Option<NaiveDate>,
    /// Dropship / door-to-door.
    pub virtual_inventory: bool,
    pub shipper: String,
    pub shipping_cost: f64,
    pub shipping_charge: f64,
    pub shipping_margin: f64,
    pub currency: String,
    pub commission_rate: f64,
    pub total_profit: f64,
}

impl From<MasterOrderHeaderDto> for MasterOrderHeader {
    fn from(dto: MasterOrderHeaderDto) -> Self {
        MasterOrderHeader {
            order_number: dto.order_number,
            project_name: dto.project_name,
            client: dto.client,
            order_date: dto.order_date,
            expected_delivery: dto.expected_delivery,
            virtual_inventory: dto.virtual_inventory,
            shipper: dto.shipper,
            shipping_cost: dto.shipping_cost,
            shipping_charge: dto.shipping_charge,
            shipping_margin: dto.shipping_margin,
            currency: dto.currency,
            commission_rate: dto.commission_rate,
            total_profit: dto.total_profit,
        }
    }
}

impl From<MasterOrderHeader> for MasterOrderHeaderDto {
    fn from(header: MasterOrderHeader) -> Self {
        MasterOrderHeaderDto {
            order_number: header.order_number,
            project_name: header.project_name,
            client: header.client,
            order_date: header.order_date,
            expected_delivery: header.expected_delivery,
            virtual_inventory: header.virtual_inventory,
            shipper: header.shipper,
            shipping_cost: header.shipping_cost,
            shipping_charge: header.shipping_charge,
            shipping_margin: header.shipping_margin,
            currency: header.currency,
            commission_rate: header.commission_rate,
            total_profit: header.total_profit,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MasterOrderWorksheetRequest {
    #[serde(default)]
    pub header: MasterOrderHeaderDto,
    #[serde(default)]
    pub lines: Vec<OrderLineDto>,
    #[serde(default)]
    pub custom_columns: Vec<String>,
    /// Edits applied to the lines, in order.
    #[serde(default)]
    pub edits: Vec<EditDto<OrderLineDto>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MasterOrderWorksheetResponse {
    pub header: MasterOrderHeaderDto,
    pub custom_columns: Vec<String>,
    pub rows: Vec<RowDto<OrderLineDto>>,
    pub total: f64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /master-orders/worksheet
///
/// Replays the submitted edits over a master order's lines and returns the
/// resulting grid with per-line subtotals and the order total. Nothing is
/// persisted.
#[utoipa::path(
    post,
    path = "/master-orders/worksheet",
    request_body = MasterOrderWorksheetRequest,
    responses(
        (status = 200, description = "Edited worksheet", body = MasterOrderWorksheetResponse),
        (status = 404, description = "An edit names a line that does not exist"),
        (status = 422, description = "An edit was rejected"),
    ),
    tag = "master-orders"
)]
pub async fn revise_worksheet(
    body: web::Json<MasterOrderWorksheetRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let order = MasterOrder {
        header: body.header.into(),
        lines: body.lines.into_iter().map(Into::into).collect(),
        custom_columns: CustomColumns::new(body.custom_columns),
    };

    let mut sheet = OrderSheet::new(order.lines, order.custom_columns);
    sheet.apply_all(body.edits.into_iter().map(Into::into))?;
    let rows: Vec<RowDto<OrderLineDto>> = sheet.rows().into_iter().map(RowDto::from).collect();
    let (lines, custom_columns) = sheet.into_parts();
    let order = MasterOrder {
        header: order.header,
        lines,
        custom_columns,
    };

    let response = MasterOrderWorksheetResponse {
        total: order.total(),
        custom_columns: order.custom_columns.names().to_vec(),
        header: order.header.into(),
        rows,
    };

    Ok(HttpResponse::Ok().json(response))
}
