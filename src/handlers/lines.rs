//! Wire shapes shared by the order and invoice worksheets.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::application::{WorksheetEdit, WorksheetRow};
use crate::domain::columns::ColumnCell;
use crate::domain::line::{FieldValue, InvoiceLine, LineId, OrderLine};

/// A cell value as typed: a JSON number or a string.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FieldValueDto {
    Number(f64),
    Text(String),
}

impl From<FieldValueDto> for FieldValue {
    fn from(value: FieldValueDto) -> Self {
        match value {
            FieldValueDto::Number(n) => FieldValue::Number(n),
            FieldValueDto::Text(text) => FieldValue::Text(text),
        }
    }
}

/// Numeric cells that could not be read serialize as `null`; reading one back
/// yields NaN again so a returned line can be resubmitted as is.
fn number_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineDto {
    pub id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default, deserialize_with = "number_or_nan")]
    #[schema(value_type = Option<f64>)]
    pub qty: f64,
    #[serde(default, deserialize_with = "number_or_nan")]
    #[schema(value_type = Option<f64>)]
    pub unit_price: f64,
    /// Product picture as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Custom column values keyed by column name.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl From<OrderLineDto> for OrderLine {
    fn from(dto: OrderLineDto) -> Self {
        OrderLine {
            id: LineId::new(dto.id),
            product_name: dto.product_name,
            description: dto.description,
            vendor: dto.vendor,
            qty: dto.qty,
            unit_price: dto.unit_price,
            image: dto.image,
            extra: dto.extra,
        }
    }
}

impl From<&OrderLine> for OrderLineDto {
    fn from(line: &OrderLine) -> Self {
        OrderLineDto {
            id: line.id.to_string(),
            product_name: line.product_name.clone(),
            description: line.description.clone(),
            vendor: line.vendor.clone(),
            qty: line.qty,
            unit_price: line.unit_price,
            image: line.image.clone(),
            extra: line.extra.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceLineDto {
    pub id: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub account: String,
    #[serde(default, deserialize_with = "number_or_nan")]
    #[schema(value_type = Option<f64>)]
    pub quantity: f64,
    #[serde(default, deserialize_with = "number_or_nan")]
    #[schema(value_type = Option<f64>)]
    pub unit_price: f64,
    /// Tax rate text, e.g. "15%".
    #[serde(default)]
    pub taxes: String,
    /// Discount in percent.
    #[serde(default, deserialize_with = "number_or_nan")]
    #[schema(value_type = Option<f64>)]
    pub discount: f64,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl From<InvoiceLineDto> for InvoiceLine {
    fn from(dto: InvoiceLineDto) -> Self {
        InvoiceLine {
            id: LineId::new(dto.id),
            product: dto.product,
            description: dto.description,
            account: dto.account,
            quantity: dto.quantity,
            unit_price: dto.unit_price,
            taxes: dto.taxes,
            discount: dto.discount,
            extra: dto.extra,
        }
    }
}

impl From<&InvoiceLine> for InvoiceLineDto {
    fn from(line: &InvoiceLine) -> Self {
        InvoiceLineDto {
            id: line.id.to_string(),
            product: line.product.clone(),
            description: line.description.clone(),
            account: line.account.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            taxes: line.taxes.clone(),
            discount: line.discount,
            extra: line.extra.clone(),
        }
    }
}

/// One grid edit, replayed in request order.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditDto<L> {
    AddLine,
    UpdateField {
        line_id: String,
        field: String,
        value: FieldValueDto,
    },
    UpsertLine {
        line: L,
    },
    DeleteLine {
        line_id: String,
    },
    AddCustomColumn {
        name: String,
    },
}

impl<D, L> From<EditDto<D>> for WorksheetEdit<L>
where
    L: From<D>,
{
    fn from(edit: EditDto<D>) -> Self {
        match edit {
            EditDto::AddLine => WorksheetEdit::AddLine,
            EditDto::UpdateField {
                line_id,
                field,
                value,
            } => WorksheetEdit::UpdateField {
                line_id: LineId::new(line_id),
                field,
                value: value.into(),
            },
            EditDto::UpsertLine { line } => WorksheetEdit::UpsertLine(line.into()),
            EditDto::DeleteLine { line_id } => WorksheetEdit::DeleteLine {
                line_id: LineId::new(line_id),
            },
            EditDto::AddCustomColumn { name } => WorksheetEdit::AddCustomColumn { name },
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CellDto {
    pub column: String,
    pub value: Option<String>,
    /// The value, or the column name as a placeholder.
    pub display: String,
}

impl From<ColumnCell> for CellDto {
    fn from(cell: ColumnCell) -> Self {
        CellDto {
            display: cell.display().to_string(),
            column: cell.column,
            value: cell.value,
        }
    }
}

/// A rendered grid row: the line, its subtotal and its custom cells.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RowDto<L> {
    pub line: L,
    pub subtotal: f64,
    pub cells: Vec<CellDto>,
}

impl<'a, D, L> From<WorksheetRow<'a, L>> for RowDto<D>
where
    D: From<&'a L>,
{
    fn from(row: WorksheetRow<'a, L>) -> Self {
        RowDto {
            line: D::from(row.line),
            subtotal: row.subtotal,
            cells: row.cells.into_iter().map(CellDto::from).collect(),
        }
    }
}
