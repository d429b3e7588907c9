use chrono::NaiveDate;

use super::aggregation::order_total;
use super::columns::CustomColumns;
use super::line::OrderLine;

/// Header fields of a master order form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MasterOrderHeader {
    pub order_number: String,
    pub project_name: String,
    pub client: String,
    pub order_date: Option<NaiveDate>,
    pub expected_delivery: Option<NaiveDate>,
    /// Dropship / door-to-door order with no warehouse stock.
    pub virtual_inventory: bool,
    pub shipper: String,
    pub shipping_cost: f64,
    pub shipping_charge: f64,
    pub shipping_margin: f64,
    pub currency: String,
    pub commission_rate: f64,
    pub total_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MasterOrder {
    pub header: MasterOrderHeader,
    pub lines: Vec<OrderLine>,
    pub custom_columns: CustomColumns,
}

impl MasterOrder {
    pub fn total(&self) -> f64 {
        order_total(&self.lines)
    }
}
