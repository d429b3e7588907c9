use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque identifier of a line within a document.
///
/// Freshly added lines get a millisecond timestamp string from
/// [`LineIdGenerator`]; lines submitted by a client keep whatever id they
/// arrived with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(String);

impl LineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues timestamp ids that strictly increase, so an id handed out once is
/// never handed out again even if the line it named has been deleted.
#[derive(Debug, Default)]
pub struct LineIdGenerator {
    last: u128,
}

impl LineIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure ids issued later sort after `id` when it is numeric.
    pub fn observe(&mut self, id: &LineId) {
        if let Ok(n) = id.as_str().parse::<u128>() {
            self.last = self.last.max(n);
        }
    }

    pub fn next_id(&mut self) -> LineId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let next = now.max(self.last.saturating_add(1));
        self.last = next;
        LineId(next.to_string())
    }
}

/// A value typed into a line cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Numeric reading of the value: blank text is 0, unparseable text is NaN.
    /// Values that overflow to infinity read as NaN too.
    pub fn as_number(&self) -> f64 {
        let n = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    0.0
                } else {
                    text.parse().unwrap_or(f64::NAN)
                }
            }
        };
        if n.is_finite() {
            n
        } else {
            f64::NAN
        }
    }

    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// NaN counts as an empty cell.
pub(crate) fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Rate in percent from text such as `"15%"`. Anything unparseable is 0.
pub fn parse_tax_rate(taxes: &str) -> f64 {
    let text = taxes.trim();
    let text = text.strip_suffix('%').unwrap_or(text).trim();
    or_zero(text.parse().unwrap_or(0.0))
}

/// Behaviour shared by order lines and invoice lines.
pub trait LineItem: Clone {
    /// A line with default field values, as created by "Add Line".
    fn blank(id: LineId) -> Self;

    fn id(&self) -> &LineId;

    /// Pre-tax amount of the line. Always derived, never stored.
    fn subtotal(&self) -> f64;

    /// Values of custom columns, keyed by column name.
    fn extra(&self) -> &BTreeMap<String, String>;

    /// Copy of `self` with one field replaced.
    fn with_field(&self, field: &str, value: FieldValue) -> Self;
}

pub fn compute_subtotal<L: LineItem>(line: &L) -> f64 {
    line.subtotal()
}

/// Returns a new line with `field` set to `value`. Names that are not fixed
/// fields land in the custom-column map. The id cannot be changed.
pub fn update_field<L: LineItem>(line: &L, field: &str, value: FieldValue) -> L {
    line.with_field(field, value)
}

/// Drops the line with `id`. The collection comes back untouched when no line
/// matches.
pub fn delete_line<L: LineItem>(mut lines: Vec<L>, id: &LineId) -> Vec<L> {
    lines.retain(|line| line.id() != id);
    lines
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub id: LineId,
    pub product_name: String,
    pub description: String,
    pub vendor: String,
    pub qty: f64,
    pub unit_price: f64,
    /// Product picture as a data URI.
    pub image: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl LineItem for OrderLine {
    fn blank(id: LineId) -> Self {
        Self {
            id,
            product_name: String::new(),
            description: String::new(),
            vendor: String::new(),
            qty: 0.0,
            unit_price: 0.0,
            image: None,
            extra: BTreeMap::new(),
        }
    }

    fn id(&self) -> &LineId {
        &self.id
    }

    fn subtotal(&self) -> f64 {
        or_zero(self.qty) * or_zero(self.unit_price)
    }

    fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    fn with_field(&self, field: &str, value: FieldValue) -> Self {
        let mut line = self.clone();
        match field {
            "id" => {}
            "productName" | "product_name" => line.product_name = value.into_text(),
            "description" => line.description = value.into_text(),
            "vendor" => line.vendor = value.into_text(),
            "qty" => line.qty = value.as_number(),
            "unitPrice" | "unit_price" => line.unit_price = value.as_number(),
            "image" => {
                let image = value.into_text();
                line.image = (!image.is_empty()).then_some(image);
            }
            other => {
                line.extra.insert(other.to_string(), value.into_text());
            }
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub id: LineId,
    pub product: String,
    pub description: String,
    /// Ledger account label, e.g. `400000 Product Sales`.
    pub account: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// Percentage text such as `15%`.
    pub taxes: String,
    /// Percent, nominally 0 to 100. Not clamped.
    pub discount: f64,
    pub extra: BTreeMap<String, String>,
}

impl InvoiceLine {
    pub fn tax_rate(&self) -> f64 {
        parse_tax_rate(&self.taxes)
    }

    pub fn tax_amount(&self) -> f64 {
        self.subtotal() * self.tax_rate() / 100.0
    }
}

impl LineItem for InvoiceLine {
    fn blank(id: LineId) -> Self {
        Self {
            id,
            product: String::new(),
            description: String::new(),
            account: String::new(),
            quantity: 1.0,
            unit_price: 0.0,
            taxes: "15%".to_string(),
            discount: 0.0,
            extra: BTreeMap::new(),
        }
    }

    fn id(&self) -> &LineId {
        &self.id
    }

    fn subtotal(&self) -> f64 {
        or_zero(self.quantity) * or_zero(self.unit_price) * (1.0 - or_zero(self.discount) / 100.0)
    }

    fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    fn with_field(&self, field: &str, value: FieldValue) -> Self {
        let mut line = self.clone();
        match field {
            "id" => {}
            "product" | "productName" | "product_name" => line.product = value.into_text(),
            "description" => line.description = value.into_text(),
            "account" => line.account = value.into_text(),
            "quantity" => line.quantity = value.as_number(),
            "unitPrice" | "unit_price" => line.unit_price = value.as_number(),
            "taxes" => line.taxes = value.into_text(),
            "discount" => line.discount = value.as_number(),
            other => {
                line.extra.insert(other.to_string(), value.into_text());
            }
        }
        line
    }
}
