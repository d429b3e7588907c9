//! In-memory editing of an order or invoice line grid.
//!
//! A worksheet owns its line collection and custom columns exclusively. Every
//! edit replaces the affected line with a new value; totals are recomputed
//! from the lines whenever they are asked for.

use crate::domain::columns::{ColumnCell, CustomColumns};
use crate::domain::errors::DomainError;
use crate::domain::line::{
    self, FieldValue, InvoiceLine, LineId, LineIdGenerator, LineItem, OrderLine,
};

pub type OrderSheet = Worksheet<OrderLine>;
pub type InvoiceSheet = Worksheet<InvoiceLine>;

/// One user action on the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum WorksheetEdit<L> {
    AddLine,
    UpdateField {
        line_id: LineId,
        field: String,
        value: FieldValue,
    },
    /// Replace the line with the same id, or append it.
    UpsertLine(L),
    DeleteLine { line_id: LineId },
    AddCustomColumn { name: String },
}

/// A line as the grid renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetRow<'a, L> {
    pub line: &'a L,
    pub subtotal: f64,
    pub cells: Vec<ColumnCell>,
}

#[derive(Debug)]
pub struct Worksheet<L: LineItem> {
    lines: Vec<L>,
    columns: CustomColumns,
    ids: LineIdGenerator,
}

impl<L: LineItem> Worksheet<L> {
    pub fn new(lines: Vec<L>, columns: CustomColumns) -> Self {
        let mut ids = LineIdGenerator::new();
        for line in &lines {
            ids.observe(line.id());
        }
        Self {
            lines,
            columns,
            ids,
        }
    }

    pub fn lines(&self) -> &[L] {
        &self.lines
    }

    pub fn custom_columns(&self) -> &CustomColumns {
        &self.columns
    }

    /// Appends a blank line and returns its id.
    pub fn add_line(&mut self) -> LineId {
        let id = self.ids.next_id();
        self.lines.push(L::blank(id.clone()));
        id
    }

    pub fn update_line(
        &mut self,
        id: &LineId,
        field: &str,
        value: FieldValue,
    ) -> Result<(), DomainError> {
        let slot = self
            .lines
            .iter_mut()
            .find(|line| line.id() == id)
            .ok_or(DomainError::NotFound)?;
        *slot = line::update_field(slot, field, value);
        Ok(())
    }

    pub fn upsert_line(&mut self, line: L) {
        self.ids.observe(line.id());
        match self.lines.iter_mut().find(|existing| existing.id() == line.id()) {
            Some(slot) => *slot = line,
            None => self.lines.push(line),
        }
    }

    pub fn delete_line(&mut self, id: &LineId) {
        self.lines = line::delete_line(std::mem::take(&mut self.lines), id);
    }

    pub fn add_custom_column(&mut self, name: &str) -> Result<(), DomainError> {
        self.columns.push(name)
    }

    pub fn apply(&mut self, edit: WorksheetEdit<L>) -> Result<(), DomainError> {
        match edit {
            WorksheetEdit::AddLine => {
                self.add_line();
            }
            WorksheetEdit::UpdateField {
                line_id,
                field,
                value,
            } => self.update_line(&line_id, &field, value)?,
            WorksheetEdit::UpsertLine(line) => self.upsert_line(line),
            WorksheetEdit::DeleteLine { line_id } => self.delete_line(&line_id),
            WorksheetEdit::AddCustomColumn { name } => self.add_custom_column(&name)?,
        }
        Ok(())
    }

    /// Applies `edits` in order, stopping at the first one that fails.
    pub fn apply_all(
        &mut self,
        edits: impl IntoIterator<Item = WorksheetEdit<L>>,
    ) -> Result<(), DomainError> {
        edits.into_iter().try_for_each(|edit| self.apply(edit))
    }

    pub fn rows(&self) -> Vec<WorksheetRow<'_, L>> {
        self.lines
            .iter()
            .map(|line| WorksheetRow {
                line,
                subtotal: line.subtotal(),
                cells: self.columns.cells(line),
            })
            .collect()
    }

    pub fn into_parts(self) -> (Vec<L>, CustomColumns) {
        (self.lines, self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregation::{aggregate_invoice, order_total};

    fn seeded_order() -> OrderSheet {
        let first = OrderLine {
            product_name: "hh".to_string(),
            vendor: "3,Administrator".to_string(),
            ..OrderLine::blank(LineId::new("1"))
        };
        Worksheet::new(vec![first], CustomColumns::default())
    }

    #[test]
    fn added_lines_get_fresh_ids() {
        let mut sheet = seeded_order();
        let a = sheet.add_line();
        sheet.delete_line(&a);
        let b = sheet.add_line();

        assert_ne!(a, b);
        assert_ne!(b, LineId::new("1"));
        assert_eq!(sheet.lines().len(), 2);
    }

    #[test]
    fn invoice_lines_start_with_default_tax() {
        let mut sheet = InvoiceSheet::new(Vec::new(), CustomColumns::default());
        let id = sheet.add_line();
        let line = &sheet.lines()[0];
        assert_eq!(line.id, id);
        assert_eq!(line.quantity, 1.0);
        assert_eq!(line.taxes, "15%");
    }

    #[test]
    fn edits_recompute_totals() {
        let mut sheet = seeded_order();
        let id = LineId::new("1");
        sheet.update_line(&id, "qty", FieldValue::Number(3.0)).unwrap();
        sheet.update_line(&id, "unitPrice", "12.5".into()).unwrap();

        assert_eq!(order_total(sheet.lines()), 37.5);
        assert_eq!(sheet.rows()[0].subtotal, 37.5);
    }

    #[test]
    fn updating_unknown_line_fails() {
        let mut sheet = seeded_order();
        let err = sheet
            .update_line(&LineId::new("nope"), "qty", FieldValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[test]
    fn upsert_replaces_or_appends() {
        let mut sheet = seeded_order();
        let replacement = OrderLine {
            qty: 2.0,
            unit_price: 5.0,
            ..OrderLine::blank(LineId::new("1"))
        };
        sheet.upsert_line(replacement);
        assert_eq!(sheet.lines().len(), 1);
        assert_eq!(sheet.lines()[0].qty, 2.0);

        sheet.upsert_line(OrderLine::blank(LineId::new("2")));
        assert_eq!(sheet.lines().len(), 2);
    }

    #[test]
    fn rows_render_custom_columns() {
        let mut sheet = seeded_order();
        sheet.add_custom_column("Color").unwrap();
        sheet.add_custom_column("Size").unwrap();
        sheet
            .update_line(&LineId::new("1"), "Color", "Red".into())
            .unwrap();

        let rows = sheet.rows();
        let shown: Vec<&str> = rows[0].cells.iter().map(ColumnCell::display).collect();
        assert_eq!(shown, ["Red", "Size"]);
    }

    #[test]
    fn apply_all_replays_a_session() {
        let mut sheet = InvoiceSheet::new(Vec::new(), CustomColumns::default());
        sheet
            .apply_all([
                WorksheetEdit::AddCustomColumn {
                    name: "Batch".to_string(),
                },
                WorksheetEdit::UpsertLine(InvoiceLine {
                    unit_price: 1000.0,
                    ..InvoiceLine::blank(LineId::new("10"))
                }),
                WorksheetEdit::AddLine,
                WorksheetEdit::UpdateField {
                    line_id: LineId::new("10"),
                    field: "Batch".to_string(),
                    value: "B-7".into(),
                },
            ])
            .unwrap();

        let new_id = sheet.lines()[1].id.clone();
        sheet
            .apply(WorksheetEdit::DeleteLine { line_id: new_id })
            .unwrap();

        let totals = aggregate_invoice(sheet.lines());
        assert_eq!(totals.total, 1150.0);
        assert_eq!(sheet.custom_columns().names(), ["Batch".to_string()]);
        assert_eq!(sheet.rows()[0].cells[0].value.as_deref(), Some("B-7"));
    }

    #[test]
    fn failing_edit_stops_the_replay() {
        let mut sheet = seeded_order();
        let result = sheet.apply_all([
            WorksheetEdit::AddCustomColumn { name: " ".to_string() },
            WorksheetEdit::AddLine,
        ]);
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(sheet.lines().len(), 1);
    }
}
