use super::errors::DomainError;
use super::line::LineItem;

/// User-defined columns appended to an order or invoice, in display order.
/// Names need not be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomColumns(Vec<String>);

impl CustomColumns {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Appends a column. The name is trimmed and must not be blank.
    pub fn push(&mut self, name: &str) -> Result<(), DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "Custom column name must not be empty".to_string(),
            ));
        }
        self.0.push(name.to_string());
        Ok(())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One cell per column for `line`.
    pub fn cells<L: LineItem>(&self, line: &L) -> Vec<ColumnCell> {
        self.0
            .iter()
            .map(|column| ColumnCell {
                column: column.clone(),
                value: line.extra().get(column).cloned(),
            })
            .collect()
    }
}

/// A rendered custom-column cell: the stored value, or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCell {
    pub column: String,
    pub value: Option<String>,
}

impl ColumnCell {
    /// What a table shows: the value if present, else the column name as a
    /// placeholder.
    pub fn display(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.column)
    }
}
