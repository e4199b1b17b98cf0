//! Column and row abstractions for the generic table

/// A table column: `key` is looked up on each row, `label` is the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Anything that can be shown as a table row
pub trait TableRow {
    /// Stable identity of the row
    fn row_key(&self) -> &str;

    /// Cell text for a column key; unknown keys render empty
    fn cell(&self, column_key: &str) -> Option<&str>;
}

/// Text shown when a table has no rows
pub const EMPTY_TABLE_TEXT: &str = "No hay datos disponibles";
