//! Top-level schema definition.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::Table;

/// A complete canonical schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Tables in source order; the order is significant for output.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set author, name and version.
    pub fn with_meta(
        mut self,
        author: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.author = author.into();
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Add a table to the schema.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Get a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Distinct table groups in first-seen order.
    pub fn groups(&self) -> Vec<&str> {
        self.tables
            .iter()
            .map(|t| t.group.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tables belonging to one group, in source order.
    pub fn tables_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Table> + 'a {
        self.tables.iter().filter(move |t| t.group == group)
    }
}

/// Schema statistics for debugging/info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaStats {
    /// Number of tables.
    pub table_count: usize,
    /// Number of groups.
    pub group_count: usize,
    /// Total number of columns across all tables.
    pub column_count: usize,
    /// Number of columns carrying a reference.
    pub reference_count: usize,
}

impl Schema {
    /// Get statistics about the schema.
    pub fn stats(&self) -> SchemaStats {
        SchemaStats {
            table_count: self.tables.len(),
            group_count: self.groups().len(),
            column_count: self.tables.iter().map(|t| t.columns.len()).sum(),
            reference_count: self
                .tables
                .iter()
                .map(|t| t.referencing_columns().count())
                .sum(),
        }
    }
}

impl std::fmt::Display for SchemaStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tables, {} groups, {} columns, {} references",
            self.table_count, self.group_count, self.column_count, self.reference_count
        )
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Schema({})", self.stats())
    }
}
