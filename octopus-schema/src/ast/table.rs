//! Table definitions for the canonical schema.

use serde::{Deserialize, Serialize};

use super::Column;

/// A table (maps to one generated class/type/message).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Source identifier, e.g. a snake_case database table name.
    pub name: String,
    /// Optional override for the generated type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, rename = "desc", skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Logical namespace tag.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a new empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: None,
            description: String::new(),
            group: String::new(),
            columns: Vec::new(),
        }
    }

    /// Set the group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the class name override. An empty name clears it.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        self.class_name = (!class_name.is_empty()).then_some(class_name);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a column.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append a column.
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get the primary key column(s).
    pub fn primary_keys(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.primary_key).collect()
    }

    /// Get the unique key column(s).
    pub fn unique_keys(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.unique_key).collect()
    }

    /// Get the columns carrying a foreign key reference.
    pub fn referencing_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.reference.is_some())
    }
}
