//! Structural validation of a canonical schema.
//!
//! This module checks invariants that every encoder relies on:
//! - Table and column names are non-empty
//! - No duplicate table names
//! - No duplicate column names within a table
//!
//! Dangling references are reported as warnings only.

use std::collections::HashSet;

use tracing::warn;

use crate::ast::*;
use crate::error::{SchemaError, SchemaResult};

/// Schema validator for structural checks.
#[derive(Debug)]
pub struct Validator {
    /// Collected validation errors.
    errors: Vec<SchemaError>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Validate a schema and return it unchanged, or every problem found.
    pub fn validate(&mut self, schema: Schema) -> SchemaResult<Schema> {
        self.errors.clear();

        let mut seen = HashSet::new();
        for table in &schema.tables {
            if table.name.trim().is_empty() {
                self.errors
                    .push(SchemaError::invalid_table(&table.name, "table name is empty"));
            } else if !seen.insert(table.name.as_str()) {
                self.errors.push(SchemaError::duplicate("table", &table.name));
            }
            self.validate_table(table);
        }

        self.check_references(&schema);

        if self.errors.is_empty() {
            Ok(schema)
        } else {
            let errors = std::mem::take(&mut self.errors);
            Err(SchemaError::ValidationFailed {
                count: errors.len(),
                errors,
            })
        }
    }

    fn validate_table(&mut self, table: &Table) {
        let mut seen = HashSet::new();
        for column in &table.columns {
            if column.name.trim().is_empty() {
                self.errors.push(SchemaError::invalid_column(
                    &table.name,
                    &column.name,
                    "column name is empty",
                ));
            } else if !seen.insert(column.name.as_str()) {
                self.errors.push(SchemaError::duplicate(
                    "column",
                    format!("{}.{}", table.name, column.name),
                ));
            }
        }
    }

    fn check_references(&self, schema: &Schema) {
        for table in &schema.tables {
            for column in table.referencing_columns() {
                let Some(reference) = &column.reference else {
                    continue;
                };
                let resolved = schema
                    .table(&reference.table)
                    .is_some_and(|t| t.column(&reference.column).is_some());
                if !resolved {
                    warn!(
                        "column {}.{} references unknown column {}",
                        table.name, column.name, reference
                    );
                }
            }
        }
    }
}

/// Validate a schema with a fresh [`Validator`].
pub fn validate_schema(schema: Schema) -> SchemaResult<Schema> {
    Validator::new().validate(schema)
}
