//! Error types for schema validation.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while validating a canonical schema.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Invalid table definition.
    #[error("invalid table `{name}`: {message}")]
    #[diagnostic(code(octopus::schema::invalid_table))]
    InvalidTable { name: String, message: String },

    /// Invalid column definition.
    #[error("invalid column `{table}.{column}`: {message}")]
    #[diagnostic(code(octopus::schema::invalid_column))]
    InvalidColumn {
        table: String,
        column: String,
        message: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(octopus::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// Validation error with multiple issues.
    #[error("schema validation failed with {count} error(s)")]
    #[diagnostic(code(octopus::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },
}

impl SchemaError {
    /// Create an invalid table error.
    pub fn invalid_table(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTable {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid column error.
    pub fn invalid_column(
        table: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidColumn {
            table: table.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }
}
