//! Column definitions for the canonical schema.

use serde::{Deserialize, Serialize};

use super::{ColumnType, format_type, parse_type};

/// A foreign key target, identified by table and column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced table name.
    pub table: String,
    /// Referenced column name.
    pub column: String,
}

impl Reference {
    /// Create a new reference.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Parse a `table.column` pair. Anything else is not a reference.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(table), Some(column), None) if !table.is_empty() && !column.is_empty() => {
                Some(Self::new(table, column))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Canonical type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// String length or numeric precision; 0 means unspecified.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: u32,
    /// Decimal fractional digits; 0 means unspecified.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub scale: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    #[serde(default, rename = "pk", skip_serializing_if = "is_false")]
    pub primary_key: bool,
    #[serde(default, rename = "unique", skip_serializing_if = "is_false")]
    pub unique_key: bool,
    #[serde(default, rename = "autoInc", skip_serializing_if = "is_false")]
    pub auto_incremental: bool,
    /// Raw, format-specific default literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, rename = "desc", skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Foreign key target.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Column {
    /// Create a new non-nullable column with no size.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            size: 0,
            scale: 0,
            nullable: false,
            primary_key: false,
            unique_key: false,
            auto_incremental: false,
            default_value: None,
            description: String::new(),
            reference: None,
        }
    }

    /// Create a column from a free-form type token such as `varchar(100)`.
    pub fn parsed(name: impl Into<String>, token: &str) -> Self {
        let (column_type, size, scale) = parse_type(token);
        Self::new(name, column_type).with_size(size, scale)
    }

    /// Set size and scale.
    pub fn with_size(mut self, size: u32, scale: u32) -> Self {
        self.size = size;
        self.scale = scale;
        self
    }

    /// Mark as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark as primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark as unique key.
    pub fn unique(mut self) -> Self {
        self.unique_key = true;
        self
    }

    /// Mark as auto incremental.
    pub fn auto_incremental(mut self) -> Self {
        self.auto_incremental = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the foreign key target.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Render the type with its size and scale, e.g. `decimal(20,5)`.
    pub fn type_token(&self) -> String {
        format_type(&self.column_type, self.size, self.scale)
    }

    /// Check if the column carries an explicit, non-empty default.
    pub fn has_default(&self) -> bool {
        self.default_value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.type_token())?;
        if self.nullable {
            write!(f, "?")?;
        }
        if self.primary_key {
            write!(f, " @id")?;
        }
        if self.unique_key {
            write!(f, " @unique")?;
        }
        if self.auto_incremental {
            write!(f, " @auto")?;
        }
        Ok(())
    }
}
