//! Canonical column types and the type normalizer.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Canonical column types shared by every decoder and encoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    /// Bounded character string (maps to VARCHAR).
    String,
    /// 64-bit integer (maps to BIGINT).
    Long,
    /// 32-bit integer (maps to INT).
    Int,
    /// Single precision floating point.
    Float,
    /// Double precision floating point.
    Double,
    /// Boolean flag.
    Boolean,
    /// Unbounded text.
    Text,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time.
    DateTime,
    /// Binary large object.
    Blob,
    /// Exact numeric carrying precision (`size`) and scale.
    Decimal,
    /// A token the normalizer does not recognize, kept verbatim (lower-cased).
    Other(SmolStr),
}

impl ColumnType {
    /// Every canonical variant, in vocabulary order.
    pub const CANONICAL: [ColumnType; 12] = [
        Self::String,
        Self::Long,
        Self::Int,
        Self::Float,
        Self::Double,
        Self::Boolean,
        Self::Text,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::Blob,
        Self::Decimal,
    ];

    /// Resolve a bare type name (no size suffix) against the alias table.
    ///
    /// Never fails: unknown names come back as [`ColumnType::Other`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "string" | "varchar" | "nvarchar" | "char" | "nchar" | "character varying" => {
                Self::String
            }
            "text" | "longtext" | "mediumtext" | "tinytext" | "clob" => Self::Text,
            "long" | "bigint" | "int8" => Self::Long,
            "int" | "integer" | "smallint" | "tinyint" | "mediumint" | "int4" => Self::Int,
            "float" | "real" => Self::Float,
            "double" | "double precision" | "number" => Self::Double,
            "decimal" | "numeric" => Self::Decimal,
            "boolean" | "bool" => Self::Boolean,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" | "timestamp" => Self::DateTime,
            "blob" | "binary" | "varbinary" | "bytea" | "longblob" => Self::Blob,
            _ => Self::Other(SmolStr::new(name)),
        }
    }

    /// Get the canonical type name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Long => "long",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Blob => "blob",
            Self::Decimal => "decimal",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Check if this type is boolean-like.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean)
    }

    /// Check if this type is numeric-like.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Long | Self::Int | Self::Float | Self::Double | Self::Decimal
        )
    }

    /// Check if this type is temporal-like.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::DateTime)
    }

    /// Check if this type holds character data.
    pub fn is_string_like(&self) -> bool {
        matches!(self, Self::String | Self::Text)
    }

    /// Check if this type is a fractional number.
    pub fn is_decimal_like(&self) -> bool {
        matches!(self, Self::Decimal | Self::Float | Self::Double)
    }

    /// Check if this type fell through the alias table.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ColumnType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for ColumnType {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        column_type.as_str().to_string()
    }
}

/// Parse a free-form type token into `(type, size, scale)`.
///
/// The token is split on its first `(`; the parenthesized suffix is split on
/// `,` and the first two numbers become size and scale. Malformed or
/// non-numeric suffixes read as zero. This function never fails.
pub fn parse_type(token: &str) -> (ColumnType, u32, u32) {
    let token = token.trim();
    let (name, suffix) = match token.split_once('(') {
        Some((name, rest)) => (name, rest.strip_suffix(')').unwrap_or(rest)),
        None => (token, ""),
    };

    let mut numbers = suffix.split(',').map(|part| part.trim().parse::<u32>().ok());
    let size = numbers.next().flatten().unwrap_or(0);
    let scale = if size > 0 {
        numbers.next().flatten().unwrap_or(0)
    } else {
        0
    };

    let column_type = match ColumnType::from_name(name) {
        ColumnType::Other(raw) if raw == "bit" && size <= 1 => ColumnType::Boolean,
        other => other,
    };

    if column_type.is_boolean() {
        return (column_type, 0, 0);
    }

    (column_type, size, scale)
}

/// Render a type token, the inverse of [`parse_type`].
pub fn format_type(column_type: &ColumnType, size: u32, scale: u32) -> String {
    match (size, scale) {
        (0, _) => column_type.to_string(),
        (size, 0) => format!("{}({})", column_type, size),
        (size, scale) => format!("{}({},{})", column_type, size, scale),
    }
}
