//! The closed vocabulary of artifact formats.

use std::path::Path;

use crate::error::{CodecError, CodecResult};

/// Every format identifier understood by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Canonical JSON document (`*.ojson`).
    Octopus,
    /// Spreadsheet workbook, one sheet per group.
    Xlsx,
    /// GraphQL schema definition.
    Graphql,
    /// Protocol buffers (proto3) messages.
    Protobuf,
    /// JPA entity classes in Kotlin, one file per table.
    JpaKotlin,
    /// PlantUML entity-relationship diagram.
    Plantuml,
    /// dbdiagram.io markup (DBML).
    DbdiagramIo,
    /// MySQL DDL.
    SqlMysql,
    /// PostgreSQL DDL.
    SqlPostgresql,
    /// SQLite DDL.
    SqlSqlite3,
    /// SQL Server DDL.
    SqlSqlserver,
}

impl Format {
    /// Every format, in registration order.
    pub const ALL: [Format; 11] = [
        Self::Octopus,
        Self::Xlsx,
        Self::Graphql,
        Self::Protobuf,
        Self::JpaKotlin,
        Self::Plantuml,
        Self::DbdiagramIo,
        Self::SqlMysql,
        Self::SqlPostgresql,
        Self::SqlSqlite3,
        Self::SqlSqlserver,
    ];

    /// Get the format identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Octopus => "octopus",
            Self::Xlsx => "xlsx",
            Self::Graphql => "graphql",
            Self::Protobuf => "protobuf",
            Self::JpaKotlin => "jpa-kotlin",
            Self::Plantuml => "plantuml",
            Self::DbdiagramIo => "dbdiagram.io",
            Self::SqlMysql => "sql-mysql",
            Self::SqlPostgresql => "sql-postgresql",
            Self::SqlSqlite3 => "sql-sqlite3",
            Self::SqlSqlserver => "sql-sqlserver",
        }
    }

    /// Parse a format identifier (case-insensitive).
    pub fn from_name(name: &str) -> CodecResult<Self> {
        let wanted = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| CodecError::unsupported_format(name.trim()))
    }

    /// Infer a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "ojson" | "json" => Some(Self::Octopus),
            "xlsx" => Some(Self::Xlsx),
            "graphqls" | "graphql" => Some(Self::Graphql),
            "proto" => Some(Self::Protobuf),
            "puml" | "plantuml" => Some(Self::Plantuml),
            "dbml" => Some(Self::DbdiagramIo),
            _ => None,
        }
    }

    /// Resolve an explicit identifier, falling back to the file extension.
    pub fn resolve(explicit: Option<&str>, path: &Path) -> CodecResult<Self> {
        match explicit.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => Self::from_name(name),
            None => Self::from_path(path).ok_or_else(|| CodecError::UnknownExtension {
                path: path.display().to_string(),
            }),
        }
    }

    /// Check if the encoder for this format produces exactly one document.
    pub fn is_single_document(&self) -> bool {
        !matches!(self, Self::JpaKotlin)
    }

    /// File extension used for generated documents.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Octopus => "ojson",
            Self::Xlsx => "xlsx",
            Self::Graphql => "graphqls",
            Self::Protobuf => "proto",
            Self::JpaKotlin => "kt",
            Self::Plantuml => "puml",
            Self::DbdiagramIo => "dbml",
            Self::SqlMysql | Self::SqlPostgresql | Self::SqlSqlite3 | Self::SqlSqlserver => "sql",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
