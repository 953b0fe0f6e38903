//! DDL generation for the supported SQL dialects.

use octopus_schema::{Column, ColumnType, Schema, Table};
use tracing::warn;

use crate::Format;
use crate::codec::{Encoder, GeneratedFile, single_document};
use crate::error::CodecResult;
use crate::options::EncodeOptions;

/// SQL dialect of the generated DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlDialect {
    MySql,
    PostgreSql,
    Sqlite,
    SqlServer,
}

impl SqlDialect {
    /// Every dialect.
    pub const ALL: [SqlDialect; 4] = [Self::MySql, Self::PostgreSql, Self::Sqlite, Self::SqlServer];

    /// The format identifier for this dialect.
    pub fn format(&self) -> Format {
        match self {
            Self::MySql => Format::SqlMysql,
            Self::PostgreSql => Format::SqlPostgresql,
            Self::Sqlite => Format::SqlSqlite3,
            Self::SqlServer => Format::SqlSqlserver,
        }
    }

    /// Quote an identifier.
    pub fn quote(&self, ident: &str) -> String {
        match self {
            Self::MySql => format!("`{}`", ident),
            Self::PostgreSql | Self::Sqlite => format!("\"{}\"", ident),
            Self::SqlServer => format!("[{}]", ident),
        }
    }

    fn text_type(&self) -> &'static str {
        match self {
            Self::MySql | Self::PostgreSql | Self::Sqlite => "TEXT",
            Self::SqlServer => "NVARCHAR(MAX)",
        }
    }

    /// Column type. Unknown types fall back to the dialect's text type.
    pub fn sql_type(&self, column: &Column) -> String {
        let size = column.size;
        match (&column.column_type, self) {
            (ColumnType::Other(raw), _) => {
                warn!("unknown column type: '{}', column: {}", raw, column.name);
                self.text_type().to_string()
            }

            (ColumnType::String, Self::MySql) => format!("VARCHAR({})", if size > 0 { size } else { 255 }),
            (ColumnType::String, Self::PostgreSql) if size > 0 => format!("VARCHAR({})", size),
            (ColumnType::String, Self::SqlServer) if size > 0 => format!("NVARCHAR({})", size),
            (ColumnType::String | ColumnType::Text, _) => self.text_type().to_string(),

            (ColumnType::Long, Self::Sqlite) | (ColumnType::Int, Self::Sqlite) => "INTEGER".into(),
            (ColumnType::Long, _) => "BIGINT".into(),
            (ColumnType::Int, Self::PostgreSql) => "INTEGER".into(),
            (ColumnType::Int, _) => "INT".into(),

            (ColumnType::Float, Self::MySql) => "FLOAT".into(),
            (ColumnType::Float, _) => "REAL".into(),
            (ColumnType::Double, Self::MySql) => "DOUBLE".into(),
            (ColumnType::Double, Self::PostgreSql) => "DOUBLE PRECISION".into(),
            (ColumnType::Double, Self::Sqlite) => "REAL".into(),
            (ColumnType::Double, Self::SqlServer) => "FLOAT".into(),

            (ColumnType::Decimal, Self::Sqlite) => "NUMERIC".into(),
            (ColumnType::Decimal, _) => {
                let name = if *self == Self::PostgreSql { "NUMERIC" } else { "DECIMAL" };
                match (column.size, column.scale) {
                    (0, _) => name.to_string(),
                    (p, 0) => format!("{}({})", name, p),
                    (p, s) => format!("{}({},{})", name, p, s),
                }
            }

            (ColumnType::Boolean, Self::MySql) => "TINYINT(1)".into(),
            (ColumnType::Boolean, Self::PostgreSql) => "BOOLEAN".into(),
            (ColumnType::Boolean, Self::Sqlite) => "INTEGER".into(),
            (ColumnType::Boolean, Self::SqlServer) => "BIT".into(),

            (ColumnType::Date, _) => "DATE".into(),
            (ColumnType::Time, _) => "TIME".into(),
            (ColumnType::DateTime, Self::PostgreSql) => "TIMESTAMP".into(),
            (ColumnType::DateTime, Self::SqlServer) => "DATETIME2".into(),
            (ColumnType::DateTime, _) => "DATETIME".into(),

            (ColumnType::Blob, Self::PostgreSql) => "BYTEA".into(),
            (ColumnType::Blob, Self::SqlServer) => "VARBINARY(MAX)".into(),
            (ColumnType::Blob, _) => "BLOB".into(),
        }
    }

    /// Render a default value literal.
    fn default_literal(&self, column: &Column, value: &str) -> String {
        if column.column_type.is_boolean() {
            let on = matches!(value.trim().to_lowercase().as_str(), "true" | "1");
            return match (self, on) {
                (Self::MySql | Self::PostgreSql, true) => "TRUE".into(),
                (Self::MySql | Self::PostgreSql, false) => "FALSE".into(),
                (_, true) => "1".into(),
                (_, false) => "0".into(),
            };
        }
        if column.column_type.is_string_like() && !is_quoted(value) {
            return quote_literal(value);
        }
        value.to_string()
    }
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'')
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Writes `CREATE TABLE` statements for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct SqlEncoder {
    dialect: SqlDialect,
}

impl SqlEncoder {
    /// Create an encoder for a dialect.
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    /// Get the dialect.
    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Render the DDL for every filtered table.
    pub fn render(&self, schema: &Schema, options: &EncodeOptions) -> String {
        let statements: Vec<String> = options.tables(schema).map(|t| self.create_table(t)).collect();
        let mut out = statements.join("\n\n");
        out.push('\n');
        out
    }

    /// Generate the statements for one table.
    fn create_table(&self, table: &Table) -> String {
        let d = self.dialect;
        let inline_pk = self.inline_primary_key(table);
        let mut definitions: Vec<String> = table
            .columns
            .iter()
            .map(|column| {
                let inline = inline_pk.is_some_and(|pk| std::ptr::eq(pk, column));
                self.column_definition(column, inline)
            })
            .collect();

        // Primary key constraint
        let pk_cols: Vec<String> = table.primary_keys().iter().map(|c| d.quote(&c.name)).collect();
        if !pk_cols.is_empty() && inline_pk.is_none() {
            definitions.push(format!("PRIMARY KEY ({})", pk_cols.join(", ")));
        }

        // Unique constraints
        for column in table.unique_keys() {
            definitions.push(format!("UNIQUE ({})", d.quote(&column.name)));
        }

        // Foreign keys
        for column in table.referencing_columns() {
            if let Some(reference) = &column.reference {
                definitions.push(format!(
                    "FOREIGN KEY ({}) REFERENCES {} ({})",
                    d.quote(&column.name),
                    d.quote(&reference.table),
                    d.quote(&reference.column)
                ));
            }
        }

        let mut sql = format!(
            "CREATE TABLE {} (\n    {}\n)",
            d.quote(&table.name),
            definitions.join(",\n    ")
        );

        let description = table.description.trim();
        if d == SqlDialect::MySql && !description.is_empty() {
            sql.push_str(&format!(" COMMENT = {}", quote_literal(description)));
        }
        sql.push(';');

        if d == SqlDialect::PostgreSql {
            sql.push_str(&self.comment_statements(table));
        }

        sql
    }

    /// SQLite only accepts AUTOINCREMENT on an inline `INTEGER PRIMARY KEY`.
    fn inline_primary_key<'a>(&self, table: &'a Table) -> Option<&'a Column> {
        if self.dialect != SqlDialect::Sqlite {
            return None;
        }
        match table.primary_keys().as_slice() {
            [pk] if pk.auto_incremental => Some(*pk),
            _ => None,
        }
    }

    /// Generate column definition.
    fn column_definition(&self, column: &Column, inline_pk: bool) -> String {
        let d = self.dialect;
        let mut sql_type = d.sql_type(column);
        let mut parts = vec![d.quote(&column.name)];

        if inline_pk {
            parts.push("INTEGER PRIMARY KEY AUTOINCREMENT".to_string());
            return parts.join(" ");
        }

        if column.auto_incremental && d == SqlDialect::PostgreSql {
            // Replace type with SERIAL variants
            match sql_type.as_str() {
                "INTEGER" => sql_type = "SERIAL".to_string(),
                "BIGINT" => sql_type = "BIGSERIAL".to_string(),
                _ => {}
            }
        }
        parts.push(sql_type);

        if column.auto_incremental && d == SqlDialect::SqlServer {
            parts.push("IDENTITY(1,1)".to_string());
        }

        if !column.nullable {
            parts.push("NOT NULL".to_string());
        }

        if column.auto_incremental && d == SqlDialect::MySql {
            parts.push("AUTO_INCREMENT".to_string());
        }

        if let Some(value) = column.default_value.as_deref().filter(|v| !v.is_empty()) {
            parts.push(format!("DEFAULT {}", d.default_literal(column, value)));
        }

        let description = column.description.trim();
        if d == SqlDialect::MySql && !description.is_empty() {
            parts.push(format!("COMMENT {}", quote_literal(description)));
        }

        parts.join(" ")
    }

    fn comment_statements(&self, table: &Table) -> String {
        let d = self.dialect;
        let mut out = String::new();

        let description = table.description.trim();
        if !description.is_empty() {
            out.push_str(&format!(
                "\nCOMMENT ON TABLE {} IS {};",
                d.quote(&table.name),
                quote_literal(description)
            ));
        }
        for column in &table.columns {
            let description = column.description.trim();
            if !description.is_empty() {
                out.push_str(&format!(
                    "\nCOMMENT ON COLUMN {}.{} IS {};",
                    d.quote(&table.name),
                    d.quote(&column.name),
                    quote_literal(description)
                ));
            }
        }
        out
    }
}

impl Encoder for SqlEncoder {
    fn format(&self) -> Format {
        self.dialect.format()
    }

    fn encode(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<GeneratedFile>> {
        let text = self.render(schema, options);
        Ok(single_document(schema, self.dialect.format(), text.into_bytes()))
    }
}
