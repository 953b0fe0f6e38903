use octopus_schema::{Column, Schema, Table};
use tracing::warn;

use crate::Format;
use crate::codec::{Encoder, GeneratedFile, single_document};
use crate::error::CodecResult;
use crate::options::EncodeOptions;

/// Writes dbdiagram.io markup (DBML).
#[derive(Debug, Clone, Copy, Default)]
pub struct DbmlEncoder;

fn note(text: &str) -> String {
    format!("'{}'", text.replace('\'', "\\'"))
}

fn default_setting(column: &Column, value: &str) -> String {
    if column.column_type.is_boolean() || column.column_type.is_numeric() {
        format!("default: {}", value)
    } else {
        format!("default: {}", note(value))
    }
}

/// Unknown types are written as their raw token.
fn column_line(column: &Column) -> String {
    if column.column_type.is_unknown() {
        warn!("unknown column type: '{}', column: {}", column.column_type, column.name);
    }

    let mut settings = Vec::new();
    if column.primary_key {
        settings.push("pk".to_string());
    }
    if column.auto_incremental {
        settings.push("increment".to_string());
    }
    if column.unique_key {
        settings.push("unique".to_string());
    }
    if !column.nullable && !column.primary_key {
        settings.push("not null".to_string());
    }
    if let Some(value) = column.default_value.as_deref().filter(|v| !v.is_empty()) {
        settings.push(default_setting(column, value));
    }
    let description = column.description.trim();
    if !description.is_empty() {
        settings.push(format!("note: {}", note(description)));
    }

    let mut line = format!("  {} {}", column.name, column.type_token());
    if !settings.is_empty() {
        line.push_str(&format!(" [{}]", settings.join(", ")));
    }
    line
}

fn table_block(table: &Table) -> String {
    let mut lines = vec![format!("Table {} {{", table.name)];
    lines.extend(table.columns.iter().map(column_line));

    let description = table.description.trim();
    if !description.is_empty() {
        lines.push(String::new());
        lines.push(format!("  Note: {}", note(description)));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

impl DbmlEncoder {
    /// Render the markup.
    pub fn render(&self, schema: &Schema, options: &EncodeOptions) -> String {
        let mut blocks: Vec<String> = Vec::new();
        let mut refs = Vec::new();

        for table in options.tables(schema) {
            blocks.push(table_block(table));
            for column in table.referencing_columns() {
                if let Some(reference) = &column.reference {
                    refs.push(format!(
                        "Ref: {}.{} > {}.{}",
                        table.name, column.name, reference.table, reference.column
                    ));
                }
            }
        }

        if !refs.is_empty() {
            blocks.push(refs.join("\n"));
        }

        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }
}

impl Encoder for DbmlEncoder {
    fn format(&self) -> Format {
        Format::DbdiagramIo
    }

    fn encode(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<GeneratedFile>> {
        let text = self.render(schema, options);
        Ok(single_document(schema, Format::DbdiagramIo, text.into_bytes()))
    }
}
