use octopus_schema::{Column, Schema, Table};
use tracing::warn;

use crate::Format;
use crate::codec::{Encoder, GeneratedFile, single_document};
use crate::error::CodecResult;
use crate::options::EncodeOptions;

/// Writes an entity-relationship diagram in PlantUML.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantumlEncoder;

/// Unknown types are written as their raw token.
fn column_line(column: &Column) -> String {
    if column.column_type.is_unknown() {
        warn!("unknown column type: '{}', column: {}", column.column_type, column.name);
    }

    let mut line = String::from("  ");
    if !column.nullable {
        line.push_str("* ");
    }
    line.push_str(&format!("{} : {}", column.name, column.type_token()));

    if column.primary_key {
        line.push_str(" <<PK>>");
    }
    if column.unique_key {
        line.push_str(" <<UK>>");
    }
    if column.reference.is_some() {
        line.push_str(" <<FK>>");
    }
    if column.auto_incremental {
        line.push_str(" <<AI>>");
    }
    line
}

fn entity(table: &Table) -> Vec<String> {
    let mut lines = Vec::new();
    match table.description.trim() {
        "" => lines.push(format!("entity {} {{", table.name)),
        description => lines.push(format!("entity \"{}\\n{}\" as {} {{", table.name, description, table.name)),
    }

    let (keys, others): (Vec<&Column>, Vec<&Column>) = table.columns.iter().partition(|c| c.primary_key);
    lines.extend(keys.iter().map(|c| column_line(c)));
    if !keys.is_empty() && !others.is_empty() {
        lines.push("  --".to_string());
    }
    lines.extend(others.iter().map(|c| column_line(c)));

    lines.push("}".to_string());
    lines
}

impl PlantumlEncoder {
    /// Render the diagram.
    pub fn render(&self, schema: &Schema, options: &EncodeOptions) -> String {
        let mut lines = vec!["@startuml".to_string(), String::new()];
        let mut relations = Vec::new();

        for table in options.tables(schema) {
            lines.extend(entity(table));
            lines.push(String::new());

            for column in table.referencing_columns() {
                if let Some(reference) = &column.reference {
                    relations.push(format!("{} }}o--|| {} : {}", table.name, reference.table, column.name));
                }
            }
        }

        if !relations.is_empty() {
            lines.extend(relations);
            lines.push(String::new());
        }
        lines.push("@enduml".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Encoder for PlantumlEncoder {
    fn format(&self) -> Format {
        Format::Plantuml
    }

    fn encode(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<GeneratedFile>> {
        let text = self.render(schema, options);
        Ok(single_document(schema, Format::Plantuml, text.into_bytes()))
    }
}
