use octopus_schema::{Column, ColumnType, Schema, Table};
use tracing::warn;

use crate::Format;
use crate::codec::{Encoder, GeneratedFile, single_document};
use crate::error::CodecResult;
use crate::options::EncodeOptions;

const TIMESTAMP_TYPE: &str = "google.protobuf.Timestamp";
const TIMESTAMP_IMPORT: &str = "google/protobuf/timestamp.proto";

/// Writes proto3 messages, one per table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtobufEncoder;

/// One message field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoField {
    pub name: String,
    pub proto_type: String,
    pub number: u32,
}

/// One message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoMessage {
    pub name: String,
    pub fields: Vec<ProtoField>,
}

impl ProtoMessage {
    /// Build the message for a table; fields are numbered from 1.
    pub fn from_table(table: &Table, options: &EncodeOptions) -> Self {
        let fields = table
            .columns
            .iter()
            .zip(1..)
            .map(|(column, number)| ProtoField {
                name: options.namer.field_name(column),
                proto_type: proto_type(column).to_string(),
                number,
            })
            .collect();

        Self {
            name: options.namer.class_name(table),
            fields,
        }
    }

    fn uses_timestamp(&self) -> bool {
        self.fields.iter().any(|f| f.proto_type == TIMESTAMP_TYPE)
    }
}

/// Scalar for a canonical type. Unknown types fall back to `string`.
fn proto_type(column: &Column) -> &'static str {
    match &column.column_type {
        ColumnType::String | ColumnType::Text => "string",
        ColumnType::Long => "int64",
        ColumnType::Int => "int32",
        ColumnType::Float => "float",
        ColumnType::Double | ColumnType::Decimal => "double",
        ColumnType::Boolean => "bool",
        ColumnType::Date | ColumnType::Time | ColumnType::DateTime => TIMESTAMP_TYPE,
        ColumnType::Blob => "bytes",
        ColumnType::Other(raw) => {
            warn!("unknown column type: '{}', column: {}", raw, column.name);
            "string"
        }
    }
}

/// Render a proto3 file. Empty `package`/`go_package` lines are omitted.
pub fn render_proto(messages: &[ProtoMessage], package: &str, go_package: &str) -> String {
    let mut out = String::from("syntax = \"proto3\";\n\n");

    if !package.is_empty() {
        out.push_str(&format!("package {};\n\n", package));
    }
    if !go_package.is_empty() {
        out.push_str(&format!("option go_package = \"{}\";\n\n", go_package));
    }
    if messages.iter().any(ProtoMessage::uses_timestamp) {
        out.push_str(&format!("import \"{}\";\n\n", TIMESTAMP_IMPORT));
    }

    let rendered: Vec<String> = messages
        .iter()
        .map(|message| {
            let mut block = format!("message {} {{\n", message.name);
            for field in &message.fields {
                block.push_str(&format!(
                    "  {} {} = {};\n",
                    field.proto_type, field.name, field.number
                ));
            }
            block.push_str("}\n");
            block
        })
        .collect();
    out.push_str(&rendered.join("\n"));

    out
}

impl ProtobufEncoder {
    /// Render every filtered table into one proto file.
    pub fn render(&self, schema: &Schema, options: &EncodeOptions) -> String {
        let messages: Vec<ProtoMessage> = options
            .tables(schema)
            .map(|table| ProtoMessage::from_table(table, options))
            .collect();
        render_proto(&messages, options.package.trim(), options.go_package.trim())
    }
}

impl Encoder for ProtobufEncoder {
    fn format(&self) -> Format {
        Format::Protobuf
    }

    fn encode(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<GeneratedFile>> {
        let text = self.render(schema, options);
        Ok(single_document(schema, Format::Protobuf, text.into_bytes()))
    }
}
