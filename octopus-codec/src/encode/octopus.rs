use octopus_schema::Schema;

use crate::Format;
use crate::codec::{Encoder, GeneratedFile, single_document};
use crate::error::CodecResult;
use crate::options::EncodeOptions;

/// Writes the canonical JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct OctopusEncoder;

impl OctopusEncoder {
    /// Serialize the filtered schema.
    pub fn to_vec(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<u8>> {
        let filtered = Schema {
            tables: options.tables(schema).cloned().collect(),
            ..schema.clone()
        };
        let mut bytes = serde_json::to_vec_pretty(&filtered)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

impl Encoder for OctopusEncoder {
    fn format(&self) -> Format {
        Format::Octopus
    }

    fn encode(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<GeneratedFile>> {
        let bytes = self.to_vec(schema, options)?;
        Ok(single_document(schema, Format::Octopus, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Decoder;
    use crate::decode::OctopusDecoder;
    use octopus_schema::{Column, ColumnType, Reference, Table};
    use pretty_assertions::assert_eq;

    fn make_schema() -> Schema {
        let mut schema = Schema::new().with_meta("lechuck", "shop", "1.0");
        schema.add_table(
            Table::new("user")
                .with_group("common")
                .with_column(Column::new("id", ColumnType::Long).primary_key().auto_incremental())
                .with_column(Column::parsed("name", "string(100)").unique()),
        );
        schema.add_table(
            Table::new("order")
                .with_group("shop")
                .with_column(
                    Column::new("user_id", ColumnType::Long).with_reference(Reference::new("user", "id")),
                ),
        );
        schema
    }

    #[test]
    fn test_encode_then_decode() {
        let schema = make_schema();
        let files = OctopusEncoder.encode(&schema, &EncodeOptions::new()).unwrap();
        assert_eq!(files[0].path().to_str(), Some("shop.ojson"));
        assert!(files[0].as_text().ends_with("}\n"));

        let decoded = OctopusDecoder.decode(&files[0].contents).unwrap();
        assert_eq!(decoded, schema);
    }

    #[test]
    fn test_compact_keys() {
        let bytes = OctopusEncoder.to_vec(&make_schema(), &EncodeOptions::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"pk\": true"));
        assert!(text.contains("\"autoInc\": true"));
        assert!(text.contains("\"ref\""));
        assert!(!text.contains("\"nullable\""));
    }

    #[test]
    fn test_table_filter_applies() {
        let options = EncodeOptions::new().with_groups(["shop"]);
        let bytes = OctopusEncoder.to_vec(&make_schema(), &options).unwrap();
        let decoded = OctopusDecoder.decode(&bytes).unwrap();
        assert_eq!(decoded.tables.len(), 1);
        assert_eq!(decoded.tables[0].name, "order");
    }
}
