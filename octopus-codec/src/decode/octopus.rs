use octopus_schema::{Schema, validate_schema};
use tracing::debug;

use crate::Format;
use crate::codec::Decoder;
use crate::error::CodecResult;

/// Reads the canonical JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct OctopusDecoder;

impl Decoder for OctopusDecoder {
    fn format(&self) -> Format {
        Format::Octopus
    }

    fn decode(&self, source: &[u8]) -> CodecResult<Schema> {
        let mut schema: Schema = serde_json::from_slice(source)?;
        normalize_scale(&mut schema);
        debug!("decoded octopus document: {}", schema.stats());
        Ok(validate_schema(schema)?)
    }
}

/// A scale without a size has no type token spelling; drop it.
fn normalize_scale(schema: &mut Schema) {
    let columns = schema.tables.iter_mut().flat_map(|t| t.columns.iter_mut());
    for column in columns.filter(|c| c.size == 0 && c.scale != 0) {
        debug!("column {}: scale {} ignored without a size", column.name, column.scale);
        column.scale = 0;
    }
}
