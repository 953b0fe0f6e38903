use octopus_schema::Schema;
use tracing::debug;

use crate::Format;
use crate::codec::Decoder;
use crate::error::CodecResult;
use crate::sheet::{self, Grid, META_SHEET, Sheet};

/// Reads a workbook with a `Meta` sheet and one sheet per group.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxDecoder;

impl XlsxDecoder {
    /// Build a schema from an already-read grid.
    pub fn decode_grid(&self, grid: &Grid) -> Schema {
        let mut schema = Schema::new();

        if let Some(meta) = grid.sheet(META_SHEET) {
            read_meta(meta, &mut schema);
        }

        for sheet in grid.sheets.iter().filter(|s| s.name != META_SHEET) {
            let tables = sheet::parse_sheet(sheet);
            debug!("sheet '{}': {} tables", sheet.name, tables.len());
            schema.tables.extend(tables);
        }

        schema
    }
}

fn read_meta(sheet: &Sheet, schema: &mut Schema) {
    for row in 0..sheet.rows.len() {
        let value = sheet.value(row, 1).to_string();
        match sheet.value(row, 0) {
            "author" => schema.author = value,
            "name" => schema.name = value,
            "version" => schema.version = value,
            _ => {}
        }
    }
}

impl Decoder for XlsxDecoder {
    fn format(&self) -> Format {
        Format::Xlsx
    }

    fn decode(&self, source: &[u8]) -> CodecResult<Schema> {
        let grid = sheet::io::read_workbook(source)?;
        Ok(self.decode_grid(&grid))
    }
}
