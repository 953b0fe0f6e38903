use indexmap::IndexMap;
use octopus_schema::{Column, Schema, Table};
use tracing::debug;

use crate::Format;
use crate::codec::{Encoder, GeneratedFile, single_document};
use crate::error::CodecResult;
use crate::options::EncodeOptions;
use crate::sheet::{self, Cell, CellStyle, DEFAULT_GROUP_SHEET, Grid, META_SHEET, Polarity, Sheet};

const HEADERS: [&str; 7] = [
    "Table/Reference",
    "Column",
    "Type",
    "Key",
    "", // nullability label, set per polarity
    "Attributes",
    "Description",
];

/// Writes a workbook in the layout the xlsx decoder reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxEncoder;

impl XlsxEncoder {
    /// Lay out the schema as a grid without rendering it.
    pub fn encode_grid(&self, schema: &Schema, options: &EncodeOptions) -> Grid {
        let polarity = if options.use_not_null_column {
            Polarity::NotNull
        } else {
            Polarity::Nullable
        };

        let mut groups: IndexMap<&str, Vec<&Table>> = IndexMap::new();
        for table in options.tables(schema) {
            let sheet_name = match table.group.trim() {
                "" => DEFAULT_GROUP_SHEET,
                group => group,
            };
            groups.entry(sheet_name).or_default().push(table);
        }

        let mut grid = Grid::new();
        grid.sheets.push(meta_sheet(schema));
        for (name, tables) in groups {
            debug!("sheet '{}': {} tables", name, tables.len());
            grid.sheets.push(group_sheet(name, &tables, polarity));
        }
        grid
    }
}

fn meta_sheet(schema: &Schema) -> Sheet {
    let mut sheet = Sheet::new(META_SHEET);
    sheet.widths = vec![10.5, 10.5];
    for (key, value) in [
        ("author", &schema.author),
        ("name", &schema.name),
        ("version", &schema.version),
    ] {
        sheet.push_row(vec![
            Cell::new(key, CellStyle::Meta),
            Cell::new(value.as_str(), CellStyle::Meta),
        ]);
    }
    sheet
}

fn group_sheet(name: &str, tables: &[&Table], polarity: Polarity) -> Sheet {
    let mut sheet = Sheet::new(name);
    sheet.frozen = true;
    sheet.widths = vec![
        18.0,
        13.5,
        9.5,
        4.0,
        if polarity == Polarity::NotNull { 6.0 } else { 4.0 },
        9.5,
        50.0,
    ];

    let mut header = HEADERS;
    header[sheet::grammar::COL_NULLABLE] = polarity.label();
    sheet.push_row(header.iter().map(|h| Cell::new(*h, CellStyle::Header)).collect());

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            sheet.push_row(Vec::new());
        }

        sheet.push_row(vec![
            Cell::new(table.name.as_str(), CellStyle::Table),
            Cell::default(),
            Cell::plain(table.class_name.as_deref().unwrap_or("")),
            Cell::default(),
            Cell::default(),
            Cell::default(),
            Cell::new(table.description.trim(), CellStyle::TableDescription),
        ]);

        for column in &table.columns {
            sheet.push_row(column_row(column, polarity));
        }
    }

    sheet
}

fn column_row(column: &Column, polarity: Polarity) -> Vec<Cell> {
    let reference = match &column.reference {
        Some(reference) => Cell::new(reference.to_string(), CellStyle::Reference),
        None => Cell::default(),
    };
    let key = if column.primary_key {
        "P"
    } else if column.unique_key {
        "U"
    } else {
        ""
    };

    vec![
        reference,
        Cell::new(column.name.as_str(), CellStyle::Normal),
        Cell::new(column.type_token(), CellStyle::Normal),
        Cell::new(key, CellStyle::Flag),
        Cell::new(polarity.mark(column.nullable), CellStyle::Flag),
        Cell::new(attributes(column).join(", "), CellStyle::Normal),
        Cell::new(column.description.trim(), CellStyle::Normal),
    ]
}

fn attributes(column: &Column) -> Vec<String> {
    let mut attributes = Vec::new();
    if column.auto_incremental {
        attributes.push("autoInc".to_string());
    }
    if let Some(default) = column.default_value.as_deref().filter(|v| !v.is_empty()) {
        attributes.push(format!("default:{}", default));
    }
    attributes
}

impl Encoder for XlsxEncoder {
    fn format(&self) -> Format {
        Format::Xlsx
    }

    fn encode(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<GeneratedFile>> {
        let grid = self.encode_grid(schema, options);
        let bytes = sheet::io::write_workbook(&grid)?;
        Ok(single_document(schema, Format::Xlsx, bytes))
    }
}
