//! Workbook bytes <-> [`Grid`].

use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format as CellFormat, FormatAlign, FormatBorder, Workbook,
};
use tracing::debug;

use super::grid::{Cell, CellStyle, Grid, Sheet};
use crate::error::{CodecError, CodecResult};

const DEFAULT_FONT_NAME: &str = "Verdana";
const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Creation date stamped into every workbook so equal grids give equal bytes.
const CREATION_DATE: (u16, u8, u8) = (2000, 1, 1);

/// Read every sheet of a workbook into a grid, in workbook order.
///
/// Cell positions are absolute: leading empty rows and columns are kept.
pub fn read_workbook(bytes: &[u8]) -> CodecResult<Grid> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let mut grid = Grid::new();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let mut sheet = Sheet::new(name);

        if let Some((first_row, first_col)) = range.start() {
            sheet.rows.extend((0..first_row).map(|_| Vec::new()));
            for row in range.rows() {
                let mut cells: Vec<Cell> = (0..first_col).map(|_| Cell::default()).collect();
                cells.extend(row.iter().map(|data| Cell::plain(cell_text(data))));
                sheet.push_row(cells);
            }
        }

        debug!("read sheet '{}' with {} rows", sheet.name, sheet.rows.len());
        grid.sheets.push(sheet);
    }

    Ok(grid)
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

/// Render a grid as workbook bytes.
///
/// The output depends on the grid alone: document properties carry a fixed
/// creation date instead of the current time.
pub fn write_workbook(grid: &Grid) -> CodecResult<Vec<u8>> {
    check_sheet_names(grid)?;

    let styles = StyleBook::new();
    let mut workbook = Workbook::new();

    let (year, month, day) = CREATION_DATE;
    let created = ExcelDateTime::from_ymd(year, month, day)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    for sheet in &grid.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, width) in sheet.widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
        if sheet.frozen {
            worksheet.set_freeze_panes(1, 2)?;
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if cell.is_blank() {
                    continue;
                }
                let (row_num, col_num) = (row_idx as u32, col_idx as u16);
                match (styles.get(cell.style), cell.value.is_empty()) {
                    (Some(format), true) => {
                        worksheet.write_blank(row_num, col_num, format)?;
                    }
                    (Some(format), false) => {
                        worksheet.write_string_with_format(row_num, col_num, &cell.value, format)?;
                    }
                    (None, _) => {
                        worksheet.write_string(row_num, col_num, &cell.value)?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn check_sheet_names(grid: &Grid) -> CodecResult<()> {
    let mut seen = HashSet::new();
    for sheet in &grid.sheets {
        if !seen.insert(sheet.name.to_lowercase()) {
            return Err(CodecError::DuplicateSheet {
                name: sheet.name.clone(),
            });
        }
    }
    Ok(())
}

/// Concrete formats for each [`CellStyle`].
struct StyleBook {
    formats: HashMap<CellStyle, CellFormat>,
}

impl StyleBook {
    fn new() -> Self {
        let base = CellFormat::new()
            .set_font_name(DEFAULT_FONT_NAME)
            .set_font_size(DEFAULT_FONT_SIZE);
        let light_border = base
            .clone()
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(0xB2B2B2));
        let bold_box = base
            .clone()
            .set_bold()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let mut formats = HashMap::new();
        formats.insert(CellStyle::Meta, base.clone());
        formats.insert(
            CellStyle::Header,
            bold_box.clone().set_background_color(Color::RGB(0xCCFFCC)),
        );
        formats.insert(
            CellStyle::Table,
            bold_box.set_background_color(Color::RGB(0xCCFFFF)),
        );
        formats.insert(
            CellStyle::TableDescription,
            light_border
                .clone()
                .set_background_color(Color::RGB(0xFFFBCC))
                .set_align(FormatAlign::VerticalCenter),
        );
        formats.insert(
            CellStyle::Normal,
            light_border.clone().set_align(FormatAlign::VerticalCenter),
        );
        formats.insert(
            CellStyle::Flag,
            light_border
                .clone()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
        );
        formats.insert(
            CellStyle::Reference,
            light_border
                .set_font_size(8)
                .set_italic()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
        );

        Self { formats }
    }

    fn get(&self, style: CellStyle) -> Option<&CellFormat> {
        self.formats.get(&style)
    }
}
