//! I/O-independent spreadsheet grid.

/// Visual role of a cell; mapped to a concrete workbook format on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellStyle {
    /// No formatting.
    #[default]
    Plain,
    /// Meta sheet key/value.
    Meta,
    /// Group sheet header row.
    Header,
    /// Table name cell.
    Table,
    /// Table description cell.
    TableDescription,
    /// Left-aligned column cell.
    Normal,
    /// Centered flag cell (key, nullability).
    Flag,
    /// Reference cell.
    Reference,
}

/// A single cell value with its style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub value: String,
    pub style: CellStyle,
}

impl Cell {
    /// Create a styled cell.
    pub fn new(value: impl Into<String>, style: CellStyle) -> Self {
        Self {
            value: value.into(),
            style,
        }
    }

    /// Create an unstyled cell.
    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(value, CellStyle::Plain)
    }

    /// Check if the cell carries neither a value nor a style.
    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && self.style == CellStyle::Plain
    }
}

/// One worksheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
    /// Column widths in character units, by column index.
    pub widths: Vec<f64>,
    /// Freeze the header row and the first two columns.
    pub frozen: bool,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Trimmed text of a cell, empty when the cell is absent.
    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|c| c.value.trim())
            .unwrap_or("")
    }
}

/// A workbook as a list of sheets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    pub sheets: Vec<Sheet>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
