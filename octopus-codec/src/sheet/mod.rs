//! Spreadsheet support shared by the xlsx decoder and encoder.
//!
//! [`Grid`] is the plain in-memory workbook. [`io`] moves it to and from
//! workbook bytes and [`grammar`] turns group sheets into tables.

pub mod grammar;
mod grid;
pub mod io;

pub use grammar::{Polarity, SheetContext, SheetRow, SheetState, Transition, parse_rows, parse_sheet};
pub use grid::{Cell, CellStyle, Grid, Sheet};

/// Name of the sheet holding author, name and version.
pub const META_SHEET: &str = "Meta";

/// Sheet used for tables without a group.
pub const DEFAULT_GROUP_SHEET: &str = "Common";
