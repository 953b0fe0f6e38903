//! Row grammar of a group sheet.
//!
//! A group sheet is a flat list of rows. Row 0 is the header; below it a
//! table starts at a row whose table cell is filled, continues with one row
//! per column and ends at the first row whose column cell is empty. The
//! grammar works on plain strings so it can be exercised without a workbook.

use std::collections::HashSet;

use octopus_schema::{Column, Reference, Table};

use super::grid::Sheet;

pub const COL_TABLE: usize = 0;
pub const COL_COLUMN: usize = 1;
pub const COL_TYPE: usize = 2;
pub const COL_KEY: usize = 3;
pub const COL_NULLABLE: usize = 4;
pub const COL_ATTRIBUTES: usize = 5;
pub const COL_DESCRIPTION: usize = 6;

/// Header label of the nullability column when it records "not nullable".
pub const NOT_NULL_LABEL: &str = "not null";
/// Header label of the nullability column in its default polarity.
pub const NULLABLE_LABEL: &str = "nullable";

const AUTO_INCREMENT_ALIASES: [&str; 4] = ["ai", "autoinc", "auto_inc", "auto_incremental"];

/// What a filled nullability cell means for one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// A filled cell marks the column nullable.
    #[default]
    Nullable,
    /// A filled cell marks the column not nullable.
    NotNull,
}

impl Polarity {
    /// Read the polarity from the header's nullability cell.
    pub fn from_header(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case(NOT_NULL_LABEL) {
            Self::NotNull
        } else {
            Self::Nullable
        }
    }

    /// Interpret a nullability cell.
    pub fn is_nullable(self, cell: &str) -> bool {
        let filled = !cell.trim().is_empty();
        match self {
            Self::Nullable => filled,
            Self::NotNull => !filled,
        }
    }

    /// Cell text that encodes a column's nullability.
    pub fn mark(self, nullable: bool) -> &'static str {
        let filled = match self {
            Self::Nullable => nullable,
            Self::NotNull => !nullable,
        };
        if filled { "O" } else { "" }
    }

    /// Header label for this polarity.
    pub fn label(self) -> &'static str {
        match self {
            Self::Nullable => NULLABLE_LABEL,
            Self::NotNull => NOT_NULL_LABEL,
        }
    }
}

/// One grid row as trimmed cell strings.
#[derive(Debug, Clone, Copy)]
pub struct SheetRow<'a> {
    cells: &'a [&'a str],
}

impl<'a> SheetRow<'a> {
    pub fn new(cells: &'a [&'a str]) -> Self {
        Self { cells }
    }

    fn cell(&self, index: usize) -> &'a str {
        self.cells.get(index).map(|c| c.trim()).unwrap_or("")
    }

    fn table_cell(&self) -> &'a str {
        self.cell(COL_TABLE)
    }

    fn column_cell(&self) -> &'a str {
        self.cell(COL_COLUMN)
    }

    /// A filled table cell. Only column rows read it as a reference.
    fn table_name(&self) -> Option<&'a str> {
        let name = self.table_cell();
        (!name.is_empty()).then_some(name)
    }
}

/// Per-sheet context threaded through every transition.
#[derive(Debug, Clone)]
pub struct SheetContext {
    pub group: String,
    pub polarity: Polarity,
}

/// Parser position within a sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetState {
    /// Waiting for a table row.
    BetweenTables,
    /// Collecting columns of an open table.
    InsideTable(Table),
}

/// Result of feeding one row to the grammar.
#[derive(Debug)]
pub struct Transition {
    pub state: SheetState,
    /// A table completed by this row.
    pub closed: Option<Table>,
}

impl SheetState {
    /// Advance by one row.
    pub fn step(self, row: SheetRow<'_>, ctx: &SheetContext) -> Transition {
        match self {
            Self::BetweenTables => Transition {
                state: open_table(row, ctx).map_or(Self::BetweenTables, Self::InsideTable),
                closed: None,
            },
            Self::InsideTable(mut table) => {
                // the closing row contributes nothing, even a table name
                if row.column_cell().is_empty() {
                    return Transition {
                        state: Self::BetweenTables,
                        closed: Some(table),
                    };
                }
                table.add_column(parse_column(row, ctx.polarity));
                Transition {
                    state: Self::InsideTable(table),
                    closed: None,
                }
            }
        }
    }

    /// Close the table still open at the end of the sheet.
    pub fn finish(self) -> Option<Table> {
        match self {
            Self::BetweenTables => None,
            Self::InsideTable(table) => Some(table),
        }
    }
}

fn open_table(row: SheetRow<'_>, ctx: &SheetContext) -> Option<Table> {
    let name = row.table_name()?;
    Some(
        Table::new(name)
            .with_group(ctx.group.clone())
            .with_class_name(row.cell(COL_TYPE))
            .with_description(row.cell(COL_DESCRIPTION)),
    )
}

/// Parse a column row.
pub fn parse_column(row: SheetRow<'_>, polarity: Polarity) -> Column {
    let mut column = Column::parsed(row.column_cell(), row.cell(COL_TYPE));

    match row.cell(COL_KEY) {
        "P" => column.primary_key = true,
        "U" => column.unique_key = true,
        _ => {}
    }
    column.nullable = polarity.is_nullable(row.cell(COL_NULLABLE));
    column.description = row.cell(COL_DESCRIPTION).to_string();
    column.reference = Reference::parse(row.table_cell());

    let attributes = parse_attributes(row.cell(COL_ATTRIBUTES));
    column.auto_incremental = attributes.auto_incremental;
    column.default_value = attributes.default_value.map(|value| {
        if column.column_type.is_boolean() {
            canonical_boolean(&value).to_string()
        } else {
            value
        }
    });

    column
}

/// Attribute cell contents.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    pub auto_incremental: bool,
    pub default_value: Option<String>,
    /// Remaining lower-cased flags.
    pub flags: HashSet<String>,
}

/// Parse a comma-separated attribute cell.
pub fn parse_attributes(cell: &str) -> Attributes {
    let mut attributes = Attributes::default();

    for token in cell.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some(value) = default_attribute(token) {
            attributes.default_value = (!value.is_empty()).then(|| value.to_string());
            continue;
        }

        let flag = token.to_lowercase();
        if AUTO_INCREMENT_ALIASES.contains(&flag.as_str()) {
            attributes.auto_incremental = true;
        } else {
            attributes.flags.insert(flag);
        }
    }

    attributes
}

fn default_attribute(token: &str) -> Option<&str> {
    let (key, value) = token.split_once(':')?;
    key.trim()
        .eq_ignore_ascii_case("default")
        .then(|| value.trim())
}

fn canonical_boolean(value: &str) -> &'static str {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => "true",
        _ => "false",
    }
}

/// Run the grammar over every row of a group sheet.
pub fn parse_sheet(sheet: &Sheet) -> Vec<Table> {
    let rows: Vec<Vec<&str>> = sheet
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.value.trim()).collect())
        .collect();
    parse_rows(&sheet.name, &rows)
}

/// Run the grammar over plain string rows, the first of which is the header.
pub fn parse_rows(group: &str, rows: &[Vec<&str>]) -> Vec<Table> {
    let Some((header, body)) = rows.split_first() else {
        return Vec::new();
    };

    let ctx = SheetContext {
        group: group.to_string(),
        polarity: Polarity::from_header(SheetRow::new(header).cell(COL_NULLABLE)),
    };

    let mut tables = Vec::new();
    let mut state = SheetState::BetweenTables;
    for row in body {
        let transition = state.step(SheetRow::new(row), &ctx);
        tables.extend(transition.closed);
        state = transition.state;
    }
    tables.extend(state.finish());

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use octopus_schema::ColumnType;
    use pretty_assertions::assert_eq;

    const HEADER: [&str; 7] = [
        "Table/Reference",
        "Column",
        "Type",
        "Key",
        "nullable",
        "Attributes",
        "Description",
    ];

    fn rows(raw: &[&[&'static str]]) -> Vec<Vec<&'static str>> {
        raw.iter().map(|r| r.to_vec()).collect()
    }

    fn ctx() -> SheetContext {
        SheetContext {
            group: "common".into(),
            polarity: Polarity::Nullable,
        }
    }

    #[test]
    fn test_polarity_from_header() {
        assert_eq!(Polarity::from_header("not null"), Polarity::NotNull);
        assert_eq!(Polarity::from_header(" Not Null "), Polarity::NotNull);
        assert_eq!(Polarity::from_header("nullable"), Polarity::Nullable);
        assert_eq!(Polarity::from_header(""), Polarity::Nullable);
    }

    #[test]
    fn test_polarity_interpretation() {
        assert!(Polarity::Nullable.is_nullable("O"));
        assert!(!Polarity::Nullable.is_nullable(""));
        assert!(!Polarity::NotNull.is_nullable("O"));
        assert!(Polarity::NotNull.is_nullable(""));
        assert_eq!(Polarity::NotNull.mark(false), "O");
        assert_eq!(Polarity::Nullable.mark(false), "");
    }

    #[test]
    fn test_step_opens_and_closes() {
        let ctx = ctx();
        let open = ["user", "", "Member", "", "", "", "members"];
        let column = ["", "id", "long", "P", "", "ai", ""];
        let blank = [""; 7];

        let t = SheetState::BetweenTables.step(SheetRow::new(&open), &ctx);
        assert!(t.closed.is_none());
        let SheetState::InsideTable(ref table) = t.state else {
            panic!("expected an open table");
        };
        assert_eq!(table.name, "user");
        assert_eq!(table.class_name.as_deref(), Some("Member"));
        assert_eq!(table.description, "members");
        assert_eq!(table.group, "common");

        let t = t.state.step(SheetRow::new(&column), &ctx);
        let t = t.state.step(SheetRow::new(&blank), &ctx);
        assert_eq!(t.state, SheetState::BetweenTables);
        let closed = t.closed.unwrap();
        assert_eq!(closed.columns.len(), 1);
        assert!(closed.columns[0].primary_key);
        assert!(closed.columns[0].auto_incremental);
    }

    #[test]
    fn test_rows_before_first_table_are_skipped() {
        let ctx = ctx();
        let stray = ["", "orphan", "int", "", "", "", ""];
        let t = SheetState::BetweenTables.step(SheetRow::new(&stray), &ctx);
        assert_eq!(t.state, SheetState::BetweenTables);
        assert!(t.closed.is_none());
    }

    #[test]
    fn test_closing_row_with_table_name_is_consumed() {
        let tables = parse_rows(
            "common",
            &rows(&[
                &HEADER,
                &["user"],
                &["", "id", "long", "P"],
                &["role"],
                &["", "name", "string(50)"],
            ]),
        );
        let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["user"]);
        assert_eq!(tables[0].columns.len(), 1);
    }

    #[test]
    fn test_dotted_table_name_opens_table() {
        let tables = parse_rows(
            "common",
            &rows(&[
                &HEADER,
                &["public.user"],
                &["", "id", "long", "P"],
                &["account.id", "account_id", "long"],
            ]),
        );
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "public.user");
        assert_eq!(tables[0].columns[0].reference, None);
        assert_eq!(
            tables[0].columns[1].reference,
            Some(Reference::new("account", "id"))
        );
    }

    #[test]
    fn test_end_of_sheet_closes_open_table() {
        let tables = parse_rows(
            "common",
            &rows(&[&HEADER, &["user"], &["", "id", "long", "P"]]),
        );
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns.len(), 1);
    }

    #[test]
    fn test_column_row_fields() {
        let tables = parse_rows(
            "shop",
            &rows(&[
                &HEADER,
                &["order", "", "", "", "", "", "orders"],
                &["", "id", "bigint", "P", "", "autoInc", "order id"],
                &["user.id", "user_id", "long", "", "", "", ""],
                &["", "code", "varchar(20)", "U", "", "", ""],
                &["", "amount", "decimal(20,5)", "", "O", "default: 0", ""],
                &["", "paid", "bool", "", "", "default:1", ""],
                &["", "memo", "weird_type", "", "O", "index, Custom", ""],
            ]),
        );
        assert_eq!(tables.len(), 1);
        let columns = &tables[0].columns;

        assert_eq!(columns[0].column_type, ColumnType::Long);
        assert!(columns[0].primary_key && columns[0].auto_incremental);
        assert_eq!(columns[0].description, "order id");

        assert_eq!(columns[1].reference, Some(Reference::new("user", "id")));
        assert!(!columns[1].nullable);

        assert_eq!(columns[2].column_type, ColumnType::String);
        assert_eq!(columns[2].size, 20);
        assert!(columns[2].unique_key);

        assert_eq!((columns[3].size, columns[3].scale), (20, 5));
        assert!(columns[3].nullable);
        assert_eq!(columns[3].default_value.as_deref(), Some("0"));

        assert_eq!(columns[4].column_type, ColumnType::Boolean);
        assert_eq!(columns[4].default_value.as_deref(), Some("true"));

        assert_eq!(columns[5].column_type, ColumnType::Other("weird_type".into()));
    }

    #[test]
    fn test_not_null_header_flips_polarity() {
        let mut header = HEADER;
        header[COL_NULLABLE] = "not null";
        let tables = parse_rows(
            "common",
            &rows(&[
                &header,
                &["user"],
                &["", "id", "long", "P", "O"],
                &["", "nickname", "string", "", ""],
            ]),
        );
        assert!(!tables[0].columns[0].nullable);
        assert!(tables[0].columns[1].nullable);
    }

    #[test]
    fn test_parse_attributes() {
        let attributes = parse_attributes("AI, default:abc , Index,,");
        assert!(attributes.auto_incremental);
        assert_eq!(attributes.default_value.as_deref(), Some("abc"));
        assert!(attributes.flags.contains("index"));

        assert_eq!(parse_attributes("default:").default_value, None);
        assert_eq!(parse_attributes(""), Attributes::default());
        for alias in AUTO_INCREMENT_ALIASES {
            assert!(parse_attributes(alias).auto_incremental, "{}", alias);
        }
    }

    #[test]
    fn test_boolean_default_canonicalized() {
        assert_eq!(canonical_boolean("TRUE"), "true");
        assert_eq!(canonical_boolean("1"), "true");
        assert_eq!(canonical_boolean("no"), "false");
    }

    #[test]
    fn test_empty_sheet() {
        assert!(parse_rows("common", &[]).is_empty());
        assert!(parse_rows("common", &rows(&[&HEADER])).is_empty());
    }
}
