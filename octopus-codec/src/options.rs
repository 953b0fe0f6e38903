//! Target configuration handed to every encoder.

use std::sync::Arc;

use octopus_schema::{PrefixMapper, Schema, Table};

use crate::naming::Namer;

/// Predicate deciding whether a table takes part in the output.
pub type TableFilter = Arc<dyn Fn(&Table) -> bool + Send + Sync>;

/// Options shared by all encoders.
#[derive(Clone, Default)]
pub struct EncodeOptions {
    /// Target namespace (Kotlin package, proto package).
    pub package: String,
    /// Go import path for `option go_package`.
    pub go_package: String,
    /// Spreadsheet nullability column polarity: write `not null` instead of `nullable`.
    pub use_not_null_column: bool,
    /// Class and field naming rules.
    pub namer: Namer,
    table_filter: Option<TableFilter>,
}

impl std::fmt::Debug for EncodeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodeOptions")
            .field("package", &self.package)
            .field("go_package", &self.go_package)
            .field("use_not_null_column", &self.use_not_null_column)
            .field("namer", &self.namer)
            .field("table_filter", &self.table_filter.is_some())
            .finish()
    }
}

impl EncodeOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target package.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Set the Go package.
    pub fn with_go_package(mut self, go_package: impl Into<String>) -> Self {
        self.go_package = go_package.into();
        self
    }

    /// Set the prefixes stripped from table names.
    pub fn with_remove_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namer = self.namer.with_remove_prefixes(prefixes);
        self
    }

    /// Set the group-to-prefix mapping.
    pub fn with_prefix_mapper(mut self, prefix_mapper: PrefixMapper) -> Self {
        self.namer = self.namer.with_prefix_mapper(prefix_mapper);
        self
    }

    /// Write the spreadsheet nullability column as `not null`.
    pub fn with_not_null_column(mut self, use_not_null_column: bool) -> Self {
        self.use_not_null_column = use_not_null_column;
        self
    }

    /// Install a table predicate.
    pub fn with_table_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Table) -> bool + Send + Sync + 'static,
    {
        self.table_filter = Some(Arc::new(filter));
        self
    }

    /// Keep only tables whose group is listed. An empty list keeps everything.
    pub fn with_groups<I, S>(self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let groups: Vec<String> = groups
            .into_iter()
            .map(Into::into)
            .filter(|g: &String| !g.trim().is_empty())
            .collect();
        if groups.is_empty() {
            return self;
        }
        self.with_table_filter(move |table| groups.iter().any(|g| *g == table.group))
    }

    /// Check if a table passes the filter.
    pub fn includes(&self, table: &Table) -> bool {
        self.table_filter.as_ref().is_none_or(|filter| filter(table))
    }

    /// Tables of a schema that pass the filter, in source order.
    pub fn tables<'a>(&'a self, schema: &'a Schema) -> impl Iterator<Item = &'a Table> + 'a {
        schema.tables.iter().filter(move |table| self.includes(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_schema() -> Schema {
        let mut schema = Schema::new();
        schema.add_table(Table::new("user").with_group("common"));
        schema.add_table(Table::new("order").with_group("shop"));
        schema.add_table(Table::new("role").with_group("common"));
        schema
    }

    fn names<'a>(options: &'a EncodeOptions, schema: &'a Schema) -> Vec<&'a str> {
        options.tables(schema).map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let schema = make_schema();
        let options = EncodeOptions::new();
        assert_eq!(names(&options, &schema), vec!["user", "order", "role"]);
    }

    #[test]
    fn test_group_filter() {
        let schema = make_schema();
        let options = EncodeOptions::new().with_groups(["common"]);
        assert_eq!(names(&options, &schema), vec!["user", "role"]);
    }

    #[test]
    fn test_empty_group_list_keeps_everything() {
        let schema = make_schema();
        let options = EncodeOptions::new().with_groups(Vec::<String>::new());
        assert_eq!(names(&options, &schema).len(), 3);
    }

    #[test]
    fn test_custom_filter() {
        let schema = make_schema();
        let options = EncodeOptions::new().with_table_filter(|t| t.name.starts_with('o'));
        assert_eq!(names(&options, &schema), vec!["order"]);
    }

    #[test]
    fn test_debug_hides_closure() {
        let options = EncodeOptions::new().with_table_filter(|_| true);
        assert!(format!("{:?}", options).contains("table_filter: true"));
    }
}
