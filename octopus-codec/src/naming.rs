//! Naming rules shared by every code-generating encoder.

use convert_case::{Case, Casing};
use inflector::string::pluralize::to_plural;

use octopus_schema::{Column, PrefixMapper, Table};

/// Synthesizes class and field names from table and column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namer {
    remove_prefixes: Vec<String>,
    prefix_mapper: PrefixMapper,
}

impl Namer {
    /// Create a namer with no prefix rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table-name prefixes stripped before PascalCase conversion.
    pub fn with_remove_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_prefixes = prefixes
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.trim().is_empty())
            .collect();
        self
    }

    /// Set the group-to-prefix mapping.
    pub fn with_prefix_mapper(mut self, prefix_mapper: PrefixMapper) -> Self {
        self.prefix_mapper = prefix_mapper;
        self
    }

    /// Get the configured remove-prefix list.
    pub fn remove_prefixes(&self) -> &[String] {
        &self.remove_prefixes
    }

    /// Class/type name for a table.
    ///
    /// An explicit `class_name` wins. Otherwise each configured prefix is
    /// stripped once, in order, the rest is PascalCased and the group prefix
    /// from the mapper is prepended.
    pub fn class_name(&self, table: &Table) -> String {
        if let Some(class_name) = table.class_name.as_deref().filter(|n| !n.is_empty()) {
            return class_name.to_string();
        }

        let mut name = table.name.as_str();
        for prefix in &self.remove_prefixes {
            name = name.strip_prefix(prefix.as_str()).unwrap_or(name);
        }

        format!(
            "{}{}",
            self.prefix_mapper.get_prefix(&table.group),
            name.to_case(Case::Pascal)
        )
    }

    /// Field name for a column (lowerCamelCase).
    pub fn field_name(&self, column: &Column) -> String {
        lower_camel(&column.name)
    }

    /// English plural of a word.
    pub fn plural(&self, word: &str) -> String {
        to_plural(word)
    }
}

/// Convert to lowerCamelCase.
pub fn lower_camel(name: &str) -> String {
    name.to_case(Case::Camel)
}

/// Convert to PascalCase.
pub fn pascal(name: &str) -> String {
    name.to_case(Case::Pascal)
}
