//! Group-to-prefix mapping for synthesized class names.

use indexmap::IndexMap;
use tracing::warn;

/// Maps a table group to the prefix prepended to its synthesized class name.
///
/// Built from a configuration string such as `"common:C,admin:A"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMapper {
    prefixes: IndexMap<String, String>,
}

impl PrefixMapper {
    /// Create an empty mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `group:prefix` list separated by commas.
    ///
    /// Entries without a `:` or with an empty group are skipped.
    pub fn parse(config: &str) -> Self {
        let mut mapper = Self::new();
        for entry in config.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once(':') {
                Some((group, prefix)) if !group.trim().is_empty() => {
                    mapper.insert(group.trim(), prefix.trim());
                }
                _ => warn!("ignoring malformed prefix mapping entry: '{}'", entry),
            }
        }
        mapper
    }

    /// Add or replace the prefix for a group.
    pub fn insert(&mut self, group: impl Into<String>, prefix: impl Into<String>) {
        self.prefixes.insert(group.into(), prefix.into());
    }

    /// Get the prefix for a group, or an empty string when unmapped.
    pub fn get_prefix(&self, group: &str) -> &str {
        self.prefixes.get(group).map(String::as_str).unwrap_or("")
    }

    /// Check if no group is mapped.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Number of mapped groups.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }
}

impl std::str::FromStr for PrefixMapper {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
