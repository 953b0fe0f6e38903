//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CliResult;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "octopus.toml";

/// Octopus CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Encoder defaults for `convert` and `generate`
    pub generate: GenerateConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `octopus.toml` from a directory, or defaults when it is absent
    pub fn load_from_dir(dir: &Path) -> CliResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Encoder defaults; command-line flags and environment variables win
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Target package
    pub package: Option<String>,

    /// Protobuf Go package
    pub go_package: Option<String>,

    /// Table name prefixes to strip
    pub remove_prefix: Vec<String>,

    /// Group to class-name prefix mapping, `group:prefix,...`
    pub prefix: Option<String>,

    /// Groups to include
    pub groups: Vec<String>,

    /// Spreadsheet nullability column polarity
    pub not_null: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
            [generate]
            package = "com.example"
            go_package = "example/proto"
            remove_prefix = ["tb_"]
            prefix = "common:C"
            groups = ["common"]
            not_null = true
            "#,
        )
        .unwrap();

        assert_eq!(config.generate.package.as_deref(), Some("com.example"));
        assert_eq!(config.generate.go_package.as_deref(), Some("example/proto"));
        assert_eq!(config.generate.remove_prefix, vec!["tb_"]);
        assert_eq!(config.generate.prefix.as_deref(), Some("common:C"));
        assert_eq!(config.generate.groups, vec!["common"]);
        assert!(config.generate.not_null);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.generate, GenerateConfig::default());
    }

    #[test]
    fn test_load_from_dir_without_file() {
        let dir = std::env::temp_dir().join("octopus-cli-no-config-here");
        let config = Config::load_from_dir(&dir).unwrap();
        assert!(config.generate.package.is_none());
    }

    #[test]
    fn test_invalid_config() {
        let err = toml::from_str::<Config>("[generate]\nnot_null = \"maybe\"").unwrap_err();
        let err = crate::error::CliError::from(err);
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
