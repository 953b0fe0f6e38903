//! CLI command implementations.

pub mod convert;
pub mod create;
pub mod generate;
pub mod version;

use std::path::{Path, PathBuf};

use octopus_codec::{EncodeOptions, GeneratedFile};
use octopus_schema::PrefixMapper;

use crate::cli::TargetArgs;
use crate::config::GenerateConfig;
use crate::error::CliResult;
use crate::output;

/// Merge flags (and their environment variables) over the config file.
pub fn encode_options(args: &TargetArgs, config: &GenerateConfig) -> EncodeOptions {
    let package = args.package.clone().or_else(|| config.package.clone());
    let go_package = args.go_package.clone().or_else(|| config.go_package.clone());
    let prefix = args.prefix.clone().or_else(|| config.prefix.clone());
    let remove_prefix = if args.remove_prefix.is_empty() {
        &config.remove_prefix
    } else {
        &args.remove_prefix
    };
    let groups = if args.groups.is_empty() {
        &config.groups
    } else {
        &args.groups
    };

    EncodeOptions::new()
        .with_package(package.unwrap_or_default())
        .with_go_package(go_package.unwrap_or_default())
        .with_remove_prefixes(remove_prefix.iter().map(|p| p.trim().to_string()))
        .with_prefix_mapper(PrefixMapper::parse(prefix.as_deref().unwrap_or_default()))
        .with_groups(groups.iter().map(|g| g.trim().to_string()))
        .with_not_null_column(args.not_null || config.not_null)
}

/// Create a directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> CliResult<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)?;
    output::mkdir(dir);
    Ok(())
}

/// Write generated files under `dir`, creating parent directories.
pub fn write_files(dir: &Path, files: &[GeneratedFile]) -> CliResult<Vec<PathBuf>> {
    ensure_dir(dir)?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(file.path());
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        std::fs::write(&path, &file.contents)?;
        output::write(&path);
        written.push(path);
    }
    Ok(written)
}
