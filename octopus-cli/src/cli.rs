//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Octopus - database schema converter
#[derive(Parser, Debug)]
#[command(name = "oct")]
#[command(version)]
#[command(about = "Octopus - convert database schema descriptions between formats", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a template octopus schema file
    Create(CreateArgs),

    /// Convert a schema file into another single-document format
    Convert(ConvertArgs),

    /// Generate source files from a schema into a directory
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Display version information
    Version,
}

/// Arguments for the `create` command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// File to create
    #[arg(default_value = "db.ojson")]
    pub filename: PathBuf,
}

/// Arguments for the `convert` command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source schema file
    pub source: PathBuf,

    /// Target file
    pub target: PathBuf,

    #[command(flatten)]
    pub formats: FormatArgs,

    #[command(flatten)]
    pub target_options: TargetArgs,
}

/// Arguments for the `generate` command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source schema file
    pub source: PathBuf,

    /// Output directory
    pub target_dir: PathBuf,

    #[command(flatten)]
    pub formats: FormatArgs,

    #[command(flatten)]
    pub target_options: TargetArgs,
}

/// Source and target format selection; inferred from file extensions when absent
#[derive(Args, Debug, Default)]
pub struct FormatArgs {
    /// Source format identifier
    #[arg(long = "sourceFormat", visible_alias = "sf", env = "OCTOPUS_SOURCE_FORMAT")]
    pub source_format: Option<String>,

    /// Target format identifier
    #[arg(long = "targetFormat", visible_alias = "tf", env = "OCTOPUS_TARGET_FORMAT")]
    pub target_format: Option<String>,
}

/// Options handed to the encoder
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Target package (Kotlin package, proto package)
    #[arg(long = "package", short = 'p', env = "OCTOPUS_PACKAGE")]
    pub package: Option<String>,

    /// Go import path for protobuf `option go_package`
    #[arg(long = "goPackage", env = "OCTOPUS_GO_PACKAGE")]
    pub go_package: Option<String>,

    /// Table name prefixes to strip, comma separated
    #[arg(
        long = "removePrefix",
        visible_alias = "rp",
        env = "OCTOPUS_REMOVE_PREFIX",
        value_delimiter = ','
    )]
    pub remove_prefix: Vec<String>,

    /// Class name prefix per group, e.g. `common:C,admin:A`
    #[arg(long = "prefix", env = "OCTOPUS_PREFIX")]
    pub prefix: Option<String>,

    /// Only include tables of these groups, comma separated
    #[arg(long = "groups", env = "OCTOPUS_GROUPS", value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Write the spreadsheet nullability column as `not null`
    #[arg(long = "notNull", env = "OCTOPUS_USE_NOT_NULL_COLUMN")]
    pub not_null: bool,
}
