//! `oct create` command - Write a template octopus schema.

use octopus_codec::EncodeOptions;
use octopus_codec::encode::OctopusEncoder;
use octopus_schema::{Column, ColumnType, Schema, Table};

use crate::cli::CreateArgs;
use crate::commands::ensure_dir;
use crate::error::{CliError, CliResult};
use crate::output;

/// Template written for new files
pub fn template() -> Schema {
    let mut schema = Schema::new().with_meta("", "database", "0.0.1");
    schema.add_table(
        Table::new("user")
            .with_group("common")
            .with_description("registered user")
            .with_column(
                Column::new("id", ColumnType::Long)
                    .primary_key()
                    .auto_incremental(),
            )
            .with_column(Column::parsed("name", "string(100)").unique())
            .with_column(Column::new("created_at", ColumnType::DateTime))
            .with_column(Column::new("updated_at", ColumnType::DateTime).nullable()),
    );
    schema
}

/// Run the create command
pub fn run(args: CreateArgs) -> CliResult<()> {
    if args.filename.exists() {
        return Err(CliError::Command(format!(
            "{} already exists",
            args.filename.display()
        )));
    }

    let bytes = OctopusEncoder.to_vec(&template(), &EncodeOptions::new())?;
    if let Some(parent) = args.filename.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(&args.filename, bytes)?;
    output::write(&args.filename);

    Ok(())
}
