//! `oct generate` command - Generate source files from a schema.

use octopus_codec::{Format, Registry};

use crate::cli::GenerateArgs;
use crate::commands::{encode_options, write_files};
use crate::config::Config;
use crate::error::CliResult;
use crate::output;

/// Run the generate command
pub fn run(args: GenerateArgs) -> CliResult<()> {
    let registry = Registry::with_builtin();

    let source_format = Format::resolve(args.formats.source_format.as_deref(), &args.source)?;
    let target_format = Format::resolve(args.formats.target_format.as_deref(), &args.target_dir)?;
    registry.check_conversion(source_format, target_format)?;

    let config = Config::load_from_dir(&std::env::current_dir()?)?;
    let options = encode_options(&args.target_options, &config.generate);

    let source = std::fs::read(&args.source)?;
    let schema = registry.decode(source_format, &source)?;
    let files = registry.encode(target_format, &schema, &options)?;

    let written = write_files(&args.target_dir, &files)?;
    output::success(&format!("Generated {} files ({})", written.len(), target_format));

    Ok(())
}
