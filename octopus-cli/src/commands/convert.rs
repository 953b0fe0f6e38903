//! `oct convert` command - Convert a schema file into another format.

use octopus_codec::{CodecError, Format, Registry};

use crate::cli::ConvertArgs;
use crate::commands::{encode_options, ensure_dir};
use crate::config::Config;
use crate::error::CliResult;
use crate::output;

/// Run the convert command
pub fn run(args: ConvertArgs) -> CliResult<()> {
    let registry = Registry::with_builtin();

    // Resolve formats before touching any file
    let source_format = Format::resolve(args.formats.source_format.as_deref(), &args.source)?;
    let target_format = Format::resolve(args.formats.target_format.as_deref(), &args.target)?;
    registry.check_conversion(source_format, target_format)?;
    if !target_format.is_single_document() {
        return Err(CodecError::unsupported_conversion(target_format, "single-document target").into());
    }

    let config = Config::load_from_dir(&std::env::current_dir()?)?;
    let options = encode_options(&args.target_options, &config.generate);

    tracing::debug!("convert {} -> {}", source_format, target_format);
    let source = std::fs::read(&args.source)?;
    let file = registry.convert(source_format, &source, target_format, &options)?;

    if let Some(parent) = args.target.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(&args.target, &file.contents)?;
    output::write(&args.target);

    Ok(())
}
