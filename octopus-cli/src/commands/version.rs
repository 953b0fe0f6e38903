//! `oct version` command - Display version information.

use octopus_codec::Format;

use crate::error::CliResult;
use crate::output::{self, kv};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the version command
pub fn run() -> CliResult<()> {
    output::header("Octopus DB Tools");

    kv("Version", VERSION);
    kv("Binary", NAME);

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);

    output::newline();

    output::section("Components");
    kv("octopus-schema", env!("CARGO_PKG_VERSION"));
    kv("octopus-codec", env!("CARGO_PKG_VERSION"));

    output::newline();
    output::section("Formats");
    let formats: Vec<&str> = Format::ALL.iter().map(Format::as_str).collect();
    output::dim(&format!("  {}", formats.join(", ")));

    Ok(())
}
