//! Error types for decoding, encoding and format dispatch.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use octopus_schema::SchemaError;

use crate::Format;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while resolving formats or running a codec.
#[derive(Error, Debug, Diagnostic)]
pub enum CodecError {
    /// I/O failure while producing or consuming an artifact.
    #[error("I/O error: {0}")]
    #[diagnostic(code(octopus::codec::io))]
    Io(#[from] std::io::Error),

    /// The octopus JSON document could not be read or written.
    #[error("invalid octopus document: {0}")]
    #[diagnostic(code(octopus::codec::json))]
    Json(#[from] serde_json::Error),

    /// The workbook container is unreadable.
    #[error("failed to read workbook: {0}")]
    #[diagnostic(code(octopus::codec::xlsx_read))]
    XlsxRead(#[from] calamine::XlsxError),

    /// The workbook could not be rendered.
    #[error("failed to write workbook: {0}")]
    #[diagnostic(code(octopus::codec::xlsx_write))]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Two sheets of a workbook would share a name.
    #[error("sheet name `{name}` is used more than once")]
    #[diagnostic(
        code(octopus::codec::duplicate_sheet),
        help("sheet names are compared case-insensitively and `Meta` is reserved; rename the group")
    )]
    DuplicateSheet { name: String },

    /// A format identifier is not in the supported vocabulary.
    #[error("unsupported format `{name}` (supported: {supported})")]
    #[diagnostic(
        code(octopus::codec::unsupported_format),
        help("pass one of the supported identifiers with --sourceFormat/--targetFormat")
    )]
    UnsupportedFormat { name: String, supported: String },

    /// The format could not be inferred from a file name.
    #[error("cannot infer format from `{path}`")]
    #[diagnostic(
        code(octopus::codec::unknown_extension),
        help("set the format explicitly with --sourceFormat/--targetFormat")
    )]
    UnknownExtension { path: String },

    /// The format exists but cannot be used in the requested direction.
    #[error("format `{format}` cannot be used as a {direction}")]
    #[diagnostic(code(octopus::codec::unsupported_conversion))]
    UnsupportedConversion { format: Format, direction: String },

    /// The decoded document violates structural invariants.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),
}

impl CodecError {
    /// Create an unsupported format error listing the known identifiers.
    pub fn unsupported_format(name: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            name: name.into(),
            supported: Format::ALL
                .iter()
                .map(Format::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create an unsupported conversion error.
    pub fn unsupported_conversion(format: Format, direction: impl Into<String>) -> Self {
        Self::UnsupportedConversion {
            format,
            direction: direction.into(),
        }
    }
}
