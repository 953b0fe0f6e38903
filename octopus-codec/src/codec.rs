//! Decoder and encoder traits.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use octopus_schema::Schema;

use crate::Format;
use crate::error::CodecResult;
use crate::options::EncodeOptions;

/// Turns one external artifact format into a canonical [`Schema`].
pub trait Decoder: Send + Sync {
    /// The format this decoder reads.
    fn format(&self) -> Format;

    /// Decode an artifact.
    ///
    /// Fails only when the artifact itself is unreadable; unrecognized
    /// column types are normalized, never rejected.
    fn decode(&self, source: &[u8]) -> CodecResult<Schema>;
}

/// Turns a canonical [`Schema`] into one external artifact format.
pub trait Encoder: Send + Sync {
    /// The format this encoder writes.
    fn format(&self) -> Format;

    /// Encode a schema into one or more files, relative to the destination.
    fn encode(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<GeneratedFile>>;
}

/// A file produced by an encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    /// File contents.
    pub contents: Vec<u8>,
}

impl GeneratedFile {
    /// Create a file from raw bytes.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Create a text file.
    pub fn text(path: impl Into<PathBuf>, contents: String) -> Self {
        Self::new(path, contents.into_bytes())
    }

    /// Get the path relative to the output directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Contents decoded as UTF-8, lossily.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }
}

/// Base file name for single-document outputs: the schema name or `schema`.
pub(crate) fn document_stem(schema: &Schema) -> &str {
    let name = schema.name.trim();
    if name.is_empty() { "schema" } else { name }
}

/// Single document named after the schema with the format's extension.
pub(crate) fn single_document(schema: &Schema, format: Format, contents: Vec<u8>) -> Vec<GeneratedFile> {
    let path = format!("{}.{}", document_stem(schema), format.extension());
    vec![GeneratedFile::new(path, contents)]
}
