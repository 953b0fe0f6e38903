//! # octopus-codec
//!
//! Decoders, encoders and the format registry for octopus-db-tools.
//!
//! Every external representation goes through the canonical
//! [`Schema`](octopus_schema::Schema): a [`Decoder`] builds it from artifact
//! bytes, an [`Encoder`] renders it into one or more [`GeneratedFile`]s.
//! Nothing here touches the filesystem.
//!
//! ```rust
//! use octopus_codec::{EncodeOptions, Format, Registry};
//!
//! let registry = Registry::with_builtin();
//! let source = br#"{"tables": [{"name": "user", "columns": [{"name": "id", "type": "long", "pk": true}]}]}"#;
//! let file = registry
//!     .convert(Format::Octopus, source, Format::Protobuf, &EncodeOptions::new())
//!     .unwrap();
//! assert!(file.as_text().contains("message User {"));
//! ```

pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod naming;
pub mod options;
pub mod registry;
pub mod sheet;

pub use codec::{Decoder, Encoder, GeneratedFile};
pub use error::{CodecError, CodecResult};
pub use format::Format;
pub use naming::Namer;
pub use options::{EncodeOptions, TableFilter};
pub use registry::Registry;
