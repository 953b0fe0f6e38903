//! # Octopus DB Tools
//!
//! Convert database schema descriptions between spreadsheets, SQL dialects,
//! diagram markup, ORM entity sources, GraphQL and protobuf.
//!
//! Every format goes through one canonical [`Schema`]:
//! - A decoder reads an artifact (octopus JSON, xlsx workbook) into a schema
//! - An encoder renders the schema with shared naming rules and a per-format
//!   type table
//! - The [`Registry`] resolves format identifiers and validates conversions
//!
//! ## Quick Start
//!
//! ```rust
//! use octopus::prelude::*;
//!
//! let mut schema = Schema::new().with_meta("lechuck", "shop", "1.0");
//! schema.add_table(
//!     Table::new("common_user")
//!         .with_group("common")
//!         .with_column(Column::new("id", ColumnType::Long).primary_key())
//!         .with_column(Column::parsed("name", "varchar(100)")),
//! );
//!
//! let options = EncodeOptions::new()
//!     .with_remove_prefixes(["common_"])
//!     .with_prefix_mapper(PrefixMapper::parse("common:C"));
//!
//! let files = Registry::with_builtin()
//!     .encode(Format::Graphql, &schema, &options)
//!     .unwrap();
//! assert!(files[0].as_text().contains("type CUser {"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Canonical schema model, type normalizer and prefix mapper.
pub mod schema {
    pub use octopus_schema::*;
}

/// Decoders, encoders and the format registry.
pub mod codec {
    pub use octopus_codec::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::codec::{
        Decoder, EncodeOptions, Encoder, Format, GeneratedFile, Namer, Registry,
    };
    pub use crate::schema::{
        Column, ColumnType, PrefixMapper, Reference, Schema, Table, parse_type,
    };
}

// Re-export key types at the crate root
pub use codec::{CodecError, Format, Registry};
pub use schema::{Schema, SchemaError};
