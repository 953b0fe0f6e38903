//! # octopus-schema
//!
//! Canonical schema model for octopus-db-tools.
//!
//! This crate provides:
//! - The format-agnostic [`Schema`] / [`Table`] / [`Column`] / [`Reference`] tree
//! - The type normalizer ([`parse_type`]) and the closed [`ColumnType`] vocabulary
//! - The group-to-prefix [`PrefixMapper`] used when synthesizing class names
//! - Structural validation of a decoded schema
//!
//! ## Example
//!
//! ```rust
//! use octopus_schema::{parse_type, Column, ColumnType, Schema, Table};
//!
//! let (column_type, size, scale) = parse_type("decimal(20,5)");
//! assert_eq!(column_type, ColumnType::Decimal);
//! assert_eq!((size, scale), (20, 5));
//!
//! let mut schema = Schema::new();
//! schema.add_table(
//!     Table::new("user")
//!         .with_group("common")
//!         .with_column(Column::new("id", ColumnType::Long).primary_key()),
//! );
//! assert_eq!(schema.groups(), vec!["common"]);
//! ```

pub mod ast;
pub mod error;
pub mod prefix;
pub mod validator;

pub use ast::*;
pub use error::{SchemaError, SchemaResult};
pub use prefix::PrefixMapper;
pub use validator::{Validator, validate_schema};
