//! Canonical schema tree.
//!
//! This module contains the format-agnostic types every decoder produces and
//! every encoder consumes.

mod column;
mod schema;
mod table;
mod types;

pub use column::*;
pub use schema::*;
pub use table::*;
pub use types::*;
