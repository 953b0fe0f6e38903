//! Encoders: canonical [`Schema`](octopus_schema::Schema) -> external artifact.
//!
//! Every encoder owns its own type table. Types outside the canonical
//! vocabulary never abort a run; each encoder logs a warning and falls back
//! to its most generic representation.

mod dbml;
mod graphql;
mod jpa;
mod octopus;
mod plantuml;
mod protobuf;
mod sql;
mod xlsx;

pub use dbml::DbmlEncoder;
pub use graphql::GraphqlEncoder;
pub use jpa::JpaKotlinEncoder;
pub use octopus::OctopusEncoder;
pub use plantuml::PlantumlEncoder;
pub use protobuf::{ProtoField, ProtoMessage, ProtobufEncoder, render_proto};
pub use sql::{SqlDialect, SqlEncoder};
pub use xlsx::XlsxEncoder;
