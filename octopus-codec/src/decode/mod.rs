//! Decoders: external artifact -> canonical [`Schema`](octopus_schema::Schema).

mod octopus;
mod xlsx;

pub use octopus::OctopusDecoder;
pub use xlsx::XlsxDecoder;
