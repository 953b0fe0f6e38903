//! Octopus CLI - Command-line interface for octopus-db-tools.
//!
//! This crate provides the `oct` binary: it resolves formats, reads the
//! source artifact, runs the codec registry and writes the generated files.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
