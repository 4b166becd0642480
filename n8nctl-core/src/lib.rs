//! n8nctl Core
//!
//! Core types and transforms for the n8nctl client.
//!
//! This crate contains:
//! - Domain types: workflow documents, nodes, executions
//! - Code I/O: exporting Code-node scripts to files and importing them back
//!
//! Everything here operates on in-memory documents; HTTP lives in
//! `n8nctl-client`.

pub mod codeio;
pub mod domain;
pub mod error;

pub use error::{CoreError, Result};
