//! Loctree - translation resource reconciliation for TypeScript locale files
//!
//! Loctree reads `export default { ... }` locale modules without executing them,
//! compares each target locale against a reference locale key by key, and
//! merges translated entries back in without dropping existing content.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Reconciliation engine (parse, diff, categorize, merge, serialize)
//! - `issues`: Finding types and their cargo-style rendering data
//! - `locales`: Locale file discovery
//! - `mcp`: Model Context Protocol server implementation
//! - `project`: Project context tying config, locales and the engine together

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod locales;
pub mod mcp;
pub mod project;
