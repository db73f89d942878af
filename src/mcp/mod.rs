//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the reconciliation engine to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `helpers`: Parameter validation and result conversion
//! - `server`: Tool router and server entry point
//! - `types`: Tool parameter and result types

mod helpers;
mod server;
pub mod types;

pub use server::{LoctreeMcpServer, run_server};
