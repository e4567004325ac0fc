//! MTG MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that exposes
//! Magic: The Gathering data from two public read-only web APIs: the Scryfall
//! card database and the Commander Spellbook combo database.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the upstream API clients (with Scryfall rate limiting), and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tools for card and combo lookups
//!   - **resources**: Reference documents (search syntax guides, server info)
//!   - **prompts**: Prompt templates for common deck-building workflows
//!
//! # Example
//!
//! ```rust,no_run
//! use mtg_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
