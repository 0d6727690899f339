//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: JSON file store for characters
//! - Dnd API: rate-limited SRD enrichment client
//! - SRD loader: CSV equipment and spell tables
//! - CLI: clap commands and the text presenter
//! - HTTP: read-only HTML character sheets
//! - Config: Application configuration
//! - State: Shared application state

pub mod cli;
pub mod config;
pub mod dnd_api;
pub mod http;
pub mod persistence;
pub mod srd_loader;
pub mod state;
