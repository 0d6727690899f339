//! Application layer - Use cases and the ports they depend on
//!
//! - Ports: traits implemented by infrastructure adapters
//! - Services: character use cases
//! - DTOs: presentation-neutral views shared by the CLI and HTML adapters

pub mod dto;
pub mod ports;
pub mod services;
