//! Data Transfer Objects - For presentation boundaries
//!
//! DTOs live in the application layer so the CLI and HTML presenters can
//! render the same view of a character without reaching into the entity.

pub mod character_sheet;

pub use character_sheet::*;
