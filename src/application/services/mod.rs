//! Application services - Use case implementations
//!
//! Services accept port dependencies and return domain entities; adapters
//! turn those into DTOs for presentation.

pub mod character_service;

pub use character_service::{
    CharacterService, CharacterServiceError, CharacterServiceImpl, CreateCharacterRequest,
};
