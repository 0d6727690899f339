//! Character persistence adapters
//!
//! The production store is a single JSON document holding every character.
//! Tests use an in-memory map behind the same port.

mod json_file_repository;
#[cfg(test)]
mod memory_repository;

pub use json_file_repository::JsonFileCharacterRepository;
#[cfg(test)]
pub use memory_repository::InMemoryCharacterRepository;
