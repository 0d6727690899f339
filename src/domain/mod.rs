//! Domain layer - Core business logic with no I/O
//!
//! This layer contains:
//! - Entities: the Character aggregate and its derivations
//! - Value Objects: abilities, skills, equipment, spells
//! - Rules: immutable fifth-edition reference tables
//! - Catalog: the SRD spells and equipment loaded at startup

pub mod catalog;
pub mod entities;
pub mod error;
pub mod rules;
pub mod value_objects;
