//! Application configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

/// Application configuration: built-in defaults overlaid by `CHARGEN_*`
/// environment variables (a `.env` file is loaded first by the binary)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SRD equipment table
    pub equipment_path: PathBuf,
    /// SRD spell table
    pub spells_path: PathBuf,
    /// JSON document holding every character
    pub characters_path: PathBuf,

    /// Base URL of the SRD API used for enrichment
    pub api_base_url: String,
    /// Sustained request rate against the SRD API
    pub api_requests_per_second: u32,
    /// Requests allowed in a burst
    pub api_burst: u32,
    pub api_timeout_secs: u64,
    /// When false the offline enricher is used
    pub enrichment_enabled: bool,

    /// HTML sheet server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::with_prefix("CHARGEN"))
    }

    fn from_environment(environment: Environment) -> Result<Self> {
        Config::builder()
            .set_default("equipment_path", "data/5e-SRD-Equipment.csv")?
            .set_default("spells_path", "data/5e-SRD-Spells.csv")?
            .set_default("characters_path", "characters.json")?
            .set_default("api_base_url", "https://www.dnd5eapi.co/api/")?
            .set_default("api_requests_per_second", 8_i64)?
            .set_default("api_burst", 8_i64)?
            .set_default("api_timeout_secs", 5_i64)?
            .set_default("enrichment_enabled", true)?
            .set_default("server_port", 8080_i64)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}
