//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Secrets (wallet addresses, RPC keys) are referenced by env-var name in
//! the config and resolved at runtime via `std::env::var`. The configured
//! network is only a default; every core operation still takes the
//! network as an explicit parameter.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub keeper: KeeperConfig,
    pub wallet: WalletConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeeperConfig {
    /// Network the keeper operates on, e.g. "mainnet".
    pub network: String,
    pub scan_interval_secs: u64,
    /// Address receiving any surplus left after a flash-swap bid repays
    /// itself.
    pub profit_address: String,
    /// Minimum expected profit (in debt-token units) before an auction is
    /// worth acting on.
    pub min_profit_dai: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WalletConfig {
    /// Env var holding the bidding wallet's address.
    pub address_env: String,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}
