//! Shared configuration types for the engine and its hosts.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global application configuration (gateway + data sources). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown in greetings and health responses.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Path to the knowledge-base source (`trigger|response` per line).
    pub data_file: String,
    /// Path to the banned-word source (one lower-case term per line).
    pub banned_file: String,
    /// Path to the account source (`username|password` per line).
    pub users_file: String,
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `BANTER_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("BANTER_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Banter Gateway")?
            .set_default("port", 8001_i64)?
            .set_default("data_file", "./data/knowledge.txt")?
            .set_default("banned_file", "./data/banned.txt")?
            .set_default("users_file", "./data/users.txt")?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("BANTER").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
