//! Configuration for the ledger engine.
//!
//! Values come from `LEDGER_`-prefixed environment variables layered over
//! built-in defaults, e.g. `LEDGER_PORT=8080`,
//! `LEDGER_TOKENS="tok-alice:alice,tok-bob:bob"`.

use serde::{Deserialize, Serialize};

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Bind host for the HTTP server.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port for the HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bound on validate-then-write retries under store contention.
    #[serde(default = "default_max_commit_retries")]
    pub max_commit_retries: u32,
    /// Static bearer tokens as `token:user` pairs, comma separated.
    #[serde(default)]
    pub tokens: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_max_commit_retries() -> u32 {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_commit_retries: default_max_commit_retries(),
            tokens: String::new(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns error if an environment value cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("LEDGER"))
            .build()?
            .try_deserialize()
    }

    /// Parse the static token table into `(token, user)` pairs.
    ///
    /// Malformed entries (no `:` separator, or an empty side) are skipped.
    #[must_use]
    pub fn token_pairs(&self) -> Vec<(String, String)> {
        self.tokens
            .split(',')
            .filter_map(|entry| {
                let (token, user) = entry.trim().split_once(':')?;
                if token.is_empty() || user.is_empty() {
                    return None;
                }
                Some((token.to_string(), user.to_string()))
            })
            .collect()
    }

    /// Bind address string for the HTTP listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
