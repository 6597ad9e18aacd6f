//! CLI configuration file (YAML).
//!
//! ```yaml
//! client:
//!   provider_url: wss://eth-mainnet.example.org/ws
//!   default_from_block: 19492759
//! log:
//!   level: info
//!   components:
//!     eigenevents-rpc: debug
//! ```

use anyhow::{bail, Context, Result};
use eigenevents::{ClientConfig, ConnectionKind};
use eigenevents_observability::LogConfig;
use serde::Deserialize;
use std::path::Path;

/// Overrides the configured provider URL.
pub const RPC_URL_ENV: &str = "EIGENEVENTS_RPC_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub client: Option<ClientConfig>,
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Read `path`, or fall back to defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file '{}'", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config file '{}'", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Client settings for one command.
    ///
    /// URL precedence: `--rpc` flag, then `EIGENEVENTS_RPC_URL`, then the
    /// config file. A URL taken from the flag or the environment keeps the
    /// file's other settings but picks the connection kind from its scheme.
    pub fn client_config(&self, flag: Option<&str>, env: Option<String>) -> Result<ClientConfig> {
        let url = flag.map(str::to_string).or(env.filter(|u| !u.trim().is_empty()));
        match (url, &self.client) {
            (Some(url), Some(base)) => Ok(ClientConfig {
                connection: ConnectionKind::from_url(&url),
                provider_url: url,
                ..base.clone()
            }),
            (Some(url), None) => Ok(ClientConfig::new(url)),
            (None, Some(base)) => Ok(base.clone()),
            (None, None) => bail!(
                "no provider URL: pass --rpc, set {RPC_URL_ENV}, or add client.provider_url to the config file"
            ),
        }
    }
}
