//! `evm.toml` loading
//!
//! Every section and field is optional. A missing default file means all
//! defaults; a file named with `--config` must exist.

use anyhow::{Context, Result};
use evm_core::{PartyId, SignalMap};
use evm_db::Database;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "evm.toml";

/// `~/.evm`, home of the default config, database and log file
pub fn evm_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home_dir.join(".evm"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: DatabaseConfig,
    pub device: DeviceConfig,
    pub bridge: BridgeConfig,
    pub photo: PhotoConfig,

    /// Directory relative paths in the file are resolved against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Defaults to `~/.evm/evm.db`
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    pub port: String,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
    /// Refuse to start the console when the device cannot be opened
    pub required: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyACM0".to_string(),
            baud_rate: 9600,
            read_timeout_ms: 100,
            required: true,
        }
    }
}

impl DeviceConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    pub poll_interval_ms: u64,
    pub mark_voted_code: String,
    /// Device code to party id
    pub party_codes: BTreeMap<String, i64>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        let defaults = SignalMap::default();
        Self {
            poll_interval_ms: 100,
            mark_voted_code: defaults.mark_voted_code().to_string(),
            party_codes: defaults
                .party_codes()
                .map(|(code, id)| (code.to_string(), id.0))
                .collect(),
        }
    }
}

impl BridgeConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn signal_map(&self) -> Result<SignalMap> {
        let codes = self
            .party_codes
            .iter()
            .map(|(code, id)| (code.clone(), PartyId(*id)))
            .collect();
        SignalMap::new(codes, self.mark_voted_code.as_str())
            .context("Invalid device codes in [bridge] configuration")
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhotoConfig {
    /// Edge length photos are scaled to, in pixels
    pub size: u32,
    pub timeout_secs: u64,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            size: 200,
            timeout_secs: 10,
        }
    }
}

impl PhotoConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load `path`, or `~/.evm/evm.toml` when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = evm_dir()?.join(CONFIG_FILE);
                if !default.exists() {
                    log::debug!("No config at {}, using defaults", default.display());
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Database file, with `~/` expanded and relative paths taken from the config file's directory
    pub fn database_path(&self) -> Result<PathBuf> {
        let Some(path) = &self.database.path else {
            return Ok(evm_dir()?.join("evm.db"));
        };
        if let Ok(rest) = path.strip_prefix("~") {
            let home_dir = dirs::home_dir().context("Failed to get home directory")?;
            return Ok(home_dir.join(rest));
        }
        match &self.base_dir {
            Some(base) if path.is_relative() => Ok(base.join(path)),
            _ => Ok(path.clone()),
        }
    }

    pub fn open_database(&self) -> Result<Database> {
        Ok(Database::connect(&self.database_path()?)?)
    }
}
