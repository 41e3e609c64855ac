//! Simulator configuration
//!
//! Layered with figment: built-in defaults, then a TOML file, then
//! `LAYR_`-prefixed environment variables. Command-line flags are applied on
//! top by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{WrapErr, eyre};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use layr_card::Aid;
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no `--config` is given
pub(crate) const DEFAULT_CONFIG_FILE: &str = "layr.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Config {
    /// AID the emulated applet answers to, as hex
    pub(crate) aid: String,
    /// How often the observer samples the last-event label
    pub(crate) poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aid: Aid::layr().to_string(),
            poll_interval_ms: 200,
        }
    }
}

impl Config {
    /// Base figment without any file layer
    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    /// Load configuration, reading `path` if given or `layr.toml` if present
    pub(crate) fn load(path: Option<&Path>) -> eyre::Result<Self> {
        let file = match path {
            Some(path) if !path.is_file() => {
                return Err(eyre!("config file {} not found", path.display()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };

        let mut figment = Self::figment();
        if let Some(file) = &file {
            figment = figment.merge(Toml::file(file));
        }

        figment
            .merge(Env::prefixed("LAYR_"))
            .extract()
            .wrap_err("invalid configuration")
    }

    /// The configured AID
    pub(crate) fn aid(&self) -> eyre::Result<Aid> {
        self.aid
            .parse()
            .wrap_err_with(|| format!("invalid aid {:?}", self.aid))
    }

    /// The configured poll interval
    pub(crate) const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
