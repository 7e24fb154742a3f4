use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::runner::RestartPolicy;

/// Restart policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestartConfig {
    /// Base delay in seconds before the first restart (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
    /// Consecutive rapid failures tolerated before giving up.
    pub max_rapid_failures: u32,
    /// Run duration in seconds above which a failure resets the counter.
    pub healthy_run_secs: u64,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            base_delay_secs: 0.5,
            max_delay_secs: 60,
            max_rapid_failures: 10,
            healthy_run_secs: 5,
        }
    }
}

impl From<&RestartConfig> for RestartPolicy {
    fn from(cfg: &RestartConfig) -> Self {
        RestartPolicy {
            base_delay: Duration::from_secs_f64(cfg.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(cfg.max_delay_secs),
            max_rapid_failures: cfg.max_rapid_failures,
            healthy_run: Duration::from_secs(cfg.healthy_run_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/ojsync/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OjsyncConfig {
    /// Maximum concurrent transfers per batch (the queue limit).
    pub concurrency: usize,
    /// Optional ledger file override; defaults to the XDG state dir.
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
    /// Optional restart policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub restart: Option<RestartConfig>,
}

impl Default for OjsyncConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            ledger_path: None,
            restart: None,
        }
    }
}

impl OjsyncConfig {
    /// Restart policy from the optional `[restart]` section, else defaults.
    pub fn restart_policy(&self) -> RestartPolicy {
        self.restart
            .as_ref()
            .map(RestartPolicy::from)
            .unwrap_or_default()
    }

    /// Ledger file: the configured override, else
    /// `~/.local/state/ojsync/progress.json`.
    pub fn ledger_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.ledger_path {
            return Ok(path.clone());
        }
        default_ledger_path()
    }
}

/// Default ledger location under the XDG state dir.
pub fn default_ledger_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ojsync")?;
    Ok(xdg_dirs
        .get_state_home()
        .join("ojsync")
        .join("progress.json"))
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ojsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OjsyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = OjsyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: OjsyncConfig = toml::from_str(&data)?;
    Ok(cfg)
}
