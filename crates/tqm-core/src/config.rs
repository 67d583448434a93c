//! Per-instance configuration loaded from `~/.config/tqm/config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::policy::SweepThresholds;

pub(crate) const SECS_PER_DAY: u64 = 86_400;

/// One Transmission daemon to sweep.
///
/// Host and credentials are opaque plumbing; the three day/second thresholds
/// and `active_limit` are the knobs the policy engine runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Hostname or address of the daemon's RPC interface.
    pub host: String,
    /// RPC port; the daemon default is 9091.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional HTTP basic-auth username.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional HTTP basic-auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Target number of progressing downloads to keep active.
    #[serde(default = "default_active_limit")]
    pub active_limit: usize,
    /// Stalled torrents at least this many days old are stopped.
    #[serde(default = "default_stale_days")]
    pub stale_days: u64,
    /// Stalled torrents at least this many days old are purged with their
    /// data. Must not be below `stale_days`.
    #[serde(default = "default_delete_days")]
    pub delete_days: u64,
    /// Downloads under the progress cutoff for more than this many seconds
    /// are stopped.
    #[serde(default = "default_slow_seconds")]
    pub slow_seconds: u64,
}

fn default_port() -> u16 {
    9091
}

fn default_active_limit() -> usize {
    10
}

fn default_stale_days() -> u64 {
    1
}

fn default_delete_days() -> u64 {
    7
}

fn default_slow_seconds() -> u64 {
    7200
}

impl InstanceConfig {
    /// The configured day/second thresholds as durations for the policy engine.
    pub fn thresholds(&self) -> SweepThresholds {
        SweepThresholds {
            stale_after: Duration::from_secs(self.stale_days * SECS_PER_DAY),
            delete_after: Duration::from_secs(self.delete_days * SECS_PER_DAY),
            slow_after: Duration::from_secs(self.slow_seconds),
        }
    }
}

/// Root configuration: the ordered list of daemon instances to sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TqmConfig {
    #[serde(default)]
    pub instances: Vec<InstanceConfig>,
}

impl TqmConfig {
    /// Reject invariant violations before any instance is processed.
    pub fn validate(&self) -> Result<()> {
        for instance in &self.instances {
            if instance.host.trim().is_empty() {
                anyhow::bail!("instance with empty host in configuration");
            }
            if instance.active_limit == 0 {
                anyhow::bail!("instance {}: active_limit must be at least 1", instance.host);
            }
            if instance.stale_days == 0 {
                anyhow::bail!("instance {}: stale_days must be at least 1", instance.host);
            }
            if instance.slow_seconds == 0 {
                anyhow::bail!(
                    "instance {}: slow_seconds must be at least 1",
                    instance.host
                );
            }
            if instance.delete_days < instance.stale_days {
                anyhow::bail!(
                    "instance {}: delete_days ({}) must not be below stale_days ({})",
                    instance.host,
                    instance.delete_days,
                    instance.stale_days
                );
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tqm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default (empty) file if none exists.
pub fn load_or_init() -> Result<TqmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TqmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load and validate configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<TqmConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let cfg: TqmConfig =
        toml::from_str(&data).with_context(|| format!("parse config file: {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
