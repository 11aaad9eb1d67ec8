use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Transport engine limits (optional `[transport]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Seconds allowed for DNS + TCP connect.
    pub connect_timeout_secs: u64,
    /// Abort when throughput stays below this many bytes/s ...
    pub low_speed_limit: u32,
    /// ... for this many seconds.
    pub low_speed_time_secs: u64,
    /// Hard wall-clock limit for the whole transfer.
    pub timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            low_speed_limit: 1024,
            low_speed_time_secs: 60,
            timeout_secs: 600,
        }
    }
}

/// Global configuration loaded from `~/.config/bootget/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootgetConfig {
    /// Destination address used when the command line names none.
    pub load_address: u64,
    /// Size in bytes of the destination region allocated for a download.
    pub buffer_size: usize,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Default for BootgetConfig {
    fn default() -> Self {
        Self {
            load_address: 0x8200_0000,
            buffer_size: 64 * 1024 * 1024,
            transport: TransportConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bootget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BootgetConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<BootgetConfig> {
    if !path.exists() {
        let default_cfg = BootgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write default config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: BootgetConfig =
        toml::from_str(&data).with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
