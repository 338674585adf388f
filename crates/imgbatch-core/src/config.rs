use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// HTTP transport settings (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Hard wall-clock limit for a whole request, in seconds.
    pub timeout_secs: u64,
    /// Abort when throughput stays below this many bytes/sec for `low_speed_time_secs`.
    pub low_speed_limit: u32,
    pub low_speed_time_secs: u64,
    /// Redirects followed before the request fails.
    pub max_redirections: u32,
    /// `User-Agent` header sent with each GET.
    pub user_agent: String,
    /// Largest response body accepted, in bytes; 0 disables the check.
    pub max_body_bytes: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 300,
            low_speed_limit: 1024,
            low_speed_time_secs: 60,
            max_redirections: 10,
            user_agent: concat!("imgbatch/", env!("CARGO_PKG_VERSION")).to_string(),
            max_body_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Global configuration loaded from `~/.config/imgbatch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImgbatchConfig {
    /// Maximum number of jobs in flight at once.
    pub concurrency: usize,
    /// Default destination root when the CLI gets no `--dest`.
    #[serde(default)]
    pub destination: Option<PathBuf>,
    /// Unix permission bits for created directories.
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,
    /// Unix permission bits for downloaded files.
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_dir_mode() -> u32 {
    0o764
}

fn default_file_mode() -> u32 {
    0o644
}

impl Default for ImgbatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            destination: None,
            dir_mode: default_dir_mode(),
            file_mode: default_file_mode(),
            http: HttpConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgbatch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImgbatchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ImgbatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ImgbatchConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
