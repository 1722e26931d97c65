use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Persistent defaults loaded from `~/.config/songsara-dl/config.toml`.
///
/// Command-line flags override these per invocation; see
/// [`RunConfig`] for the merged view the pipeline runs with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongsaraConfig {
    /// Maximum number of tracks downloaded at the same time.
    pub concurrency: usize,
    /// Directory album folders are created under.
    pub output_dir: String,
    /// Leave already-downloaded files alone instead of re-fetching them.
    pub skip_existing: bool,
    /// HTTP timeout in seconds, applied to page and track requests alike.
    pub timeout_secs: u64,
}

impl Default for SongsaraConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            output_dir: "downloads".to_string(),
            skip_existing: true,
            timeout_secs: 30,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("songsara-dl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SongsaraConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SongsaraConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SongsaraConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Effective settings for one invocation, after merging the config file with
/// command-line flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub concurrency: usize,
    pub output_dir: PathBuf,
    pub verbose: bool,
    pub dry_run: bool,
    pub skip_existing: bool,
    pub timeout: Duration,
}

impl RunConfig {
    /// Builds a run configuration straight from file-config values, with the
    /// per-invocation flags (`verbose`, `dry_run`) off.
    pub fn from_file_config(cfg: &SongsaraConfig) -> Self {
        Self {
            concurrency: cfg.concurrency,
            output_dir: PathBuf::from(&cfg.output_dir),
            verbose: false,
            dry_run: false,
            skip_existing: cfg.skip_existing,
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::from_file_config(&SongsaraConfig::default())
    }
}
