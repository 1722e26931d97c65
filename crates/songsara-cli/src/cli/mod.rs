//! CLI for the songsara-dl album downloader.

mod output;

use anyhow::Result;
use clap::Parser;
use songsara_core::config::{self, RunConfig, SongsaraConfig};
use songsara_core::progress::RunEvent;
use songsara_core::runner;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level CLI for the songsara-dl album downloader.
#[derive(Debug, Parser)]
#[command(name = "songsara-dl")]
#[command(version)]
#[command(about = "Download albums and playlists from SongSara", long_about = None)]
pub struct Cli {
    /// Album or playlist page URLs.
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Maximum number of concurrent downloads.
    #[arg(short, long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Output directory for downloaded files.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show what would be downloaded without actually downloading.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip existing files (pass --skip-existing=false to re-download).
    #[arg(
        short,
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub skip_existing: Option<bool>,

    /// HTTP timeout in seconds.
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Merges command-line flags over the config-file defaults.
    fn run_config(&self, file_cfg: &SongsaraConfig) -> RunConfig {
        let mut cfg = RunConfig::from_file_config(file_cfg);
        if let Some(concurrency) = self.concurrency {
            cfg.concurrency = concurrency;
        }
        if let Some(output) = &self.output {
            cfg.output_dir = output.clone();
        }
        if let Some(skip_existing) = self.skip_existing {
            cfg.skip_existing = skip_existing;
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout = Duration::from_secs(timeout);
        }
        cfg.verbose = self.verbose;
        cfg.dry_run = self.dry_run;
        cfg
    }

    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let file_cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", file_cfg);
        let cfg = cli.run_config(&file_cfg);

        if cli.urls.len() > 1 {
            println!("Will download {} albums/playlists:", cli.urls.len());
            for (i, url) in cli.urls.iter().enumerate() {
                println!("  {}. {}", i + 1, url);
            }
            println!();
        }
        println!(
            "Starting download of {} album(s)/playlist(s)...",
            cli.urls.len()
        );

        let (event_tx, event_rx) = tokio::sync::mpsc::channel::<RunEvent>(16);
        let verbose = cfg.verbose;
        let dry_run = cfg.dry_run;
        let printer = tokio::spawn(async move {
            output::print_events(event_rx, verbose, dry_run).await;
        });

        let result = runner::run_all(&cli.urls, &cfg, Some(&event_tx)).await;
        drop(event_tx);
        let _ = printer.await;

        let summary = result?;
        output::print_summary(&summary, &cfg.output_dir);

        if summary.failed > 0 {
            anyhow::bail!("{} download(s) failed", summary.failed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
