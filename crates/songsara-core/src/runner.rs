//! Per-URL orchestration: fetch, extract, download, tally.
//!
//! URLs are processed strictly in order; concurrency lives one level down,
//! inside the album download engine. A failing page is logged, reported, and
//! counted, then the run moves on.

use anyhow::{Context, Result};
use tokio::sync::mpsc::Sender;

use crate::config::RunConfig;
use crate::download::{self, TrackStatus};
use crate::error::{AlbumError, FetchError};
use crate::extract::{self, Album};
use crate::fetch;
use crate::progress::{emit, RunEvent};

/// Tally of one run across all page URLs.
///
/// A URL counts as succeeded when its page resolved and the engine ran, even
/// if some of its tracks failed; those are visible per track, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Processes every URL in order and returns the final tally.
///
/// Fails fast only on setup problems (no URLs, output directory, HTTP
/// client); page-level errors are absorbed into the summary.
pub async fn run_all(
    urls: &[String],
    cfg: &RunConfig,
    events: Option<&Sender<RunEvent>>,
) -> Result<RunSummary> {
    if urls.is_empty() {
        anyhow::bail!("no URLs to process");
    }

    let client = fetch::build_client(cfg.timeout)?;

    if !cfg.dry_run {
        tokio::fs::create_dir_all(&cfg.output_dir)
            .await
            .with_context(|| {
                format!(
                    "failed to create output directory {}",
                    cfg.output_dir.display()
                )
            })?;
    }

    let total = urls.len();
    let mut summary = RunSummary {
        total,
        succeeded: 0,
        failed: 0,
    };

    for (i, url) in urls.iter().enumerate() {
        emit(
            events,
            RunEvent::PageStarted {
                position: i + 1,
                total,
                url: url.clone(),
            },
        )
        .await;
        tracing::info!(url = %url, "processing page");

        let album = match scrape_album(&client, url, cfg).await {
            Ok(album) => album,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "scrape failed");
                emit(
                    events,
                    RunEvent::PageFailed {
                        url: url.clone(),
                        reason: err.to_string(),
                    },
                )
                .await;
                summary.failed += 1;
                continue;
            }
        };

        match download_and_report(&client, &album, cfg, events).await {
            Ok(()) => summary.succeeded += 1,
            Err(err) => {
                tracing::warn!(album = %album.title, error = %err, "album download failed");
                emit(
                    events,
                    RunEvent::AlbumFailed {
                        title: album.title.clone(),
                        reason: err.to_string(),
                    },
                )
                .await;
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run finished"
    );

    Ok(summary)
}

/// Fetches one page and extracts its album.
async fn scrape_album(
    client: &reqwest::Client,
    url: &str,
    cfg: &RunConfig,
) -> Result<Album, FetchError> {
    let html = fetch::fetch_page(client, url).await?;
    let album = extract::extract_album(&html);
    tracing::info!(title = %album.title, tracks = album.tracks.len(), "extracted album");

    if album.tracks.is_empty() && cfg.verbose {
        log_empty_page(&html);
    }

    Ok(album)
}

/// Extraction found nothing; put what the page actually looks like in the log.
fn log_empty_page(html: &str) {
    let diag = extract::diagnose_page(html);
    tracing::debug!(
        page_title = %diag.page_title,
        headings = diag.heading_count,
        audio_elements = diag.audio_count,
        audio_links = diag.audio_link_count,
        "no tracks matched any strategy"
    );
    let head: String = html.chars().take(1000).collect();
    tracing::debug!(%head, "page head");
    if diag.looks_blocked {
        tracing::warn!("page appears to be blocked or showing an error");
    }
}

/// Runs the engine for one album and reports the result as events.
async fn download_and_report(
    client: &reqwest::Client,
    album: &Album,
    cfg: &RunConfig,
    events: Option<&Sender<RunEvent>>,
) -> Result<(), AlbumError> {
    if !album.tracks.is_empty() {
        emit(
            events,
            RunEvent::AlbumResolved {
                title: album.title.clone(),
                track_count: album.tracks.len(),
            },
        )
        .await;
    }

    let outcomes = download::download_album(client, album, cfg, events).await?;

    let failures: Vec<String> = outcomes
        .iter()
        .filter_map(|outcome| match &outcome.status {
            TrackStatus::Failed(err) => Some(format!("song '{}': {}", outcome.title, err)),
            _ => None,
        })
        .collect();

    emit(
        events,
        RunEvent::AlbumFinished {
            title: album.title.clone(),
            failures,
        },
    )
    .await;

    Ok(())
}
