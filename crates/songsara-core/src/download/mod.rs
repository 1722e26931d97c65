//! Bounded-concurrency album download engine.
//!
//! Every track of an album is spawned as its own task; a semaphore sized to
//! the configured concurrency decides how many run at once. One track's
//! failure never touches its siblings: the engine always comes back with one
//! outcome per track, in page order.

mod track;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::RunConfig;
use crate::error::{AlbumError, DownloadError};
use crate::extract::Album;
use crate::naming;
use crate::progress::{emit, DownloadProgress, RunEvent, TrackDisposition};

/// Result of one track after the engine ran.
#[derive(Debug)]
pub struct TrackOutcome {
    /// 1-based page position, matching the filename prefix.
    pub index: usize,
    pub title: String,
    pub filename: String,
    pub status: TrackStatus,
}

/// Terminal state of one track.
#[derive(Debug)]
pub enum TrackStatus {
    Downloaded,
    /// Left alone because the file already exists.
    Skipped,
    /// Dry run: would have been downloaded.
    Planned,
    Failed(DownloadError),
}

impl TrackStatus {
    /// Skips and dry-run plans count as success.
    pub fn is_success(&self) -> bool {
        !matches!(self, TrackStatus::Failed(_))
    }

    pub fn disposition(&self) -> TrackDisposition {
        match self {
            TrackStatus::Downloaded => TrackDisposition::Downloaded,
            TrackStatus::Skipped => TrackDisposition::Skipped,
            TrackStatus::Planned => TrackDisposition::Planned,
            TrackStatus::Failed(_) => TrackDisposition::Failed,
        }
    }
}

/// A track with its derived filename, before any I/O.
#[derive(Debug, Clone)]
struct PlannedTrack {
    index: usize,
    title: String,
    url: String,
    filename: String,
}

fn plan_tracks(album: &Album) -> Vec<PlannedTrack> {
    album
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| PlannedTrack {
            index: i + 1,
            title: track.title.clone(),
            url: track.url.clone(),
            filename: naming::track_filename(i + 1, &track.title, &track.url),
        })
        .collect()
}

/// Downloads every track of `album` into a per-album directory under
/// `cfg.output_dir`, at most `cfg.concurrency` tracks at a time.
///
/// Returns one [`TrackOutcome`] per track in page order. Only album-level
/// problems (no tracks, directory creation) are errors; per-track failures
/// are `Failed` outcomes. With `dry_run` set, nothing is written and no
/// request is made.
pub async fn download_album(
    client: &reqwest::Client,
    album: &Album,
    cfg: &RunConfig,
    events: Option<&Sender<RunEvent>>,
) -> Result<Vec<TrackOutcome>, AlbumError> {
    if album.tracks.is_empty() {
        return Err(AlbumError::NoTracks);
    }

    let album_dir = cfg.output_dir.join(naming::sanitize_title(&album.title));
    let planned = plan_tracks(album);
    let track_count = planned.len();

    if cfg.dry_run {
        tracing::info!(album = %album.title, tracks = track_count, "dry run, skipping downloads");
        let mut outcomes = Vec::with_capacity(track_count);
        for (done, plan) in planned.into_iter().enumerate() {
            let existing = cfg.skip_existing
                && tokio::fs::try_exists(album_dir.join(&plan.filename))
                    .await
                    .unwrap_or(false);
            let status = if existing {
                TrackStatus::Skipped
            } else {
                TrackStatus::Planned
            };
            emit(
                events,
                RunEvent::TrackFinished {
                    progress: DownloadProgress {
                        tracks_done: done + 1,
                        track_count,
                    },
                    filename: plan.filename.clone(),
                    disposition: status.disposition(),
                },
            )
            .await;
            outcomes.push(TrackOutcome {
                index: plan.index,
                title: plan.title,
                filename: plan.filename,
                status,
            });
        }
        return Ok(outcomes);
    }

    tokio::fs::create_dir_all(&album_dir)
        .await
        .map_err(|e| AlbumError::OutputDir {
            path: album_dir.clone(),
            source: e,
        })?;

    tracing::info!(
        album = %album.title,
        tracks = track_count,
        concurrency = cfg.concurrency,
        "downloading album"
    );

    let semaphore = Arc::new(Semaphore::new(cfg.concurrency.max(1)));
    let done = Arc::new(AtomicUsize::new(0));
    let mut join_set = JoinSet::new();

    for plan in planned {
        let client = client.clone();
        let album_dir = album_dir.clone();
        let semaphore = Arc::clone(&semaphore);
        let done = Arc::clone(&done);
        let events = events.cloned();
        let skip_existing = cfg.skip_existing;
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("semaphore is never closed");

            let status = download_track(&client, &plan, &album_dir, skip_existing).await;

            let tracks_done = done.fetch_add(1, Ordering::SeqCst) + 1;
            emit(
                events.as_ref(),
                RunEvent::TrackFinished {
                    progress: DownloadProgress {
                        tracks_done,
                        track_count,
                    },
                    filename: plan.filename.clone(),
                    disposition: status.disposition(),
                },
            )
            .await;

            (plan, status)
        });
    }

    let mut outcomes: Vec<TrackOutcome> = Vec::with_capacity(track_count);
    while let Some(res) = join_set.join_next().await {
        let (plan, status) = res?;
        if let TrackStatus::Failed(err) = &status {
            tracing::warn!(track = %plan.title, %err, "track download failed");
        }
        outcomes.push(TrackOutcome {
            index: plan.index,
            title: plan.title,
            filename: plan.filename,
            status,
        });
    }
    outcomes.sort_by_key(|outcome| outcome.index);

    Ok(outcomes)
}

/// Runs one planned track: skip check, then streamed download.
async fn download_track(
    client: &reqwest::Client,
    plan: &PlannedTrack,
    album_dir: &Path,
    skip_existing: bool,
) -> TrackStatus {
    let target = album_dir.join(&plan.filename);

    if skip_existing && tokio::fs::try_exists(&target).await.unwrap_or(false) {
        tracing::debug!(file = %plan.filename, "skipping existing file");
        return TrackStatus::Skipped;
    }

    match track::fetch_to_file(client, &plan.url, &target).await {
        Ok(()) => {
            tracing::debug!(file = %plan.filename, "downloaded");
            TrackStatus::Downloaded
        }
        Err(err) => TrackStatus::Failed(err),
    }
}
