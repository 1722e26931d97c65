//! Run events for live reporting (track counters, page milestones).
//!
//! The download engine and runner push events into an mpsc channel; the CLI
//! renders them. Everything here is advisory: a full or dropped receiver
//! never stalls or fails a download.

use tokio::sync::mpsc::Sender;

/// Snapshot of one album's download progress (CLI-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Tracks finished so far, whatever their outcome.
    pub tracks_done: usize,
    /// Total number of tracks in the album.
    pub track_count: usize,
}

impl DownloadProgress {
    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.track_count == 0 {
            return 1.0;
        }
        (self.tracks_done as f64 / self.track_count as f64).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.tracks_done >= self.track_count
    }
}

/// How a single track ended, stripped of error payloads for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDisposition {
    Downloaded,
    Skipped,
    Planned,
    Failed,
}

/// One milestone in a run, in emission order.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// An album URL is about to be processed (`position` is 1-based).
    PageStarted {
        position: usize,
        total: usize,
        url: String,
    },
    /// A page resolved to an album with at least one track.
    AlbumResolved { title: String, track_count: usize },
    /// One track finished.
    TrackFinished {
        progress: DownloadProgress,
        filename: String,
        disposition: TrackDisposition,
    },
    /// All tracks of an album finished; `failures` holds display-ready
    /// messages for the tracks that failed.
    AlbumFinished {
        title: String,
        failures: Vec<String>,
    },
    /// Fetching or reading the page itself failed.
    PageFailed { url: String, reason: String },
    /// The page resolved but the album could not be downloaded as a whole
    /// (no tracks, album directory, task failure).
    AlbumFailed { title: String, reason: String },
}

/// Sends an event if a channel is attached, ignoring a closed receiver.
pub(crate) async fn emit(events: Option<&Sender<RunEvent>>, event: RunEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event).await;
    }
}
