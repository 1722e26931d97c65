//! Error types for the scrape and download pipeline.
//!
//! Three tiers: [`FetchError`] ends the scrape of one page, [`AlbumError`]
//! ends the download stage of one album, and [`DownloadError`] is fatal for
//! one track only. Sibling URLs and sibling tracks keep going in every case.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve an album page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection, timeout, or body-decode failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failure of a single track download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The media server answered with a non-success status.
    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection, timeout, or mid-stream failure.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Local filesystem failure while writing the track.
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

/// Failure that ends the download stage of one album.
#[derive(Debug, Error)]
pub enum AlbumError {
    /// Every extraction strategy came up empty.
    #[error("no songs found in album")]
    NoTracks,

    /// The album directory could not be created.
    #[error("failed to create album directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A download task panicked or was cancelled.
    #[error("download task join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds the `{status, message}` pair for a non-success HTTP response.
pub(crate) fn status_parts(status: reqwest::StatusCode) -> (u16, String) {
    (
        status.as_u16(),
        status.canonical_reason().unwrap_or_default().to_string(),
    )
}
