//! Single-track download: streamed GET to a file.

use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{status_parts, DownloadError};

/// Streams one media URL into `target`, chunk by chunk.
///
/// A partially written file is left in place on failure; a later run with
/// skip-existing off replaces it.
pub(super) async fn fetch_to_file(
    client: &reqwest::Client,
    url: &str,
    target: &Path,
) -> Result<(), DownloadError> {
    let mut resp = client
        .get(url)
        .send()
        .await
        .map_err(DownloadError::Transport)?;

    let status = resp.status();
    if !status.is_success() {
        let (status, message) = status_parts(status);
        return Err(DownloadError::Status { status, message });
    }

    let file = tokio::fs::File::create(target)
        .await
        .map_err(DownloadError::Write)?;
    let mut out = BufWriter::new(file);

    while let Some(chunk) = resp.chunk().await.map_err(DownloadError::Transport)? {
        out.write_all(&chunk).await.map_err(DownloadError::Write)?;
    }
    out.flush().await.map_err(DownloadError::Write)?;

    Ok(())
}
