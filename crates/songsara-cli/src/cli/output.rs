//! Terminal rendering for run events and the final summary.
//!
//! Verbose mode prints one line per track; otherwise an in-place counter
//! tracks each album. Dry runs always list intended actions per track.

use songsara_core::progress::{RunEvent, TrackDisposition};
use songsara_core::runner::RunSummary;
use std::io::Write;
use std::path::Path;
use tokio::sync::mpsc::Receiver;

pub async fn print_events(mut events: Receiver<RunEvent>, verbose: bool, dry_run: bool) {
    // True while the in-place track counter owns the current line.
    let mut counting = false;

    while let Some(event) = events.recv().await {
        match event {
            RunEvent::PageStarted {
                position,
                total,
                url,
            } => {
                if total > 1 {
                    println!("\n[{}/{}] Processing: {}", position, total, url);
                } else if verbose {
                    println!("Processing URL: {}", url);
                }
            }
            RunEvent::AlbumResolved { title, track_count } => {
                if dry_run {
                    println!(
                        "Dry run - would download album: {} ({} songs)",
                        title, track_count
                    );
                } else {
                    println!("Downloading album: {} ({} songs)", title, track_count);
                }
            }
            RunEvent::TrackFinished {
                progress,
                filename,
                disposition,
            } => {
                match disposition {
                    TrackDisposition::Planned => println!("Would download: {}", filename),
                    TrackDisposition::Downloaded if verbose => {
                        println!("Downloaded: {}", filename)
                    }
                    TrackDisposition::Skipped if verbose || dry_run => {
                        println!("Skipping existing file: {}", filename)
                    }
                    _ => {}
                }
                if !verbose && !dry_run {
                    print!(
                        "\r  {}/{} tracks",
                        progress.tracks_done, progress.track_count
                    );
                    let _ = std::io::stdout().flush();
                    counting = true;
                }
            }
            RunEvent::AlbumFinished { title, failures } => {
                if counting {
                    println!();
                    counting = false;
                }
                if !failures.is_empty() {
                    println!("\nErrors occurred during download:");
                    for failure in &failures {
                        println!("  - {}", failure);
                    }
                }
                if !dry_run {
                    println!("Album '{}' download completed!", title);
                }
            }
            RunEvent::PageFailed { url, reason } => {
                println!("❌ Error scraping {}: {}", url, reason);
            }
            RunEvent::AlbumFailed { title, reason } => {
                if counting {
                    println!();
                    counting = false;
                }
                println!("❌ Error downloading album {}: {}", title, reason);
            }
        }
    }
}

pub fn print_summary(summary: &RunSummary, output_dir: &Path) {
    println!("\n{}", "=".repeat(50));
    println!("Download Summary:");
    println!("  Total URLs: {}", summary.total);
    println!("  Successful: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    println!("  Output directory: {}", output_dir.display());
    println!("{}", "=".repeat(50));
}
