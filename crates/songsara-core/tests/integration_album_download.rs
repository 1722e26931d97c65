//! Integration tests: local HTTP server with album pages and media routes,
//! exercising the full fetch → extract → download pipeline.

mod common;

use common::album_server::{self, Route};
use songsara_core::config::RunConfig;
use songsara_core::download::{self, TrackStatus};
use songsara_core::error::DownloadError;
use songsara_core::extract::{Album, Track};
use songsara_core::fetch;
use songsara_core::progress::{RunEvent, TrackDisposition};
use songsara_core::runner::{self, RunSummary};
use tempfile::tempdir;

/// Album page in the site player's markup.
fn player_page(title: &str, tracks: &[(&str, String)]) -> String {
    let items: String = tracks
        .iter()
        .map(|(track_title, url)| {
            format!(
                r#"<li data-title="{track_title}"><div class="audioplayer-source" data-src="{url}"></div></li>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
            <div class="AL-Si">{title}</div>
            <div id="aramplayer"><ul class="audioplayer-audios">{items}</ul></div>
        </body></html>"#
    )
}

#[tokio::test]
async fn album_page_downloads_numbered_tracks() {
    let server = album_server::start(vec![
        Route::ok("/media/a.mp3", "first track bytes"),
        Route::ok("/media/b.flac", "second track bytes"),
    ]);
    let page = player_page(
        "Demo Album",
        &[
            ("Track One", server.url("/media/a.mp3")),
            ("Track Two", server.url("/media/b.flac")),
        ],
    );
    server.push(Route::ok("/album", page));

    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        output_dir: dir.path().join("downloads"),
        ..RunConfig::default()
    };

    let summary = runner::run_all(&[server.url("/album")], &cfg, None)
        .await
        .unwrap();
    assert_eq!(
        summary,
        RunSummary {
            total: 1,
            succeeded: 1,
            failed: 0
        }
    );

    let album_dir = dir.path().join("downloads").join("Demo Album");
    assert_eq!(
        std::fs::read(album_dir.join("01 - Track One.mp3")).unwrap(),
        b"first track bytes"
    );
    assert_eq!(
        std::fs::read(album_dir.join("02 - Track Two.flac")).unwrap(),
        b"second track bytes"
    );
}

#[tokio::test]
async fn failed_track_does_not_abort_siblings() {
    let server = album_server::start(vec![
        Route::ok("/m/1.mp3", "uno"),
        Route::status("/m/2.mp3", 404),
        Route::ok("/m/3.mp3", "tres"),
    ]);
    let album = Album {
        title: "Mixed".into(),
        tracks: vec![
            Track {
                title: "One".into(),
                url: server.url("/m/1.mp3"),
            },
            Track {
                title: "Two".into(),
                url: server.url("/m/2.mp3"),
            },
            Track {
                title: "Three".into(),
                url: server.url("/m/3.mp3"),
            },
        ],
    };

    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        output_dir: dir.path().to_path_buf(),
        ..RunConfig::default()
    };
    let client = fetch::build_client(cfg.timeout).unwrap();

    let outcomes = download::download_album(&client, &album, &cfg, None)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3, "one outcome per track");
    assert!(matches!(outcomes[0].status, TrackStatus::Downloaded));
    assert!(matches!(outcomes[2].status, TrackStatus::Downloaded));
    match &outcomes[1].status {
        TrackStatus::Failed(DownloadError::Status { status, .. }) => assert_eq!(*status, 404),
        other => panic!("expected HTTP failure for track two, got {other:?}"),
    }

    let album_dir = dir.path().join("Mixed");
    assert!(album_dir.join("01 - One.mp3").exists());
    assert!(!album_dir.join("02 - Two.mp3").exists());
    assert!(album_dir.join("03 - Three.mp3").exists());
}

#[tokio::test]
async fn second_run_with_skip_existing_downloads_nothing_new() {
    let server = album_server::start(vec![
        Route::ok("/media/a.mp3", "alpha"),
        Route::ok("/media/b.mp3", "beta"),
    ]);
    let page = player_page(
        "Repeat Album",
        &[
            ("First", server.url("/media/a.mp3")),
            ("Second", server.url("/media/b.mp3")),
        ],
    );
    server.push(Route::ok("/album", page));

    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        output_dir: dir.path().join("out"),
        skip_existing: true,
        ..RunConfig::default()
    };
    let urls = vec![server.url("/album")];

    let first = runner::run_all(&urls, &cfg, None).await.unwrap();
    assert_eq!(first.succeeded, 1);
    assert_eq!(server.hits("/media/a.mp3"), 1);
    assert_eq!(server.hits("/media/b.mp3"), 1);

    let second = runner::run_all(&urls, &cfg, None).await.unwrap();
    assert_eq!(second.succeeded, 1);
    // The page is re-fetched, the media is not.
    assert_eq!(server.hits("/album"), 2);
    assert_eq!(server.hits("/media/a.mp3"), 1);
    assert_eq!(server.hits("/media/b.mp3"), 1);
}

#[tokio::test]
async fn dry_run_engine_makes_no_requests() {
    let server = album_server::start(vec![Route::ok("/m/x.mp3", "payload")]);
    let album = Album {
        title: "Phantom".into(),
        tracks: vec![Track {
            title: "Ghost".into(),
            url: server.url("/m/x.mp3"),
        }],
    };

    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let cfg = RunConfig {
        output_dir: out.clone(),
        dry_run: true,
        ..RunConfig::default()
    };
    let client = fetch::build_client(cfg.timeout).unwrap();

    let outcomes = download::download_album(&client, &album, &cfg, None)
        .await
        .unwrap();

    assert!(matches!(outcomes[0].status, TrackStatus::Planned));
    assert!(outcomes[0].status.is_success());
    assert_eq!(server.total_hits(), 0, "dry run must not touch the network");
    assert!(!out.exists(), "dry run must not create directories");
}

#[tokio::test]
async fn dry_run_pipeline_reports_success_without_downloads() {
    let server = album_server::start(vec![Route::ok("/media/t.mp3", "payload")]);
    let page = player_page("Planned Album", &[("Track", server.url("/media/t.mp3"))]);
    server.push(Route::ok("/album", page));

    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let cfg = RunConfig {
        output_dir: out.clone(),
        dry_run: true,
        ..RunConfig::default()
    };

    let summary = runner::run_all(&[server.url("/album")], &cfg, None)
        .await
        .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            total: 1,
            succeeded: 1,
            failed: 0
        }
    );
    assert_eq!(server.hits("/album"), 1, "the page itself is still fetched");
    assert_eq!(server.hits("/media/t.mp3"), 0);
    assert!(!out.exists());
}

#[tokio::test]
async fn pages_without_tracks_fail_without_stopping_the_run() {
    let server = album_server::start(vec![
        Route::ok(
            "/empty",
            "<html><body><h1>Coming Soon</h1></body></html>",
        ),
        Route::ok("/media/ok.mp3", "fine"),
    ]);
    let page = player_page("Good Album", &[("Keeper", server.url("/media/ok.mp3"))]);
    server.push(Route::ok("/good", page));

    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        output_dir: dir.path().join("dl"),
        ..RunConfig::default()
    };

    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    let summary = runner::run_all(
        &[server.url("/empty"), server.url("/good")],
        &cfg,
        Some(&tx),
    )
    .await
    .unwrap();
    drop(tx);

    assert_eq!(
        summary,
        RunSummary {
            total: 2,
            succeeded: 1,
            failed: 1
        }
    );
    assert!(dir
        .path()
        .join("dl")
        .join("Good Album")
        .join("01 - Keeper.mp3")
        .exists());

    // The empty page resolved (title from its heading) but had no tracks,
    // which fails the album stage rather than the scrape.
    let mut saw_album_failed = false;
    while let Some(event) = rx.recv().await {
        if let RunEvent::AlbumFailed { title, reason } = event {
            assert_eq!(title, "Coming Soon");
            assert_eq!(reason, "no songs found in album");
            saw_album_failed = true;
        }
    }
    assert!(saw_album_failed);
}

#[tokio::test]
async fn unreachable_page_is_isolated() {
    let server = album_server::start(vec![Route::ok("/media/s.mp3", "solid")]);
    let page = player_page("Survivor", &[("Solid", server.url("/media/s.mp3"))]);
    server.push(Route::ok("/good", page));

    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        output_dir: dir.path().join("dl"),
        ..RunConfig::default()
    };

    // "/nope" has no route and answers 404.
    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    let summary = runner::run_all(&[server.url("/nope"), server.url("/good")], &cfg, Some(&tx))
        .await
        .unwrap();
    drop(tx);

    assert_eq!(
        summary,
        RunSummary {
            total: 2,
            succeeded: 1,
            failed: 1
        }
    );
    assert!(dir
        .path()
        .join("dl")
        .join("Survivor")
        .join("01 - Solid.mp3")
        .exists());

    let mut saw_page_failed = false;
    while let Some(event) = rx.recv().await {
        if let RunEvent::PageFailed { url, reason } = event {
            assert_eq!(url, server.url("/nope"));
            assert_eq!(reason, "HTTP error 404: Not Found");
            saw_page_failed = true;
        }
    }
    assert!(saw_page_failed);
}

#[tokio::test]
async fn events_report_each_finished_track() {
    let server = album_server::start(vec![
        Route::ok("/media/a.mp3", "aaa"),
        Route::ok("/media/b.mp3", "bbb"),
    ]);
    let page = player_page(
        "Evented",
        &[
            ("A", server.url("/media/a.mp3")),
            ("B", server.url("/media/b.mp3")),
        ],
    );
    server.push(Route::ok("/album", page));

    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        output_dir: dir.path().join("dl"),
        ..RunConfig::default()
    };

    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    runner::run_all(&[server.url("/album")], &cfg, Some(&tx))
        .await
        .unwrap();
    drop(tx);

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    assert!(matches!(events.first(), Some(RunEvent::PageStarted { position: 1, total: 1, .. })));
    assert!(events.iter().any(
        |e| matches!(e, RunEvent::AlbumResolved { title, track_count: 2 } if title == "Evented")
    ));

    let mut done_counts: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            RunEvent::TrackFinished {
                progress,
                disposition,
                ..
            } => {
                assert_eq!(*disposition, TrackDisposition::Downloaded);
                assert_eq!(progress.track_count, 2);
                Some(progress.tracks_done)
            }
            _ => None,
        })
        .collect();
    done_counts.sort_unstable();
    assert_eq!(done_counts, [1, 2]);

    assert!(matches!(
        events.last(),
        Some(RunEvent::AlbumFinished { failures, .. }) if failures.is_empty()
    ));
}
