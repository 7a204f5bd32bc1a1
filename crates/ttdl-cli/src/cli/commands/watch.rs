//! `ttdl watch` – stdin-driven URL input with a debounced live preview.

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use ttdl_core::api::VideoForm;
use ttdl_core::audio::preview_audio;
use ttdl_core::sink::UiSink;
use ttdl_core::status::Status;
use ttdl_core::watcher::{InputWatcher, WatchSettings};

use super::download::dispatcher;
use crate::cli::Context;

/// A line typed in watch mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchLine {
    /// New value of the URL input.
    Input(String),
    Video(Option<String>),
    Mp3,
    Audio,
    Open,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> WatchLine {
    let Some(command) = line.trim().strip_prefix(':') else {
        return WatchLine::Input(line.to_string());
    };
    let mut words = command.split_whitespace();
    match words.next().unwrap_or("") {
        "video" => WatchLine::Video(words.next().map(str::to_string)),
        "mp3" => WatchLine::Mp3,
        "audio" => WatchLine::Audio,
        "open" => WatchLine::Open,
        "quit" | "q" => WatchLine::Quit,
        other => WatchLine::Unknown(other.to_string()),
    }
}

/// Resolves once no preview is waiting for its quiet period and the status
/// region no longer shows a loading message.
pub async fn wait_for_preview(watcher: &InputWatcher, updates: &mut watch::Receiver<Status>) {
    loop {
        let loading = matches!(*updates.borrow_and_update(), Status::Loading(_));
        if !loading && !watcher.is_pending() {
            return;
        }
        if updates.changed().await.is_err() {
            return;
        }
    }
}

/// Returns the last status shown.
pub async fn run_watch(ctx: &Context) -> Result<Status> {
    let watcher = InputWatcher::new(
        Arc::clone(&ctx.transport),
        Arc::clone(&ctx.sink) as Arc<dyn UiSink>,
        WatchSettings::from(&ctx.cfg),
    );
    let actions = dispatcher(ctx);
    let mut status_updates = ctx.sink.status_updates();
    let mut current = String::new();

    println!("Paste a URL; :video [quality], :mp3, :audio, :open act on it, :quit exits.");
    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            WatchLine::Input(value) => {
                watcher.on_input(&value);
                current = value;
            }
            WatchLine::Video(quality) => {
                let mut form = VideoForm::new(current.as_str());
                form.quality = quality;
                actions.download_video(&form).await;
            }
            WatchLine::Mp3 => {
                actions.download_mp3(&current).await;
            }
            WatchLine::Audio => {
                preview_audio(ctx.transport.as_ref(), ctx.sink.as_ref(), &current).await;
            }
            WatchLine::Open => {
                actions.open_in_new_tab(&current);
            }
            WatchLine::Quit => break,
            WatchLine::Unknown(cmd) => println!("unknown command :{cmd}"),
        }
    }

    // Input closed: let a scheduled or in-flight preview finish before exiting.
    let limit = ctx.cfg.debounce() + ctx.cfg.request_timeout();
    if tokio::time::timeout(limit, wait_for_preview(&watcher, &mut status_updates))
        .await
        .is_err()
    {
        tracing::warn!("preview did not settle within {:?}", limit);
    }

    let last = status_updates.borrow().clone();
    Ok(last)
}
