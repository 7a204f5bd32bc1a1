//! Terminal rendering of the UI regions.

use std::process::{Command, Stdio};
use tokio::sync::watch;
use ttdl_core::sink::{AudioPreview, PreviewCard, UiSink};
use ttdl_core::status::Status;

/// Prints statuses and cards to stdout; opens URLs with `xdg-open`.
pub struct TerminalSink {
    status: watch::Sender<Status>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            status: watch::channel(Status::Idle).0,
        }
    }

    /// Follows the status region, e.g. to wait for a background preview.
    pub fn status_updates(&self) -> watch::Receiver<Status> {
        self.status.subscribe()
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

/// One status line, or `None` when idle.
pub fn status_line(status: &Status) -> Option<String> {
    let tag = match status {
        Status::Idle => return None,
        Status::Loading(_) => "[..]",
        Status::Success(_) => "[ok]",
        Status::Error(_) => "[error]",
    };
    Some(format!("{tag} {}", status.text()))
}

impl UiSink for TerminalSink {
    fn render_status(&self, status: &Status) {
        if let Some(line) = status_line(status) {
            println!("{line}");
        }
        self.status.send_replace(status.clone());
    }

    fn render_preview(&self, card: Option<&PreviewCard>) {
        let Some(card) = card else { return };
        println!("  title:     {}", card.title);
        if !card.uploader.is_empty() {
            println!("  {}", card.uploader);
        }
        println!("  thumbnail: {}", card.thumbnail);
    }

    fn render_audio_preview(&self, preview: Option<&AudioPreview>) {
        let Some(preview) = preview else { return };
        println!("  title: {}", preview.title);
        if !preview.thumbnail.is_empty() {
            println!("  thumbnail: {}", preview.thumbnail);
        }
        println!("  audio: {} (save as {})", preview.audio_url, preview.download_name);
    }

    fn open_external(&self, url: &str) {
        let spawned = Command::new("xdg-open")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(err) = spawned {
            tracing::warn!("xdg-open failed: {err}");
            println!("Open in your browser: {url}");
        }
    }

    fn reset_form(&self) {
        tracing::debug!("contact form cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines_are_tagged() {
        assert_eq!(status_line(&Status::Idle), None);
        assert_eq!(
            status_line(&Status::loading("Fetching preview...")).as_deref(),
            Some("[..] Fetching preview...")
        );
        assert_eq!(
            status_line(&Status::success("MP3 downloaded!")).as_deref(),
            Some("[ok] MP3 downloaded!")
        );
        assert_eq!(
            status_line(&Status::error("Paste a TikTok URL first")).as_deref(),
            Some("[error] Paste a TikTok URL first")
        );
    }

    #[test]
    fn status_updates_follow_renders() {
        let sink = TerminalSink::new();
        let updates = sink.status_updates();
        sink.render_status(&Status::success("Preview loaded!"));
        assert_eq!(*updates.borrow(), Status::success("Preview loaded!"));
    }
}
