//! Where flows render: the UI regions ([`UiSink`]) and saved files ([`FileSink`]).
//!
//! Every render overwrites its region; nothing is queued or merged.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::sync::watch;

use crate::api::DownloadedFile;
use crate::filename::sanitize_filename;
use crate::status::Status;

/// Contents of the preview card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCard {
    pub thumbnail: String,
    pub title: String,
    /// `"By: <name>"`, or empty when the uploader is unknown.
    pub uploader: String,
}

/// Inline audio player shown by the audio preview flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPreview {
    pub thumbnail: String,
    pub title: String,
    pub audio_url: String,
    /// Name suggested for the direct download link.
    pub download_name: String,
}

/// The visible regions a widget writes to.
pub trait UiSink: Send + Sync {
    /// Replaces the status/message region.
    fn render_status(&self, status: &Status);

    /// Shows the preview card, or hides it when `None`.
    fn render_preview(&self, card: Option<&PreviewCard>);

    /// Shows the inline audio preview, or hides it when `None`.
    fn render_audio_preview(&self, _preview: Option<&AudioPreview>) {}

    /// Opens `url` in a new browsing context.
    fn open_external(&self, _url: &str) {}

    /// Clears the form inputs after a successful submission.
    fn reset_form(&self) {}
}

/// Delivers a downloaded body to the user.
pub trait FileSink: Send + Sync {
    /// Returns where the file ended up.
    fn save(&self, file: &DownloadedFile) -> io::Result<PathBuf>;
}

/// Snapshot of every region held by a [`MemorySink`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub status: Status,
    pub preview: Option<PreviewCard>,
    pub audio_preview: Option<AudioPreview>,
    /// URLs handed to `open_external`, oldest first.
    pub opened: Vec<String>,
    pub form_resets: usize,
    /// Number of status renders so far.
    pub status_renders: usize,
}

/// Headless sink keeping the current regions in memory.
///
/// Observers can follow changes through [`MemorySink::subscribe`].
#[derive(Debug)]
pub struct MemorySink {
    state: watch::Sender<UiState>,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    pub fn new() -> Self {
        let (state, _) = watch::channel(UiState::default());
        Self { state }
    }

    pub fn snapshot(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }
}

impl UiSink for MemorySink {
    fn render_status(&self, status: &Status) {
        self.state.send_modify(|s| {
            s.status = status.clone();
            s.status_renders += 1;
        });
    }

    fn render_preview(&self, card: Option<&PreviewCard>) {
        self.state.send_modify(|s| s.preview = card.cloned());
    }

    fn render_audio_preview(&self, preview: Option<&AudioPreview>) {
        self.state.send_modify(|s| s.audio_preview = preview.cloned());
    }

    fn open_external(&self, url: &str) {
        self.state.send_modify(|s| s.opened.push(url.to_string()));
    }

    fn reset_form(&self) {
        self.state.send_modify(|s| s.form_resets += 1);
    }
}

/// Saves downloads into a directory.
///
/// The body is first written to a transient `.part` file next to the target
/// and then persisted under its final name; the transient file is removed on
/// every failure path. Existing files are never overwritten: `clip.mp4`
/// becomes `clip (1).mp4`, `clip (2).mp4`, ...
#[derive(Debug, Clone)]
pub struct DirectoryFileSink {
    dir: PathBuf,
}

impl DirectoryFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectoryFileSink {
    fn save(&self, file: &DownloadedFile) -> io::Result<PathBuf> {
        let name = sanitize_filename(&file.filename);
        if name.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unusable filename {:?}", file.filename),
            ));
        }
        fs::create_dir_all(&self.dir)?;

        let mut transient = tempfile::Builder::new()
            .prefix(".ttdl-")
            .suffix(".part")
            .tempfile_in(&self.dir)?;
        transient.write_all(&file.body)?;
        transient.flush()?;

        let target = available_path(&self.dir, &name);
        transient.persist_noclobber(&target).map_err(|e| e.error)?;
        tracing::info!(path = %target.display(), bytes = file.body.len(), "download saved");
        Ok(target)
    }
}

/// First of `name`, `stem (1).ext`, `stem (2).ext`, ... that does not exist in `dir`.
fn available_path(dir: &Path, name: &str) -> PathBuf {
    let first = dir.join(name);
    if !first.exists() {
        return first;
    }
    let as_path = Path::new(name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let ext = as_path.extension().map(|e| e.to_string_lossy().into_owned());
    (1u32..)
        .map(|n| match &ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|p| !p.exists())
        .unwrap_or(first)
}
