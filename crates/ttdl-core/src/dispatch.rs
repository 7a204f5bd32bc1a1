//! Download Dispatcher: explicit user actions on the downloader form.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{self, DownloadedFile, VideoForm};
use crate::error::FlowError;
use crate::sink::{FileSink, UiSink};
use crate::status::{report, Status};
use crate::transport::Transport;

pub const PASTE_URL_FIRST: &str = "Paste a TikTok URL first";

/// Status texts of one download kind.
struct Texts {
    preparing: &'static str,
    done: &'static str,
    http_failed: &'static str,
    generic: &'static str,
}

const VIDEO: Texts = Texts {
    preparing: "Preparing download...",
    done: "Download completed!",
    http_failed: "Download failed: ",
    generic: "Error while downloading video.",
};

const MP3: Texts = Texts {
    preparing: "Preparing MP3...",
    done: "MP3 downloaded!",
    http_failed: "MP3 failed: ",
    generic: "Error while downloading MP3.",
};

/// Trimmed URL, or the validation error every action shows for empty input.
pub fn require_url(raw: &str) -> Result<&str, FlowError> {
    let url = raw.trim();
    if url.is_empty() {
        Err(FlowError::Validation(PASTE_URL_FIRST))
    } else {
        Ok(url)
    }
}

/// Runs the download, open and preview-tab actions of one form.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn UiSink>,
    files: Arc<dyn FileSink>,
}

impl Dispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        sink: Arc<dyn UiSink>,
        files: Arc<dyn FileSink>,
    ) -> Self {
        Self {
            transport,
            sink,
            files,
        }
    }

    /// Submits the whole form to `/download` and saves the returned video.
    pub async fn download_video(&self, form: &VideoForm) -> Status {
        if let Err(err) = require_url(&form.url) {
            return self.finish(&VIDEO, Err(err));
        }
        report(self.sink.as_ref(), Status::loading(VIDEO.preparing));
        let result = match api::fetch_video(self.transport.as_ref(), form).await {
            Ok(file) => self.deliver(file).await,
            Err(err) => Err(err),
        };
        self.finish(&VIDEO, result)
    }

    /// Posts only the URL to `/download-mp3` and saves the body as `audio.mp3`.
    pub async fn download_mp3(&self, url: &str) -> Status {
        let url = match require_url(url) {
            Ok(url) => url,
            Err(err) => return self.finish(&MP3, Err(err)),
        };
        report(self.sink.as_ref(), Status::loading(MP3.preparing));
        let result = match api::fetch_mp3_file(self.transport.as_ref(), url).await {
            Ok(file) => self.deliver(file).await,
            Err(err) => Err(err),
        };
        self.finish(&MP3, result)
    }

    /// Opens the original page in a new browsing context. No network call.
    ///
    /// Returns the rendered error status, or `None` when the URL was handed off.
    pub fn open_in_new_tab(&self, url: &str) -> Option<Status> {
        match require_url(url) {
            Ok(url) => {
                self.sink.open_external(url);
                None
            }
            Err(err) => Some(report(self.sink.as_ref(), Status::error(err.to_string()))),
        }
    }

    /// Saves on tokio's blocking pool; file sinks do synchronous disk I/O.
    async fn deliver(&self, file: DownloadedFile) -> Result<PathBuf, FlowError> {
        let files = Arc::clone(&self.files);
        let saved = tokio::task::spawn_blocking(move || files.save(&file))
            .await
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        Ok(saved?)
    }

    fn finish(&self, texts: &Texts, result: Result<PathBuf, FlowError>) -> Status {
        let status = match result {
            Ok(_) => Status::success(texts.done),
            Err(FlowError::Validation(msg)) => Status::error(msg),
            Err(FlowError::Http { status, body }) => {
                tracing::warn!(status, "download rejected by backend");
                Status::error(format!("{}{}", texts.http_failed, body))
            }
            Err(err) => {
                tracing::error!("download failed: {err}");
                Status::error(texts.generic)
            }
        };
        report(self.sink.as_ref(), status)
    }
}
