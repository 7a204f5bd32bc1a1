//! Audio preview variant: metadata, then MP3 link, then an inline player.
//!
//! Unlike the binary MP3 download, nothing is saved automatically; the
//! backend hosts the converted file and the preview links to it.

use crate::api::{self, non_empty};
use crate::error::FlowError;
use crate::sink::{AudioPreview, UiSink};
use crate::status::{report, Status};
use crate::transport::Transport;

const CONVERTING: &str = "Converting to MP3...";
const METADATA_FAILED: &str = "Failed to fetch metadata.";
const CONVERSION_FAILED: &str = "MP3 conversion failed.";
const DEFAULT_TITLE: &str = "TikTok Audio";

async fn build_preview(
    transport: &dyn Transport,
    url: &str,
) -> Result<AudioPreview, FlowError> {
    let meta = api::fetch_preview(transport, url).await?;
    if !meta.ok {
        let msg = non_empty(&meta.error).unwrap_or(METADATA_FAILED);
        return Err(FlowError::Application(msg.to_string()));
    }

    let media = api::fetch_mp3_link(transport, url).await?;
    let audio_url = match (media.ok, non_empty(&media.url)) {
        (true, Some(link)) => link.to_string(),
        _ => {
            let msg = non_empty(&media.error).unwrap_or(CONVERSION_FAILED);
            return Err(FlowError::Application(msg.to_string()));
        }
    };

    let title = non_empty(&media.title);
    Ok(AudioPreview {
        thumbnail: non_empty(&meta.thumbnail).unwrap_or_default().to_string(),
        title: title.unwrap_or(DEFAULT_TITLE).to_string(),
        audio_url,
        download_name: format!("{}.mp3", title.unwrap_or("audio")),
    })
}

/// Runs the two-step audio preview for `url`.
///
/// Empty input is ignored (status left untouched). On success the status
/// region is cleared and the preview shown.
pub async fn preview_audio(transport: &dyn Transport, sink: &dyn UiSink, url: &str) -> Status {
    let url = url.trim();
    if url.is_empty() {
        return Status::Idle;
    }

    report(sink, Status::Idle);
    sink.render_audio_preview(None);
    report(sink, Status::loading(CONVERTING));

    let status = match build_preview(transport, url).await {
        Ok(preview) => {
            sink.render_audio_preview(Some(&preview));
            Status::Idle
        }
        Err(FlowError::Application(msg)) => Status::error(msg),
        Err(err) => {
            tracing::error!(url, "audio preview failed: {err}");
            Status::error(format!("Error: {err}"))
        }
    };
    report(sink, status)
}
