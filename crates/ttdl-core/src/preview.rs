//! Preview Renderer: `/thumbnail` metadata into the preview card.

use crate::api::{self, non_empty, PreviewMetadata};
use crate::sink::{PreviewCard, UiSink};
use crate::status::{report, Status};
use crate::transport::Transport;

/// Thumbnail shown when the backend has none.
pub const PLACEHOLDER_THUMBNAIL: &str = "/static/images/placeholder-thumbnail.png";
pub const NO_TITLE: &str = "No title available";

const FETCHING: &str = "Fetching preview...";
const LOADED: &str = "Preview loaded!";
const NOT_AVAILABLE: &str = "Preview not available: ";
const UNKNOWN: &str = "unknown";
const COULD_NOT_FETCH: &str = "Could not fetch preview";

/// Card for a successful metadata answer, with the fallbacks applied.
pub fn card_from_metadata(meta: &PreviewMetadata) -> PreviewCard {
    PreviewCard {
        thumbnail: non_empty(&meta.thumbnail)
            .unwrap_or(PLACEHOLDER_THUMBNAIL)
            .to_string(),
        title: non_empty(&meta.title).unwrap_or(NO_TITLE).to_string(),
        uploader: non_empty(&meta.uploader)
            .map(|u| format!("By: {u}"))
            .unwrap_or_default(),
    }
}

/// Fetches metadata for `url` and renders the card or an error status.
///
/// The card is hidden first and shown again only on `ok: true`. Failures of
/// any kind end as a status; nothing is returned to the caller but the final
/// status.
pub async fn render_preview(transport: &dyn Transport, sink: &dyn UiSink, url: &str) -> Status {
    sink.render_preview(None);
    report(sink, Status::loading(FETCHING));

    let status = match api::fetch_preview(transport, url).await {
        Ok(meta) if meta.ok => {
            sink.render_preview(Some(&card_from_metadata(&meta)));
            Status::success(LOADED)
        }
        Ok(meta) => Status::error(format!(
            "{NOT_AVAILABLE}{}",
            non_empty(&meta.error).unwrap_or(UNKNOWN)
        )),
        Err(err) => {
            tracing::error!(url, "preview fetch failed: {err}");
            Status::error(COULD_NOT_FETCH)
        }
    };
    report(sink, status)
}
