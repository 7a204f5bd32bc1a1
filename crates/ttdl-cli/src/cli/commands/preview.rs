//! `ttdl preview <url>` – show the preview card.

use ttdl_core::dispatch::require_url;
use ttdl_core::preview::render_preview;
use ttdl_core::status::{report, Status};

use crate::cli::Context;

pub async fn run_preview(ctx: &Context, url: &str) -> Status {
    match require_url(url) {
        Ok(url) => render_preview(ctx.transport.as_ref(), ctx.sink.as_ref(), url).await,
        Err(err) => report(ctx.sink.as_ref(), Status::error(err.to_string())),
    }
}
