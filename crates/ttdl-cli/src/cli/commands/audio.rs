//! `ttdl audio <url>` – backend-hosted MP3 with an audio preview.

use ttdl_core::audio::preview_audio;
use ttdl_core::status::Status;

use crate::cli::Context;

pub async fn run_audio(ctx: &Context, url: &str) -> Status {
    preview_audio(ctx.transport.as_ref(), ctx.sink.as_ref(), url).await
}
