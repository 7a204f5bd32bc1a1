//! `ttdl video`, `ttdl mp3`, `ttdl open` – the download form buttons.

use std::sync::Arc;
use ttdl_core::api::VideoForm;
use ttdl_core::dispatch::Dispatcher;
use ttdl_core::sink::{FileSink, UiSink};
use ttdl_core::status::Status;

use crate::cli::Context;

pub fn dispatcher(ctx: &Context) -> Dispatcher {
    Dispatcher::new(
        Arc::clone(&ctx.transport),
        Arc::clone(&ctx.sink) as Arc<dyn UiSink>,
        Arc::clone(&ctx.files) as Arc<dyn FileSink>,
    )
}

pub async fn run_video(ctx: &Context, url: &str, quality: Option<String>) -> Status {
    let mut form = VideoForm::new(url);
    form.quality = quality;
    let status = dispatcher(ctx).download_video(&form).await;
    tracing::info!(dir = %ctx.files.dir().display(), "video command finished: {status}");
    status
}

pub async fn run_mp3(ctx: &Context, url: &str) -> Status {
    dispatcher(ctx).download_mp3(url).await
}

pub fn run_open(ctx: &Context, url: &str) -> Status {
    dispatcher(ctx).open_in_new_tab(url).unwrap_or_default()
}
