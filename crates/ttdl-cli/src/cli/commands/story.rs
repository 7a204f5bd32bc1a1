//! `ttdl story <username>` – stories widget.

use ttdl_core::api::StoryForm;
use ttdl_core::status::Status;
use ttdl_core::stories::fetch_story;

use crate::cli::Context;

pub async fn run_story(ctx: &Context, username: &str) -> Status {
    let form = StoryForm {
        username: username.to_string(),
    };
    fetch_story(ctx.transport.as_ref(), ctx.sink.as_ref(), &form).await
}
