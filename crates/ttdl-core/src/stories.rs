//! Stories widget: one multipart POST, JSON `message` or `error` back.

use crate::api::{self, non_empty, StoryForm};
use crate::sink::UiSink;
use crate::status::{report, Status};
use crate::transport::Transport;

const FETCHING: &str = "Fetching story...";
const FAILED: &str = "Could not fetch story.";

pub async fn fetch_story(
    transport: &dyn Transport,
    sink: &dyn UiSink,
    form: &StoryForm,
) -> Status {
    report(sink, Status::loading(FETCHING));

    let status = match api::submit_story(transport, form).await {
        Ok(result) => match non_empty(&result.error) {
            Some(error) => Status::error(format!("❌ {error}")),
            None => Status::success(format!(
                "✅ {}",
                result.message.as_deref().unwrap_or_default()
            )),
        },
        Err(err) => {
            tracing::error!(username = %form.username, "story fetch failed: {err}");
            Status::error(FAILED)
        }
    };
    report(sink, status)
}
