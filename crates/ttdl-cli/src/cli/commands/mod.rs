//! CLI command handlers. Each command is in its own file.

mod audio;
mod contact;
mod download;
mod preview;
mod story;
mod watch;

pub use audio::run_audio;
pub use contact::run_contact;
pub use download::{run_mp3, run_open, run_video};
pub use preview::run_preview;
pub use story::run_story;
pub use watch::run_watch;
