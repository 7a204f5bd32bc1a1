//! Filename derivation for downloaded media.
//!
//! The backend suggests a name through `Content-Disposition`; when it does
//! not, each download kind has a fixed default.

mod content_disposition;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use sanitize::sanitize_filename;

/// Saved name for a video when the response carries no usable filename.
pub const DEFAULT_VIDEO_FILENAME: &str = "tiktok_video.mp4";

/// Saved name for the binary MP3 download.
pub const DEFAULT_AUDIO_FILENAME: &str = "audio.mp3";

/// Picks the filename for a download: the `Content-Disposition` suggestion
/// when present and parseable, otherwise `default`.
///
/// # Examples
///
/// - `download_filename(Some("attachment; filename=\"clip.mp4\""), DEFAULT_VIDEO_FILENAME)` → `"clip.mp4"`
/// - `download_filename(None, DEFAULT_VIDEO_FILENAME)` → `"tiktok_video.mp4"`
pub fn download_filename(content_disposition: Option<&str>, default: &str) -> String {
    content_disposition
        .and_then(parse_content_disposition_filename)
        .unwrap_or_else(|| default.to_string())
}
