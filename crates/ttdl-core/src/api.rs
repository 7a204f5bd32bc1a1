//! Backend endpoints, their payloads, and one helper per exchange.
//!
//! JSON endpoints are decoded whatever the HTTP status: the backend reports
//! failures as `{ok: false, error}` with 4xx/5xx codes. Binary endpoints turn
//! non-2xx into [`FlowError::Http`] carrying the body text.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::FlowError;
use crate::filename;
use crate::transport::{Request, Transport};

pub const THUMBNAIL: &str = "/thumbnail";
pub const DOWNLOAD: &str = "/download";
pub const DOWNLOAD_MP3: &str = "/download-mp3";
pub const DOWNLOAD_STORY: &str = "/download_story";

/// Answer of `/thumbnail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewMetadata {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Answer of the JSON variant of `/download-mp3`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaResult {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Answer of `/download_story`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A binary body plus the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub filename: String,
    pub body: Vec<u8>,
}

/// Fields of the video download form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoForm {
    pub url: String,
    /// `best`, `worst` or a backend format string; omitted when `None`.
    pub quality: Option<String>,
}

impl VideoForm {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            quality: None,
        }
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Multipart fields in form order.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![("url".to_string(), self.url.trim().to_string())];
        if let Some(q) = self.quality.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            fields.push(("quality".to_string(), q.to_string()));
        }
        fields
    }
}

/// Fields of the stories form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryForm {
    pub username: String,
}

impl StoryForm {
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![("username".to_string(), self.username.trim().to_string())]
    }
}

/// `Some(s)` only for present, non-empty strings (the backend sends `""` for unknowns).
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

pub async fn fetch_preview(
    transport: &dyn Transport,
    url: &str,
) -> Result<PreviewMetadata, FlowError> {
    let response = transport
        .post(Request::json(THUMBNAIL, json!({ "url": url })))
        .await?;
    Ok(response.json()?)
}

/// JSON variant of `/download-mp3`: the backend hosts the file and returns its URL.
pub async fn fetch_mp3_link(
    transport: &dyn Transport,
    url: &str,
) -> Result<MediaResult, FlowError> {
    let response = transport
        .post(Request::json(DOWNLOAD_MP3, json!({ "url": url })))
        .await?;
    Ok(response.json()?)
}

pub async fn fetch_video(
    transport: &dyn Transport,
    form: &VideoForm,
) -> Result<DownloadedFile, FlowError> {
    fetch_binary(
        transport,
        Request::form(DOWNLOAD, form.fields()),
        filename::DEFAULT_VIDEO_FILENAME,
        true,
    )
    .await
}

/// Binary variant of `/download-mp3`; always saved under the fixed audio name.
pub async fn fetch_mp3_file(
    transport: &dyn Transport,
    url: &str,
) -> Result<DownloadedFile, FlowError> {
    fetch_binary(
        transport,
        Request::form(DOWNLOAD_MP3, vec![("url".to_string(), url.to_string())]),
        filename::DEFAULT_AUDIO_FILENAME,
        false,
    )
    .await
}

pub async fn submit_story(
    transport: &dyn Transport,
    form: &StoryForm,
) -> Result<StoryResult, FlowError> {
    let response = transport
        .post(Request::form(DOWNLOAD_STORY, form.fields()))
        .await?;
    Ok(response.json()?)
}

async fn fetch_binary(
    transport: &dyn Transport,
    request: Request,
    default_name: &str,
    honor_disposition: bool,
) -> Result<DownloadedFile, FlowError> {
    let response = transport.post(request).await?;
    if !response.is_success() {
        return Err(FlowError::Http {
            status: response.status,
            body: response.text(),
        });
    }
    let filename = if honor_disposition {
        filename::download_filename(response.header("content-disposition"), default_name)
    } else {
        default_name.to_string()
    };
    Ok(DownloadedFile {
        filename,
        body: response.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{json_response, ScriptedTransport};
    use crate::transport::{RequestBody, Response};

    #[test]
    fn preview_metadata_tolerates_missing_fields() {
        let meta: PreviewMetadata = serde_json::from_str(r#"{"ok":true,"title":"Cat video"}"#).unwrap();
        assert!(meta.ok);
        assert_eq!(meta.title.as_deref(), Some("Cat video"));
        assert!(meta.thumbnail.is_none());

        let failed: PreviewMetadata = serde_json::from_str(r#"{"error":"No URL provided"}"#).unwrap();
        assert!(!failed.ok);
        assert_eq!(failed.error.as_deref(), Some("No URL provided"));
    }

    #[test]
    fn non_empty_filters_blank_strings() {
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }

    #[test]
    fn video_form_fields() {
        let f = VideoForm::new("  https://vt.tiktok.com/ZS123/ ");
        assert_eq!(
            f.fields(),
            vec![("url".to_string(), "https://vt.tiktok.com/ZS123/".to_string())]
        );
        let f = f.with_quality("worst");
        assert_eq!(f.fields()[1], ("quality".to_string(), "worst".to_string()));
        assert_eq!(VideoForm::new("u").with_quality(" ").fields().len(), 1);
    }

    #[tokio::test]
    async fn fetch_preview_sends_json_url() {
        let transport = ScriptedTransport::new();
        transport.respond(THUMBNAIL, json_response(200, json!({"ok": true, "title": "t"})));
        let meta = fetch_preview(&transport, "https://vt.tiktok.com/ZS123/").await.unwrap();
        assert_eq!(meta.title.as_deref(), Some("t"));

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].path, "/thumbnail");
        assert_eq!(
            sent[0].body,
            RequestBody::Json(json!({"url": "https://vt.tiktok.com/ZS123/"}))
        );
    }

    #[tokio::test]
    async fn fetch_preview_decodes_error_status_body() {
        let transport = ScriptedTransport::new();
        transport.respond(
            THUMBNAIL,
            json_response(500, json!({"ok": false, "error": "Could not extract metadata"})),
        );
        let meta = fetch_preview(&transport, "https://x/").await.unwrap();
        assert!(!meta.ok);
        assert_eq!(meta.error.as_deref(), Some("Could not extract metadata"));
    }

    #[tokio::test]
    async fn fetch_preview_non_json_is_decode_error() {
        let transport = ScriptedTransport::new();
        transport.respond(THUMBNAIL, Response::new(502, vec![], b"<html>".to_vec()));
        let err = fetch_preview(&transport, "https://x/").await.unwrap_err();
        assert!(matches!(err, FlowError::Decode(_)));
    }

    #[tokio::test]
    async fn fetch_video_names_file_from_header() {
        let transport = ScriptedTransport::new();
        transport.respond(
            DOWNLOAD,
            Response::new(
                200,
                vec![(
                    "Content-Disposition".to_string(),
                    "attachment; filename=\"clip.mp4\"".to_string(),
                )],
                b"video".to_vec(),
            ),
        );
        let file = fetch_video(&transport, &VideoForm::new("https://x/")).await.unwrap();
        assert_eq!(file.filename, "clip.mp4");
        assert_eq!(file.body, b"video");
    }

    #[tokio::test]
    async fn fetch_video_http_error_carries_body() {
        let transport = ScriptedTransport::new();
        transport.respond(DOWNLOAD, Response::new(400, vec![], b"No URL provided".to_vec()));
        match fetch_video(&transport, &VideoForm::new("https://x/")).await {
            Err(FlowError::Http { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "No URL provided");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_mp3_file_ignores_disposition() {
        let transport = ScriptedTransport::new();
        transport.respond(
            DOWNLOAD_MP3,
            Response::new(
                200,
                vec![(
                    "Content-Disposition".to_string(),
                    "attachment; filename=\"abc_title.mp3\"".to_string(),
                )],
                b"ID3".to_vec(),
            ),
        );
        let file = fetch_mp3_file(&transport, "https://x/").await.unwrap();
        assert_eq!(file.filename, "audio.mp3");
        assert_eq!(
            transport.requests()[0].body,
            RequestBody::Form(vec![("url".to_string(), "https://x/".to_string())])
        );
    }
}
