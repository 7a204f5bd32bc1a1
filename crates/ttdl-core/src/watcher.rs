//! Input Watcher: turns input changes into debounced preview fetches.

use std::sync::Arc;
use std::time::Duration;

use crate::config::TtdlConfig;
use crate::debounce::Debouncer;
use crate::preview;
use crate::sink::UiSink;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchSettings {
    pub debounce: Duration,
    /// Trimmed inputs shorter than this (in characters) never reach the backend.
    pub min_url_len: usize,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(700),
            min_url_len: 6,
        }
    }
}

impl From<&TtdlConfig> for WatchSettings {
    fn from(cfg: &TtdlConfig) -> Self {
        Self {
            debounce: cfg.debounce(),
            min_url_len: cfg.min_url_len,
        }
    }
}

/// What an input change led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Too short: preview hidden, nothing scheduled.
    Suppressed,
    /// A preview fetch is scheduled after the quiet period.
    Scheduled,
}

/// Watches the URL input of the downloader form.
///
/// A fetch that has already been sent is never cancelled; if responses come
/// back out of order, the last one handled owns the card.
pub struct InputWatcher {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn UiSink>,
    debouncer: Debouncer,
    min_url_len: usize,
}

impl InputWatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        sink: Arc<dyn UiSink>,
        settings: WatchSettings,
    ) -> Self {
        Self {
            transport,
            sink,
            debouncer: Debouncer::new(settings.debounce),
            min_url_len: settings.min_url_len,
        }
    }

    /// Handles one input change (one keystroke, paste, or edited line).
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_input(&self, value: &str) -> InputOutcome {
        let url = value.trim();
        if url.chars().count() < self.min_url_len {
            self.debouncer.cancel();
            self.sink.render_preview(None);
            return InputOutcome::Suppressed;
        }

        let url = url.to_string();
        let transport = Arc::clone(&self.transport);
        let sink = Arc::clone(&self.sink);
        self.debouncer.schedule(async move {
            preview::render_preview(transport.as_ref(), sink.as_ref(), &url).await;
        });
        tracing::debug!(
            delay_ms = self.debouncer.delay().as_millis() as u64,
            "preview scheduled"
        );
        InputOutcome::Scheduled
    }

    /// True while a scheduled fetch is still waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
