//! Status Reporter: the single status/message slot shared by every flow.

use std::fmt;

use crate::sink::UiSink;

/// What the status region currently shows. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    /// Transient/informational ("Fetching preview...").
    Loading(String),
    Success(String),
    Error(String),
}

impl Status {
    pub fn loading(text: impl Into<String>) -> Self {
        Status::Loading(text.into())
    }

    pub fn success(text: impl Into<String>) -> Self {
        Status::Success(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Status::Error(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Status::Idle => "",
            Status::Loading(t) | Status::Success(t) | Status::Error(t) => t,
        }
    }

    /// Style class for the message region (`""` when idle).
    pub fn style_class(&self) -> &'static str {
        match self {
            Status::Idle => "",
            Status::Loading(_) => "info",
            Status::Success(_) => "success",
            Status::Error(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Overwrites the status slot and hands the status back to the caller.
pub fn report(sink: &dyn UiSink, status: Status) -> Status {
    sink.render_status(&status);
    status
}
