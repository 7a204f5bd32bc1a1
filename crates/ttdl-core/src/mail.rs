//! Contact form mailer widget.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::config::MailConfig;
use crate::error::FlowError;
use crate::sink::UiSink;
use crate::status::{report, Status};
use crate::transport::{Request, Transport};

const SENDING: &str = "Sending...";
const SENT: &str = "Message sent successfully! 🚀";
const FAILED: &str = "Oops! Something went wrong.";

/// Fields of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Third-party form-submission integration.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_form(&self, form: &ContactForm) -> Result<(), FlowError>;
}

/// Posts the form as template parameters to a mail-sending HTTP API.
pub struct HttpMailer {
    transport: Arc<dyn Transport>,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(transport: Arc<dyn Transport>, config: MailConfig) -> Self {
        Self { transport, config }
    }

    fn payload(&self, form: &ContactForm) -> serde_json::Value {
        let mut body = json!({
            "service_id": self.config.service_id,
            "template_id": self.config.template_id,
            "template_params": form,
        });
        if let Some(user_id) = &self.config.user_id {
            body["user_id"] = json!(user_id);
        }
        body
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_form(&self, form: &ContactForm) -> Result<(), FlowError> {
        let request = Request::json(self.config.endpoint.clone(), self.payload(form));
        let response = self.transport.post(request).await?;
        if !response.is_success() {
            return Err(FlowError::Http {
                status: response.status,
                body: response.text(),
            });
        }
        Ok(())
    }
}

/// Sends the form; clears it (and the visible inputs) only on success.
pub async fn submit_contact(
    mailer: &dyn Mailer,
    sink: &dyn UiSink,
    form: &mut ContactForm,
) -> Status {
    report(sink, Status::loading(SENDING));

    let status = match mailer.send_form(form).await {
        Ok(()) => {
            form.reset();
            sink.reset_form();
            Status::success(SENT)
        }
        Err(err) => {
            tracing::error!("contact form failed: {err}");
            Status::error(FAILED)
        }
    };
    report(sink, status)
}
