//! `ttdl contact --name --email --message` – contact form.

use std::sync::Arc;
use ttdl_core::mail::{submit_contact, ContactForm, HttpMailer};
use ttdl_core::status::Status;

use crate::cli::Context;

pub async fn run_contact(ctx: &Context, name: String, email: String, message: String) -> Status {
    let mailer = HttpMailer::new(Arc::clone(&ctx.transport), ctx.cfg.mail_or_default());
    let mut form = ContactForm {
        name,
        email,
        message,
    };
    submit_contact(&mailer, ctx.sink.as_ref(), &mut form).await
}
