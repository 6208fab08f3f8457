use crate::{
    api::WebhookClient,
    constants::{FALLBACK_REPLY, SERVER_ERROR_REPLY},
    session::SessionId,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Instant;

lazy_static! {
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").expect("static regex");
}

/// Collapses every run of three or more newlines down to a single blank line.
pub fn normalize_reply(text: &str) -> String {
    EXCESS_NEWLINES.replace_all(text, "\n\n").into_owned()
}

/// Turns one user message into exactly one bot reply text.
#[derive(Debug)]
pub struct Dispatcher {
    client: WebhookClient,
    session_id: SessionId,
}

impl Dispatcher {
    pub fn new(client: WebhookClient, session_id: SessionId) -> Self {
        Dispatcher { client, session_id }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Never fails: missing output and transport errors both map to fixed
    /// placeholder replies. Errors are logged, not retried.
    pub async fn dispatch(&self, text: &str) -> String {
        let started = Instant::now();
        log::info!(
            "dispatching {} chars to {} (session {})",
            text.len(),
            self.client.endpoint(),
            self.session_id
        );

        let reply = match self.client.post_message(text, &self.session_id).await {
            Ok(Some(output)) => normalize_reply(&output),
            Ok(None) => {
                log::warn!("webhook response carried no usable output");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                log::error!("Error communicating with webhook: {}", e);
                SERVER_ERROR_REPLY.to_string()
            }
        };

        log::info!(
            "reply ready after {}ms ({} chars)",
            started.elapsed().as_millis(),
            reply.len()
        );
        reply
    }
}
