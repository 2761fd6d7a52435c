//! Content renderer: fetches a destination and reports load lifecycle
//! signals back to the UI thread.
//!
//! Events travel over an `mpsc` channel drained once per frame; every send
//! is followed by a repaint request so the UI wakes up promptly. Attempt
//! tagging is the renderer's only contract with the state machine — a
//! cancelled or superseded fetch may still emit events, the viewer drops
//! them by attempt id.

use crate::constants::{MAX_DOCUMENT_BYTES, USER_AGENT};
use crate::content;
use crate::types::{LifecycleSignal, LoadEvent, LoadRequest, PageDocument};
use eframe::egui;
use futures::StreamExt;
use std::sync::mpsc::Sender;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Capability that loads remote documents and emits lifecycle signals.
pub trait ContentRenderer {
    /// Begin loading `request.url`. Signals for this load carry
    /// `request.attempt`.
    fn load(&self, request: LoadRequest);

    /// Cancel the most recent in-flight load, if any.
    fn cancel(&self);
}

/// HTTP-backed renderer running fetches on a dedicated tokio runtime.
pub struct HttpRenderer {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
    events: Sender<LoadEvent>,
    ctx: egui::Context,
    current: Mutex<Option<CancellationToken>>,
}

impl HttpRenderer {
    pub fn new(events: Sender<LoadEvent>, ctx: egui::Context) -> std::io::Result<Self> {
        Ok(Self {
            runtime: tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()?,
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            events,
            ctx,
            current: Mutex::new(None),
        })
    }

    fn emit(events: &Sender<LoadEvent>, ctx: &egui::Context, attempt: u64, signal: LifecycleSignal) {
        let _ = events.send(LoadEvent { attempt, signal });
        ctx.request_repaint();
    }
}

impl ContentRenderer for HttpRenderer {
    fn load(&self, request: LoadRequest) {
        let token = CancellationToken::new();
        if let Ok(mut current) = self.current.lock() {
            *current = Some(token.clone());
        }

        let client = self.client.clone();
        let events = self.events.clone();
        let ctx = self.ctx.clone();
        debug!(attempt = request.attempt, url = %request.url, "Starting page load");

        self.runtime.spawn(async move {
            Self::emit(&events, &ctx, request.attempt, LifecycleSignal::Started);

            tokio::select! {
                _ = token.cancelled() => {
                    debug!(attempt = request.attempt, "Page load cancelled");
                }
                result = fetch_document(&client, &request.url) => match result {
                    Ok(document) => {
                        debug!(
                            attempt = request.attempt,
                            bytes = document.text.len(),
                            truncated = document.truncated,
                            "Page load finished"
                        );
                        Self::emit(
                            &events,
                            &ctx,
                            request.attempt,
                            LifecycleSignal::Finished(document),
                        );
                    }
                    Err(e) => {
                        warn!(attempt = request.attempt, url = %request.url, error = %e, "Page load failed");
                        Self::emit(&events, &ctx, request.attempt, LifecycleSignal::Failed);
                    }
                },
            }
        });
    }

    fn cancel(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(token) = current.take() {
                token.cancel();
            }
        }
    }
}

#[derive(Debug)]
enum FetchError {
    Http(reqwest::Error),
    Status(reqwest::StatusCode),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "{e}"),
            FetchError::Status(status) => write!(f, "HTTP {status}"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http(e)
    }
}

async fn fetch_document(client: &reqwest::Client, url: &str) -> Result<PageDocument, FetchError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let mut body = Vec::new();
    let mut truncated = false;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let room = MAX_DOCUMENT_BYTES - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            truncated = true;
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(build_document(final_url, content_type, &body, truncated))
}

/// Turn raw response bytes into the displayable document.
fn build_document(
    final_url: String,
    content_type: String,
    body: &[u8],
    truncated: bool,
) -> PageDocument {
    let raw = String::from_utf8_lossy(body);
    let text = if content::is_html(&content_type) {
        content::html_to_text(&raw)
    } else {
        raw.into_owned()
    };
    PageDocument {
        final_url,
        content_type,
        text,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_bodies_are_reduced_to_text() {
        let doc = build_document(
            "https://example.org/".into(),
            "text/html; charset=utf-8".into(),
            b"<html><body><p>Hi there</p></body></html>",
            false,
        );
        assert_eq!(doc.text, "Hi there");
        assert_eq!(doc.final_url, "https://example.org/");
        assert!(!doc.truncated);
    }

    #[test]
    fn plain_text_bodies_pass_through() {
        let doc = build_document(
            "https://example.org/robots.txt".into(),
            "text/plain".into(),
            b"User-agent: *\nDisallow:",
            false,
        );
        assert_eq!(doc.text, "User-agent: *\nDisallow:");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let doc = build_document(
            "https://example.org/".into(),
            "text/plain".into(),
            &[0x68, 0x69, 0xff],
            true,
        );
        assert!(doc.text.starts_with("hi"));
        assert!(doc.truncated);
    }
}
