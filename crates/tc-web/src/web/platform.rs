//! Network, clipboard and timer backed by the browser.

use std::time::Duration;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::JsFuture;

use super::elements::describe;
use crate::dom::Timer;
use crate::error::{ClipboardError, TransportError};
use crate::submission::{Clipboard, FormPayload, HttpReply, Transport};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// `fetch` via gloo-net. No timeout beyond the browser's own.
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post_form(&self, url: &str, body: &FormPayload) -> Result<HttpReply, TransportError> {
        let response = Request::post(url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body.to_urlencoded())
            .map_err(|e| TransportError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !response.ok() {
            return Ok(HttpReply {
                status,
                body: String::new(),
            });
        }

        let body = response.text().await.map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(HttpReply { status, body })
    }
}

pub struct NavigatorClipboard(pub web_sys::Clipboard);

impl Clipboard for NavigatorClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        JsFuture::from(self.0.write_text(text))
            .await
            .map(|_| ())
            .map_err(|err| ClipboardError(describe(&err)))
    }
}

/// `setTimeout` via gloo-timers. Scheduled tasks are never cancelled.
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}
