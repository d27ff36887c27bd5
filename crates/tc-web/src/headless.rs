//! In-memory implementations of the page seams.
//!
//! Every handle is a cheap `Rc` clone over shared state, so a test can keep
//! one clone for assertions while the component under test owns another.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::dom::{Banner, BannerHost, BannerKind, ImageElement, OPAQUE, SelectControl, SubmitControl, Timer};
use crate::error::{ClipboardError, TransportError};
use crate::submission::{Clipboard, FormPayload, HttpReply, Transport};

#[derive(Debug, Clone, Default)]
pub struct HeadlessSelect(Rc<RefCell<String>>);

impl HeadlessSelect {
    pub fn new(value: &str) -> Self {
        Self(Rc::new(RefCell::new(value.to_string())))
    }

    pub fn choose(&self, value: &str) {
        *self.0.borrow_mut() = value.to_string();
    }
}

impl SelectControl for HeadlessSelect {
    fn value(&self) -> String {
        self.0.borrow().clone()
    }
}

#[derive(Debug)]
struct ImageState {
    srcs: Vec<String>,
    opacity: f32,
}

impl Default for ImageState {
    fn default() -> Self {
        Self {
            srcs: Vec::new(),
            opacity: OPAQUE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessImage(Rc<RefCell<ImageState>>);

impl HeadlessImage {
    pub fn current_src(&self) -> String {
        self.0.borrow().srcs.last().cloned().unwrap_or_default()
    }

    /// Every `src` assigned so far, oldest first.
    pub fn src_history(&self) -> Vec<String> {
        self.0.borrow().srcs.clone()
    }

    pub fn opacity(&self) -> f32 {
        self.0.borrow().opacity
    }
}

impl ImageElement for HeadlessImage {
    fn set_src(&self, src: &str) {
        self.0.borrow_mut().srcs.push(src.to_string());
    }

    fn set_opacity(&self, opacity: f32) {
        self.0.borrow_mut().opacity = opacity;
    }
}

#[derive(Debug, Default)]
struct ButtonState {
    label: String,
    loading: bool,
    disabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessButton(Rc<RefCell<ButtonState>>);

impl HeadlessButton {
    pub fn new(label: &str) -> Self {
        let button = Self::default();
        button.set_label(label);
        button
    }

    pub fn is_loading(&self) -> bool {
        self.0.borrow().loading
    }
}

impl SubmitControl for HeadlessButton {
    fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    fn set_label(&self, label: &str) {
        let mut state = self.0.borrow_mut();
        state.label = label.to_string();
        state.loading = false;
    }

    fn show_loading(&self, label: &str) {
        let mut state = self.0.borrow_mut();
        state.label = label.to_string();
        state.loading = true;
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }
}

#[derive(Debug, Default)]
struct ContainerState {
    next_id: u64,
    banners: Vec<(u64, BannerKind, String)>,
}

/// A banner container, or the absence of one (`HeadlessContainer::missing`).
#[derive(Debug, Clone)]
pub struct HeadlessContainer {
    state: Rc<RefCell<ContainerState>>,
    present: bool,
}

impl Default for HeadlessContainer {
    fn default() -> Self {
        Self {
            state: Rc::default(),
            present: true,
        }
    }
}

impl HeadlessContainer {
    pub fn missing() -> Self {
        Self {
            state: Rc::default(),
            present: false,
        }
    }

    /// Banners in document order (newest first).
    pub fn banners(&self) -> Vec<(BannerKind, String)> {
        self.state
            .borrow()
            .banners
            .iter()
            .map(|(_, kind, text)| (*kind, text.clone()))
            .collect()
    }
}

#[derive(Debug)]
pub struct HeadlessBanner {
    id: u64,
    state: Rc<RefCell<ContainerState>>,
}

impl Banner for HeadlessBanner {
    fn is_attached(&self) -> bool {
        self.state.borrow().banners.iter().any(|(id, _, _)| *id == self.id)
    }

    fn remove(&self) {
        self.state.borrow_mut().banners.retain(|(id, _, _)| *id != self.id);
    }
}

impl BannerHost for HeadlessContainer {
    type Banner = HeadlessBanner;

    fn clear_banners(&self) {
        self.state.borrow_mut().banners.clear();
    }

    fn prepend_banner(&self, kind: BannerKind, text: &str) -> Option<HeadlessBanner> {
        if !self.present {
            return None;
        }
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.banners.insert(0, (id, kind, text.to_string()));
        Some(HeadlessBanner {
            id,
            state: Rc::clone(&self.state),
        })
    }
}

type Task = (Duration, Box<dyn FnOnce()>);

/// Timer that only fires when told to.
#[derive(Clone, Default)]
pub struct ManualTimer(Rc<RefCell<VecDeque<Task>>>);

impl ManualTimer {
    pub fn pending(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.0.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run the oldest scheduled task. Returns false when none was pending.
    pub fn fire_next(&self) -> bool {
        let next = self.0.borrow_mut().pop_front();
        match next {
            Some((_, task)) => {
                task();
                true
            }
            None => false,
        }
    }

    pub fn fire_all(&self) {
        while self.fire_next() {}
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.0.borrow_mut().push_back((delay, task));
    }
}

#[derive(Debug, Default)]
struct TransportLog {
    requests: Vec<(String, FormPayload)>,
}

/// Transport answering every request with the same canned result.
#[derive(Debug, Clone)]
pub struct ScriptedTransport {
    reply: Result<HttpReply, TransportError>,
    log: Rc<RefCell<TransportLog>>,
}

impl ScriptedTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self::with_result(Ok(HttpReply {
            status,
            body: body.to_string(),
        }))
    }

    pub fn failing(error: TransportError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(reply: Result<HttpReply, TransportError>) -> Self {
        Self {
            reply,
            log: Rc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.log.borrow().requests.len()
    }

    pub fn last_request(&self) -> Option<(String, FormPayload)> {
        self.log.borrow().requests.last().cloned()
    }
}

impl Transport for ScriptedTransport {
    async fn post_form(&self, url: &str, body: &FormPayload) -> Result<HttpReply, TransportError> {
        self.log.borrow_mut().requests.push((url.to_string(), body.clone()));
        self.reply.clone()
    }
}

/// Clipboard that records every write attempt, optionally refusing them all.
#[derive(Debug, Clone, Default)]
pub struct RecordingClipboard {
    attempts: Rc<RefCell<Vec<String>>>,
    denied: bool,
}

impl RecordingClipboard {
    pub fn denied() -> Self {
        Self {
            denied: true,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.borrow().clone()
    }
}

impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.attempts.borrow_mut().push(text.to_string());
        if self.denied {
            return Err(ClipboardError("permission denied".to_string()));
        }
        Ok(())
    }
}
