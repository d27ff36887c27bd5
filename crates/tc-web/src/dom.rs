//! Seams between the customizer and the page.
//!
//! The components only ever talk to these traits. The browser build implements
//! them over `web-sys` (see `web::elements`), and [`crate::headless`] provides
//! in-memory versions for tests.

use std::time::Duration;

use crate::config::Config;

pub const DIMMED: f32 = 0.5;
pub const OPAQUE: f32 = 1.0;

/// A dropdown whose current option value can be read.
pub trait SelectControl {
    fn value(&self) -> String;
}

pub trait ImageElement {
    fn set_src(&self, src: &str);
    fn set_opacity(&self, opacity: f32);
}

/// The form's submit button.
pub trait SubmitControl {
    /// Current plain-text label.
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    /// Replace the label with a spinner followed by `label`.
    fn show_loading(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
    fn is_disabled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerKind {
    Error,
    Success,
}

impl BannerKind {
    pub fn class(self, config: &Config) -> &'static str {
        match self {
            BannerKind::Error => config.notifier.error_class,
            BannerKind::Success => config.notifier.success_class,
        }
    }
}

/// A banner that was inserted into the page.
pub trait Banner {
    fn is_attached(&self) -> bool;
    fn remove(&self);
}

/// Where transient banners are shown.
pub trait BannerHost {
    type Banner: Banner + 'static;

    /// Remove every banner of either kind currently on the page.
    fn clear_banners(&self);

    /// Insert a banner as the container's first child. `None` when the page
    /// has no container to put it in.
    fn prepend_banner(&self, kind: BannerKind, text: &str) -> Option<Self::Banner>;
}

/// Runs deferred work on the UI thread.
pub trait Timer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}
