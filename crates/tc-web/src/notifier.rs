//! Transient status banners above the form.

use tracing::debug;

use crate::config::Config;
use crate::dom::{Banner, BannerHost, BannerKind, Timer};

/// Shows at most one banner at a time and dismisses it after
/// `config.notifier.dismiss_after`.
///
/// A pending dismissal only ever removes the banner it was scheduled for, so a
/// newer banner survives the older one's timer.
pub struct Notifier<H, T> {
    config: &'static Config,
    host: H,
    timer: T,
}

impl<H: BannerHost, T: Timer> Notifier<H, T> {
    pub fn new(config: &'static Config, host: H, timer: T) -> Self {
        Self { config, host, timer }
    }

    pub fn error(&self, text: &str) {
        self.show(BannerKind::Error, text);
    }

    pub fn success(&self, text: &str) {
        self.show(BannerKind::Success, text);
    }

    pub fn show(&self, kind: BannerKind, text: &str) {
        self.host.clear_banners();

        let Some(banner) = self.host.prepend_banner(kind, text) else {
            debug!(?kind, "no banner container on page, message dropped");
            return;
        };

        self.timer.schedule(
            self.config.notifier.dismiss_after,
            Box::new(move || {
                if banner.is_attached() {
                    banner.remove();
                }
            }),
        );
    }
}
