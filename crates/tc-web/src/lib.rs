//! Customization page for Teteu Cueros leather goods.
//!
//! Pure components (selection vocabulary, composite image resolution, the
//! submission state machine, status banners) live at the top level and talk to
//! the page only through the traits in [`dom`]. The `hydrate` feature adds the
//! browser bindings in `web` and the wasm entry point.

pub mod catalog;
pub mod config;
pub mod dom;
pub mod error;
pub mod headless;
pub mod image;
pub mod notifier;
pub mod preview;
pub mod submission;

#[cfg(feature = "hydrate")]
pub mod web;
