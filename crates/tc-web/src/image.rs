//! Composite product photo: path resolution and the load/fallback cycle.

use std::cell::Cell;

use tracing::debug;

use crate::catalog::{ModelFamily, Selection};
use crate::config::Config;
use crate::dom::{DIMMED, ImageElement, OPAQUE};

/// `/static/<model>_<color>_<hardware>.jpg`
pub fn composite_path(config: &Config, model: ModelFamily, selection: Selection) -> String {
    format!(
        "{}{}_{}_{}{}",
        config.assets.prefix,
        model.name(config),
        selection.color.token(),
        selection.hardware.token(),
        config.assets.composite_extension,
    )
}

/// Model-level photo used when a composite is missing.
pub fn fallback_path(config: &Config, model: ModelFamily) -> String {
    format!("{}{}{}", config.assets.prefix, model.name(config), config.assets.composite_extension)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Still showing whatever the page was served with.
    Initial,
    Composite,
    Fallback,
}

/// The large product image. Dims while a new composite loads; swaps to the
/// model fallback once if the composite fails. Errors before the first
/// [`CompositeImage::show`] belong to the page's own image and are ignored.
pub struct CompositeImage<I> {
    config: &'static Config,
    model: ModelFamily,
    element: I,
    phase: Cell<Phase>,
}

impl<I: ImageElement> CompositeImage<I> {
    pub fn new(config: &'static Config, model: ModelFamily, element: I) -> Self {
        Self {
            config,
            model,
            element,
            phase: Cell::new(Phase::Initial),
        }
    }

    pub fn show(&self, selection: Selection) {
        let path = composite_path(self.config, self.model, selection);
        debug!(path = %path, "loading composite image");
        self.phase.set(Phase::Composite);
        self.element.set_opacity(DIMMED);
        self.element.set_src(&path);
    }

    pub fn on_load(&self) {
        self.element.set_opacity(OPAQUE);
    }

    /// Terminal: a failing fallback is left as is.
    pub fn on_error(&self) {
        match self.phase.get() {
            Phase::Initial => return,
            Phase::Composite => {
                let path = fallback_path(self.config, self.model);
                debug!(path = %path, "composite image missing, using fallback");
                self.phase.set(Phase::Fallback);
                self.element.set_src(&path);
            }
            Phase::Fallback => debug!(model = ?self.model, "fallback image failed to load"),
        }
        self.element.set_opacity(OPAQUE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Color, Hardware};
    use crate::config::CONFIG;
    use crate::headless::HeadlessImage;

    #[test]
    fn test_composite_path() {
        let selection = Selection::new(Color::MarronClaro, Hardware::Dorado);
        assert_eq!(
            composite_path(&CONFIG, ModelFamily::Urbana, selection),
            "/static/modelo2_marron_claro_dorado.jpg"
        );
        assert_eq!(
            composite_path(&CONFIG, ModelFamily::Classic, Selection::default()),
            "/static/modelo1_negro_plata.jpg"
        );
    }

    #[test]
    fn test_composite_path_is_deterministic() {
        for color in Color::ALL {
            for hardware in Hardware::ALL {
                let selection = Selection::new(color, hardware);
                assert_eq!(
                    composite_path(&CONFIG, ModelFamily::Classic, selection),
                    composite_path(&CONFIG, ModelFamily::Classic, selection)
                );
            }
        }
    }

    #[test]
    fn test_fallback_path() {
        assert_eq!(fallback_path(&CONFIG, ModelFamily::Classic), "/static/modelo1.jpg");
        assert_eq!(fallback_path(&CONFIG, ModelFamily::Urbana), "/static/modelo2.jpg");
    }

    #[test]
    fn test_show_dims_until_loaded() {
        let img = HeadlessImage::default();
        let composite = CompositeImage::new(&CONFIG, ModelFamily::Classic, img.clone());

        composite.show(Selection::new(Color::Marron, Hardware::Plata));
        assert_eq!(img.current_src(), "/static/modelo1_marron_plata.jpg");
        assert_eq!(img.opacity(), DIMMED);

        composite.on_load();
        assert_eq!(img.opacity(), OPAQUE);
    }

    #[test]
    fn test_error_falls_back_once() {
        let img = HeadlessImage::default();
        let composite = CompositeImage::new(&CONFIG, ModelFamily::Urbana, img.clone());

        composite.show(Selection::default());
        composite.on_error();
        assert_eq!(img.current_src(), "/static/modelo2.jpg");
        assert_eq!(img.opacity(), OPAQUE);

        // Fallback missing too: no further swaps.
        composite.on_error();
        assert_eq!(img.src_history().len(), 2);
        assert_eq!(img.opacity(), OPAQUE);
    }

    #[test]
    fn test_error_before_first_show_is_ignored() {
        let img = HeadlessImage::default();
        let composite = CompositeImage::new(&CONFIG, ModelFamily::Classic, img.clone());

        composite.on_error();
        assert!(img.src_history().is_empty());

        composite.show(Selection::default());
        composite.on_error();
        assert_eq!(img.current_src(), "/static/modelo1.jpg");
    }

    #[test]
    fn test_new_selection_rearms_fallback() {
        let img = HeadlessImage::default();
        let composite = CompositeImage::new(&CONFIG, ModelFamily::Classic, img.clone());

        composite.show(Selection::default());
        composite.on_error();
        composite.show(Selection::new(Color::Negro, Hardware::Dorado));
        composite.on_error();
        assert_eq!(
            img.src_history(),
            vec![
                "/static/modelo1_negro_plata.jpg",
                "/static/modelo1.jpg",
                "/static/modelo1_negro_dorado.jpg",
                "/static/modelo1.jpg",
            ]
        );
    }
}
