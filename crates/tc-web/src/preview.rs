//! Reacts to dropdown changes: swaps the small swatch previews and reloads the
//! composite photo.

use tracing::debug;

use crate::catalog::{Color, Hardware, ModelFamily, Selection};
use crate::config::Config;
use crate::dom::{ImageElement, SelectControl};
use crate::image::CompositeImage;

/// Elements the renderer works with. Any of them may be missing from the page.
pub struct PreviewElements<S, I> {
    pub color_select: Option<S>,
    pub color_preview: Option<I>,
    pub hardware_select: Option<S>,
    pub hardware_preview: Option<I>,
    pub composite: Option<I>,
}

impl<S, I> Default for PreviewElements<S, I> {
    fn default() -> Self {
        Self {
            color_select: None,
            color_preview: None,
            hardware_select: None,
            hardware_preview: None,
            composite: None,
        }
    }
}

pub struct PreviewRenderer<S, I> {
    config: &'static Config,
    color_select: Option<S>,
    color_preview: Option<I>,
    hardware_select: Option<S>,
    hardware_preview: Option<I>,
    composite: Option<CompositeImage<I>>,
}

impl<S: SelectControl, I: ImageElement> PreviewRenderer<S, I> {
    pub fn new(config: &'static Config, model: ModelFamily, elements: PreviewElements<S, I>) -> Self {
        Self {
            config,
            color_select: elements.color_select,
            color_preview: elements.color_preview,
            hardware_select: elements.hardware_select,
            hardware_preview: elements.hardware_preview,
            composite: elements.composite.map(|img| CompositeImage::new(config, model, img)),
        }
    }

    /// The color dropdown is only wired when its preview exists too.
    pub fn tracks_color(&self) -> bool {
        self.color_select.is_some() && self.color_preview.is_some()
    }

    pub fn tracks_hardware(&self) -> bool {
        self.hardware_select.is_some() && self.hardware_preview.is_some()
    }

    pub fn composite(&self) -> Option<&CompositeImage<I>> {
        self.composite.as_ref()
    }

    /// Current selection, leniently resolved. `None` unless both dropdowns exist.
    pub fn selection(&self) -> Option<Selection> {
        let color = self.color_select.as_ref()?.value();
        let hardware = self.hardware_select.as_ref()?.value();
        Some(Selection::resolve(&color, &hardware))
    }

    pub fn on_color_change(&self) {
        if let (Some(select), Some(preview)) = (&self.color_select, &self.color_preview) {
            let color = Color::resolve(&select.value());
            preview.set_src(color.preview_path(self.config));
        }
        self.refresh_composite();
    }

    pub fn on_hardware_change(&self) {
        if let (Some(select), Some(preview)) = (&self.hardware_select, &self.hardware_preview) {
            let hardware = Hardware::resolve(&select.value());
            preview.set_src(hardware.preview_path(self.config));
        }
        self.refresh_composite();
    }

    pub fn refresh_composite(&self) {
        let (Some(selection), Some(composite)) = (self.selection(), &self.composite) else {
            debug!("composite image or a dropdown is missing, skipping refresh");
            return;
        };
        composite.show(selection);
    }
}
