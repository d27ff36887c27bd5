//! `web-sys` implementations of the page seams.

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlSelectElement};

use crate::config::Config;
use crate::dom::{Banner, BannerHost, BannerKind, ImageElement, SelectControl, SubmitControl};

pub(crate) fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

pub(crate) fn set_opacity(element: &HtmlElement, opacity: f32) {
    if let Err(err) = element.style().set_property("opacity", &opacity.to_string()) {
        warn!("failed to set opacity: {}", describe(&err));
    }
}

#[derive(Clone)]
pub struct WebSelect(pub HtmlSelectElement);

impl SelectControl for WebSelect {
    fn value(&self) -> String {
        self.0.value()
    }
}

#[derive(Clone)]
pub struct WebImage(pub HtmlImageElement);

impl ImageElement for WebImage {
    fn set_src(&self, src: &str) {
        self.0.set_src(src);
    }

    fn set_opacity(&self, opacity: f32) {
        set_opacity(&self.0, opacity);
    }
}

#[derive(Clone)]
pub struct WebButton(pub HtmlButtonElement);

impl SubmitControl for WebButton {
    fn label(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_label(&self, label: &str) {
        self.0.set_text_content(Some(label));
    }

    fn show_loading(&self, label: &str) {
        self.0.set_inner_html(r#"<span class="loading"></span> "#);
        if let Err(err) = self.0.append_with_str_1(label) {
            warn!("failed to append loading label: {}", describe(&err));
        }
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.set_disabled(disabled);
    }

    fn is_disabled(&self) -> bool {
        self.0.disabled()
    }
}

/// The `.form-container` element. Banner cleanup is document-wide, so stray
/// banners outside the container are removed too.
pub struct FormContainer {
    config: &'static Config,
    document: Document,
    container: Option<Element>,
}

impl FormContainer {
    pub fn new(config: &'static Config, document: Document, container: Option<Element>) -> Self {
        Self {
            config,
            document,
            container,
        }
    }
}

pub struct WebBanner(Element);

impl Banner for WebBanner {
    fn is_attached(&self) -> bool {
        self.0.parent_node().is_some()
    }

    fn remove(&self) {
        self.0.remove();
    }
}

impl BannerHost for FormContainer {
    type Banner = WebBanner;

    fn clear_banners(&self) {
        let existing = match self.document.query_selector_all(&self.config.banner_selector()) {
            Ok(list) => list,
            Err(err) => {
                warn!("failed to query banners: {}", describe(&err));
                return;
            }
        };
        for i in 0..existing.length() {
            if let Some(banner) = existing.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                banner.remove();
            }
        }
    }

    fn prepend_banner(&self, kind: BannerKind, text: &str) -> Option<WebBanner> {
        let container = self.container.as_ref()?;
        let banner = match self.document.create_element("div") {
            Ok(el) => el,
            Err(err) => {
                warn!("failed to create banner: {}", describe(&err));
                return None;
            }
        };
        banner.set_class_name(kind.class(self.config));
        banner.set_text_content(Some(text));
        if let Err(err) = container.insert_before(&banner, container.first_child().as_ref()) {
            warn!("failed to insert banner: {}", describe(&err));
            return None;
        }
        Some(WebBanner(banner))
    }
}
