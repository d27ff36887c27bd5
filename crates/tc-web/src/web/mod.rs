//! Browser entry point: looks up the page elements, wraps them in the
//! `web-sys` seam implementations and wires the event listeners.

mod elements;
mod platform;

use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use tracing::{Level, debug, error, warn};
use tracing_wasm::WASMLayerConfigBuilder;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Event, EventTarget, FormData, HtmlButtonElement, HtmlFormElement, HtmlImageElement, HtmlSelectElement,
    Window,
};

pub use elements::{FormContainer, WebBanner, WebButton, WebImage, WebSelect};
pub use platform::{FetchTransport, GlooTimer, NavigatorClipboard};

use self::elements::{by_id, describe, set_opacity};
use crate::catalog::ModelFamily;
use crate::config::{CONFIG, Config};
use crate::dom::OPAQUE;
use crate::notifier::Notifier;
use crate::preview::{PreviewElements, PreviewRenderer};
use crate::submission::{FormPayload, FormPipeline};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new()
            .set_max_level(max_level)
            .set_report_logs_in_timings(false)
            .build(),
    );

    if let Err(err) = mount(&CONFIG) {
        error!("customizer failed to start: {:#}", err);
    }
}

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!("{}", describe(&value))
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)
        .with_context(|| format!("adding {event} listener"))?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Wire the whole page. Each part is skipped on its own when its elements
/// are missing.
pub fn mount(config: &'static Config) -> Result<()> {
    let window = web_sys::window().context("no window")?;
    let document = window.document().context("no document")?;

    let search = window.location().search().map_err(js_error).context("reading query string")?;
    let model = ModelFamily::from_search(&search, config);
    debug!(?model, "mounting customizer");

    mount_previews(config, model, &document)?;
    restore_opacity_on_load(&document)?;
    mount_form(config, model, &window, &document)?;
    Ok(())
}

fn mount_previews(config: &'static Config, model: ModelFamily, document: &Document) -> Result<()> {
    let ids = &config.elements;
    let color_select = by_id::<HtmlSelectElement>(document, ids.color_select);
    let hardware_select = by_id::<HtmlSelectElement>(document, ids.hardware_select);
    let composite = by_id::<HtmlImageElement>(document, ids.composite_image);

    let renderer = Rc::new(PreviewRenderer::new(
        config,
        model,
        PreviewElements {
            color_select: color_select.clone().map(WebSelect),
            color_preview: by_id::<HtmlImageElement>(document, ids.color_preview).map(WebImage),
            hardware_select: hardware_select.clone().map(WebSelect),
            hardware_preview: by_id::<HtmlImageElement>(document, ids.hardware_preview).map(WebImage),
            composite: composite.clone().map(WebImage),
        },
    ));

    if let Some(select) = color_select.filter(|_| renderer.tracks_color()) {
        let renderer = Rc::clone(&renderer);
        listen(&select, "change", move |_| renderer.on_color_change())?;
    } else {
        debug!("color selector not on page");
    }

    if let Some(select) = hardware_select.filter(|_| renderer.tracks_hardware()) {
        let renderer = Rc::clone(&renderer);
        listen(&select, "change", move |_| renderer.on_hardware_change())?;
    } else {
        debug!("hardware selector not on page");
    }

    if let Some(img) = composite {
        let on_load = Rc::clone(&renderer);
        listen(&img, "load", move |_| {
            if let Some(composite) = on_load.composite() {
                composite.on_load();
            }
        })?;
        let on_error = Rc::clone(&renderer);
        listen(&img, "error", move |_| {
            if let Some(composite) = on_error.composite() {
                composite.on_error();
            }
        })?;
    }

    Ok(())
}

/// Every image on the page returns to full opacity once loaded.
fn restore_opacity_on_load(document: &Document) -> Result<()> {
    let images = document.query_selector_all("img").map_err(js_error)?;
    for i in 0..images.length() {
        let Some(img) = images.item(i).and_then(|node| node.dyn_into::<HtmlImageElement>().ok()) else {
            continue;
        };
        let target = img.clone();
        listen(&img, "load", move |_| set_opacity(&target, OPAQUE))?;
    }
    Ok(())
}

fn mount_form(config: &'static Config, model: ModelFamily, window: &Window, document: &Document) -> Result<()> {
    let Some(form) = by_id::<HtmlFormElement>(document, config.elements.form) else {
        debug!("customization form not on page");
        return Ok(());
    };

    let container = document
        .query_selector(config.elements.banner_container)
        .map_err(js_error)
        .context("looking up banner container")?;
    let notifier = Notifier::new(config, FormContainer::new(config, document.clone(), container), GlooTimer);
    let clipboard = NavigatorClipboard(window.navigator().clipboard());
    let pipeline = Rc::new(FormPipeline::new(config, model, FetchTransport, clipboard, notifier));

    let target = form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();

        let Some(button) = submit_button(&target, config) else {
            warn!("customization form has no submit button");
            return;
        };
        let payload = match read_form(&target) {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to read customization form: {:#}", err);
                pipeline.notifier().error(config.messages.submit_failed);
                return;
            }
        };

        let pipeline = Rc::clone(&pipeline);
        spawn_local(async move {
            // Outcome already reported to the customer and logged.
            let _ = pipeline.submit(&button, payload).await;
        });
    })
}

fn submit_button(form: &HtmlFormElement, config: &Config) -> Option<WebButton> {
    form.query_selector(config.elements.submit_button)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        .map(WebButton)
}

/// Text entries of the form in document order. File inputs are skipped.
fn read_form(form: &HtmlFormElement) -> Result<FormPayload> {
    let data = FormData::new_with_form(form).map_err(js_error).context("collecting form data")?;
    let entries = js_sys::try_iter(&data)
        .map_err(js_error)?
        .context("form data is not iterable")?;

    let mut payload = FormPayload::new();
    for entry in entries {
        let entry: js_sys::Array = entry.map_err(js_error)?.unchecked_into();
        if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
            payload.push(name, value);
        }
    }
    Ok(payload)
}
