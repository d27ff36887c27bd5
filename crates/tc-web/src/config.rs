//! Page configuration: DOM hooks, asset naming, endpoint and user-facing copy.
//!
//! Everything the customizer needs to know about the surrounding page lives
//! here so the components stay free of string literals. The shipped page uses
//! [`CONFIG`]; components take a `&'static Config`, so another page can pass
//! its own.

use std::time::Duration;

use url::form_urlencoded;

/// Element ids and selectors the page must provide.
#[derive(Debug, Clone)]
pub struct ElementIds {
    pub color_select: &'static str,
    pub color_preview: &'static str,
    pub hardware_select: &'static str,
    pub hardware_preview: &'static str,
    pub composite_image: &'static str,
    pub form: &'static str,
    pub submit_button: &'static str,
    pub banner_container: &'static str,
}

/// Static asset naming convention.
#[derive(Debug, Clone)]
pub struct Assets {
    pub prefix: &'static str,
    pub composite_extension: &'static str,
    /// Indexed like [`crate::catalog::Color::ALL`].
    pub color_previews: [&'static str; 3],
    /// Indexed like [`crate::catalog::Hardware::ALL`].
    pub hardware_previews: [&'static str; 2],
}

/// How the `modelo` query parameter picks an image family.
#[derive(Debug, Clone)]
pub struct Models {
    pub query_key: &'static str,
    /// Case-insensitive substring that selects the alternate family.
    pub alternate_keyword: &'static str,
    pub default_name: &'static str,
    pub alternate_name: &'static str,
}

#[derive(Debug, Clone)]
pub struct Endpoint {
    pub path: &'static str,
    pub color_field: &'static str,
    pub hardware_field: &'static str,
}

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub dismiss_after: Duration,
    pub error_class: &'static str,
    pub success_class: &'static str,
}

#[derive(Debug, Clone)]
pub struct Messages {
    pub invalid_color: &'static str,
    pub invalid_hardware: &'static str,
    pub submit_failed: &'static str,
    pub link_copied: &'static str,
    pub loading: &'static str,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub elements: ElementIds,
    pub assets: Assets,
    pub models: Models,
    pub endpoint: Endpoint,
    pub notifier: NotifierConfig,
    pub messages: Messages,
}

impl Config {
    pub const DEFAULT: Config = Config {
        elements: ElementIds {
            color_select: "colorSelect",
            color_preview: "colorPreview",
            hardware_select: "herrajesSelect",
            hardware_preview: "herrajesPreview",
            composite_image: "carteraImg",
            form: "personalizarForm",
            submit_button: "button[type=\"submit\"]",
            banner_container: ".form-container",
        },
        assets: Assets {
            prefix: "/static/",
            composite_extension: ".jpg",
            color_previews: ["/static/colors1.png", "/static/colors2.png", "/static/colors3.png"],
            hardware_previews: ["/static/h1.png", "/static/h2.png"],
        },
        models: Models {
            query_key: "modelo",
            alternate_keyword: "urbana",
            default_name: "modelo1",
            alternate_name: "modelo2",
        },
        endpoint: Endpoint {
            path: "/personalizar",
            color_field: "color",
            hardware_field: "herrajes",
        },
        notifier: NotifierConfig {
            dismiss_after: Duration::from_millis(5000),
            error_class: "error-message",
            success_class: "success-message",
        },
        messages: Messages {
            invalid_color: "Por favor selecciona un color válido.",
            invalid_hardware: "Por favor selecciona herrajes válidos.",
            submit_failed: "Error al procesar la personalización. Inténtalo de nuevo.",
            link_copied: "¡Enlace copiado al portapapeles!",
            loading: "Procesando...",
        },
    };

    /// `POST` target for a submission, with the model name percent-encoded
    /// into the query string.
    pub fn submit_url(&self, model_name: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(self.models.query_key, model_name)
            .finish();
        format!("{}?{}", self.endpoint.path, query)
    }

    /// Selector matching banners of either kind.
    pub fn banner_selector(&self) -> String {
        format!(".{}, .{}", self.notifier.error_class, self.notifier.success_class)
    }
}

pub static CONFIG: Config = Config::DEFAULT;
