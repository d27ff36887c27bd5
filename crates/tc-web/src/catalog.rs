//! What a customer can choose: leather colors, hardware finishes and the
//! model family whose photos illustrate them.
//!
//! Label lookups come in two flavors. `from_label` is an exact match used for
//! validation; `resolve` is total and falls back to the first entry, which is
//! what the image previews use so an unexpected option value never breaks the
//! page.

use url::form_urlencoded;

use crate::config::Config;

/// Leather color, as offered by the color dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Negro,
    Marron,
    MarronClaro,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Negro, Color::Marron, Color::MarronClaro];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "negro" => Some(Color::Negro),
            "marron" => Some(Color::Marron),
            "marron claro" => Some(Color::MarronClaro),
            _ => None,
        }
    }

    pub fn resolve(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }

    /// Option value submitted by the form.
    pub fn label(self) -> &'static str {
        match self {
            Color::Negro => "negro",
            Color::Marron => "marron",
            Color::MarronClaro => "marron claro",
        }
    }

    /// Fragment used in composite image file names.
    pub fn token(self) -> &'static str {
        match self {
            Color::Negro => "negro",
            Color::Marron => "marron",
            Color::MarronClaro => "marron_claro",
        }
    }

    pub fn preview_path(self, config: &Config) -> &'static str {
        config.assets.color_previews[self as usize]
    }
}

/// Hardware (buckles, rivets) finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hardware {
    #[default]
    Plata,
    Dorado,
}

impl Hardware {
    pub const ALL: [Hardware; 2] = [Hardware::Plata, Hardware::Dorado];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "plata" => Some(Hardware::Plata),
            "dorado" => Some(Hardware::Dorado),
            _ => None,
        }
    }

    pub fn resolve(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Hardware::Plata => "plata",
            Hardware::Dorado => "dorado",
        }
    }

    pub fn token(self) -> &'static str {
        self.label()
    }

    pub fn preview_path(self, config: &Config) -> &'static str {
        config.assets.hardware_previews[self as usize]
    }
}

/// A color + hardware pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub color: Color,
    pub hardware: Hardware,
}

impl Selection {
    pub fn new(color: Color, hardware: Hardware) -> Self {
        Self { color, hardware }
    }

    /// Lenient construction from raw control values.
    pub fn resolve(color: &str, hardware: &str) -> Self {
        Self::new(Color::resolve(color), Hardware::resolve(hardware))
    }
}

/// Product line whose photo naming family the page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelFamily {
    #[default]
    Classic,
    Urbana,
}

impl ModelFamily {
    /// Picks the family from an already-decoded `modelo` value.
    pub fn from_param(value: Option<&str>, config: &Config) -> Self {
        match value {
            Some(v) if v.to_lowercase().contains(config.models.alternate_keyword) => ModelFamily::Urbana,
            _ => ModelFamily::Classic,
        }
    }

    /// Picks the family from a raw location search string (`?modelo=...`).
    /// Only the first `modelo` pair counts.
    pub fn from_search(search: &str, config: &Config) -> Self {
        let query = search.trim().trim_start_matches('?');
        let value = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == config.models.query_key)
            .map(|(_, value)| value.into_owned());
        Self::from_param(value.as_deref(), config)
    }

    pub fn name(self, config: &Config) -> &'static str {
        match self {
            ModelFamily::Classic => config.models.default_name,
            ModelFamily::Urbana => config.models.alternate_name,
        }
    }
}
