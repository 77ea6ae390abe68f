//! Color tokens for theming

use serde::{Deserialize, Serialize};

use crate::theme::ColorScheme;

/// A color that resolves differently per color scheme
///
/// `needs_rgb` asks the resolver to also emit a `<name>RGB` variable holding
/// the `R, G, B` triplet, for `rgba(var(--…RGB), alpha)` blends. Only
/// `#RRGGBB` values can produce a real triplet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken {
    pub light: String,
    pub dark: String,
    #[serde(default, rename = "needsRGB", skip_serializing_if = "std::ops::Not::not")]
    pub needs_rgb: bool,
}

impl ColorToken {
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
            needs_rgb: false,
        }
    }

    /// Same value in both schemes
    pub fn fixed(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(value.clone(), value)
    }

    /// Request the derived `RGB` sibling variable
    pub fn with_rgb(mut self) -> Self {
        self.needs_rgb = true;
        self
    }

    /// Value for the given scheme
    pub fn value(&self, scheme: ColorScheme) -> &str {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }
}
