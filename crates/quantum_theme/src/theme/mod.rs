//! Theme descriptors for the rendering layer
//!
//! A [`ThemeDescriptor`] is what gets handed to the UI framework's theming
//! entry point. Colors and responsive sizes are `var(--quantum-…)`
//! references, so switching schemes at runtime only swaps which
//! attribute-scoped variable block is active; the descriptor for the other
//! scheme differs in `mode` alone.

mod builder;
mod components;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use builder::{build_theme, ThemeBuilder};
pub use components::{ComponentOverrides, StyleRule};

use crate::resolve::CSS_PREFIX;

/// Light or dark appearance
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value stored in preferences and written to the root attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted value; only the exact literals are accepted
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        const SCHEMES: [ColorScheme; 2] = [ColorScheme::Light, ColorScheme::Dark];
        &SCHEMES
    }
}

impl Display for ColorScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown color scheme `{s}` (expected light or dark)"))
    }
}

/// `var(--quantum-<path>)` for a dot-separated token path
pub fn css_var(path: &str) -> String {
    format!("var({CSS_PREFIX}{})", path.replace('.', "-"))
}

/// A framework palette slot
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteColor {
    pub main: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
    pub contrast_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BackgroundColors {
    pub default: String,
    pub paper: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextColors {
    pub primary: String,
    pub secondary: String,
    pub disabled: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionColors {
    pub hover: String,
    pub disabled: String,
    pub disabled_background: String,
}

/// Semantic colors mapped onto framework palette slots
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePalette {
    pub primary: PaletteColor,
    pub secondary: PaletteColor,
    pub error: PaletteColor,
    pub warning: PaletteColor,
    pub info: PaletteColor,
    pub success: PaletteColor,
    pub background: BackgroundColors,
    pub text: TextColors,
    pub action: ActionColors,
    pub divider: String,
}

/// One typography variant as the framework expects it
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    pub font_family: String,
    pub font_size: String,
    pub font_weight: u16,
    pub line_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTypography {
    pub font_family: String,
    pub variants: IndexMap<String, TypographyStyle>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeShape {
    pub border_radius: String,
}

/// Complete theme handed to the rendering framework
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub mode: ColorScheme,
    pub palette: ThemePalette,
    pub typography: ThemeTypography,
    pub shape: ThemeShape,
    pub spacing: IndexMap<String, String>,
    pub components: ComponentOverrides,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips() {
        assert_eq!(ColorScheme::Light.toggle(), ColorScheme::Dark);
        assert_eq!(ColorScheme::Dark.toggle().toggle(), ColorScheme::Dark);
    }

    #[test]
    fn parse_only_accepts_literals() {
        assert_eq!(ColorScheme::parse("light"), Some(ColorScheme::Light));
        assert_eq!(ColorScheme::parse("dark"), Some(ColorScheme::Dark));
        for bad in ["blue", "Dark", " light", ""] {
            assert_eq!(ColorScheme::parse(bad), None);
        }
        assert!("blue".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn css_var_flattens_path() {
        assert_eq!(
            css_var("colors.text.primary"),
            "var(--quantum-colors-text-primary)"
        );
    }
}
