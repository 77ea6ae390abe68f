//! Theme descriptor construction

use indexmap::IndexMap;

use super::components::ComponentOverrides;
use super::{
    css_var, ActionColors, BackgroundColors, ColorScheme, PaletteColor, TextColors,
    ThemeDescriptor, ThemePalette, ThemeShape, ThemeTypography, TypographyStyle,
};
use crate::tokens::{SemanticTokens, TokenTree, FONT_FAMILY_KEY};

/// Hands out `var(--quantum-…)` references and remembers any path that the
/// token tree does not define
pub(super) struct Refs<'a> {
    tree: &'a TokenTree,
    missing: Vec<String>,
}

impl<'a> Refs<'a> {
    fn new(tree: &'a TokenTree) -> Self {
        Self {
            tree,
            missing: Vec::new(),
        }
    }

    pub(super) fn var(&mut self, path: &str) -> String {
        if self.tree.leaf(path).is_none() && !self.missing.iter().any(|p| p == path) {
            self.missing.push(path.to_string());
        }
        css_var(path)
    }

    /// `rgba(var(--…RGB), alpha)` for a color authored with `needsRGB`
    pub(super) fn rgba(&mut self, path: &str, alpha: f32) -> String {
        let needs_rgb = self
            .tree
            .color(path)
            .map(|color| color.needs_rgb)
            .unwrap_or(false);
        let rgb_path = format!("{path}RGB");
        if !needs_rgb && !self.missing.contains(&rgb_path) {
            self.missing.push(rgb_path.clone());
        }
        format!("rgba({}, {alpha})", css_var(&rgb_path))
    }
}

/// Builds a [`ThemeDescriptor`] from semantic tokens
///
/// ```rust
/// use quantum_theme::{ColorScheme, SemanticTokens, ThemeBuilder};
///
/// let tokens = SemanticTokens::quantum();
/// let theme = ThemeBuilder::new(&tokens).scheme(ColorScheme::Dark).build();
/// assert_eq!(theme.palette.primary.main, "var(--quantum-colors-action-primary)");
/// ```
pub struct ThemeBuilder<'a> {
    tokens: &'a SemanticTokens,
    scheme: ColorScheme,
}

impl<'a> ThemeBuilder<'a> {
    pub fn new(tokens: &'a SemanticTokens) -> Self {
        Self {
            tokens,
            scheme: ColorScheme::default(),
        }
    }

    pub fn scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn build(&self) -> ThemeDescriptor {
        let (theme, missing) = self.assemble();
        if !missing.is_empty() {
            tracing::debug!(
                count = missing.len(),
                "theme references token paths the tree does not define: {}",
                missing.join(", ")
            );
        }
        theme
    }

    /// Token paths the descriptor references but the tree lacks
    pub fn missing_references(&self) -> Vec<String> {
        self.assemble().1
    }

    fn assemble(&self) -> (ThemeDescriptor, Vec<String>) {
        let mut refs = Refs::new(&self.tokens.tree);

        let palette = palette(&mut refs);
        let typography = self.typography(&mut refs);
        let shape = ThemeShape {
            border_radius: refs.var("borderRadius.md"),
        };
        let spacing = self.spacing(&mut refs);
        let components = ComponentOverrides::build(&mut refs);

        let theme = ThemeDescriptor {
            mode: self.scheme,
            palette,
            typography,
            shape,
            spacing,
            components,
        };
        (theme, refs.missing)
    }

    fn typography(&self, refs: &mut Refs<'_>) -> ThemeTypography {
        let scale = &self.tokens.typography;
        let mut variants = IndexMap::new();

        for (name, variant) in scale.iter() {
            let base = format!("typography.{name}");
            variants.insert(
                name.to_string(),
                TypographyStyle {
                    font_family: refs.var(&format!(
                        "typography.{FONT_FAMILY_KEY}.{}",
                        variant.family.as_str()
                    )),
                    font_size: refs.var(&format!("{base}.fontSize")),
                    font_weight: variant.font_weight,
                    line_height: refs.var(&format!("{base}.lineHeight")),
                    letter_spacing: variant
                        .letter_spacing
                        .as_ref()
                        .map(|_| refs.var(&format!("{base}.letterSpacing"))),
                },
            );
        }

        let font_family = if scale.is_empty() {
            scale.families.primary.clone()
        } else {
            refs.var(&format!("typography.{FONT_FAMILY_KEY}.primary"))
        };

        ThemeTypography {
            font_family,
            variants,
        }
    }

    fn spacing(&self, refs: &mut Refs<'_>) -> IndexMap<String, String> {
        let mut spacing = IndexMap::new();
        if let Some(group) = self.tokens.tree.group("spacing") {
            for (key, _) in group.iter() {
                spacing.insert(key.to_string(), refs.var(&format!("spacing.{key}")));
            }
        }
        spacing
    }
}

fn palette_color(refs: &mut Refs<'_>, main: &str, light: Option<&str>, dark: Option<&str>) -> PaletteColor {
    PaletteColor {
        main: refs.var(main),
        light: light.map(|p| refs.var(p)),
        dark: dark.map(|p| refs.var(p)),
        contrast_text: refs.var("colors.text.inverse"),
    }
}

fn palette(refs: &mut Refs<'_>) -> ThemePalette {
    ThemePalette {
        primary: palette_color(
            refs,
            "colors.action.primary",
            Some("colors.action.primaryHover"),
            Some("colors.action.primaryActive"),
        ),
        secondary: palette_color(
            refs,
            "colors.action.secondary",
            Some("colors.action.secondaryHover"),
            None,
        ),
        error: palette_color(refs, "colors.feedback.error", Some("colors.feedback.errorBg"), None),
        warning: palette_color(
            refs,
            "colors.feedback.warning",
            Some("colors.feedback.warningBg"),
            None,
        ),
        info: palette_color(refs, "colors.feedback.info", Some("colors.feedback.infoBg"), None),
        success: palette_color(
            refs,
            "colors.feedback.success",
            Some("colors.feedback.successBg"),
            None,
        ),
        background: BackgroundColors {
            default: refs.var("colors.surface.background"),
            paper: refs.var("colors.surface.paper"),
        },
        text: TextColors {
            primary: refs.var("colors.text.primary"),
            secondary: refs.var("colors.text.secondary"),
            disabled: refs.var("colors.text.disabled"),
        },
        action: ActionColors {
            hover: refs.var("colors.surface.hover"),
            disabled: refs.var("colors.text.disabled"),
            disabled_background: refs.var("colors.action.disabled"),
        },
        divider: refs.var("colors.border.default"),
    }
}

/// Shorthand for `ThemeBuilder::new(tokens).scheme(scheme).build()`
pub fn build_theme(tokens: &SemanticTokens, scheme: ColorScheme) -> ThemeDescriptor {
    ThemeBuilder::new(tokens).scheme(scheme).build()
}
