//! Typography tokens for theming

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Responsive, ScalarValue, TokenLeaf, TokenNode, TokenTree};
use crate::theme::css_var;

/// Which entry of [`FontFamilies`] a variant uses
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamilyKey {
    Display,
    Primary,
}

impl FontFamilyKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Primary => "primary",
        }
    }
}

/// The two font stacks variants indirect into
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamilies {
    pub display: String,
    pub primary: String,
}

impl FontFamilies {
    pub fn get(&self, key: FontFamilyKey) -> &str {
        match key {
            FontFamilyKey::Display => &self.display,
            FontFamilyKey::Primary => &self.primary,
        }
    }
}

impl Default for FontFamilies {
    fn default() -> Self {
        Self {
            display: "\"Sora\", \"Inter\", system-ui, -apple-system, sans-serif".to_string(),
            primary: "\"Inter\", system-ui, -apple-system, \"Segoe UI\", Roboto, sans-serif"
                .to_string(),
        }
    }
}

/// A named text style
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyVariant {
    pub font_size: Responsive<String>,
    pub line_height: Responsive<f64>,
    pub font_weight: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    pub family: FontFamilyKey,
}

impl TypographyVariant {
    pub fn new(
        family: FontFamilyKey,
        font_size: [&str; 3],
        line_height: [f64; 3],
        font_weight: u16,
    ) -> Self {
        let [m, t, d] = font_size;
        let [lm, lt, ld] = line_height;
        Self {
            font_size: Responsive::new(m.to_string(), t.to_string(), d.to_string()),
            line_height: Responsive::new(lm, lt, ld),
            font_weight,
            letter_spacing: None,
            family,
        }
    }

    pub fn letter_spacing(mut self, spacing: impl Into<String>) -> Self {
        self.letter_spacing = Some(spacing.into());
        self
    }
}

/// Key under `typography` holding the family table
pub const FONT_FAMILY_KEY: &str = "fontFamily";

/// Ordered set of typography variants plus their font families
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypographyScale {
    pub families: FontFamilies,
    variants: IndexMap<String, TypographyVariant>,
}

impl TypographyScale {
    pub fn new(families: FontFamilies) -> Self {
        Self {
            families,
            variants: IndexMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, variant: TypographyVariant) -> Self {
        self.variants.insert(name.into(), variant);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypographyVariant> {
        self.variants.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypographyVariant)> {
        self.variants.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Project the scale into token-tree form
    ///
    /// Produces `fontFamily.{display,primary}` scalars and, per variant,
    /// `fontSize`/`lineHeight` responsive leaves plus `fontWeight`,
    /// `letterSpacing` and `fontFamily` scalars. The variant's `fontFamily`
    /// references the family variable so the stack is authored once.
    pub fn to_tree(&self) -> TokenTree {
        let families = TokenTree::new()
            .with("display", TokenLeaf::scalar(self.families.display.as_str()))
            .with("primary", TokenLeaf::scalar(self.families.primary.as_str()));

        let mut tree = TokenTree::new().with(FONT_FAMILY_KEY, families);

        for (name, variant) in &self.variants {
            let mut node = TokenTree::new()
                .with(
                    "fontSize",
                    variant.font_size.map(|s| ScalarValue::from(s.as_str())),
                )
                .with(
                    "lineHeight",
                    variant.line_height.map(|lh| ScalarValue::Number(*lh)),
                )
                .with("fontWeight", TokenLeaf::scalar(variant.font_weight));

            if let Some(spacing) = &variant.letter_spacing {
                node.insert("letterSpacing", TokenLeaf::scalar(spacing.as_str()));
            }

            node.insert(
                "fontFamily",
                TokenLeaf::scalar(css_var(&format!(
                    "typography.{FONT_FAMILY_KEY}.{}",
                    variant.family.as_str()
                ))),
            );

            tree.insert(name.as_str(), node);
        }

        tree
    }
}

impl TypographyScale {
    /// Rebuild a scale from its tree projection
    ///
    /// Inverse of [`to_tree`](Self::to_tree). Family stacks come from the
    /// `fontFamily` scalars, falling back to [`FontFamilies::default`].
    /// Groups without `fontSize` and `lineHeight` leaves are not variants
    /// and are skipped.
    pub fn from_tree(tree: &TokenTree) -> Self {
        let defaults = FontFamilies::default();
        let family = |key: FontFamilyKey| {
            match tree.leaf(&format!("{FONT_FAMILY_KEY}.{}", key.as_str())) {
                Some(TokenLeaf::Scalar { value }) => value.to_string(),
                _ => defaults.get(key).to_string(),
            }
        };
        let mut scale = Self::new(FontFamilies {
            display: family(FontFamilyKey::Display),
            primary: family(FontFamilyKey::Primary),
        });

        for (name, node) in tree.iter() {
            let TokenNode::Group(group) = node else {
                continue;
            };
            if name == FONT_FAMILY_KEY {
                continue;
            }

            if let Some(variant) = TypographyVariant::from_tree(group) {
                scale.variants.insert(name.to_string(), variant);
            } else {
                tracing::debug!(variant = name, "typography group is not a complete variant");
            }
        }

        scale
    }
}

impl TypographyVariant {
    fn from_tree(tree: &TokenTree) -> Option<Self> {
        let font_size = responsive_leaf(tree, "fontSize")?.map(ScalarValue::to_string);
        let line_height = responsive_leaf(tree, "lineHeight")?;
        let line_height = Responsive::new(
            number(&line_height.mobile)?,
            number(&line_height.tablet)?,
            number(&line_height.desktop)?,
        );

        let font_weight = match tree.leaf("fontWeight") {
            Some(TokenLeaf::Scalar { value }) => u16::try_from(number(value)? as i64).ok()?,
            _ => 400,
        };
        let letter_spacing = match tree.leaf("letterSpacing") {
            Some(TokenLeaf::Scalar { value }) => Some(value.to_string()),
            _ => None,
        };

        let display = css_var(&format!(
            "typography.{FONT_FAMILY_KEY}.{}",
            FontFamilyKey::Display.as_str()
        ));
        let family = match tree.leaf("fontFamily") {
            Some(TokenLeaf::Scalar { value }) if value.to_string() == display => {
                FontFamilyKey::Display
            }
            _ => FontFamilyKey::Primary,
        };

        Some(Self {
            font_size,
            line_height,
            font_weight,
            letter_spacing,
            family,
        })
    }
}

/// A responsive leaf, or a scalar leaf spread over every tier
fn responsive_leaf(tree: &TokenTree, key: &str) -> Option<Responsive<ScalarValue>> {
    match tree.leaf(key)? {
        TokenLeaf::Responsive(value) => Some(value.clone()),
        TokenLeaf::Scalar { value } => Some(Responsive::uniform(value.clone())),
        TokenLeaf::Color(_) => None,
    }
}

fn number(value: &ScalarValue) -> Option<f64> {
    match value {
        ScalarValue::Number(n) => Some(*n),
        ScalarValue::Str(s) => s.trim().parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_covers_every_variant_field() {
        let scale = TypographyScale::new(FontFamilies::default()).with(
            "h1",
            TypographyVariant::new(FontFamilyKey::Display, ["32px", "40px", "48px"], [1.2, 1.2, 1.15], 700)
                .letter_spacing("-0.02em"),
        );

        let tree = scale.to_tree();
        assert_eq!(
            tree.leaf("h1.fontSize"),
            Some(&TokenLeaf::responsive("32px", "40px", "48px"))
        );
        assert_eq!(
            tree.leaf("h1.lineHeight"),
            Some(&TokenLeaf::responsive(1.2, 1.2, 1.15))
        );
        assert_eq!(tree.leaf("h1.fontWeight"), Some(&TokenLeaf::scalar(700u16)));
        assert_eq!(
            tree.leaf("h1.letterSpacing"),
            Some(&TokenLeaf::scalar("-0.02em"))
        );
        assert_eq!(
            tree.leaf("h1.fontFamily"),
            Some(&TokenLeaf::scalar("var(--quantum-typography-fontFamily-display)"))
        );
        assert!(tree.leaf("fontFamily.primary").is_some());
    }

    #[test]
    fn scale_rebuilds_from_projection() {
        let scale = TypographyScale::new(FontFamilies {
            display: "Sora".to_string(),
            primary: "Inter".to_string(),
        })
        .with(
            "h1",
            TypographyVariant::new(FontFamilyKey::Display, ["32px", "40px", "48px"], [1.2, 1.2, 1.15], 700)
                .letter_spacing("-0.02em"),
        )
        .with(
            "body1",
            TypographyVariant::new(FontFamilyKey::Primary, ["16px", "16px", "16px"], [1.5, 1.5, 1.5], 400),
        );

        assert_eq!(TypographyScale::from_tree(&scale.to_tree()), scale);
    }

    #[test]
    fn incomplete_groups_are_skipped() {
        let tree = TokenTree::new()
            .with("caption", TokenTree::new().with("fontSize", TokenLeaf::scalar("12px")))
            .with(
                "label",
                TokenTree::new()
                    .with("fontSize", TokenLeaf::scalar("14px"))
                    .with("lineHeight", TokenLeaf::scalar(1.4)),
            );

        let scale = TypographyScale::from_tree(&tree);
        assert!(scale.get("caption").is_none());
        assert_eq!(scale.families, FontFamilies::default());

        let label = scale.get("label").unwrap();
        assert_eq!(label.font_size, Responsive::uniform("14px".to_string()));
        assert_eq!(label.font_weight, 400);
        assert_eq!(label.family, FontFamilyKey::Primary);
    }

    #[test]
    fn letter_spacing_is_optional() {
        let scale = TypographyScale::default().with(
            "body1",
            TypographyVariant::new(FontFamilyKey::Primary, ["16px", "16px", "16px"], [1.5, 1.5, 1.5], 400),
        );
        assert!(scale.to_tree().get("body1.letterSpacing").is_none());
    }
}
