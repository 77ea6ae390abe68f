//! Token resolution into CSS custom properties
//!
//! The tree is flattened depth-first into `--quantum-<path>` names. Each
//! color scheme resolves to three maps that mirror a mobile-first cascade:
//!
//! - `mobile`: the full baseline (every color, scalar, and the mobile value
//!   of every responsive token)
//! - `tablet` / `desktop`: only the responsive tokens, meant to sit under
//!   `min-width` media queries
//!
//! Resolution is pure: the same tree and scheme always produce the same maps
//! in the same order.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::theme::ColorScheme;
use crate::tokens::{Breakpoint, TokenLeaf, TokenTree};

/// Prefix of every emitted variable name
pub const CSS_PREFIX: &str = "--quantum-";

/// Suffix of the derived triplet variable for `needsRGB` colors
pub const RGB_SUFFIX: &str = "RGB";

/// Triplet emitted when a color cannot be parsed as `#RRGGBB`
pub const RGB_FALLBACK: &str = "0, 0, 0";

/// Variable name to literal value, in traversal order
pub type VariableMap = IndexMap<String, String>;

/// Join path segments into a variable name
///
/// Segments are joined with `-` and used as authored, without case folding.
pub fn variable_name<S: AsRef<str>>(segments: &[S]) -> String {
    let mut name = String::from(CSS_PREFIX);
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            name.push('-');
        }
        name.push_str(segment.as_ref());
    }
    name
}

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
            .expect("hex color pattern is a valid regex")
    })
}

/// Parse `#RRGGBB` (or `RRGGBB`), case-insensitive
pub fn parse_hex_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let caps = hex_pattern().captures(value)?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
    Some((channel(1)?, channel(2)?, channel(3)?))
}

/// Convert a hex color to an `"R, G, B"` string
///
/// Anything that is not a 6-digit hex color yields `"0, 0, 0"`.
pub fn hex_to_rgb_triplet(value: &str) -> String {
    match parse_hex_rgb(value) {
        Some((r, g, b)) => format!("{r}, {g}, {b}"),
        None => RGB_FALLBACK.to_string(),
    }
}

/// Resolve one `(scheme, breakpoint)` pass
pub fn resolve(tree: &TokenTree, scheme: ColorScheme, breakpoint: Breakpoint) -> VariableMap {
    let baseline = breakpoint == Breakpoint::Mobile;
    let mut vars = VariableMap::new();

    for entry in tree.leaves() {
        let name = variable_name(entry.path.as_slice());
        match entry.leaf {
            TokenLeaf::Color(color) => {
                if !baseline {
                    continue;
                }
                let value = color.value(scheme);
                if color.needs_rgb {
                    if parse_hex_rgb(value).is_none() {
                        tracing::debug!(
                            variable = %name,
                            value,
                            "color is not #RRGGBB, RGB triplet falls back to zero"
                        );
                    }
                    let rgb_name = format!("{name}{RGB_SUFFIX}");
                    vars.insert(name, value.to_string());
                    vars.insert(rgb_name, hex_to_rgb_triplet(value));
                } else {
                    vars.insert(name, value.to_string());
                }
            }
            TokenLeaf::Responsive(responsive) => {
                vars.insert(name, responsive.get(breakpoint).to_string());
            }
            TokenLeaf::Scalar { value } => {
                if baseline {
                    vars.insert(name, value.to_string());
                }
            }
        }
    }

    vars
}

/// The three cascade layers of one color scheme
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SchemeVariables {
    pub mobile: VariableMap,
    pub tablet: VariableMap,
    pub desktop: VariableMap,
}

impl SchemeVariables {
    pub fn get(&self, breakpoint: Breakpoint) -> &VariableMap {
        match breakpoint {
            Breakpoint::Mobile => &self.mobile,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Desktop => &self.desktop,
        }
    }

    /// Effective values at a breakpoint: the baseline with every override
    /// up to and including `breakpoint` applied
    pub fn effective(&self, breakpoint: Breakpoint) -> VariableMap {
        let mut vars = self.mobile.clone();
        for tier in Breakpoint::all() {
            if *tier == Breakpoint::Mobile || *tier > breakpoint {
                continue;
            }
            for (name, value) in self.get(*tier) {
                vars.insert(name.clone(), value.clone());
            }
        }
        vars
    }
}

/// Resolve all three breakpoint passes for a scheme
pub fn resolve_scheme(tree: &TokenTree, scheme: ColorScheme) -> SchemeVariables {
    SchemeVariables {
        mobile: resolve(tree, scheme, Breakpoint::Mobile),
        tablet: resolve(tree, scheme, Breakpoint::Tablet),
        desktop: resolve(tree, scheme, Breakpoint::Desktop),
    }
}

/// All six variable maps
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVariables {
    pub light_mobile: VariableMap,
    pub light_tablet: VariableMap,
    pub light_desktop: VariableMap,
    pub dark_mobile: VariableMap,
    pub dark_tablet: VariableMap,
    pub dark_desktop: VariableMap,
}

impl ResolvedVariables {
    pub fn get(&self, scheme: ColorScheme, breakpoint: Breakpoint) -> &VariableMap {
        match (scheme, breakpoint) {
            (ColorScheme::Light, Breakpoint::Mobile) => &self.light_mobile,
            (ColorScheme::Light, Breakpoint::Tablet) => &self.light_tablet,
            (ColorScheme::Light, Breakpoint::Desktop) => &self.light_desktop,
            (ColorScheme::Dark, Breakpoint::Mobile) => &self.dark_mobile,
            (ColorScheme::Dark, Breakpoint::Tablet) => &self.dark_tablet,
            (ColorScheme::Dark, Breakpoint::Desktop) => &self.dark_desktop,
        }
    }

    pub fn for_scheme(&self, scheme: ColorScheme) -> SchemeVariables {
        SchemeVariables {
            mobile: self.get(scheme, Breakpoint::Mobile).clone(),
            tablet: self.get(scheme, Breakpoint::Tablet).clone(),
            desktop: self.get(scheme, Breakpoint::Desktop).clone(),
        }
    }
}

/// Resolve every scheme and breakpoint
pub fn resolve_all(tree: &TokenTree) -> ResolvedVariables {
    let light = resolve_scheme(tree, ColorScheme::Light);
    let dark = resolve_scheme(tree, ColorScheme::Dark);

    ResolvedVariables {
        light_mobile: light.mobile,
        light_tablet: light.tablet,
        light_desktop: light.desktop,
        dark_mobile: dark.mobile,
        dark_tablet: dark.tablet,
        dark_desktop: dark.desktop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::ColorToken;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_triplet_parses_both_cases() {
        assert_eq!(hex_to_rgb_triplet("#0066CC"), "0, 102, 204");
        assert_eq!(hex_to_rgb_triplet("#0066cc"), "0, 102, 204");
        assert_eq!(hex_to_rgb_triplet("0066CC"), "0, 102, 204");
        assert_eq!(hex_to_rgb_triplet("#FFFFFF"), "255, 255, 255");
        assert_eq!(hex_to_rgb_triplet("#000000"), "0, 0, 0");
    }

    #[test]
    fn hex_triplet_round_trips() {
        for (r, g, b) in [(0u8, 0u8, 0u8), (255, 255, 255), (18, 171, 205), (1, 2, 3)] {
            let upper = format!("#{r:02X}{g:02X}{b:02X}");
            let lower = format!("#{r:02x}{g:02x}{b:02x}");
            assert_eq!(parse_hex_rgb(&upper), Some((r, g, b)));
            assert_eq!(parse_hex_rgb(&lower), Some((r, g, b)));
            assert_eq!(hex_to_rgb_triplet(&upper), format!("{r}, {g}, {b}"));
        }
    }

    #[test]
    fn malformed_hex_falls_back() {
        for bad in [
            "",
            "#",
            "#FFF",
            "#GGGGGG",
            "#0066CC80",
            "##0066CC",
            " #0066CC",
            "rgba(0, 0, 0, 0.5)",
            "blue",
            "#ＦＦＦＦＦＦ",
        ] {
            assert_eq!(hex_to_rgb_triplet(bad), RGB_FALLBACK, "input {bad:?}");
        }
    }

    #[test]
    fn variable_names_keep_authored_case() {
        assert_eq!(
            variable_name(&["colors", "action", "primaryHover"]),
            "--quantum-colors-action-primaryHover"
        );
        assert_eq!(variable_name::<&str>(&[]), "--quantum-");
    }

    #[test]
    fn primary_action_scenario() {
        let tree = TokenTree::new().with(
            "colors",
            TokenTree::new().with(
                "action",
                TokenTree::new().with("primary", ColorToken::fixed("#0066CC").with_rgb()),
            ),
        );

        let vars = resolve(&tree, ColorScheme::Light, Breakpoint::Mobile);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars["--quantum-colors-action-primary"], "#0066CC");
        assert_eq!(vars["--quantum-colors-action-primaryRGB"], "0, 102, 204");
    }

    #[test]
    fn non_hex_rgb_color_degrades_without_failing() {
        let tree = TokenTree::new()
            .with("overlay", ColorToken::fixed("rgba(0, 0, 0, 0.5)").with_rgb())
            .with("ok", ColorToken::fixed("#FFFFFF"));

        let vars = resolve(&tree, ColorScheme::Dark, Breakpoint::Mobile);
        assert_eq!(vars["--quantum-overlay"], "rgba(0, 0, 0, 0.5)");
        assert_eq!(vars["--quantum-overlayRGB"], "0, 0, 0");
        assert_eq!(vars["--quantum-ok"], "#FFFFFF");
    }

    #[test]
    fn override_passes_only_carry_responsive_tokens() {
        let tree = TokenTree::new()
            .with("text", ColorToken::new("#111111", "#EEEEEE"))
            .with("gap", TokenLeaf::responsive("8px", "12px", "16px"))
            .with("fast", TokenLeaf::scalar("150ms"));

        let scheme = resolve_scheme(&tree, ColorScheme::Light);
        assert_eq!(scheme.mobile.len(), 3);
        assert_eq!(
            scheme.tablet.iter().collect::<Vec<_>>(),
            vec![(&"--quantum-gap".to_string(), &"12px".to_string())]
        );
        assert_eq!(scheme.desktop["--quantum-gap"], "16px");

        let effective = scheme.effective(Breakpoint::Desktop);
        assert_eq!(effective["--quantum-gap"], "16px");
        assert_eq!(effective["--quantum-text"], "#111111");
        assert_eq!(scheme.effective(Breakpoint::Mobile), scheme.mobile);
    }

    #[test]
    fn resolve_all_uses_scheme_values() {
        let tree = TokenTree::new().with("text", ColorToken::new("#111111", "#EEEEEE"));
        let all = resolve_all(&tree);
        assert_eq!(all.light_mobile["--quantum-text"], "#111111");
        assert_eq!(all.dark_mobile["--quantum-text"], "#EEEEEE");
        assert!(all.dark_tablet.is_empty());
        assert_eq!(all.for_scheme(ColorScheme::Dark).mobile, all.dark_mobile);
    }
}
