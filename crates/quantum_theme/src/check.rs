//! Authoring checks for token trees
//!
//! Resolution never fails on authored data; problems surface here instead so
//! tooling can report them during development.

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;

use crate::resolve::{parse_hex_rgb, variable_name, RGB_SUFFIX};
use crate::theme::{ColorScheme, ThemeBuilder};
use crate::tokens::{Breakpoint, Responsive, ScalarValue, SemanticTokens, TokenLeaf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// One finding, located by dot path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

/// Check a token set for authoring defects
///
/// - `needsRGB` colors that are not `#RRGGBB` (their triplet would be zero)
/// - colors whose light and dark values use different formats
/// - responsive lengths that shrink from mobile to desktop
/// - leaves that flatten to the same variable name
/// - theme-builder references to paths the tree lacks
pub fn check_tokens(tokens: &SemanticTokens) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut names: FxHashMap<String, String> = FxHashMap::default();

    for entry in tokens.tree.leaves() {
        let path = entry.dotted();
        let name = variable_name(entry.path.as_slice());

        match entry.leaf {
            TokenLeaf::Color(color) => {
                if color.needs_rgb {
                    for scheme in ColorScheme::all() {
                        let value = color.value(*scheme);
                        if parse_hex_rgb(value).is_none() {
                            diagnostics.push(Diagnostic::error(
                                &path,
                                format!(
                                    "{scheme} value `{value}` is not #RRGGBB; its RGB variable will be `0, 0, 0`"
                                ),
                            ));
                        }
                    }
                    claim_name(&mut names, &mut diagnostics, format!("{name}{RGB_SUFFIX}"), &path);
                }
                if color_format(&color.light) != color_format(&color.dark) {
                    diagnostics.push(Diagnostic::warning(
                        &path,
                        format!(
                            "light `{}` and dark `{}` use different color formats",
                            color.light, color.dark
                        ),
                    ));
                }
            }
            TokenLeaf::Responsive(value) => {
                if let Some(message) = decreasing_tiers(value) {
                    diagnostics.push(Diagnostic::warning(&path, message));
                }
            }
            TokenLeaf::Scalar { .. } => {}
        }

        claim_name(&mut names, &mut diagnostics, name, &path);
    }

    for missing in ThemeBuilder::new(tokens).missing_references() {
        diagnostics.push(Diagnostic::error(
            missing,
            "referenced by the theme builder but not defined as a leaf",
        ));
    }

    diagnostics
}

fn claim_name(
    names: &mut FxHashMap<String, String>,
    diagnostics: &mut Vec<Diagnostic>,
    name: String,
    path: &str,
) {
    if let Some(owner) = names.get(&name) {
        diagnostics.push(Diagnostic::error(
            path,
            format!("variable `{name}` is also produced by `{owner}`"),
        ));
    } else {
        names.insert(name, path.to_string());
    }
}

fn color_format(value: &str) -> &'static str {
    let value = value.trim_start();
    if value.starts_with('#') {
        "hex"
    } else if value.starts_with("rgb") {
        "rgb"
    } else if value.starts_with("hsl") {
        "hsl"
    } else {
        "other"
    }
}

/// Split `"16px"` into `(16.0, "px")`; bare numbers have an empty unit
fn numeric(value: &ScalarValue) -> Option<(f64, String)> {
    match value {
        ScalarValue::Number(n) => Some((*n, String::new())),
        ScalarValue::Str(s) => {
            let s = s.trim();
            let split = s
                .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
                .unwrap_or(s.len());
            let number = s[..split].parse::<f64>().ok()?;
            Some((number, s[split..].to_string()))
        }
    }
}

fn decreasing_tiers(value: &Responsive<ScalarValue>) -> Option<String> {
    let tiers: Vec<(Breakpoint, f64, String)> = Breakpoint::all()
        .iter()
        .map(|tier| numeric(value.get(*tier)).map(|(n, unit)| (*tier, n, unit)))
        .collect::<Option<_>>()?;

    // Only lengths are compared; unitless ratios such as line heights
    // legitimately tighten on larger screens
    if tiers[0].2.is_empty() || tiers.windows(2).any(|w| w[0].2 != w[1].2) {
        return None;
    }

    tiers.windows(2).find(|w| w[1].1 < w[0].1).map(|w| {
        format!(
            "{} value {} is smaller than {} value {}",
            w[1].0,
            value.get(w[1].0),
            w[0].0,
            value.get(w[0].0)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{ColorToken, TokenTree};

    fn messages(tree: TokenTree) -> Vec<Diagnostic> {
        check_tokens(&SemanticTokens::from_tree(tree))
            .into_iter()
            .filter(|d| !d.message.starts_with("referenced by"))
            .collect()
    }

    #[test]
    fn quantum_tokens_are_clean() {
        assert_eq!(check_tokens(&SemanticTokens::quantum()), Vec::new());
    }

    #[test]
    fn rgb_on_non_hex_is_an_error() {
        let found = messages(TokenTree::new().with(
            "overlay",
            ColorToken::new("rgba(0, 0, 0, 0.5)", "#000000").with_rgb(),
        ));
        assert!(found
            .iter()
            .any(|d| d.severity == Severity::Error && d.message.starts_with("light value")));
        assert!(found
            .iter()
            .any(|d| d.severity == Severity::Warning && d.message.contains("different color formats")));
    }

    #[test]
    fn shrinking_responsive_value_warns() {
        let found = messages(
            TokenTree::new()
                .with("gap", TokenLeaf::responsive("16px", "12px", "20px"))
                .with("mixed", TokenLeaf::responsive("1rem", "12px", "8px"))
                .with("ratio", TokenLeaf::responsive(1.5, 1.4, 1.4)),
        );
        let paths: Vec<&str> = found.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["gap"]);
        assert_eq!(found[0].message, "tablet value 12px is smaller than mobile value 16px");
    }

    #[test]
    fn flattened_name_collisions_are_errors() {
        let found = messages(
            TokenTree::new()
                .with("a", TokenTree::new().with("b", TokenLeaf::scalar("1")))
                .with("a-b", TokenLeaf::scalar("2"))
                .with("c", ColorToken::fixed("#FFFFFF").with_rgb())
                .with("cRGB", TokenLeaf::scalar("3")),
        );
        let paths: Vec<&str> = found.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["a-b", "cRGB"]);
    }

    #[test]
    fn missing_builder_references_are_reported() {
        let found = check_tokens(&SemanticTokens::from_tree(TokenTree::new()));
        assert!(found
            .iter()
            .any(|d| d.path == "colors.action.primary" && d.severity == Severity::Error));
    }
}
