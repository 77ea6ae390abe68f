//! Component style overrides
//!
//! Each component gets an ordered list of rules. A rule applies when every
//! `when` entry matches the component's props (`variant`, `intent`, `size`,
//! state flags); a rule with an empty `when` is the base style. Later rules
//! win, so discriminated styles are layered instead of subclassed.

use indexmap::IndexMap;
use serde::Serialize;

use super::builder::Refs;

/// A conditional block of style declarations
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    pub when: IndexMap<String, String>,
    pub style: IndexMap<String, String>,
}

impl StyleRule {
    /// Unconditional rule
    pub fn base() -> Self {
        Self::default()
    }

    pub fn when(attr: impl Into<String>, value: impl Into<String>) -> Self {
        Self::base().and(attr, value)
    }

    /// Add another required prop
    pub fn and(mut self, attr: impl Into<String>, value: impl Into<String>) -> Self {
        self.when.insert(attr.into(), value.into());
        self
    }

    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn matches(&self, props: &[(&str, &str)]) -> bool {
        self.when
            .iter()
            .all(|(attr, value)| props.iter().any(|(k, v)| k == attr && v == value))
    }
}

/// Per-component rule lists
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentOverrides {
    pub button: Vec<StyleRule>,
    pub paper: Vec<StyleRule>,
    pub text_field: Vec<StyleRule>,
    pub checkbox: Vec<StyleRule>,
    pub typography: Vec<StyleRule>,
}

impl ComponentOverrides {
    pub(super) fn build(refs: &mut Refs<'_>) -> Self {
        Self {
            button: button(refs),
            paper: paper(refs),
            text_field: text_field(refs),
            checkbox: checkbox(refs),
            typography: typography(refs),
        }
    }

    /// Rules for a component by its camelCase name
    pub fn rules(&self, component: &str) -> Option<&[StyleRule]> {
        let rules = match component {
            "button" => &self.button,
            "paper" => &self.paper,
            "textField" => &self.text_field,
            "checkbox" => &self.checkbox,
            "typography" => &self.typography,
            _ => return None,
        };
        Some(rules.as_slice())
    }

    /// Merge every matching rule in order
    pub fn style_for(&self, component: &str, props: &[(&str, &str)]) -> IndexMap<String, String> {
        let mut style = IndexMap::new();
        for rule in self.rules(component).unwrap_or_default() {
            if rule.matches(props) {
                for (property, value) in &rule.style {
                    style.insert(property.clone(), value.clone());
                }
            }
        }
        style
    }
}

/// Button intents and the color each one maps to
const BUTTON_INTENTS: [(&str, &str, &str); 4] = [
    ("primary", "colors.action.primary", "colors.action.primaryHover"),
    ("secondary", "colors.action.secondary", "colors.action.secondaryHover"),
    ("danger", "colors.feedback.error", "colors.feedback.error"),
    ("success", "colors.feedback.success", "colors.feedback.success"),
];

fn button(refs: &mut Refs<'_>) -> Vec<StyleRule> {
    let transition = format!(
        "background-color {duration} {easing}, border-color {duration} {easing}, color {duration} {easing}",
        duration = refs.var("animation.duration.fast"),
        easing = refs.var("animation.easing.standard"),
    );

    let mut rules = vec![StyleRule::base()
        .set("borderRadius", refs.var("borderRadius.md"))
        .set("fontFamily", refs.var("typography.fontFamily.primary"))
        .set("fontSize", refs.var("typography.button.fontSize"))
        .set("fontWeight", refs.var("typography.button.fontWeight"))
        .set("letterSpacing", refs.var("typography.button.letterSpacing"))
        .set("textTransform", "none")
        .set("transition", transition)];

    for (intent, color, hover) in BUTTON_INTENTS {
        let color_var = refs.var(color);
        rules.push(
            StyleRule::when("variant", "contained")
                .and("intent", intent)
                .set("backgroundColor", color_var.clone())
                .set("color", refs.var("colors.text.inverse"))
                .set("hoverBackgroundColor", refs.var(hover)),
        );
        rules.push(
            StyleRule::when("variant", "outlined")
                .and("intent", intent)
                .set("backgroundColor", "transparent")
                .set(
                    "border",
                    format!("{} solid {color_var}", refs.var("textField.borderWidth")),
                )
                .set("color", color_var.clone())
                .set("hoverBackgroundColor", refs.rgba(color, 0.08)),
        );
        rules.push(
            StyleRule::when("variant", "text")
                .and("intent", intent)
                .set("backgroundColor", "transparent")
                .set("color", color_var),
        );
    }

    let sizes = [
        ("small", "spacing.xs", "spacing.sm"),
        ("medium", "spacing.sm", "spacing.md"),
        ("large", "spacing.md", "spacing.lg"),
    ];
    for (size, y, x) in sizes {
        rules.push(
            StyleRule::when("size", size).set("padding", format!("{} {}", refs.var(y), refs.var(x))),
        );
    }

    rules.push(
        StyleRule::when("disabled", "true")
            .set("backgroundColor", refs.var("colors.action.disabled"))
            .set("color", refs.var("colors.text.disabled"))
            .set("boxShadow", refs.var("shadows.none"))
            .set("cursor", "not-allowed"),
    );

    rules
}

fn paper(refs: &mut Refs<'_>) -> Vec<StyleRule> {
    let border = format!(
        "{} solid {}",
        refs.var("textField.borderWidth"),
        refs.var("colors.border.default")
    );

    vec![
        StyleRule::base()
            .set("backgroundColor", refs.var("colors.surface.paper"))
            .set("color", refs.var("colors.text.primary"))
            .set("borderRadius", refs.var("borderRadius.lg"))
            .set("backgroundImage", "none"),
        StyleRule::when("variant", "elevated")
            .set("boxShadow", refs.var("shadows.md"))
            .set("border", "none"),
        StyleRule::when("variant", "outlined")
            .set("boxShadow", refs.var("shadows.none"))
            .set("border", border),
        StyleRule::when("variant", "glass")
            .set("backgroundColor", refs.var("glassmorphism.background"))
            .set(
                "border",
                format!(
                    "{} solid {}",
                    refs.var("textField.borderWidth"),
                    refs.var("glassmorphism.border")
                ),
            )
            .set(
                "backdropFilter",
                format!("blur({})", refs.var("glassmorphism.blur")),
            )
            .set("boxShadow", refs.var("shadows.sm")),
        StyleRule::when("variant", "flat")
            .set("backgroundColor", refs.var("colors.surface.background"))
            .set("boxShadow", refs.var("shadows.none"))
            .set("border", "none"),
    ]
}

fn text_field(refs: &mut Refs<'_>) -> Vec<StyleRule> {
    let focus_ring = format!(
        "0 0 0 {} {}",
        refs.var("textField.focusRingWidth"),
        refs.rgba("colors.border.focus", 0.25)
    );

    vec![
        StyleRule::base()
            .set("height", refs.var("textField.height"))
            .set("padding", format!("0 {}", refs.var("textField.paddingX")))
            .set("fontSize", refs.var("textField.fontSize"))
            .set("fontFamily", refs.var("typography.fontFamily.primary"))
            .set("borderRadius", refs.var("borderRadius.md"))
            .set(
                "border",
                format!(
                    "{} solid {}",
                    refs.var("textField.borderWidth"),
                    refs.var("colors.border.default")
                ),
            )
            .set("backgroundColor", refs.var("colors.surface.paper"))
            .set("color", refs.var("colors.text.primary"))
            .set("gap", refs.var("textField.labelGap")),
        StyleRule::when("focused", "true")
            .set("borderColor", refs.var("colors.border.focus"))
            .set("boxShadow", focus_ring),
        StyleRule::when("error", "true")
            .set("borderColor", refs.var("colors.border.error"))
            .set("helperTextColor", refs.var("colors.feedback.error")),
        StyleRule::when("disabled", "true")
            .set("backgroundColor", refs.var("colors.action.disabled"))
            .set("color", refs.var("colors.text.disabled")),
    ]
}

fn checkbox(refs: &mut Refs<'_>) -> Vec<StyleRule> {
    vec![
        StyleRule::base()
            .set("borderRadius", refs.var("borderRadius.sm"))
            .set(
                "border",
                format!(
                    "{} solid {}",
                    refs.var("textField.borderWidth"),
                    refs.var("colors.border.strong")
                ),
            )
            .set("backgroundColor", refs.var("colors.surface.paper")),
        StyleRule::when("checked", "true")
            .set("backgroundColor", refs.var("colors.action.primary"))
            .set("borderColor", refs.var("colors.action.primary"))
            .set("color", refs.var("colors.text.inverse")),
        StyleRule::when("focused", "true").set("boxShadow", refs.var("shadows.focus")),
        StyleRule::when("error", "true").set("borderColor", refs.var("colors.border.error")),
        StyleRule::when("disabled", "true")
            .set("backgroundColor", refs.var("colors.action.disabled"))
            .set("borderColor", refs.var("colors.action.disabled")),
    ]
}

fn typography(refs: &mut Refs<'_>) -> Vec<StyleRule> {
    let mut rules = vec![StyleRule::base().set("color", refs.var("colors.text.primary"))];
    for tone in ["primary", "secondary", "disabled", "inverse", "link"] {
        let color = refs.var(&format!("colors.text.{tone}"));
        rules.push(StyleRule::when("color", tone).set("color", color));
    }
    rules
}
