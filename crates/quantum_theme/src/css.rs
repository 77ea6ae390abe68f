//! Stylesheet and pre-hydration script generation

use crate::resolve::{ResolvedVariables, VariableMap};
use crate::state::DEFAULT_STORAGE_KEY;
use crate::theme::ColorScheme;
use crate::tokens::Breakpoint;

/// Root attribute external stylesheets key theme rules off
pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-theme";

/// Stylesheet layout options
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylesheetOptions {
    pub attribute: String,
    pub tablet_min_width: u32,
    pub desktop_min_width: u32,
}

impl Default for StylesheetOptions {
    fn default() -> Self {
        Self {
            attribute: DEFAULT_THEME_ATTRIBUTE.to_string(),
            tablet_min_width: Breakpoint::Tablet.min_width(),
            desktop_min_width: Breakpoint::Desktop.min_width(),
        }
    }
}

impl StylesheetOptions {
    fn min_width(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Mobile => 0,
            Breakpoint::Tablet => self.tablet_min_width,
            Breakpoint::Desktop => self.desktop_min_width,
        }
    }

    fn selector(&self, scheme: ColorScheme) -> String {
        let attr = format!("[{}=\"{}\"]", self.attribute, scheme.as_str());
        match scheme {
            // Light is also the attribute-less default
            ColorScheme::Light => format!(":root,\n{attr}"),
            ColorScheme::Dark => attr,
        }
    }
}

/// Render all six variable maps as one stylesheet
///
/// Light blocks come first and also apply to a bare `:root`; dark blocks
/// follow so they win the cascade when the attribute says `dark`. Override
/// maps that are empty produce no media block.
pub fn render_stylesheet(vars: &ResolvedVariables, options: &StylesheetOptions) -> String {
    let mut out = String::new();

    for scheme in ColorScheme::all() {
        let selector = options.selector(*scheme);
        for breakpoint in Breakpoint::all() {
            let map = vars.get(*scheme, *breakpoint);
            if *breakpoint == Breakpoint::Mobile {
                write_block(&mut out, &selector, map, "");
            } else if !map.is_empty() {
                out.push_str(&format!(
                    "@media (min-width: {}px) {{\n",
                    options.min_width(*breakpoint)
                ));
                write_block(&mut out, &indent(&selector), map, "  ");
                out.push_str("}\n\n");
            }
        }
    }

    // Single trailing newline
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

fn indent(selector: &str) -> String {
    selector
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_block(out: &mut String, selector: &str, vars: &VariableMap, indent: &str) {
    out.push_str(selector);
    out.push_str(" {\n");
    for (name, value) in vars {
        out.push_str(&format!("{indent}  {name}: {value};\n"));
    }
    out.push_str(indent);
    out.push_str("}\n");
    if indent.is_empty() {
        out.push('\n');
    }
}

/// Options for [`init_script`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitScriptOptions {
    pub storage_key: String,
    pub attribute: String,
    pub default_scheme: ColorScheme,
}

impl Default for InitScriptOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            attribute: DEFAULT_THEME_ATTRIBUTE.to_string(),
            default_scheme: ColorScheme::Light,
        }
    }
}

/// Blocking inline script that settles the root attribute before first paint
///
/// Same priority as runtime hydration: stored preference, then an attribute
/// already on the root element, then the default. Invalid values count as
/// absent and storage failures are ignored.
pub fn init_script(options: &InitScriptOptions) -> String {
    let key = js_string(&options.storage_key);
    let attr = js_string(&options.attribute);
    let fallback = js_string(options.default_scheme.as_str());

    format!(
        r#"(function () {{
  var root = document.documentElement;
  var valid = function (v) {{ return v === "light" || v === "dark"; }};
  var scheme = null;
  try {{ scheme = window.localStorage.getItem({key}); }} catch (e) {{}}
  if (!valid(scheme)) scheme = root.getAttribute({attr});
  if (!valid(scheme)) scheme = {fallback};
  root.setAttribute({attr}, scheme);
  root.style.colorScheme = scheme;
}})();"#
    )
}

/// Quote `value` as a JS string literal that is safe inside an inline
/// `<script>` element
fn js_string(value: &str) -> String {
    // JSON string literals are valid JS string literals; `<` is escaped so
    // the text can never close the surrounding element
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
}
