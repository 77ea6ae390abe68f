use std::collections::HashSet;

use pretty_assertions::assert_eq;
use quantum_theme::{
    build_theme, check_tokens, resolve, resolve_all, Breakpoint, ColorScheme, ColorToken,
    SemanticTokens, TokenLeaf, TokenTree, RGB_SUFFIX,
};

fn keys(map: &quantum_theme::VariableMap) -> HashSet<&str> {
    map.keys().map(String::as_str).collect()
}

#[test]
fn resolution_is_deterministic() {
    let tokens = SemanticTokens::quantum();
    let first = resolve_all(&tokens.tree);
    let second = resolve_all(&SemanticTokens::quantum().tree);

    assert_eq!(first, second);
    assert_eq!(
        first.light_mobile.keys().collect::<Vec<_>>(),
        second.light_mobile.keys().collect::<Vec<_>>()
    );
}

#[test]
fn variable_names_do_not_depend_on_scheme() {
    let vars = resolve_all(&SemanticTokens::quantum().tree);
    for breakpoint in Breakpoint::all() {
        assert_eq!(
            keys(vars.get(ColorScheme::Light, *breakpoint)),
            keys(vars.get(ColorScheme::Dark, *breakpoint)),
            "breakpoint {breakpoint}"
        );
    }
    assert_ne!(
        vars.light_mobile["--quantum-colors-surface-paper"],
        vars.dark_mobile["--quantum-colors-surface-paper"]
    );
}

#[test]
fn override_maps_are_subsets_of_the_baseline() {
    let vars = resolve_all(&SemanticTokens::quantum().tree);
    for scheme in ColorScheme::all() {
        let baseline = keys(vars.get(*scheme, Breakpoint::Mobile));
        for tier in [Breakpoint::Tablet, Breakpoint::Desktop] {
            let overrides = keys(vars.get(*scheme, tier));
            assert!(!overrides.is_empty());
            assert!(
                overrides.is_subset(&baseline),
                "{scheme}/{tier} introduces {:?}",
                overrides.difference(&baseline).collect::<Vec<_>>()
            );
        }
    }
}

#[test]
fn rgb_flag_controls_variable_count() {
    let tokens = SemanticTokens::quantum();
    let vars = resolve(&tokens.tree, ColorScheme::Light, Breakpoint::Mobile);

    for entry in tokens.tree.leaves() {
        let TokenLeaf::Color(color) = entry.leaf else {
            continue;
        };
        let name = quantum_theme::variable_name(entry.path.as_slice());
        let rgb_name = format!("{name}{RGB_SUFFIX}");

        assert!(vars.contains_key(&name), "{name} missing");
        assert_eq!(vars.contains_key(&rgb_name), color.needs_rgb, "{rgb_name}");
    }

    let colors = tokens
        .tree
        .leaves()
        .into_iter()
        .filter(|e| matches!(e.leaf, TokenLeaf::Color(_)))
        .count();
    let rgb = tokens
        .tree
        .leaves()
        .into_iter()
        .filter(|e| matches!(e.leaf, TokenLeaf::Color(c) if c.needs_rgb))
        .count();
    let others = tokens.tree.leaves().len() - colors;
    assert_eq!(vars.len(), colors + rgb + others);
}

#[test]
fn quantum_surface_exposes_expected_variables() {
    let vars = resolve_all(&SemanticTokens::quantum().tree);

    assert_eq!(vars.light_mobile["--quantum-colors-action-primary"], "#0066CC");
    assert_eq!(vars.light_mobile["--quantum-colors-action-primaryRGB"], "0, 102, 204");
    assert_eq!(vars.dark_mobile["--quantum-colors-action-primary"], "#3385D6");
    assert_eq!(vars.dark_mobile["--quantum-colors-action-primaryRGB"], "51, 133, 214");

    assert_eq!(vars.light_mobile["--quantum-typography-h1-fontSize"], "32px");
    assert_eq!(vars.light_tablet["--quantum-typography-h1-fontSize"], "40px");
    assert_eq!(vars.light_desktop["--quantum-typography-h1-fontSize"], "48px");
    assert_eq!(vars.light_mobile["--quantum-typography-h1-fontWeight"], "700");
    assert_eq!(vars.light_mobile["--quantum-typography-h1-lineHeight"], "1.2");
    assert_eq!(vars.light_desktop["--quantum-typography-h1-lineHeight"], "1.15");

    assert_eq!(vars.light_mobile["--quantum-animation-duration-fast"], "150ms");
    assert!(!vars.light_tablet.contains_key("--quantum-animation-duration-fast"));
    assert_eq!(vars.light_desktop["--quantum-spacing-xxl"], "64px");
}

#[test]
fn fixture_tree_from_json_resolves() {
    let tree = TokenTree::from_json_str(
        r##"{
            "colors": {
                "action": {
                    "primary": { "kind": "color", "light": "#0066CC", "dark": "#0066CC", "needsRGB": true }
                }
            }
        }"##,
    )
    .unwrap();

    let expected = TokenTree::new().with(
        "colors",
        TokenTree::new().with(
            "action",
            TokenTree::new().with("primary", ColorToken::fixed("#0066CC").with_rgb()),
        ),
    );
    assert_eq!(tree, expected);

    let vars = resolve(&tree, ColorScheme::Light, Breakpoint::Mobile);
    assert_eq!(vars["--quantum-colors-action-primary"], "#0066CC");
    assert_eq!(vars["--quantum-colors-action-primaryRGB"], "0, 102, 204");
}

#[test]
fn tree_loaded_from_json_keeps_typography() {
    let builtin = SemanticTokens::quantum();
    let json = serde_json::to_string(&builtin.tree).unwrap();
    let loaded = SemanticTokens::from_tree(TokenTree::from_json_str(&json).unwrap());

    assert_eq!(loaded.tree, builtin.tree);
    let paths = |tokens: &SemanticTokens| -> Vec<String> {
        tokens.tree.leaves().iter().map(|entry| entry.dotted()).collect()
    };
    assert_eq!(paths(&loaded), paths(&builtin));
    assert_eq!(loaded.typography, builtin.typography);

    let theme = build_theme(&loaded, ColorScheme::Dark);
    assert_eq!(theme, build_theme(&builtin, ColorScheme::Dark));
    assert_eq!(
        theme.typography.font_family,
        "var(--quantum-typography-fontFamily-primary)"
    );
    assert_eq!(
        theme.typography.variants["h1"].font_family,
        "var(--quantum-typography-fontFamily-display)"
    );
    assert!(check_tokens(&loaded).is_empty());
}
