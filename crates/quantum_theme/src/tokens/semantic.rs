//! The Quantum semantic token table

use super::{
    ColorToken, FontFamilies, FontFamilyKey, TokenLeaf, TokenTree, TypographyScale,
    TypographyVariant,
};
use crate::palette::{amber, blue, gray, green, red, violet, BLACK, WHITE};

/// Authored tokens handed to the resolver and theme builder
///
/// Constructed explicitly and passed by reference; there is no global
/// instance, so tests can supply their own trees.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SemanticTokens {
    pub tree: TokenTree,
    pub typography: TypographyScale,
}

impl SemanticTokens {
    /// Pair a tree with a typography scale, projecting the scale into the
    /// tree under `typography` unless the tree already defines that key
    pub fn new(mut tree: TokenTree, typography: TypographyScale) -> Self {
        if !typography.is_empty() && tree.get("typography").is_none() {
            tree.insert("typography", typography.to_tree());
        }
        Self { tree, typography }
    }

    /// Wrap a tree loaded from disk, recovering the typography scale from
    /// its `typography` group
    pub fn from_tree(tree: TokenTree) -> Self {
        let typography = tree
            .group("typography")
            .map(TypographyScale::from_tree)
            .unwrap_or_default();
        Self { tree, typography }
    }

    /// The built-in Quantum UI design language
    pub fn quantum() -> Self {
        let typography = quantum_typography();
        let tree = TokenTree::new()
            .with("colors", colors())
            .with("borderRadius", border_radius())
            .with("shadows", shadows())
            .with("glassmorphism", glassmorphism())
            .with("animation", animation())
            .with("typography", typography.to_tree())
            .with("spacing", spacing())
            .with("textField", text_field());

        Self { tree, typography }
    }
}

fn colors() -> TokenTree {
    let action = TokenTree::new()
        .with("primary", ColorToken::new(blue::B500, blue::B400).with_rgb())
        .with("primaryHover", ColorToken::new(blue::B600, blue::B300))
        .with("primaryActive", ColorToken::new(blue::B700, blue::B200))
        .with("secondary", ColorToken::new(violet::V500, violet::V400).with_rgb())
        .with("secondaryHover", ColorToken::new(violet::V700, violet::V100))
        .with("disabled", ColorToken::new(gray::G300, gray::G800));

    let surface = TokenTree::new()
        .with("background", ColorToken::new(gray::G50, gray::G950).with_rgb())
        .with("paper", ColorToken::new(WHITE, gray::G900).with_rgb())
        .with("elevated", ColorToken::new(WHITE, gray::G850))
        .with("hover", ColorToken::new(gray::G100, gray::G800))
        .with(
            "overlay",
            ColorToken::new("rgba(16, 18, 20, 0.48)", "rgba(0, 0, 0, 0.64)"),
        );

    let text = TokenTree::new()
        .with("primary", ColorToken::new(gray::G900, gray::G50).with_rgb())
        .with("secondary", ColorToken::new(gray::G600, gray::G500))
        .with("disabled", ColorToken::new(gray::G500, gray::G700))
        .with("inverse", ColorToken::new(WHITE, gray::G950))
        .with("link", ColorToken::new(blue::B600, blue::B300));

    let feedback = TokenTree::new()
        .with("success", ColorToken::new(green::G500, green::G400).with_rgb())
        .with("successBg", ColorToken::new(green::G100, green::G700))
        .with("warning", ColorToken::new(amber::A500, amber::A400).with_rgb())
        .with("warningBg", ColorToken::new(amber::A100, amber::A700))
        .with("error", ColorToken::new(red::R500, red::R400).with_rgb())
        .with("errorBg", ColorToken::new(red::R100, red::R700))
        .with("info", ColorToken::new(blue::B500, blue::B300).with_rgb())
        .with("infoBg", ColorToken::new(blue::B50, blue::B800));

    let border = TokenTree::new()
        .with("default", ColorToken::new(gray::G300, gray::G800))
        .with("strong", ColorToken::new(gray::G500, gray::G600))
        .with("focus", ColorToken::new(blue::B500, blue::B400).with_rgb())
        .with("error", ColorToken::new(red::R500, red::R400));

    TokenTree::new()
        .with("action", action)
        .with("surface", surface)
        .with("text", text)
        .with("feedback", feedback)
        .with("border", border)
        .with("shadow", ColorToken::fixed(BLACK).with_rgb())
}

fn border_radius() -> TokenTree {
    TokenTree::new()
        .with("none", TokenLeaf::scalar("0"))
        .with("sm", TokenLeaf::scalar("4px"))
        .with("md", TokenLeaf::responsive("6px", "8px", "8px"))
        .with("lg", TokenLeaf::responsive("10px", "12px", "12px"))
        .with("xl", TokenLeaf::responsive("14px", "16px", "20px"))
        .with("full", TokenLeaf::scalar("9999px"))
}

fn shadows() -> TokenTree {
    TokenTree::new()
        .with("none", TokenLeaf::scalar("none"))
        .with(
            "sm",
            TokenLeaf::scalar("0 1px 2px rgba(var(--quantum-colors-shadowRGB), 0.06)"),
        )
        .with(
            "md",
            TokenLeaf::scalar(
                "0 4px 6px -1px rgba(var(--quantum-colors-shadowRGB), 0.10), 0 2px 4px -2px rgba(var(--quantum-colors-shadowRGB), 0.06)",
            ),
        )
        .with(
            "lg",
            TokenLeaf::scalar(
                "0 10px 15px -3px rgba(var(--quantum-colors-shadowRGB), 0.10), 0 4px 6px -4px rgba(var(--quantum-colors-shadowRGB), 0.08)",
            ),
        )
        .with(
            "focus",
            TokenLeaf::scalar("0 0 0 3px rgba(var(--quantum-colors-border-focusRGB), 0.35)"),
        )
}

fn glassmorphism() -> TokenTree {
    TokenTree::new()
        .with(
            "background",
            ColorToken::new("rgba(255, 255, 255, 0.72)", "rgba(26, 29, 33, 0.64)"),
        )
        .with(
            "border",
            ColorToken::new("rgba(255, 255, 255, 0.48)", "rgba(255, 255, 255, 0.08)"),
        )
        .with("blur", TokenLeaf::responsive("8px", "12px", "16px"))
}

fn animation() -> TokenTree {
    let duration = TokenTree::new()
        .with("fast", TokenLeaf::scalar("150ms"))
        .with("normal", TokenLeaf::scalar("250ms"))
        .with("slow", TokenLeaf::scalar("400ms"));

    let easing = TokenTree::new()
        .with("standard", TokenLeaf::scalar("cubic-bezier(0.4, 0, 0.2, 1)"))
        .with("decelerate", TokenLeaf::scalar("cubic-bezier(0, 0, 0.2, 1)"))
        .with("accelerate", TokenLeaf::scalar("cubic-bezier(0.4, 0, 1, 1)"));

    TokenTree::new()
        .with("duration", duration)
        .with("easing", easing)
}

fn quantum_typography() -> TypographyScale {
    use FontFamilyKey::{Display, Primary};

    TypographyScale::new(FontFamilies::default())
        .with(
            "h1",
            TypographyVariant::new(Display, ["32px", "40px", "48px"], [1.2, 1.2, 1.15], 700)
                .letter_spacing("-0.02em"),
        )
        .with(
            "h2",
            TypographyVariant::new(Display, ["28px", "32px", "36px"], [1.25, 1.25, 1.2], 700)
                .letter_spacing("-0.01em"),
        )
        .with(
            "h3",
            TypographyVariant::new(Display, ["24px", "26px", "28px"], [1.3, 1.3, 1.25], 600),
        )
        .with(
            "h4",
            TypographyVariant::new(Display, ["20px", "22px", "24px"], [1.35, 1.35, 1.3], 600),
        )
        .with(
            "subtitle",
            TypographyVariant::new(Primary, ["16px", "17px", "18px"], [1.5, 1.5, 1.5], 500),
        )
        .with(
            "body1",
            TypographyVariant::new(Primary, ["16px", "16px", "16px"], [1.5, 1.5, 1.5], 400),
        )
        .with(
            "body2",
            TypographyVariant::new(Primary, ["14px", "14px", "14px"], [1.45, 1.45, 1.45], 400),
        )
        .with(
            "caption",
            TypographyVariant::new(Primary, ["12px", "12px", "12px"], [1.4, 1.4, 1.4], 400)
                .letter_spacing("0.01em"),
        )
        .with(
            "button",
            TypographyVariant::new(Primary, ["14px", "15px", "15px"], [1.2, 1.2, 1.2], 600)
                .letter_spacing("0.01em"),
        )
}

fn spacing() -> TokenTree {
    TokenTree::new()
        .with("xxs", TokenLeaf::scalar("2px"))
        .with("xs", TokenLeaf::scalar("4px"))
        .with("sm", TokenLeaf::scalar("8px"))
        .with("md", TokenLeaf::responsive("12px", "16px", "16px"))
        .with("lg", TokenLeaf::responsive("16px", "20px", "24px"))
        .with("xl", TokenLeaf::responsive("24px", "32px", "40px"))
        .with("xxl", TokenLeaf::responsive("32px", "48px", "64px"))
}

fn text_field() -> TokenTree {
    TokenTree::new()
        .with("height", TokenLeaf::responsive("44px", "44px", "48px"))
        .with("paddingX", TokenLeaf::responsive("12px", "14px", "16px"))
        .with("fontSize", TokenLeaf::responsive("16px", "16px", "16px"))
        .with("labelGap", TokenLeaf::scalar("6px"))
        .with("borderWidth", TokenLeaf::scalar("1px"))
        .with("focusRingWidth", TokenLeaf::scalar("3px"))
}
