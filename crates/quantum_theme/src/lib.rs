//! Quantum Theme System
//!
//! Semantic design tokens for Quantum UI, compiled into CSS custom properties,
//! plus the small runtime that tracks the active light/dark scheme.
//!
//! # Overview
//!
//! - **Palette**: raw color ramps ([`palette`])
//! - **Semantic tokens**: named design concepts, parametric over color scheme
//!   and breakpoint ([`SemanticTokens`], [`TokenTree`])
//! - **Resolver**: flattens the token tree into `--quantum-*` variable maps
//!   ([`resolve_all`])
//! - **Stylesheet**: renders the maps into attribute-scoped CSS with
//!   mobile-first media queries ([`render_stylesheet`])
//! - **Theme builder**: a framework theme descriptor that references the CSS
//!   variables instead of literal values ([`ThemeBuilder`])
//! - **Runtime**: scheme state with persistence, root attribute sync and
//!   change subscriptions ([`ThemeState`], [`ThemeProvider`])
//!
//! # Quick Start
//!
//! ```rust
//! use quantum_theme::{resolve_all, render_stylesheet, SemanticTokens, StylesheetOptions};
//!
//! let tokens = SemanticTokens::quantum();
//! let vars = resolve_all(&tokens.tree);
//! let css = render_stylesheet(&vars, &StylesheetOptions::default());
//! assert!(css.contains("--quantum-colors-action-primary"));
//! ```
//!
//! # Runtime
//!
//! ```rust
//! use quantum_theme::{ColorScheme, MemoryAttribute, MemoryStore, ThemeProvider, ThemeState, use_theme};
//!
//! let state = ThemeState::new(MemoryStore::new(), MemoryAttribute::new());
//! let _provider = ThemeProvider::mount(state);
//!
//! let theme = use_theme().unwrap();
//! theme.toggle();
//! assert_eq!(theme.scheme(), ColorScheme::Dark);
//! ```

pub mod check;
pub mod css;
pub mod error;
pub mod palette;
pub mod provider;
pub mod resolve;
pub mod state;
pub mod storage;
pub mod theme;
pub mod tokens;

// Re-export commonly used types
pub use check::{check_tokens, Diagnostic, Severity};
pub use css::{
    init_script, render_stylesheet, InitScriptOptions, StylesheetOptions, DEFAULT_THEME_ATTRIBUTE,
};
pub use error::{Result, StorageError, ThemeError, TokenLoadError};
pub use provider::{use_theme, ThemeProvider};
pub use resolve::{
    hex_to_rgb_triplet, parse_hex_rgb, resolve, resolve_all, resolve_scheme, variable_name,
    ResolvedVariables, SchemeVariables, VariableMap, CSS_PREFIX, RGB_FALLBACK, RGB_SUFFIX,
};
pub use state::{Subscription, ThemeRuntimeState, ThemeState, DEFAULT_STORAGE_KEY};
pub use storage::{FileStore, MemoryAttribute, MemoryStore, PreferenceStore, RootAttribute};
pub use theme::{
    build_theme, css_var, ColorScheme, ComponentOverrides, StyleRule, ThemeBuilder, ThemeDescriptor,
};
pub use tokens::*;
