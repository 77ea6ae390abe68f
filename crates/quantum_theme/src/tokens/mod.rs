//! Design tokens for theming
//!
//! Tokens are the authored values the resolver compiles into CSS variables:
//! - Colors (light/dark pairs, optionally with a derived RGB triplet)
//! - Responsive values (mobile/tablet/desktop tiers)
//! - Scalars (durations, weights, shadows)
//! - Typography variants

mod color;
mod responsive;
mod semantic;
mod tree;
mod typography;

pub use color::*;
pub use responsive::*;
pub use semantic::*;
pub use tree::*;
pub use typography::*;
