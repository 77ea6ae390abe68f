//! Breakpoint tiers and responsive values

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Viewport tier
///
/// Mobile is the unprefixed baseline; larger tiers apply from their minimum
/// width upward, mobile-first.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    /// Minimum viewport width in CSS pixels at which this tier applies
    pub const fn min_width(self) -> u32 {
        match self {
            Self::Mobile => 0,
            Self::Tablet => 768,
            Self::Desktop => 1024,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    /// Parse the lowercase tier name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mobile" => Some(Self::Mobile),
            "tablet" => Some(Self::Tablet),
            "desktop" => Some(Self::Desktop),
            _ => None,
        }
    }

    /// All tiers, smallest first
    pub fn all() -> &'static [Breakpoint] {
        const TIERS: [Breakpoint; 3] = [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop];
        &TIERS
    }
}

impl Display for Breakpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value with one entry per breakpoint tier
///
/// Sizes are expected to be non-decreasing from mobile to desktop, but that
/// is an authoring convention; see [`crate::check_tokens`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responsive<T> {
    pub mobile: T,
    pub tablet: T,
    pub desktop: T,
}

impl<T> Responsive<T> {
    pub const fn new(mobile: T, tablet: T, desktop: T) -> Self {
        Self {
            mobile,
            tablet,
            desktop,
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> &T {
        match breakpoint {
            Breakpoint::Mobile => &self.mobile,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Desktop => &self.desktop,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Responsive<U> {
        Responsive {
            mobile: f(&self.mobile),
            tablet: f(&self.tablet),
            desktop: f(&self.desktop),
        }
    }
}

impl<T: Clone> Responsive<T> {
    /// Same value on every tier
    pub fn uniform(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value)
    }
}
