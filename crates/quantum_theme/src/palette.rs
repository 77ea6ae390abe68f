//! Raw color ramps
//!
//! Literal colors only. Nothing outside the semantic token table should
//! reference these directly; components go through `--quantum-*` variables.

pub const WHITE: &str = "#FFFFFF";
pub const BLACK: &str = "#000000";

/// Brand blue
pub mod blue {
    pub const B50: &str = "#E6F0FA";
    pub const B100: &str = "#CCE0F5";
    pub const B200: &str = "#99C2EB";
    pub const B300: &str = "#66A3E0";
    pub const B400: &str = "#3385D6";
    pub const B500: &str = "#0066CC";
    pub const B600: &str = "#0052A3";
    pub const B700: &str = "#003D7A";
    pub const B800: &str = "#002952";
    pub const B900: &str = "#001429";
}

/// Neutral grays used for surfaces, text and borders
pub mod gray {
    pub const G50: &str = "#F8F9FA";
    pub const G100: &str = "#F1F3F5";
    pub const G200: &str = "#E9ECEF";
    pub const G300: &str = "#DEE2E6";
    pub const G400: &str = "#CED4DA";
    pub const G500: &str = "#ADB5BD";
    pub const G600: &str = "#6C757D";
    pub const G700: &str = "#495057";
    pub const G800: &str = "#343A40";
    pub const G850: &str = "#25292E";
    pub const G900: &str = "#1A1D21";
    pub const G950: &str = "#101214";
}

pub mod green {
    pub const G100: &str = "#D3F9D8";
    pub const G400: &str = "#51CF66";
    pub const G500: &str = "#2F9E44";
    pub const G700: &str = "#1B6E2E";
}

pub mod red {
    pub const R100: &str = "#FFE3E3";
    pub const R400: &str = "#FF6B6B";
    pub const R500: &str = "#E03131";
    pub const R700: &str = "#A61E1E";
}

pub mod amber {
    pub const A100: &str = "#FFF3BF";
    pub const A400: &str = "#FCC419";
    pub const A500: &str = "#F08C00";
    pub const A700: &str = "#A35F00";
}

pub mod violet {
    pub const V100: &str = "#E5DBFF";
    pub const V400: &str = "#9775FA";
    pub const V500: &str = "#7048E8";
    pub const V700: &str = "#4C2FB0";
}
