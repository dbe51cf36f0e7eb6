//! Named color schemes that palettes are sampled from.
//!
//! Sequential and diverging schemes are continua; qualitative schemes are
//! fixed swatch lists. `husl` spaces hues evenly around the color circle.

pub mod diverging;
pub mod husl;
pub mod qualitative;
pub mod scheme;
pub mod sequential;

pub use scheme::{
    get_scheme, resolve_scheme, AnchorScheme, ColorScheme, PresetScheme, QualitativeScheme,
    Reversed, SchemeKind, FALLBACK_SCHEME,
};

/// Sequential palettes suited to ordered data
pub const SEQUENTIAL_PALETTES: &[&str] = &["plasma_r", "viridis", "mako_r", "rocket_r", "crest"];

/// Diverging palettes suited to data around a midpoint
pub const DIVERGING_PALETTES: &[&str] = &["coolwarm", "RdBu_r", "vlag", "icefire"];

/// Categorical palettes suited to unordered groups
pub const CATEGORICAL_PALETTES: &[&str] = &["tab10", "Set2", "husl", "Paired", "okabe_ito"];

/// Every base scheme name the catalog resolves (each also accepts `_r`)
pub fn available_schemes() -> &'static [&'static str] {
    &[
        "viridis", "plasma", "magma", "inferno", "cividis", "turbo", "mako", "rocket", "crest",
        "coolwarm", "rdbu", "seismic", "spectral", "vlag", "icefire", "tab10", "set2", "husl",
        "paired", "okabe_ito",
    ]
}
