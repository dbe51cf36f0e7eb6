//! Color scheme trait and lookup.
//!
//! A scheme is either a continuum sampled by position or a fixed list of
//! discrete swatches. Names are matched case-insensitively; a trailing `_r`
//! selects the reversed scheme.

use crate::color::Rgb;
use crate::error::{PltxError, Result};
use tracing::debug;

/// Scheme used when a palette asks for a name the catalog does not know
pub const FALLBACK_SCHEME: &str = "viridis";

/// How a scheme produces colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeKind {
    /// Sampled evenly across a color continuum
    Continuous,
    /// Fixed swatches handed out in order, repeating past the end
    Qualitative,
}

/// Trait for color scheme implementations
pub trait ColorScheme {
    /// Get the name of this scheme
    fn name(&self) -> &str;

    fn kind(&self) -> SchemeKind {
        SchemeKind::Continuous
    }

    /// Map a normalized position (0.0 to 1.0) to a color
    fn at(&self, t: f64) -> Rgb;

    /// Discrete swatches, for qualitative schemes
    fn swatches(&self) -> Option<&[Rgb]> {
        None
    }

    /// Produce `n` colors.
    ///
    /// Continuous schemes take `n` evenly spaced samples including both ends
    /// (a single sample is the start of the scheme). Qualitative schemes cycle
    /// through their swatches.
    fn sample(&self, n: usize) -> Vec<Rgb> {
        match self.swatches() {
            Some(swatches) if !swatches.is_empty() => {
                swatches.iter().cycle().take(n).copied().collect()
            }
            _ => linspace(n).map(|t| self.at(t)).collect(),
        }
    }
}

/// `n` evenly spaced positions over `[0, 1]`
pub(crate) fn linspace(n: usize) -> impl Iterator<Item = f64> {
    let denom = n.saturating_sub(1).max(1) as f64;
    (0..n).map(move |i| i as f64 / denom)
}

/// A scheme read back to front
pub struct Reversed {
    inner: Box<dyn ColorScheme>,
    name: String,
    swatches: Option<Vec<Rgb>>,
}

impl Reversed {
    pub fn new(inner: Box<dyn ColorScheme>) -> Self {
        let name = format!("{}_r", inner.name());
        let swatches = inner
            .swatches()
            .map(|s| s.iter().rev().copied().collect::<Vec<_>>());
        Self {
            inner,
            name,
            swatches,
        }
    }
}

impl ColorScheme for Reversed {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SchemeKind {
        self.inner.kind()
    }

    fn at(&self, t: f64) -> Rgb {
        self.inner.at(1.0 - t.clamp(0.0, 1.0))
    }

    fn swatches(&self) -> Option<&[Rgb]> {
        self.swatches.as_deref()
    }

    fn sample(&self, n: usize) -> Vec<Rgb> {
        match self.swatches() {
            Some(swatches) if !swatches.is_empty() => {
                swatches.iter().cycle().take(n).copied().collect()
            }
            _ => {
                let mut colors = self.inner.sample(n);
                colors.reverse();
                colors
            }
        }
    }
}

/// Piecewise-linear scheme through a table of 8-bit anchor colors
pub struct AnchorScheme {
    name: &'static str,
    anchors: &'static [[u8; 3]],
}

impl AnchorScheme {
    pub const fn new(name: &'static str, anchors: &'static [[u8; 3]]) -> Self {
        Self { name, anchors }
    }
}

impl ColorScheme for AnchorScheme {
    fn name(&self) -> &str {
        self.name
    }

    fn at(&self, t: f64) -> Rgb {
        let colors = self.anchors;
        if colors.is_empty() {
            return Rgb::BLACK;
        }

        let position = t.clamp(0.0, 1.0) * (colors.len() - 1) as f64;
        let index = position.floor() as usize;

        if index >= colors.len() - 1 {
            return Rgb::from_u8(colors[colors.len() - 1]);
        }

        let frac = position - index as f64;
        Rgb::from_u8(colors[index]).lerp(&Rgb::from_u8(colors[index + 1]), frac)
    }
}

/// Scheme backed by one of the `colorgrad` preset gradients
pub struct PresetScheme {
    name: &'static str,
    build: fn() -> colorgrad::Gradient,
}

impl PresetScheme {
    pub const fn new(name: &'static str, build: fn() -> colorgrad::Gradient) -> Self {
        Self { name, build }
    }
}

impl ColorScheme for PresetScheme {
    fn name(&self) -> &str {
        self.name
    }

    fn at(&self, t: f64) -> Rgb {
        (self.build)().at(t.clamp(0.0, 1.0)).into()
    }

    fn sample(&self, n: usize) -> Vec<Rgb> {
        let gradient = (self.build)();
        linspace(n).map(|t| gradient.at(t).into()).collect()
    }
}

/// Qualitative scheme with fixed swatches
pub struct QualitativeScheme {
    name: &'static str,
    colors: Vec<Rgb>,
}

impl QualitativeScheme {
    pub fn new(name: &'static str, table: &[[u8; 3]]) -> Self {
        Self {
            name,
            colors: table.iter().copied().map(Rgb::from_u8).collect(),
        }
    }
}

impl ColorScheme for QualitativeScheme {
    fn name(&self) -> &str {
        self.name
    }

    fn kind(&self) -> SchemeKind {
        SchemeKind::Qualitative
    }

    fn at(&self, t: f64) -> Rgb {
        if self.colors.is_empty() {
            return Rgb::BLACK;
        }
        let index = (t.clamp(0.0, 1.0) * (self.colors.len() - 1) as f64).round() as usize;
        self.colors[index]
    }

    fn swatches(&self) -> Option<&[Rgb]> {
        Some(&self.colors)
    }
}

fn lookup(base: &str) -> Option<Box<dyn ColorScheme>> {
    use super::{diverging, husl, qualitative, sequential};

    let scheme: Box<dyn ColorScheme> = match base {
        "viridis" => Box::new(sequential::viridis()),
        "plasma" => Box::new(sequential::plasma()),
        "magma" => Box::new(sequential::magma()),
        "inferno" => Box::new(sequential::inferno()),
        "cividis" => Box::new(sequential::cividis()),
        "turbo" => Box::new(sequential::turbo()),
        "mako" => Box::new(sequential::mako()),
        "rocket" => Box::new(sequential::rocket()),
        "crest" => Box::new(sequential::crest()),
        "coolwarm" => Box::new(diverging::coolwarm()),
        "rdbu" => Box::new(diverging::rdbu()),
        "seismic" => Box::new(diverging::seismic()),
        "spectral" => Box::new(diverging::spectral()),
        "vlag" => Box::new(diverging::vlag()),
        "icefire" => Box::new(diverging::icefire()),
        "tab10" => Box::new(qualitative::tab10()),
        "set2" => Box::new(qualitative::set2()),
        "husl" => Box::new(husl::husl()),
        "paired" => Box::new(qualitative::paired()),
        "okabe_ito" => Box::new(qualitative::okabe_ito()),
        _ => return None,
    };
    Some(scheme)
}

/// Get a scheme by name
pub fn get_scheme(name: &str) -> Result<Box<dyn ColorScheme>> {
    let lowered = name.to_lowercase();

    if let Some(scheme) = lookup(&lowered) {
        return Ok(scheme);
    }

    if let Some(base) = lowered.strip_suffix("_r") {
        if let Some(scheme) = lookup(base) {
            return Ok(Box::new(Reversed::new(scheme)));
        }
    }

    Err(PltxError::invalid(
        "scheme",
        format!("Unknown color scheme: {}", name),
    ))
}

/// Get a scheme by name, substituting the fallback scheme for unknown names
pub fn resolve_scheme(name: &str) -> Box<dyn ColorScheme> {
    match get_scheme(name) {
        Ok(scheme) => scheme,
        Err(_) => {
            debug!(
                requested = name,
                fallback = FALLBACK_SCHEME,
                "Unknown color scheme, using fallback"
            );
            Box::new(super::sequential::viridis())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_includes_endpoints() {
        let t: Vec<f64> = linspace(5).collect();
        assert_eq!(t, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(1).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(linspace(0).count(), 0);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(get_scheme("RdBu").unwrap().name(), "rdbu");
        assert_eq!(get_scheme("RdBu_r").unwrap().name(), "rdbu_r");
        assert_eq!(get_scheme("Set2").unwrap().name(), "set2");
    }

    #[test]
    fn test_unknown_scheme() {
        assert!(get_scheme("not_a_scheme").is_err());
        assert_eq!(resolve_scheme("not_a_scheme").name(), FALLBACK_SCHEME);
    }

    #[test]
    fn test_husl_is_not_the_fallback() {
        let husl = resolve_scheme("husl");
        assert_eq!(husl.name(), "husl");
        assert_ne!(husl.sample(4), resolve_scheme(FALLBACK_SCHEME).sample(4));
        assert_eq!(resolve_scheme("HUSL_r").name(), "husl_r");
    }

    #[test]
    fn test_anchor_scheme_endpoints() {
        static TABLE: [[u8; 3]; 2] = [[0, 0, 0], [255, 255, 255]];
        let scheme = AnchorScheme::new("bw", &TABLE);
        assert_eq!(scheme.at(0.0), Rgb::BLACK);
        assert_eq!(scheme.at(1.0), Rgb::WHITE);
        assert_eq!(scheme.at(0.5), Rgb::new(0.5, 0.5, 0.5));
        // out of range positions clamp
        assert_eq!(scheme.at(2.0), Rgb::WHITE);
    }

    #[test]
    fn test_reversed_continuous() {
        let forward = get_scheme("seismic").unwrap().sample(4);
        let mut reversed = get_scheme("seismic_r").unwrap().sample(4);
        reversed.reverse();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_reversed_qualitative_cycles_reversed_swatches() {
        let forward = get_scheme("tab10").unwrap();
        let reversed = get_scheme("tab10_r").unwrap();
        let swatches = forward.swatches().unwrap();
        let sampled = reversed.sample(11);
        assert_eq!(sampled[0], swatches[9]);
        assert_eq!(sampled[9], swatches[0]);
        assert_eq!(sampled[10], swatches[9]);
    }
}
