//! Global visual configuration and the named style presets.
//!
//! [`RcParams`] is the backend's global configuration dictionary. Presets are
//! complete dictionaries written key by key into it; caller overrides win over
//! preset values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use tracing::debug;

use crate::error::{PltxError, Result};

// Default font sizes
pub const FONT_SIZE_SMALL: f64 = 10.0;
pub const FONT_SIZE_MEDIUM: f64 = 12.0;
pub const FONT_SIZE_LARGE: f64 = 13.0;

// Default figure settings
pub const FIGURE_DPI: f64 = 100.0;
pub const FIGURE_FIGSIZE: [f64; 2] = [6.0, 4.0];

// Default line settings
pub const LINE_WIDTH: f64 = 2.0;
pub const MARKER_SIZE: f64 = 6.0;

// Nature journal settings (single column is 89 mm)
pub const NATURE_FONT_SIZE: f64 = 8.0;
pub const NATURE_SMALL_FONT_SIZE: f64 = 7.0;
pub const NATURE_LARGE_FONT_SIZE: f64 = 9.0;
pub const NATURE_FIGURE_WIDTH: f64 = 3.5;
pub const NATURE_FIGURE_WIDTH_DOUBLE: f64 = 7.0;

const SANS_SERIF: [&str; 3] = ["Arial", "Helvetica", "DejaVu Sans"];

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Pair([f64; 2]),
    TextList(Vec<String>),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<[f64; 2]> {
        match self {
            ParamValue::Pair(p) => Some(*p),
            _ => None,
        }
    }

    /// Parse a command-line style value: `true`/`false`, a number,
    /// `a,b` for a pair, anything else as text
    pub fn parse_loose(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(b) = raw.parse::<bool>() {
            return ParamValue::Bool(b);
        }
        if let Ok(n) = raw.parse::<f64>() {
            return ParamValue::Number(n);
        }
        if let Some((a, b)) = raw.split_once(',') {
            if let (Ok(a), Ok(b)) = (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
                return ParamValue::Pair([a, b]);
            }
        }
        ParamValue::Text(raw.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<[f64; 2]> for ParamValue {
    fn from(v: [f64; 2]) -> Self {
        ParamValue::Pair(v)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(v: &[&str]) -> Self {
        ParamValue::TextList(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Global configuration dictionary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RcParams(BTreeMap<String, ParamValue>);

impl RcParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ParamValue::as_f64)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder form of [`RcParams::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Write every entry of `other` into `self`
    pub fn update(&mut self, other: &RcParams) {
        for (key, value) in other.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, ParamValue)> for RcParams {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        RcParams(iter.into_iter().collect())
    }
}

/// Anything owning the global configuration dictionary
pub trait RcTarget {
    fn rc_params(&self) -> &RcParams;
    fn rc_params_mut(&mut self) -> &mut RcParams;
}

impl RcTarget for RcParams {
    fn rc_params(&self) -> &RcParams {
        self
    }

    fn rc_params_mut(&mut self) -> &mut RcParams {
        self
    }
}

/// Default parameters with the given font sizes
pub fn default_rcparams(font_size_medium: f64, font_size_large: f64, use_tex: bool) -> RcParams {
    RcParams::new()
        // Font settings
        .with("font.size", font_size_medium)
        .with("font.family", "sans-serif")
        .with("font.sans-serif", &SANS_SERIF[..])
        .with("axes.titlesize", font_size_large)
        .with("axes.labelsize", font_size_medium)
        .with("xtick.labelsize", font_size_medium)
        .with("ytick.labelsize", font_size_medium)
        .with("legend.fontsize", font_size_medium)
        .with("figure.titlesize", font_size_medium)
        .with("text.usetex", use_tex)
        // Figure settings
        .with("figure.dpi", FIGURE_DPI)
        .with("figure.figsize", FIGURE_FIGSIZE)
        .with("savefig.dpi", 300)
        .with("savefig.bbox", "tight")
        .with("savefig.format", "pdf")
        // Line settings
        .with("lines.linewidth", LINE_WIDTH)
        .with("lines.markersize", MARKER_SIZE)
        // Tick settings
        .with("xtick.direction", "in")
        .with("ytick.direction", "in")
        .with("xtick.major.size", 5)
        .with("ytick.major.size", 5)
        .with("xtick.minor.size", 3)
        .with("ytick.minor.size", 3)
        .with("xtick.top", true)
        .with("ytick.right", true)
        // Grid settings
        .with("grid.alpha", 0.3)
        .with("grid.linestyle", "--")
        // Legend settings
        .with("legend.framealpha", 0.8)
        .with("legend.frameon", true)
        .with("legend.fancybox", false)
        .with("legend.edgecolor", "0.8")
        // Axes settings
        .with("axes.grid", false)
        .with("axes.axisbelow", true)
        .with("axes.linewidth", 1.0)
        .with("axes.edgecolor", "black")
        .with("axes.labelcolor", "black")
        // Image settings
        .with("image.cmap", "viridis")
        .with("image.interpolation", "nearest")
}

/// Nature journal parameters: 7-9 pt sans-serif, single-column width
pub fn nature_rcparams() -> RcParams {
    RcParams::new()
        .with("font.size", NATURE_FONT_SIZE)
        .with("font.family", "sans-serif")
        .with("font.sans-serif", &SANS_SERIF[..])
        .with("axes.titlesize", NATURE_LARGE_FONT_SIZE)
        .with("axes.labelsize", NATURE_FONT_SIZE)
        .with("xtick.labelsize", NATURE_SMALL_FONT_SIZE)
        .with("ytick.labelsize", NATURE_SMALL_FONT_SIZE)
        .with("legend.fontsize", NATURE_SMALL_FONT_SIZE)
        .with("figure.titlesize", NATURE_LARGE_FONT_SIZE)
        .with("text.usetex", false)
        .with("figure.dpi", 150)
        .with(
            "figure.figsize",
            [NATURE_FIGURE_WIDTH, NATURE_FIGURE_WIDTH * 0.75],
        )
        .with("savefig.dpi", 300)
        .with("savefig.bbox", "tight")
        .with("savefig.format", "pdf")
        .with("savefig.transparent", false)
        // Thinner lines for smaller figures
        .with("lines.linewidth", 1.0)
        .with("lines.markersize", 4)
        .with("xtick.direction", "in")
        .with("ytick.direction", "in")
        .with("xtick.major.size", 3)
        .with("ytick.major.size", 3)
        .with("xtick.minor.size", 2)
        .with("ytick.minor.size", 2)
        .with("xtick.major.width", 0.5)
        .with("ytick.major.width", 0.5)
        .with("xtick.top", true)
        .with("ytick.right", true)
        .with("grid.alpha", 0.3)
        .with("grid.linestyle", "--")
        .with("grid.linewidth", 0.5)
        .with("legend.framealpha", 1.0)
        .with("legend.frameon", true)
        .with("legend.fancybox", false)
        .with("legend.edgecolor", "black")
        .with("legend.borderpad", 0.4)
        .with("legend.labelspacing", 0.3)
        .with("axes.grid", false)
        .with("axes.axisbelow", true)
        .with("axes.linewidth", 0.5)
        .with("axes.edgecolor", "black")
        .with("axes.labelcolor", "black")
        .with("axes.labelpad", 2.0)
        .with("image.cmap", "viridis")
        .with("image.interpolation", "nearest")
}

/// Presentation parameters: large fonts, thick lines
pub fn presentation_rcparams() -> RcParams {
    let mut params = default_rcparams(16.0, 18.0, false);
    params.update(
        &RcParams::new()
            .with("figure.figsize", [10.0, 6.0])
            .with("lines.linewidth", 3)
            .with("lines.markersize", 8)
            .with("axes.linewidth", 1.5)
            .with("xtick.major.size", 8)
            .with("ytick.major.size", 8)
            .with("xtick.minor.size", 4)
            .with("ytick.minor.size", 4)
            .with("legend.fontsize", 14),
    );
    params
}

/// Poster parameters: very large fonts and lines
pub fn poster_rcparams() -> RcParams {
    let mut params = default_rcparams(24.0, 28.0, false);
    params.update(
        &RcParams::new()
            .with("figure.figsize", [12.0, 8.0])
            .with("lines.linewidth", 4)
            .with("lines.markersize", 12)
            .with("axes.linewidth", 2.0)
            .with("xtick.major.size", 10)
            .with("ytick.major.size", 10)
            .with("xtick.minor.size", 6)
            .with("ytick.minor.size", 6)
            .with("legend.fontsize", 20),
    );
    params
}

/// Named bundles of global configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    Default,
    Nature,
    Presentation,
    Poster,
}

impl StylePreset {
    pub const ALL: [StylePreset; 4] = [
        StylePreset::Default,
        StylePreset::Nature,
        StylePreset::Presentation,
        StylePreset::Poster,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StylePreset::Default => "default",
            StylePreset::Nature => "nature",
            StylePreset::Presentation => "presentation",
            StylePreset::Poster => "poster",
        }
    }

    /// The complete dictionary for this preset
    pub fn params(&self) -> RcParams {
        match self {
            StylePreset::Default => default_rcparams(FONT_SIZE_MEDIUM, FONT_SIZE_LARGE, false),
            StylePreset::Nature => nature_rcparams(),
            StylePreset::Presentation => presentation_rcparams(),
            StylePreset::Poster => poster_rcparams(),
        }
    }
}

impl FromStr for StylePreset {
    type Err = PltxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(StylePreset::Default),
            "nature" => Ok(StylePreset::Nature),
            "presentation" => Ok(StylePreset::Presentation),
            "poster" => Ok(StylePreset::Poster),
            _ => Err(PltxError::invalid(
                "preset",
                format!(
                    "Unknown preset '{}'. Choose from: 'default', 'nature', 'presentation', 'poster'",
                    s
                ),
            )),
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Write the default parameters (with the given fonts) into `target`
pub fn apply_rcparams<T: RcTarget + ?Sized>(
    target: &mut T,
    font_size_medium: f64,
    font_size_large: f64,
    use_tex: bool,
    overrides: &RcParams,
) {
    let mut params = default_rcparams(font_size_medium, font_size_large, use_tex);
    params.update(overrides);
    target.rc_params_mut().update(&params);
}

/// Write a named preset, merged with `overrides`, into `target`
pub fn apply_style_preset<T: RcTarget + ?Sized>(
    target: &mut T,
    preset: &str,
    overrides: &RcParams,
) -> Result<()> {
    let preset: StylePreset = preset.parse()?;
    let mut params = preset.params();
    params.update(overrides);
    target.rc_params_mut().update(&params);
    debug!(
        preset = preset.name(),
        overrides = overrides.len(),
        "Applied style preset"
    );
    Ok(())
}

/// Scoped style: restores the full configuration snapshot when dropped.
///
/// The guard dereferences to the target, so drawing continues through it.
/// Restoring overwrites the whole dictionary; concurrent mutation of the same
/// target through other paths is not tracked.
pub struct StyleGuard<'a, T: RcTarget + ?Sized> {
    target: &'a mut T,
    snapshot: Option<RcParams>,
}

impl<'a, T: RcTarget + ?Sized> StyleGuard<'a, T> {
    /// Snapshot `target`, then apply `preset` merged with `overrides`
    pub fn new(target: &'a mut T, preset: &str, overrides: &RcParams) -> Result<Self> {
        let preset: StylePreset = preset.parse()?;
        let snapshot = target.rc_params().clone();
        let mut guard = Self {
            target,
            snapshot: Some(snapshot),
        };
        apply_style_preset(&mut *guard.target, preset.name(), overrides)?;
        Ok(guard)
    }
}

impl<T: RcTarget + ?Sized> Deref for StyleGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.target
    }
}

impl<T: RcTarget + ?Sized> DerefMut for StyleGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut *self.target
    }
}

impl<T: RcTarget + ?Sized> Drop for StyleGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.target.rc_params_mut() = snapshot;
            debug!("Restored global style");
        }
    }
}

/// Apply a preset to `target` for the duration of the returned guard
pub fn style_context<'a, T: RcTarget + ?Sized>(
    target: &'a mut T,
    preset: &str,
    overrides: &RcParams,
) -> Result<StyleGuard<'a, T>> {
    StyleGuard::new(target, preset, overrides)
}

/// Run `f` with a preset applied, restoring the configuration afterwards
/// whether `f` succeeds or fails
pub fn with_style<T, R, F>(target: &mut T, preset: &str, overrides: &RcParams, f: F) -> Result<R>
where
    T: RcTarget + ?Sized,
    F: FnOnce(&mut T) -> Result<R>,
{
    let mut guard = StyleGuard::new(target, preset, overrides)?;
    f(&mut *guard)
}
