//! Fixed-size color palettes sampled from named schemes.
//!
//! A [`Palette`] never changes piecemeal: reconfiguring it resamples the whole
//! color list. Indexed access is checked ([`Palette::get`]); wrapping access is
//! a separate, explicit operation ([`Palette::cycle`]).

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::color::{Rgb, Rgba};
use crate::error::{PltxError, Result};
use crate::logging::log_timed_operation;
use crate::schemes::resolve_scheme;

/// Default scheme for new palettes
pub const DEFAULT_PALETTE: &str = "plasma_r";

/// Default number of colors
pub const DEFAULT_SIZE: usize = 10;

/// An ordered, fixed-size list of colors sampled from a named scheme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    scheme: String,
    size: usize,
    colors: Vec<Rgb>,
}

impl Palette {
    /// Sample `size` colors from `scheme`.
    ///
    /// Unknown scheme names fall back to the catalog's fallback scheme; the
    /// requested name is still reported by [`Palette::scheme`].
    pub fn new(scheme: &str, size: usize) -> Result<Self> {
        let colors = sample(scheme, size)?;
        Ok(Self {
            scheme: scheme.to_string(),
            size,
            colors,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rgb> {
        self.colors.iter()
    }

    /// Color at `index`, failing with `OutOfRange` outside `[0, len)`
    pub fn get(&self, index: usize) -> Result<Rgb> {
        self.colors
            .get(index)
            .copied()
            .ok_or(PltxError::OutOfRange {
                index,
                len: self.colors.len(),
            })
    }

    /// Colors at each of `indices`; the first bad index fails the whole call
    pub fn get_many(&self, indices: &[usize]) -> Result<Vec<Rgb>> {
        indices.iter().map(|&i| self.get(i)).collect()
    }

    /// Color at `index mod len`
    pub fn cycle(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    /// Blend towards white: `1.0` keeps the color, `0.0` yields white.
    /// The factor is clamped to `[0, 1]`.
    pub fn adjust_intensity(color: Rgb, intensity: f64) -> Rgb {
        let k = intensity.clamp(0.0, 1.0);
        let blend = |c: f64| c * k + (1.0 - k);
        Rgb::new(blend(color.r), blend(color.g), blend(color.b))
    }

    /// Attach an alpha channel, clamped to `[0, 1]`
    pub fn adjust_alpha(color: Rgb, alpha: f64) -> Rgba {
        color.with_alpha(alpha.clamp(0.0, 1.0))
    }

    /// `steps` colors evenly spaced from `from` to `to`, both included
    pub fn gradient(from: Rgb, to: Rgb, steps: usize) -> Result<Vec<Rgb>> {
        if steps < 2 {
            return Err(PltxError::invalid(
                "steps",
                format!("Gradient needs at least 2 steps, got {}", steps),
            ));
        }

        let last = (steps - 1) as f64;
        Ok((0..steps)
            .map(|i| from.lerp(&to, i as f64 / last))
            .collect())
    }

    /// Replace the palette contents, keeping the current size when `size` is `None`
    pub fn set_scheme(&mut self, scheme: &str, size: Option<usize>) -> Result<()> {
        let size = size.unwrap_or(self.size);
        self.colors = sample(scheme, size)?;
        self.scheme = scheme.to_string();
        self.size = size;
        Ok(())
    }
}

fn sample(scheme: &str, size: usize) -> Result<Vec<Rgb>> {
    if size == 0 {
        return Err(PltxError::invalid("size", "Palette size must be at least 1"));
    }

    let source = resolve_scheme(scheme);
    let colors = log_timed_operation("sample_palette", || source.sample(size));
    debug!(
        scheme = scheme,
        resolved = source.name(),
        size = size,
        "Sampled palette"
    );
    Ok(colors)
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_PALETTE.to_string(),
            size: DEFAULT_SIZE,
            colors: resolve_scheme(DEFAULT_PALETTE).sample(DEFAULT_SIZE),
        }
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Rgb;
    type IntoIter = std::slice::Iter<'a, Rgb>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Palette('{}', size={})", self.scheme, self.size)
    }
}

static DEFAULT: Lazy<RwLock<Palette>> = Lazy::new(|| RwLock::new(Palette::default()));

/// A copy of the process-wide default palette
pub fn default_palette() -> Palette {
    DEFAULT.read().clone()
}

/// Replace the process-wide default palette
pub fn set_default_palette(scheme: &str, size: usize) -> Result<()> {
    let palette = Palette::new(scheme, size)?;
    *DEFAULT.write() = palette;
    Ok(())
}

/// Color at `index` in the default palette
pub fn get_color(index: usize) -> Result<Rgb> {
    DEFAULT.read().get(index)
}

/// Color at `index` in the default palette, wrapping past the end
pub fn cycle_color(index: usize) -> Rgb {
    DEFAULT.read().cycle(index)
}
