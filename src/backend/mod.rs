//! The plotting backend seam.
//!
//! pltx never rasterizes anything itself. Every visual primitive is handed to
//! an [`Axes`] implementation, and the global configuration lives with the
//! [`Backend`]. [`recording::RecordingBackend`] is an in-memory implementation
//! that keeps every draw call for inspection.

pub mod recording;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::{PltxError, Result};
use crate::rcparams::RcTarget;

pub use recording::{Artist, ArtistKind, RecordingAxes, RecordingBackend};

/// Handle to a drawn artist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistId(pub usize);

/// Line dash pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl FromStr for LineStyle {
    type Err = PltxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            _ => Err(PltxError::invalid(
                "linestyle",
                format!("Unknown line style: {}", s),
            )),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::DashDot => "-.",
            LineStyle::Dotted => ":",
        })
    }
}

/// Marker shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Marker {
    Point,
    #[default]
    Circle,
    Square,
    Triangle,
    Diamond,
    Plus,
    Cross,
    Star,
}

impl FromStr for Marker {
    type Err = PltxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "." => Ok(Marker::Point),
            "o" => Ok(Marker::Circle),
            "s" => Ok(Marker::Square),
            "^" => Ok(Marker::Triangle),
            "D" => Ok(Marker::Diamond),
            "+" => Ok(Marker::Plus),
            "x" => Ok(Marker::Cross),
            "*" => Ok(Marker::Star),
            _ => Err(PltxError::invalid("marker", format!("Unknown marker: {}", s))),
        }
    }
}

/// Axis scale, validated by the backend when set by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scale {
    #[default]
    Linear,
    Log,
    Symlog,
    Logit,
}

impl FromStr for Scale {
    type Err = PltxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Scale::Linear),
            "log" => Ok(Scale::Log),
            "symlog" => Ok(Scale::Symlog),
            "logit" => Ok(Scale::Logit),
            _ => Err(PltxError::backend(format!(
                "'{}' is not a valid value for scale; supported values are 'linear', 'log', 'symlog', 'logit'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickWhich {
    #[default]
    Major,
    Minor,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickDirection {
    In,
    Out,
    InOut,
}

/// Tick appearance; `axis: None` addresses both axes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickParams {
    pub axis: Option<Axis>,
    pub which: TickWhich,
    pub direction: Option<TickDirection>,
    pub top: Option<bool>,
    pub right: Option<bool>,
}

/// Tick placement strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Locator {
    /// Ticks at every multiple of the step
    Multiple(f64),
    /// Decade ticks; `subs_auto` adds the intermediate minor ticks
    Log { numticks: usize, subs_auto: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    pub visible: bool,
    pub alpha: f64,
    pub linestyle: LineStyle,
    pub linewidth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub loc: String,
    pub frameon: bool,
    pub framealpha: f64,
    pub ncol: usize,
    pub fontsize: Option<f64>,
    pub title: Option<String>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            loc: "best".to_string(),
            frameon: true,
            framealpha: 0.8,
            ncol: 1,
            fontsize: None,
            title: None,
        }
    }
}

/// A polyline draw
#[derive(Debug, Clone, PartialEq)]
pub struct LineRequest<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub label: Option<&'a str>,
    pub color: Option<Color>,
    pub linestyle: LineStyle,
    pub linewidth: f64,
    pub marker: Option<Marker>,
    pub markersize: Option<f64>,
    pub alpha: Option<f64>,
    /// Stacking order; `None` leaves the backend default
    pub zorder: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterRequest<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub label: Option<&'a str>,
    pub color: Option<Color>,
    pub size: f64,
    pub marker: Marker,
    pub alpha: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarRequest<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub yerr: Option<&'a [f64]>,
    pub xerr: Option<&'a [f64]>,
    pub label: Option<&'a str>,
    pub color: Option<Color>,
    pub linewidth: f64,
    pub capsize: f64,
    pub fmt: &'a str,
}

/// Bar positions, numeric or categorical
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarPositions<'a> {
    Numeric(&'a [f64]),
    Categories(&'a [&'a str]),
}

impl BarPositions<'_> {
    pub fn len(&self) -> usize {
        match self {
            BarPositions::Numeric(x) => x.len(),
            BarPositions::Categories(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRequest<'a> {
    pub x: BarPositions<'a>,
    pub height: &'a [f64],
    pub label: Option<&'a str>,
    pub color: Option<Color>,
    pub edgecolor: Color,
    pub linewidth: f64,
}

/// Histogram binning
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Bins<'a> {
    /// Backend default bin count
    #[default]
    Auto,
    Count(usize),
    Edges(&'a [f64]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistRequest<'a> {
    pub data: &'a [f64],
    pub bins: Bins<'a>,
    pub label: Option<&'a str>,
    pub color: Option<Color>,
    pub edgecolor: Color,
    pub alpha: f64,
}

/// Result of a histogram draw
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub counts: Vec<f64>,
    pub edges: Vec<f64>,
    pub patches: Vec<ArtistId>,
}

/// Style of a full-width or full-height reference line
#[derive(Debug, Clone, PartialEq)]
pub struct RefLineStyle {
    pub color: Color,
    pub linestyle: LineStyle,
    pub linewidth: f64,
    pub alpha: f64,
    pub label: Option<String>,
}

/// Style of a shaded band
#[derive(Debug, Clone, PartialEq)]
pub struct SpanStyle {
    pub color: Color,
    pub alpha: f64,
    pub label: Option<String>,
}

/// A drawing surface with its own scales, labels and ticks
pub trait Axes {
    fn plot(&mut self, line: &LineRequest<'_>) -> Result<ArtistId>;
    fn scatter(&mut self, scatter: &ScatterRequest<'_>) -> Result<ArtistId>;
    fn errorbar(&mut self, errorbar: &ErrorBarRequest<'_>) -> Result<ArtistId>;
    fn bar(&mut self, bar: &BarRequest<'_>) -> Result<Vec<ArtistId>>;
    fn hist(&mut self, hist: &HistRequest<'_>) -> Result<Histogram>;

    fn axhline(&mut self, y: f64, style: &RefLineStyle) -> Result<ArtistId>;
    fn axvline(&mut self, x: f64, style: &RefLineStyle) -> Result<ArtistId>;
    fn axhspan(&mut self, ymin: f64, ymax: f64, style: &SpanStyle) -> Result<ArtistId>;
    fn axvspan(&mut self, xmin: f64, xmax: f64, style: &SpanStyle) -> Result<ArtistId>;

    /// Set the x scale by name; unknown names are rejected
    fn set_xscale(&mut self, scale: &str) -> Result<()>;
    /// Set the y scale by name; unknown names are rejected
    fn set_yscale(&mut self, scale: &str) -> Result<()>;
    fn set_xlim(&mut self, limits: (f64, f64)) -> Result<()>;
    fn set_ylim(&mut self, limits: (f64, f64)) -> Result<()>;
    fn set_xlabel(&mut self, label: &str);
    fn set_ylabel(&mut self, label: &str);
    fn set_title(&mut self, title: &str);

    fn tick_params(&mut self, params: &TickParams);
    fn set_major_locator(&mut self, axis: Axis, locator: Locator);
    fn set_minor_locator(&mut self, axis: Axis, locator: Locator);
    fn grid(&mut self, style: &GridStyle);
    fn legend(&mut self, options: &LegendOptions) -> Result<ArtistId>;
}

/// A plotting backend: global configuration plus a current axes
pub trait Backend: RcTarget {
    type Axes: Axes;

    /// The current active axes
    fn gca(&mut self) -> &mut Self::Axes;
}
