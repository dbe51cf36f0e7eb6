//! In-memory backend that records every primitive.
//!
//! Useful headless, and the reference for what pltx asks of a backend. Its
//! validation follows the usual plotting-library rules: x and y must have the
//! same length, scale names must be known, histogram bins must be sensible.

use serde::Serialize;
use tracing::trace;

use super::{
    ArtistId, Axes, Axis, Backend, BarRequest, Bins, ErrorBarRequest, GridStyle, HistRequest,
    Histogram, LegendOptions, LineRequest, LineStyle, Locator, Marker, RefLineStyle, Scale,
    ScatterRequest, SpanStyle, TickParams,
};
use crate::color::Color;
use crate::error::{PltxError, Result};
use crate::rcparams::{RcParams, RcTarget};

/// Bin count used for `Bins::Auto`
pub const DEFAULT_HIST_BINS: usize = 10;

// Default stacking orders
const ZORDER_PATCH: f64 = 1.0;
const ZORDER_LINE: f64 = 2.0;
const ZORDER_LEGEND: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArtistKind {
    Line,
    Scatter,
    ErrorBar,
    BarPatch,
    HistPatch,
    HLine,
    VLine,
    HSpan,
    VSpan,
    Legend,
}

/// A recorded primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artist {
    pub kind: ArtistKind,
    pub label: Option<String>,
    pub color: Option<Color>,
    pub linestyle: Option<LineStyle>,
    pub linewidth: Option<f64>,
    pub marker: Option<Marker>,
    pub markersize: Option<f64>,
    pub alpha: Option<f64>,
    pub zorder: f64,
    /// Number of data points carried by the artist
    pub points: usize,
    /// Position (lines) or extent (spans, bars, bins)
    pub extent: Option<(f64, f64)>,
}

impl Artist {
    fn new(kind: ArtistKind, zorder: f64) -> Self {
        Self {
            kind,
            label: None,
            color: None,
            linestyle: None,
            linewidth: None,
            marker: None,
            markersize: None,
            alpha: None,
            zorder,
            points: 0,
            extent: None,
        }
    }

    /// Labels starting with `_` are hidden from legends
    pub fn legend_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.starts_with('_'))
    }
}

/// Recorded state of one axes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordingAxes {
    artists: Vec<Artist>,
    pub xscale: Scale,
    pub yscale: Scale,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub title: Option<String>,
    /// Every `tick_params` call, in order
    pub tick_params: Vec<TickParams>,
    pub x_major_locator: Option<Locator>,
    pub y_major_locator: Option<Locator>,
    pub x_minor_locator: Option<Locator>,
    pub y_minor_locator: Option<Locator>,
    pub grid: Option<GridStyle>,
    pub legend: Option<LegendOptions>,
    /// Labels shown by the most recent legend
    pub legend_entries: Vec<String>,
}

impl RecordingAxes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn artist(&self, id: ArtistId) -> Option<&Artist> {
        self.artists.get(id.0)
    }

    pub fn by_kind(&self, kind: ArtistKind) -> impl Iterator<Item = &Artist> {
        self.artists.iter().filter(move |a| a.kind == kind)
    }

    /// Polylines, including reference lines
    pub fn lines(&self) -> Vec<&Artist> {
        self.artists
            .iter()
            .filter(|a| {
                matches!(
                    a.kind,
                    ArtistKind::Line | ArtistKind::HLine | ArtistKind::VLine
                )
            })
            .collect()
    }

    /// Filled shapes: bars, histogram bins and spans
    pub fn patches(&self) -> Vec<&Artist> {
        self.artists
            .iter()
            .filter(|a| {
                matches!(
                    a.kind,
                    ArtistKind::BarPatch
                        | ArtistKind::HistPatch
                        | ArtistKind::HSpan
                        | ArtistKind::VSpan
                )
            })
            .collect()
    }

    /// Whether grid lines are shown
    pub fn grid_visible(&self) -> bool {
        self.grid.as_ref().is_some_and(|g| g.visible)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn push(&mut self, artist: Artist) -> ArtistId {
        trace!(kind = ?artist.kind, zorder = artist.zorder, "Recorded artist");
        self.artists.push(artist);
        ArtistId(self.artists.len() - 1)
    }
}

fn check_same_len(what: &str, x: usize, y: usize) -> Result<()> {
    if x != y {
        return Err(PltxError::backend(format!(
            "{}: x and y must have same first dimension, but have shapes ({},) and ({},)",
            what, x, y
        )));
    }
    Ok(())
}

fn check_limits(limits: (f64, f64)) -> Result<()> {
    if !limits.0.is_finite() || !limits.1.is_finite() {
        return Err(PltxError::backend(format!(
            "Axis limits cannot be NaN or Inf: {:?}",
            limits
        )));
    }
    Ok(())
}

fn data_range(data: &[f64]) -> (f64, f64) {
    let finite = data.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn bin_edges(data: &[f64], bins: Bins<'_>) -> Result<Vec<f64>> {
    let count = match bins {
        Bins::Edges(edges) => {
            if edges.len() < 2 {
                return Err(PltxError::backend("bins must contain at least two edges"));
            }
            if edges.windows(2).any(|w| w[1] <= w[0]) {
                return Err(PltxError::backend(
                    "bins must increase monotonically",
                ));
            }
            return Ok(edges.to_vec());
        }
        Bins::Count(0) => {
            return Err(PltxError::backend("bins must be a positive integer"));
        }
        Bins::Count(n) => n,
        Bins::Auto => DEFAULT_HIST_BINS,
    };

    let (lo, hi) = data_range(data);
    let width = (hi - lo) / count as f64;
    let mut edges: Vec<f64> = (0..=count).map(|i| lo + width * i as f64).collect();
    // Pin the last edge so the maximum always lands in the final bin
    edges[count] = hi;
    Ok(edges)
}

fn bin_counts(data: &[f64], edges: &[f64]) -> Vec<f64> {
    let mut counts = vec![0.0; edges.len() - 1];
    let last = edges.len() - 1;
    for &v in data.iter().filter(|v| v.is_finite()) {
        if v < edges[0] || v > edges[last] {
            continue;
        }
        // Last bin is closed on the right
        let bin = match edges.partition_point(|&e| e <= v) {
            0 => 0,
            i if i > last => last - 1,
            i => i - 1,
        };
        counts[bin] += 1.0;
    }
    counts
}

impl Axes for RecordingAxes {
    fn plot(&mut self, line: &LineRequest<'_>) -> Result<ArtistId> {
        check_same_len("plot", line.x.len(), line.y.len())?;

        let mut artist = Artist::new(ArtistKind::Line, line.zorder.unwrap_or(ZORDER_LINE));
        artist.label = line.label.map(str::to_string);
        artist.color = line.color.clone();
        artist.linestyle = Some(line.linestyle);
        artist.linewidth = Some(line.linewidth);
        artist.marker = line.marker;
        artist.markersize = line.markersize;
        artist.alpha = line.alpha;
        artist.points = line.x.len();
        Ok(self.push(artist))
    }

    fn scatter(&mut self, scatter: &ScatterRequest<'_>) -> Result<ArtistId> {
        check_same_len("scatter", scatter.x.len(), scatter.y.len())?;

        let mut artist = Artist::new(ArtistKind::Scatter, ZORDER_PATCH);
        artist.label = scatter.label.map(str::to_string);
        artist.color = scatter.color.clone();
        artist.marker = Some(scatter.marker);
        artist.markersize = Some(scatter.size);
        artist.alpha = scatter.alpha;
        artist.points = scatter.x.len();
        Ok(self.push(artist))
    }

    fn errorbar(&mut self, errorbar: &ErrorBarRequest<'_>) -> Result<ArtistId> {
        let n = errorbar.x.len();
        check_same_len("errorbar", n, errorbar.y.len())?;
        for (name, err) in [("yerr", errorbar.yerr), ("xerr", errorbar.xerr)] {
            if let Some(err) = err {
                if err.len() != n {
                    return Err(PltxError::backend(format!(
                        "errorbar: {} must have the same length as the data ({} != {})",
                        name,
                        err.len(),
                        n
                    )));
                }
                if err.iter().any(|e| *e < 0.0) {
                    return Err(PltxError::backend(format!(
                        "errorbar: {} must not contain negative values",
                        name
                    )));
                }
            }
        }

        let mut artist = Artist::new(ArtistKind::ErrorBar, ZORDER_LINE);
        artist.label = errorbar.label.map(str::to_string);
        artist.color = errorbar.color.clone();
        artist.linewidth = Some(errorbar.linewidth);
        artist.marker = errorbar.fmt.parse::<Marker>().ok();
        artist.points = n;
        Ok(self.push(artist))
    }

    fn bar(&mut self, bar: &BarRequest<'_>) -> Result<Vec<ArtistId>> {
        check_same_len("bar", bar.x.len(), bar.height.len())?;

        // Only the first patch carries the label into the legend
        let ids: Vec<ArtistId> = bar
            .height
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                let mut artist = Artist::new(ArtistKind::BarPatch, ZORDER_PATCH);
                artist.label = if i == 0 {
                    bar.label.map(str::to_string)
                } else {
                    Some("_nolegend_".to_string())
                };
                artist.color = bar.color.clone();
                artist.linewidth = Some(bar.linewidth);
                artist.extent = Some((0.0, h));
                self.push(artist)
            })
            .collect();
        Ok(ids)
    }

    fn hist(&mut self, hist: &HistRequest<'_>) -> Result<Histogram> {
        let edges = bin_edges(hist.data, hist.bins)?;
        let counts = bin_counts(hist.data, &edges);

        let patches: Vec<ArtistId> = edges
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let mut artist = Artist::new(ArtistKind::HistPatch, ZORDER_PATCH);
                artist.label = if i == 0 {
                    hist.label.map(str::to_string)
                } else {
                    Some("_nolegend_".to_string())
                };
                artist.color = hist.color.clone();
                artist.alpha = Some(hist.alpha);
                artist.extent = Some((w[0], w[1]));
                self.push(artist)
            })
            .collect();

        Ok(Histogram {
            counts,
            edges,
            patches,
        })
    }

    fn axhline(&mut self, y: f64, style: &RefLineStyle) -> Result<ArtistId> {
        Ok(self.push(ref_line(ArtistKind::HLine, y, style)))
    }

    fn axvline(&mut self, x: f64, style: &RefLineStyle) -> Result<ArtistId> {
        Ok(self.push(ref_line(ArtistKind::VLine, x, style)))
    }

    fn axhspan(&mut self, ymin: f64, ymax: f64, style: &SpanStyle) -> Result<ArtistId> {
        Ok(self.push(span(ArtistKind::HSpan, ymin, ymax, style)))
    }

    fn axvspan(&mut self, xmin: f64, xmax: f64, style: &SpanStyle) -> Result<ArtistId> {
        Ok(self.push(span(ArtistKind::VSpan, xmin, xmax, style)))
    }

    fn set_xscale(&mut self, scale: &str) -> Result<()> {
        self.xscale = scale.parse()?;
        Ok(())
    }

    fn set_yscale(&mut self, scale: &str) -> Result<()> {
        self.yscale = scale.parse()?;
        Ok(())
    }

    fn set_xlim(&mut self, limits: (f64, f64)) -> Result<()> {
        check_limits(limits)?;
        self.xlim = Some(limits);
        Ok(())
    }

    fn set_ylim(&mut self, limits: (f64, f64)) -> Result<()> {
        check_limits(limits)?;
        self.ylim = Some(limits);
        Ok(())
    }

    fn set_xlabel(&mut self, label: &str) {
        self.xlabel = Some(label.to_string());
    }

    fn set_ylabel(&mut self, label: &str) {
        self.ylabel = Some(label.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn tick_params(&mut self, params: &TickParams) {
        self.tick_params.push(params.clone());
    }

    fn set_major_locator(&mut self, axis: Axis, locator: Locator) {
        match axis {
            Axis::X => self.x_major_locator = Some(locator),
            Axis::Y => self.y_major_locator = Some(locator),
        }
    }

    fn set_minor_locator(&mut self, axis: Axis, locator: Locator) {
        match axis {
            Axis::X => self.x_minor_locator = Some(locator),
            Axis::Y => self.y_minor_locator = Some(locator),
        }
    }

    fn grid(&mut self, style: &GridStyle) {
        self.grid = Some(style.clone());
    }

    fn legend(&mut self, options: &LegendOptions) -> Result<ArtistId> {
        self.legend_entries = self
            .artists
            .iter()
            .filter_map(Artist::legend_label)
            .map(str::to_string)
            .collect();
        self.legend = Some(options.clone());

        let mut artist = Artist::new(ArtistKind::Legend, ZORDER_LEGEND);
        artist.alpha = Some(options.framealpha);
        artist.points = self.legend_entries.len();
        Ok(self.push(artist))
    }
}

fn ref_line(kind: ArtistKind, at: f64, style: &RefLineStyle) -> Artist {
    let mut artist = Artist::new(kind, ZORDER_LINE);
    artist.label = style.label.clone();
    artist.color = Some(style.color.clone());
    artist.linestyle = Some(style.linestyle);
    artist.linewidth = Some(style.linewidth);
    artist.alpha = Some(style.alpha);
    artist.points = 2;
    artist.extent = Some((at, at));
    artist
}

fn span(kind: ArtistKind, min: f64, max: f64, style: &SpanStyle) -> Artist {
    let mut artist = Artist::new(kind, ZORDER_PATCH);
    artist.label = style.label.clone();
    artist.color = Some(style.color.clone());
    artist.alpha = Some(style.alpha);
    artist.extent = Some((min, max));
    artist
}

/// The backend's own starting configuration
pub fn factory_rcparams() -> RcParams {
    RcParams::new()
        .with("font.size", 10.0)
        .with("figure.figsize", [6.4, 4.8])
        .with("figure.dpi", 100.0)
        .with("lines.linewidth", 1.5)
        .with("lines.markersize", 6.0)
        .with("axes.linewidth", 0.8)
        .with("xtick.direction", "out")
        .with("ytick.direction", "out")
}

/// A backend holding a list of recording axes and a configuration dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingBackend {
    rc: RcParams,
    axes: Vec<RecordingAxes>,
    current: usize,
}

impl RecordingBackend {
    /// One empty axes and the factory configuration
    pub fn new() -> Self {
        Self {
            rc: factory_rcparams(),
            axes: vec![RecordingAxes::new()],
            current: 0,
        }
    }

    /// Add an axes and make it current; returns its index
    pub fn add_axes(&mut self) -> usize {
        self.axes.push(RecordingAxes::new());
        self.current = self.axes.len() - 1;
        self.current
    }

    /// Make the axes at `index` current
    pub fn sca(&mut self, index: usize) -> Result<()> {
        if index >= self.axes.len() {
            return Err(PltxError::backend(format!(
                "No axes at index {} ({} axes)",
                index,
                self.axes.len()
            )));
        }
        self.current = index;
        Ok(())
    }

    pub fn axes(&self, index: usize) -> Option<&RecordingAxes> {
        self.axes.get(index)
    }

    pub fn axes_mut(&mut self, index: usize) -> Option<&mut RecordingAxes> {
        self.axes.get_mut(index)
    }

    pub fn current_axes(&self) -> &RecordingAxes {
        &self.axes[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn axes_count(&self) -> usize {
        self.axes.len()
    }

    /// Drop every axes and start over with a single empty one
    pub fn clear(&mut self) {
        self.axes = vec![RecordingAxes::new()];
        self.current = 0;
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RcTarget for RecordingBackend {
    fn rc_params(&self) -> &RcParams {
        &self.rc
    }

    fn rc_params_mut(&mut self) -> &mut RcParams {
        &mut self.rc
    }
}

impl Backend for RecordingBackend {
    type Axes = RecordingAxes;

    fn gca(&mut self) -> &mut RecordingAxes {
        &mut self.axes[self.current]
    }
}
