//! The style session: palette, color cycle and layered drawing helpers.
//!
//! A [`StyleSession`] pre-fills draw parameters for an [`Axes`]. Colors are
//! resolved in a fixed order: an explicit color wins, then an explicit palette
//! index, then the session's auto-cycle counter. Only the auto-cycle path
//! advances the counter.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::backend::{
    ArtistId, Axes, Axis, BarPositions, BarRequest, Bins, ErrorBarRequest, GridStyle,
    HistRequest, Histogram, LegendOptions, LineRequest, LineStyle, Locator, Marker,
    RefLineStyle, ScatterRequest, SpanStyle, TickDirection, TickParams, TickWhich,
};
use crate::color::{Color, Rgb};
use crate::config::StyleConfig;
use crate::error::Result;
use crate::palette::Palette;
use crate::rcparams::{apply_rcparams, style_context, RcParams, RcTarget, StyleGuard};

// Stacking orders of the layered curve
const ZORDER_OUTLINE: f64 = 1.0;
const ZORDER_MAIN: f64 = 2.0;
const ZORDER_CENTERLINE: f64 = 3.0;

const MIN_CENTERLINE_WIDTH: f64 = 0.5;

// Log axis tick density
const LOG_MAJOR_TICKS: usize = 5;
const LOG_MINOR_TICKS: usize = 15;

/// Axis decoration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub title: Option<String>,
    /// Scale name, validated by the backend
    pub xscale: String,
    pub yscale: String,
    /// Spacing between major ticks
    pub xtick_spacing: Option<f64>,
    pub ytick_spacing: Option<f64>,
    pub grid: bool,
    pub grid_alpha: f64,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            xlim: None,
            ylim: None,
            xlabel: None,
            ylabel: None,
            title: None,
            xscale: "linear".to_string(),
            yscale: "linear".to_string(),
            xtick_spacing: None,
            ytick_spacing: None,
            grid: false,
            grid_alpha: 0.3,
        }
    }
}

/// Parameters of a layered curve draw
#[derive(Debug, Clone, PartialEq)]
pub struct CurveOptions {
    pub label: Option<String>,
    pub color: Option<Color>,
    /// Palette index, wrapped around the palette size
    pub color_idx: Option<usize>,
    /// Lightens palette colors; `1.0` keeps them unchanged
    pub color_intensity: Option<f64>,
    pub linestyle: LineStyle,
    /// Requested width; the session base width when `None`
    pub linewidth: Option<f64>,
    pub marker: Option<Marker>,
    pub markersize: Option<f64>,
    pub alpha: Option<f64>,
    /// Draw a wider copy behind the curve
    pub outline: bool,
    pub outline_color: Color,
    /// Defaults to the main width plus 2
    pub outline_width: Option<f64>,
    /// Draw a thin copy on top of the curve
    pub centerline: bool,
    pub centerline_color: Color,
    /// Defaults to a third of the main width, at least 0.5
    pub centerline_width: Option<f64>,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            label: None,
            color: None,
            color_idx: None,
            color_intensity: None,
            linestyle: LineStyle::Solid,
            linewidth: None,
            marker: None,
            markersize: None,
            alpha: None,
            outline: false,
            outline_color: Color::from("black"),
            outline_width: None,
            centerline: false,
            centerline_color: Color::from("black"),
            centerline_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterOptions {
    pub label: Option<String>,
    pub color: Option<Color>,
    pub color_idx: Option<usize>,
    pub size: f64,
    pub marker: Marker,
    pub alpha: Option<f64>,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            label: None,
            color: None,
            color_idx: None,
            size: 20.0,
            marker: Marker::Circle,
            alpha: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarOptions<'a> {
    pub yerr: Option<&'a [f64]>,
    pub xerr: Option<&'a [f64]>,
    pub label: Option<String>,
    pub color: Option<Color>,
    pub color_idx: Option<usize>,
    pub linewidth: Option<f64>,
    pub capsize: f64,
    pub fmt: String,
}

impl Default for ErrorBarOptions<'_> {
    fn default() -> Self {
        Self {
            yerr: None,
            xerr: None,
            label: None,
            color: None,
            color_idx: None,
            linewidth: None,
            capsize: 3.0,
            fmt: "o".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarOptions {
    pub label: Option<String>,
    pub color: Option<Color>,
    pub color_idx: Option<usize>,
    pub edgecolor: Color,
    pub linewidth: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            label: None,
            color: None,
            color_idx: None,
            edgecolor: Color::from("black"),
            linewidth: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistOptions<'a> {
    pub bins: Bins<'a>,
    pub label: Option<String>,
    pub color: Option<Color>,
    pub color_idx: Option<usize>,
    pub edgecolor: Color,
    pub alpha: f64,
}

impl Default for HistOptions<'_> {
    fn default() -> Self {
        Self {
            bins: Bins::Auto,
            label: None,
            color: None,
            color_idx: None,
            edgecolor: Color::from("white"),
            alpha: 0.8,
        }
    }
}

/// Horizontal and vertical reference lines sharing one style.
///
/// Only the first line drawn carries the label: the first horizontal line, or
/// the first vertical line when there are no horizontal ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLines {
    pub horizontal: Vec<f64>,
    pub vertical: Vec<f64>,
    pub color: Color,
    pub linestyle: LineStyle,
    pub linewidth: f64,
    pub alpha: f64,
    pub label: Option<String>,
}

impl Default for ReferenceLines {
    fn default() -> Self {
        Self {
            horizontal: Vec::new(),
            vertical: Vec::new(),
            color: Color::from("k"),
            linestyle: LineStyle::Dashed,
            linewidth: 0.5,
            alpha: 0.3,
            label: None,
        }
    }
}

/// A shaded band. The y-bounds win when both pairs are complete.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightRegion {
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
    pub color: Color,
    pub alpha: f64,
    pub label: Option<String>,
}

impl Default for HighlightRegion {
    fn default() -> Self {
        Self {
            xmin: None,
            xmax: None,
            ymin: None,
            ymax: None,
            color: Color::from("0.85"),
            alpha: 0.5,
            label: None,
        }
    }
}

/// Palette, color cycle and line-width policy for a series of draws
#[derive(Debug, Clone)]
pub struct StyleSession {
    config: StyleConfig,
    palette: Palette,
    color_cycle_idx: usize,
}

impl StyleSession {
    /// Build a session without touching any global configuration
    pub fn new(config: StyleConfig) -> Result<Self> {
        config.validate()?;
        let palette = Palette::new(&config.palette_name, config.palette_size)?;
        debug!(
            palette = %palette,
            vary_linewidth = config.vary_linewidth,
            "Created style session"
        );
        Ok(Self {
            config,
            palette,
            color_cycle_idx: 0,
        })
    }

    /// Build a session and, when `auto_apply` is set, write its global style
    /// into `target`
    pub fn for_target<T: RcTarget + ?Sized>(config: StyleConfig, target: &mut T) -> Result<Self> {
        let session = Self::new(config)?;
        if session.config.auto_apply {
            session.apply_global_style(target);
        }
        Ok(session)
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Write the default parameters with this session's fonts into `target`
    pub fn apply_global_style<T: RcTarget + ?Sized>(&self, target: &mut T) {
        apply_rcparams(
            target,
            self.config.font_size_medium,
            self.config.font_size_large,
            self.config.use_tex,
            &RcParams::new(),
        );
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the palette and restart the color cycle
    pub fn set_palette(&mut self, scheme: &str, size: Option<usize>) -> Result<()> {
        self.palette.set_scheme(scheme, size)?;
        self.config.palette_name = scheme.to_string();
        self.config.palette_size = self.palette.size();
        self.color_cycle_idx = 0;
        Ok(())
    }

    pub fn get_color(&self, idx: usize) -> Result<Rgb> {
        self.palette.get(idx)
    }

    pub fn cycle_color(&self, idx: usize) -> Rgb {
        self.palette.cycle(idx)
    }

    /// The next color of the auto cycle; advances the counter
    pub fn next_auto_color(&mut self) -> Rgb {
        let color = self.palette.cycle(self.color_cycle_idx);
        self.color_cycle_idx += 1;
        color
    }

    pub fn reset_color_cycle(&mut self) {
        self.color_cycle_idx = 0;
    }

    /// Current value of the auto-cycle counter
    pub fn cycle_index(&self) -> usize {
        self.color_cycle_idx
    }

    /// Width for the line drawn with palette index `idx`.
    ///
    /// With width progression enabled this is `base * factor^idx`, where
    /// `base` is `requested` or the session base width.
    pub fn line_width(&self, idx: usize, requested: Option<f64>) -> f64 {
        let base = requested.unwrap_or(self.config.base_linewidth);
        if !self.config.vary_linewidth {
            return base;
        }
        base * self.config.linewidth_progression_factor.powf(idx as f64)
    }

    /// Resolve the draw color and the palette index it came from, if any
    fn resolve_color(
        &mut self,
        color: Option<&Color>,
        color_idx: Option<usize>,
        intensity: Option<f64>,
    ) -> (Color, Option<usize>) {
        if let Some(color) = color {
            return (color.clone(), color_idx);
        }

        let idx = match color_idx {
            Some(idx) => idx,
            None => {
                let idx = self.color_cycle_idx;
                self.color_cycle_idx += 1;
                idx
            }
        };

        let mut rgb = self.palette.cycle(idx);
        if let Some(k) = intensity {
            rgb = Palette::adjust_intensity(rgb, k);
        }
        (Color::Rgb(rgb), Some(idx))
    }

    fn progressive_width(&self, idx: Option<usize>, requested: Option<f64>) -> f64 {
        match idx {
            Some(i) if self.config.vary_linewidth => self.line_width(i, requested),
            _ => requested.unwrap_or(self.config.base_linewidth),
        }
    }

    /// Draw a curve with optional outline and centerline layers.
    ///
    /// Layers are drawn outline first, then the main curve, then the
    /// centerline. Returns the main curve only.
    pub fn plot_curve<A: Axes + ?Sized>(
        &mut self,
        ax: &mut A,
        x: &[f64],
        y: &[f64],
        options: &CurveOptions,
    ) -> Result<ArtistId> {
        let (color, idx) = self.resolve_color(
            options.color.as_ref(),
            options.color_idx,
            options.color_intensity,
        );
        let linewidth = self.progressive_width(idx, options.linewidth);
        let markersize = options.markersize.filter(|m| *m != 0.0);

        let layer = |color: Color, linewidth: f64, markersize: Option<f64>, zorder: Option<f64>| {
            LineRequest {
                x,
                y,
                label: None,
                color: Some(color),
                linestyle: options.linestyle,
                linewidth,
                marker: options.marker,
                markersize,
                alpha: options.alpha,
                zorder,
            }
        };

        if options.outline {
            let width = options.outline_width.unwrap_or(linewidth + 2.0);
            ax.plot(&layer(
                options.outline_color.clone(),
                width,
                markersize.map(|m| m + 1.0),
                Some(ZORDER_OUTLINE),
            ))?;
        }

        let mut main = layer(
            color,
            linewidth,
            options.markersize,
            options.outline.then_some(ZORDER_MAIN),
        );
        main.label = options.label.as_deref();
        let id = ax.plot(&main)?;

        if options.centerline {
            let width = options
                .centerline_width
                .unwrap_or_else(|| MIN_CENTERLINE_WIDTH.max(linewidth / 3.0));
            ax.plot(&layer(
                options.centerline_color.clone(),
                width,
                markersize.map(|m| m - 1.0),
                Some(ZORDER_CENTERLINE),
            ))?;
        }

        trace!(
            points = x.len(),
            linewidth = linewidth,
            outline = options.outline,
            centerline = options.centerline,
            "Plotted curve"
        );
        Ok(id)
    }

    pub fn scatter_styled<A: Axes + ?Sized>(
        &mut self,
        ax: &mut A,
        x: &[f64],
        y: &[f64],
        options: &ScatterOptions,
    ) -> Result<ArtistId> {
        let (color, _) = self.resolve_color(options.color.as_ref(), options.color_idx, None);
        ax.scatter(&ScatterRequest {
            x,
            y,
            label: options.label.as_deref(),
            color: Some(color),
            size: options.size,
            marker: options.marker,
            alpha: options.alpha,
        })
    }

    /// Error bars; the line width follows the width progression
    pub fn errorbar_styled<A: Axes + ?Sized>(
        &mut self,
        ax: &mut A,
        x: &[f64],
        y: &[f64],
        options: &ErrorBarOptions<'_>,
    ) -> Result<ArtistId> {
        let (color, idx) = self.resolve_color(options.color.as_ref(), options.color_idx, None);
        let linewidth = self.progressive_width(idx, options.linewidth);
        ax.errorbar(&ErrorBarRequest {
            x,
            y,
            yerr: options.yerr,
            xerr: options.xerr,
            label: options.label.as_deref(),
            color: Some(color),
            linewidth,
            capsize: options.capsize,
            fmt: &options.fmt,
        })
    }

    pub fn bar_styled<A: Axes + ?Sized>(
        &mut self,
        ax: &mut A,
        x: BarPositions<'_>,
        height: &[f64],
        options: &BarOptions,
    ) -> Result<Vec<ArtistId>> {
        let (color, _) = self.resolve_color(options.color.as_ref(), options.color_idx, None);
        ax.bar(&BarRequest {
            x,
            height,
            label: options.label.as_deref(),
            color: Some(color),
            edgecolor: options.edgecolor.clone(),
            linewidth: options.linewidth,
        })
    }

    pub fn hist_styled<A: Axes + ?Sized>(
        &mut self,
        ax: &mut A,
        data: &[f64],
        options: &HistOptions<'_>,
    ) -> Result<Histogram> {
        let (color, _) = self.resolve_color(options.color.as_ref(), options.color_idx, None);
        ax.hist(&HistRequest {
            data,
            bins: options.bins,
            label: options.label.as_deref(),
            color: Some(color),
            edgecolor: options.edgecolor.clone(),
            alpha: options.alpha,
        })
    }

    /// Apply scales, limits, labels, inward ticks and the optional grid.
    ///
    /// Scale names are checked by the backend; its error is returned as is.
    pub fn decorate_axis<A: Axes + ?Sized>(&self, ax: &mut A, options: &AxisOptions) -> Result<()> {
        ax.set_xscale(&options.xscale)?;
        ax.set_yscale(&options.yscale)?;

        if let Some(xlim) = options.xlim {
            ax.set_xlim(xlim)?;
        }
        if let Some(ylim) = options.ylim {
            ax.set_ylim(ylim)?;
        }

        if let Some(xlabel) = &options.xlabel {
            ax.set_xlabel(xlabel);
        }
        if let Some(ylabel) = &options.ylabel {
            ax.set_ylabel(ylabel);
        }
        if let Some(title) = &options.title {
            ax.set_title(title);
        }

        ax.tick_params(&TickParams {
            axis: None,
            which: TickWhich::Major,
            direction: Some(TickDirection::In),
            top: Some(true),
            right: Some(true),
        });

        let x_log = options.xscale == "log";
        let y_log = options.yscale == "log";
        for (axis, is_log) in [(Axis::X, x_log), (Axis::Y, y_log)] {
            if is_log {
                ax.tick_params(&TickParams {
                    axis: Some(axis),
                    which: TickWhich::Minor,
                    direction: Some(TickDirection::In),
                    ..TickParams::default()
                });
            }
        }

        if let Some(step) = options.xtick_spacing {
            ax.set_major_locator(Axis::X, Locator::Multiple(step));
        }
        if let Some(step) = options.ytick_spacing {
            ax.set_major_locator(Axis::Y, Locator::Multiple(step));
        }

        // Log locators replace any explicit spacing
        for (axis, is_log) in [(Axis::Y, y_log), (Axis::X, x_log)] {
            if is_log {
                ax.set_major_locator(
                    axis,
                    Locator::Log {
                        numticks: LOG_MAJOR_TICKS,
                        subs_auto: false,
                    },
                );
                ax.set_minor_locator(
                    axis,
                    Locator::Log {
                        numticks: LOG_MINOR_TICKS,
                        subs_auto: true,
                    },
                );
            }
        }

        if options.grid {
            ax.grid(&GridStyle {
                visible: true,
                alpha: options.grid_alpha,
                linestyle: LineStyle::Dashed,
                linewidth: 0.5,
            });
        }

        Ok(())
    }

    /// Draw the reference lines, horizontal ones first
    pub fn add_reference_lines<A: Axes + ?Sized>(
        &self,
        ax: &mut A,
        lines: &ReferenceLines,
    ) -> Result<Vec<ArtistId>> {
        let style = |label: Option<String>| RefLineStyle {
            color: lines.color.clone(),
            linestyle: lines.linestyle,
            linewidth: lines.linewidth,
            alpha: lines.alpha,
            label,
        };

        let mut ids = Vec::with_capacity(lines.horizontal.len() + lines.vertical.len());
        for (i, &y) in lines.horizontal.iter().enumerate() {
            let label = if i == 0 { lines.label.clone() } else { None };
            ids.push(ax.axhline(y, &style(label))?);
        }
        for (i, &x) in lines.vertical.iter().enumerate() {
            let label = if i == 0 && lines.horizontal.is_empty() {
                lines.label.clone()
            } else {
                None
            };
            ids.push(ax.axvline(x, &style(label))?);
        }
        Ok(ids)
    }

    /// Shade the region; draws nothing when neither bound pair is complete
    pub fn add_highlight_region<A: Axes + ?Sized>(
        &self,
        ax: &mut A,
        region: &HighlightRegion,
    ) -> Result<Option<ArtistId>> {
        let style = SpanStyle {
            color: region.color.clone(),
            alpha: region.alpha,
            label: region.label.clone(),
        };

        match (region.ymin, region.ymax, region.xmin, region.xmax) {
            (Some(ymin), Some(ymax), _, _) => ax.axhspan(ymin, ymax, &style).map(Some),
            (_, _, Some(xmin), Some(xmax)) => ax.axvspan(xmin, xmax, &style).map(Some),
            _ => Ok(None),
        }
    }

    pub fn format_legend<A: Axes + ?Sized>(
        &self,
        ax: &mut A,
        options: &LegendOptions,
    ) -> Result<ArtistId> {
        ax.legend(options)
    }

    /// Apply `preset` to `target` until the returned guard is dropped
    pub fn style_context<'a, T: RcTarget + ?Sized>(
        &self,
        target: &'a mut T,
        preset: &str,
        overrides: &RcParams,
    ) -> Result<StyleGuard<'a, T>> {
        style_context(target, preset, overrides)
    }
}
