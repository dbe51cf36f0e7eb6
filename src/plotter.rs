//! Facade over a backend and its default style session.
//!
//! [`Plotter`] owns the backend and lazily creates a [`StyleSession`] with the
//! default configuration on first use. Every drawing call targets the
//! backend's current axes.

use tracing::info;

use crate::backend::{ArtistId, Backend, BarPositions, Histogram, LegendOptions};
use crate::color::Rgb;
use crate::config::StyleConfig;
use crate::error::Result;
use crate::rcparams::{RcParams, RcTarget, StyleGuard};
use crate::style::{
    AxisOptions, BarOptions, CurveOptions, ErrorBarOptions, HighlightRegion, HistOptions,
    ReferenceLines, ScatterOptions, StyleSession,
};

pub struct Plotter<B: Backend> {
    backend: B,
    style: Option<StyleSession>,
}

impl<B: Backend> Plotter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            style: None,
        }
    }

    /// Replace the session, applying its global style when `auto_apply` is set
    pub fn initialize_style(&mut self, config: StyleConfig) -> Result<&mut StyleSession> {
        let session = StyleSession::for_target(config, &mut self.backend)?;
        info!(palette = %session.palette(), "Initialized plot style");
        Ok(self.style.insert(session))
    }

    /// The current session, created with the default configuration on first use
    pub fn style(&mut self) -> Result<&mut StyleSession> {
        let Self { backend, style } = self;
        Self::ensure_style(style, backend)
    }

    fn ensure_style<'a>(
        style: &'a mut Option<StyleSession>,
        backend: &mut B,
    ) -> Result<&'a mut StyleSession> {
        match style {
            Some(session) => Ok(session),
            slot @ None => {
                let session = StyleSession::for_target(StyleConfig::default(), backend)?;
                Ok(slot.insert(session))
            }
        }
    }

    /// Whether a session exists yet
    pub fn has_style(&self) -> bool {
        self.style.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// The session and the current axes, borrowed together
    fn parts(&mut self) -> Result<(&mut StyleSession, &mut B::Axes)> {
        let Self { backend, style } = self;
        let session = Self::ensure_style(style, backend)?;
        Ok((session, backend.gca()))
    }

    pub fn get_color(&mut self, idx: usize) -> Result<Rgb> {
        self.style()?.get_color(idx)
    }

    pub fn cycle_color(&mut self, idx: usize) -> Result<Rgb> {
        Ok(self.style()?.cycle_color(idx))
    }

    pub fn reset_color_cycle(&mut self) -> Result<()> {
        self.style()?.reset_color_cycle();
        Ok(())
    }

    pub fn set_palette(&mut self, scheme: &str, size: Option<usize>) -> Result<()> {
        self.style()?.set_palette(scheme, size)
    }

    pub fn line_width(&mut self, idx: usize, requested: Option<f64>) -> Result<f64> {
        Ok(self.style()?.line_width(idx, requested))
    }

    pub fn plot_curve(&mut self, x: &[f64], y: &[f64], options: &CurveOptions) -> Result<ArtistId> {
        let (style, ax) = self.parts()?;
        style.plot_curve(ax, x, y, options)
    }

    pub fn scatter_styled(
        &mut self,
        x: &[f64],
        y: &[f64],
        options: &ScatterOptions,
    ) -> Result<ArtistId> {
        let (style, ax) = self.parts()?;
        style.scatter_styled(ax, x, y, options)
    }

    pub fn errorbar_styled(
        &mut self,
        x: &[f64],
        y: &[f64],
        options: &ErrorBarOptions<'_>,
    ) -> Result<ArtistId> {
        let (style, ax) = self.parts()?;
        style.errorbar_styled(ax, x, y, options)
    }

    pub fn bar_styled(
        &mut self,
        x: BarPositions<'_>,
        height: &[f64],
        options: &BarOptions,
    ) -> Result<Vec<ArtistId>> {
        let (style, ax) = self.parts()?;
        style.bar_styled(ax, x, height, options)
    }

    pub fn hist_styled(&mut self, data: &[f64], options: &HistOptions<'_>) -> Result<Histogram> {
        let (style, ax) = self.parts()?;
        style.hist_styled(ax, data, options)
    }

    pub fn decorate_axis(&mut self, options: &AxisOptions) -> Result<()> {
        let (style, ax) = self.parts()?;
        style.decorate_axis(ax, options)
    }

    pub fn add_reference_lines(&mut self, lines: &ReferenceLines) -> Result<Vec<ArtistId>> {
        let (style, ax) = self.parts()?;
        style.add_reference_lines(ax, lines)
    }

    pub fn add_highlight_region(&mut self, region: &HighlightRegion) -> Result<Option<ArtistId>> {
        let (style, ax) = self.parts()?;
        style.add_highlight_region(ax, region)
    }

    pub fn format_legend(&mut self, options: &LegendOptions) -> Result<ArtistId> {
        let (style, ax) = self.parts()?;
        style.format_legend(ax, options)
    }

    /// Apply `preset` until the returned guard is dropped; drawing continues
    /// through the guard
    pub fn style_context(
        &mut self,
        preset: &str,
        overrides: &RcParams,
    ) -> Result<StyleGuard<'_, Self>> {
        StyleGuard::new(self, preset, overrides)
    }
}

impl<B: Backend + Default> Default for Plotter<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: Backend> RcTarget for Plotter<B> {
    fn rc_params(&self) -> &RcParams {
        self.backend.rc_params()
    }

    fn rc_params_mut(&mut self) -> &mut RcParams {
        self.backend.rc_params_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;

    #[test]
    fn test_style_created_lazily() {
        let mut plotter = Plotter::new(RecordingBackend::new());
        assert!(!plotter.has_style());
        assert_eq!(plotter.rc_params().get_f64("font.size"), Some(10.0));

        plotter
            .plot_curve(&[0.0, 1.0], &[0.0, 1.0], &CurveOptions::default())
            .unwrap();
        assert!(plotter.has_style());
        // Default session applies its global style
        assert_eq!(plotter.rc_params().get_f64("font.size"), Some(12.0));
        assert_eq!(plotter.backend().current_axes().lines().len(), 1);
    }

    #[test]
    fn test_style_and_draws_share_one_session() {
        let mut plotter = Plotter::new(RecordingBackend::new());
        plotter.style().unwrap().next_auto_color();
        plotter
            .plot_curve(&[0.0, 1.0], &[0.0, 1.0], &CurveOptions::default())
            .unwrap();
        assert_eq!(plotter.style().unwrap().cycle_index(), 2);
    }

    #[test]
    fn test_initialize_style_replaces_session() {
        let mut plotter = Plotter::new(RecordingBackend::new());
        plotter.style().unwrap().next_auto_color();

        plotter
            .initialize_style(StyleConfig {
                palette_name: "viridis".to_string(),
                palette_size: 4,
                font_size_medium: 9.0,
                ..StyleConfig::default()
            })
            .unwrap();
        let style = plotter.style().unwrap();
        assert_eq!(style.cycle_index(), 0);
        assert_eq!(style.palette().len(), 4);
        assert_eq!(plotter.rc_params().get_f64("font.size"), Some(9.0));
    }

    #[test]
    fn test_draws_target_current_axes() {
        let mut plotter = Plotter::new(RecordingBackend::new());
        let second = plotter.backend_mut().add_axes();
        plotter.backend_mut().sca(second).unwrap();

        plotter
            .add_reference_lines(&ReferenceLines {
                horizontal: vec![0.0],
                ..ReferenceLines::default()
            })
            .unwrap();

        let backend = plotter.backend();
        assert_eq!(backend.axes(0).map(|ax| ax.artists().len()), Some(0));
        assert_eq!(backend.axes(second).map(|ax| ax.artists().len()), Some(1));
    }

    #[test]
    fn test_style_context_restores() {
        let mut plotter = Plotter::new(RecordingBackend::new());
        plotter.style().unwrap();
        let before = plotter.rc_params().clone();
        {
            let mut guard = plotter
                .style_context("presentation", &RcParams::new())
                .unwrap();
            assert_eq!(guard.rc_params().get_f64("font.size"), Some(16.0));
            guard
                .plot_curve(&[0.0], &[0.0], &CurveOptions::default())
                .unwrap();
        }
        assert_eq!(plotter.rc_params(), &before);
        assert_eq!(plotter.backend().current_axes().lines().len(), 1);
    }
}
