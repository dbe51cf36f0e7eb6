//! Integration tests for pltx
//!
//! These tests drive palettes, presets, style sessions and the facade end to
//! end against the recording backend.

mod common;

use common::assertions::{
    assert_approx_eq, assert_array_approx_eq, assert_color_approx_eq, assert_unit_color,
};
use common::test_data;
use pretty_assertions::assert_eq;
use std::io::Write;

use pltx::backend::{ArtistKind, BarPositions, Bins, LegendOptions};
use pltx::rcparams::{apply_style_preset, with_style, RcParams, RcTarget};
use pltx::schemes::available_schemes;
use pltx::{
    AxisOptions, BarOptions, Color, Config, CurveOptions, ErrorBarOptions, HighlightRegion,
    HistOptions, Palette, PltxError, Plotter, RecordingAxes, RecordingBackend, ReferenceLines,
    Rgb, ScatterOptions, StyleConfig, StyleSession,
};

fn session(config: StyleConfig) -> StyleSession {
    StyleSession::new(config).expect("valid style config")
}

#[test]
fn test_every_scheme_yields_requested_size() {
    for name in available_schemes() {
        for reversed in [false, true] {
            let scheme = if reversed {
                format!("{}_r", name)
            } else {
                name.to_string()
            };
            for size in [1, 2, 7, 12] {
                let palette = Palette::new(&scheme, size).unwrap();
                assert_eq!(palette.len(), size, "{} with size {}", scheme, size);
                palette.iter().for_each(assert_unit_color);
            }
        }
    }
}

#[test]
fn test_wrapped_access_is_periodic() {
    let palette = Palette::new("magma", 7).unwrap();
    for i in 0..7 {
        for k in 0..4 {
            assert_eq!(palette.cycle(i), palette.cycle(i + k * 7));
        }
    }
}

#[test]
fn test_viridis_three_colors() {
    let palette = Palette::new("viridis", 3).unwrap();
    assert_eq!(palette.get(0).unwrap(), palette.colors()[0]);
    assert!(matches!(
        palette.get(3),
        Err(PltxError::OutOfRange { index: 3, len: 3 })
    ));
    assert_eq!(palette.cycle(0), palette.cycle(3));
    assert_eq!(palette.cycle(4), palette.cycle(1));

    // viridis runs from dark purple to yellow
    let first = palette.colors()[0];
    let last = palette.colors()[2];
    assert!(first.b > first.g && last.g > last.b);
}

#[test]
fn test_reversed_scheme_mirrors_samples() {
    let forward = Palette::new("viridis", 5).unwrap();
    let reversed = Palette::new("viridis_r", 5).unwrap();
    for (a, b) in forward.iter().zip(reversed.iter().rev()) {
        assert_color_approx_eq(a, b);
    }
}

#[test]
fn test_categorical_palettes_are_distinct_schemes() {
    let viridis = Palette::new("viridis", 4).unwrap();
    for name in pltx::schemes::CATEGORICAL_PALETTES {
        let palette = Palette::new(name, 4).unwrap();
        assert_ne!(palette.colors(), viridis.colors(), "{} fell back", name);
    }

    let husl = Palette::new("husl", 4).unwrap();
    assert_ne!(husl.cycle(0), husl.cycle(4 - 1));
    assert_eq!(husl.cycle(0), husl.cycle(4));
}

#[test]
fn test_intensity_and_gradient_laws() {
    let color = Rgb::new(0.2, 0.4, 0.8);
    assert_eq!(Palette::adjust_intensity(color, 1.0), color);
    assert_eq!(Palette::adjust_intensity(color, 0.0), Rgb::WHITE);

    let gradient = Palette::gradient(Rgb::BLACK, color, 5).unwrap();
    assert_eq!(gradient.len(), 5);
    assert_eq!(gradient[0], Rgb::BLACK);
    assert_color_approx_eq(&gradient[4], &color);
    let reds: Vec<f64> = gradient.iter().map(|c| c.r).collect();
    assert_array_approx_eq(&reds, &[0.0, 0.05, 0.1, 0.15, 0.2], None);

    assert!(matches!(
        Palette::gradient(Rgb::BLACK, color, 1),
        Err(PltxError::InvalidArgument { .. })
    ));
}

// The process-wide default palette is shared by every test in this binary,
// so all of its checks live in this one test.
#[test]
fn test_default_palette_functions() {
    assert_eq!(pltx::palette::default_palette().scheme(), "plasma_r");
    assert_eq!(pltx::palette::default_palette().len(), 10);

    pltx::set_default_palette("viridis", 3).unwrap();
    let expected = Palette::new("viridis", 3).unwrap();
    assert_eq!(pltx::get_color(1).unwrap(), expected.colors()[1]);
    assert!(pltx::get_color(3).is_err());
    assert_eq!(pltx::cycle_color(4), expected.colors()[1]);

    assert!(pltx::set_default_palette("viridis", 0).is_err());
    assert_eq!(pltx::palette::default_palette(), expected);

    pltx::set_default_palette("plasma_r", 10).unwrap();
}

#[test]
fn test_width_progression_scenario() {
    let style = session(StyleConfig {
        vary_linewidth: true,
        base_linewidth: 2.0,
        linewidth_progression_factor: 1.3,
        ..StyleConfig::default()
    });
    assert_approx_eq(style.line_width(0, None), 2.0, None);
    assert_approx_eq(style.line_width(1, None), 2.6, None);
    assert_approx_eq(style.line_width(2, None), 3.38, None);
}

#[test]
fn test_layered_curve_draw_counts() {
    let (x, y) = test_data::sine_wave(50, 0.0);
    let mut style = session(StyleConfig::default());

    let mut ax = RecordingAxes::new();
    let outline = CurveOptions {
        outline: true,
        ..CurveOptions::default()
    };
    style.plot_curve(&mut ax, &x, &y, &outline).unwrap();
    assert_eq!(ax.lines().len(), 2);

    let mut ax = RecordingAxes::new();
    let layered = CurveOptions {
        outline: true,
        centerline: true,
        ..CurveOptions::default()
    };
    let id = style.plot_curve(&mut ax, &x, &y, &layered).unwrap();
    let zorders: Vec<f64> = ax.lines().iter().map(|l| l.zorder).collect();
    assert_eq!(zorders, vec![1.0, 2.0, 3.0]);
    assert_eq!(ax.artist(id).map(|a| a.points), Some(50));
}

#[test]
fn test_empty_curve_draws_empty_line() {
    let mut style = session(StyleConfig::default());
    let mut ax = RecordingAxes::new();
    let id = style
        .plot_curve(&mut ax, &[], &[], &CurveOptions::default())
        .unwrap();
    assert_eq!(ax.artist(id).map(|a| a.points), Some(0));
}

#[test]
fn test_preset_font_sizes() {
    let mut rc = RcParams::new();
    apply_style_preset(&mut rc, "nature", &RcParams::new()).unwrap();
    assert_eq!(rc.get_f64("font.size"), Some(8.0));

    apply_style_preset(&mut rc, "presentation", &RcParams::new()).unwrap();
    assert_eq!(rc.get_f64("font.size"), Some(16.0));

    let err = apply_style_preset(&mut rc, "invalid", &RcParams::new()).unwrap_err();
    assert!(matches!(err, PltxError::InvalidArgument { .. }));
    assert!(err.to_string().contains("'nature'"));
}

#[test]
fn test_style_context_restores_after_error() {
    let mut backend = RecordingBackend::new();
    let before = backend.rc_params().clone();

    let result: pltx::Result<()> = with_style(&mut backend, "poster", &RcParams::new(), |b| {
        assert_eq!(b.rc_params().get_f64("font.size"), Some(24.0));
        Err(PltxError::backend("plot failed"))
    });

    assert!(result.is_err());
    assert_eq!(backend.rc_params(), &before);
}

#[test]
fn test_style_context_restores_after_panic() {
    let mut backend = RecordingBackend::new();
    let before = backend.rc_params().clone();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = pltx::style_context(&mut backend, "nature", &RcParams::new()).unwrap();
        panic!("draw failed");
    }));

    assert!(outcome.is_err());
    assert_eq!(backend.rc_params(), &before);
}

#[test]
fn test_facade_figure() {
    let mut plotter = Plotter::new(RecordingBackend::new());
    plotter
        .initialize_style(StyleConfig {
            palette_name: "tab10".to_string(),
            vary_linewidth: true,
            ..StyleConfig::default()
        })
        .unwrap();

    for (i, (x, y)) in test_data::sine_family(3, 20).iter().enumerate() {
        let options = CurveOptions {
            label: Some(format!("phase {}", i)),
            outline: i == 0,
            ..CurveOptions::default()
        };
        plotter.plot_curve(x, y, &options).unwrap();
    }
    plotter
        .add_reference_lines(&ReferenceLines {
            horizontal: vec![0.0],
            vertical: vec![1.0, 2.0],
            label: Some("reference".to_string()),
            ..ReferenceLines::default()
        })
        .unwrap();
    plotter
        .add_highlight_region(&HighlightRegion {
            xmin: Some(1.0),
            xmax: Some(2.0),
            label: Some("window".to_string()),
            ..HighlightRegion::default()
        })
        .unwrap();
    plotter
        .decorate_axis(&AxisOptions {
            xlabel: Some("t".to_string()),
            ylabel: Some("signal".to_string()),
            grid: true,
            ..AxisOptions::default()
        })
        .unwrap();
    plotter.format_legend(&LegendOptions::default()).unwrap();

    let ax = plotter.backend().current_axes();
    assert_eq!(
        ax.legend_entries,
        vec!["phase 0", "phase 1", "phase 2", "reference", "window"]
    );
    assert_eq!(ax.by_kind(ArtistKind::Line).count(), 4);
    assert_eq!(ax.by_kind(ArtistKind::VSpan).count(), 1);
    assert_eq!(ax.xlabel.as_deref(), Some("t"));
    assert!(ax.grid_visible());

    // Auto-cycled colors follow the palette, widths follow the index
    let tab10 = Palette::new("tab10", 10).unwrap();
    let mains: Vec<_> = ax
        .by_kind(ArtistKind::Line)
        .filter(|l| l.legend_label().is_some())
        .collect();
    for (i, line) in mains.iter().enumerate() {
        assert_eq!(line.color, Some(Color::Rgb(tab10.colors()[i])));
    }
    assert_approx_eq(mains[2].linewidth.unwrap(), 2.0 * 1.3 * 1.3, None);
}

#[test]
fn test_facade_styled_primitives() {
    let mut plotter = Plotter::new(RecordingBackend::new());

    plotter
        .scatter_styled(&[0.0, 1.0], &[1.0, 0.0], &ScatterOptions::default())
        .unwrap();
    plotter
        .errorbar_styled(
            &[0.0, 1.0],
            &[1.0, 2.0],
            &ErrorBarOptions {
                yerr: Some(&[0.1, 0.1][..]),
                ..ErrorBarOptions::default()
            },
        )
        .unwrap();
    let bars = plotter
        .bar_styled(
            BarPositions::Categories(&["a", "b", "c"]),
            &[3.0, 1.0, 2.0],
            &BarOptions {
                label: Some("counts".to_string()),
                ..BarOptions::default()
            },
        )
        .unwrap();
    assert_eq!(bars.len(), 3);

    let samples = test_data::triangular_samples();
    let hist = plotter
        .hist_styled(
            &samples,
            &HistOptions {
                bins: Bins::Count(10),
                ..HistOptions::default()
            },
        )
        .unwrap();
    assert_eq!(
        hist.counts,
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 5.0, 4.0, 3.0, 2.0, 1.0]
    );

    let style = plotter.style().unwrap();
    assert_eq!(style.cycle_index(), 4);
}

#[test]
fn test_facade_style_context() {
    let mut plotter = Plotter::new(RecordingBackend::new());
    plotter.style().unwrap();
    let before = plotter.rc_params().clone();

    {
        let overrides = RcParams::new().with("font.size", 11);
        let mut guard = plotter.style_context("nature", &overrides).unwrap();
        assert_eq!(guard.rc_params().get_f64("font.size"), Some(11.0));
        assert_eq!(guard.rc_params().get_f64("lines.linewidth"), Some(1.0));
        guard
            .plot_curve(&[0.0, 1.0], &[0.0, 1.0], &CurveOptions::default())
            .unwrap();
    }

    assert_eq!(plotter.rc_params(), &before);
    assert!(plotter.style_context("glossy", &RcParams::new()).is_err());
    assert_eq!(plotter.rc_params(), &before);
}

#[test]
fn test_session_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"style": {{"palette_name": "okabe_ito", "palette_size": 4, "font_size_medium": 9}}}}"#
    )
    .unwrap();

    let config = Config::load_from_file(file.path()).unwrap();
    config.validate().unwrap();

    let mut backend = RecordingBackend::new();
    let style = StyleSession::for_target(config.style, &mut backend).unwrap();
    assert_eq!(style.palette().len(), 4);
    assert_eq!(style.palette().scheme(), "okabe_ito");
    assert_eq!(backend.rc_params().get_f64("font.size"), Some(9.0));
    assert_eq!(backend.rc_params().get_f64("axes.titlesize"), Some(13.0));
}
