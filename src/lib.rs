//! # pltx
//!
//! Publication-quality styling on top of a plotting backend.
//!
//! pltx renders nothing itself. It supplies curated color palettes, named
//! style presets for the backend's global configuration, consistent axis and
//! legend formatting, and layered curve drawing (outline, main line,
//! centerline) with optional progressive line widths.
//!
//! ## Key Features
//!
//! - **Palettes**: fixed-size color lists sampled from sequential, diverging
//!   and qualitative schemes, with checked and wrapping access
//! - **Style presets**: `default`, `nature`, `presentation` and `poster`
//!   dictionaries, applied globally or for a scope
//! - **Style sessions**: an auto-cycling color counter and styled draws for
//!   curves, scatter, error bars, bars and histograms
//!
//! ## Architecture
//!
//! - **Backend seam**: the [`backend::Axes`] and [`backend::Backend`] traits;
//!   [`backend::RecordingBackend`] keeps every draw in memory
//! - **Styling**: [`palette`], [`rcparams`] and [`style`]
//! - **Facade**: [`plotter::Plotter`] owns a backend and a lazily created
//!   default session

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod logging;
pub mod palette;
pub mod plotter;
pub mod rcparams;
pub mod schemes;
pub mod style;

pub use backend::{Axes, Backend, RecordingAxes, RecordingBackend};
pub use color::{Color, Rgb, Rgba};
pub use config::{Config, StyleConfig};
pub use error::{PltxError, Result};
pub use logging::{init_tracing, log_error, log_operation_end, log_operation_start, log_timed_operation};
pub use palette::{cycle_color, get_color, set_default_palette, Palette};
pub use plotter::Plotter;
pub use rcparams::{
    apply_rcparams, apply_style_preset, style_context, with_style, ParamValue, RcParams, RcTarget,
    StyleGuard, StylePreset,
};
pub use style::{
    AxisOptions, BarOptions, CurveOptions, ErrorBarOptions, HighlightRegion, HistOptions,
    ReferenceLines, ScatterOptions, StyleSession,
};
