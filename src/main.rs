//! pltx - palettes, style presets and line-width progressions from the command line
//!
//! This is the main entry point for the pltx binary.

use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{error, info};

use pltx::config::{Command, OutputFormat};
use pltx::rcparams::{apply_style_preset, ParamValue, RcParams};
use pltx::schemes::{available_schemes, CATEGORICAL_PALETTES, DIVERGING_PALETTES, SEQUENTIAL_PALETTES};
use pltx::{
    init_tracing, log_error, log_operation_end, log_operation_start, Config, StyleConfig,
    StyleSession,
};

fn main() -> Result<()> {
    let (config, command) = Config::load().context("Failed to load configuration")?;

    config.validate().map_err(|e| {
        eprintln!("Invalid configuration: {}", e);
        e
    })?;

    init_tracing(&config.log_level);
    info!("Starting pltx v{}", env!("CARGO_PKG_VERSION"));

    let name = command_name(&command);
    let details = format!("{:?}", command);
    let start = Instant::now();
    log_operation_start(name, Some(&details));

    let result = run(&config, command);
    log_operation_end(name, start, result.is_ok());

    result.map_err(|e| {
        error!("Command failed: {:#}", e);
        e
    })
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Palette { .. } => "palette",
        Command::Preset { .. } => "preset",
        Command::Schemes => "schemes",
        Command::Widths { .. } => "widths",
    }
}

fn run(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Palette { format } => print_palette(&config.style, format),
        Command::Preset { name, overrides } => print_preset(&name, &overrides),
        Command::Schemes => {
            print_group("sequential", SEQUENTIAL_PALETTES);
            print_group("diverging", DIVERGING_PALETTES);
            print_group("categorical", CATEGORICAL_PALETTES);
            print_group("all", available_schemes());
            Ok(())
        }
        Command::Widths {
            count,
            base,
            factor,
        } => {
            // The command exists to show the progression, so it is always on
            let style = StyleConfig {
                vary_linewidth: true,
                base_linewidth: base.unwrap_or(config.style.base_linewidth),
                linewidth_progression_factor: factor
                    .unwrap_or(config.style.linewidth_progression_factor),
                ..config.style.clone()
            };
            print_widths(style, count)
        }
    }
}

fn print_palette(style: &StyleConfig, format: OutputFormat) -> Result<()> {
    let session = StyleSession::new(style.clone()).map_err(|e| {
        log_error(&e, "building palette");
        e
    })?;
    let palette = session.palette();

    match format {
        OutputFormat::Hex => {
            println!("{}", palette);
            for (i, color) in palette.iter().enumerate() {
                println!("{:>3}  {}", i, color.to_hex());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(palette).context("Failed to encode palette")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn print_preset(name: &str, overrides: &[(String, String)]) -> Result<()> {
    let overrides: RcParams = overrides
        .iter()
        .map(|(key, value)| (key.clone(), ParamValue::parse_loose(value)))
        .collect();

    let mut params = RcParams::new();
    apply_style_preset(&mut params, name, &overrides)
        .with_context(|| format!("Cannot apply preset '{}'", name))?;

    let json = serde_json::to_string_pretty(&params).context("Failed to encode preset")?;
    println!("{}", json);
    Ok(())
}

fn print_group(title: &str, names: &[&str]) {
    println!("{}: {}", title, names.join(", "));
}

fn print_widths(style: StyleConfig, count: usize) -> Result<()> {
    let session = StyleSession::new(style).context("Invalid width settings")?;
    for idx in 0..count {
        println!("{:>3}  {:.3}", idx, session.line_width(idx, None));
    }
    Ok(())
}
