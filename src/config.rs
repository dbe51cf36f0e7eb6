//! Configuration management for pltx.
//!
//! Style sessions are built from a [`StyleConfig`]. The `pltx` binary layers
//! its configuration with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PltxError, Result};
use crate::palette::{DEFAULT_PALETTE, DEFAULT_SIZE};
use crate::rcparams::{FONT_SIZE_LARGE, FONT_SIZE_MEDIUM};

/// Command-line arguments for pltx
#[derive(Parser, Debug)]
#[command(name = "pltx")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, env = "PLTX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Color scheme for the session palette
    #[arg(short, long, global = true)]
    pub palette: Option<String>,

    /// Number of colors in the session palette
    #[arg(short = 'n', long, global = true)]
    pub palette_size: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PLTX_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the session palette
    Palette {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Hex)]
        format: OutputFormat,
    },
    /// Print a style preset as JSON
    Preset {
        /// default, nature, presentation or poster
        name: String,

        /// Override a parameter, e.g. `--set font.size=9`
        #[arg(long = "set", value_parser = parse_key_value)]
        overrides: Vec<(String, String)>,
    },
    /// List the known color schemes
    Schemes,
    /// Print the line-width progression of the session
    Widths {
        /// Number of lines
        #[arg(long, default_value_t = 6)]
        count: usize,

        /// Base width, overriding the configuration
        #[arg(long)]
        base: Option<f64>,

        /// Progression factor, overriding the configuration
        #[arg(long)]
        factor: Option<f64>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Hex,
    Json,
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))
}

/// Parameters of a style session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Name of the color scheme
    #[serde(default = "default_palette_name")]
    pub palette_name: String,

    /// Number of colors in the palette
    #[serde(default = "default_palette_size")]
    pub palette_size: usize,

    /// Standard font size for labels and ticks
    #[serde(default = "default_font_size_medium")]
    pub font_size_medium: f64,

    /// Font size for titles
    #[serde(default = "default_font_size_large")]
    pub font_size_large: f64,

    /// Whether text is rendered through LaTeX
    #[serde(default)]
    pub use_tex: bool,

    /// Apply the global style as soon as the session is created
    #[serde(default = "default_true")]
    pub auto_apply: bool,

    /// Give each palette index a progressively thicker line
    #[serde(default)]
    pub vary_linewidth: bool,

    /// Line width used when a draw does not request one
    #[serde(default = "default_base_linewidth")]
    pub base_linewidth: f64,

    /// Width multiplier per palette index when `vary_linewidth` is set
    #[serde(default = "default_progression_factor")]
    pub linewidth_progression_factor: f64,
}

impl StyleConfig {
    /// Validate the style parameters
    pub fn validate(&self) -> Result<()> {
        if self.palette_size == 0 {
            return Err(PltxError::Config {
                message: "Palette size must be at least 1".to_string(),
            });
        }

        for (name, value) in [
            ("font_size_medium", self.font_size_medium),
            ("font_size_large", self.font_size_large),
            ("base_linewidth", self.base_linewidth),
            ("linewidth_progression_factor", self.linewidth_progression_factor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PltxError::Config {
                    message: format!("{} must be a positive number, got {}", name, value),
                });
            }
        }

        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette_name: default_palette_name(),
            palette_size: default_palette_size(),
            font_size_medium: default_font_size_medium(),
            font_size_large: default_font_size_large(),
            use_tex: false,
            auto_apply: true,
            vary_linewidth: false,
            base_linewidth: default_base_linewidth(),
            linewidth_progression_factor: default_progression_factor(),
        }
    }
}

/// Complete configuration for the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Style session configuration
    #[serde(default)]
    pub style: StyleConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        let args = Args::parse();
        let config = Self::from_args(&args)?;
        Ok((config, args.command))
    }

    /// Build configuration from already-parsed arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = Config::default();

        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        if let Some(palette) = &args.palette {
            config.style.palette_name = palette.clone();
        }
        if let Some(size) = args.palette_size {
            config.style.palette_size = size;
        }
        if let Some(log_level) = &args.log_level {
            config.log_level = log_level.clone();
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        self.style = other.style;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.style.validate()?;

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(PltxError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: StyleConfig::default(),
            log_level: default_log_level(),
        }
    }
}

// Default value functions for serde
fn default_palette_name() -> String {
    DEFAULT_PALETTE.to_string()
}

fn default_palette_size() -> usize {
    DEFAULT_SIZE
}

fn default_font_size_medium() -> f64 {
    FONT_SIZE_MEDIUM
}

fn default_font_size_large() -> f64 {
    FONT_SIZE_LARGE
}

fn default_true() -> bool {
    true
}

fn default_base_linewidth() -> f64 {
    2.0
}

fn default_progression_factor() -> f64 {
    1.3
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.style.palette_name, "plasma_r");
        assert_eq!(config.style.palette_size, 10);
        assert_eq!(config.style.base_linewidth, 2.0);
        assert_eq!(config.style.linewidth_progression_factor, 1.3);
        assert!(config.style.auto_apply);
        assert!(!config.style.vary_linewidth);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"style": {"palette_name": "viridis", "vary_linewidth": true}}"#)
                .unwrap();
        assert_eq!(config.style.palette_name, "viridis");
        assert!(config.style.vary_linewidth);
        assert_eq!(config.style.palette_size, 10);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"style": {{"palette_size": 4}}, "log_level": "debug"}}"#).unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.style.palette_size, 4);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_args_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"style": {{"palette_name": "magma", "palette_size": 4}}}}"#).unwrap();

        let args = Args::try_parse_from([
            "pltx",
            "--config",
            file.path().to_str().unwrap(),
            "-n",
            "7",
            "schemes",
        ])
        .unwrap();
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.style.palette_name, "magma");
        assert_eq!(config.style.palette_size, 7);
        assert_eq!(args.command, Command::Schemes);
    }

    #[test]
    fn test_file_log_level_survives_without_flag() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level": "debug"}}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let args = Args::try_parse_from(["pltx", "--config", path, "schemes"]).unwrap();
        assert_eq!(Config::from_args(&args).unwrap().log_level, "debug");

        let args =
            Args::try_parse_from(["pltx", "--config", path, "--log-level", "error", "schemes"])
                .unwrap();
        assert_eq!(Config::from_args(&args).unwrap().log_level, "error");

        let args = Args::try_parse_from(["pltx", "schemes"]).unwrap();
        assert_eq!(Config::from_args(&args).unwrap().log_level, "warn");
    }

    #[test]
    fn test_preset_overrides_parse() {
        let args =
            Args::try_parse_from(["pltx", "preset", "nature", "--set", "font.size=9"]).unwrap();
        assert_eq!(
            args.command,
            Command::Preset {
                name: "nature".to_string(),
                overrides: vec![("font.size".to_string(), "9".to_string())],
            }
        );
        assert!(Args::try_parse_from(["pltx", "preset", "nature", "--set", "font.size"]).is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.style.palette_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.style.linewidth_progression_factor = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.style.base_linewidth = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }
}
