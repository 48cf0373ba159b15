//! Configuration for invcache.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::InvResult;

/// Main configuration for invcache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Solver settings.
    #[serde(default)]
    pub solver: SolverConfig,

    /// Output settings for the CLI.
    #[serde(default)]
    pub output: OutputConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Linear solver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Elimination method.
    #[serde(default)]
    pub method: SolverMethod,

    /// Relative pivot tolerance: a pivot counts as zero when its magnitude is
    /// at or below `tolerance * n * max|a_ij|`.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: SolverMethod::default(),
            tolerance: default_tolerance(),
        }
    }
}

fn default_tolerance() -> f64 {
    1e-12
}

/// Available solvers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverMethod {
    /// Gauss-Jordan elimination on the augmented matrix.
    GaussJordan,
    /// LU decomposition with partial pivoting, backed by `nalgebra`.
    #[default]
    Lu,
}

impl std::fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverMethod::GaussJordan => write!(f, "gauss_jordan"),
            SolverMethod::Lu => write!(f, "lu"),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Decimal places when printing matrices as text.
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Output format (text, json).
    #[serde(default = "default_output_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            format: default_output_format(),
        }
    }
}

fn default_precision() -> usize {
    6
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> InvResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> InvResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            solver: SolverConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("invcache.toml").unwrap_or_else(|_| Self::default_config())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
