//! Application configuration.
//!
//! Window geometry and display constants are compiled in. The only runtime
//! setting is an optional file to open at startup, given as the first
//! argument or through `SALARY_LENS_FILE`.

use std::path::PathBuf;

use clap::Parser;

/// Window title.
pub const APP_TITLE: &str = "Salary Lens – Salary Explorer";

/// Initial window size.
pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];

/// Smallest window size.
pub const MIN_WINDOW_SIZE: [f32; 2] = [600.0, 400.0];

/// Name of the trend chart series.
pub const CHART_SERIES_LABEL: &str = "Total Jobs";

/// Trend line colour (teal).
pub const CHART_COLOR: [u8; 3] = [75, 192, 192];

/// Environment variable naming a file to open at startup.
pub const FILE_ENV_VAR: &str = "SALARY_LENS_FILE";

/// Command-line options.
#[derive(Debug, Clone, Default, PartialEq, Parser)]
#[command(name = "salary-lens")]
#[command(about = "Explore salary datasets by year", long_about = None)]
#[command(version)]
pub struct Config {
    /// File loaded before the first frame (.csv, .json or .parquet).
    #[arg(env = FILE_ENV_VAR)]
    pub initial_file: Option<PathBuf>,
}
