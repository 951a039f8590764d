//! CLI argument parsing for the pytrack report viewer

use crate::config::{TrackerConfig, DEFAULT_TRACKER_NAME};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    Text,
    /// Snapshot JSON for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "pytrack")]
#[command(version)]
#[command(about = "Report on a saved PyTrack snapshot as text, JSON or charts", long_about = None)]
pub struct Cli {
    /// Snapshot JSON written by Tracker::save
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Draw call-count and average-time bar charts on the terminal
    #[arg(long = "plot")]
    pub plot: bool,

    /// Write the bar charts to an SVG file instead of the terminal
    #[arg(long = "plot-output", value_name = "PATH")]
    pub plot_output: Option<PathBuf>,

    /// Override the tracker name stored in the snapshot
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// TOML configuration file (report name, chart dimensions and colours)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// True when any chart output was requested
    pub fn wants_plot(&self) -> bool {
        self.plot || self.plot_output.is_some()
    }

    /// Name shown in the report
    ///
    /// `--name` wins, then a `name` set in the `--config` file, then the
    /// name stored in the snapshot. A config that leaves `name` at its
    /// default does not override the snapshot.
    pub fn report_name(&self, config: Option<&TrackerConfig>, snapshot_name: &str) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match config {
            Some(config) if config.name != DEFAULT_TRACKER_NAME => config.name.clone(),
            _ => snapshot_name.to_string(),
        }
    }
}
