//! Tracker configuration loaded from TOML
//!
//! # Example pytrack.toml
//!
//! ```toml
//! name = "ingest"
//!
//! [chart]
//! width = 1200
//! panel_height = 400
//! bar_color = "#5cb85c"
//! terminal_width = 40
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::error::TrackError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name used when none is configured
pub const DEFAULT_TRACKER_NAME: &str = "default";

/// Chart rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// SVG width in pixels
    pub width: u32,
    /// Height of each of the two stacked SVG panels in pixels
    pub panel_height: u32,
    /// SVG bar fill colour
    pub bar_color: String,
    /// Length in columns of the longest terminal bar
    pub terminal_width: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            panel_height: 500,
            bar_color: "#4a90d9".to_string(),
            terminal_width: 50,
        }
    }
}

/// Root configuration for pytrack.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Tracker name shown in reports and chart titles
    pub name: String,
    /// Chart settings
    pub chart: ChartConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TRACKER_NAME.to_string(),
            chart: ChartConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a TOML file
    ///
    /// ```no_run
    /// use pytrack::config::TrackerConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = TrackerConfig::from_file("pytrack.toml")?;
    /// println!("Tracker name: {}", config.name);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), TrackError> {
        if self.chart.width == 0 {
            return Err(TrackError::Config("chart.width must be > 0".to_string()));
        }

        if self.chart.panel_height == 0 {
            return Err(TrackError::Config(
                "chart.panel_height must be > 0".to_string(),
            ));
        }

        if self.chart.terminal_width == 0 {
            return Err(TrackError::Config(
                "chart.terminal_width must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
