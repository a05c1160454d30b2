//! Chart configuration
//! Geometry and behaviour of the chart, optionally read from a JSON file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "scatter.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Plot area must be positive, got {width}x{height}")]
    EmptyPlotArea { width: f64, height: f64 },
    #[error("Marker radius must be positive, got {0}")]
    BadMarkerRadius(f64),
}

/// Space reserved around the plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 40.0,
            bottom: 200.0,
            left: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub svg_width: f64,
    pub svg_height: f64,
    pub margin: Margin,
    /// Axis and marker animation length.
    pub transition_ms: u64,
    pub marker_radius: f64,
    /// Dataset opened at startup.
    pub data_path: PathBuf,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            svg_width: 960.0,
            svg_height: 600.0,
            margin: Margin::default(),
            transition_ms: 1000,
            marker_radius: 10.0,
            data_path: PathBuf::from("assets/data/data.csv"),
        }
    }
}

impl ChartConfig {
    pub fn plot_width(&self) -> f64 {
        self.svg_width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f64 {
        self.svg_height - self.margin.top - self.margin.bottom
    }

    pub fn transition_secs(&self) -> f64 {
        self.transition_ms as f64 / 1000.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.plot_width(), self.plot_height());
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::EmptyPlotArea { width, height });
        }
        if !(self.marker_radius > 0.0) {
            return Err(ConfigError::BadMarkerRadius(self.marker_radius));
        }
        Ok(())
    }

    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: ChartConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config from [`CONFIG_FILE`] when present, defaults otherwise.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            info!(path = CONFIG_FILE, "loading chart config");
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_plot_area() {
        let config = ChartConfig::default();
        assert_eq!(config.plot_width(), 820.0);
        assert_eq!(config.plot_height(), 380.0);
        assert_eq!(config.transition_secs(), 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "transition_ms": 250, "data_path": "states.csv" }}"#).unwrap();
        file.flush().unwrap();

        let config = ChartConfig::from_file(file.path()).unwrap();
        assert_eq!(config.transition_ms, 250);
        assert_eq!(config.data_path, PathBuf::from("states.csv"));
        assert_eq!(config.margin, Margin::default());
    }

    #[test]
    fn margins_larger_than_canvas_are_rejected() {
        let config = ChartConfig {
            svg_height: 150.0,
            ..ChartConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPlotArea { .. })
        ));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();
        assert!(ChartConfig::from_file(file.path()).is_err());
    }
}
