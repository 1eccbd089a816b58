//! Application configuration
//! Optional JSON file; command-line values take precedence.

use crate::charts::ChartConfig;
use crate::data::Metric;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Metric '{0}' cannot drive the {1} axis")]
    WrongAxis(Metric, &'static str),
}

/// Initial native window size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1300.0,
            height: 860.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV loaded at startup
    pub data_path: Option<PathBuf>,
    pub initial_x: Metric,
    pub initial_y: Metric,
    pub window: WindowConfig,
    pub chart: ChartConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            initial_x: Metric::Poverty,
            initial_y: Metric::Obesity,
            window: WindowConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        data_path: Option<PathBuf>,
        x: Option<Metric>,
        y: Option<Metric>,
    ) -> Result<Self, ConfigError> {
        if let Some(p) = data_path {
            self.data_path = Some(p);
        }
        if let Some(m) = x {
            self.initial_x = m;
        }
        if let Some(m) = y {
            self.initial_y = m;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        use crate::data::Axis;
        if self.initial_x.axis() != Axis::X {
            return Err(ConfigError::WrongAxis(self.initial_x, "x"));
        }
        if self.initial_y.axis() != Axis::Y {
            return Err(ConfigError::WrongAxis(self.initial_y, "y"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "initial_x": "income", "chart": {{ "margin": 30.0 }} }}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.initial_x, Metric::Income);
        assert_eq!(config.initial_y, Metric::Obesity);
        assert_eq!(config.chart.margin, 30.0);
        assert_eq!(config.chart.label_area, 110.0);
    }

    #[test]
    fn command_line_overrides_file() {
        let config = AppConfig {
            initial_x: Metric::Age,
            ..AppConfig::default()
        }
        .with_overrides(Some("data.csv".into()), Some(Metric::Income), None)
        .unwrap();
        assert_eq!(config.initial_x, Metric::Income);
        assert_eq!(config.data_path, Some(PathBuf::from("data.csv")));
    }

    #[test]
    fn rejects_metric_on_wrong_axis() {
        let err = AppConfig::default()
            .with_overrides(None, Some(Metric::Smokes), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::WrongAxis(Metric::Smokes, "x")));
    }

    #[test]
    fn malformed_json_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
