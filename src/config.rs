use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::normalize::MissingPayload;
use crate::error::{DashError, Result};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "LAUNCH_DASH_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub missing_payload: MissingPayload,
    // payload range slider
    pub slider_min: f64,
    pub slider_max: f64,
    pub slider_step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("assets/spacex_launch_data.csv"),
            missing_payload: MissingPayload::Keep,
            slider_min: 0.0,
            slider_max: 10000.0,
            slider_step: 1000.0,
        }
    }
}

impl DashboardConfig {
    /// Defaults, overlaid by the file named in `LAUNCH_DASH_CONFIG` (if set),
    /// then by the first command-line argument as the dataset path.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(path) = std::env::args_os().nth(1) {
            config.data_path = PathBuf::from(path);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DashError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| DashError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.slider_min < self.slider_max) {
            return Err(DashError::InvalidConfig(format!(
                "slider_min ({}) must be below slider_max ({})",
                self.slider_min, self.slider_max
            )));
        }
        if !(self.slider_step > 0.0) {
            return Err(DashError::InvalidConfig(format!(
                "slider_step must be positive, got {}",
                self.slider_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_slider() {
        let config = DashboardConfig::default();
        assert_eq!(config.slider_min, 0.0);
        assert_eq!(config.slider_max, 10000.0);
        assert_eq!(config.slider_step, 1000.0);
        assert_eq!(config.missing_payload, MissingPayload::Keep);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = DashboardConfig::from_json(
            r#"{"data_path": "launches.json", "missing_payload": "negative_infinity"}"#,
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("launches.json"));
        assert_eq!(config.missing_payload, MissingPayload::NegativeInfinity);
        assert_eq!(config.slider_max, 10000.0);
    }

    #[test]
    fn inverted_slider_is_rejected() {
        let err = DashboardConfig::from_json(r#"{"slider_min": 5000, "slider_max": 100}"#)
            .unwrap_err();
        assert!(matches!(err, DashError::InvalidConfig(_)));
        assert!(DashboardConfig::from_json(r#"{"slider_step": 0}"#).is_err());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(DashboardConfig::from_json(r#"{"missing_payload": "zero"}"#).is_err());
    }
}
