// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application configuration management.
//!
//! This module handles persistent configuration storage using TOML format.
//! It holds the link constants and coverage grid layout fed to the
//! propagation model, the slider positions the window opens with, and a few
//! UI preferences. Live slider positions are never written back.

use std::path::{Path, PathBuf};

use log::warn;
use propagation::sample::{DEFAULT_DISTANCE_KM, DEFAULT_RSSI_DBM, DEFAULT_SINR_DB};
use propagation::{GridSpec, HataParams, PropagationEvaluator, SignalSample};
use serde::{Deserialize, Serialize};

/// Application name used for the config directory
pub const APP_NAME: &str = "coverage-analyzer";

/// Config file stem inside the config directory
pub const CONFIG_NAME: &str = "config";

/// Current configuration schema version
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// RSSI slider position at start-up (dBm)
    #[serde(default = "default_rssi_dbm")]
    pub default_rssi_dbm: f64,

    /// SINR slider position at start-up (dB)
    #[serde(default = "default_sinr_db")]
    pub default_sinr_db: f64,

    /// Distance slider position at start-up (km)
    #[serde(default = "default_distance_km")]
    pub default_distance_km: f64,

    /// Show the technical details footer
    #[serde(default = "default_true")]
    pub show_technical_details: bool,

    /// Initial window width in pixels
    #[serde(default = "default_window_width")]
    pub window_width: f32,

    /// Initial window height in pixels
    #[serde(default = "default_window_height")]
    pub window_height: f32,

    /// Okumura-Hata link constants
    #[serde(default)]
    pub model: HataParams,

    /// Coverage heatmap lattice
    #[serde(default)]
    pub grid: GridSpec,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    CONFIG_VERSION
}

fn default_rssi_dbm() -> f64 {
    DEFAULT_RSSI_DBM
}

fn default_sinr_db() -> f64 {
    DEFAULT_SINR_DB
}

fn default_distance_km() -> f64 {
    DEFAULT_DISTANCE_KM
}

fn default_true() -> bool {
    true
}

fn default_window_width() -> f32 {
    1400.0
}

fn default_window_height() -> f32 {
    900.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            default_rssi_dbm: DEFAULT_RSSI_DBM,
            default_sinr_db: DEFAULT_SINR_DB,
            default_distance_km: DEFAULT_DISTANCE_KM,
            show_technical_details: true,
            window_width: default_window_width(),
            window_height: default_window_height(),
            model: HataParams::default(),
            grid: GridSpec::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Load configuration from an explicit file path
    pub fn load_path(path: &Path) -> Result<Self, confy::ConfyError> {
        confy::load_path(path)
    }

    /// Load from `path` (or the default location), falling back to built-in
    /// defaults when the file cannot be read or parsed
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) => Self::load_path(path),
            None => Self::load(),
        };

        match result {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load configuration, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Slider positions the window opens with, normalized into range
    pub fn initial_sample(&self) -> SignalSample {
        SignalSample::new(
            self.default_rssi_dbm,
            self.default_sinr_db,
            self.default_distance_km,
        )
        .clamped()
    }

    /// Build the evaluator from the configured constants.
    ///
    /// Invalid constants or grid layouts are logged and replaced with the
    /// built-in defaults so the UI always has something to show.
    pub fn evaluator(&self) -> PropagationEvaluator {
        match PropagationEvaluator::new(self.model, self.grid) {
            Ok(evaluator) => evaluator,
            Err(e) => {
                warn!("Invalid propagation settings in config ({e}), using defaults");
                PropagationEvaluator::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.config_version, CONFIG_VERSION);
        assert_eq!(config.initial_sample(), SignalSample::default());
        assert_eq!(config.grid.size, 50);
        assert_eq!(config.evaluator(), PropagationEvaluator::default());
    }

    #[test]
    fn test_initial_sample_is_clamped() {
        let config = AppConfig {
            default_rssi_dbm: -10.0,
            default_distance_km: 50.0,
            ..Default::default()
        };
        let sample = config.initial_sample();
        assert_eq!(sample.rssi_dbm, -50.0);
        assert_eq!(sample.distance_km, 10.0);
    }

    #[test]
    fn test_invalid_model_falls_back() {
        let config = AppConfig {
            model: HataParams {
                carrier_freq_ghz: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.evaluator(), PropagationEvaluator::default());
    }

    #[test]
    fn test_custom_grid_is_kept() {
        let config = AppConfig {
            grid: GridSpec {
                size: 20,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.evaluator().grid_spec().size, 20);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Older files may lack whole sections; serde defaults fill them in
        let config: AppConfig =
            serde_json::from_str(r#"{ "default_sinr_db": 25.0, "grid": { "size": 10 } }"#)
                .unwrap();
        assert_eq!(config.default_sinr_db, 25.0);
        assert_eq!(config.default_rssi_dbm, DEFAULT_RSSI_DBM);
        assert_eq!(config.grid.size, 10);
        assert_eq!(config.grid.center_lat, 47.5);
        assert_eq!(config.model, HataParams::default());
    }
}
