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

//! Input snapshot for one evaluation.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Accepted RSSI range in dBm.
pub const RSSI_RANGE_DBM: RangeInclusive<f64> = -120.0..=-50.0;
/// Accepted SINR range in dB.
pub const SINR_RANGE_DB: RangeInclusive<f64> = -10.0..=30.0;
/// Accepted distance range in km.
pub const DISTANCE_RANGE_KM: RangeInclusive<f64> = 0.1..=10.0;

pub const DEFAULT_RSSI_DBM: f64 = -85.0;
pub const DEFAULT_SINR_DB: f64 = 15.0;
pub const DEFAULT_DISTANCE_KM: f64 = 2.0;

/// The three user-controlled inputs, passed by value into the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    /// Raw received signal strength indicator in dBm.
    pub rssi_dbm: f64,
    /// Signal-to-interference-plus-noise ratio in dB.
    pub sinr_db: f64,
    /// Distance from the base station in km.
    pub distance_km: f64,
}

impl Default for SignalSample {
    fn default() -> Self {
        Self {
            rssi_dbm: DEFAULT_RSSI_DBM,
            sinr_db: DEFAULT_SINR_DB,
            distance_km: DEFAULT_DISTANCE_KM,
        }
    }
}

impl SignalSample {
    #[must_use]
    pub fn new(rssi_dbm: f64, sinr_db: f64, distance_km: f64) -> Self {
        Self {
            rssi_dbm,
            sinr_db,
            distance_km,
        }
    }

    /// Normalize every field into its accepted range.
    ///
    /// Out-of-range values are clamped to the nearest bound; NaN falls back to
    /// the field default.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            rssi_dbm: clamp_or_default(self.rssi_dbm, &RSSI_RANGE_DBM, DEFAULT_RSSI_DBM),
            sinr_db: clamp_or_default(self.sinr_db, &SINR_RANGE_DB, DEFAULT_SINR_DB),
            distance_km: clamp_or_default(
                self.distance_km,
                &DISTANCE_RANGE_KM,
                DEFAULT_DISTANCE_KM,
            ),
        }
    }

    /// Whether every field already lies in its accepted range.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        RSSI_RANGE_DBM.contains(&self.rssi_dbm)
            && SINR_RANGE_DB.contains(&self.sinr_db)
            && DISTANCE_RANGE_KM.contains(&self.distance_km)
    }
}

fn clamp_or_default(value: f64, range: &RangeInclusive<f64>, default: f64) -> f64 {
    if value.is_nan() {
        default
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
