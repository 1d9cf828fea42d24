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

//! Okumura-Hata urban path-loss approximation.

use serde::{Deserialize, Serialize};

use super::{PathLossModel, PropagationError};

/// Default carrier frequency in GHz (n78 mid-band).
pub const DEFAULT_CARRIER_FREQ_GHZ: f64 = 3.5;
/// Default base-station antenna height in metres.
pub const DEFAULT_TX_HEIGHT_M: f64 = 30.0;
/// Default handset antenna height in metres.
pub const DEFAULT_RX_HEIGHT_M: f64 = 1.5;

/// Fixed link constants for the Okumura-Hata formula.
///
/// ```text
/// a1 = 69.55 + 26.16*log10(fc) - 13.82*log10(ht)
/// a2 = (44.9 - 6.55*log10(ht)) * log10(d)
/// L  = a1 + a2 - 6.55*log10(hr) + 26.16
/// ```
///
/// The carrier is taken in GHz as-is; no MHz conversion or range clamping is
/// applied to the constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HataParams {
    /// Carrier frequency in GHz.
    #[serde(default = "default_carrier_freq_ghz")]
    pub carrier_freq_ghz: f64,

    /// Transmitter (base station) antenna height in metres.
    #[serde(default = "default_tx_height_m")]
    pub tx_height_m: f64,

    /// Receiver (handset) antenna height in metres.
    #[serde(default = "default_rx_height_m")]
    pub rx_height_m: f64,
}

fn default_carrier_freq_ghz() -> f64 {
    DEFAULT_CARRIER_FREQ_GHZ
}

fn default_tx_height_m() -> f64 {
    DEFAULT_TX_HEIGHT_M
}

fn default_rx_height_m() -> f64 {
    DEFAULT_RX_HEIGHT_M
}

impl Default for HataParams {
    fn default() -> Self {
        Self {
            carrier_freq_ghz: DEFAULT_CARRIER_FREQ_GHZ,
            tx_height_m: DEFAULT_TX_HEIGHT_M,
            rx_height_m: DEFAULT_RX_HEIGHT_M,
        }
    }
}

impl HataParams {
    /// Check that every constant is positive and finite.
    pub fn validate(&self) -> Result<(), PropagationError> {
        let fields = [
            ("carrier_freq_ghz", self.carrier_freq_ghz),
            ("tx_height_m", self.tx_height_m),
            ("rx_height_m", self.rx_height_m),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(PropagationError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Distance-independent part of the loss (everything except `a2`).
    #[must_use]
    pub fn intercept_db(&self) -> f64 {
        let log_ht = self.tx_height_m.log10();
        let a1 = 69.55 + 26.16 * self.carrier_freq_ghz.log10() - 13.82 * log_ht;
        a1 - 6.55 * self.rx_height_m.log10() + 26.16
    }

    /// Loss added per decade of distance, in dB.
    #[must_use]
    pub fn slope_db_per_decade(&self) -> f64 {
        44.9 - 6.55 * self.tx_height_m.log10()
    }
}

impl PathLossModel for HataParams {
    fn loss_at(&self, distance_km: f64) -> f64 {
        self.intercept_db() + self.slope_db_per_decade() * distance_km.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_distance_loss() {
        // Direct substitution at fc=3.5 GHz, ht=30 m, hr=1.5 m, d=2 km
        let loss = HataParams::default().path_loss(2.0);
        assert!((loss - 98.979).abs() < 0.01, "loss = {loss}");
    }

    #[test]
    fn test_matches_written_formula() {
        let p = HataParams::default();
        let d: f64 = 4.2;
        let a1 = 69.55 + 26.16 * 3.5_f64.log10() - 13.82 * 30.0_f64.log10();
        let a2 = (44.9 - 6.55 * 30.0_f64.log10()) * d.log10();
        let expected = a1 + a2 - 6.55 * 1.5_f64.log10() + 26.16;
        assert!((p.path_loss(d) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_strictly_increasing_over_range() {
        let p = HataParams::default();
        let mut previous = p.path_loss(0.01);
        for step in 2..=1000 {
            let d = f64::from(step) * 0.01;
            let loss = p.path_loss(d);
            assert!(loss.is_finite());
            assert!(loss > previous, "not increasing at {d} km");
            previous = loss;
        }
    }

    #[test]
    fn test_strictly_increasing_below_ten_metres() {
        let p = HataParams::default();
        assert!(p.path_loss(0.0008) > p.path_loss(0.0002));

        let mut previous = p.path_loss(1e-5);
        for step in 2..=1000 {
            let d = f64::from(step) * 1e-5;
            let loss = p.path_loss(d);
            assert!(loss.is_finite());
            assert!(loss > previous, "not increasing at {d} km");
            previous = loss;
        }
    }

    #[test]
    fn test_validate() {
        assert!(HataParams::default().validate().is_ok());

        let bad = HataParams {
            tx_height_m: 0.0,
            ..Default::default()
        };
        assert_eq!(
            bad.validate(),
            Err(PropagationError::InvalidParameter {
                name: "tx_height_m",
                value: 0.0
            })
        );

        let bad = HataParams {
            carrier_freq_ghz: f64::NAN,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
