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

//! Stylized SINR to throughput mapping.
//!
//! `throughput = 100 * erf(sinr / 10)` Mbps. The error function is only used
//! as a convenient saturating shape; this is not a calibrated link model.

use serde::{Deserialize, Serialize};

/// Saturation level of the curve in Mbps.
pub const PEAK_THROUGHPUT_MBPS: f64 = 100.0;
/// SINR divisor inside the error function, in dB.
pub const SINR_SCALE_DB: f64 = 10.0;
/// First SINR sample of the fixed curve (dB).
pub const CURVE_START_DB: i32 = -10;
/// Last SINR sample of the fixed curve (dB, inclusive).
pub const CURVE_END_DB: i32 = 30;

/// Estimated throughput in Mbps for a SINR in dB.
///
/// Odd, monotonically increasing, bounded in (-100, 100).
#[must_use]
pub fn throughput_estimate(sinr_db: f64) -> f64 {
    PEAK_THROUGHPUT_MBPS * libm::erf(sinr_db / SINR_SCALE_DB)
}

/// A single (SINR, throughput) point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputPoint {
    pub sinr_db: f64,
    pub throughput_mbps: f64,
}

impl ThroughputPoint {
    #[must_use]
    pub fn at(sinr_db: f64) -> Self {
        Self {
            sinr_db,
            throughput_mbps: throughput_estimate(sinr_db),
        }
    }
}

/// The fixed integer-SINR curve plus the highlighted live sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputCurve {
    /// Integer SINR samples, `CURVE_START_DB..=CURVE_END_DB`.
    pub sinr_db: Vec<i32>,
    /// Throughput for each entry of `sinr_db`.
    pub throughput_mbps: Vec<f64>,
    /// The current slider position.
    pub current: ThroughputPoint,
}

impl ThroughputCurve {
    /// Sample the fixed curve and mark `current_sinr_db`.
    #[must_use]
    pub fn sample(current_sinr_db: f64) -> Self {
        let sinr_db: Vec<i32> = (CURVE_START_DB..=CURVE_END_DB).collect();
        let throughput_mbps = sinr_db
            .iter()
            .map(|&s| throughput_estimate(f64::from(s)))
            .collect();

        Self {
            sinr_db,
            throughput_mbps,
            current: ThroughputPoint::at(current_sinr_db),
        }
    }

    /// Number of curve samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinr_db.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinr_db.is_empty()
    }

    /// Iterate the curve as `[x, y]` pairs ready for plotting.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.sinr_db
            .iter()
            .zip(&self.throughput_mbps)
            .map(|(&s, &t)| [f64::from(s), t])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sinr_is_zero_throughput() {
        assert_eq!(throughput_estimate(0.0), 0.0);
    }

    #[test]
    fn test_default_sinr() {
        // 100 * erf(1.5)
        let t = throughput_estimate(15.0);
        assert!((t - 96.61).abs() < 0.01, "t = {t}");
    }

    #[test]
    fn test_odd_and_monotone() {
        let mut previous = throughput_estimate(-40.0);
        for tenth in -399..=400 {
            let s = f64::from(tenth) / 10.0;
            let t = throughput_estimate(s);
            assert!((t + throughput_estimate(-s)).abs() < 1e-9);
            assert!(t >= previous);
            previous = t;
        }
    }

    #[test]
    fn test_saturation() {
        assert!((throughput_estimate(100.0) - 100.0).abs() < 1e-6);
        assert!((throughput_estimate(-100.0) + 100.0).abs() < 1e-6);
        assert!(throughput_estimate(30.0) < 100.0);
        assert!(throughput_estimate(-10.0) > -100.0);
    }

    #[test]
    fn test_curve_shape() {
        let curve = ThroughputCurve::sample(15.0);
        assert_eq!(curve.len(), 41);
        assert_eq!(curve.sinr_db.first(), Some(&-10));
        assert_eq!(curve.sinr_db.last(), Some(&30));
        assert_eq!(curve.throughput_mbps[10], 0.0);
        assert_eq!(curve.current.sinr_db, 15.0);
        assert_eq!(curve.current.throughput_mbps, throughput_estimate(15.0));
        assert_eq!(curve.points().count(), 41);
    }
}
