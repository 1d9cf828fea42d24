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

//! Cellular propagation library for coverage analysis.
//!
//! This crate holds the numerical core of the coverage analyzer. Every
//! operation is a pure function of its inputs and a handful of fixed link
//! constants, so results can be recomputed freely on every input change.
//!
//! - **Model layer**: the [`PathLossModel`] seam and the Okumura-Hata urban
//!   approximation ([`HataParams`])
//! - **Quality layer**: derived-power tiers plus the raw RSSI/SINR badges
//! - **Grid layer**: a synthetic single-transmitter coverage surface
//! - **Throughput layer**: the stylized `100 * erf(sinr / 10)` curve
//!
//! # Quick Start
//!
//! ```
//! use propagation::{PropagationEvaluator, QualityTier, SignalSample};
//!
//! let evaluator = PropagationEvaluator::default();
//! let analysis = evaluator.evaluate(SignalSample::default());
//!
//! assert!((analysis.link.path_loss_db - 98.98).abs() < 0.01);
//! assert_eq!(analysis.link.quality, QualityTier::Poor);
//! assert!((analysis.throughput_mbps - 96.61).abs() < 0.01);
//! ```
//!
//! # Coverage Grid
//!
//! ```
//! use propagation::{evaluate_grid, GridSpec, HataParams};
//!
//! let grid = evaluate_grid(&HataParams::default(), &GridSpec::default()).unwrap();
//! assert_eq!((grid.rows(), grid.cols()), (50, 50));
//! ```

pub mod grid;
pub mod model;
pub mod quality;
pub mod sample;
pub mod throughput;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

pub use grid::{evaluate_grid, linspace, CoverageGrid, GridCell, GridSpec};
pub use model::{
    clamp_distance, received_power_from_loss, HataParams, PathLossModel, PropagationError,
    MIN_DISTANCE_KM, RX_REFERENCE_DBM,
};
pub use quality::{classify_quality, rssi_badge, sinr_badge, QualityTier, RssiBadge, SinrBadge};
pub use sample::SignalSample;
pub use throughput::{throughput_estimate, ThroughputCurve, ThroughputPoint};

/// Link prediction at a single distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathLossResult {
    /// Distance actually fed to the model, after clamping.
    pub distance_km: f64,
    /// Okumura-Hata path loss in dB.
    pub path_loss_db: f64,
    /// Predicted received power in dBm.
    pub received_power_dbm: f64,
    /// Tier of the predicted received power.
    pub quality: QualityTier,
}

/// Every scalar the analyzer shows for one input sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// The normalized input the figures were computed from.
    pub sample: SignalSample,
    /// Path loss, received power and quality tier.
    pub link: PathLossResult,
    /// Badge for the raw RSSI value.
    pub rssi_badge: RssiBadge,
    /// Badge for the raw SINR value.
    pub sinr_badge: SinrBadge,
    /// Estimated throughput at the sample's SINR, in Mbps.
    pub throughput_mbps: f64,
}

/// Stateless evaluator bundling the link constants and grid layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropagationEvaluator {
    model: HataParams,
    grid: GridSpec,
}

impl PropagationEvaluator {
    /// Create an evaluator, validating the model constants and grid layout.
    pub fn new(model: HataParams, grid: GridSpec) -> Result<Self, PropagationError> {
        model.validate()?;
        grid.validate()?;
        Ok(Self { model, grid })
    }

    #[must_use]
    pub fn model(&self) -> &HataParams {
        &self.model
    }

    #[must_use]
    pub fn grid_spec(&self) -> &GridSpec {
        &self.grid
    }

    /// Path loss in dB; non-positive distances are clamped.
    #[must_use]
    pub fn path_loss(&self, distance_km: f64) -> f64 {
        self.model.path_loss(distance_km)
    }

    /// Received power in dBm; non-positive distances are clamped.
    #[must_use]
    pub fn received_power(&self, distance_km: f64) -> f64 {
        self.model.received_power(distance_km)
    }

    /// Full link prediction at one distance.
    #[must_use]
    pub fn link(&self, distance_km: f64) -> PathLossResult {
        let distance_km = clamp_distance(distance_km);
        let path_loss_db = self.model.path_loss(distance_km);
        let received_power_dbm = received_power_from_loss(path_loss_db);

        PathLossResult {
            distance_km,
            path_loss_db,
            received_power_dbm,
            quality: classify_quality(received_power_dbm),
        }
    }

    /// Evaluate one sample. Fields outside their slider range are clamped
    /// first so the result is always finite.
    #[must_use]
    pub fn evaluate(&self, sample: SignalSample) -> Analysis {
        let normalized = sample.clamped();
        if normalized != sample {
            debug!("Normalized out-of-range sample {sample:?} to {normalized:?}");
        }

        let analysis = Analysis {
            sample: normalized,
            link: self.link(normalized.distance_km),
            rssi_badge: rssi_badge(normalized.rssi_dbm),
            sinr_badge: sinr_badge(normalized.sinr_db),
            throughput_mbps: throughput_estimate(normalized.sinr_db),
        };
        trace!("Evaluated {analysis:?}");
        analysis
    }

    /// Coverage surface for the configured grid layout.
    pub fn coverage_grid(&self) -> Result<CoverageGrid, PropagationError> {
        evaluate_grid(&self.model, &self.grid)
    }

    /// Fixed throughput curve with `current_sinr_db` highlighted.
    #[must_use]
    pub fn throughput_curve(&self, current_sinr_db: f64) -> ThroughputCurve {
        ThroughputCurve::sample(current_sinr_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let analysis = PropagationEvaluator::default().evaluate(SignalSample::default());

        assert!((analysis.link.path_loss_db - 98.979).abs() < 0.01);
        assert!((analysis.link.received_power_dbm + 128.979).abs() < 0.01);
        assert_eq!(analysis.link.quality, QualityTier::Poor);
        assert_eq!(analysis.rssi_badge, RssiBadge::Poor);
        assert_eq!(analysis.sinr_badge, SinrBadge::Fair);
        assert!((analysis.throughput_mbps - 96.61).abs() < 0.01);
    }

    #[test]
    fn test_received_power_identity() {
        let evaluator = PropagationEvaluator::default();
        for d in [0.1, 0.25, 1.0, 3.3, 10.0] {
            let link = evaluator.link(d);
            assert_eq!(link.received_power_dbm, -30.0 - link.path_loss_db);
            assert_eq!(link.received_power_dbm, evaluator.received_power(d));
        }
    }

    #[test]
    fn test_quality_across_distance() {
        // Excellent below ~0.081 km, Good up to ~0.217 km, Poor beyond
        let evaluator = PropagationEvaluator::default();
        assert_eq!(evaluator.link(0.05).quality, QualityTier::Excellent);
        assert_eq!(evaluator.link(0.1).quality, QualityTier::Good);
        assert_eq!(evaluator.link(0.2).quality, QualityTier::Good);
        assert_eq!(evaluator.link(0.3).quality, QualityTier::Poor);
    }

    #[test]
    fn test_zero_distance_is_clamped() {
        let evaluator = PropagationEvaluator::default();
        let link = evaluator.link(0.0);
        assert_eq!(link.distance_km, MIN_DISTANCE_KM);
        assert!(link.path_loss_db.is_finite());
    }

    #[test]
    fn test_evaluate_normalizes_sample() {
        let evaluator = PropagationEvaluator::default();
        let analysis = evaluator.evaluate(SignalSample::new(-40.0, f64::NAN, 0.0));

        assert_eq!(analysis.sample.rssi_dbm, -50.0);
        assert_eq!(analysis.sample.sinr_db, 15.0);
        assert_eq!(analysis.sample.distance_km, 0.1);
        assert_eq!(analysis.rssi_badge, RssiBadge::Good);
        assert!(analysis.link.path_loss_db.is_finite());
    }

    #[test]
    fn test_evaluate_is_pure() {
        let evaluator = PropagationEvaluator::default();
        let a = SignalSample::new(-70.0, 25.0, 0.5);
        let b = SignalSample::new(-110.0, -5.0, 9.0);

        let first = evaluator.evaluate(a);
        let _ = evaluator.evaluate(b);
        assert_eq!(evaluator.evaluate(a), first);
    }

    #[test]
    fn test_new_validates() {
        let bad_model = HataParams {
            rx_height_m: -1.5,
            ..Default::default()
        };
        assert!(PropagationEvaluator::new(bad_model, GridSpec::default()).is_err());

        let bad_grid = GridSpec {
            size: 0,
            ..Default::default()
        };
        assert_eq!(
            PropagationEvaluator::new(HataParams::default(), bad_grid),
            Err(PropagationError::InvalidGridSize(0))
        );

        let evaluator = PropagationEvaluator::new(HataParams::default(), GridSpec::default());
        assert_eq!(evaluator, Ok(PropagationEvaluator::default()));
    }

    #[test]
    fn test_coverage_grid_uses_spec() {
        let spec = GridSpec {
            size: 8,
            ..Default::default()
        };
        let evaluator = PropagationEvaluator::new(HataParams::default(), spec).unwrap();
        let grid = evaluator.coverage_grid().unwrap();
        assert_eq!(grid.rows(), 8);
        assert_eq!(grid.cols(), 8);
    }
}
