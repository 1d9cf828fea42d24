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

//! Path-loss model layer.
//!
//! This module defines the [`PathLossModel`] seam used by the grid and
//! evaluator layers, the distance policy shared by every model, and the
//! received-power reference the analyzer displays. The only model shipped
//! today is the Okumura-Hata urban approximation in [`hata`].

mod hata;

pub use hata::HataParams;

use thiserror::Error;

/// Smallest distance fed to a log-distance formula, in kilometres.
///
/// Distances at or below zero (including the exact grid center) are clamped
/// to this value so the surface stays finite and continuous.
pub const MIN_DISTANCE_KM: f64 = 1e-3;

/// Reference level subtracted from path loss to obtain received power (dBm).
///
/// The nominal transmit power is 30 dBm; the displayed model applies it as a
/// -30 dBm reference, so `rx = -30 - path_loss`.
pub const RX_REFERENCE_DBM: f64 = -30.0;

/// Errors raised by the strict (non-clamping) entry points.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropagationError {
    #[error("distance must be positive and finite, got {0} km")]
    InvalidDistance(f64),

    #[error("grid size must be at least 1, got {0}")]
    InvalidGridSize(usize),

    #[error("invalid {axis} range: {start}..{end}")]
    InvalidRange {
        axis: &'static str,
        start: f64,
        end: f64,
    },

    #[error("invalid value for parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Trait for empirical path-loss models.
///
/// Implementors only need to provide the raw formula; clamping and the
/// received-power conversion are shared.
pub trait PathLossModel {
    /// Evaluate the formula at a distance already known to be positive.
    fn loss_at(&self, distance_km: f64) -> f64;

    /// Path loss in dB with the distance clamped to [`MIN_DISTANCE_KM`].
    fn path_loss(&self, distance_km: f64) -> f64 {
        self.loss_at(clamp_distance(distance_km))
    }

    /// Path loss in dB, rejecting non-positive or non-finite distances.
    fn try_path_loss(&self, distance_km: f64) -> Result<f64, PropagationError> {
        if distance_km.is_finite() && distance_km > 0.0 {
            Ok(self.loss_at(distance_km))
        } else {
            Err(PropagationError::InvalidDistance(distance_km))
        }
    }

    /// Received power in dBm at the given distance.
    fn received_power(&self, distance_km: f64) -> f64 {
        received_power_from_loss(self.path_loss(distance_km))
    }
}

/// Normalize a distance into the domain of the log-based formulas.
///
/// Positive finite distances pass through unchanged, however small.
#[must_use]
pub fn clamp_distance(distance_km: f64) -> f64 {
    if distance_km.is_finite() && distance_km > 0.0 {
        distance_km
    } else if distance_km.is_infinite() && distance_km > 0.0 {
        f64::MAX
    } else {
        MIN_DISTANCE_KM
    }
}

/// Convert a path loss (dB) to received power (dBm).
#[must_use]
pub fn received_power_from_loss(path_loss_db: f64) -> f64 {
    RX_REFERENCE_DBM - path_loss_db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_distance() {
        assert_eq!(clamp_distance(2.0), 2.0);
        assert_eq!(clamp_distance(0.0002), 0.0002);
        assert_eq!(clamp_distance(0.0), MIN_DISTANCE_KM);
        assert_eq!(clamp_distance(-3.0), MIN_DISTANCE_KM);
        assert_eq!(clamp_distance(f64::NAN), MIN_DISTANCE_KM);
        assert_eq!(clamp_distance(f64::NEG_INFINITY), MIN_DISTANCE_KM);
        assert_eq!(clamp_distance(f64::INFINITY), f64::MAX);
    }

    #[test]
    fn test_try_path_loss_rejects_zero() {
        let model = HataParams::default();
        assert_eq!(
            model.try_path_loss(0.0),
            Err(PropagationError::InvalidDistance(0.0))
        );
        assert!(model.try_path_loss(-1.0).is_err());
        assert!(model.try_path_loss(f64::NAN).is_err());
        assert!(model.try_path_loss(1.0).is_ok());
    }

    #[test]
    fn test_clamped_loss_matches_epsilon() {
        let model = HataParams::default();
        assert_eq!(model.path_loss(0.0), model.loss_at(MIN_DISTANCE_KM));
        assert!(model.path_loss(0.0).is_finite());
    }

    #[test]
    fn test_clamping_and_strict_agree_on_positive_input() {
        let model = HataParams::default();
        for d in [1e-6, 0.0002, 0.0008, MIN_DISTANCE_KM, 0.5, 10.0] {
            assert_eq!(model.try_path_loss(d), Ok(model.path_loss(d)));
        }
    }

    #[test]
    fn test_received_power_reference() {
        let model = HataParams::default();
        for d in [0.1, 0.5, 2.0, 7.3, 10.0] {
            assert_eq!(model.received_power(d), -30.0 - model.path_loss(d));
        }
    }
}
