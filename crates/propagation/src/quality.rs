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

//! Signal quality labels.
//!
//! Two independent threshold rules are applied to different quantities and
//! must not be merged:
//!
//! - [`classify_quality`] grades the *derived* received power at -80/-95 dBm.
//! - [`rssi_badge`] labels the *raw* RSSI slider value at -85 dBm.
//!
//! [`sinr_badge`] labels the raw SINR value at 20 dB.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Received power above this is [`QualityTier::Excellent`] (dBm).
pub const EXCELLENT_THRESHOLD_DBM: f64 = -80.0;
/// Received power above this (and not excellent) is [`QualityTier::Good`] (dBm).
pub const GOOD_THRESHOLD_DBM: f64 = -95.0;
/// Raw RSSI above this is badged [`RssiBadge::Good`] (dBm).
pub const RSSI_GOOD_THRESHOLD_DBM: f64 = -85.0;
/// Raw SINR above this is badged [`SinrBadge::Excellent`] (dB).
pub const SINR_EXCELLENT_THRESHOLD_DB: f64 = 20.0;

/// Quality tier of the predicted received power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    Excellent,
    Good,
    Poor,
}

impl QualityTier {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Badge shown next to the raw RSSI metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RssiBadge {
    Good,
    Poor,
}

impl RssiBadge {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for RssiBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Badge shown next to the raw SINR metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SinrBadge {
    Excellent,
    Fair,
}

impl SinrBadge {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Fair => "Fair",
        }
    }
}

impl fmt::Display for SinrBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grade a derived received power.
///
/// `> -80` is Excellent, `(-95, -80]` is Good, everything else (including
/// NaN) is Poor.
#[must_use]
pub fn classify_quality(received_power_dbm: f64) -> QualityTier {
    if received_power_dbm > EXCELLENT_THRESHOLD_DBM {
        QualityTier::Excellent
    } else if received_power_dbm > GOOD_THRESHOLD_DBM {
        QualityTier::Good
    } else {
        QualityTier::Poor
    }
}

/// Label a raw RSSI reading. The boundary is exclusive: -85 dBm is Poor.
#[must_use]
pub fn rssi_badge(rssi_dbm: f64) -> RssiBadge {
    if rssi_dbm > RSSI_GOOD_THRESHOLD_DBM {
        RssiBadge::Good
    } else {
        RssiBadge::Poor
    }
}

/// Label a raw SINR reading. The boundary is exclusive: 20 dB is Fair.
#[must_use]
pub fn sinr_badge(sinr_db: f64) -> SinrBadge {
    if sinr_db > SINR_EXCELLENT_THRESHOLD_DB {
        SinrBadge::Excellent
    } else {
        SinrBadge::Fair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_tiers() {
        assert_eq!(classify_quality(-50.0), QualityTier::Excellent);
        assert_eq!(classify_quality(-79.999), QualityTier::Excellent);
        assert_eq!(classify_quality(-80.0), QualityTier::Good);
        assert_eq!(classify_quality(-94.999), QualityTier::Good);
        assert_eq!(classify_quality(-95.0), QualityTier::Poor);
        assert_eq!(classify_quality(-200.0), QualityTier::Poor);
    }

    #[test]
    fn test_quality_is_total() {
        assert_eq!(classify_quality(f64::INFINITY), QualityTier::Excellent);
        assert_eq!(classify_quality(f64::NEG_INFINITY), QualityTier::Poor);
        assert_eq!(classify_quality(f64::NAN), QualityTier::Poor);
    }

    #[test]
    fn test_quality_is_monotone() {
        // Walking up in power never drops a tier
        let rank = |t: QualityTier| match t {
            QualityTier::Poor => 0,
            QualityTier::Good => 1,
            QualityTier::Excellent => 2,
        };
        let mut last = 0;
        for tenth in -1500..=-500 {
            let r = rank(classify_quality(f64::from(tenth) / 10.0));
            assert!(r >= last);
            last = r;
        }
    }

    #[test]
    fn test_rssi_badge_boundary() {
        assert_eq!(rssi_badge(-85.0), RssiBadge::Poor);
        assert_eq!(rssi_badge(-84.0), RssiBadge::Good);
        assert_eq!(rssi_badge(-120.0), RssiBadge::Poor);
        assert_eq!(rssi_badge(-50.0), RssiBadge::Good);
    }

    #[test]
    fn test_rules_stay_separate() {
        // Same number, different verdicts
        assert_eq!(rssi_badge(-90.0), RssiBadge::Poor);
        assert_eq!(classify_quality(-90.0), QualityTier::Good);
        assert_eq!(rssi_badge(-78.0), RssiBadge::Good);
        assert_eq!(classify_quality(-78.0), QualityTier::Excellent);
    }

    #[test]
    fn test_sinr_badge_boundary() {
        assert_eq!(sinr_badge(20.0), SinrBadge::Fair);
        assert_eq!(sinr_badge(21.0), SinrBadge::Excellent);
        assert_eq!(sinr_badge(-10.0), SinrBadge::Fair);
    }

    #[test]
    fn test_labels() {
        assert_eq!(QualityTier::Good.to_string(), "Good");
        assert_eq!(RssiBadge::Poor.to_string(), "Poor");
        assert_eq!(SinrBadge::Excellent.to_string(), "Excellent");
    }
}
