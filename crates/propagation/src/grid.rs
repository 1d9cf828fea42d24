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

//! Synthetic coverage surface.
//!
//! The grid places a single transmitter at a fixed center and evaluates the
//! path-loss model at every lattice point. Distance is the Euclidean distance
//! in degrees, used directly as kilometres. There is no terrain, obstruction
//! or multi-transmitter modelling, so the surface is a radially symmetric
//! bowl that falls off monotonically from the center.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::{PathLossModel, PropagationError};

/// Default lattice points per axis.
pub const DEFAULT_GRID_SIZE: usize = 50;

/// Layout of the coverage lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Transmitter latitude in degrees.
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Transmitter longitude in degrees.
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    /// First latitude row (inclusive).
    #[serde(default = "default_lat_start")]
    pub lat_start: f64,

    /// Last latitude row (inclusive).
    #[serde(default = "default_lat_end")]
    pub lat_end: f64,

    /// First longitude column (inclusive).
    #[serde(default = "default_lon_start")]
    pub lon_start: f64,

    /// Last longitude column (inclusive).
    #[serde(default = "default_lon_end")]
    pub lon_end: f64,

    /// Points per axis.
    #[serde(default = "default_size")]
    pub size: usize,
}

fn default_center_lat() -> f64 {
    47.5
}

fn default_center_lon() -> f64 {
    11.5
}

fn default_lat_start() -> f64 {
    47.0
}

fn default_lat_end() -> f64 {
    48.0
}

fn default_lon_start() -> f64 {
    11.0
}

fn default_lon_end() -> f64 {
    12.0
}

fn default_size() -> usize {
    DEFAULT_GRID_SIZE
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            lat_start: default_lat_start(),
            lat_end: default_lat_end(),
            lon_start: default_lon_start(),
            lon_end: default_lon_end(),
            size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GridSpec {
    /// Reject layouts that would produce an empty or non-finite grid.
    pub fn validate(&self) -> Result<(), PropagationError> {
        if self.size == 0 {
            return Err(PropagationError::InvalidGridSize(self.size));
        }
        check_range("latitude", self.lat_start, self.lat_end)?;
        check_range("longitude", self.lon_start, self.lon_end)?;

        if !self.center_lat.is_finite() {
            return Err(PropagationError::InvalidParameter {
                name: "center_lat",
                value: self.center_lat,
            });
        }
        if !self.center_lon.is_finite() {
            return Err(PropagationError::InvalidParameter {
                name: "center_lon",
                value: self.center_lon,
            });
        }
        Ok(())
    }

    /// Latitude rows, evenly spaced with both ends included.
    #[must_use]
    pub fn latitudes(&self) -> Vec<f64> {
        linspace(self.lat_start, self.lat_end, self.size)
    }

    /// Longitude columns, evenly spaced with both ends included.
    #[must_use]
    pub fn longitudes(&self) -> Vec<f64> {
        linspace(self.lon_start, self.lon_end, self.size)
    }

    /// Angular distance of a point from the center, in degrees.
    #[must_use]
    pub fn distance_from_center(&self, lat: f64, lon: f64) -> f64 {
        (lon - self.center_lon).hypot(lat - self.center_lat)
    }
}

fn check_range(axis: &'static str, start: f64, end: f64) -> Result<(), PropagationError> {
    if start.is_finite() && end.is_finite() && start < end {
        Ok(())
    } else {
        Err(PropagationError::InvalidRange { axis, start, end })
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// A single point yields `[start]`; zero points yield an empty vector.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "grid sizes are small")]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the last sample to avoid accumulated rounding
            values[n - 1] = end;
            values
        }
    }
}

/// Received power over a latitude/longitude lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageGrid {
    /// Row coordinates.
    pub latitudes: Vec<f64>,
    /// Column coordinates.
    pub longitudes: Vec<f64>,
    /// `received_power[row][col]` in dBm; row indexes latitude.
    pub received_power: Vec<Vec<f64>>,
}

/// One cell of a [`CoverageGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub lat: f64,
    pub lon: f64,
    pub received_power_dbm: f64,
}

impl CoverageGrid {
    /// Number of latitude rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.latitudes.len()
    }

    /// Number of longitude columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.longitudes.len()
    }

    /// Value at a cell, if in bounds.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.received_power.get(row)?.get(col).copied()
    }

    /// Smallest and largest finite value, or `None` for an empty grid.
    #[must_use]
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.received_power
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Iterate every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.received_power
            .iter()
            .enumerate()
            .flat_map(move |(row, values)| {
                values.iter().enumerate().map(move |(col, &v)| GridCell {
                    row,
                    col,
                    lat: self.latitudes[row],
                    lon: self.longitudes[col],
                    received_power_dbm: v,
                })
            })
    }

    /// Cell nearest to a coordinate, or `None` when the point lies outside
    /// the grid extent.
    #[must_use]
    pub fn cell_at(&self, lat: f64, lon: f64) -> Option<GridCell> {
        let row = nearest_index(&self.latitudes, lat)?;
        let col = nearest_index(&self.longitudes, lon)?;
        Some(GridCell {
            row,
            col,
            lat: self.latitudes[row],
            lon: self.longitudes[col],
            received_power_dbm: self.received_power[row][col],
        })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "index is bounds-checked against the axis length"
)]
fn nearest_index(axis: &[f64], value: f64) -> Option<usize> {
    let (&first, &last) = (axis.first()?, axis.last()?);
    if !value.is_finite() || value < first.min(last) || value > first.max(last) {
        return None;
    }
    if axis.len() == 1 {
        return Some(0);
    }
    let t = (value - first) / (last - first);
    let index = (t * (axis.len() - 1) as f64).round() as usize;
    Some(index.min(axis.len() - 1))
}

/// Evaluate received power over the lattice described by `spec`.
pub fn evaluate_grid<M: PathLossModel>(
    model: &M,
    spec: &GridSpec,
) -> Result<CoverageGrid, PropagationError> {
    spec.validate()?;

    let latitudes = spec.latitudes();
    let longitudes = spec.longitudes();

    let received_power: Vec<Vec<f64>> = latitudes
        .iter()
        .map(|&lat| {
            longitudes
                .iter()
                .map(|&lon| model.received_power(spec.distance_from_center(lat, lon)))
                .collect()
        })
        .collect();

    debug!(
        "Evaluated {}x{} coverage grid around ({:.4}, {:.4})",
        latitudes.len(),
        longitudes.len(),
        spec.center_lat,
        spec.center_lon
    );

    Ok(CoverageGrid {
        latitudes,
        longitudes,
        received_power,
    })
}
