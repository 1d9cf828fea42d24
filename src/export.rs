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

//! CSV export of the coverage grid.
//!
//! One row per lattice cell, row-major (latitude outer, longitude inner).

use std::io::Write;
use std::path::Path;

use log::info;
use propagation::CoverageGrid;
use serde::Serialize;

/// CSV record for one grid cell
#[derive(Debug, Serialize)]
struct GridRecord {
    latitude: f64,
    longitude: f64,
    rx_power_dbm: f64,
}

/// Write `grid` as CSV to any writer.
pub fn write_grid_csv<W: Write>(grid: &CoverageGrid, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for cell in grid.cells() {
        csv_writer.serialize(GridRecord {
            latitude: cell.lat,
            longitude: cell.lon,
            rx_power_dbm: cell.received_power_dbm,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `grid` as CSV to a file, replacing it if present.
pub fn export_grid_to_path(grid: &CoverageGrid, path: &Path) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_grid_csv(grid, file)?;
    info!(
        "Exported {}x{} coverage grid to {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use propagation::{evaluate_grid, GridSpec, HataParams};

    #[test]
    fn test_csv_layout() {
        let spec = GridSpec {
            size: 3,
            ..Default::default()
        };
        let grid = evaluate_grid(&HataParams::default(), &spec).unwrap();

        let mut buffer = Vec::new();
        write_grid_csv(&grid, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 9);
        assert_eq!(lines[0], "latitude,longitude,rx_power_dbm");
        assert!(lines[1].starts_with("47.0,11.0,"));
        assert!(lines[2].starts_with("47.0,11.5,"));
        assert!(lines[9].starts_with("48.0,12.0,"));
    }

    #[test]
    fn test_csv_values_parse_back() {
        let grid = evaluate_grid(&HataParams::default(), &GridSpec::default()).unwrap();

        let mut buffer = Vec::new();
        write_grid_csv(&grid, &mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let values: Vec<f64> = reader
            .records()
            .map(|r| r.unwrap()[2].parse::<f64>().unwrap())
            .collect();
        assert_eq!(values.len(), 2500);
        assert!(values.iter().all(|v| v.is_finite()));
    }
}
