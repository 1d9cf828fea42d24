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

//! Command-line interface.
//!
//! Without flags the analyzer opens its window. The headless modes print a
//! JSON report or write the coverage grid and exit.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use propagation::{Analysis, PropagationEvaluator, SignalSample, ThroughputCurve};
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::export;

/// Interactive 5G coverage and link-quality analyzer.
#[derive(Debug, Parser)]
#[command(name = "coverage-analyzer", version, about)]
pub struct Args {
    /// Load configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a JSON link report for the given inputs and exit
    #[arg(long)]
    pub report: bool,

    /// RSSI in dBm for --report
    #[arg(long, allow_negative_numbers = true)]
    pub rssi: Option<f64>,

    /// SINR in dB for --report
    #[arg(long, allow_negative_numbers = true)]
    pub sinr: Option<f64>,

    /// Distance in km for --report
    #[arg(long)]
    pub distance: Option<f64>,

    /// Write the coverage grid as CSV to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub export_grid: Option<PathBuf>,

    /// Write the effective configuration to the default config file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Whether any headless mode was requested.
    pub fn is_headless(&self) -> bool {
        self.report || self.export_grid.is_some() || self.init_config
    }

    /// Sample built from the CLI overrides on top of the configured defaults.
    pub fn sample(&self, config: &AppConfig) -> SignalSample {
        let base = config.initial_sample();
        SignalSample::new(
            self.rssi.unwrap_or(base.rssi_dbm),
            self.sinr.unwrap_or(base.sinr_db),
            self.distance.unwrap_or(base.distance_km),
        )
    }
}

/// JSON document printed by `--report`
#[derive(Debug, Serialize)]
pub struct Report {
    pub analysis: Analysis,
    pub throughput_curve: ThroughputCurve,
}

/// Build the report for one sample.
pub fn build_report(evaluator: &PropagationEvaluator, sample: SignalSample) -> Report {
    let analysis = evaluator.evaluate(sample);
    Report {
        throughput_curve: evaluator.throughput_curve(analysis.sample.sinr_db),
        analysis,
    }
}

/// Run the requested headless modes in order: config init, grid export,
/// report.
pub fn run_headless(args: &Args, config: &AppConfig) -> Result<(), AppError> {
    if args.init_config {
        config.save()?;
        info!(
            "Wrote configuration to {}",
            AppConfig::get_config_path()?.display()
        );
    }

    let evaluator = config.evaluator();

    if let Some(path) = &args.export_grid {
        let grid = evaluator.coverage_grid()?;
        export::export_grid_to_path(&grid, path)?;
    }

    if args.report {
        let report = build_report(&evaluator, args.sample(config));
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use propagation::QualityTier;

    #[test]
    fn test_parse_negative_values() {
        let args = Args::parse_from([
            "coverage-analyzer",
            "--report",
            "--rssi",
            "-70",
            "--sinr",
            "-5",
            "--distance",
            "0.1",
        ]);
        assert!(args.report);
        assert!(args.is_headless());
        assert_eq!(args.rssi, Some(-70.0));
        assert_eq!(args.sinr, Some(-5.0));
        assert_eq!(args.distance, Some(0.1));
    }

    #[test]
    fn test_no_flags_opens_window() {
        let args = Args::parse_from(["coverage-analyzer"]);
        assert!(!args.is_headless());
        assert!(!args.verbose);
    }

    #[test]
    fn test_sample_falls_back_to_config() {
        let args = Args::parse_from(["coverage-analyzer", "--report", "--distance", "5"]);
        let sample = args.sample(&AppConfig::default());
        assert_eq!(sample, SignalSample::new(-85.0, 15.0, 5.0));
    }

    #[test]
    fn test_report_contents() {
        let report = build_report(
            &PropagationEvaluator::default(),
            SignalSample::new(-60.0, 25.0, 0.1),
        );
        assert_eq!(report.analysis.link.quality, QualityTier::Good);
        assert_eq!(report.throughput_curve.len(), 41);
        assert_eq!(report.throughput_curve.current.sinr_db, 25.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["analysis"]["link"]["quality"], "Good");
        assert_eq!(json["analysis"]["rssi_badge"], "Good");
        assert_eq!(json["analysis"]["sinr_badge"], "Excellent");
    }
}
