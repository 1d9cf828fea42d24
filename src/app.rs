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

//! Main analyzer window.

use log::{debug, error, info};
use propagation::{Analysis, CoverageGrid, PropagationEvaluator, SignalSample, ThroughputCurve};

use crate::config::AppConfig;
use crate::export;
use crate::ui::{throughput_plot, CoverageHeatmap, MetricsPane, SignalControls};

/// Analyzer application state.
///
/// Every figure is a pure function of the current [`SignalSample`] and the
/// configured constants; they are recomputed only when the sample changes.
pub struct AnalyzerApp {
    evaluator: PropagationEvaluator,
    controls: SignalControls,
    metrics: MetricsPane,
    heatmap: CoverageHeatmap,
    analysis: Analysis,
    curve: ThroughputCurve,
    /// Coverage grid, independent of the sliders
    grid: Option<CoverageGrid>,
    grid_error: Option<String>,
    export_status: Option<String>,
    show_technical_details: bool,
}

impl std::fmt::Debug for AnalyzerApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerApp")
            .field("evaluator", &self.evaluator)
            .field("analysis", &self.analysis)
            .finish_non_exhaustive()
    }
}

impl AnalyzerApp {
    pub fn new(config: &AppConfig) -> Self {
        let evaluator = config.evaluator();
        let sample = config.initial_sample();

        let (grid, grid_error) = match evaluator.coverage_grid() {
            Ok(grid) => (Some(grid), None),
            Err(e) => {
                error!("Failed to evaluate coverage grid: {e}");
                (None, Some(e.to_string()))
            }
        };

        info!("Analyzer initialized with {sample:?}");
        Self {
            evaluator,
            controls: SignalControls::new(sample),
            metrics: MetricsPane::new(),
            heatmap: CoverageHeatmap::new(),
            analysis: evaluator.evaluate(sample),
            curve: evaluator.throughput_curve(sample.sinr_db),
            grid,
            grid_error,
            export_status: None,
            show_technical_details: config.show_technical_details,
        }
    }

    /// Current figures.
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn curve(&self) -> &ThroughputCurve {
        &self.curve
    }

    /// Recompute for a new sample. Returns whether anything changed.
    pub fn apply_sample(&mut self, sample: SignalSample) -> bool {
        let analysis = self.evaluator.evaluate(sample);
        if analysis == self.analysis {
            return false;
        }

        debug!("Recomputing for {:?}", analysis.sample);
        self.curve = self.evaluator.throughput_curve(analysis.sample.sinr_db);
        self.analysis = analysis;
        true
    }

    fn export_grid(&mut self) {
        let Some(grid) = &self.grid else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("coverage_grid.csv")
            .save_file()
        else {
            return;
        };

        self.export_status = Some(match export::export_grid_to_path(grid, &path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                error!("Grid export failed: {e}");
                format!("Export failed: {e}")
            }
        });
    }

    fn draw_coverage(&mut self, ui: &mut egui::Ui) {
        if let Some(grid) = &self.grid {
            self.heatmap.render(ui, grid);
        } else if let Some(message) = &self.grid_error {
            ui.colored_label(egui::Color32::from_rgb(230, 110, 100), message.as_str());
        }

        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.grid.is_some(), egui::Button::new("💾 Export grid…"))
                .clicked()
            {
                self.export_grid();
            }
            if let Some(status) = &self.export_status {
                ui.label(egui::RichText::new(status).small().color(egui::Color32::GRAY));
            }
        });
    }

    fn draw_technical_details(ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("🔬 Technical Details")
            .default_open(true)
            .show(ui, |ui| {
                ui.label("Path Loss Model: Okumura-Hata (3.5 GHz urban)");
                ui.label("Prediction: deterministic formula evaluated over a synthetic base-station grid");
                ui.label("Throughput: 100 · erf(SINR / 10), a stylized saturating curve");
            });
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("signal_settings")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                if let Some(sample) = self.controls.render(ui) {
                    self.apply_sample(sample);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("📡 5G Cellular Signal Analyzer");
                ui.label(egui::RichText::new("RSSI/SINR Analysis + ML Coverage Prediction").strong());
                ui.add_space(8.0);

                self.metrics.render_metrics(ui, self.analysis());
                ui.add_space(12.0);

                self.metrics.render_prediction(ui, self.analysis());
                ui.add_space(8.0);

                self.draw_coverage(ui);
                ui.separator();

                ui.heading("📊 Performance Metrics");
                throughput_plot::render(ui, self.curve());

                if self.show_technical_details {
                    ui.separator();
                    Self::draw_technical_details(ui);
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propagation::QualityTier;

    #[test]
    fn test_new_uses_config_defaults() {
        let app = AnalyzerApp::new(&AppConfig::default());
        assert_eq!(app.analysis().sample, SignalSample::default());
        assert_eq!(app.analysis().link.quality, QualityTier::Poor);
        assert_eq!(app.curve().current.sinr_db, 15.0);
        assert!(app.grid.is_some());
        assert!(app.grid_error.is_none());
    }

    #[test]
    fn test_apply_sample_recomputes() {
        let mut app = AnalyzerApp::new(&AppConfig::default());

        assert!(app.apply_sample(SignalSample::new(-85.0, 25.0, 0.1)));
        assert_eq!(app.analysis().link.quality, QualityTier::Good);
        assert_eq!(app.curve().current.sinr_db, 25.0);

        // Same input is a no-op
        assert!(!app.apply_sample(SignalSample::new(-85.0, 25.0, 0.1)));
    }

    #[test]
    fn test_apply_sample_clamps() {
        let mut app = AnalyzerApp::new(&AppConfig::default());
        app.apply_sample(SignalSample::new(-85.0, 15.0, 0.0));
        assert_eq!(app.analysis().sample.distance_km, 0.1);
        assert!(app.analysis().link.received_power_dbm.is_finite());
    }
}
