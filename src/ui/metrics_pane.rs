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

use egui::{Color32, RichText};
use propagation::{Analysis, QualityTier, RssiBadge, SinrBadge};

const POSITIVE_COLOR: Color32 = Color32::from_rgb(100, 220, 120);
const NEGATIVE_COLOR: Color32 = Color32::from_rgb(230, 110, 100);
const NEUTRAL_COLOR: Color32 = Color32::from_rgb(150, 150, 150);

/// Metrics row and prediction banner
#[derive(Debug, Default)]
pub struct MetricsPane;

impl MetricsPane {
    pub fn new() -> Self {
        Self
    }

    /// Render the three input metrics side by side
    pub fn render_metrics(&self, ui: &mut egui::Ui, analysis: &Analysis) {
        let sample = analysis.sample;

        ui.columns(3, |columns| {
            Self::metric_card(
                &mut columns[0],
                "📶 RSSI",
                &format!("{:.0} dBm", sample.rssi_dbm),
                Some((analysis.rssi_badge.label(), rssi_badge_color(analysis.rssi_badge))),
            );
            Self::metric_card(
                &mut columns[1],
                "📡 SINR",
                &format!("{:.0} dB", sample.sinr_db),
                Some((analysis.sinr_badge.label(), sinr_badge_color(analysis.sinr_badge))),
            );
            Self::metric_card(
                &mut columns[2],
                "📏 Distance",
                &format!("{:.1} km", sample.distance_km),
                None,
            );
        });
    }

    fn metric_card(ui: &mut egui::Ui, title: &str, value: &str, badge: Option<(&str, Color32)>) {
        egui::Frame::group(ui.style())
            .fill(Color32::from_rgba_unmultiplied(25, 30, 35, 230))
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(60, 80, 100)))
            .corner_radius(6.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(title).color(NEUTRAL_COLOR).size(12.0));
                ui.label(RichText::new(value).size(24.0).strong());
                match badge {
                    Some((text, color)) => {
                        ui.label(RichText::new(format!("● {text}")).color(color).size(12.0));
                    }
                    None => {
                        ui.label(RichText::new(" ").size(12.0));
                    }
                }
            });
    }

    /// Render the predicted power and quality banner
    pub fn render_prediction(&self, ui: &mut egui::Ui, analysis: &Analysis) {
        ui.heading("🌐 ML Coverage Prediction");
        ui.add_space(4.0);

        let color = quality_color(analysis.link.quality);
        egui::Frame::group(ui.style())
            .fill(Color32::from_rgba_unmultiplied(30, 60, 90, 200))
            .stroke(egui::Stroke::new(1.0, color))
            .corner_radius(6.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(prediction_text(analysis)).strong().size(15.0));
                ui.label(
                    RichText::new(format!(
                        "Path loss {:.1} dB at {:.1} km",
                        analysis.link.path_loss_db, analysis.link.distance_km
                    ))
                    .color(NEUTRAL_COLOR)
                    .size(11.0)
                    .monospace(),
                );
            });
    }
}

/// Banner text for the predicted received power
pub fn prediction_text(analysis: &Analysis) -> String {
    format!(
        "Predicted Rx Power: {:.1} dBm | Quality: {}",
        analysis.link.received_power_dbm, analysis.link.quality
    )
}

fn rssi_badge_color(badge: RssiBadge) -> Color32 {
    match badge {
        RssiBadge::Good => POSITIVE_COLOR,
        RssiBadge::Poor => NEGATIVE_COLOR,
    }
}

fn sinr_badge_color(badge: SinrBadge) -> Color32 {
    match badge {
        SinrBadge::Excellent => POSITIVE_COLOR,
        SinrBadge::Fair => NEUTRAL_COLOR,
    }
}

fn quality_color(tier: QualityTier) -> Color32 {
    match tier {
        QualityTier::Excellent => POSITIVE_COLOR,
        QualityTier::Good => Color32::from_rgb(255, 200, 50),
        QualityTier::Poor => NEGATIVE_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propagation::{PropagationEvaluator, SignalSample};

    #[test]
    fn test_prediction_text_default() {
        let analysis = PropagationEvaluator::default().evaluate(SignalSample::default());
        assert_eq!(
            prediction_text(&analysis),
            "Predicted Rx Power: -129.0 dBm | Quality: Poor"
        );
    }

    #[test]
    fn test_badge_colors() {
        assert_eq!(rssi_badge_color(RssiBadge::Good), POSITIVE_COLOR);
        assert_eq!(rssi_badge_color(RssiBadge::Poor), NEGATIVE_COLOR);
        assert_eq!(sinr_badge_color(SinrBadge::Fair), NEUTRAL_COLOR);
        assert_ne!(quality_color(QualityTier::Good), quality_color(QualityTier::Poor));
    }
}
