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

//! SINR vs throughput plot.

use egui::Color32;
use egui_plot::{Line, LineStyle, Plot, PlotPoints, Points, VLine};
use propagation::ThroughputCurve;

const CURVE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

/// Plot title with the current throughput
pub fn plot_title(curve: &ThroughputCurve) -> String {
    format!(
        "5G Throughput vs SINR | Current: {:.0} Mbps",
        curve.current.throughput_mbps
    )
}

/// Render the fixed curve with markers and a dashed marker at the live SINR.
pub fn render(ui: &mut egui::Ui, curve: &ThroughputCurve) {
    ui.label(egui::RichText::new(plot_title(curve)).strong().size(14.0));

    let points: Vec<[f64; 2]> = curve.points().collect();

    Plot::new("throughput_plot")
        .height(280.0)
        .x_axis_label("SINR (dB)")
        .y_axis_label("Throughput (Mbps)")
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Throughput", PlotPoints::from(points.clone()))
                    .color(CURVE_COLOR)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new("Samples", PlotPoints::from(points))
                    .color(CURVE_COLOR)
                    .radius(3.0),
            );
            plot_ui.vline(
                VLine::new("Current SINR", curve.current.sinr_db)
                    .color(Color32::RED)
                    .style(LineStyle::dashed_loose()),
            );
        });
}
