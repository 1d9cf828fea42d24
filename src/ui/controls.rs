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

//! Sidebar sliders for the three signal inputs.

use egui::RichText;
use propagation::sample::{DISTANCE_RANGE_KM, RSSI_RANGE_DBM, SINR_RANGE_DB};
use propagation::SignalSample;

/// Sidebar holding the editable [`SignalSample`].
#[derive(Debug)]
pub struct SignalControls {
    sample: SignalSample,
    reset_to: SignalSample,
}

impl SignalControls {
    pub fn new(initial: SignalSample) -> Self {
        Self {
            sample: initial,
            reset_to: initial,
        }
    }

    /// Restore the start-up slider positions.
    pub fn reset(&mut self) {
        self.sample = self.reset_to;
    }

    /// Render the sliders. Returns the new sample when any value moved.
    pub fn render(&mut self, ui: &mut egui::Ui) -> Option<SignalSample> {
        let before = self.sample;

        ui.heading("📶 Signal Settings");
        ui.add_space(8.0);

        ui.label("RSSI (dBm)");
        ui.add(
            egui::Slider::new(&mut self.sample.rssi_dbm, RSSI_RANGE_DBM)
                .step_by(1.0)
                .suffix(" dBm"),
        );
        ui.add_space(4.0);

        ui.label("SINR (dB)");
        ui.add(
            egui::Slider::new(&mut self.sample.sinr_db, SINR_RANGE_DB)
                .step_by(1.0)
                .suffix(" dB"),
        );
        ui.add_space(4.0);

        ui.label("Distance (km)");
        ui.add(
            egui::Slider::new(&mut self.sample.distance_km, DISTANCE_RANGE_KM)
                .step_by(0.1)
                .fixed_decimals(1)
                .suffix(" km"),
        );

        ui.add_space(12.0);
        if ui
            .button("↺ Reset")
            .on_hover_text("Return sliders to their start-up positions")
            .clicked()
        {
            self.reset();
        }

        ui.add_space(12.0);
        ui.label(
            RichText::new("Inputs are clamped to the slider ranges before evaluation.")
                .small()
                .color(egui::Color32::GRAY),
        );

        (self.sample != before).then_some(self.sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_initial() {
        let initial = SignalSample::new(-90.0, 10.0, 3.0);
        let mut controls = SignalControls::new(initial);
        controls.sample.distance_km = 7.5;
        assert_ne!(controls.sample, initial);

        controls.reset();
        assert_eq!(controls.sample, initial);
    }
}
