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

//! Coverage heatmap for the synthetic received-power grid.
//!
//! The grid is uploaded as a texture once per change and painted with
//! latitude/longitude extents, a colour bar, and a hover readout of the cell
//! under the cursor.

use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use propagation::CoverageGrid;

/// Height reserved for the heatmap image in points
const HEATMAP_HEIGHT: f32 = 420.0;
/// Horizontal space beside the image for latitude labels and the colour bar
const AXIS_AND_COLORBAR_WIDTH: f32 = 170.0;
/// Width of the colour bar in points
const COLORBAR_WIDTH: f32 = 16.0;
/// Number of swatches in the colour bar
const COLORBAR_STEPS: usize = 64;

/// Heatmap widget holding the uploaded texture.
pub struct CoverageHeatmap {
    /// Heatmap texture
    texture: Option<TextureHandle>,
    /// Colour scale bounds (min, max) in dBm
    scale: (f32, f32),
}

impl std::fmt::Debug for CoverageHeatmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverageHeatmap")
            .field("uploaded", &self.texture.is_some())
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl Default for CoverageHeatmap {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverageHeatmap {
    pub fn new() -> Self {
        Self {
            texture: None,
            scale: (0.0, 1.0),
        }
    }

    /// Upload the texture from `grid` on first use. The grid is fixed for
    /// the lifetime of the window.
    #[allow(clippy::cast_possible_truncation, reason = "dBm values fit f32 for display")]
    fn update_texture(&mut self, ctx: &egui::Context, grid: &CoverageGrid) {
        if self.texture.is_some() {
            return;
        }

        let Some((min, max)) = grid.min_max() else {
            return;
        };
        self.scale = (min as f32, max as f32);

        let image = grid_to_image(grid, self.scale.0, self.scale.1);
        self.texture = Some(ctx.load_texture("coverage_heatmap", image, TextureOptions::NEAREST));
        log::debug!("Rebuilt coverage texture, scale {:.1}..{:.1} dBm", min, max);
    }

    /// Render the heatmap with axes and colour bar.
    pub fn render(&mut self, ui: &mut egui::Ui, grid: &CoverageGrid) {
        self.update_texture(ui.ctx(), grid);

        ui.label(
            egui::RichText::new("5G Coverage Heatmap (Okumura-Hata Model)")
                .strong()
                .size(14.0),
        );
        ui.add_space(4.0);

        let Some(texture) = &self.texture else {
            ui.label("No coverage data");
            return;
        };

        let available = ui.available_width();
        let (side, width) = heatmap_layout(available);
        let (outer, response) = ui.allocate_exact_size(
            egui::vec2(width, side + 40.0),
            egui::Sense::hover(),
        );

        // Leave room on the left for latitude labels and below for longitude
        let image_rect = egui::Rect::from_min_size(
            egui::pos2(outer.min.x + 50.0, outer.min.y),
            egui::vec2(side, side),
        );

        let painter = ui.painter_at(outer);
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        paint_axes(&painter, image_rect, grid);
        paint_colorbar(&painter, image_rect, self.scale);

        if let Some(pos) = response.hover_pos() {
            if image_rect.contains(pos) {
                let (lat, lon) = screen_to_geo(image_rect, pos, grid);
                if let Some(cell) = grid.cell_at(lat, lon) {
                    response.on_hover_text(format!(
                        "lat {:.3}, lon {:.3}\n{:.1} dBm",
                        cell.lat, cell.lon, cell.received_power_dbm
                    ));
                }
            }
        }
    }
}

fn paint_axes(painter: &egui::Painter, rect: egui::Rect, grid: &CoverageGrid) {
    let font = egui::FontId::monospace(10.0);
    let color = Color32::from_rgb(180, 180, 180);

    let (Some(lat_min), Some(lat_max)) = (grid.latitudes.first(), grid.latitudes.last()) else {
        return;
    };
    let (Some(lon_min), Some(lon_max)) = (grid.longitudes.first(), grid.longitudes.last())
    else {
        return;
    };

    painter.text(
        rect.left_top() - egui::vec2(4.0, 0.0),
        egui::Align2::RIGHT_TOP,
        format!("{lat_max:.2}"),
        font.clone(),
        color,
    );
    painter.text(
        rect.left_bottom() - egui::vec2(4.0, 0.0),
        egui::Align2::RIGHT_BOTTOM,
        format!("{lat_min:.2}"),
        font.clone(),
        color,
    );
    painter.text(
        rect.left_bottom() + egui::vec2(0.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!("{lon_min:.2}"),
        font.clone(),
        color,
    );
    painter.text(
        rect.right_bottom() + egui::vec2(0.0, 4.0),
        egui::Align2::RIGHT_TOP,
        format!("{lon_max:.2}"),
        font.clone(),
        color,
    );
    painter.text(
        rect.center_bottom() + egui::vec2(0.0, 18.0),
        egui::Align2::CENTER_TOP,
        "Longitude",
        font.clone(),
        color,
    );
    painter.text(
        rect.left_center() - egui::vec2(8.0, 0.0),
        egui::Align2::RIGHT_CENTER,
        "Lat",
        font,
        color,
    );
}

#[allow(clippy::cast_precision_loss, reason = "COLORBAR_STEPS is small")]
fn paint_colorbar(painter: &egui::Painter, rect: egui::Rect, scale: (f32, f32)) {
    let (min, max) = scale;
    let bar = egui::Rect::from_min_size(
        egui::pos2(rect.max.x + 16.0, rect.min.y),
        egui::vec2(COLORBAR_WIDTH, rect.height()),
    );
    let step_height = bar.height() / COLORBAR_STEPS as f32;

    for i in 0..COLORBAR_STEPS {
        // Top of the bar is the strongest signal
        let t = 1.0 - (i as f32 + 0.5) / COLORBAR_STEPS as f32;
        let value = min + t * (max - min);
        let swatch = egui::Rect::from_min_size(
            egui::pos2(bar.min.x, bar.min.y + i as f32 * step_height),
            egui::vec2(COLORBAR_WIDTH, step_height + 0.5),
        );
        painter.rect_filled(swatch, 0.0, power_to_color(value, min, max));
    }

    let font = egui::FontId::monospace(10.0);
    let color = Color32::from_rgb(180, 180, 180);
    painter.text(
        bar.right_top() + egui::vec2(4.0, 0.0),
        egui::Align2::LEFT_TOP,
        format!("{max:.0} dBm"),
        font.clone(),
        color,
    );
    painter.text(
        bar.right_bottom() + egui::vec2(4.0, 0.0),
        egui::Align2::LEFT_BOTTOM,
        format!("{min:.0} dBm"),
        font,
        color,
    );
}

/// Image side and total allocated width for the available width.
///
/// The allocation always covers the image plus its labels and colour bar, so
/// nothing is clipped when the panel is narrower than the minimum image.
fn heatmap_layout(available: f32) -> (f32, f32) {
    let side = (available - AXIS_AND_COLORBAR_WIDTH).clamp(100.0, HEATMAP_HEIGHT);
    (side, side + AXIS_AND_COLORBAR_WIDTH)
}

/// Map a screen position inside `rect` to (lat, lon). North is up.
fn screen_to_geo(rect: egui::Rect, pos: egui::Pos2, grid: &CoverageGrid) -> (f64, f64) {
    let u = f64::from((pos.x - rect.min.x) / rect.width()).clamp(0.0, 1.0);
    let v = f64::from((pos.y - rect.min.y) / rect.height()).clamp(0.0, 1.0);

    let lat_min = grid.latitudes.first().copied().unwrap_or_default();
    let lat_max = grid.latitudes.last().copied().unwrap_or_default();
    let lon_min = grid.longitudes.first().copied().unwrap_or_default();
    let lon_max = grid.longitudes.last().copied().unwrap_or_default();

    (
        lat_max - v * (lat_max - lat_min),
        lon_min + u * (lon_max - lon_min),
    )
}

/// Convert the grid to an image with the northernmost row at the top.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "dBm values fit f32 for display"
)]
pub fn grid_to_image(grid: &CoverageGrid, min_dbm: f32, max_dbm: f32) -> ColorImage {
    let width = grid.cols();
    let height = grid.rows();

    let mut pixels = Vec::with_capacity(width * height);
    for row in grid.received_power.iter().rev() {
        for &value in row {
            pixels.push(power_to_color(value as f32, min_dbm, max_dbm));
        }
    }

    ColorImage {
        size: [width, height],
        source_size: egui::vec2(width as f32, height as f32),
        pixels,
    }
}

/// Convert received power to colour on a reversed red-yellow-green scale.
///
/// Weak signal maps to green and strong signal to red, matching the
/// `RdYlGn_r` palette the coverage plot has always used.
///
/// # Arguments
/// * `dbm` - received power
/// * `min_dbm` - weakest value (maps to green)
/// * `max_dbm` - strongest value (maps to red)
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "channels are interpolated within 0..=255"
)]
pub fn power_to_color(dbm: f32, min_dbm: f32, max_dbm: f32) -> Color32 {
    let span = max_dbm - min_dbm;
    let normalized = if span > 0.0 {
        ((dbm - min_dbm) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };

    // Green → Yellow-green → Yellow → Orange → Red (5 stops)
    let stops: [(f32, (u8, u8, u8)); 5] = [
        (0.0, (0, 104, 55)),     // Dark green (weak)
        (0.25, (120, 198, 121)), // Light green
        (0.5, (255, 255, 191)),  // Pale yellow
        (0.75, (253, 174, 97)),  // Orange
        (1.0, (165, 0, 38)),     // Dark red (strong)
    ];

    for pair in stops.windows(2) {
        let (t1, (r1, g1, b1)) = pair[0];
        let (t2, (r2, g2, b2)) = pair[1];

        if normalized >= t1 && normalized <= t2 {
            let t = (normalized - t1) / (t2 - t1);
            let lerp = |a: u8, b: u8| (f32::from(a) + t * (f32::from(b) - f32::from(a))).round() as u8;
            return Color32::from_rgb(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2));
        }
    }

    Color32::from_rgb(165, 0, 38)
}
