//! Content-area rendering for `SkylineApp`.
//!
//! - `draw_content`: the 3-D viewport with orbit input and hover tooltip
//! - `draw_stats_panel`: right-side statistics panel

use eframe::egui;

use contrib_skyline::render::raster;
use contrib_skyline::render::scene::DayMetadata;
use contrib_skyline::viewport::CONTAINER_ID;

use super::SkylineApp;

fn day_label(day: &DayMetadata) -> String {
    format!(
        "{}: {} contributions (level {})",
        day.date, day.count, day.level
    )
}

impl SkylineApp {
    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let size = ui.available_size();
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let rect = response.rect;

        self.host
            .set_container(CONTAINER_ID, rect.width(), rect.height());
        self.viewport
            .resize(&mut self.host, rect.width(), rect.height());

        if self.viewport.state().is_none() {
            painter.rect_filled(rect, 0.0, self.config.scene.background.to_color32());
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Enter a GitHub username and press Visualize",
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
        } else {
            if response.dragged() {
                let delta = response.drag_delta();
                self.viewport.rotate(delta.x, delta.y);
            }
            if response.hovered() {
                let scroll = ui.input(|i| i.raw_scroll_delta.y);
                if scroll.abs() > 0.1 {
                    self.viewport.zoom(scroll);
                }
            }

            self.viewport.frame(rect);
            if let Some(state) = self.viewport.state() {
                raster::paint(&state.frame, &painter);
            }
            if self.viewport.is_running() {
                ctx.request_repaint();
            }
        }

        if let Some(ref error) = self.error {
            painter.text(
                rect.left_top() + egui::vec2(12.0, 12.0),
                egui::Align2::LEFT_TOP,
                error,
                egui::FontId::proportional(15.0),
                egui::Color32::RED,
            );
        }

        let hovered_day = response
            .hover_pos()
            .and_then(|pos| self.viewport.pick(pos))
            .map(day_label);
        if let Some(text) = hovered_day {
            response.on_hover_text_at_pointer(text);
        }
    }

    pub fn draw_stats_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Skyline");
        ui.separator();

        let Some(ref shown) = self.shown else {
            ui.label("Nothing loaded");
            return;
        };
        let series = &shown.series;

        ui.label(format!("User: {}", shown.login));
        ui.label(format!("{} .. {}", shown.range.from, shown.range.to));
        ui.separator();
        ui.label(format!("Days: {}", series.len()));
        ui.label(format!("Weeks: {}", series.week_count()));
        ui.colored_label(
            egui::Color32::from_rgb(0x30, 0xa1, 0x4e),
            format!("Contributions: {}", series.total_contributions),
        );
        if let Some(day) = series.busiest_day() {
            ui.label(format!("Busiest: {} ({})", day.date, day.count));
        }

        ui.separator();
        if let Some(scene) = self.viewport.scene() {
            ui.label(format!("Cubes: {}", scene.cube_count()));
        }
        if let Some(distance) = self.viewport.camera_distance() {
            ui.label(format!("Camera distance: {:.1}", distance));
        }
        ui.label(format!("Frames: {}", self.viewport.frames()));
        if let Some(state) = self.viewport.state() {
            ui.label(format!("Faces drawn: {}", state.frame.face_count()));
        }
    }
}
