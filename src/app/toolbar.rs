//! Toolbar rendering for `SkylineApp`.

use eframe::egui;

use super::SkylineApp;

impl SkylineApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            ui.label("User");
            let response = ui.add_sized(
                [180.0, 24.0],
                egui::TextEdit::singleline(&mut self.username)
                    .hint_text("GitHub username")
                    .font(egui::TextStyle::Monospace),
            );
            let mut submit =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.label("From");
            ui.add_sized(
                [96.0, 24.0],
                egui::TextEdit::singleline(&mut self.from_input)
                    .hint_text("YYYY-MM-DD")
                    .font(egui::TextStyle::Monospace),
            );
            ui.label("To");
            ui.add_sized(
                [96.0, 24.0],
                egui::TextEdit::singleline(&mut self.to_input)
                    .hint_text("YYYY-MM-DD")
                    .font(egui::TextStyle::Monospace),
            );

            // Disabled while a fetch is in flight
            if ui
                .add_enabled(!self.loading, egui::Button::new("Visualize"))
                .clicked()
            {
                submit = true;
            }
            if submit {
                self.submit(ctx);
            }

            if self.loading {
                ui.spinner();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.toggle_value(&mut self.show_stats, "Stats");
            });
        });
    }
}
