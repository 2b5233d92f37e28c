//! Token prompt modal. The fetch worker blocks until it is answered.

use eframe::egui;

use super::SkylineApp;

enum Reply {
    Save,
    Cancel,
}

impl SkylineApp {
    pub fn draw_token_prompt(&mut self, ctx: &egui::Context) {
        let Some(message) = self.prompt.as_ref().map(|p| p.message.clone()) else {
            return;
        };

        let mut reply = None;
        egui::Window::new("GitHub token")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.token_input)
                        .password(true)
                        .desired_width(320.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    reply = Some(Reply::Save);
                }
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        reply = Some(Reply::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        reply = Some(Reply::Cancel);
                    }
                });
            });

        let Some(reply) = reply else {
            return;
        };
        if let Some(req) = self.prompt.take() {
            let token = std::mem::take(&mut self.token_input);
            match reply {
                Reply::Save => req.answer(Some(token)),
                Reply::Cancel => req.answer(None),
            }
        }
    }
}
