//! Login View Widget
//! Password prompt shown while no session is open.

use egui::{Color32, RichText};

/// Centered password form. `show` returns the submitted password, if any.
#[derive(Default)]
pub struct LoginView {
    password: String,
    pub error: Option<&'static str>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<String> {
        let mut submitted = None;

        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.label(RichText::new("📊 FinBoard").size(26.0).strong());
            ui.label(RichText::new("Enter the dashboard password").size(13.0));
            ui.add_space(12.0);

            let response = ui.add_sized(
                [220.0, 24.0],
                egui::TextEdit::singleline(&mut self.password).password(true),
            );
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(8.0);
            if ui.button("Sign in").clicked() || enter_pressed {
                submitted = Some(std::mem::take(&mut self.password));
            }

            if let Some(error) = self.error {
                ui.add_space(8.0);
                ui.label(RichText::new(error).color(Color32::from_rgb(220, 53, 69)));
            }
        });

        submitted
    }
}
