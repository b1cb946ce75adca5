use crate::app::TimesheetApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimesheetApp, ctx: &Context) {
    let mut open = app.show_about;
    Window::new(RichText::new("About").strong().size(14.0))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new("Rust Timesheet").strong().size(16.0));
            ui.label(
                RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
            ui.label("Lays out project timesheets on a month calendar.");
            ui.label(
                RichText::new("Charts are JSON documents; see File → Open Chart.")
                    .color(theme::TEXT_DIM),
            );
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        open = false;
    }
    app.show_about = open;
}
