use crate::app::TimesheetApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top menu bar.
pub fn show_toolbar(app: &mut TimesheetApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open Chart...").clicked() {
                app.open_chart();
                ui.close_menu();
            }
            if ui
                .add_enabled(app.file_path.is_some(), egui::Button::new("  Reload        F5"))
                .clicked()
            {
                app.reload_chart();
                ui.close_menu();
            }
            if ui.button("  Save Chart As...").clicked() {
                app.save_chart_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export Layout...").clicked() {
                app.export_layout();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Load Sample").clicked() {
                app.load_sample();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            let mut show_today = app.document.labels.show_timeline_marker;
            if ui.checkbox(&mut show_today, "Today marker").changed() {
                app.set_today_marker(show_today);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let name = app
                .file_path
                .as_deref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "sample chart".to_string());
            ui.label(RichText::new(name).size(11.0).weak());
        });
    });
}
