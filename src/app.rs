use std::path::PathBuf;

use chrono::NaiveDate;

use timesheet::layout::{MeasureCache, Primitive};
use timesheet::{ChartDocument, ChartFileError, Timesheet};

use crate::settings::Settings;
use crate::ui;
use crate::ui::metrics::EguiTextMetrics;

/// Main application state.
pub struct TimesheetApp {
    pub document: ChartDocument,
    pub file_path: Option<PathBuf>,
    pub show_about: bool,

    // Last successful layout
    pub primitives: Vec<Primitive>,
    pub canvas_size: (f32, f32),

    pub status_message: String,

    settings: Settings,
    settings_path: PathBuf,
    metrics: MeasureCache<EguiTextMetrics>,
    needs_layout: bool,
}

impl TimesheetApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Settings::default_path();
        let settings = Settings::load(&settings_path);

        let mut app = Self {
            document: ChartDocument::sample(today()),
            file_path: None,
            show_about: false,
            primitives: Vec::new(),
            canvas_size: (0.0, 0.0),
            status_message: "Ready".to_string(),
            settings,
            settings_path,
            metrics: MeasureCache::new(EguiTextMetrics::new(cc.egui_ctx.clone())),
            needs_layout: true,
        };

        if let Some(path) = app.settings.last_chart.clone() {
            app.load_from(path);
        }
        app
    }

    // --- File operations ---

    pub fn open_chart(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timesheet Chart", &["json"])
            .pick_file()
        {
            self.load_from(path);
        }
    }

    pub fn reload_chart(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.load_from(path);
        }
    }

    pub fn save_chart_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timesheet Chart", &["json"])
            .set_file_name("chart.json")
            .save_file()
        {
            match timesheet::io::save_chart(&self.document, &path) {
                Ok(()) => {
                    self.status_message = format!("Saved {}", path.display());
                    self.remember(Some(path));
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn export_layout(&mut self) {
        if self.primitives.is_empty() {
            self.status_message = "Nothing to export: the chart has no layout".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Layout JSON", &["json"])
            .set_file_name("layout.json")
            .save_file()
        {
            match timesheet::io::export_layout(&self.primitives, &path) {
                Ok(()) => {
                    self.status_message =
                        format!("Exported {} primitives", self.primitives.len());
                }
                Err(e) => self.status_message = format!("Export failed: {}", e),
            }
        }
    }

    pub fn load_sample(&mut self) {
        self.document = ChartDocument::sample(today());
        self.remember(None);
        self.needs_layout = true;
        self.status_message = "Sample chart loaded".to_string();
    }

    pub fn set_today_marker(&mut self, show: bool) {
        self.document.labels.show_timeline_marker = show;
        self.needs_layout = true;
    }

    fn load_from(&mut self, path: PathBuf) {
        match timesheet::io::load_chart(&path) {
            Ok(document) => {
                self.document = document;
                self.needs_layout = true;
                self.status_message = format!("Loaded {}", path.display());
                self.remember(Some(path));
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not open chart");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    fn remember(&mut self, path: Option<PathBuf>) {
        self.file_path = path.clone();
        if self.settings.last_chart == path {
            return;
        }
        self.settings.last_chart = path;
        if let Err(e) = self.settings.save(&self.settings_path) {
            tracing::warn!(path = %self.settings_path.display(), error = %e, "could not save settings");
        }
    }

    fn relayout(&mut self) {
        self.needs_layout = false;
        let result = Timesheet::try_from(&self.document)
            .map_err(ChartFileError::from)
            .and_then(|sheet| {
                let primitives = sheet.layout(&self.metrics, today())?;
                Ok((sheet.canvas_size(), primitives))
            });

        match result {
            Ok((size, primitives)) => {
                tracing::debug!(primitives = primitives.len(), "chart laid out");
                self.canvas_size = size;
                self.primitives = primitives;
            }
            Err(e) => {
                tracing::error!(error = %e, "layout failed");
                self.primitives.clear();
                self.canvas_size = (0.0, 0.0);
                self.status_message = format!("Layout failed: {}", e);
            }
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl eframe::App for TimesheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.reload_chart();
        }
        if self.needs_layout {
            self.relayout();
        }

        // Top panel: menu bar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} – {}",
                                self.document.start.format("%Y-%m-%d"),
                                self.document.end.format("%Y-%m-%d")
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Projects: {}",
                                self.document.projects.projects.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: the chart
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::canvas::show_canvas(&self.primitives, self.canvas_size, ui);
        });

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
