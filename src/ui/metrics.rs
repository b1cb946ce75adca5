use egui::{FontFamily, FontId};

use timesheet::layout::{TextMetrics, TextSize};
use timesheet::model::Font;
use timesheet::LayoutError;

/// egui font for a chart font. egui ships one proportional and one monospace
/// family, so family names only choose between the two.
pub fn font_id(font: &Font) -> FontId {
    let family = match font.family.trim().to_lowercase().as_str() {
        "monospace" | "courier" | "courier new" | "consolas" | "menlo" => FontFamily::Monospace,
        _ => FontFamily::Proportional,
    };
    FontId::new(font.size, family)
}

/// Measures text with the egui font system of a running context.
pub struct EguiTextMetrics {
    ctx: egui::Context,
}

impl EguiTextMetrics {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextMetrics for EguiTextMetrics {
    fn measure(&self, text: &str, font: &Font) -> Result<TextSize, LayoutError> {
        if !font.size.is_finite() || font.size <= 0.0 {
            return Err(LayoutError::Metrics {
                text: text.to_string(),
                reason: format!("unusable font size {}", font.size),
            });
        }
        let galley = self
            .ctx
            .fonts(|fonts| fonts.layout_no_wrap(text.to_owned(), font_id(font), font.color));
        let size = galley.size();
        Ok(TextSize {
            width: size.x,
            height: size.y,
        })
    }
}
