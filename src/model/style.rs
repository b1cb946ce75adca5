//! Visual configuration consumed by the layout engine.
//!
//! Every struct here is plain data with `Default` values. All fields carry
//! `#[serde(default)]` so a chart document may override only what it needs.
//! Colours are written as `#RRGGBB` / `#RRGGBBAA` or a basic CSS colour name.

use egui::Color32;
use serde::{Deserialize, Serialize};

// ─── Colour serde helpers ───────────────────────────────────────────────────

pub mod hex_color {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_color(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }

    pub fn format_color(color: Color32) -> String {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }

    /// Parses `#RRGGBB`, `#RRGGBBAA` or a basic CSS colour keyword.
    pub fn parse_color(s: &str) -> Result<Color32, String> {
        let s = s.trim();
        if let Some(named) = named_color(s) {
            return Ok(named);
        }
        let hex = s.trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .ok_or_else(|| format!("Invalid hex color '{}'", s))
                .and_then(|c| u8::from_str_radix(c, 16).map_err(|e| e.to_string()))
        };
        match hex.len() {
            6 => Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color32::from_rgba_unmultiplied(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => Err(format!(
                "Invalid color '{}': expected 6 or 8 hex digits or a color name",
                s
            )),
        }
    }

    fn named_color(name: &str) -> Option<Color32> {
        let color = match name.to_ascii_lowercase().as_str() {
            "white" => Color32::WHITE,
            "black" => Color32::BLACK,
            "red" => Color32::from_rgb(255, 0, 0),
            "green" => Color32::from_rgb(0, 128, 0),
            "blue" => Color32::from_rgb(0, 0, 255),
            "yellow" => Color32::from_rgb(255, 255, 0),
            "orange" => Color32::from_rgb(255, 165, 0),
            "gray" | "grey" => Color32::from_rgb(128, 128, 128),
            "transparent" => Color32::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }
}

// ─── Text ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Horizontal alignment of text inside its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Size in pixels.
    pub size: f32,
    #[serde(with = "hex_color")]
    pub color: Color32,
    pub family: String,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub align: TextAlign,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color32::BLACK,
            family: "Arial".into(),
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            align: TextAlign::Center,
        }
    }
}

impl Font {
    /// Default font at the given size and colour.
    pub fn sized(size: f32, color: Color32) -> Self {
        Self {
            size,
            color,
            ..Default::default()
        }
    }

    /// Same font in a different colour.
    pub fn recolored(&self, color: Color32) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }
}

// ─── Rectangles ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectStyle {
    #[serde(with = "hex_color")]
    pub stroke: Color32,
    pub stroke_width: f32,
    pub corner_radius: f32,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            stroke: Color32::WHITE,
            stroke_width: 0.0,
            corner_radius: 0.0,
            opacity: 1.0,
        }
    }
}

impl RectStyle {
    pub fn outlined(stroke: Color32, stroke_width: f32) -> Self {
        Self {
            stroke,
            stroke_width,
            ..Default::default()
        }
    }

    pub fn rounded(corner_radius: f32) -> Self {
        Self {
            corner_radius,
            ..Default::default()
        }
    }
}

// ─── Patterns ───────────────────────────────────────────────────────────────

/// Styling shared by every label band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualLabelPattern {
    #[serde(with = "hex_color")]
    pub label_background: Color32,
    pub year_label_font: Font,
    pub month_label_font: Font,
    pub label_rect_style: RectStyle,
}

impl Default for VisualLabelPattern {
    fn default() -> Self {
        Self {
            label_background: Color32::from_rgb(0x1F, 0x38, 0x63),
            year_label_font: Font::sized(18.0, Color32::WHITE),
            month_label_font: Font::sized(16.0, Color32::WHITE),
            label_rect_style: RectStyle::outlined(Color32::WHITE, 1.0),
        }
    }
}

/// Styling of one project's row group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualProjectPattern {
    #[serde(with = "hex_color")]
    pub project_background: Color32,
    #[serde(with = "hex_color")]
    pub milestone_background: Color32,
    #[serde(with = "hex_color")]
    pub milestone_block_background: Color32,
    pub project_font: Font,
    pub milestone_font: Font,
    pub milestone_block_rect_style: RectStyle,
    pub project_rect_style: RectStyle,
}

impl Default for VisualProjectPattern {
    fn default() -> Self {
        Self {
            project_background: Color32::from_rgb(0xDE, 0xEA, 0xF6),
            milestone_background: Color32::from_rgb(0xF2, 0xF2, 0xF2),
            milestone_block_background: Color32::from_rgb(0x2E, 0x75, 0xB6),
            project_font: Font::default(),
            milestone_font: Font::default(),
            milestone_block_rect_style: RectStyle::rounded(3.0),
            project_rect_style: RectStyle::outlined(Color32::WHITE, 3.0),
        }
    }
}
