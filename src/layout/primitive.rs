//! Drawable output of the layout engine.
//!
//! Primitives are plain geometry in canvas pixels (origin top-left, y down).
//! A rendering surface paints them in slice order.

use egui::Color32;
use serde::Serialize;

use crate::model::style::hex_color;
use crate::model::{Font, RectStyle, TextAlign};

/// Outline of a [`Rect`] primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RectKind {
    #[default]
    Box,
    /// Triangle inscribed in the rect: flat edge on top, tip at the bottom centre.
    DownTriangle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    #[serde(with = "hex_color")]
    pub fill: Color32,
    #[serde(with = "hex_color")]
    pub stroke: Color32,
    pub stroke_width: f32,
    pub corner_radius: f32,
    pub opacity: f32,
    pub kind: RectKind,
}

impl Rect {
    /// A box filled with `fill` and outlined per `style`.
    pub fn styled(
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        fill: Color32,
        style: &RectStyle,
    ) -> Self {
        Self {
            left,
            top,
            width,
            height,
            fill,
            stroke: style.stroke,
            stroke_width: style.stroke_width,
            corner_radius: style.corner_radius,
            opacity: style.opacity,
            kind: RectKind::Box,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Text laid out in a box. The surface aligns it horizontally per `align`
/// and centres it vertically within `height`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub font: Font,
    pub align: TextAlign,
    /// Clockwise rotation in degrees around the top-left corner.
    pub angle: f32,
}

impl TextRun {
    pub fn aligned(
        text: impl Into<String>,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        font: &Font,
        align: TextAlign,
    ) -> Self {
        Self {
            text: text.into(),
            left,
            top,
            width,
            height,
            font: font.clone(),
            align,
            angle: 0.0,
        }
    }

    pub fn centered(
        text: impl Into<String>,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        font: &Font,
    ) -> Self {
        Self::aligned(text, left, top, width, height, font, TextAlign::Center)
    }

    pub fn rotated(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

/// A vertical line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub x: f32,
    pub y0: f32,
    pub y1: f32,
    #[serde(with = "hex_color")]
    pub stroke: Color32,
    pub width: f32,
    /// `[dash, gap]` lengths in pixels; solid when `None`.
    pub dash_pattern: Option<[f32; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Rect(Rect),
    Text(TextRun),
    Line(Line),
}

impl Primitive {
    pub fn as_rect(&self) -> Option<&Rect> {
        match self {
            Self::Rect(rect) => Some(rect),
            Self::Text(_) | Self::Line(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rect(_) | Self::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Self::Line(line) => Some(line),
            Self::Rect(_) | Self::Text(_) => None,
        }
    }
}

impl From<Rect> for Primitive {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

impl From<TextRun> for Primitive {
    fn from(text: TextRun) -> Self {
        Self::Text(text)
    }
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}
