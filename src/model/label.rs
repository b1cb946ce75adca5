use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::date_serde;
use super::style::{Font, VisualLabelPattern};
use crate::error::LayoutError;

/// A free-text marker pinned to a date in a text band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMarker {
    #[serde(with = "date_serde")]
    pub date: NaiveDate,
    pub text: String,
    #[serde(default)]
    pub font: Font,
    /// Rotation of the marker text in degrees, clockwise.
    #[serde(default)]
    pub angle: f32,
}

/// How a label band subdivides its width.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelKind {
    /// One column per calendar year.
    Year,
    /// One column per calendar month.
    Month,
    /// Markers placed at arbitrary dates.
    Text(Vec<LabelMarker>),
}

impl LabelKind {
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Text(_) => "text",
        }
    }
}

/// Bare mode names as written in chart documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelMode {
    Year,
    Month,
    Text,
}

impl FromStr for LabelMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "text" => Ok(Self::Text),
            _ => Err(LayoutError::UnknownLabelMode(s.to_string())),
        }
    }
}

/// One horizontal band above the chart body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLabelRow", into = "RawLabelRow")]
pub struct LabelRow {
    pub height: f32,
    pub kind: LabelKind,
}

#[derive(Serialize, Deserialize)]
struct RawLabelRow {
    mode: String,
    height: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    labels: Vec<LabelMarker>,
}

impl TryFrom<RawLabelRow> for LabelRow {
    type Error = LayoutError;

    fn try_from(raw: RawLabelRow) -> Result<Self, Self::Error> {
        let kind = match raw.mode.parse::<LabelMode>()? {
            LabelMode::Year => LabelKind::Year,
            LabelMode::Month => LabelKind::Month,
            LabelMode::Text => LabelKind::Text(raw.labels),
        };
        Ok(Self {
            height: raw.height,
            kind,
        })
    }
}

impl From<LabelRow> for RawLabelRow {
    fn from(row: LabelRow) -> Self {
        let mode = row.kind.mode().to_string();
        let labels = match row.kind {
            LabelKind::Text(markers) => markers,
            LabelKind::Year | LabelKind::Month => Vec::new(),
        };
        Self {
            mode,
            height: row.height,
            labels,
        }
    }
}

impl LabelRow {
    pub fn year(height: f32) -> Self {
        Self {
            height,
            kind: LabelKind::Year,
        }
    }

    pub fn month(height: f32) -> Self {
        Self {
            height,
            kind: LabelKind::Month,
        }
    }

    pub fn text(height: f32, markers: Vec<LabelMarker>) -> Self {
        Self {
            height,
            kind: LabelKind::Text(markers),
        }
    }
}

/// Every label band plus the width they share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub labels: Vec<LabelRow>,
    /// Width of the date axis, shared by the bands and the milestone tracks.
    pub width: f32,
    /// Draw the dashed "Today" line.
    #[serde(default)]
    pub show_timeline_marker: bool,
    #[serde(default)]
    pub pattern: VisualLabelPattern,
}

impl LabelConfig {
    pub fn total_height(&self) -> f32 {
        self.labels.iter().map(|row| row.height).sum()
    }
}
