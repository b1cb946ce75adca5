use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};

use super::dates::date_serde;
use super::style::hex_color;

/// A non-working interval, marked by a line at each end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(with = "date_serde")]
    pub begin: NaiveDate,
    #[serde(with = "date_serde")]
    pub end: NaiveDate,
    #[serde(default)]
    pub desc: String,
    #[serde(with = "hex_color", default = "default_fill")]
    pub fill: Color32,
}

fn default_fill() -> Color32 {
    Color32::from_rgb(255, 0, 0)
}
