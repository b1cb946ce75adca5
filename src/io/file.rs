use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::layout::{Primitive, Timesheet};
use crate::model::dates::date_serde;
use crate::model::{
    DateRange, Font, Holiday, LabelConfig, LabelMarker, LabelRow, Milestone, Project,
    ProjectConfig, VisualLabelPattern, VisualProjectPattern,
};

#[derive(Debug, thiserror::Error)]
pub enum ChartFileError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed chart '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl ChartFileError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A chart as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    #[serde(with = "date_serde")]
    pub start: NaiveDate,
    #[serde(with = "date_serde")]
    pub end: NaiveDate,
    pub labels: LabelConfig,
    pub projects: ProjectConfig,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl ChartDocument {
    /// Validates the document into a chart that can be laid out.
    pub fn to_timesheet(&self) -> Result<Timesheet, LayoutError> {
        Timesheet::new(
            DateRange::new(self.start, self.end)?,
            self.labels.clone(),
            self.projects.clone(),
            self.holidays.clone(),
        )
    }

    /// A demonstration chart covering the year of `today`.
    pub fn sample(today: NaiveDate) -> Self {
        let year = today.year();
        let on = |month: u32, day: u32| NaiveDate::from_ymd_opt(year, month, day).unwrap_or(today);
        let at = |month: u32, day: u32, hour: u32| -> NaiveDateTime {
            on(month, day).and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
        };

        let planning = Project {
            pattern: VisualProjectPattern {
                milestone_block_background: Color32::from_rgb(70, 130, 180),
                ..Default::default()
            },
            ..Project::new(
                "Planning",
                36.0,
                vec![
                    Milestone::new(at(1, 8, 9), at(1, 19, 17), "Kickoff"),
                    Milestone::new(at(2, 1, 9), at(3, 15, 18), "Requirements"),
                ],
            )
        };
        let execution = Project {
            pattern: VisualProjectPattern {
                milestone_block_background: Color32::from_rgb(60, 179, 113),
                ..Default::default()
            },
            ..Project::new(
                "Execution",
                36.0,
                vec![
                    Milestone::new(at(3, 18, 9), at(6, 28, 17), "Build"),
                    Milestone::new(at(7, 1, 9), at(7, 3, 12), "Freeze"),
                    Milestone::new(at(7, 8, 9), at(9, 30, 17), "Test"),
                ],
            )
        };
        let rollout = Project {
            pattern: VisualProjectPattern {
                milestone_block_background: Color32::from_rgb(218, 112, 214),
                ..Default::default()
            },
            ..Project::new(
                "Rollout",
                36.0,
                vec![Milestone::new(
                    at(11, 2, 9),
                    NaiveDate::from_ymd_opt(year + 1, 2, 27)
                        .unwrap_or(today)
                        .and_time(NaiveTime::MIN),
                    "Launch",
                )],
            )
        };

        Self {
            start: on(1, 1),
            end: on(12, 31),
            labels: LabelConfig {
                labels: vec![
                    LabelRow::year(32.0),
                    LabelRow::month(28.0),
                    LabelRow::text(
                        60.0,
                        vec![
                            LabelMarker {
                                date: on(3, 15),
                                text: "Scope signed".into(),
                                font: Font::default(),
                                angle: -30.0,
                            },
                            LabelMarker {
                                date: on(9, 30),
                                text: "Code complete".into(),
                                font: Font::default(),
                                angle: -30.0,
                            },
                        ],
                    ),
                ],
                width: 1200.0,
                show_timeline_marker: true,
                pattern: VisualLabelPattern::default(),
            },
            projects: ProjectConfig {
                projects: vec![planning, execution, rollout],
                width: 160.0,
            },
            holidays: vec![Holiday {
                begin: on(8, 1),
                end: on(8, 21),
                desc: "Summer break".into(),
                fill: Color32::from_rgb(229, 57, 53),
            }],
        }
    }
}

impl TryFrom<&ChartDocument> for Timesheet {
    type Error = LayoutError;

    fn try_from(document: &ChartDocument) -> Result<Self, Self::Error> {
        document.to_timesheet()
    }
}

/// Load a chart document from a JSON file.
pub fn load_chart(path: &Path) -> Result<ChartDocument, ChartFileError> {
    let json = std::fs::read_to_string(path).map_err(|e| ChartFileError::io(path, e))?;
    let document: ChartDocument =
        serde_json::from_str(&json).map_err(|e| ChartFileError::json(path, e))?;
    tracing::info!(
        path = %path.display(),
        projects = document.projects.projects.len(),
        "loaded chart"
    );
    Ok(document)
}

/// Save a chart document to a JSON file.
pub fn save_chart(document: &ChartDocument, path: &Path) -> Result<(), ChartFileError> {
    let json = serde_json::to_string_pretty(document).map_err(|e| ChartFileError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| ChartFileError::io(path, e))
}

/// Write computed primitives as JSON, in paint order.
pub fn export_layout(primitives: &[Primitive], path: &Path) -> Result<(), ChartFileError> {
    let json =
        serde_json::to_string_pretty(primitives).map_err(|e| ChartFileError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| ChartFileError::io(path, e))?;
    tracing::info!(path = %path.display(), primitives = primitives.len(), "exported layout");
    Ok(())
}
