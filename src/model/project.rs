use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::dates::date_time_serde;
use super::style::{Font, VisualProjectPattern};

/// A dated step of a project, drawn as one block in its own sub-row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(with = "date_time_serde")]
    pub begin: NaiveDateTime,
    #[serde(with = "date_time_serde")]
    pub end: NaiveDateTime,
    pub desc: String,
    /// Font of the time label when it fits inside the block.
    #[serde(default)]
    pub font: Font,
}

impl Milestone {
    pub fn new(begin: NaiveDateTime, end: NaiveDateTime, desc: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            desc: desc.into(),
            font: Font::default(),
        }
    }
}

/// A project phase with its milestones. Each milestone gets a sub-row of
/// `height` pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub phase: String,
    pub height: f32,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub pattern: VisualProjectPattern,
}

impl Project {
    pub fn new(phase: impl Into<String>, height: f32, milestones: Vec<Milestone>) -> Self {
        Self {
            phase: phase.into(),
            height,
            milestones,
            pattern: VisualProjectPattern::default(),
        }
    }

    /// Height of the whole row group.
    pub fn block_height(&self) -> f32 {
        self.height * self.milestones.len() as f32
    }
}

/// All projects plus the width of the project-name column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub projects: Vec<Project>,
    pub width: f32,
}

impl ProjectConfig {
    pub fn total_height(&self) -> f32 {
        self.projects.iter().map(Project::block_height).sum()
    }
}
