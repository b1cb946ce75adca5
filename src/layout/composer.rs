//! Top-level chart layout.
//!
//! [`Timesheet`] validates a chart once and then turns it into an ordered
//! list of primitives: label bands, project rows, the "today" line and the
//! holiday lines, in that paint order.

use chrono::NaiveDate;
use egui::Color32;

use super::labels::LabelBandLayout;
use super::metrics::TextMetrics;
use super::primitive::{Line, Primitive, TextRun};
use super::projects::ProjectLayout;
use crate::error::LayoutError;
use crate::model::{CalendarGrid, DateRange, Font, Holiday, LabelConfig, ProjectConfig, TextAlign};

pub const OVERLAY_LINE_WIDTH: f32 = 2.0;
pub const OVERLAY_TEXT_WIDTH: f32 = 200.0;
pub const OVERLAY_TEXT_ANGLE: f32 = 45.0;
pub const TODAY_COLOR: Color32 = Color32::from_rgb(255, 255, 0);
pub const TODAY_DASH: [f32; 2] = [5.0, 5.0];
pub const HOLIDAY_DASH: [f32; 2] = [1.0, 1.0];

/// A validated chart, ready to be laid out.
#[derive(Debug, Clone)]
pub struct Timesheet {
    grid: CalendarGrid,
    labels: LabelConfig,
    projects: ProjectConfig,
    holidays: Vec<Holiday>,
}

fn check_length(what: &str, value: f32) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{} must be a positive number, got {}",
            what, value
        )))
    }
}

impl Timesheet {
    /// Validates the chart configuration.
    ///
    /// # Errors
    /// Returns `LayoutError::InvalidConfig` for non-positive widths or
    /// heights and for milestones or holidays that end before they begin.
    pub fn new(
        range: DateRange,
        labels: LabelConfig,
        projects: ProjectConfig,
        holidays: Vec<Holiday>,
    ) -> Result<Self, LayoutError> {
        check_length("label width", labels.width)?;
        check_length("project width", projects.width)?;
        for row in &labels.labels {
            check_length(&format!("{} label height", row.kind.mode()), row.height)?;
        }
        for project in &projects.projects {
            check_length(&format!("height of project '{}'", project.phase), project.height)?;
            if let Some(m) = project.milestones.iter().find(|m| m.begin > m.end) {
                return Err(LayoutError::InvalidConfig(format!(
                    "milestone '{}' of project '{}' ends ({}) before it begins ({})",
                    m.desc, project.phase, m.end, m.begin
                )));
            }
        }
        if let Some(h) = holidays.iter().find(|h| h.begin > h.end) {
            return Err(LayoutError::InvalidConfig(format!(
                "holiday '{}' ends ({}) before it begins ({})",
                h.desc, h.end, h.begin
            )));
        }

        Ok(Self {
            grid: CalendarGrid::new(range),
            labels,
            projects,
            holidays,
        })
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn range(&self) -> &DateRange {
        self.grid.range()
    }

    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }

    pub fn projects(&self) -> &ProjectConfig {
        &self.projects
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    pub fn label_height(&self) -> f32 {
        self.labels.total_height()
    }

    pub fn project_height(&self) -> f32 {
        self.projects.total_height()
    }

    /// `(width, height)` of the canvas the primitives occupy.
    pub fn canvas_size(&self) -> (f32, f32) {
        (
            self.projects.width + self.labels.width,
            self.label_height() + self.project_height(),
        )
    }

    /// Lays out the whole chart. `today` positions the timeline marker when
    /// the label configuration enables it.
    pub fn layout(
        &self,
        metrics: &dyn TextMetrics,
        today: NaiveDate,
    ) -> Result<Vec<Primitive>, LayoutError> {
        tracing::debug!(
            months = self.grid.len(),
            projects = self.projects.projects.len(),
            holidays = self.holidays.len(),
            "laying out timesheet"
        );

        let mut out = Vec::new();
        let label_height = LabelBandLayout::new(
            &self.grid,
            &self.labels.pattern,
            self.projects.width,
            self.labels.width,
        )
        .layout(&self.labels.labels, &mut out);

        ProjectLayout::new(
            &self.grid,
            metrics,
            self.projects.width,
            self.labels.width,
            label_height,
        )
        .layout(&self.projects.projects, &mut out)?;

        if self.labels.show_timeline_marker {
            self.day_line(today, TODAY_COLOR, TODAY_DASH, "Today", &mut out);
        }
        for holiday in &self.holidays {
            self.day_line(holiday.begin, holiday.fill, HOLIDAY_DASH, &holiday.desc, &mut out);
            self.day_line(holiday.end, holiday.fill, HOLIDAY_DASH, "", &mut out);
        }

        tracing::debug!(primitives = out.len(), "timesheet laid out");
        Ok(out)
    }

    /// Vertical line through the project area at `date`, with its caption
    /// hanging below the chart.
    fn day_line(
        &self,
        date: NaiveDate,
        color: Color32,
        dash: [f32; 2],
        text: &str,
        out: &mut Vec<Primitive>,
    ) {
        if !self.range().contains(date) {
            tracing::debug!(%date, "overlay line outside the visible range");
        }
        let x = self.projects.width + self.labels.width * self.grid.position_of(date);
        let top = self.label_height();
        let bottom = top + self.project_height();

        out.push(
            Line {
                x,
                y0: top,
                y1: bottom,
                stroke: color,
                width: OVERLAY_LINE_WIDTH,
                dash_pattern: Some(dash),
            }
            .into(),
        );
        if !text.is_empty() {
            let font = Font::default();
            let caption = TextRun::aligned(
                text,
                x,
                bottom,
                OVERLAY_TEXT_WIDTH,
                font.size,
                &font,
                TextAlign::Left,
            );
            out.push(caption.rotated(OVERLAY_TEXT_ANGLE).into());
        }
    }
}
