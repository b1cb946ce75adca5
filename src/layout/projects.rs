use super::metrics::TextMetrics;
use super::milestone::MilestoneLabeler;
use super::primitive::{Primitive, Rect, TextRun};
use crate::error::LayoutError;
use crate::model::{CalendarGrid, Project};

/// Stacks project row groups below the label bands.
#[derive(Clone, Copy)]
pub struct ProjectLayout<'a> {
    labeler: MilestoneLabeler<'a>,
    name_width: f32,
    track_width: f32,
    top: f32,
}

impl<'a> ProjectLayout<'a> {
    /// The name column spans `0..name_width`; the milestone track follows it
    /// and is `track_width` wide. Projects start at `top`.
    pub fn new(
        grid: &'a CalendarGrid,
        metrics: &'a dyn TextMetrics,
        name_width: f32,
        track_width: f32,
        top: f32,
    ) -> Self {
        Self {
            labeler: MilestoneLabeler::new(grid, metrics, name_width, track_width),
            name_width,
            track_width,
            top,
        }
    }

    /// Appends every project. Returns the combined height of all projects.
    pub fn layout(
        &self,
        projects: &[Project],
        out: &mut Vec<Primitive>,
    ) -> Result<f32, LayoutError> {
        let mut start = self.top;
        for project in projects {
            self.project(project, start, out)?;
            start += project.block_height();
        }
        Ok(start - self.top)
    }

    fn project(
        &self,
        project: &Project,
        top: f32,
        out: &mut Vec<Primitive>,
    ) -> Result<(), LayoutError> {
        let pattern = &project.pattern;
        let height = project.block_height();

        out.push(
            Rect::styled(
                0.0,
                top,
                self.name_width,
                height,
                pattern.project_background,
                &pattern.project_rect_style,
            )
            .into(),
        );
        out.push(
            TextRun::centered(
                project.phase.clone(),
                0.0,
                top,
                self.name_width,
                height,
                &pattern.project_font,
            )
            .into(),
        );
        out.push(
            Rect::styled(
                self.name_width,
                top,
                self.track_width,
                height,
                pattern.milestone_background,
                &pattern.project_rect_style,
            )
            .into(),
        );

        for (row, milestone) in project.milestones.iter().enumerate() {
            let row_top = top + row as f32 * project.height;
            let placed = self
                .labeler
                .layout(milestone, row_top, project.height, pattern)?;
            out.extend(placed.into_primitives());
        }
        Ok(())
    }
}
