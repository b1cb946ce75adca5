use egui::Color32;

use super::metrics::TextMetrics;
use super::primitive::{Primitive, Rect, TextRun};
use crate::error::LayoutError;
use crate::model::{CalendarGrid, DateRange, Milestone, TextAlign, VisualProjectPattern};

/// Vertical padding added to the description height to size a block.
pub const BLOCK_PADDING: f32 = 10.0;

/// Where a milestone's time label is drawn relative to its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLabelPlacement {
    /// Centred on the block, in white.
    Inside,
    /// Right-aligned against the block's left edge.
    Outside,
}

impl TimeLabelPlacement {
    /// The label goes inside only when it is strictly narrower than the block.
    pub fn for_widths(label_width: f32, block_width: f32) -> Self {
        if label_width < block_width {
            Self::Inside
        } else {
            Self::Outside
        }
    }
}

/// `"HH:MM - HH:MM"`, or `"HH:MM - YYYY-MM-DD"` when the milestone ends after
/// the visible range.
pub fn time_label(milestone: &Milestone, range: &DateRange) -> String {
    let begin = milestone.begin.format("%H:%M");
    if milestone.end.date() > range.end() {
        format!("{} - {}", begin, milestone.end.format("%Y-%m-%d"))
    } else {
        format!("{} - {}", begin, milestone.end.format("%H:%M"))
    }
}

/// Geometry of one milestone sub-row.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneLayout {
    pub block: Rect,
    pub description: TextRun,
    pub time_label: TextRun,
    pub placement: TimeLabelPlacement,
}

impl MilestoneLayout {
    /// Paint order: block, description, time label.
    pub fn into_primitives(self) -> [Primitive; 3] {
        [
            self.block.into(),
            self.description.into(),
            self.time_label.into(),
        ]
    }
}

/// Places milestone blocks on a track and decides where their labels go.
#[derive(Clone, Copy)]
pub struct MilestoneLabeler<'a> {
    grid: &'a CalendarGrid,
    metrics: &'a dyn TextMetrics,
    track_left: f32,
    track_width: f32,
}

impl<'a> MilestoneLabeler<'a> {
    pub fn new(
        grid: &'a CalendarGrid,
        metrics: &'a dyn TextMetrics,
        track_left: f32,
        track_width: f32,
    ) -> Self {
        Self {
            grid,
            metrics,
            track_left,
            track_width,
        }
    }

    /// Horizontal `(left, width)` of the block. The end is clamped to the
    /// visible range, and a span that starts before the range never has a
    /// negative width.
    pub fn span(&self, milestone: &Milestone) -> (f32, f32) {
        let begin = self.grid.position_of(milestone.begin.date()) * self.track_width;
        let end = self.grid.position_of(milestone.end.date()) * self.track_width;
        (self.track_left + begin, (end - begin).max(0.0))
    }

    /// Lays out `milestone` in the sub-row `row_top..row_top + row_height`.
    pub fn layout(
        &self,
        milestone: &Milestone,
        row_top: f32,
        row_height: f32,
        pattern: &VisualProjectPattern,
    ) -> Result<MilestoneLayout, LayoutError> {
        let range = self.grid.range();
        if milestone.end.date() > range.end() {
            tracing::warn!(
                milestone = %milestone.desc,
                end = %milestone.end,
                range_end = %range.end(),
                "milestone ends after the visible range; clamping its block"
            );
        }

        let font = &pattern.milestone_font;
        let desc_size = self.metrics.measure(&milestone.desc, font)?;
        let (left, width) = self.span(milestone);

        let block_height = desc_size.height + BLOCK_PADDING;
        let block = Rect::styled(
            left,
            row_top + (row_height - block_height) / 2.0,
            width,
            block_height,
            pattern.milestone_block_background,
            &pattern.milestone_block_rect_style,
        );

        let description = TextRun::aligned(
            milestone.desc.clone(),
            left + width,
            row_top,
            2.0 * desc_size.width,
            row_height,
            font,
            TextAlign::Left,
        );

        let label = time_label(milestone, range);
        let label_width = self.metrics.measure(&label, font)?.width;
        let placement = TimeLabelPlacement::for_widths(label_width, width);
        tracing::trace!(
            milestone = %milestone.desc,
            label_width,
            block_width = width,
            ?placement,
            "placed time label"
        );

        let time_label = match placement {
            TimeLabelPlacement::Inside => TextRun::centered(
                label,
                left,
                row_top,
                width,
                row_height,
                &milestone.font.recolored(Color32::WHITE),
            ),
            TimeLabelPlacement::Outside => TextRun::aligned(
                label,
                left - width,
                row_top,
                width,
                row_height,
                font,
                TextAlign::Right,
            ),
        };

        Ok(MilestoneLayout {
            block,
            description,
            time_label,
            placement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::metrics::{AverageCharMetrics, TextSize};
    use crate::model::Font;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid test date-time")
    }

    fn year_grid() -> CalendarGrid {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date");
        CalendarGrid::new(DateRange::new(start, end).expect("valid range"))
    }

    /// Reports a fixed width for every string.
    struct FixedMetrics(f32);

    impl TextMetrics for FixedMetrics {
        fn measure(&self, _text: &str, font: &Font) -> Result<TextSize, LayoutError> {
            Ok(TextSize {
                width: self.0,
                height: font.size,
            })
        }
    }

    struct BrokenMetrics;

    impl TextMetrics for BrokenMetrics {
        fn measure(&self, text: &str, _font: &Font) -> Result<TextSize, LayoutError> {
            Err(LayoutError::Metrics {
                text: text.to_string(),
                reason: "no font backend".into(),
            })
        }
    }

    #[test]
    fn test_placement_boundary_is_outside() {
        struct TestCase {
            label: f32,
            block: f32,
            expected: TimeLabelPlacement,
        }

        let cases = [
            TestCase { label: 40.0, block: 100.0, expected: TimeLabelPlacement::Inside },
            TestCase { label: 99.9, block: 100.0, expected: TimeLabelPlacement::Inside },
            TestCase { label: 100.0, block: 100.0, expected: TimeLabelPlacement::Outside },
            TestCase { label: 120.0, block: 100.0, expected: TimeLabelPlacement::Outside },
            TestCase { label: 0.0, block: 0.0, expected: TimeLabelPlacement::Outside },
        ];

        for case in &cases {
            assert_eq!(
                TimeLabelPlacement::for_widths(case.label, case.block),
                case.expected,
                "label {} in block {}",
                case.label,
                case.block
            );
        }
    }

    #[test]
    fn test_time_label_formats() {
        let grid = year_grid();
        let inside = Milestone::new(at(2024, 3, 1, 9, 0), at(2024, 3, 4, 17, 30), "Review");
        assert_eq!(time_label(&inside, grid.range()), "09:00 - 17:30");

        let past = Milestone::new(at(2024, 12, 1, 8, 15), at(2025, 2, 1, 0, 0), "Rollout");
        assert_eq!(time_label(&past, grid.range()), "08:15 - 2025-02-01");
    }

    #[test]
    fn test_wide_block_gets_label_inside() {
        let grid = year_grid();
        let metrics = FixedMetrics(50.0);
        let labeler = MilestoneLabeler::new(&grid, &metrics, 200.0, 1200.0);
        let pattern = VisualProjectPattern::default();
        let milestone = Milestone::new(at(2024, 6, 1, 0, 0), at(2024, 7, 1, 0, 0), "Build");

        let layout = labeler
            .layout(&milestone, 100.0, 40.0, &pattern)
            .expect("layout should succeed");

        assert_eq!(layout.placement, TimeLabelPlacement::Inside);
        let block = &layout.block;
        assert!((block.left - (200.0 + 1200.0 * (5.0 + 1.0 / 30.0) / 12.0)).abs() < 1e-2);
        assert!(block.width > 50.0);
        assert_eq!(block.height, 14.0 + BLOCK_PADDING);
        assert_eq!(block.top, 100.0 + (40.0 - 24.0) / 2.0);
        assert_eq!(block.fill, pattern.milestone_block_background);
        assert_eq!(block.corner_radius, 3.0);

        assert_eq!(layout.time_label.left, block.left);
        assert_eq!(layout.time_label.width, block.width);
        assert_eq!(layout.time_label.align, TextAlign::Center);
        assert_eq!(layout.time_label.font.color, Color32::WHITE);

        assert_eq!(layout.description.left, block.right());
        assert_eq!(layout.description.width, 100.0);
        assert_eq!(layout.description.align, TextAlign::Left);
        assert_eq!(layout.description.top, 100.0);
        assert_eq!(layout.description.height, 40.0);
    }

    #[test]
    fn test_narrow_block_flips_label_outside() {
        let grid = year_grid();
        let metrics = AverageCharMetrics::default();
        let labeler = MilestoneLabeler::new(&grid, &metrics, 0.0, 1200.0);
        let pattern = VisualProjectPattern::default();
        let milestone = Milestone::new(at(2024, 3, 5, 9, 0), at(2024, 3, 6, 12, 0), "Sync");

        let layout = labeler
            .layout(&milestone, 0.0, 30.0, &pattern)
            .expect("layout should succeed");

        assert_eq!(layout.placement, TimeLabelPlacement::Outside);
        let block = &layout.block;
        let label = &layout.time_label;
        assert_eq!(label.text, "09:00 - 12:00");
        assert_eq!(label.align, TextAlign::Right);
        assert_eq!(label.width, block.width);
        assert!((label.left + label.width - block.left).abs() < 1e-4);
        assert_eq!(label.font, pattern.milestone_font);
    }

    #[test]
    fn test_end_past_range_is_clamped() {
        let grid = year_grid();
        let metrics = FixedMetrics(10.0);
        let labeler = MilestoneLabeler::new(&grid, &metrics, 0.0, 1200.0);
        let milestone = Milestone::new(at(2024, 12, 1, 0, 0), at(2025, 3, 1, 0, 0), "Launch");

        let (left, width) = labeler.span(&milestone);
        assert!((left + width - 1200.0).abs() < 1e-3);
        assert_eq!(
            grid.position_of(milestone.end.date()),
            grid.position_of(grid.range().end())
        );
    }

    #[test]
    fn test_span_before_range_never_negative() {
        let grid = year_grid();
        let metrics = FixedMetrics(10.0);
        let labeler = MilestoneLabeler::new(&grid, &metrics, 0.0, 1200.0);
        let milestone = Milestone::new(at(2023, 12, 31, 0, 0), at(2024, 1, 5, 0, 0), "Prep");

        let (left, width) = labeler.span(&milestone);
        assert_eq!(left, 0.0);
        assert!((width - 1200.0 * grid.position_of(milestone.end.date())).abs() < 1e-3);
    }

    #[test]
    fn test_begin_before_range_starts_at_track_left() {
        let grid = year_grid();
        let metrics = FixedMetrics(10.0);
        let labeler = MilestoneLabeler::new(&grid, &metrics, 100.0, 1200.0);
        let milestone = Milestone::new(at(2023, 12, 31, 0, 0), at(2024, 1, 20, 0, 0), "Prep");

        let layout = labeler
            .layout(&milestone, 0.0, 30.0, &VisualProjectPattern::default())
            .expect("layout should succeed");
        assert_eq!(layout.block.left, 100.0);
        let jan_20 = 1200.0 * (20.0 / 31.0) / 12.0;
        assert!((layout.block.width - jan_20).abs() < 1e-3);
    }

    #[test]
    fn test_metrics_failure_propagates() {
        let grid = year_grid();
        let labeler = MilestoneLabeler::new(&grid, &BrokenMetrics, 0.0, 1200.0);
        let milestone = Milestone::new(at(2024, 2, 1, 0, 0), at(2024, 2, 15, 0, 0), "Plan");

        let err = labeler
            .layout(&milestone, 0.0, 30.0, &VisualProjectPattern::default())
            .expect_err("missing metrics must not be guessed");
        assert!(matches!(err, LayoutError::Metrics { .. }));
    }
}
