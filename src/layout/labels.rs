use egui::Color32;

use super::primitive::{Primitive, Rect, RectKind, TextRun};
use crate::model::{
    CalendarGrid, Font, LabelKind, LabelMarker, LabelRow, TextAlign, VisualLabelPattern,
};

/// Side of the triangle under a text-band marker.
pub const MARKER_SIZE: f32 = 10.0;
/// Box width of marker text.
pub const MARKER_TEXT_WIDTH: f32 = 200.0;
/// Marker text starts this far above the band bottom.
const MARKER_TEXT_RISE: f32 = 25.0;
/// Marker text starts this far right of the marker position.
const MARKER_TEXT_INSET: f32 = 5.0;

/// Vertical extent of one band.
#[derive(Debug, Clone, Copy)]
struct Band {
    top: f32,
    height: f32,
}

/// Lays out the label bands stacked above the chart body.
#[derive(Debug, Clone, Copy)]
pub struct LabelBandLayout<'a> {
    grid: &'a CalendarGrid,
    pattern: &'a VisualLabelPattern,
    left: f32,
    width: f32,
}

impl<'a> LabelBandLayout<'a> {
    /// Bands span `left..left + width` horizontally.
    pub fn new(
        grid: &'a CalendarGrid,
        pattern: &'a VisualLabelPattern,
        left: f32,
        width: f32,
    ) -> Self {
        Self {
            grid,
            pattern,
            left,
            width,
        }
    }

    /// Appends every band, starting at y = 0. Returns the total band height.
    pub fn layout(&self, rows: &[LabelRow], out: &mut Vec<Primitive>) -> f32 {
        let mut top = 0.0;
        for row in rows {
            let band = Band {
                top,
                height: row.height,
            };
            match &row.kind {
                LabelKind::Year => self.year_band(band, out),
                LabelKind::Month => self.month_band(band, out),
                LabelKind::Text(markers) => self.text_band(band, markers, out),
            }
            top += row.height;
        }
        top
    }

    /// Left edge of the column that begins after `months` grid months.
    fn month_edge(&self, months: usize) -> f32 {
        if months >= self.grid.len() {
            return self.left + self.width;
        }
        self.left + self.width * months as f32 / self.grid.len() as f32
    }

    fn cell(
        &self,
        text: String,
        left: f32,
        right: f32,
        band: Band,
        font: &Font,
    ) -> [Primitive; 2] {
        let width = right - left;
        [
            Rect::styled(
                left,
                band.top,
                width,
                band.height,
                self.pattern.label_background,
                &self.pattern.label_rect_style,
            )
            .into(),
            TextRun::centered(text, left, band.top, width, band.height, font).into(),
        ]
    }

    fn year_band(&self, band: Band, out: &mut Vec<Primitive>) {
        let mut consumed = 0;
        for (year, months) in self.grid.years() {
            let left = self.month_edge(consumed);
            consumed += months;
            let right = self.month_edge(consumed);
            let font = &self.pattern.year_label_font;
            out.extend(self.cell(year.to_string(), left, right, band, font));
        }
    }

    fn month_band(&self, band: Band, out: &mut Vec<Primitive>) {
        for (i, month) in self.grid.months().iter().enumerate() {
            let left = self.month_edge(i);
            let right = self.month_edge(i + 1);
            let font = &self.pattern.month_label_font;
            out.extend(self.cell(month.label.to_string(), left, right, band, font));
        }
    }

    fn text_band(&self, band: Band, markers: &[LabelMarker], out: &mut Vec<Primitive>) {
        let bottom = band.top + band.height;
        for marker in markers {
            let x = self.left + self.width * self.grid.position_of(marker.date);
            out.push(
                Rect {
                    left: x,
                    top: bottom - MARKER_SIZE,
                    width: MARKER_SIZE,
                    height: MARKER_SIZE,
                    fill: self.pattern.label_background,
                    stroke: Color32::BLACK,
                    stroke_width: 1.0,
                    corner_radius: 0.0,
                    opacity: 1.0,
                    kind: RectKind::DownTriangle,
                }
                .into(),
            );
            out.push(
                TextRun::aligned(
                    marker.text.clone(),
                    x + MARKER_TEXT_INSET,
                    bottom - MARKER_TEXT_RISE,
                    MARKER_TEXT_WIDTH,
                    MARKER_TEXT_RISE,
                    &marker.font,
                    TextAlign::Left,
                )
                .rotated(marker.angle)
                .into(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DateRange;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn grid(start: NaiveDate, end: NaiveDate) -> CalendarGrid {
        CalendarGrid::new(DateRange::new(start, end).expect("valid test range"))
    }

    fn rects(out: &[Primitive]) -> Vec<&Rect> {
        out.iter().filter_map(Primitive::as_rect).collect()
    }

    fn texts(out: &[Primitive]) -> Vec<&TextRun> {
        out.iter().filter_map(Primitive::as_text).collect()
    }

    #[test]
    fn test_year_band_widths_sum_to_band_width() {
        let g = grid(date(2023, 10, 1), date(2025, 2, 28));
        let pattern = VisualLabelPattern::default();
        let layout = LabelBandLayout::new(&g, &pattern, 150.0, 1000.0);
        let mut out = Vec::new();
        layout.layout(&[LabelRow::year(30.0)], &mut out);

        let cells = rects(&out);
        assert_eq!(cells.len(), 3);
        let total: f32 = cells.iter().map(|r| r.width).sum();
        assert!((total - 1000.0).abs() < 1e-3, "total {total}");
        assert_eq!(cells[0].left, 150.0);
        assert!((cells[2].right() - 1150.0).abs() < 1e-3);

        // 3 + 12 + 2 months
        assert!((cells[0].width - 1000.0 / 17.0 * 3.0).abs() < 1e-3);
        assert!((cells[1].width - 1000.0 / 17.0 * 12.0).abs() < 1e-3);

        for pair in cells.windows(2) {
            let gap = (pair[0].right() - pair[1].left).abs();
            assert!(gap < 1e-3, "columns must be contiguous");
        }

        let labels: Vec<_> = texts(&out).iter().map(|t| t.text.clone()).collect();
        assert_eq!(labels, vec!["2023", "2024", "2025"]);
    }

    #[test]
    fn test_month_band_equal_columns() {
        let g = grid(date(2024, 1, 15), date(2024, 3, 2));
        let pattern = VisualLabelPattern::default();
        let layout = LabelBandLayout::new(&g, &pattern, 0.0, 300.0);
        let mut out = Vec::new();
        layout.layout(&[LabelRow::month(20.0)], &mut out);

        let cells = rects(&out);
        assert_eq!(cells.len(), 3);
        for (i, cell) in cells.iter().enumerate() {
            assert!((cell.left - 100.0 * i as f32).abs() < 1e-4);
            assert!((cell.width - 100.0).abs() < 1e-4);
            assert_eq!(cell.fill, pattern.label_background);
            assert_eq!(cell.stroke_width, 1.0);
        }

        let runs = texts(&out);
        assert_eq!(runs[1].text, "Feb");
        assert_eq!(runs[1].align, TextAlign::Center);
        assert_eq!(runs[1].font, pattern.month_label_font);
    }

    #[test]
    fn test_rows_stack_vertically() {
        let g = grid(date(2024, 1, 1), date(2024, 12, 31));
        let pattern = VisualLabelPattern::default();
        let layout = LabelBandLayout::new(&g, &pattern, 0.0, 1200.0);
        let mut out = Vec::new();
        let height = layout.layout(&[LabelRow::year(30.0), LabelRow::month(20.0)], &mut out);

        assert_eq!(height, 50.0);
        let cells = rects(&out);
        assert_eq!(cells.len(), 13);
        assert_eq!(cells[0].top, 0.0);
        assert_eq!(cells[0].height, 30.0);
        assert!(cells[1..].iter().all(|r| r.top == 30.0 && r.height == 20.0));
    }

    #[test]
    fn test_text_band_places_markers_at_dates() {
        let g = grid(date(2024, 1, 1), date(2024, 12, 31));
        let pattern = VisualLabelPattern::default();
        let layout = LabelBandLayout::new(&g, &pattern, 100.0, 1200.0);
        let marker = LabelMarker {
            date: date(2024, 6, 30),
            text: "Release".into(),
            font: Font::default(),
            angle: -45.0,
        };
        let mut out = Vec::new();
        layout.layout(&[LabelRow::year(30.0), LabelRow::text(40.0, vec![marker])], &mut out);

        let triangle = rects(&out)
            .into_iter()
            .find(|r| r.kind == RectKind::DownTriangle)
            .expect("marker triangle");
        assert!((triangle.left - 700.0).abs() < 1e-3);
        assert_eq!(triangle.bottom(), 70.0);
        assert_eq!(triangle.width, MARKER_SIZE);
        assert_eq!(triangle.stroke, Color32::BLACK);

        let text = texts(&out)
            .into_iter()
            .find(|t| t.text == "Release")
            .expect("marker text");
        assert!((text.left - 705.0).abs() < 1e-3);
        assert_eq!(text.top, 45.0);
        assert_eq!(text.width, MARKER_TEXT_WIDTH);
        assert_eq!(text.align, TextAlign::Left);
        assert_eq!(text.angle, -45.0);
    }

    #[test]
    fn test_empty_text_band_emits_nothing() {
        let g = grid(date(2024, 1, 1), date(2024, 1, 31));
        let pattern = VisualLabelPattern::default();
        let layout = LabelBandLayout::new(&g, &pattern, 0.0, 100.0);
        let mut out = Vec::new();
        let height = layout.layout(&[LabelRow::text(25.0, vec![])], &mut out);
        assert!(out.is_empty());
        assert_eq!(height, 25.0);
    }
}
