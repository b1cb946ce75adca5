use egui::epaint::TextShape;
use egui::{Pos2, Rounding, Sense, Shape, Stroke, Ui, Vec2};

use timesheet::layout::{Line, Primitive, Rect, RectKind, TextRun};
use timesheet::model::TextAlign;

use crate::ui::metrics::font_id;
use crate::ui::theme;

/// Paint the laid-out chart on a scrollable, fixed-size canvas.
pub fn show_canvas(primitives: &[Primitive], size: (f32, f32), ui: &mut Ui) {
    let (width, height) = size;
    let margin = theme::CANVAS_MARGIN;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(width + margin * 2.0, height + margin + theme::CAPTION_ALLOWANCE),
                Sense::hover(),
            );
            painter.rect_filled(response.rect, 0.0, theme::CANVAS_BG);

            let origin = response.rect.min + Vec2::splat(margin);
            for primitive in primitives {
                match primitive {
                    Primitive::Rect(rect) => paint_rect(&painter, origin, rect),
                    Primitive::Text(run) => paint_text(&painter, origin, run),
                    Primitive::Line(line) => paint_line(&painter, origin, line),
                }
            }
        });
}

fn paint_rect(painter: &egui::Painter, origin: Pos2, rect: &Rect) {
    let area = egui::Rect::from_min_size(
        origin + Vec2::new(rect.left, rect.top),
        Vec2::new(rect.width, rect.height),
    );
    let fill = rect.fill.gamma_multiply(rect.opacity);
    let stroke = Stroke::new(rect.stroke_width, rect.stroke.gamma_multiply(rect.opacity));

    match rect.kind {
        RectKind::Box => {
            painter.rect(area, Rounding::same(rect.corner_radius), fill, stroke);
        }
        RectKind::DownTriangle => {
            let points = vec![area.left_top(), area.right_top(), area.center_bottom()];
            painter.add(Shape::convex_polygon(points, fill, stroke));
        }
    }
}

fn paint_text(painter: &egui::Painter, origin: Pos2, run: &TextRun) {
    if run.text.is_empty() {
        return;
    }
    let galley = painter.layout_no_wrap(run.text.clone(), font_id(&run.font), run.font.color);
    let size = galley.size();

    let dx = match run.align {
        TextAlign::Left => 0.0,
        TextAlign::Center => (run.width - size.x) / 2.0,
        TextAlign::Right => run.width - size.x,
    };
    // Rotated runs hang from their anchor.
    let dy = if run.angle == 0.0 {
        (run.height - size.y) / 2.0
    } else {
        0.0
    };

    let pos = origin + Vec2::new(run.left + dx, run.top + dy);
    painter.add(TextShape::new(pos, galley, run.font.color).with_angle(run.angle.to_radians()));
}

fn paint_line(painter: &egui::Painter, origin: Pos2, line: &Line) {
    let from = origin + Vec2::new(line.x, line.y0);
    let to = origin + Vec2::new(line.x, line.y1);
    let stroke = Stroke::new(line.width, line.stroke);

    match line.dash_pattern {
        Some([dash, gap]) => painter.extend(Shape::dashed_line(&[from, to], stroke, dash, gap)),
        None => {
            painter.line_segment([from, to], stroke);
        }
    }
}
