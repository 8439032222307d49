use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, vec2};

use crate::curve::Point;
use crate::util::Rgb;

pub(super) const SELECTED_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
pub(super) const HOVER_COLOR: Color32 = Color32::from_rgb(255, 255, 255);

pub(super) fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, focused: bool) {
    painter.rect_filled(rect, 4.0, Color32::from_rgb(19, 23, 29));

    let step = 40.0;
    let mut y = rect.top() + step;
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 50)),
        );
        y += step;
    }

    if focused {
        painter.line_segment(
            [rect.left_top(), rect.left_bottom()],
            Stroke::new(3.0, SELECTED_COLOR),
        );
    }
}

/// Maps diagram units onto a screen rectangle.
#[derive(Clone, Copy, Debug)]
pub(super) struct DiagramTransform {
    pub(super) origin: Pos2,
    pub(super) scale: f32,
}

impl DiagramTransform {
    pub(super) fn to_screen(self, point: Point) -> Pos2 {
        self.origin + vec2(point.x as f32, point.y as f32) * self.scale
    }

    pub(super) fn to_diagram(self, screen: Pos2) -> Point {
        let local: Vec2 = (screen - self.origin) / self.scale;
        Point::new(local.x as f64, local.y as f64)
    }

    pub(super) fn rect(self, position: Point, width: f64, height: f64) -> Rect {
        let min = self.to_screen(position);
        Rect::from_min_size(min, vec2(width as f32, height as f32) * self.scale)
    }

    pub(super) fn length(self, value: f64) -> f32 {
        value as f32 * self.scale
    }
}
