use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, vec2};

use crate::layout::Connector;

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

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = 56.0;
    let grid = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + step;
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid);
        x += step;
    }

    let mut y = rect.top() + step;
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], grid);
        y += step;
    }
}

pub(super) fn paint_connector(painter: &Painter, connector: &Connector, stroke: Stroke) {
    painter.line_segment([connector.start, connector.end], stroke);
    for head in &connector.heads {
        painter.line_segment(*head, stroke);
    }
}

pub(super) fn draw_halo(painter: &Painter, slot: Rect) {
    painter.circle_filled(
        slot.center(),
        slot.width() * 0.5,
        Color32::from_rgba_unmultiplied(255, 214, 120, 36),
    );
}

pub(super) fn draw_pin_badge(painter: &Painter, slot: Rect) {
    let head = slot.right_top() + vec2(-8.0, 8.0);
    painter.line_segment(
        [head, head + vec2(-4.0, 7.0)],
        Stroke::new(1.6, Color32::from_gray(210)),
    );
    painter.circle_filled(head, 4.0, Color32::from_rgb(226, 84, 72));
    painter.circle_stroke(head, 4.0, Stroke::new(1.0, Color32::from_gray(30)));
}

pub(super) fn draw_color_chip(painter: &Painter, slot: Rect, color: Color32) {
    let chip = Rect::from_min_size(slot.left_top(), Vec2::splat(14.0));
    painter.rect_filled(chip, 3.0, color);
}

pub(super) fn fit_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_owned();
    }
    let mut label = name.chars().take(max_chars.saturating_sub(1)).collect::<String>();
    label.push('…');
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_hits_both_ends() {
        let base = Color32::from_rgb(10, 20, 30);
        let overlay = Color32::from_rgb(110, 120, 130);
        assert_eq!(blend_color(base, overlay, 0.0), base);
        assert_eq!(blend_color(base, overlay, 1.0), overlay);
    }

    #[test]
    fn long_names_are_shortened() {
        assert_eq!(fit_label("Mara Voss", 12), "Mara Voss");
        assert_eq!(fit_label("Iron Covenant", 8), "Iron Co…");
    }
}
