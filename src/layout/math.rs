use std::f32::consts::TAU;

use eframe::egui::emath::Rot2;
use eframe::egui::{Rect, Vec2, vec2};
use rand::Rng;

pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let length = delta.length();
    if length > f32::EPSILON {
        delta / length
    } else {
        Vec2::ZERO
    }
}

pub fn distance_to(a: Vec2, b: Vec2) -> f32 {
    (a - b).length().max(1.0)
}

pub fn point_on_circle(index: usize, count: usize, center: Vec2, radius: f32) -> Vec2 {
    if count == 0 {
        return center;
    }

    let angle = TAU / count as f32 * index as f32;
    vec2(radius * angle.cos(), radius * angle.sin()) + center
}

pub fn random_point(rect: Rect, rng: &mut impl Rng) -> Vec2 {
    vec2(
        rng.gen_range(rect.min.x..=rect.max.x),
        rng.gen_range(rect.min.y..=rect.max.y),
    )
}

pub fn rotated(direction: Vec2, degrees: f32) -> Vec2 {
    Rot2::from_angle(degrees.to_radians()) * direction
}
