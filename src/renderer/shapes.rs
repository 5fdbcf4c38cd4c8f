//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in screen pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Push one triangle
fn tri(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Axis-aligned filled rectangle from its top-left corner
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    let tl = Vec2::new(x, y);
    let tr = Vec2::new(x + w, y);
    let bl = Vec2::new(x, y + h);
    let br = Vec2::new(x + w, y + h);
    tri(out, tl, tr, bl, color);
    tri(out, bl, tr, br, color);
}

/// Rectangle outline of thickness `t`, drawn inside the bounds
pub fn rect_outline(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, t: f32, color: [f32; 4]) {
    rect(out, x, y, w, t, color);
    rect(out, x, y + h - t, w, t, color);
    rect(out, x, y + t, t, h - 2.0 * t, color);
    rect(out, x + w - t, y + t, t, h - 2.0 * t, color);
}

/// Filled polygon given in local coordinates, rotated by `angle` and moved to `center`
///
/// Fan-triangulated from the first point, so the outline must be star-shaped
/// around it.
pub fn polygon(out: &mut Vec<Vertex>, center: Vec2, angle: f32, points: &[Vec2], color: [f32; 4]) {
    if points.len() < 3 {
        return;
    }
    let rot = Vec2::from_angle(angle);
    let world: Vec<Vec2> = points.iter().map(|p| center + rot.rotate(*p)).collect();
    for i in 1..world.len() - 1 {
        tri(out, world[0], world[i], world[i + 1], color);
    }
}

/// Centered `w`x`h` rectangle rotated by `angle`
pub fn rotated_rect(out: &mut Vec<Vertex>, center: Vec2, w: f32, h: f32, angle: f32, color: [f32; 4]) {
    let (hw, hh) = (w / 2.0, h / 2.0);
    let corners = [
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ];
    polygon(out, center, angle, &corners, color);
}

/// Upward-pointing triangle filling the box `(x, y, w, h)`
pub fn spike(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    tri(
        out,
        Vec2::new(x, y + h),
        Vec2::new(x + w / 2.0, y),
        Vec2::new(x + w, y + h),
        color,
    );
}

/// Straight line segment of thickness `width`
pub fn line(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    tri(out, a + perp, a - perp, b + perp, color);
    tri(out, b + perp, a - perp, b - perp, color);
}

/// Generate vertices for a filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        tri(
            out,
            center,
            center + radius * Vec2::from_angle(theta1),
            center + radius * Vec2::from_angle(theta2),
            color,
        );
    }
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let d1 = Vec2::from_angle((i as f32 / segments as f32) * 2.0 * PI);
        let d2 = Vec2::from_angle(((i + 1) as f32 / segments as f32) * 2.0 * PI);

        let inner1 = center + d1 * inner_radius;
        let outer1 = center + d1 * outer_radius;
        let inner2 = center + d2 * inner_radius;
        let outer2 = center + d2 * outer_radius;

        // Two triangles per segment
        tri(out, inner1, outer1, inner2, color);
        tri(out, inner2, outer1, outer2, color);
    }
}

/// Star-shaped outline fanned from `center`, rotated by `angle`
///
/// Handles concave outlines as long as every edge is visible from the local origin.
pub fn fan(out: &mut Vec<Vertex>, center: Vec2, angle: f32, points: &[Vec2], color: [f32; 4]) {
    let rot = Vec2::from_angle(angle);
    for (i, p) in points.iter().enumerate() {
        let a = center + rot.rotate(*p);
        let b = center + rot.rotate(points[(i + 1) % points.len()]);
        tri(out, center, a, b, color);
    }
}

/// Five-pointed star (coin)
pub fn star(out: &mut Vec<Vertex>, center: Vec2, outer: f32, inner: f32, angle: f32, color: [f32; 4]) {
    let mut points = Vec::with_capacity(10);
    for i in 0..5 {
        let a_out = (18.0 + i as f32 * 72.0).to_radians();
        let a_in = (54.0 + i as f32 * 72.0).to_radians();
        points.push(Vec2::from_angle(a_out) * outer);
        points.push(Vec2::from_angle(a_in) * inner);
    }
    fan(out, center, angle, &points, color);
}
