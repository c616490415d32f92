// Plane geometry used by the simulation: bounds, circle overlap and beam tests.

use glam::Vec2;

/// Axis-aligned arena rectangle anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Inclusive containment test (edges count as inside).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Clamp a point into the rectangle shrunk by `margin` on every side.
    pub fn clamp_inset(&self, point: Vec2, margin: f32) -> Vec2 {
        Vec2::new(
            point.x.clamp(margin, self.width - margin),
            point.y.clamp(margin, self.height - margin),
        )
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Unit vector from `from` towards `to`, or `None` when the points coincide.
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 && dist.is_finite() {
        Some(delta / dist)
    } else {
        None
    }
}

/// Strict circle-circle overlap: touching circles do not collide.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Closest-point relation between a point and the segment `start -> end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Position of the foot of the perpendicular along the segment (0 = start, 1 = end).
    pub t: f32,
    /// Distance from the point to the foot of the perpendicular on the infinite line.
    pub distance: f32,
}

impl SegmentProjection {
    pub fn within_segment(&self) -> bool {
        (0.0..=1.0).contains(&self.t)
    }
}

/// Project `point` onto the line through `start` and `end`.
///
/// Returns `None` for a degenerate (zero-length) segment.
pub fn project_onto_segment(point: Vec2, start: Vec2, end: Vec2) -> Option<SegmentProjection> {
    let seg = end - start;
    let len_sq = seg.length_squared();
    if len_sq <= 0.0 {
        return None;
    }

    let t = (point - start).dot(seg) / len_sq;
    let closest = start + seg * t;
    Some(SegmentProjection {
        t,
        distance: point.distance(closest),
    })
}

/// True if a circle at `center` with `radius` is crossed by the segment.
///
/// Only the segment itself counts; hits on the line's extension beyond either end are rejected.
pub fn segment_hits_circle(start: Vec2, end: Vec2, center: Vec2, radius: f32) -> bool {
    project_onto_segment(center, start, end)
        .map(|p| p.within_segment() && p.distance <= radius)
        .unwrap_or(false)
}
