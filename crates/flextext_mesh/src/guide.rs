//! Curve guide
//!
//! Polyline of the warp circle, for editors that want to show where curved
//! text will sit while the component is selected.

use std::f32::consts::TAU;

use flextext_core::{Point, Rect};

/// Points of the warp circle around the container's pivot.
///
/// The circle is split into `floor(radius)` segments, so larger circles get
/// proportionally more points. The first point is the top of the circle
/// and the polyline is closed: the last point repeats it. Returns an empty
/// polyline for radii below one unit.
pub fn curve_guide(bounds: Rect, pivot: Point, radius: f32) -> Vec<Point> {
    if !radius.is_finite() || radius < 1.0 {
        return Vec::new();
    }

    let center = bounds.lerp(pivot.x, pivot.y);
    let segments = radius.floor() as usize;

    let mut points = Vec::with_capacity(segments + 2);
    points.push(Point::new(center.x, center.y + radius));
    for i in 0..=segments {
        let angle = i as f32 * TAU / segments as f32;
        let (sin, cos) = angle.sin_cos();
        points.push(Point::new(center.x + sin * radius, center.y + cos * radius));
    }
    points
}
