//! Circular warp
//!
//! Bends text onto a circle of a given radius centered below the text
//! origin. A point's x becomes an angle `x / radius` around the circle and
//! its y becomes a radial offset, so the baseline at `y = 0` lands on the
//! circle itself:
//!
//! ```text
//! (x, y, z) -> (sin(x / r) * (y + r), cos(x / r) * (y + r), z)
//! ```
//!
//! Per-vertex mode applies this to every vertex and shears glyphs. Per-glyph
//! and per-grapheme modes apply it to one representative point and rotate
//! the whole quad or cluster rigidly around it.
//!
//! Underline and strikethrough runs are not bent; only glyph quads move.

use flextext_core::{Bounds3, Character, LayoutSnapshot, MeshBuffer, Vec3, QUAD_VERTEX_COUNT};

use crate::config::{CurveType, TransformConfig};
use crate::grapheme::GraphemeSegmenter;

/// Warp circle of a fixed radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcWarp {
    radius: f32,
}

impl ArcWarp {
    /// None when the radius cannot define an angle
    pub fn new(radius: f32) -> Option<Self> {
        (radius != 0.0 && radius.is_finite()).then_some(Self { radius })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Map a single point onto the circle
    pub fn map_point(&self, point: Vec3) -> Vec3 {
        let (sin, cos) = (point.x / self.radius).sin_cos();
        let distance = point.y + self.radius;
        Vec3::new(sin * distance, cos * distance, point.z)
    }

    /// Rigid rotation that carries `pivot` onto the circle
    pub fn rotation_about(&self, pivot: Vec3) -> RigidRotation {
        RigidRotation::new(pivot, -pivot.x / self.radius, self.radius)
    }
}

/// Rotation of a vertex group about a pivot, followed by a move of the pivot
/// to its place on the warp circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidRotation {
    pivot: Vec3,
    target: Vec3,
    sin: f32,
    cos: f32,
}

impl RigidRotation {
    /// `angle` is counter-clockwise in radians; text to the right of the
    /// origin bends clockwise, so callers pass `-x / radius`.
    pub fn new(pivot: Vec3, angle: f32, radius: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let distance = pivot.y + radius;
        Self {
            pivot,
            target: Vec3::new(-sin * distance, cos * distance, pivot.z),
            sin,
            cos,
        }
    }

    /// Where the pivot ends up
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn apply(&self, vertex: Vec3) -> Vec3 {
        let offset = vertex - self.pivot;
        self.target
            + Vec3::new(
                offset.x * self.cos - offset.y * self.sin,
                offset.x * self.sin + offset.y * self.cos,
                offset.z,
            )
    }
}

/// Run the curve stage.
///
/// Returns true whenever a curve is configured with a usable radius, even if
/// the snapshot had nothing visible to bend.
pub fn warp(
    snapshot: &mut LayoutSnapshot,
    config: &TransformConfig,
    segmenter: &mut GraphemeSegmenter,
) -> bool {
    if config.curve_type == CurveType::None {
        return false;
    }

    let Some(arc) = ArcWarp::new(config.radius) else {
        tracing::warn!(
            radius = config.radius,
            curve = ?config.curve_type,
            "curve skipped, radius cannot define an angle"
        );
        return false;
    };

    tracing::debug!(radius = arc.radius(), curve = ?config.curve_type, "bending text");

    match config.curve_type {
        CurveType::None => return false,
        CurveType::RotatePerVertex => rotate_per_vertex(snapshot, arc),
        CurveType::RotatePerGlyph => rotate_per_glyph(snapshot, arc),
        CurveType::RotatePerGrapheme => rotate_per_grapheme(snapshot, arc, segmenter),
    }

    true
}

fn quad_mut<'a>(meshes: &'a mut [MeshBuffer], character: &Character) -> &'a mut [Vec3] {
    let start = character.vertex_index;
    &mut meshes[character.material].vertices[start..start + QUAD_VERTEX_COUNT]
}

fn rotate_per_vertex(snapshot: &mut LayoutSnapshot, arc: ArcWarp) {
    for character in snapshot.characters.iter().filter(|c| c.visible) {
        for vertex in quad_mut(&mut snapshot.meshes, character) {
            *vertex = arc.map_point(*vertex);
        }
    }
}

fn rotate_per_glyph(snapshot: &mut LayoutSnapshot, arc: ArcWarp) {
    for character in snapshot.characters.iter().filter(|c| c.visible) {
        let quad = quad_mut(&mut snapshot.meshes, character);

        let centroid = quad
            .iter()
            .fold(Vec3::ZERO, |sum, vertex| sum + *vertex)
            / QUAD_VERTEX_COUNT as f32;
        let rotation = arc.rotation_about(centroid);

        for vertex in quad {
            *vertex = rotation.apply(*vertex);
        }
    }
}

fn rotate_per_grapheme(
    snapshot: &mut LayoutSnapshot,
    arc: ArcWarp,
    segmenter: &mut GraphemeSegmenter,
) {
    let LayoutSnapshot {
        lines,
        characters,
        meshes,
        ..
    } = snapshot;

    for (line_index, line) in lines.iter().enumerate() {
        if line.visible_character_count == 0 {
            continue;
        }

        segmenter.load_line(characters, line.characters());

        for cluster in segmenter.clusters() {
            let mut bounds = Bounds3::new();
            for &index in cluster.characters {
                for vertex in quad_mut(meshes, &characters[index]).iter() {
                    bounds.include(*vertex);
                }
            }

            let rotation = arc.rotation_about(bounds.center());
            tracing::trace!(
                line = line_index,
                cluster = cluster.text,
                target = ?rotation.target(),
                "rotating cluster"
            );

            for &index in cluster.characters {
                for vertex in quad_mut(meshes, &characters[index]) {
                    *vertex = rotation.apply(*vertex);
                }
            }
        }
    }

    segmenter.clear();
}
