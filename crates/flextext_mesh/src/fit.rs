//! Horizontal fit
//!
//! Squeezes overflowing lines into the frame width by scaling vertex x
//! coordinates. Line breaks, glyph sizes and vertical positions are left
//! alone; only the horizontal geometry of the already laid-out quads moves.
//!
//! Every vertex of a line is mapped with
//!
//! ```text
//! new_x = (old_x + recenter) * scale - anchor
//! ```
//!
//! where `recenter` moves the line's alignment point to the origin and
//! `anchor` moves it back to where that alignment pins it in the container.

use flextext_core::{
    Character, FlextextError, HorizontalAlignment, LayoutSnapshot, Line, MeshBuffer, Result,
    TextFrame, Vec3, DECORATION_VERTEX_COUNT, QUAD_VERTEX_COUNT,
};

use crate::config::TransformConfig;

/// Offsets pinning a scaled line to its alignment point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineAnchor {
    pub recenter: f32,
    pub anchor: f32,
}

impl LineAnchor {
    /// Pick the offsets for `line` under the frame's alignment.
    ///
    /// Geometry and Center scale about the line midpoint. Left and Right pin
    /// the line's left or right boundary to the matching container edge, so
    /// an indent or margin between the line and that edge is absorbed.
    /// Justified and Flush lines already span the width and never reach
    /// here.
    pub fn select(line: &Line, frame: &TextFrame) -> Result<Self> {
        match frame.alignment {
            HorizontalAlignment::Geometry | HorizontalAlignment::Center => {
                let mid = line.mid_x();
                Ok(Self {
                    recenter: -mid,
                    anchor: -mid,
                })
            }
            HorizontalAlignment::Left => Ok(Self {
                recenter: -line.min_x,
                anchor: -frame.left_edge(),
            }),
            HorizontalAlignment::Right => Ok(Self {
                recenter: -line.max_x,
                anchor: -frame.right_edge(),
            }),
            alignment @ (HorizontalAlignment::Justified | HorizontalAlignment::Flush) => {
                Err(FlextextError::UnsupportedAlignment(alignment))
            }
        }
    }

    /// Map one x coordinate
    pub fn apply(&self, x: f32, scale: f32) -> f32 {
        (x + self.recenter) * scale - self.anchor
    }
}

/// Widest line extent in the snapshot
pub fn measure_text_width(snapshot: &LayoutSnapshot) -> f32 {
    snapshot.lines.iter().map(Line::width).fold(0.0, f32::max)
}

/// Run the fit stage. Returns true if any line was scaled.
pub fn fit_lines(
    snapshot: &mut LayoutSnapshot,
    config: &TransformConfig,
    frame: &TextFrame,
) -> Result<bool> {
    if !config.shrink_content {
        return Ok(false);
    }

    if frame.alignment.fills_width() {
        tracing::debug!(alignment = ?frame.alignment, "fit skipped, alignment fills the width");
        return Ok(false);
    }

    let target = frame.width;
    if !(target.is_finite() && target > 0.0) {
        tracing::debug!(target, "fit skipped, frame has no usable width");
        return Ok(false);
    }

    let text_width = measure_text_width(snapshot);
    if text_width <= target {
        return Ok(false);
    }

    let shared_scale = target / text_width;
    tracing::debug!(
        text_width,
        target,
        scale = shared_scale,
        line_by_line = config.shrink_line_by_line,
        "fitting text to width"
    );

    let LayoutSnapshot {
        lines,
        characters,
        meshes,
        decorations_available,
    } = snapshot;

    let mut modified = false;
    for (line_index, line) in lines.iter().enumerate() {
        if line.visible_character_count == 0 {
            continue;
        }

        let scale = if config.shrink_line_by_line {
            let width = line.width();
            if width <= target {
                tracing::trace!(line = line_index, width, "line already fits");
                continue;
            }
            target / width
        } else {
            shared_scale
        };

        let anchor = LineAnchor::select(line, frame)?;
        tracing::trace!(line = line_index, scale, ?anchor, "scaling line");

        scale_line(
            &characters[line.characters()],
            meshes.as_mut_slice(),
            *decorations_available,
            scale,
            anchor,
        );
        modified = true;
    }

    Ok(modified)
}

/// Last decoration run transformed on the current line
#[derive(Debug, Default)]
struct RunTracker {
    last: Option<(usize, usize)>,
}

impl RunTracker {
    /// Record `run` as `(material, vertex_index)`, returning false if it was
    /// the last one seen
    fn advance(&mut self, run: (usize, usize)) -> bool {
        if self.last == Some(run) {
            return false;
        }
        self.last = Some(run);
        true
    }
}

#[derive(Debug, Default)]
struct DecorationTracker {
    underline: RunTracker,
    strikethrough: RunTracker,
}

fn scale_line(
    characters: &[Character],
    meshes: &mut [MeshBuffer],
    decorations_available: bool,
    scale: f32,
    anchor: LineAnchor,
) {
    let mut tracker = DecorationTracker::default();

    for character in characters.iter().filter(|c| c.visible) {
        let vertices = &mut meshes[character.material].vertices;
        scale_span(vertices, character.vertex_index, QUAD_VERTEX_COUNT, scale, anchor);

        if !decorations_available {
            continue;
        }

        if character.is_underlined() {
            let run = (character.material, character.underline_vertex_index);
            if tracker.underline.advance(run) {
                scale_span(vertices, run.1, DECORATION_VERTEX_COUNT, scale, anchor);
            }
        }

        if character.is_strikethrough() {
            let run = (character.material, character.strikethrough_vertex_index);
            if tracker.strikethrough.advance(run) {
                scale_span(vertices, run.1, DECORATION_VERTEX_COUNT, scale, anchor);
            }
        }
    }
}

fn scale_span(
    vertices: &mut [Vec3],
    start: usize,
    count: usize,
    scale: f32,
    anchor: LineAnchor,
) {
    for vertex in &mut vertices[start..start + count] {
        vertex.x = anchor.apply(vertex.x, scale);
    }
}
