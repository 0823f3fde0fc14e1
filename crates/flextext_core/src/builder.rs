//! Snapshot builder
//!
//! Assembles a `LayoutSnapshot` from already-positioned glyph rectangles.
//! Hosts use it to translate their layout engine's output; tests use it to
//! describe small layouts by hand.
//!
//! ```rust
//! use flextext_core::{Rect, SnapshotBuilder};
//!
//! let mut builder = SnapshotBuilder::new().with_decorations(true);
//! let first = builder.glyph('o', Rect::new(0.0, 0.0, 6.0, 8.0));
//! let last = builder.glyph('k', Rect::new(6.0, 0.0, 6.0, 8.0));
//! builder.underline(first..=last, Rect::new(0.0, -2.0, 12.0, 1.0));
//! builder.end_line();
//!
//! let snapshot = builder.build();
//! assert!(snapshot.characters[first].is_underlined());
//! assert_eq!(snapshot.vertex_count(), 4 + 4 + 12);
//! ```

use std::ops::RangeInclusive;

use crate::geometry::{Bounds3, Rect};
use crate::snapshot::{Character, CharacterStyle, LayoutSnapshot, Line, MeshBuffer};

/// Incremental builder for `LayoutSnapshot`
#[derive(Debug)]
pub struct SnapshotBuilder {
    snapshot: LayoutSnapshot,
    line_start: usize,
    z: f32,
}

impl SnapshotBuilder {
    /// Create a builder with a single material
    pub fn new() -> Self {
        Self {
            snapshot: LayoutSnapshot {
                meshes: vec![MeshBuffer::new()],
                ..LayoutSnapshot::default()
            },
            line_start: 0,
            z: 0.0,
        }
    }

    /// Set whether the font supports decoration geometry
    pub fn with_decorations(mut self, available: bool) -> Self {
        self.snapshot.decorations_available = available;
        self
    }

    /// Depth assigned to subsequently pushed vertices
    pub fn with_depth(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    /// Append a visible character using material 0
    pub fn glyph(&mut self, character: char, rect: Rect) -> usize {
        self.glyph_in(0, character, rect)
    }

    /// Append a visible character whose quad lives in `material`.
    ///
    /// Missing materials are created on demand.
    pub fn glyph_in(&mut self, material: usize, character: char, rect: Rect) -> usize {
        let vertex_index = self.push_rect(material, rect);
        self.snapshot
            .characters
            .push(Character::visible(character, material, vertex_index));
        self.snapshot.characters.len() - 1
    }

    /// Append a character that produced no geometry (collapsed whitespace)
    pub fn hidden(&mut self, character: char) -> usize {
        self.snapshot.characters.push(Character::hidden(character));
        self.snapshot.characters.len() - 1
    }

    /// Add an underline run spanning `characters`, all of which must share a
    /// material. Returns the run's first vertex index.
    pub fn underline(&mut self, characters: RangeInclusive<usize>, rect: Rect) -> usize {
        self.decorate(characters, rect, CharacterStyle::UNDERLINE)
    }

    /// Add a strikethrough run spanning `characters`
    pub fn strikethrough(&mut self, characters: RangeInclusive<usize>, rect: Rect) -> usize {
        self.decorate(characters, rect, CharacterStyle::STRIKETHROUGH)
    }

    /// Close the current line over every character appended since the last
    /// call. Extents are taken from the visible glyph quads.
    pub fn end_line(&mut self) -> usize {
        let first = self.line_start;
        let count = self.snapshot.characters.len() - first;

        let mut bounds = Bounds3::new();
        let mut visible = 0;
        for index in first..first + count {
            let character = self.snapshot.characters[index];
            if character.visible {
                visible += 1;
                for vertex in self.snapshot.quad(index) {
                    bounds.include(vertex);
                }
            }
        }

        let (min_x, max_x) = if bounds.is_empty() {
            (0.0, 0.0)
        } else {
            (bounds.min.x, bounds.max.x)
        };

        self.snapshot.lines.push(Line {
            min_x,
            max_x,
            visible_character_count: visible,
            first_character: first,
            last_character: (first + count).saturating_sub(1),
        });
        self.line_start = self.snapshot.characters.len();
        self.snapshot.lines.len() - 1
    }

    pub fn build(self) -> LayoutSnapshot {
        self.snapshot
    }

    fn decorate(
        &mut self,
        characters: RangeInclusive<usize>,
        rect: Rect,
        style: CharacterStyle,
    ) -> usize {
        let material = self.snapshot.characters[*characters.start()].material;

        // Start cap, body and end cap, as three quads
        let cap = (rect.height() * 0.5).min(rect.width() * 0.25);
        let pieces = [
            Rect::new(rect.min_x(), rect.min_y(), cap, rect.height()),
            Rect::new(
                rect.min_x() + cap,
                rect.min_y(),
                rect.width() - 2.0 * cap,
                rect.height(),
            ),
            Rect::new(rect.max_x() - cap, rect.min_y(), cap, rect.height()),
        ];

        let run = self.push_rect(material, pieces[0]);
        self.push_rect(material, pieces[1]);
        self.push_rect(material, pieces[2]);

        for index in characters {
            let character = &mut self.snapshot.characters[index];
            character.style |= style;
            if style == CharacterStyle::UNDERLINE {
                character.underline_vertex_index = run;
            } else {
                character.strikethrough_vertex_index = run;
            }
        }
        run
    }

    fn push_rect(&mut self, material: usize, rect: Rect) -> usize {
        if self.snapshot.meshes.len() <= material {
            self.snapshot
                .meshes
                .resize_with(material + 1, MeshBuffer::new);
        }
        let vertices = &mut self.snapshot.meshes[material].vertices;
        let start = vertices.len();
        vertices.extend_from_slice(&rect.corners(self.z));
        start
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec3;
    use crate::snapshot::DECORATION_VERTEX_COUNT;

    #[test]
    fn test_lines_cover_appended_characters() {
        let mut builder = SnapshotBuilder::new();
        builder.glyph('a', Rect::new(-10.0, 0.0, 5.0, 5.0));
        builder.glyph('b', Rect::new(-5.0, 0.0, 5.0, 5.0));
        builder.end_line();
        builder.hidden(' ');
        builder.glyph('c', Rect::new(2.0, -8.0, 5.0, 5.0));
        builder.end_line();

        let snapshot = builder.build();
        assert_eq!(snapshot.lines.len(), 2);

        let first = snapshot.lines[0];
        assert_eq!(first.characters(), 0..=1);
        assert_eq!(first.visible_character_count, 2);
        assert_eq!((first.min_x, first.max_x), (-10.0, 0.0));

        let second = snapshot.lines[1];
        assert_eq!(second.characters(), 2..=3);
        assert_eq!(second.visible_character_count, 1);
        assert_eq!((second.min_x, second.max_x), (2.0, 7.0));
    }

    #[test]
    fn test_empty_line() {
        let mut builder = SnapshotBuilder::new();
        builder.hidden('\n');
        builder.end_line();

        let snapshot = builder.build();
        assert_eq!(snapshot.lines[0].visible_character_count, 0);
        assert_eq!(snapshot.lines[0].width(), 0.0);
    }

    #[test]
    fn test_decoration_run_is_shared() {
        let mut builder = SnapshotBuilder::new().with_decorations(true);
        let a = builder.glyph('a', Rect::new(0.0, 0.0, 5.0, 5.0));
        let b = builder.glyph('b', Rect::new(5.0, 0.0, 5.0, 5.0));
        let run = builder.strikethrough(a..=b, Rect::new(0.0, 2.0, 10.0, 1.0));
        builder.end_line();

        let snapshot = builder.build();
        assert_eq!(run, 8);
        assert!(snapshot.characters[a].is_strikethrough());
        assert!(!snapshot.characters[a].is_underlined());
        assert_eq!(snapshot.characters[b].strikethrough_vertex_index, run);

        let vertices = &snapshot.meshes[0].vertices[run..run + DECORATION_VERTEX_COUNT];
        assert_eq!(vertices[0], Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(vertices[11], Vec3::new(10.0, 2.0, 0.0));
        assert_eq!(snapshot.validate(), Ok(()));
    }

    #[test]
    fn test_materials_created_on_demand() {
        let mut builder = SnapshotBuilder::new().with_depth(-1.0);
        builder.glyph_in(2, 'x', Rect::new(0.0, 0.0, 1.0, 1.0));
        builder.end_line();

        let snapshot = builder.build();
        assert_eq!(snapshot.meshes.len(), 3);
        assert_eq!(snapshot.meshes[2].vertices.len(), 4);
        assert_eq!(snapshot.quad(0)[0].z, -1.0);
    }
}
