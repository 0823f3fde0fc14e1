//! Layout snapshot
//!
//! The laid-out result of a text shaping pass: lines in reading order, the
//! characters they cover, and the vertex buffers holding glyph quads and
//! decoration runs. One vertex buffer exists per material (font atlas), and a
//! character addresses its quad by `(material, vertex_index)`.
//!
//! Post-passes must never add or remove lines, characters or vertices. They
//! only move vertex positions.

use std::ops::RangeInclusive;

use bitflags::bitflags;

use crate::geometry::{Bounds3, Vec3};
use crate::{FlextextError, Result};

/// Vertices in one glyph quad
pub const QUAD_VERTEX_COUNT: usize = 4;

/// Vertices in one underline or strikethrough run (start cap, body, end cap)
pub const DECORATION_VERTEX_COUNT: usize = 12;

bitflags! {
    /// Font style of a laid-out character
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct CharacterStyle: u16 {
        const BOLD          = 0b0000_0001;
        const ITALIC        = 0b0000_0010;
        const UNDERLINE     = 0b0000_0100;
        const STRIKETHROUGH = 0b0100_0000;
    }
}

/// One laid-out character
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Character {
    /// Unicode scalar this character was shaped from
    pub character: char,
    /// False for collapsed whitespace and other characters without a quad
    pub visible: bool,
    /// Vertex buffer holding this character's geometry
    pub material: usize,
    /// First of the 4 glyph quad vertices
    pub vertex_index: usize,
    pub style: CharacterStyle,
    /// First of the 12 underline vertices, meaningful with `UNDERLINE`
    pub underline_vertex_index: usize,
    /// First of the 12 strikethrough vertices, meaningful with `STRIKETHROUGH`
    pub strikethrough_vertex_index: usize,
}

impl Character {
    /// A visible character with an unstyled quad at `vertex_index`
    pub fn visible(character: char, material: usize, vertex_index: usize) -> Self {
        Self {
            character,
            visible: true,
            material,
            vertex_index,
            style: CharacterStyle::empty(),
            underline_vertex_index: 0,
            strikethrough_vertex_index: 0,
        }
    }

    /// A character that produced no geometry
    pub fn hidden(character: char) -> Self {
        Self {
            visible: false,
            ..Self::visible(character, 0, 0)
        }
    }

    pub fn is_underlined(&self) -> bool {
        self.style.contains(CharacterStyle::UNDERLINE)
    }

    pub fn is_strikethrough(&self) -> bool {
        self.style.contains(CharacterStyle::STRIKETHROUGH)
    }
}

/// One line of laid-out text
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Left extent in local space
    pub min_x: f32,
    /// Right extent in local space
    pub max_x: f32,
    pub visible_character_count: usize,
    pub first_character: usize,
    /// Inclusive
    pub last_character: usize,
}

impl Line {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Horizontal midpoint of the line extents
    pub fn mid_x(&self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn characters(&self) -> RangeInclusive<usize> {
        self.first_character..=self.last_character
    }
}

/// Vertex buffer for one material
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    pub vertices: Vec<Vec3>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Laid-out text handed over by the layout engine
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutSnapshot {
    pub lines: Vec<Line>,
    pub characters: Vec<Character>,
    pub meshes: Vec<MeshBuffer>,
    /// Whether the font can build underline/strikethrough geometry. When
    /// false, decoration indices on characters point at nothing.
    pub decorations_available: bool,
}

impl LayoutSnapshot {
    /// The 4 quad vertices of a character
    pub fn quad(&self, character: usize) -> [Vec3; QUAD_VERTEX_COUNT] {
        let info = &self.characters[character];
        let vertices = &self.meshes[info.material].vertices;
        let start = info.vertex_index;
        [
            vertices[start],
            vertices[start + 1],
            vertices[start + 2],
            vertices[start + 3],
        ]
    }

    /// Min and max x over the visible glyph vertices of a line.
    ///
    /// Unlike `Line::min_x`/`max_x`, which the layout engine computed before
    /// any post-pass, this reads the current vertex positions.
    pub fn visible_extent(&self, line: usize) -> Option<(f32, f32)> {
        let line = self.lines.get(line)?;
        if line.visible_character_count == 0 {
            return None;
        }

        let bounds: Bounds3 = line
            .characters()
            .filter(|&index| self.characters[index].visible)
            .flat_map(|index| self.quad(index))
            .collect();

        if bounds.is_empty() {
            None
        } else {
            Some((bounds.min.x, bounds.max.x))
        }
    }

    /// Total vertex count over all meshes
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.vertices.len()).sum()
    }

    /// Check every index a post-pass will follow.
    ///
    /// Lines with visible characters must cover a non-empty range inside
    /// `characters`; visible characters must address a full quad, and
    /// styled ones a full decoration run when decorations are available.
    /// Empty lines are never read, so their ranges are not checked.
    pub fn validate(&self) -> Result<()> {
        let len = self.characters.len();
        for (line_index, line) in self.lines.iter().enumerate() {
            if line.visible_character_count == 0 {
                continue;
            }
            if line.first_character > line.last_character {
                return Err(FlextextError::InvertedLine {
                    line: line_index,
                    first: line.first_character,
                    last: line.last_character,
                });
            }
            if line.last_character >= len {
                return Err(FlextextError::LineOutOfRange {
                    line: line_index,
                    last: line.last_character,
                    len,
                });
            }
        }

        for (index, character) in self.characters.iter().enumerate() {
            if !character.visible {
                continue;
            }

            let mesh = self
                .meshes
                .get(character.material)
                .ok_or(FlextextError::MissingMaterial {
                    character: index,
                    material: character.material,
                })?;

            self.check_span(index, mesh, character.vertex_index, QUAD_VERTEX_COUNT)?;

            if self.decorations_available {
                if character.is_underlined() {
                    self.check_span(
                        index,
                        mesh,
                        character.underline_vertex_index,
                        DECORATION_VERTEX_COUNT,
                    )?;
                }
                if character.is_strikethrough() {
                    self.check_span(
                        index,
                        mesh,
                        character.strikethrough_vertex_index,
                        DECORATION_VERTEX_COUNT,
                    )?;
                }
            }
        }

        Ok(())
    }

    fn check_span(
        &self,
        character: usize,
        mesh: &MeshBuffer,
        start: usize,
        count: usize,
    ) -> Result<()> {
        // Saturates so an index near usize::MAX still reads as out of range
        let end = start.saturating_add(count);
        if end > mesh.vertices.len() {
            tracing::debug!(character, start, end, "vertex span outside mesh");
            return Err(FlextextError::VertexOutOfRange {
                character,
                material: self.characters[character].material,
                start,
                end,
                len: mesh.vertices.len(),
            });
        }
        Ok(())
    }
}
