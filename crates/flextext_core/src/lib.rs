//! Flextext Core
//!
//! This crate provides the data model shared by the Flextext mesh post-pass:
//!
//! - **Geometry**: `Point`, `Rect`, `Vec3` and `Bounds3` in local text space
//! - **Layout Snapshot**: lines, characters and vertex buffers produced by an
//!   external text layout engine
//! - **Text Frame**: the container width, pivot and horizontal alignment the
//!   text was laid out against
//!
//! The snapshot is read-only in structure. Post-passes only move vertices.
//!
//! # Example
//!
//! ```rust
//! use flextext_core::{Rect, SnapshotBuilder};
//!
//! let mut builder = SnapshotBuilder::new();
//! builder.glyph('H', Rect::new(0.0, 0.0, 10.0, 12.0));
//! builder.glyph('i', Rect::new(10.0, 0.0, 4.0, 12.0));
//! builder.end_line();
//!
//! let snapshot = builder.build();
//! assert_eq!(snapshot.lines.len(), 1);
//! assert_eq!(snapshot.lines[0].width(), 14.0);
//! ```

pub mod builder;
pub mod frame;
pub mod geometry;
pub mod snapshot;

pub use builder::SnapshotBuilder;
pub use frame::{HorizontalAlignment, TextFrame};
pub use geometry::{Bounds3, Point, Rect, Size, Vec3};
pub use snapshot::{
    Character, CharacterStyle, LayoutSnapshot, Line, MeshBuffer, DECORATION_VERTEX_COUNT,
    QUAD_VERTEX_COUNT,
};

use thiserror::Error;

/// Errors raised while post-processing a text mesh
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlextextError {
    #[error("Alignment {0:?} cannot anchor a horizontal fit")]
    UnsupportedAlignment(HorizontalAlignment),

    #[error("Character {character} references missing material {material}")]
    MissingMaterial { character: usize, material: usize },

    #[error(
        "Character {character} reads vertices {start}..{end} of material {material}, \
         but it only has {len}"
    )]
    VertexOutOfRange {
        character: usize,
        material: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Line {line} ends at character {last}, but the snapshot has {len} characters")]
    LineOutOfRange { line: usize, last: usize, len: usize },

    #[error("Line {line} starts at character {first} after its end at {last}")]
    InvertedLine { line: usize, first: usize, last: usize },
}

pub type Result<T> = std::result::Result<T, FlextextError>;
