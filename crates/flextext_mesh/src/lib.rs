//! Flextext mesh post-pass
//!
//! Edits the vertex buffers of already laid-out text:
//!
//! - **Fit**: squeeze overflowing lines horizontally into the frame width
//!   without re-flowing them
//! - **Curve**: bend glyphs onto a circle, per vertex, per glyph or per
//!   grapheme cluster
//!
//! # Example
//!
//! ```rust
//! use flextext_core::{HorizontalAlignment, Rect, SnapshotBuilder, TextFrame};
//! use flextext_mesh::{CurveType, MeshVertexWriter, TransformConfig};
//!
//! let mut builder = SnapshotBuilder::new();
//! builder.glyph('H', Rect::new(-75.0, 0.0, 75.0, 20.0));
//! builder.glyph('i', Rect::new(0.0, 0.0, 75.0, 20.0));
//! builder.end_line();
//! let mut snapshot = builder.build();
//!
//! let config = TransformConfig::new()
//!     .with_shrink(false)
//!     .with_curve(CurveType::RotatePerGrapheme, 200.0);
//! let frame = TextFrame::new(100.0, HorizontalAlignment::Center);
//!
//! let mut writer = MeshVertexWriter::new();
//! let modified = writer.transform(&mut snapshot, &config, &frame).unwrap();
//! assert!(modified);
//! ```

pub mod config;
pub mod fit;
pub mod grapheme;
pub mod guide;
pub mod warp;
pub mod writer;

pub use config::{CurveType, TransformConfig};
pub use fit::{fit_lines, measure_text_width, LineAnchor};
pub use grapheme::{Clusters, GraphemeCluster, GraphemeSegmenter};
pub use guide::curve_guide;
pub use warp::{warp, ArcWarp, RigidRotation};
pub use writer::{apply_modifiers, FlexibleTextMesh, MeshModifier, MeshVertexWriter};

pub use flextext_core::{FlextextError, Result};
