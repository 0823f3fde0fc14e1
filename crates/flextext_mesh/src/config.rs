//! Transform configuration
//!
//! Supplied fresh on every mesh rebuild; nothing here persists between calls.

/// How glyph geometry is bent onto the warp circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveType {
    /// Leave glyphs straight
    #[default]
    None,
    /// Map every vertex by its own angle. Cheap, but shears glyphs.
    RotatePerVertex,
    /// Rotate each glyph quad rigidly about its centroid
    RotatePerGlyph,
    /// Rotate each grapheme cluster rigidly about its bounding box center
    RotatePerGrapheme,
}

/// Options for the fit and curve stages
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformConfig {
    /// Squeeze lines horizontally when they overflow the frame width
    pub shrink_content: bool,
    /// Scale each overflowing line on its own instead of sharing the scale
    /// of the widest line
    pub shrink_line_by_line: bool,
    pub curve_type: CurveType,
    /// Radius of the warp circle in local units. Zero disables the curve.
    pub radius: f32,
}

impl TransformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable shrinking; `line_by_line` picks per-line scales
    pub fn with_shrink(mut self, line_by_line: bool) -> Self {
        self.shrink_content = true;
        self.shrink_line_by_line = line_by_line;
        self
    }

    pub fn with_curve(mut self, curve_type: CurveType, radius: f32) -> Self {
        self.curve_type = curve_type;
        self.radius = radius;
        self
    }

    /// Whether the curve stage has anything to do
    pub fn is_curved(&self) -> bool {
        self.curve_type != CurveType::None
    }
}
