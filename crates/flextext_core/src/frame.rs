//! Text frame
//!
//! The container geometry a snapshot was laid out against. Supplied fresh by
//! the host on every rebuild.

/// Horizontal alignment the layout engine used for the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    /// Centered on the glyph geometry rather than the advance box
    Geometry,
    #[default]
    Left,
    Center,
    Right,
    /// Stretched to the container width, except for the last line
    Justified,
    /// Stretched to the container width, including the last line
    Flush,
}

impl HorizontalAlignment {
    /// Whether the layout engine already stretched lines to the full width
    pub fn fills_width(self) -> bool {
        matches!(self, HorizontalAlignment::Justified | HorizontalAlignment::Flush)
    }
}

/// Container the text was laid out in
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFrame {
    /// Width lines must fit in
    pub width: f32,
    /// Horizontal pivot of the container, 0 = left edge, 1 = right edge
    pub pivot_x: f32,
    pub alignment: HorizontalAlignment,
}

impl TextFrame {
    /// Frame pivoted at its horizontal center
    pub fn new(width: f32, alignment: HorizontalAlignment) -> Self {
        Self {
            width,
            pivot_x: 0.5,
            alignment,
        }
    }

    pub fn with_pivot_x(mut self, pivot_x: f32) -> Self {
        self.pivot_x = pivot_x;
        self
    }

    /// X of the container's left edge in local space
    pub fn left_edge(&self) -> f32 {
        -self.pivot_x * self.width
    }

    /// X of the container's right edge in local space
    pub fn right_edge(&self) -> f32 {
        (1.0 - self.pivot_x) * self.width
    }
}

impl Default for TextFrame {
    fn default() -> Self {
        Self::new(0.0, HorizontalAlignment::default())
    }
}
