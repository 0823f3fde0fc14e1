//! Mesh vertex writer
//!
//! Runs the post-pass over a freshly laid-out snapshot: fit first, then
//! curve. The curve stage assumes fitted positions, so the order is fixed.
//!
//! Hosts call this after their layout engine produced a snapshot and only
//! upload the vertex buffers again when it reports a change.

use flextext_core::{LayoutSnapshot, Result, TextFrame};

use crate::config::TransformConfig;
use crate::fit;
use crate::grapheme::GraphemeSegmenter;
use crate::warp;

/// A post-pass that edits laid-out text geometry in place
pub trait MeshModifier {
    /// Returns true if any vertex moved
    fn modify_mesh(&mut self, snapshot: &mut LayoutSnapshot, frame: &TextFrame) -> Result<bool>;
}

/// Runs the fit and curve stages with reusable scratch space
#[derive(Debug, Default)]
pub struct MeshVertexWriter {
    segmenter: GraphemeSegmenter,
}

impl MeshVertexWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform `snapshot` in place.
    ///
    /// The snapshot is validated first; a malformed one is rejected before
    /// any vertex moves.
    pub fn transform(
        &mut self,
        snapshot: &mut LayoutSnapshot,
        config: &TransformConfig,
        frame: &TextFrame,
    ) -> Result<bool> {
        snapshot.validate()?;

        let fitted = fit::fit_lines(snapshot, config, frame)?;
        let curved = warp::warp(snapshot, config, &mut self.segmenter);

        tracing::debug!(fitted, curved, "mesh post-pass finished");
        Ok(fitted || curved)
    }
}

/// A text component's fit and curve settings bound to a writer
#[derive(Debug, Default)]
pub struct FlexibleTextMesh {
    config: TransformConfig,
    writer: MeshVertexWriter,
}

impl FlexibleTextMesh {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            writer: MeshVertexWriter::new(),
        }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Replace the settings. The host must rebuild the mesh afterwards.
    pub fn set_config(&mut self, config: TransformConfig) {
        self.config = config;
    }
}

impl MeshModifier for FlexibleTextMesh {
    fn modify_mesh(&mut self, snapshot: &mut LayoutSnapshot, frame: &TextFrame) -> Result<bool> {
        self.writer.transform(snapshot, &self.config, frame)
    }
}

/// Run `modifiers` in order over one snapshot, stopping at the first error.
///
/// Returns true if any of them moved a vertex.
pub fn apply_modifiers(
    snapshot: &mut LayoutSnapshot,
    frame: &TextFrame,
    modifiers: &mut [&mut dyn MeshModifier],
) -> Result<bool> {
    let mut modified = false;
    for modifier in modifiers.iter_mut() {
        modified |= modifier.modify_mesh(snapshot, frame)?;
    }
    Ok(modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurveType;
    use flextext_core::{FlextextError, HorizontalAlignment, Rect, SnapshotBuilder};

    fn wide_line() -> LayoutSnapshot {
        let mut builder = SnapshotBuilder::new();
        builder.glyph('w', Rect::new(-100.0, 0.0, 100.0, 10.0));
        builder.glyph('w', Rect::new(0.0, 0.0, 100.0, 10.0));
        builder.end_line();
        builder.build()
    }

    #[test]
    fn test_passthrough_reports_unmodified() {
        let original = wide_line();
        let mut snapshot = original.clone();
        let mut writer = MeshVertexWriter::new();

        let modified = writer
            .transform(
                &mut snapshot,
                &TransformConfig::default(),
                &TextFrame::new(100.0, HorizontalAlignment::Center),
            )
            .unwrap();

        assert!(!modified);
        assert_eq!(snapshot, original);
    }

    #[test]
    fn test_invalid_snapshot_is_rejected_untouched() {
        let mut snapshot = wide_line();
        snapshot.characters[1].vertex_index = 40;
        let original = snapshot.clone();

        let config = TransformConfig::new()
            .with_shrink(false)
            .with_curve(CurveType::RotatePerGlyph, 20.0);
        let result = MeshVertexWriter::new().transform(
            &mut snapshot,
            &config,
            &TextFrame::new(100.0, HorizontalAlignment::Center),
        );

        assert!(matches!(
            result,
            Err(FlextextError::VertexOutOfRange { character: 1, .. })
        ));
        assert_eq!(snapshot, original);
    }

    #[test]
    fn test_inverted_line_is_rejected_untouched() {
        let mut snapshot = wide_line();
        snapshot.lines[0].first_character = 3;
        snapshot.lines[0].last_character = 0;
        let original = snapshot.clone();

        for config in [
            TransformConfig::new().with_shrink(false),
            TransformConfig::new().with_curve(CurveType::RotatePerGrapheme, 20.0),
        ] {
            let result = MeshVertexWriter::new().transform(
                &mut snapshot,
                &config,
                &TextFrame::new(100.0, HorizontalAlignment::Center),
            );
            assert!(matches!(
                result,
                Err(FlextextError::InvertedLine { line: 0, first: 3, last: 0 })
            ));
            assert_eq!(snapshot, original);
        }
    }

    #[test]
    fn test_vertex_index_near_max_is_rejected() {
        let mut snapshot = wide_line();
        snapshot.characters[1].vertex_index = usize::MAX - 1;
        let original = snapshot.clone();

        let config = TransformConfig::new().with_curve(CurveType::RotatePerGlyph, 20.0);
        let result = MeshVertexWriter::new().transform(
            &mut snapshot,
            &config,
            &TextFrame::new(100.0, HorizontalAlignment::Center),
        );

        assert!(matches!(
            result,
            Err(FlextextError::VertexOutOfRange { character: 1, .. })
        ));
        assert_eq!(snapshot, original);
    }

    #[test]
    fn test_fit_alone_reports_modified() {
        let mut snapshot = wide_line();
        let modified = MeshVertexWriter::new()
            .transform(
                &mut snapshot,
                &TransformConfig::new().with_shrink(false),
                &TextFrame::new(100.0, HorizontalAlignment::Center),
            )
            .unwrap();
        assert!(modified);
    }

    #[test]
    fn test_flexible_text_mesh_as_modifier() {
        let mut text = FlexibleTextMesh::new(TransformConfig::default());
        let mut snapshot = wide_line();
        let frame = TextFrame::new(100.0, HorizontalAlignment::Center);

        assert!(!text.modify_mesh(&mut snapshot, &frame).unwrap());

        text.set_config(TransformConfig::new().with_curve(CurveType::RotatePerVertex, 90.0));
        assert_eq!(text.config().curve_type, CurveType::RotatePerVertex);
        assert!(text.modify_mesh(&mut snapshot, &frame).unwrap());
    }

    #[test]
    fn test_apply_modifiers_chains_passes() {
        let mut fit = FlexibleTextMesh::new(TransformConfig::new().with_shrink(false));
        let mut noop = FlexibleTextMesh::default();
        let mut snapshot = wide_line();
        let frame = TextFrame::new(100.0, HorizontalAlignment::Center);

        let mut passes: [&mut dyn MeshModifier; 2] = [&mut noop, &mut fit];
        let modified = apply_modifiers(&mut snapshot, &frame, &mut passes).unwrap();
        assert!(modified);
        assert_eq!(snapshot.visible_extent(0), Some((-50.0, 50.0)));
    }

    #[test]
    fn test_apply_modifiers_stops_at_error() {
        let mut fit = FlexibleTextMesh::new(TransformConfig::new().with_shrink(false));
        let mut snapshot = wide_line();
        snapshot.characters[0].material = 9;
        let frame = TextFrame::new(100.0, HorizontalAlignment::Center);

        let mut passes: [&mut dyn MeshModifier; 1] = [&mut fit];
        let result = apply_modifiers(&mut snapshot, &frame, &mut passes);
        assert!(matches!(
            result,
            Err(FlextextError::MissingMaterial { material: 9, .. })
        ));
    }
}
