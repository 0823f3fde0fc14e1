//! Grapheme segmentation over laid-out characters
//!
//! Groups the visible characters of a line into extended grapheme clusters,
//! so a base letter and its combining marks, or the halves of a flag, can be
//! moved as one unit.
//!
//! The segmenter owns its scratch text and index list and reuses their
//! allocations across lines. Loading a line always clears both first.

use std::ops::RangeInclusive;

use flextext_core::Character;
use unicode_segmentation::{Graphemes, UnicodeSegmentation};

/// One user-perceived character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphemeCluster<'a> {
    /// Text of the cluster
    pub text: &'a str,
    /// Snapshot indices of the member characters, in order, never empty
    pub characters: &'a [usize],
}

/// Reusable grapheme segmenter
#[derive(Debug, Default)]
pub struct GraphemeSegmenter {
    text: String,
    indices: Vec<usize>,
}

impl GraphemeSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the loaded text, keeping allocations
    pub fn clear(&mut self) {
        self.text.clear();
        self.indices.clear();
    }

    /// Load `(snapshot index, char)` pairs, replacing anything loaded before
    pub fn load<I>(&mut self, characters: I)
    where
        I: IntoIterator<Item = (usize, char)>,
    {
        self.clear();
        for (index, character) in characters {
            self.indices.push(index);
            self.text.push(character);
        }
    }

    /// Load the visible characters of `range`
    pub fn load_line(&mut self, characters: &[Character], range: RangeInclusive<usize>) {
        self.load(range.filter_map(|index| {
            let info = &characters[index];
            info.visible.then_some((index, info.character))
        }));
    }

    /// Text currently loaded
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterate clusters of the loaded text, starting from the first one on
    /// every call
    pub fn clusters(&self) -> Clusters<'_> {
        Clusters {
            graphemes: self.text.graphemes(true),
            indices: &self.indices,
            cursor: 0,
        }
    }
}

/// Iterator over the clusters of a loaded line
#[derive(Debug, Clone)]
pub struct Clusters<'a> {
    graphemes: Graphemes<'a>,
    indices: &'a [usize],
    cursor: usize,
}

impl<'a> Iterator for Clusters<'a> {
    type Item = GraphemeCluster<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.graphemes.next()?;
        let len = text.chars().count();
        let characters = &self.indices[self.cursor..self.cursor + len];
        self.cursor += len;
        Some(GraphemeCluster { text, characters })
    }
}
