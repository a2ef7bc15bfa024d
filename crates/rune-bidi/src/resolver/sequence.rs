//! One isolating run sequence, viewed through its index map.
//!
//! Weak, bracket, neutral and implicit resolution (W1-W7, N0-N2, I1-I2)
//! operate on a sequence at a time; their rules live in sibling modules as
//! `impl IsolatingRunSequence` blocks.

use crate::bracket::PairedBracketType;
use crate::class::DirectionalClass;
use crate::level::{Level, direction_from_level};
use crate::slice::{MappedSlice, MappedSliceMut};

use super::brackets::BracketScratch;
use super::runs::SequenceBounds;

/// Bracket data of the paragraph, viewed through the sequence map.
pub(crate) struct SequenceBrackets<'a> {
    pub types: MappedSlice<'a, PairedBracketType>,
    pub values: MappedSlice<'a, u32>,
}

pub(crate) struct IsolatingRunSequence<'a> {
    /// Working classes, rewritten rule by rule.
    pub classes: MappedSliceMut<'a, DirectionalClass>,
    /// Classes as supplied by the caller.
    pub original: MappedSlice<'a, DirectionalClass>,
    pub levels: MappedSliceMut<'a, Level>,
    pub brackets: Option<SequenceBrackets<'a>>,
    pub level: Level,
    /// Embedding direction of `level`.
    pub direction: DirectionalClass,
    pub sos: DirectionalClass,
    pub eos: DirectionalClass,
}

/// Paragraph buffers a sequence is carved out of.
pub(crate) struct ParagraphBuffers<'a> {
    pub original: &'a [DirectionalClass],
    pub working: &'a mut [DirectionalClass],
    pub levels: &'a mut [Level],
    pub brackets: Option<(&'a [PairedBracketType], &'a [u32])>,
}

impl<'a> IsolatingRunSequence<'a> {
    pub(crate) fn new(
        indices: &'a [usize],
        buffers: ParagraphBuffers<'a>,
        bounds: SequenceBounds,
    ) -> Self {
        Self {
            classes: MappedSliceMut::new(buffers.working, indices),
            original: MappedSlice::new(buffers.original, indices),
            levels: MappedSliceMut::new(buffers.levels, indices),
            brackets: buffers.brackets.map(|(types, values)| SequenceBrackets {
                types: MappedSlice::new(types, indices),
                values: MappedSlice::new(values, indices),
            }),
            level: bounds.level,
            direction: direction_from_level(bounds.level),
            sos: bounds.sos,
            eos: bounds.eos,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.classes.len()
    }

    /// Run every per-sequence rule in order, leaving final levels in the
    /// paragraph level buffer.
    pub(crate) fn resolve(&mut self, brackets: &mut BracketScratch) {
        self.resolve_weak_types();
        if self.brackets.is_some() {
            self.resolve_paired_brackets(brackets);
        }
        self.resolve_neutral_types();
        self.resolve_implicit_levels();
    }
}
