//! Paired brackets (BD16) and their resolution (N0).

use crate::bracket::PairedBracketType;
use crate::class::DirectionalClass::{self, *};

use super::sequence::IsolatingRunSequence;

/// Deepest stack of unmatched opening brackets (BD16). Reaching it ends
/// bracket pairing for the rest of the sequence.
pub(crate) const MAX_PAIRING_DEPTH: usize = 63;

/// Up to this many pairs are kept ordered by insertion; past it pairs are
/// appended and sorted once at the end.
const SORT_THRESHOLD: usize = 8;

/// Opening and closing bracket positions within one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BracketPair {
    pub opening: usize,
    pub closing: usize,
}

/// Reusable working lists for bracket pairing.
#[derive(Debug, Default)]
pub(crate) struct BracketScratch {
    /// Unmatched openers, most recent last.
    pending: Vec<usize>,
    /// Pairs ordered by opening position.
    pub(crate) pairs: Vec<BracketPair>,
}

impl BracketScratch {
    pub(crate) fn clear(&mut self) {
        self.pending.clear();
        self.pairs.clear();
    }
}

impl IsolatingRunSequence<'_> {
    /// Fill `scratch.pairs` with the bracket pairs of this sequence, sorted
    /// by opening position. Only brackets whose current class is `ON` take
    /// part.
    pub(crate) fn locate_bracket_pairs(&self, scratch: &mut BracketScratch) {
        scratch.clear();
        let Some(brackets) = &self.brackets else {
            return;
        };

        for i in 0..self.len() {
            if self.classes[i] != OtherNeutral {
                continue;
            }

            match brackets.types[i] {
                PairedBracketType::Open => {
                    if scratch.pending.len() == MAX_PAIRING_DEPTH {
                        break;
                    }
                    scratch.pending.push(i);
                }
                PairedBracketType::Close => {
                    let value = brackets.values[i];
                    let matched = scratch
                        .pending
                        .iter()
                        .rposition(|&opening| brackets.values[opening] == value);
                    if let Some(depth) = matched {
                        let opening = scratch.pending[depth];
                        // Openers nested inside the match can no longer close.
                        scratch.pending.truncate(depth);
                        insert_pair(&mut scratch.pairs, BracketPair { opening, closing: i });
                    }
                }
                PairedBracketType::None => {}
            }
        }

        if scratch.pairs.len() > SORT_THRESHOLD {
            scratch.pairs.sort_unstable_by_key(|pair| pair.opening);
        }
    }

    pub(crate) fn resolve_paired_brackets(&mut self, scratch: &mut BracketScratch) {
        self.locate_bracket_pairs(scratch);

        for &pair in &scratch.pairs {
            let inside = self.strong_inside(pair);

            // N0 d: nothing strong inside, leave for N1/N2.
            if inside == OtherNeutral {
                continue;
            }

            let direction = if inside == self.direction {
                // N0 b
                inside
            } else if self.strong_before(pair) == inside {
                // N0 c1: context agrees with the opposite direction inside.
                inside
            } else {
                // N0 c2
                self.direction
            };

            self.set_bracket_direction(pair, direction);
        }
    }

    /// Embedding direction if it occurs strictly between the brackets, else
    /// the opposite direction if that occurs, else `ON`.
    fn strong_inside(&self, pair: BracketPair) -> DirectionalClass {
        let mut opposite = OtherNeutral;
        for i in pair.opening + 1..pair.closing {
            let strong = self.classes[i].strong_for_brackets();
            if strong == OtherNeutral {
                continue;
            }
            if strong == self.direction {
                return strong;
            }
            opposite = strong;
        }
        opposite
    }

    /// First strong direction before the opening bracket, falling back to sos.
    fn strong_before(&self, pair: BracketPair) -> DirectionalClass {
        (0..pair.opening)
            .rev()
            .map(|i| self.classes[i].strong_for_brackets())
            .find(|&strong| strong != OtherNeutral)
            .unwrap_or(self.sos)
    }

    /// Set both brackets to `direction`, along with the marks that originally
    /// followed either of them.
    fn set_bracket_direction(&mut self, pair: BracketPair, direction: DirectionalClass) {
        self.classes[pair.opening] = direction;
        self.classes[pair.closing] = direction;

        for i in pair.opening + 1..pair.closing {
            if self.original[i] != NonspacingMark {
                break;
            }
            self.classes[i] = direction;
        }

        for i in pair.closing + 1..self.len() {
            if self.original[i] != NonspacingMark {
                break;
            }
            self.classes[i] = direction;
        }
    }
}

fn insert_pair(pairs: &mut Vec<BracketPair>, pair: BracketPair) {
    if pairs.len() < SORT_THRESHOLD {
        let at = pairs.partition_point(|p| p.opening < pair.opening);
        pairs.insert(at, pair);
    } else {
        pairs.push(pair);
    }
}
