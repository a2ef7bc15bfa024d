//! Resolving neutral and isolate formatting types (N1, N2).

use crate::class::DirectionalClass::*;

use super::sequence::IsolatingRunSequence;

impl IsolatingRunSequence<'_> {
    pub(crate) fn resolve_neutral_types(&mut self) {
        let len = self.len();
        let mut i = 0;
        while i < len {
            if !self.classes[i].is_neutral() {
                i += 1;
                continue;
            }

            let start = i;
            while i < len && self.classes[i].is_neutral() {
                i += 1;
            }

            // Numbers count as R on either side.
            let before = if start == 0 {
                self.sos
            } else {
                self.classes[start - 1].strong_for_brackets()
            };
            let after = if i == len {
                self.eos
            } else {
                self.classes[i].strong_for_brackets()
            };

            let resolved = if before == after && before != OtherNeutral {
                // N1
                before
            } else {
                // N2
                self.direction
            };

            for j in start..i {
                self.classes[j] = resolved;
            }
        }
    }
}
