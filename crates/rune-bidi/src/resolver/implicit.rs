//! Implicit embedding levels (I1, I2).

use crate::class::DirectionalClass::*;
use crate::level::is_rtl;

use super::sequence::IsolatingRunSequence;

impl IsolatingRunSequence<'_> {
    pub(crate) fn resolve_implicit_levels(&mut self) {
        let level = self.level;
        if is_rtl(level) {
            // I2
            for i in 0..self.len() {
                if matches!(self.classes[i], LeftToRight | EuropeanNumber | ArabicNumber) {
                    self.levels[i] = level + 1;
                }
            }
        } else {
            // I1
            for i in 0..self.len() {
                match self.classes[i] {
                    RightToLeft => self.levels[i] = level + 1,
                    EuropeanNumber | ArabicNumber => self.levels[i] = level + 2,
                    _ => {}
                }
            }
        }
    }
}
