//! Resolving weak types (W1-W7).

use crate::class::DirectionalClass::{self, *};

use super::sequence::IsolatingRunSequence;

/// Weak classes seen in a sequence; rules whose input class is absent are
/// skipped.
#[derive(Debug, Default)]
struct Present {
    en: bool,
    al: bool,
    es: bool,
    cs: bool,
    an: bool,
    et: bool,
}

impl Present {
    fn note(&mut self, class: DirectionalClass) {
        match class {
            EuropeanNumber => self.en = true,
            ArabicLetter => self.al = true,
            EuropeanSeparator => self.es = true,
            CommonSeparator => self.cs = true,
            ArabicNumber => self.an = true,
            EuropeanTerminator => self.et = true,
            _ => {}
        }
    }
}

impl IsolatingRunSequence<'_> {
    pub(crate) fn resolve_weak_types(&mut self) {
        self.apply_weak_rules(Present::default());
    }

    /// W1-W7, running every rule `present` already marks regardless of what
    /// W1 sees.
    fn apply_weak_rules(&mut self, mut present: Present) {
        let len = self.len();

        // W1
        let mut previous = self.sos;
        for i in 0..len {
            let class = self.classes[i];
            if class == NonspacingMark {
                self.classes[i] = previous;
            } else if class.is_isolate_control() {
                previous = OtherNeutral;
            } else {
                present.note(class);
                previous = class;
            }
        }

        // W2
        if present.en {
            let mut last_strong = self.sos;
            for i in 0..len {
                match self.classes[i] {
                    class @ (LeftToRight | RightToLeft | ArabicLetter) => last_strong = class,
                    EuropeanNumber if last_strong == ArabicLetter => {
                        self.classes[i] = ArabicNumber;
                        present.an = true;
                    }
                    _ => {}
                }
            }
        }

        // W3
        if present.al {
            for i in 0..len {
                if self.classes[i] == ArabicLetter {
                    self.classes[i] = RightToLeft;
                }
            }
        }

        // W4
        if (present.es || present.cs) && (present.en || present.an) {
            for i in 1..len.saturating_sub(1) {
                let before = self.classes[i - 1];
                let after = self.classes[i + 1];
                match self.classes[i] {
                    EuropeanSeparator if before == EuropeanNumber && after == EuropeanNumber => {
                        self.classes[i] = EuropeanNumber;
                    }
                    CommonSeparator
                        if before == after && matches!(before, EuropeanNumber | ArabicNumber) =>
                    {
                        self.classes[i] = before;
                    }
                    _ => {}
                }
            }
        }

        // W5
        if present.et && present.en {
            let mut i = 0;
            while i < len {
                if self.classes[i] != EuropeanTerminator {
                    i += 1;
                    continue;
                }

                let start = i;
                let mut end = i;
                while end < len && self.classes[end] == EuropeanTerminator {
                    end += 1;
                }

                let before = if start == 0 { self.sos } else { self.classes[start - 1] };
                let after = if end == len { self.eos } else { self.classes[end] };
                if before == EuropeanNumber || after == EuropeanNumber {
                    for j in start..end {
                        self.classes[j] = EuropeanNumber;
                    }
                }

                i = end;
            }
        }

        // W6
        if present.es || present.et || present.cs {
            for i in 0..len {
                if matches!(
                    self.classes[i],
                    EuropeanSeparator | EuropeanTerminator | CommonSeparator
                ) {
                    self.classes[i] = OtherNeutral;
                }
            }
        }

        // W7
        if present.en {
            let mut last_strong = self.sos;
            for i in 0..len {
                match self.classes[i] {
                    EuropeanNumber if last_strong == LeftToRight => {
                        self.classes[i] = LeftToRight;
                    }
                    class @ (LeftToRight | RightToLeft) => last_strong = class,
                    _ => {}
                }
            }
        }
    }
}
