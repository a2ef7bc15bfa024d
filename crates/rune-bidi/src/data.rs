//! Owned paragraph input built up character by character.

use crate::bracket::{PairedBracket, PairedBracketType, paired_bracket};
use crate::class::DirectionalClass;
use crate::level::BaseDirection;
use crate::resolver::{BidiInput, ContentHints};

/// Classes and bracket data of one paragraph, with exact content flags.
///
/// Every push keeps the bracket columns the same length as the classes, so
/// [`input`](Self::input) always hands the resolver consistent data and
/// hints it can rely on.
#[derive(Debug, Clone, Default)]
pub struct BidiData {
    classes: Vec<DirectionalClass>,
    bracket_types: Vec<PairedBracketType>,
    bracket_values: Vec<u32>,
    paragraph_level: BaseDirection,
    has_brackets: bool,
    has_embeddings: bool,
    has_isolates: bool,
}

impl BidiData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            classes: Vec::with_capacity(capacity),
            bracket_types: Vec::with_capacity(capacity),
            bracket_values: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Drop all characters, keeping the allocations and paragraph level.
    pub fn clear(&mut self) {
        self.classes.clear();
        self.bracket_types.clear();
        self.bracket_values.clear();
        self.has_brackets = false;
        self.has_embeddings = false;
        self.has_isolates = false;
    }

    pub fn set_paragraph_level(&mut self, paragraph_level: BaseDirection) {
        self.paragraph_level = paragraph_level;
    }

    pub fn paragraph_level(&self) -> BaseDirection {
        self.paragraph_level
    }

    pub fn push(&mut self, class: DirectionalClass) {
        self.note(class);
        self.classes.push(class);
        self.bracket_types.push(PairedBracketType::None);
        self.bracket_values.push(0);
    }

    pub fn push_bracket(&mut self, class: DirectionalClass, bracket: PairedBracket) {
        self.note(class);
        self.has_brackets |= bracket.kind != PairedBracketType::None;
        self.classes.push(class);
        self.bracket_types.push(bracket.kind);
        self.bracket_values.push(bracket.value);
    }

    /// Classify `text` with the Unicode character database and append it.
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            let class = DirectionalClass::from(unicode_bidi::bidi_class(ch));
            match paired_bracket(ch) {
                Some(bracket) => self.push_bracket(class, bracket),
                None => self.push(class),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[DirectionalClass] {
        &self.classes
    }

    /// Borrow as resolver input. Bracket data is only passed along when the
    /// paragraph has brackets.
    pub fn input(&self) -> BidiInput<'_> {
        let input = BidiInput::new(&self.classes)
            .with_paragraph_level(self.paragraph_level)
            .with_hints(ContentHints::exact(
                self.has_brackets,
                self.has_embeddings,
                self.has_isolates,
            ));

        if self.has_brackets {
            input.with_brackets(&self.bracket_types, &self.bracket_values)
        } else {
            input
        }
    }

    fn note(&mut self, class: DirectionalClass) {
        self.has_embeddings |= class.is_removed_by_x9();
        self.has_isolates |= class.is_isolate_control();
    }
}

impl Extend<DirectionalClass> for BidiData {
    fn extend<I: IntoIterator<Item = DirectionalClass>>(&mut self, iter: I) {
        for class in iter {
            self.push(class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::parse_classes;
    use crate::resolver::BidiResolver;
    use DirectionalClass::*;

    #[test]
    fn pushes_keep_columns_aligned() {
        let mut data = BidiData::new();
        data.push(LeftToRight);
        data.push_bracket(OtherNeutral, PairedBracket::open(0x28));
        data.extend(parse_classes("R WS").unwrap());
        assert_eq!(data.len(), 4);

        let input = data.input();
        assert_eq!(input.bracket_types.len(), 4);
        assert_eq!(input.bracket_values.len(), 4);
        assert_eq!(input.hints, ContentHints::exact(true, false, false));
    }

    #[test]
    fn flags_track_controls() {
        let mut data = BidiData::new();
        data.extend(parse_classes("L BN R").unwrap());
        assert_eq!(data.input().hints, ContentHints::exact(false, true, false));

        data.clear();
        data.extend(parse_classes("PDI").unwrap());
        assert_eq!(data.input().hints, ContentHints::exact(false, false, true));
    }

    #[test]
    fn input_without_brackets_omits_bracket_data() {
        let mut data = BidiData::with_capacity(8);
        data.extend(parse_classes("L R").unwrap());
        let input = data.input();
        assert!(input.bracket_types.is_empty());
        assert!(input.bracket_values.is_empty());
    }

    #[test]
    fn push_text_classifies_characters() {
        let mut data = BidiData::new();
        data.push_text("a (\u{05D0}) 1");
        assert_eq!(
            data.classes(),
            &[
                LeftToRight,
                WhiteSpace,
                OtherNeutral,
                RightToLeft,
                OtherNeutral,
                WhiteSpace,
                EuropeanNumber
            ]
        );
        assert!(data.input().hints.has_brackets == Some(true));
    }

    #[test]
    fn clear_keeps_paragraph_level() {
        let mut data = BidiData::new();
        data.set_paragraph_level(BaseDirection::Rtl);
        data.push_text("abc");
        data.clear();
        assert!(data.is_empty());
        assert_eq!(data.paragraph_level(), BaseDirection::Rtl);
    }

    #[test]
    fn resolves_through_input() {
        let mut data = BidiData::new();
        data.push_text("a(\u{05D0})");
        let mut resolver = BidiResolver::new();
        assert_eq!(resolver.process(&data.input()), &[0, 0, 1, 0]);
    }
}
