//! Paired-bracket data for rule N0.
//!
//! The full `Bidi_Paired_Bracket` table belongs to the caller's Unicode
//! data; the small table here covers the ASCII pairs and the canonically
//! equivalent angle brackets so that plain text can be fed straight in.

/// `Bidi_Paired_Bracket_Type` of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PairedBracketType {
    #[default]
    None,
    Open,
    Close,
}

/// Bracket type plus the canonical identity shared by both halves of a pair.
///
/// The identity is conventionally the code point of the opening bracket
/// after canonical decomposition, so `(` and `)` share one value and `〈`
/// (U+2329) pairs with `〉` (U+3009).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairedBracket {
    pub kind: PairedBracketType,
    pub value: u32,
}

impl PairedBracket {
    pub fn open(value: u32) -> Self {
        Self {
            kind: PairedBracketType::Open,
            value,
        }
    }

    pub fn close(value: u32) -> Self {
        Self {
            kind: PairedBracketType::Close,
            value,
        }
    }
}

/// Look up the paired-bracket data for the built-in bracket set.
///
/// Returns `None` for characters outside the table.
pub fn paired_bracket(ch: char) -> Option<PairedBracket> {
    let bracket = match ch {
        '(' => PairedBracket::open('(' as u32),
        ')' => PairedBracket::close('(' as u32),
        '[' => PairedBracket::open('[' as u32),
        ']' => PairedBracket::close('[' as u32),
        '{' => PairedBracket::open('{' as u32),
        '}' => PairedBracket::close('{' as u32),
        // U+2329/U+232A decompose to U+3008/U+3009.
        '\u{2329}' | '\u{3008}' => PairedBracket::open(0x3008),
        '\u{232A}' | '\u{3009}' => PairedBracket::close(0x3008),
        _ => return None,
    };
    Some(bracket)
}
