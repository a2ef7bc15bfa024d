//! Directional (bidi) character classes.
//!
//! Classification of characters is done by the caller's Unicode tables; this
//! module only names the classes and groups them the way the rules need.

use core::fmt;
use core::str::FromStr;

use crate::error::BidiError;

/// Unicode `Bidi_Class` of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DirectionalClass {
    // Strong
    /// `L`
    LeftToRight,
    /// `R`
    RightToLeft,
    /// `AL`
    ArabicLetter,

    // Weak
    /// `EN`
    EuropeanNumber,
    /// `ES`
    EuropeanSeparator,
    /// `ET`
    EuropeanTerminator,
    /// `AN`
    ArabicNumber,
    /// `CS`
    CommonSeparator,
    /// `NSM`
    NonspacingMark,
    /// `BN`
    BoundaryNeutral,

    // Neutral
    /// `B`
    ParagraphSeparator,
    /// `S`
    SegmentSeparator,
    /// `WS`
    WhiteSpace,
    /// `ON`
    OtherNeutral,

    // Explicit formatting
    /// `LRE`
    LeftToRightEmbedding,
    /// `LRO`
    LeftToRightOverride,
    /// `RLE`
    RightToLeftEmbedding,
    /// `RLO`
    RightToLeftOverride,
    /// `PDF`
    PopDirectionalFormat,
    /// `LRI`
    LeftToRightIsolate,
    /// `RLI`
    RightToLeftIsolate,
    /// `FSI`
    FirstStrongIsolate,
    /// `PDI`
    PopDirectionalIsolate,
}

use DirectionalClass::*;

impl DirectionalClass {
    /// All classes, in declaration order.
    pub const ALL: [DirectionalClass; 23] = [
        LeftToRight,
        RightToLeft,
        ArabicLetter,
        EuropeanNumber,
        EuropeanSeparator,
        EuropeanTerminator,
        ArabicNumber,
        CommonSeparator,
        NonspacingMark,
        BoundaryNeutral,
        ParagraphSeparator,
        SegmentSeparator,
        WhiteSpace,
        OtherNeutral,
        LeftToRightEmbedding,
        LeftToRightOverride,
        RightToLeftEmbedding,
        RightToLeftOverride,
        PopDirectionalFormat,
        LeftToRightIsolate,
        RightToLeftIsolate,
        FirstStrongIsolate,
        PopDirectionalIsolate,
    ];

    /// Short alias used in the Unicode data files (`"L"`, `"RLE"`, ...).
    pub fn short_name(self) -> &'static str {
        match self {
            LeftToRight => "L",
            RightToLeft => "R",
            ArabicLetter => "AL",
            EuropeanNumber => "EN",
            EuropeanSeparator => "ES",
            EuropeanTerminator => "ET",
            ArabicNumber => "AN",
            CommonSeparator => "CS",
            NonspacingMark => "NSM",
            BoundaryNeutral => "BN",
            ParagraphSeparator => "B",
            SegmentSeparator => "S",
            WhiteSpace => "WS",
            OtherNeutral => "ON",
            LeftToRightEmbedding => "LRE",
            LeftToRightOverride => "LRO",
            RightToLeftEmbedding => "RLE",
            RightToLeftOverride => "RLO",
            PopDirectionalFormat => "PDF",
            LeftToRightIsolate => "LRI",
            RightToLeftIsolate => "RLI",
            FirstStrongIsolate => "FSI",
            PopDirectionalIsolate => "PDI",
        }
    }

    /// Removed from run analysis by rule X9.
    #[inline]
    pub fn is_removed_by_x9(self) -> bool {
        matches!(
            self,
            LeftToRightEmbedding
                | RightToLeftEmbedding
                | LeftToRightOverride
                | RightToLeftOverride
                | PopDirectionalFormat
                | BoundaryNeutral
        )
    }

    /// `LRE`, `RLE`, `LRO`, `RLO` or `PDF`.
    #[inline]
    pub fn is_embedding_control(self) -> bool {
        matches!(
            self,
            LeftToRightEmbedding
                | RightToLeftEmbedding
                | LeftToRightOverride
                | RightToLeftOverride
                | PopDirectionalFormat
        )
    }

    /// `LRI`, `RLI` or `FSI`.
    #[inline]
    pub fn is_isolate_initiator(self) -> bool {
        matches!(self, LeftToRightIsolate | RightToLeftIsolate | FirstStrongIsolate)
    }

    /// Isolate initiator or `PDI`.
    #[inline]
    pub fn is_isolate_control(self) -> bool {
        self.is_isolate_initiator() || self == PopDirectionalIsolate
    }

    /// `L`, `R` or `AL`.
    #[inline]
    pub fn is_strong(self) -> bool {
        matches!(self, LeftToRight | RightToLeft | ArabicLetter)
    }

    /// Whitespace for rule L1, which includes every explicit formatting code
    /// and `BN`.
    #[inline]
    pub fn is_whitespace(self) -> bool {
        matches!(
            self,
            LeftToRightEmbedding
                | RightToLeftEmbedding
                | LeftToRightOverride
                | RightToLeftOverride
                | PopDirectionalFormat
                | LeftToRightIsolate
                | RightToLeftIsolate
                | FirstStrongIsolate
                | PopDirectionalIsolate
                | BoundaryNeutral
                | WhiteSpace
        )
    }

    /// Neutral or isolate formatting character for rules N1 and N2.
    #[inline]
    pub fn is_neutral(self) -> bool {
        matches!(
            self,
            ParagraphSeparator
                | SegmentSeparator
                | WhiteSpace
                | OtherNeutral
                | LeftToRightIsolate
                | RightToLeftIsolate
                | FirstStrongIsolate
                | PopDirectionalIsolate
        )
    }

    /// Strong direction as seen by rule N0: numbers count as `R`, everything
    /// that is not strong maps to `ON`.
    #[inline]
    pub(crate) fn strong_for_brackets(self) -> DirectionalClass {
        match self {
            EuropeanNumber | ArabicNumber | ArabicLetter | RightToLeft => RightToLeft,
            LeftToRight => LeftToRight,
            _ => OtherNeutral,
        }
    }
}

/// Free-standing form of [`DirectionalClass::is_removed_by_x9`], for callers
/// that rebuild a visual character order and need to skip removed positions.
#[inline]
pub fn is_removed_by_x9(class: DirectionalClass) -> bool {
    class.is_removed_by_x9()
}

impl fmt::Display for DirectionalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DirectionalClass {
    type Err = BidiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DirectionalClass::ALL
            .into_iter()
            .find(|class| class.short_name() == s)
            .ok_or_else(|| BidiError::UnknownClass(s.to_string()))
    }
}

impl From<unicode_bidi::BidiClass> for DirectionalClass {
    fn from(class: unicode_bidi::BidiClass) -> Self {
        use unicode_bidi::BidiClass as U;
        match class {
            U::L => LeftToRight,
            U::R => RightToLeft,
            U::AL => ArabicLetter,
            U::EN => EuropeanNumber,
            U::ES => EuropeanSeparator,
            U::ET => EuropeanTerminator,
            U::AN => ArabicNumber,
            U::CS => CommonSeparator,
            U::NSM => NonspacingMark,
            U::BN => BoundaryNeutral,
            U::B => ParagraphSeparator,
            U::S => SegmentSeparator,
            U::WS => WhiteSpace,
            U::ON => OtherNeutral,
            U::LRE => LeftToRightEmbedding,
            U::LRO => LeftToRightOverride,
            U::RLE => RightToLeftEmbedding,
            U::RLO => RightToLeftOverride,
            U::PDF => PopDirectionalFormat,
            U::LRI => LeftToRightIsolate,
            U::RLI => RightToLeftIsolate,
            U::FSI => FirstStrongIsolate,
            U::PDI => PopDirectionalIsolate,
        }
    }
}

/// Parse a whitespace-separated list of short class names.
pub fn parse_classes(s: &str) -> Result<Vec<DirectionalClass>, BidiError> {
    s.split_whitespace().map(str::parse).collect()
}
