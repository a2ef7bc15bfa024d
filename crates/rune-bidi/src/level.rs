use crate::class::DirectionalClass;
use crate::error::BidiError;

/// Embedding level of one character. Even levels are left-to-right, odd
/// levels right-to-left.
pub type Level = i8;

/// Deepest explicit embedding level (BD2).
///
/// Implicit resolution (I1/I2) may raise a character one or two levels past
/// this, so resolved levels stay within `0..=MAX_DEPTH + 1`.
pub const MAX_DEPTH: Level = 125;

/// Paragraph level code meaning "detect with P2/P3".
pub const AUTO_LEVEL: Level = 2;

/// Base direction hint for paragraph analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseDirection {
    /// Detect paragraph base direction from text (first strong char).
    #[default]
    Auto,
    /// Force overall left-to-right base direction.
    Ltr,
    /// Force overall right-to-left base direction.
    Rtl,
}

impl BaseDirection {
    /// Explicit paragraph level, or `None` for auto-detection.
    pub fn to_level(self) -> Option<Level> {
        match self {
            BaseDirection::Auto => None,
            BaseDirection::Ltr => Some(0),
            BaseDirection::Rtl => Some(1),
        }
    }

    /// Level code as passed across the layout boundary: 0, 1 or 2 (auto).
    pub fn code(self) -> Level {
        self.to_level().unwrap_or(AUTO_LEVEL)
    }
}

impl TryFrom<Level> for BaseDirection {
    type Error = BidiError;

    fn try_from(code: Level) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BaseDirection::Ltr),
            1 => Ok(BaseDirection::Rtl),
            AUTO_LEVEL => Ok(BaseDirection::Auto),
            other => Err(BidiError::InvalidParagraphLevel(other)),
        }
    }
}

/// Paragraph direction classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphDirection {
    Ltr,
    Rtl,
    Mixed,
}

impl ParagraphDirection {
    /// Classify resolved levels: all even is `Ltr`, all odd is `Rtl`,
    /// anything else `Mixed`. Empty input falls back to the paragraph level.
    pub fn from_levels(levels: &[Level], paragraph_level: Level) -> Self {
        let mut even = false;
        let mut odd = false;
        for &level in levels {
            if is_rtl(level) {
                odd = true;
            } else {
                even = true;
            }
            if even && odd {
                return ParagraphDirection::Mixed;
            }
        }

        match (even, odd) {
            (true, false) => ParagraphDirection::Ltr,
            (false, true) => ParagraphDirection::Rtl,
            _ if is_rtl(paragraph_level) => ParagraphDirection::Rtl,
            _ => ParagraphDirection::Ltr,
        }
    }
}

#[inline]
pub(crate) fn is_rtl(level: Level) -> bool {
    level & 1 == 1
}

/// Least odd level greater than `level` (X2, X4, X5a).
#[inline]
pub(crate) fn next_rtl_level(level: Level) -> Level {
    (level + 1) | 1
}

/// Least even level greater than `level` (X3, X5, X5b).
#[inline]
pub(crate) fn next_ltr_level(level: Level) -> Level {
    (level + 2) & !1
}

/// `L` for even levels, `R` for odd ones.
#[inline]
pub(crate) fn direction_from_level(level: Level) -> DirectionalClass {
    if is_rtl(level) {
        DirectionalClass::RightToLeft
    } else {
        DirectionalClass::LeftToRight
    }
}
