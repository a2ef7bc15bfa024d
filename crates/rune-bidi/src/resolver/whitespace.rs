//! Line-level fix-ups applied after every sequence is resolved: the L1
//! whitespace reset and levels for characters X9 removed.

use crate::class::DirectionalClass::{self, *};
use crate::level::Level;

/// Rule L1: segment and paragraph separators, any whitespace run before
/// them and trailing whitespace all return to the paragraph level.
///
/// Whitespace here includes isolate and embedding controls and `BN`, and is
/// judged on the original classes.
pub(crate) fn reset_whitespace_levels(
    original: &[DirectionalClass],
    levels: &mut [Level],
    paragraph_level: Level,
) {
    let mut whitespace_start: Option<usize> = None;

    for (i, &class) in original.iter().enumerate() {
        match class {
            ParagraphSeparator | SegmentSeparator => {
                let from = whitespace_start.take().unwrap_or(i);
                levels[from..=i].fill(paragraph_level);
            }
            class if class.is_whitespace() => {
                whitespace_start.get_or_insert(i);
            }
            _ => whitespace_start = None,
        }
    }

    if let Some(from) = whitespace_start {
        levels[from..].fill(paragraph_level);
    }
}

/// Give each X9-removed character the level of the character before it, so
/// it stays inside the surrounding run. A removed first character takes the
/// paragraph level.
pub(crate) fn assign_removed_levels(
    original: &[DirectionalClass],
    levels: &mut [Level],
    paragraph_level: Level,
) {
    for (i, class) in original.iter().enumerate() {
        if class.is_removed_by_x9() {
            levels[i] = if i == 0 { paragraph_level } else { levels[i - 1] };
        }
    }
}
