//! Paragraph level detection (P2, P3).

use crate::class::DirectionalClass;
use crate::level::Level;

/// Level of the first strong character in `classes`, skipping the content of
/// isolates: 0 for `L`, 1 for `R` or `AL`, 0 when there is no strong
/// character at all.
///
/// An isolate initiator without a matching PDI hides everything after it,
/// and the search ends at a paragraph separator.
/// The same routine resolves `FSI` direction (X5c) when handed the content
/// of the isolate.
pub fn resolve_embedding_level(classes: &[DirectionalClass]) -> Level {
    // Open isolates; strong characters only count at depth 0.
    let mut depth = 0usize;

    for &class in classes {
        match class {
            DirectionalClass::LeftToRight if depth == 0 => return 0,
            DirectionalClass::RightToLeft | DirectionalClass::ArabicLetter if depth == 0 => {
                return 1;
            }
            DirectionalClass::LeftToRightIsolate
            | DirectionalClass::RightToLeftIsolate
            | DirectionalClass::FirstStrongIsolate => depth += 1,
            DirectionalClass::PopDirectionalIsolate if depth > 0 => depth -= 1,
            DirectionalClass::ParagraphSeparator => break,
            _ => {}
        }
    }

    0
}
