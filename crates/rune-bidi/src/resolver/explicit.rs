//! Explicit levels and directions (X1-X8).

use crate::class::DirectionalClass;
use crate::level::{Level, MAX_DEPTH, next_ltr_level, next_rtl_level};

use super::isolate::IsolatePairs;
use super::paragraph::resolve_embedding_level;

/// Directional override carried by a status stack entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Override {
    Neutral,
    Ltr,
    Rtl,
}

impl Override {
    fn class(self) -> Option<DirectionalClass> {
        match self {
            Override::Neutral => None,
            Override::Ltr => Some(DirectionalClass::LeftToRight),
            Override::Rtl => Some(DirectionalClass::RightToLeft),
        }
    }
}

/// Directional status stack entry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Status {
    pub level: Level,
    pub override_status: Override,
    /// Pushed by an isolate initiator rather than an embedding or override.
    pub isolate: bool,
}

/// Assign explicit levels to every character and apply directional
/// overrides to `working`.
///
/// `levels` must already hold the paragraph level everywhere; X9-removed
/// characters get a provisional level that the back-fill pass replaces.
pub(crate) fn resolve_explicit_levels(
    original: &[DirectionalClass],
    working: &mut [DirectionalClass],
    levels: &mut [Level],
    paragraph_level: Level,
    isolates: &IsolatePairs,
    stack: &mut Vec<Status>,
) {
    let mut overflow_isolates = 0usize;
    let mut overflow_embeddings = 0usize;
    let mut valid_isolates = 0usize;

    // X1
    stack.clear();
    stack.push(Status {
        level: paragraph_level,
        override_status: Override::Neutral,
        isolate: false,
    });

    for (i, &class) in original.iter().enumerate() {
        let top = *stack.last().expect("status stack keeps its root entry");

        match class {
            // X2-X5
            DirectionalClass::RightToLeftEmbedding
            | DirectionalClass::LeftToRightEmbedding
            | DirectionalClass::RightToLeftOverride
            | DirectionalClass::LeftToRightOverride => {
                let (level, override_status) = match class {
                    DirectionalClass::RightToLeftEmbedding => {
                        (next_rtl_level(top.level), Override::Neutral)
                    }
                    DirectionalClass::LeftToRightEmbedding => {
                        (next_ltr_level(top.level), Override::Neutral)
                    }
                    DirectionalClass::RightToLeftOverride => {
                        (next_rtl_level(top.level), Override::Rtl)
                    }
                    _ => (next_ltr_level(top.level), Override::Ltr),
                };

                if level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    stack.push(Status {
                        level,
                        override_status,
                        isolate: false,
                    });
                    levels[i] = level;
                } else {
                    if overflow_isolates == 0 {
                        overflow_embeddings += 1;
                    }
                    levels[i] = top.level;
                }
            }

            // X5a-X5c
            DirectionalClass::RightToLeftIsolate
            | DirectionalClass::LeftToRightIsolate
            | DirectionalClass::FirstStrongIsolate => {
                let rtl = match class {
                    DirectionalClass::RightToLeftIsolate => true,
                    DirectionalClass::LeftToRightIsolate => false,
                    _ => {
                        let end = isolates.closing(i).unwrap_or(original.len());
                        resolve_embedding_level(&original[i + 1..end]) == 1
                    }
                };

                levels[i] = top.level;
                if let Some(forced) = top.override_status.class() {
                    working[i] = forced;
                }

                let level = if rtl {
                    next_rtl_level(top.level)
                } else {
                    next_ltr_level(top.level)
                };

                if level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    valid_isolates += 1;
                    stack.push(Status {
                        level,
                        override_status: Override::Neutral,
                        isolate: true,
                    });
                } else {
                    overflow_isolates += 1;
                }
            }

            // X6a
            DirectionalClass::PopDirectionalIsolate => {
                if overflow_isolates > 0 {
                    overflow_isolates -= 1;
                } else if valid_isolates > 0 {
                    overflow_embeddings = 0;
                    while stack.last().is_some_and(|s| !s.isolate) {
                        stack.pop();
                    }
                    stack.pop();
                    valid_isolates -= 1;
                }

                let top = *stack.last().expect("isolate entries sit above the root entry");
                levels[i] = top.level;
                if let Some(forced) = top.override_status.class() {
                    working[i] = forced;
                }
            }

            // X7
            DirectionalClass::PopDirectionalFormat => {
                if overflow_isolates == 0 {
                    if overflow_embeddings > 0 {
                        overflow_embeddings -= 1;
                    } else if !top.isolate && stack.len() >= 2 {
                        stack.pop();
                    }
                }
                levels[i] = stack.last().map_or(paragraph_level, |s| s.level);
            }

            // X8: everything still open ends with the paragraph.
            DirectionalClass::ParagraphSeparator => {
                stack.truncate(1);
                overflow_isolates = 0;
                overflow_embeddings = 0;
                valid_isolates = 0;
                levels[i] = paragraph_level;
            }

            // X6 excludes BN; it only needs a provisional level.
            DirectionalClass::BoundaryNeutral => {
                levels[i] = top.level;
            }

            // X6
            _ => {
                levels[i] = top.level;
                if let Some(forced) = top.override_status.class() {
                    working[i] = forced;
                }
            }
        }
    }
}
