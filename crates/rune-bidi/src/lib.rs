//! rune-bidi: Unicode Bidirectional Algorithm (UAX #9) level resolution.
//!
//! Given the directional classes of one paragraph (and optionally its
//! paired-bracket data), [`BidiResolver`] computes the embedding level of
//! every character. Layout consumes those levels to reorder runs for
//! display; classification of characters and the final visual reordering
//! (rule L2) live outside this crate.
//!
//! - Explicit levels (X1-X8) with the 125-deep directional status stack
//! - Isolating run sequences (X9, X10) with weak, bracket, neutral and
//!   implicit resolution (W1-W7, N0-N2, I1-I2)
//! - Whitespace reset (L1) and level back-fill for X9-removed characters
//!
//! A resolver owns its scratch buffers and reuses them across calls, so keep
//! one per worker thread and feed it paragraph after paragraph.

pub mod bracket;
pub mod class;
pub mod data;
pub mod error;
pub mod level;
pub mod resolver;
pub mod slice;

pub use bracket::{PairedBracket, PairedBracketType, paired_bracket};
pub use class::{DirectionalClass, is_removed_by_x9};
pub use data::BidiData;
pub use error::{BidiError, Result};
pub use level::{BaseDirection, Level, MAX_DEPTH, ParagraphDirection};
pub use resolver::{
    BidiInput, BidiResolver, ContentHints, HintPolicy, ResolverOptions, resolve_embedding_level,
};
