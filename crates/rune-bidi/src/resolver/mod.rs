//! The paragraph resolver.
//!
//! [`BidiResolver::process`] runs the whole pipeline over one paragraph:
//! BD9 isolate pairing, paragraph level (P2/P3), explicit levels (X1-X8),
//! the X9 removal map, level runs and isolating run sequences (X10), then
//! per-sequence weak, bracket, neutral and implicit resolution, and finally
//! the L1 whitespace reset with back-fill of X9-removed characters.

mod brackets;
mod explicit;
mod implicit;
mod isolate;
mod neutral;
mod paragraph;
mod runs;
mod sequence;
mod weak;
mod whitespace;

pub use isolate::IsolatePairs;
pub use paragraph::resolve_embedding_level;

use tracing::{debug, trace, warn};

use crate::bracket::PairedBracketType;
use crate::class::DirectionalClass;
use crate::error::{BidiError, Result};
use crate::level::{BaseDirection, Level, ParagraphDirection};

use brackets::BracketScratch;
use explicit::Status;
use isolate::ControlScan;
use runs::{LevelRun, RunContext, SequenceJoiner};
use sequence::{IsolatingRunSequence, ParagraphBuffers};

/// How far the resolver relies on [`ContentHints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintPolicy {
    /// Measure content presence; hints that disagree are logged and ignored.
    #[default]
    Verify,
    /// A `Some(false)` hint skips the matching phase unchecked. Wrong hints
    /// give wrong levels.
    Trust,
}

/// Caller knowledge about a paragraph. `None` means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentHints {
    /// Any opening or closing paired bracket.
    pub has_brackets: Option<bool>,
    /// Any character X9 removes: embedding, override, PDF or BN.
    pub has_embeddings: Option<bool>,
    /// Any isolate initiator or PDI.
    pub has_isolates: Option<bool>,
}

impl ContentHints {
    /// Hints with every flag known.
    pub const fn exact(has_brackets: bool, has_embeddings: bool, has_isolates: bool) -> Self {
        Self {
            has_brackets: Some(has_brackets),
            has_embeddings: Some(has_embeddings),
            has_isolates: Some(has_isolates),
        }
    }
}

/// One paragraph of classified text.
///
/// Bracket data is optional; when supplied, both slices must match
/// `classes` in length or they are ignored.
#[derive(Debug, Clone, Copy)]
pub struct BidiInput<'a> {
    /// One bidirectional class per character.
    pub classes: &'a [DirectionalClass],
    /// Opening, closing or none, per character.
    pub bracket_types: &'a [PairedBracketType],
    /// Canonical pair identity per character; an opener and its closer share
    /// one value.
    pub bracket_values: &'a [u32],
    /// Forced direction, or `Auto` to detect it with P2/P3.
    pub paragraph_level: BaseDirection,
    pub hints: ContentHints,
}

impl<'a> BidiInput<'a> {
    /// Classes only, auto direction, no hints.
    pub fn new(classes: &'a [DirectionalClass]) -> Self {
        Self {
            classes,
            bracket_types: &[],
            bracket_values: &[],
            paragraph_level: BaseDirection::Auto,
            hints: ContentHints::default(),
        }
    }

    /// Attach bracket columns. They are ignored unless both match `classes`
    /// in length.
    pub fn with_brackets(mut self, types: &'a [PairedBracketType], values: &'a [u32]) -> Self {
        self.bracket_types = types;
        self.bracket_values = values;
        self
    }

    pub fn with_paragraph_level(mut self, paragraph_level: BaseDirection) -> Self {
        self.paragraph_level = paragraph_level;
        self
    }

    /// What the caller already knows about the paragraph's content.
    pub fn with_hints(mut self, hints: ContentHints) -> Self {
        self.hints = hints;
        self
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Bracket slices when they line up with the classes.
    fn brackets(&self) -> Option<(&'a [PairedBracketType], &'a [u32])> {
        if self.bracket_types.is_empty() && self.bracket_values.is_empty() {
            return None;
        }

        let len = self.classes.len();
        if self.bracket_types.len() != len || self.bracket_values.len() != len {
            debug!(
                classes = len,
                bracket_types = self.bracket_types.len(),
                bracket_values = self.bracket_values.len(),
                "bracket data length mismatch; skipping bracket pairs"
            );
            return None;
        }

        Some((self.bracket_types, self.bracket_values))
    }
}

/// Tuning for a [`BidiResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolverOptions {
    /// Characters to reserve room for up front.
    pub initial_capacity: usize,
    pub hint_policy: HintPolicy,
}

impl From<&rune_config::BidiConfig> for ResolverOptions {
    fn from(config: &rune_config::BidiConfig) -> Self {
        Self {
            initial_capacity: config.initial_capacity,
            hint_policy: if config.trust_hints {
                HintPolicy::Trust
            } else {
                HintPolicy::Verify
            },
        }
    }
}

/// Buffers reused from one paragraph to the next.
#[derive(Debug, Default)]
struct Scratch {
    working: Vec<DirectionalClass>,
    isolates: IsolatePairs,
    stack: Vec<Status>,
    x9_map: Vec<usize>,
    runs: Vec<LevelRun>,
    consumed: Vec<bool>,
    indices: Vec<usize>,
    brackets: BracketScratch,
}

impl Scratch {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            working: Vec::with_capacity(capacity),
            x9_map: Vec::with_capacity(capacity),
            indices: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }
}

/// Resolves embedding levels for one paragraph at a time.
///
/// Not shareable across threads while processing; keep one per worker and
/// reuse it, since every call recycles the same buffers.
#[derive(Debug, Default)]
pub struct BidiResolver {
    options: ResolverOptions,
    scratch: Scratch,
    levels: Vec<Level>,
    paragraph_level: Level,
}

impl BidiResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ResolverOptions) -> Self {
        Self {
            options,
            scratch: Scratch::with_capacity(options.initial_capacity),
            levels: Vec::with_capacity(options.initial_capacity),
            paragraph_level: 0,
        }
    }

    pub fn from_config(config: &rune_config::BidiConfig) -> Self {
        Self::with_options(ResolverOptions::from(config))
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// Resolve `input` into the resolver's own buffer. The returned levels
    /// stay valid until the next call.
    pub fn process(&mut self, input: &BidiInput<'_>) -> &[Level] {
        let mut levels = std::mem::take(&mut self.levels);
        levels.clear();
        levels.resize(input.len(), 0);
        self.resolve(input, &mut levels);
        self.levels = levels;
        &self.levels
    }

    /// Resolve `input` into `out`, which must have one slot per character.
    ///
    /// A length mismatch is reported before any state changes. On success
    /// [`resolved_levels`](Self::resolved_levels) holds a copy of `out`.
    pub fn process_into(&mut self, input: &BidiInput<'_>, out: &mut [Level]) -> Result<()> {
        if out.len() != input.len() {
            return Err(BidiError::OutputLengthMismatch {
                expected: input.len(),
                actual: out.len(),
            });
        }

        self.resolve(input, out);
        self.levels.clear();
        self.levels.extend_from_slice(out);
        Ok(())
    }

    /// Levels of the last successful call.
    pub fn resolved_levels(&self) -> &[Level] {
        &self.levels
    }

    /// Paragraph level used by the last call, whether given or detected.
    pub fn resolved_paragraph_level(&self) -> Level {
        self.paragraph_level
    }

    /// Direction of the last resolved paragraph.
    pub fn paragraph_direction(&self) -> ParagraphDirection {
        ParagraphDirection::from_levels(&self.levels, self.paragraph_level)
    }

    /// Isolate pairs found by the last call.
    pub fn isolate_pairs(&self) -> &IsolatePairs {
        &self.scratch.isolates
    }

    fn resolve(&mut self, input: &BidiInput<'_>, levels: &mut [Level]) {
        let classes = input.classes;
        let policy = self.options.hint_policy;
        let scratch = &mut self.scratch;

        scratch.working.clear();
        scratch.working.extend_from_slice(classes);

        let scan = scan_controls(&mut scratch.isolates, classes, input.hints, policy);
        let brackets = usable_brackets(input, policy);

        // P2, P3
        let paragraph_level = input
            .paragraph_level
            .to_level()
            .unwrap_or_else(|| resolve_embedding_level(classes));
        self.paragraph_level = paragraph_level;
        levels.fill(paragraph_level);

        if scan.isolates || scan.embeddings {
            explicit::resolve_explicit_levels(
                classes,
                &mut scratch.working,
                levels,
                paragraph_level,
                &scratch.isolates,
                &mut scratch.stack,
            );
        }

        runs::build_x9_map(classes, !scan.embeddings, &mut scratch.x9_map);

        RunContext {
            original: classes,
            levels: &*levels,
            x9_map: &scratch.x9_map,
            paragraph_level,
        }
        .find_level_runs(&mut scratch.runs);

        scratch.consumed.clear();
        scratch.consumed.resize(scratch.runs.len(), false);

        let joiner = SequenceJoiner {
            original: classes,
            x9_map: &scratch.x9_map,
            runs: &scratch.runs,
            isolates: &scratch.isolates,
        };

        let mut sequences = 0usize;
        for first in 0..scratch.runs.len() {
            if scratch.consumed[first] {
                continue;
            }

            let bounds = joiner.join(first, &mut scratch.consumed, &mut scratch.indices);
            let mut sequence = IsolatingRunSequence::new(
                &scratch.indices,
                ParagraphBuffers {
                    original: classes,
                    working: &mut scratch.working,
                    levels: &mut *levels,
                    brackets,
                },
                bounds,
            );
            sequence.resolve(&mut scratch.brackets);
            sequences += 1;
        }

        whitespace::reset_whitespace_levels(classes, levels, paragraph_level);
        if scan.embeddings {
            whitespace::assign_removed_levels(classes, levels, paragraph_level);
        }

        trace!(
            len = classes.len(),
            paragraph_level,
            sequences,
            isolate_pairs = scratch.isolates.len(),
            "resolved paragraph levels"
        );
    }
}

/// Isolate pairs and explicit-control presence, per the hint policy.
fn scan_controls(
    isolates: &mut IsolatePairs,
    classes: &[DirectionalClass],
    hints: ContentHints,
    policy: HintPolicy,
) -> ControlScan {
    if policy == HintPolicy::Trust && hints.has_isolates == Some(false) {
        isolates.clear();
        let embeddings = hints
            .has_embeddings
            .unwrap_or_else(|| classes.iter().any(|class| class.is_removed_by_x9()));
        return ControlScan {
            isolates: false,
            embeddings,
        };
    }

    let mut scan = isolates.find(classes);
    match policy {
        HintPolicy::Trust => {
            if let Some(embeddings) = hints.has_embeddings {
                scan.embeddings = embeddings;
            }
        }
        HintPolicy::Verify => {
            check_hint("has_isolates", hints.has_isolates, scan.isolates);
            check_hint("has_embeddings", hints.has_embeddings, scan.embeddings);
        }
    }
    scan
}

/// Bracket data worth running N0 over, per the hint policy.
fn usable_brackets<'a>(
    input: &BidiInput<'a>,
    policy: HintPolicy,
) -> Option<(&'a [PairedBracketType], &'a [u32])> {
    if policy == HintPolicy::Trust && input.hints.has_brackets == Some(false) {
        return None;
    }

    let brackets = input.brackets().filter(|(types, _)| {
        types.iter().any(|&kind| kind != PairedBracketType::None)
    });

    if policy == HintPolicy::Verify {
        check_hint("has_brackets", input.hints.has_brackets, brackets.is_some());
    }
    brackets
}

fn check_hint(hint: &'static str, claimed: Option<bool>, measured: bool) {
    if claimed.is_some_and(|claimed| claimed != measured) {
        warn!(hint, claimed = ?claimed, measured, "content hint contradicts paragraph; ignoring it");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::paired_bracket;
    use crate::class::parse_classes;

    fn brackets_for(tokens: &str) -> (Vec<PairedBracketType>, Vec<u32>) {
        tokens
            .split_whitespace()
            .map(|token| {
                let bracket = token.chars().next().and_then(paired_bracket);
                (
                    bracket.map_or(PairedBracketType::None, |b| b.kind),
                    bracket.map_or(0, |b| b.value),
                )
            })
            .unzip()
    }

    fn levels_of(names: &str, direction: BaseDirection) -> Vec<Level> {
        let classes = parse_classes(names).unwrap();
        let mut resolver = BidiResolver::new();
        let input = BidiInput::new(&classes).with_paragraph_level(direction);
        resolver.process(&input).to_vec()
    }

    #[test]
    fn mixed_paragraph_resolves_runs() {
        assert_eq!(levels_of("L WS R R WS L", BaseDirection::Ltr), vec![0, 0, 1, 1, 0, 0]);
        assert_eq!(levels_of("R WS L", BaseDirection::Auto), vec![1, 1, 2]);
    }

    #[test]
    fn auto_direction_is_detected_and_reported() {
        let classes = parse_classes("ON AL L").unwrap();
        let mut resolver = BidiResolver::new();
        resolver.process(&BidiInput::new(&classes));
        assert_eq!(resolver.resolved_paragraph_level(), 1);
        assert_eq!(resolver.paragraph_direction(), ParagraphDirection::Mixed);
    }

    #[test]
    fn empty_paragraph() {
        let mut resolver = BidiResolver::new();
        assert!(resolver.process(&BidiInput::new(&[])).is_empty());
        assert_eq!(resolver.resolved_paragraph_level(), 0);
        assert_eq!(resolver.paragraph_direction(), ParagraphDirection::Ltr);
    }

    #[test]
    fn embeddings_and_isolates_run_the_explicit_phase() {
        assert_eq!(
            levels_of("L RLE L PDF L", BaseDirection::Ltr),
            vec![0, 0, 2, 2, 0]
        );
        assert_eq!(levels_of("L RLI L PDI L", BaseDirection::Ltr), vec![0, 0, 2, 0, 0]);
    }

    #[test]
    fn control_free_paragraph_keeps_every_character() {
        let classes = parse_classes("L WS R EN ES EN ON AL NSM B S").unwrap();
        let mut resolver = BidiResolver::new();
        resolver.process(&BidiInput::new(&classes));
        let identity: Vec<usize> = (0..classes.len()).collect();
        assert_eq!(resolver.scratch.x9_map, identity);
        assert!(resolver.isolate_pairs().is_empty());

        let with_bn = parse_classes("L BN R").unwrap();
        resolver.process(&BidiInput::new(&with_bn));
        assert_eq!(resolver.scratch.x9_map, vec![0, 2]);
    }

    #[test]
    fn boundary_neutral_takes_the_previous_level() {
        assert_eq!(levels_of("R BN R", BaseDirection::Ltr), vec![1, 1, 1]);
    }

    #[test]
    fn process_into_rejects_wrong_length_without_touching_state() {
        let classes = parse_classes("R R").unwrap();
        let mut resolver = BidiResolver::new();
        resolver.process(&BidiInput::new(&classes));
        let before = resolver.resolved_levels().to_vec();

        let mut out = [7; 3];
        let err = resolver
            .process_into(&BidiInput::new(&classes), &mut out)
            .unwrap_err();
        assert_eq!(
            err,
            BidiError::OutputLengthMismatch {
                expected: 2,
                actual: 3
            }
        );
        assert_eq!(out, [7, 7, 7]);
        assert_eq!(resolver.resolved_levels(), &before[..]);
    }

    #[test]
    fn process_into_overwrites_caller_buffer() {
        let classes = parse_classes("L R WS").unwrap();
        let mut resolver = BidiResolver::new();
        let mut out = [9; 3];
        resolver
            .process_into(&BidiInput::new(&classes), &mut out)
            .unwrap();
        assert_eq!(out, [0, 1, 0]);
        assert_eq!(resolver.resolved_levels(), &out[..]);
    }

    #[test]
    fn process_into_reports_mixed_direction() {
        let classes = parse_classes("L R R L").unwrap();
        let mut resolver = BidiResolver::new();
        let mut out = [0; 4];
        resolver
            .process_into(&BidiInput::new(&classes), &mut out)
            .unwrap();
        assert_eq!(out, [0, 1, 1, 0]);
        assert_eq!(resolver.resolved_levels(), &[0, 1, 1, 0]);
        assert_eq!(resolver.paragraph_direction(), ParagraphDirection::Mixed);
    }

    #[test]
    fn resolver_is_reusable_across_lengths() {
        let mut resolver = BidiResolver::new();
        let long = parse_classes("L RLI R R R PDI L L").unwrap();
        let short = parse_classes("R").unwrap();
        assert_eq!(resolver.process(&BidiInput::new(&long)).len(), 8);
        assert_eq!(resolver.process(&BidiInput::new(&short)), &[1]);
        assert!(resolver.isolate_pairs().is_empty());
    }

    #[test]
    fn verify_ignores_wrong_hints() {
        let classes = parse_classes("R ON R ON").unwrap();
        let (types, values) = brackets_for(". ( . )");
        let input = BidiInput::new(&classes)
            .with_brackets(&types, &values)
            .with_paragraph_level(BaseDirection::Ltr);

        let mut resolver = BidiResolver::new();
        let honest = resolver.process(&input).to_vec();
        let lying = resolver
            .process(&input.with_hints(ContentHints::exact(false, true, true)))
            .to_vec();
        assert_eq!(honest, vec![1, 1, 1, 1]);
        assert_eq!(lying, honest);
    }

    #[test]
    fn trusted_bracket_hint_skips_pairing() {
        let classes = parse_classes("R ON R ON").unwrap();
        let (types, values) = brackets_for(". ( . )");
        let input = BidiInput::new(&classes)
            .with_brackets(&types, &values)
            .with_paragraph_level(BaseDirection::Ltr)
            .with_hints(ContentHints {
                has_brackets: Some(false),
                ..ContentHints::default()
            });

        let mut resolver = BidiResolver::with_options(ResolverOptions {
            hint_policy: HintPolicy::Trust,
            ..ResolverOptions::default()
        });
        assert_eq!(resolver.process(&input), &[1, 1, 1, 0]);
    }

    #[test]
    fn mismatched_bracket_data_is_ignored() {
        let classes = parse_classes("R ON R ON").unwrap();
        let (types, values) = brackets_for(". ( . )");
        let input = BidiInput::new(&classes)
            .with_brackets(&types[..3], &values[..3])
            .with_paragraph_level(BaseDirection::Ltr);
        assert_eq!(BidiResolver::new().process(&input), &[1, 1, 1, 0]);
    }

    #[test]
    fn options_follow_config() {
        let config = rune_config::BidiConfig {
            initial_capacity: 64,
            trust_hints: true,
        };
        let resolver = BidiResolver::from_config(&config);
        assert_eq!(
            resolver.options(),
            ResolverOptions {
                initial_capacity: 64,
                hint_policy: HintPolicy::Trust,
            }
        );
    }
}
