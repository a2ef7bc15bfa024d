//! X9 removal map, level runs (BD7) and isolating run sequences (X10).

use crate::class::DirectionalClass;
use crate::level::{Level, direction_from_level};

use super::isolate::IsolatePairs;

/// Fill `map` with the positions that survive rule X9, in order.
///
/// When the paragraph has no explicit formatting characters nothing is
/// removed and the map is the identity.
pub(crate) fn build_x9_map(original: &[DirectionalClass], identity: bool, map: &mut Vec<usize>) {
    map.clear();
    if identity {
        map.extend(0..original.len());
    } else {
        map.extend(
            original
                .iter()
                .enumerate()
                .filter(|(_, class)| !class.is_removed_by_x9())
                .map(|(i, _)| i),
        );
    }
}

/// Maximal run of one level in X9-compacted positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LevelRun {
    /// First compacted position.
    pub start: usize,
    pub len: usize,
    pub level: Level,
    pub sos: DirectionalClass,
    pub eos: DirectionalClass,
}

/// Paragraph state the run discovery reads.
pub(crate) struct RunContext<'a> {
    pub original: &'a [DirectionalClass],
    pub levels: &'a [Level],
    pub x9_map: &'a [usize],
    pub paragraph_level: Level,
}

impl RunContext<'_> {
    /// Split the compacted text into level runs, resolving each run's sos
    /// and eos from its neighbours.
    pub(crate) fn find_level_runs(&self, runs: &mut Vec<LevelRun>) {
        runs.clear();

        let mut run_start = 0;
        let mut current: Option<Level> = None;
        for (i, &index) in self.x9_map.iter().enumerate() {
            let level = self.levels[index];
            if current == Some(level) {
                continue;
            }
            if let Some(run_level) = current {
                runs.push(self.level_run(run_start, i - run_start, run_level));
            }
            current = Some(level);
            run_start = i;
        }

        if let Some(run_level) = current {
            runs.push(self.level_run(run_start, self.x9_map.len() - run_start, run_level));
        }
    }

    fn level_run(&self, start: usize, len: usize, level: Level) -> LevelRun {
        let first = self.x9_map[start];
        let last = self.x9_map[start + len - 1];

        let previous = self.original[..first]
            .iter()
            .rposition(|class| !class.is_removed_by_x9())
            .map_or(self.paragraph_level, |i| self.levels[i]);

        // A run ending in an isolate initiator continues after the matching
        // PDI, or the isolate runs to the end of the paragraph.
        let next = if self.original[last].is_isolate_initiator() {
            self.paragraph_level
        } else {
            self.original[last + 1..]
                .iter()
                .position(|class| !class.is_removed_by_x9())
                .map_or(self.paragraph_level, |offset| self.levels[last + 1 + offset])
        };

        LevelRun {
            start,
            len,
            level,
            sos: direction_from_level(previous.max(level)),
            eos: direction_from_level(next.max(level)),
        }
    }
}

/// Level and boundary directions of one isolating run sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SequenceBounds {
    pub level: Level,
    pub sos: DirectionalClass,
    pub eos: DirectionalClass,
}

/// Walks level runs and chains them into isolating run sequences.
///
/// Sequences are produced in order of their first run; a run whose last
/// character is an isolate initiator continues with the run that starts at
/// the matching PDI.
pub(crate) struct SequenceJoiner<'a> {
    pub original: &'a [DirectionalClass],
    pub x9_map: &'a [usize],
    pub runs: &'a [LevelRun],
    pub isolates: &'a IsolatePairs,
}

impl SequenceJoiner<'_> {
    /// Gather the sequence starting at run `first` into `indices`, marking
    /// each joined run in `consumed`.
    pub(crate) fn join(
        &self,
        first: usize,
        consumed: &mut [bool],
        indices: &mut Vec<usize>,
    ) -> SequenceBounds {
        indices.clear();

        let head = self.runs[first];
        let mut run_index = first;
        let mut eos;
        loop {
            let run = self.runs[run_index];
            consumed[run_index] = true;
            eos = run.eos;
            indices.extend_from_slice(&self.x9_map[run.start..run.start + run.len]);

            let last = *indices.last().expect("level runs are never empty");
            let continuation = if self.original[last].is_isolate_initiator() {
                self.isolates.closing(last)
            } else {
                None
            };
            match continuation {
                Some(pdi) => run_index = self.run_starting_at(pdi),
                None => break,
            }
        }

        SequenceBounds {
            level: head.level,
            sos: head.sos,
            eos,
        }
    }

    /// Index of the level run whose first character is `position`.
    fn run_starting_at(&self, position: usize) -> usize {
        self.runs
            .binary_search_by_key(&position, |run| self.x9_map[run.start])
            .expect("matching PDI starts a level run")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::parse_classes;
    use DirectionalClass::{LeftToRight as L, RightToLeft as R};

    #[test]
    fn identity_map_when_nothing_is_removed() {
        let classes = parse_classes("L RLE R PDF").unwrap();
        let mut map = Vec::new();
        build_x9_map(&classes, true, &mut map);
        assert_eq!(map, vec![0, 1, 2, 3]);
    }

    #[test]
    fn x9_map_skips_removed_classes() {
        let classes = parse_classes("L RLE R BN PDF LRI PDI").unwrap();
        let mut map = Vec::new();
        build_x9_map(&classes, false, &mut map);
        assert_eq!(map, vec![0, 2, 5, 6]);
    }

    fn runs_for(classes: &str, levels: &[Level], paragraph_level: Level) -> Vec<LevelRun> {
        let original = parse_classes(classes).unwrap();
        let mut map = Vec::new();
        build_x9_map(&original, false, &mut map);
        let ctx = RunContext {
            original: &original,
            levels,
            x9_map: &map,
            paragraph_level,
        };
        let mut runs = Vec::new();
        ctx.find_level_runs(&mut runs);
        runs
    }

    #[test]
    fn runs_split_on_level_changes() {
        let runs = runs_for("L R R L", &[0, 1, 1, 0], 0);
        assert_eq!(runs.len(), 3);
        assert_eq!((runs[1].start, runs[1].len, runs[1].level), (1, 2, 1));
        assert_eq!((runs[1].sos, runs[1].eos), (R, R));
        assert_eq!((runs[0].sos, runs[0].eos), (L, R));
        assert_eq!((runs[2].sos, runs[2].eos), (R, L));
    }

    #[test]
    fn removed_characters_do_not_split_runs() {
        let runs = runs_for("L RLE PDF L", &[0, 1, 1, 0], 0);
        assert_eq!(runs.len(), 1);
        assert_eq!((runs[0].start, runs[0].len), (0, 2));
    }

    #[test]
    fn boundary_uses_paragraph_level() {
        let runs = runs_for("R R", &[1, 1], 0);
        assert_eq!((runs[0].sos, runs[0].eos), (R, R));
    }

    #[test]
    fn run_ending_in_isolate_initiator_uses_paragraph_level_for_eos() {
        let runs = runs_for("R LRI L PDI", &[1, 1, 2, 1], 1);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].eos, R);
        assert_eq!(runs[1].sos, L);
    }

    #[test]
    fn joins_runs_across_matched_isolates() {
        let original = parse_classes("L RLI R PDI L").unwrap();
        let levels = [0, 0, 1, 0, 0];
        let mut map = Vec::new();
        build_x9_map(&original, false, &mut map);
        let ctx = RunContext {
            original: &original,
            levels: &levels,
            x9_map: &map,
            paragraph_level: 0,
        };
        let mut runs = Vec::new();
        ctx.find_level_runs(&mut runs);
        assert_eq!(runs.len(), 3);

        let mut pairs = IsolatePairs::new();
        pairs.find(&original);
        let joiner = SequenceJoiner {
            original: &original,
            x9_map: &map,
            runs: &runs,
            isolates: &pairs,
        };
        let mut consumed = vec![false; runs.len()];
        let mut indices = Vec::new();

        let bounds = joiner.join(0, &mut consumed, &mut indices);
        assert_eq!(indices, vec![0, 1, 3, 4]);
        assert_eq!(consumed, vec![true, false, true]);
        assert_eq!((bounds.level, bounds.sos, bounds.eos), (0, L, L));

        let bounds = joiner.join(1, &mut consumed, &mut indices);
        assert_eq!(indices, vec![2]);
        assert_eq!((bounds.level, bounds.sos, bounds.eos), (1, R, R));
    }
}
