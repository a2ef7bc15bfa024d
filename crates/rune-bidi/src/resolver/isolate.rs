//! Isolate initiator / PDI matching (BD9).

use hashbrown::HashMap;

use crate::class::DirectionalClass;

/// What the BD9 scan saw while walking the paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ControlScan {
    /// Any isolate initiator or PDI, matched or not.
    pub isolates: bool,
    /// Any character X9 removes: embedding, override, PDF or BN.
    pub embeddings: bool,
}

/// Two-way map between matched isolate initiators and their PDIs.
#[derive(Debug, Default)]
pub struct IsolatePairs {
    /// Initiator index -> PDI index.
    forward: HashMap<usize, usize>,
    /// PDI index -> initiator index.
    reverse: HashMap<usize, usize>,
    pending: Vec<usize>,
}

impl IsolatePairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
        self.pending.clear();
    }

    /// Rebuild the pairs for `classes`, also reporting which kinds of
    /// explicit formatting characters occur.
    ///
    /// A PDI with no open initiator and an initiator never closed both stay
    /// unpaired.
    pub(crate) fn find(&mut self, classes: &[DirectionalClass]) -> ControlScan {
        self.clear();
        let mut scan = ControlScan::default();

        for (i, &class) in classes.iter().enumerate() {
            match class {
                DirectionalClass::LeftToRightIsolate
                | DirectionalClass::RightToLeftIsolate
                | DirectionalClass::FirstStrongIsolate => {
                    self.pending.push(i);
                    scan.isolates = true;
                }
                DirectionalClass::PopDirectionalIsolate => {
                    if let Some(opening) = self.pending.pop() {
                        self.forward.insert(opening, i);
                        self.reverse.insert(i, opening);
                    }
                    scan.isolates = true;
                }
                // Isolates never span a paragraph separator.
                DirectionalClass::ParagraphSeparator => self.pending.clear(),
                c if c.is_removed_by_x9() => scan.embeddings = true,
                _ => {}
            }
        }

        scan
    }

    /// Matching PDI of the initiator at `opening`.
    pub fn closing(&self, opening: usize) -> Option<usize> {
        self.forward.get(&opening).copied()
    }

    /// Matching initiator of the PDI at `closing`.
    pub fn opening(&self, closing: usize) -> Option<usize> {
        self.reverse.get(&closing).copied()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// `(initiator, pdi)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.forward.iter().map(|(&open, &close)| (open, close))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::parse_classes;

    fn pairs_for(names: &str) -> (IsolatePairs, ControlScan) {
        let classes = parse_classes(names).unwrap();
        let mut pairs = IsolatePairs::new();
        let scan = pairs.find(&classes);
        (pairs, scan)
    }

    #[test]
    fn pairs_nested_isolates() {
        let (pairs, scan) = pairs_for("LRI L RLI R PDI PDI");
        assert!(scan.isolates);
        assert!(!scan.embeddings);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.closing(0), Some(5));
        assert_eq!(pairs.closing(2), Some(4));
        assert_eq!(pairs.opening(5), Some(0));
        assert_eq!(pairs.opening(4), Some(2));
    }

    #[test]
    fn any_initiator_matches_any_pdi() {
        let (pairs, _) = pairs_for("FSI R PDI RLI L PDI");
        assert_eq!(pairs.closing(0), Some(2));
        assert_eq!(pairs.closing(3), Some(5));
    }

    #[test]
    fn unmatched_pdi_is_ignored() {
        let (pairs, scan) = pairs_for("PDI L LRI L PDI PDI");
        assert!(scan.isolates);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs.closing(2), Some(4));
        assert_eq!(pairs.opening(0), None);
        assert_eq!(pairs.opening(5), None);
    }

    #[test]
    fn unmatched_initiator_at_end_stays_open() {
        let (pairs, _) = pairs_for("L RLI R R");
        assert!(pairs.is_empty());
        assert_eq!(pairs.closing(1), None);
    }

    #[test]
    fn reports_embeddings_without_isolates() {
        let (pairs, scan) = pairs_for("RLE L PDF");
        assert!(pairs.is_empty());
        assert_eq!(
            scan,
            ControlScan {
                isolates: false,
                embeddings: true
            }
        );
    }

    #[test]
    fn paragraph_separator_drops_open_initiators() {
        let (pairs, _) = pairs_for("RLI R B PDI");
        assert!(pairs.is_empty());
        let (pairs, _) = pairs_for("LRI B LRI PDI");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs.closing(2), Some(3));
    }

    #[test]
    fn boundary_neutrals_count_as_removable() {
        let (_, scan) = pairs_for("L BN R");
        assert!(scan.embeddings);
        assert!(!scan.isolates);
    }

    #[test]
    fn every_pair_opens_before_it_closes() {
        let (pairs, _) = pairs_for("LRI RLI FSI PDI PDI LRI PDI PDI PDI");
        assert_eq!(pairs.len(), 4);
        for (open, close) in pairs.iter() {
            assert!(open < close);
        }
    }

    #[test]
    fn clearing_forgets_previous_paragraph() {
        let classes = parse_classes("LRI PDI").unwrap();
        let mut pairs = IsolatePairs::new();
        pairs.find(&classes);
        assert_eq!(pairs.len(), 1);
        let scan = pairs.find(&parse_classes("L R").unwrap());
        assert!(pairs.is_empty());
        assert!(!scan.isolates);
    }
}
