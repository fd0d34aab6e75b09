use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::command::Sequence;
use crate::error::SequenceError;
use crate::graph::DepGraph;

/// All of a panel's named sequences, in registration order until sorted.
///
/// After a successful [`SequenceSet::sort`], sequences are in dependency
/// order: anything a sequence references comes strictly before it. Sorting
/// is all-or-nothing: on any failure the set is left exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct SequenceSet {
    seqs: Vec<Sequence>,
    index: FxHashMap<String, usize>,
    sorted: bool,
}

impl SequenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence. Names are unique. Invalidates any prior sort.
    pub fn add(&mut self, seq: Sequence) -> Result<(), SequenceError> {
        if self.index.contains_key(seq.name()) {
            return Err(SequenceError::DuplicateName {
                name: seq.name().to_string(),
            });
        }
        self.index.insert(seq.name().to_string(), self.seqs.len());
        self.seqs.push(seq);
        self.sorted = false;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Sequence> {
        self.index.get(name).map(|&i| &self.seqs[i])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    /// Whether the set is currently in a validated dependency order.
    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Sequences in current (registration or sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.seqs.iter()
    }

    /// Names in current order.
    pub fn names(&self) -> Vec<&str> {
        self.seqs.iter().map(Sequence::name).collect()
    }

    /// Validate every sequence and reorder the set into dependency order.
    ///
    /// Referenced sequences end up strictly before their referrers; ties
    /// keep registration order, and sorting an already-sorted set changes
    /// nothing. On any failure (an invalid sequence, a dangling
    /// reference, a cycle) the set is left in its prior order.
    pub fn sort(&mut self) -> Result<(), SequenceError> {
        for seq in &self.seqs {
            if !seq.is_valid() {
                warn!(name = seq.name(), "rejecting invalid sequence");
                return Err(SequenceError::InvalidSequence {
                    name: seq.name().to_string(),
                });
            }
        }

        let mut graph = DepGraph::new(self.seqs.len());
        for (i, seq) in self.seqs.iter().enumerate() {
            for reference in seq.references() {
                let &target = self.index.get(reference).ok_or_else(|| {
                    SequenceError::NotFound {
                        name: reference.to_string(),
                    }
                })?;
                graph.add_edge(i, target)?;
            }
        }

        let order = graph
            .topo_sort()
            .map_err(|node| SequenceError::CycleDetected {
                name: self.seqs[node].name().to_string(),
            })?;

        // Commit only now; every failure path above leaves the set as-is.
        let mut reordered = Vec::with_capacity(self.seqs.len());
        for &i in &order {
            reordered.push(self.seqs[i].clone());
        }
        self.seqs = reordered;
        self.index = self
            .seqs
            .iter()
            .enumerate()
            .map(|(i, seq)| (seq.name().to_string(), i))
            .collect();
        self.sorted = true;
        debug!(sequences = self.seqs.len(), "sequence set sorted");
        Ok(())
    }
}
