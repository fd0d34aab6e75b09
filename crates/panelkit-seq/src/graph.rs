//! Dependency graph over sequence indices.
//!
//! A small, index-addressed digraph with the two operations sorting needs:
//! DFS-postorder topological sort and cycle detection. Nodes move through
//! `Unvisited -> InProgress -> Visited`; meeting an `InProgress` node again
//! is a back edge, i.e. a cycle.

use crate::error::SequenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Visited,
}

/// Directed graph: edge `a -> b` means "a depends on b".
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    edges: Vec<Vec<usize>>,
}

impl DepGraph {
    pub fn new(nodes: usize) -> Self {
        Self {
            edges: vec![Vec::new(); nodes],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Add an edge. Both endpoints must be in range.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<(), SequenceError> {
        let nodes = self.edges.len();
        if from >= nodes || to >= nodes {
            return Err(SequenceError::InvalidArgument {
                reason: format!("edge {from} -> {to} outside graph of {nodes} nodes"),
            });
        }
        self.edges[from].push(to);
        Ok(())
    }

    /// Topological order with dependencies first.
    ///
    /// DFS postorder from every node in index order; per-node edges follow
    /// insertion order, so ties are stable with respect to the input. On a
    /// cycle, returns a node on it.
    pub fn topo_sort(&self) -> Result<Vec<usize>, usize> {
        let mut marks = vec![Mark::Unvisited; self.edges.len()];
        let mut order = Vec::with_capacity(self.edges.len());
        for node in 0..self.edges.len() {
            if marks[node] == Mark::Unvisited {
                self.visit(node, &mut marks, &mut order)?;
            }
        }
        Ok(order)
    }

    /// Whether any cycle exists, covering disconnected components.
    /// Returns a node on the first cycle found.
    pub fn find_cycle(&self) -> Option<usize> {
        self.topo_sort().err()
    }

    #[inline]
    pub fn is_cyclic(&self) -> bool {
        self.find_cycle().is_some()
    }

    fn visit(
        &self,
        node: usize,
        marks: &mut [Mark],
        order: &mut Vec<usize>,
    ) -> Result<(), usize> {
        marks[node] = Mark::InProgress;
        for &next in &self.edges[node] {
            match marks[next] {
                Mark::Unvisited => self.visit(next, marks, order)?,
                Mark::InProgress => return Err(next),
                Mark::Visited => {}
            }
        }
        marks[node] = Mark::Visited;
        order.push(node);
        Ok(())
    }
}
