//! Data types for the enumeration: branch points, per-branch state, budgets,
//! and the output channel.

use std::ops::ControlFlow;
use std::time::Duration;

use crate::digraph::Digraph;
use crate::graph::{BipartiteGraph, Edge, Matching, Vertex};

/// Where a branch splits the search space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchPoint {
    /// Alternating cycle through `start`, stored as `[start, x1, ..., start]`.
    /// `first_edge = (start, x1)` is matched in the current matching.
    Cycle {
        start: Vertex,
        first_edge: Edge,
        path: Vec<Vertex>,
    },
    /// Length-2 alternative `free – pivot – displaced`: `free` is unmatched,
    /// `pivot` is matched to `displaced`. `added` replaces `removed`.
    AugmentingAlt {
        free: Vertex,
        pivot: Vertex,
        displaced: Vertex,
        added: Edge,
        removed: Edge,
    },
}

impl BranchPoint {
    /// Edge forced in one child and forbidden in the other.
    pub fn split_edge(&self) -> Edge {
        match self {
            BranchPoint::Cycle { first_edge, .. } => *first_edge,
            BranchPoint::AugmentingAlt { added, .. } => *added,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BranchPoint::Cycle { .. } => "cycle",
            BranchPoint::AugmentingAlt { .. } => "alternative",
        }
    }
}

/// Independently owned state of one search node: `(G, M, D)`.
#[derive(Clone, Debug)]
pub struct Branch {
    pub graph: BipartiteGraph,
    pub matching: Matching,
    pub digraph: Digraph,
    /// Distance from the root; bounded by the root's edge count.
    pub depth: usize,
}

/// Optional limits on a run. The default is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnumCfg {
    /// Stop before emitting more than this many matchings.
    pub max_results: Option<usize>,
    /// Stop once this much wall-clock time has passed.
    pub time_budget: Option<Duration>,
}

/// Counters collected while walking the search tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnumStats {
    pub nodes: usize,
    pub cycle_branches: usize,
    pub alt_branches: usize,
    pub exhausted: usize,
    pub max_depth: usize,
}

/// Summary of a finished (or cut short) run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumReport {
    /// `k`, the size of every emitted matching.
    pub cardinality: usize,
    pub emitted: usize,
    /// False when a budget or the sink stopped the run early.
    pub complete: bool,
    pub stats: EnumStats,
}

/// Receives every matching the engine discovers, in discovery order.
pub trait MatchingSink {
    /// Return `ControlFlow::Break(())` to stop the enumeration.
    fn emit(&mut self, m: &Matching) -> ControlFlow<()>;
}

impl<F> MatchingSink for F
where
    F: FnMut(&Matching) -> ControlFlow<()>,
{
    fn emit(&mut self, m: &Matching) -> ControlFlow<()> {
        self(m)
    }
}

/// Append-only, insertion-ordered collection of matchings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<Matching>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, m: Matching) {
        self.entries.push(m);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Matching> {
        self.entries.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Matching> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Matching] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Matching> {
        self.entries
    }
}

impl MatchingSink for ResultSet {
    fn emit(&mut self, m: &Matching) -> ControlFlow<()> {
        self.push(m.clone());
        ControlFlow::Continue(())
    }
}

impl IntoIterator for ResultSet {
    type Item = Matching;
    type IntoIter = std::vec::IntoIter<Matching>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Matching;
    type IntoIter = std::slice::Iter<'a, Matching>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
