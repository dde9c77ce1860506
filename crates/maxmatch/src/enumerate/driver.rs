//! Enumeration driver: depth-first walk over branch points.
//!
//! Each node handles at most one branch point and emits exactly one new
//! matching when it does. Children go on an explicit stack (forced child on
//! top), which reproduces the pre-order of the recursive formulation without
//! tying depth to the call stack.

use std::ops::ControlFlow;
use std::time::Instant;

use tracing::{debug, trace};

use crate::error::MatchError;
use crate::flow::initial_matching;
use crate::graph::{BipartiteGraph, Matching};

use super::build::build_digraph;
use super::find::find_branch;
use super::split::split;
use super::types::{
    Branch, BranchPoint, EnumCfg, EnumReport, EnumStats, MatchingSink, ResultSet,
};

/// Every maximum matching of `g`, in discovery order.
pub fn enumerate_maximum_matchings(g: &BipartiteGraph) -> ResultSet {
    let mut out = ResultSet::new();
    enumerate(g, EnumCfg::default(), &mut out);
    out
}

/// Compute an initial maximum matching by max flow, then stream every maximum
/// matching of `g` into `sink`.
pub fn enumerate<S: MatchingSink>(g: &BipartiteGraph, cfg: EnumCfg, sink: &mut S) -> EnumReport {
    let m = initial_matching(g);
    Driver::new(cfg, sink, m.len()).run(root(g.clone(), m))
}

/// Like [`enumerate`], starting from a caller-supplied matching.
///
/// `m` must be a maximum matching of `g`; with a smaller one only matchings of
/// size `|m|` reachable by the same exchanges are produced.
pub fn enumerate_from<S: MatchingSink>(
    g: &BipartiteGraph,
    m: Matching,
    cfg: EnumCfg,
    sink: &mut S,
) -> Result<EnumReport, MatchError> {
    if m.side_size() != g.side_size() {
        return Err(MatchError::SideMismatch {
            graph: g.side_size(),
            matching: m.side_size(),
        });
    }
    if let Some((v, w)) = m.edges().find(|&(v, w)| !g.has_edge(v, w)) {
        return Err(MatchError::NotInGraph { v, w });
    }
    Ok(Driver::new(cfg, sink, m.len()).run(root(g.clone(), m)))
}

fn root(graph: BipartiteGraph, matching: Matching) -> Branch {
    let digraph = build_digraph(&graph, &matching);
    Branch {
        graph,
        matching,
        digraph,
        depth: 0,
    }
}

struct Driver<'s, S> {
    cfg: EnumCfg,
    sink: &'s mut S,
    started: Instant,
    cardinality: usize,
    emitted: usize,
    stats: EnumStats,
}

impl<'s, S: MatchingSink> Driver<'s, S> {
    fn new(cfg: EnumCfg, sink: &'s mut S, cardinality: usize) -> Self {
        Self {
            cfg,
            sink,
            started: Instant::now(),
            cardinality,
            emitted: 0,
            stats: EnumStats::default(),
        }
    }

    fn run(mut self, root: Branch) -> EnumReport {
        if self.emit(&root.matching).is_break() {
            return self.finish(false);
        }
        let mut stack = vec![root];
        while let Some(branch) = stack.pop() {
            if self.out_of_time() {
                return self.finish(false);
            }
            self.stats.nodes += 1;
            self.stats.max_depth = self.stats.max_depth.max(branch.depth);
            if branch.graph.is_empty() {
                self.stats.exhausted += 1;
                continue;
            }
            let Some(point) = find_branch(&branch.graph, &branch.matching, &branch.digraph)
            else {
                self.stats.exhausted += 1;
                continue;
            };
            match point {
                BranchPoint::Cycle { .. } => self.stats.cycle_branches += 1,
                BranchPoint::AugmentingAlt { .. } => self.stats.alt_branches += 1,
            }
            debug!(
                kind = point.kind(),
                edge = ?point.split_edge(),
                depth = branch.depth,
                "branch point"
            );
            let children = split(branch, &point);
            if self.emit(&children.emitted).is_break() {
                return self.finish(false);
            }
            stack.push(children.forbidden);
            stack.push(children.forced);
        }
        self.finish(true)
    }

    fn emit(&mut self, m: &Matching) -> ControlFlow<()> {
        if self
            .cfg
            .max_results
            .is_some_and(|max| self.emitted >= max)
        {
            return ControlFlow::Break(());
        }
        debug_assert_eq!(m.len(), self.cardinality);
        self.emitted += 1;
        trace!(index = self.emitted, matching = %m, "emit");
        self.sink.emit(m)
    }

    fn out_of_time(&self) -> bool {
        self.cfg
            .time_budget
            .is_some_and(|budget| self.started.elapsed() >= budget)
    }

    fn finish(self, complete: bool) -> EnumReport {
        let report = EnumReport {
            cardinality: self.cardinality,
            emitted: self.emitted,
            complete,
            stats: self.stats,
        };
        debug!(
            cardinality = report.cardinality,
            emitted = report.emitted,
            complete,
            nodes = report.stats.nodes,
            max_depth = report.stats.max_depth,
            "enumeration finished"
        );
        report
    }
}
