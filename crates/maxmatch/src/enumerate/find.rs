//! Locate the next branch point: an alternating cycle, else a length-2
//! alternative. Both scans go in ascending vertex id and take the first hit.

use crate::digraph::{Digraph, DirectedPaths};
use crate::graph::{BipartiteGraph, Matching};

use super::types::BranchPoint;

/// `None` means `m` is the only maximum matching of `g`.
pub fn find_branch(g: &BipartiteGraph, m: &Matching, d: &Digraph) -> Option<BranchPoint> {
    find_cycle(d).or_else(|| find_alternative(g, m, d))
}

/// Cycle through the lowest vertex of `d` that lies on any cycle.
pub fn find_cycle(d: &Digraph) -> Option<BranchPoint> {
    for s in 0..d.vertex_count() {
        // no out-arc, no cycle through s
        if d.adj(s).is_empty() {
            continue;
        }
        if let Some(path) = DirectedPaths::new(d, s).path_to(s) {
            let first_edge = (path[0], path[1]);
            return Some(BranchPoint::Cycle {
                start: s,
                first_edge,
                path,
            });
        }
    }
    None
}

/// First unmatched vertex with a matched neighbour.
///
/// Left vertices are scanned through `g`, then right vertices through `d`
/// (whose arcs out of an unmatched right vertex are exactly its edges).
pub fn find_alternative(g: &BipartiteGraph, m: &Matching, d: &Digraph) -> Option<BranchPoint> {
    let pair = m.pairs();
    let side = g.side_size();
    for v in (0..side).filter(|&v| pair[v].is_none()) {
        for w in g.adj(v) {
            if let Some(p) = pair[w] {
                return Some(BranchPoint::AugmentingAlt {
                    free: v,
                    pivot: w,
                    displaced: p,
                    added: (v, w),
                    removed: (p, w),
                });
            }
        }
    }
    for v in (side..2 * side).filter(|&v| pair[v].is_none()) {
        for &w in d.adj(v) {
            if let Some(p) = pair[w] {
                return Some(BranchPoint::AugmentingAlt {
                    free: v,
                    pivot: w,
                    displaced: p,
                    added: (w, v),
                    removed: (w, p),
                });
            }
        }
    }
    None
}
