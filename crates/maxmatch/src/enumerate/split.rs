//! Flip a branch point into a sibling matching and split the remaining search
//! space on one edge: a child where the edge is forced and a child where it is
//! forbidden. Each child owns fresh copies of `(G, M, D)`.

use crate::graph::{BipartiteGraph, Edge, Matching, Vertex};

use super::build::build_digraph;
use super::types::{Branch, BranchPoint};

/// Output of one split.
#[derive(Clone, Debug)]
pub struct Split {
    /// The newly discovered matching.
    pub emitted: Matching,
    /// Child whose graph keeps only the split edge at its endpoints.
    pub forced: Branch,
    /// Child whose graph lacks the split edge.
    pub forbidden: Branch,
}

/// `G⁺`: drop every other edge at either endpoint of `(v, w)`.
pub fn forced_graph(g: &BipartiteGraph, (v, w): Edge) -> BipartiteGraph {
    let mut out = g.clone();
    for x in g.adj(v).filter(|&x| x != w) {
        out.remove_edge(v, x);
    }
    for x in g.rev_adj(w).filter(|&x| x != v) {
        out.remove_edge(x, w);
    }
    out
}

/// `G⁻`: drop the edge `(v, w)` only.
pub fn forbidden_graph(g: &BipartiteGraph, (v, w): Edge) -> BipartiteGraph {
    let mut out = g.clone();
    out.remove_edge(v, w);
    out
}

/// Swap matched and unmatched edges along the cycle `[s, x1, ..., s]`.
pub fn flip_cycle(m: &Matching, path: &[Vertex]) -> Matching {
    let mut removed = Vec::with_capacity(path.len() / 2);
    let mut added = Vec::with_capacity(path.len() / 2);
    let mut flip = false;
    for arc in path.windows(2) {
        let (a, b) = (arc[0], arc[1]);
        if flip {
            // unmatched arc right -> left
            added.push((b, a));
        } else {
            removed.push((a, b));
        }
        flip = !flip;
    }
    m.exchange(&removed, &added)
}

/// Apply `point` to `branch`.
///
/// Cycle: the forced child keeps `M` (its digraph is built from `M` minus the
/// forced edge), the forbidden child continues from the flipped `M'`.
/// Alternative: the forced child continues from `M'`, the forbidden one from `M`.
pub fn split(branch: Branch, point: &BranchPoint) -> Split {
    let Branch {
        graph,
        matching,
        depth,
        ..
    } = branch;
    let k = matching.len();
    let e = point.split_edge();
    let g_plus = forced_graph(&graph, e);
    let g_minus = forbidden_graph(&graph, e);
    let (forced_m, forced_d, forbidden_m, emitted) = match point {
        BranchPoint::Cycle { path, .. } => {
            let flipped = flip_cycle(&matching, path);
            let d_plus = build_digraph(&g_plus, &matching.without(e));
            (matching, d_plus, flipped.clone(), flipped)
        }
        BranchPoint::AugmentingAlt { added, removed, .. } => {
            let swapped = matching.exchange(&[*removed], &[*added]);
            let d_plus = build_digraph(&g_plus, &swapped);
            (swapped.clone(), d_plus, matching, swapped)
        }
    };
    assert_eq!(emitted.len(), k, "flip changed the matching size");
    let d_minus = build_digraph(&g_minus, &forbidden_m);
    Split {
        emitted,
        forced: Branch {
            graph: g_plus,
            matching: forced_m,
            digraph: forced_d,
            depth: depth + 1,
        },
        forbidden: Branch {
            graph: g_minus,
            matching: forbidden_m,
            digraph: d_minus,
            depth: depth + 1,
        },
    }
}
