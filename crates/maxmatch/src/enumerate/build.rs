//! Implication digraph `D(G, M)`.
//!
//! Matched edges point left→right, unmatched edges right→left, so every
//! directed cycle alternates between matched and unmatched edges.

use crate::digraph::Digraph;
use crate::graph::{BipartiteGraph, Matching};

/// Build `D(G, M)`: one arc per edge of `g`.
///
/// Panics if `m` uses an edge missing from `g`.
pub fn build_digraph(g: &BipartiteGraph, m: &Matching) -> Digraph {
    assert_eq!(
        g.side_size(),
        m.side_size(),
        "graph and matching disagree on N"
    );
    for (v, w) in m.edges() {
        assert!(
            g.has_edge(v, w),
            "matched edge {v}-{w} is not in the working graph"
        );
    }
    let mut d = Digraph::new(g.vertex_count());
    for (v, w) in g.edges() {
        if m.contains(v, w) {
            d.add_arc(v, w);
        } else {
            d.add_arc(w, v);
        }
    }
    d
}
