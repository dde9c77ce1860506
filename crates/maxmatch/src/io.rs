//! Plain-text graph format.
//!
//! Whitespace-separated integers: `N`, then `E`, then `E` pairs `v w` with one
//! endpoint in `[0, N)` and the other in `[N, 2N)`. Tokens after the last pair
//! are ignored.

use std::fmt::Write as _;
use std::str::SplitWhitespace;

use crate::error::MatchError;
use crate::graph::{BipartiteGraph, Vertex};

/// Largest accepted `N`; guards the `2N` adjacency allocation.
pub const MAX_SIDE: usize = 1 << 24;

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            position: 0,
        }
    }

    fn next_int(&mut self, expected: &'static str) -> Result<i64, MatchError> {
        let token = self
            .inner
            .next()
            .ok_or(MatchError::UnexpectedEof { expected })?;
        self.position += 1;
        token.parse().map_err(|_| MatchError::Parse {
            token: token.to_string(),
            position: self.position,
            expected,
        })
    }

    fn vertex(&mut self, limit: usize) -> Result<Vertex, MatchError> {
        let x = self.next_int("vertex id")?;
        usize::try_from(x)
            .ok()
            .filter(|&v| v < limit)
            .ok_or(MatchError::VertexOutOfRange { vertex: x, limit })
    }
}

/// Parse a graph; fails fast on the first malformed token.
pub fn parse_graph(text: &str) -> Result<BipartiteGraph, MatchError> {
    let mut toks = Tokens::new(text);
    let n = toks.next_int("vertex count N")?;
    let side = usize::try_from(n)
        .ok()
        .filter(|&side| side <= MAX_SIDE)
        .ok_or_else(|| MatchError::Parse {
            token: n.to_string(),
            position: toks.position,
            expected: "vertex count N in [0, 2^24]",
        })?;
    let e = toks.next_int("edge count E")?;
    if e < 0 {
        return Err(MatchError::NegativeEdgeCount(e));
    }
    let mut g = BipartiteGraph::new(side);
    for _ in 0..e {
        let v = toks.vertex(2 * side)?;
        let w = toks.vertex(2 * side)?;
        g.add_edge(v, w)?;
    }
    Ok(g)
}

/// Serialize `g` in the format accepted by [`parse_graph`].
pub fn write_graph(g: &BipartiteGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", g.side_size());
    let _ = writeln!(out, "{}", g.edge_count());
    for (v, w) in g.edges() {
        let _ = writeln!(out, "{v} {w}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_square() {
        let g = parse_graph("2\n4\n0 2\n0 3\n1 2\n1 3\n").unwrap();
        assert_eq!(g.side_size(), 2);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(write_graph(&g), "2\n4\n0 2\n0 3\n1 2\n1 3\n");
    }

    #[test]
    fn accepts_right_first_pairs_and_duplicates() {
        let g = parse_graph("2 3  2 0  0 2  3 1").unwrap();
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn empty_graph() {
        let g = parse_graph("2 0").unwrap();
        assert!(g.is_empty());
        assert_eq!(g.vertex_count(), 4);
    }

    #[test]
    fn negative_edge_count_fails_fast() {
        assert_eq!(
            parse_graph("2 -1 0 2"),
            Err(MatchError::NegativeEdgeCount(-1))
        );
    }

    #[test]
    fn rejects_out_of_range_and_same_side() {
        assert_eq!(
            parse_graph("2 1 0 4"),
            Err(MatchError::VertexOutOfRange {
                vertex: 4,
                limit: 4
            })
        );
        assert_eq!(
            parse_graph("2 1 -1 2"),
            Err(MatchError::VertexOutOfRange {
                vertex: -1,
                limit: 4
            })
        );
        assert_eq!(
            parse_graph("2 1 2 3"),
            Err(MatchError::SameSide { v: 2, w: 3, side: 2 })
        );
    }

    #[test]
    fn reports_bad_tokens() {
        assert_eq!(
            parse_graph("2 1 0 x"),
            Err(MatchError::Parse {
                token: "x".into(),
                position: 4,
                expected: "vertex id"
            })
        );
        assert_eq!(
            parse_graph("2 2 0 2"),
            Err(MatchError::UnexpectedEof {
                expected: "vertex id"
            })
        );
        assert!(matches!(parse_graph("-3 0"), Err(MatchError::Parse { .. })));
        assert_eq!(
            parse_graph(""),
            Err(MatchError::UnexpectedEof {
                expected: "vertex count N"
            })
        );
    }
}
