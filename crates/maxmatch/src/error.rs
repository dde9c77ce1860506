//! Errors surfaced to callers (malformed input, ids outside the graph).
//!
//! Internal invariants of the enumeration (subgraph precondition of the
//! digraph builder, cardinality of flipped matchings) are not errors; they
//! panic.

use thiserror::Error;

use crate::graph::Vertex;

/// Errors produced while reading or assembling a bipartite graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The header announced a negative number of edges.
    #[error("number of edges must be nonnegative (got {0})")]
    NegativeEdgeCount(i64),
    /// A token could not be read as the expected integer.
    #[error("token {position} ({token:?}) is not a valid {expected}")]
    Parse {
        token: String,
        position: usize,
        expected: &'static str,
    },
    /// The input ended while more integers were expected.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },
    /// A vertex id is outside `[0, limit)` with `limit = 2N`.
    #[error("vertex {vertex} is outside [0, {limit})")]
    VertexOutOfRange { vertex: i64, limit: usize },
    /// Both endpoints lie on the same side of the bipartition.
    #[error("edge {v}-{w} joins two vertices on the same side (N = {side})")]
    SameSide { v: Vertex, w: Vertex, side: usize },
    /// A supplied matching uses an edge the graph does not contain.
    #[error("matched edge {v}-{w} is not an edge of the graph")]
    NotInGraph { v: Vertex, w: Vertex },
    /// A supplied matching was built for a different number of vertices.
    #[error("matching has {matching} vertices per side, graph has {graph}")]
    SideMismatch { graph: usize, matching: usize },
    /// A supplied edge set shares an endpoint and is not a matching.
    #[error("vertex {vertex} is matched more than once")]
    NotAMatching { vertex: Vertex },
}
