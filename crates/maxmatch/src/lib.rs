//! Enumeration of all maximum matchings of a bipartite graph.
//!
//! Layout
//! - `graph`: bipartite edge sets and matchings (left `0..N`, right `N..2N`).
//! - `flow`: max-flow oracle producing the initial maximum matching.
//! - `digraph`: directed graphs, DFS reachability, SCC diagnostics.
//! - `enumerate`: the engine (implication digraph, branch finder, flip/split,
//!   driver with budgets and sinks).
//! - `io`: the whitespace-separated integer input format.
//! - `random`: reproducible random bipartite graphs.
//!
//! Quick start
//! ```
//! use maxmatch::{enumerate_maximum_matchings, BipartiteGraph};
//!
//! let g = BipartiteGraph::from_edges(2, [(0, 2), (0, 3), (1, 2), (1, 3)]).unwrap();
//! let all = enumerate_maximum_matchings(&g);
//! assert_eq!(all.len(), 2);
//! ```

pub mod digraph;
pub mod enumerate;
pub mod error;
pub mod flow;
pub mod graph;
pub mod io;
pub mod random;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use enumerate::{
    enumerate, enumerate_from, enumerate_maximum_matchings, EnumCfg, EnumReport, EnumStats,
    MatchingSink, ResultSet,
};
pub use error::MatchError;
pub use graph::{BipartiteGraph, Edge, Matching, Vertex};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::digraph::{Digraph, DirectedPaths, Scc};
    pub use crate::enumerate::{
        build_digraph, enumerate, enumerate_from, enumerate_maximum_matchings, EnumCfg,
        EnumReport, EnumStats, MatchingSink, ResultSet,
    };
    pub use crate::flow::initial_matching;
    pub use crate::graph::{BipartiteGraph, Edge, Matching, Vertex};
    pub use crate::io::{parse_graph, write_graph};
    pub use crate::random::{complete_bipartite, draw_bipartite, RandomGraphCfg, ReplayToken};
    pub use crate::MatchError;
}
