//! Enumeration of all maximum matchings of a bipartite graph.
//!
//! Purpose
//! - Starting from one maximum matching `M` of `G`, produce every other maximum
//!   matching exactly once.
//!
//! Method
//! - Orient `G` by `M` into the implication digraph `D(G, M)` (`build`): matched
//!   edges left→right, the rest right→left. Directed cycles of `D` are exactly
//!   the alternating cycles of `M`.
//! - Find a branch point (`find`): the alternating cycle through the lowest
//!   vertex id, or, when `D` is acyclic, a length-2 alternative `v – w – p` with
//!   `v` unmatched. Either yields a new maximum matching `M'`.
//! - Split on the matched/new edge `e` (`split`): one child forces `e`, the
//!   other forbids it. The two subtrees partition the remaining matchings, and
//!   each child already starts from an emitted matching, so no matching is
//!   produced twice.
//! - Both children have strictly fewer edges than their parent, so the depth is
//!   bounded by `|E(G)|` (`driver`).
//!
//! Notes
//! - The lowest-id scan order in `find` fixes the discovery order: the same
//!   graph always yields the same sequence of matchings.
//! - SCC decomposition of `D` is available in `crate::digraph::Scc` for
//!   diagnostics; the search does not use it.

mod build;
mod driver;
mod find;
mod split;
mod types;

pub use build::build_digraph;
pub use driver::{enumerate, enumerate_from, enumerate_maximum_matchings};
pub use find::{find_alternative, find_branch, find_cycle};
pub use split::{flip_cycle, forbidden_graph, forced_graph, split, Split};
pub use types::{
    Branch, BranchPoint, EnumCfg, EnumReport, EnumStats, MatchingSink, ResultSet,
};

#[cfg(test)]
mod tests;
