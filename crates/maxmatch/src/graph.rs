//! Bipartite edge sets and matchings on `2N` vertices.
//!
//! Conventions
//! - Left vertices are `0..N`, right vertices are `N..2N`.
//! - Edges are stored left→right; the relation is undirected, the direction is
//!   only a storage convention. `adj(v)` lists the right neighbours of a left
//!   vertex, `rev_adj(w)` the left neighbours of a right vertex.
//! - Adjacency is kept in ordered sets so every scan runs in ascending vertex
//!   order; the enumeration relies on that for its lowest-id tie-breaks.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::MatchError;

/// Vertex id in `[0, 2N)`.
pub type Vertex = usize;
/// A `(left, right)` edge.
pub type Edge = (Vertex, Vertex);

/// Set of cross edges between two sides of `N` vertices each.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BipartiteGraph {
    side: usize,
    out: Vec<BTreeSet<Vertex>>,
    rev: Vec<BTreeSet<Vertex>>,
    edges: usize,
}

impl BipartiteGraph {
    /// Graph with `side` vertices per side and no edges.
    pub fn new(side: usize) -> Self {
        Self {
            side,
            out: vec![BTreeSet::new(); 2 * side],
            rev: vec![BTreeSet::new(); 2 * side],
            edges: 0,
        }
    }

    /// Build from `(v, w)` pairs; each pair is validated like [`Self::add_edge`].
    pub fn from_edges<I>(side: usize, edges: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut g = Self::new(side);
        for (v, w) in edges {
            g.add_edge(v, w)?;
        }
        Ok(g)
    }

    /// Add the undirected edge `{v, w}`; the pair may be given in either order.
    ///
    /// Returns `Ok(false)` if the edge was already present.
    pub fn add_edge(&mut self, v: Vertex, w: Vertex) -> Result<bool, MatchError> {
        let (l, r) = self.orient(v, w)?;
        Ok(self.insert(l, r))
    }

    /// Remove edge `(v, w)`; returns whether it was present.
    pub fn remove_edge(&mut self, v: Vertex, w: Vertex) -> bool {
        if v >= self.out.len() || w >= self.rev.len() {
            return false;
        }
        let removed = self.out[v].remove(&w);
        if removed {
            self.rev[w].remove(&v);
            self.edges -= 1;
        }
        removed
    }

    pub fn has_edge(&self, v: Vertex, w: Vertex) -> bool {
        self.out.get(v).is_some_and(|ws| ws.contains(&w))
    }

    /// Out-neighbours of `v` in ascending order (empty for right vertices).
    pub fn adj(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.out[v].iter().copied()
    }

    /// In-neighbours of `w` in ascending order (empty for left vertices).
    pub fn rev_adj(&self, w: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.rev[w].iter().copied()
    }

    /// Number of incident edges, regardless of side.
    pub fn degree(&self, v: Vertex) -> usize {
        self.out[v].len() + self.rev[v].len()
    }

    /// `N`, the number of vertices on each side.
    #[inline]
    pub fn side_size(&self) -> usize {
        self.side
    }

    /// `2N`.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        2 * self.side
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges == 0
    }

    #[inline]
    pub fn is_left(&self, v: Vertex) -> bool {
        v < self.side
    }

    /// All edges in lexicographic `(left, right)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.side).flat_map(move |v| self.out[v].iter().map(move |&w| (v, w)))
    }

    /// Insert an already-oriented edge without validation.
    pub(crate) fn insert(&mut self, v: Vertex, w: Vertex) -> bool {
        debug_assert!(self.is_left(v) && !self.is_left(w) && w < self.vertex_count());
        let inserted = self.out[v].insert(w);
        if inserted {
            self.rev[w].insert(v);
            self.edges += 1;
        }
        inserted
    }

    fn orient(&self, v: Vertex, w: Vertex) -> Result<Edge, MatchError> {
        let limit = self.vertex_count();
        for x in [v, w] {
            if x >= limit {
                return Err(MatchError::VertexOutOfRange {
                    vertex: x as i64,
                    limit,
                });
            }
        }
        match (self.is_left(v), self.is_left(w)) {
            (true, false) => Ok((v, w)),
            (false, true) => Ok((w, v)),
            _ => Err(MatchError::SameSide {
                v,
                w,
                side: self.side,
            }),
        }
    }
}

impl fmt::Display for BipartiteGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vertices, {} edges", self.vertex_count(), self.edges)?;
        for v in 0..self.side {
            write!(f, "{v}:")?;
            for w in self.adj(v) {
                write!(f, " {w}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A bipartite edge set with degree at most one at every vertex.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matching {
    inner: BipartiteGraph,
}

impl Matching {
    /// Empty matching on `side` vertices per side.
    pub fn empty(side: usize) -> Self {
        Self {
            inner: BipartiteGraph::new(side),
        }
    }

    /// Build from `(v, w)` pairs, rejecting shared endpoints.
    pub fn from_edges<I>(side: usize, edges: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut inner = BipartiteGraph::new(side);
        for (v, w) in edges {
            let (l, r) = inner.orient(v, w)?;
            if inner.has_edge(l, r) {
                continue;
            }
            for x in [l, r] {
                if inner.degree(x) > 0 {
                    return Err(MatchError::NotAMatching { vertex: x });
                }
            }
            inner.insert(l, r);
        }
        Ok(Self { inner })
    }

    /// Cardinality `|M|`.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.edge_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn side_size(&self) -> usize {
        self.inner.side_size()
    }

    pub fn contains(&self, v: Vertex, w: Vertex) -> bool {
        self.inner.has_edge(v, w)
    }

    /// Matched partner of `v`, if any.
    pub fn partner(&self, v: Vertex) -> Option<Vertex> {
        self.inner.out[v]
            .first()
            .or_else(|| self.inner.rev[v].first())
            .copied()
    }

    /// Partner of every vertex (`None` = unmatched), indexed by vertex id.
    pub fn pairs(&self) -> Vec<Option<Vertex>> {
        let mut pair = vec![None; self.inner.vertex_count()];
        for (v, w) in self.edges() {
            pair[v] = Some(w);
            pair[w] = Some(v);
        }
        pair
    }

    /// Matched edges in ascending order of their left endpoint.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.inner.edges()
    }

    pub fn as_graph(&self) -> &BipartiteGraph {
        &self.inner
    }

    /// Whether every matched edge is an edge of `g`.
    pub fn is_subgraph_of(&self, g: &BipartiteGraph) -> bool {
        self.edges().all(|(v, w)| g.has_edge(v, w))
    }

    /// `M \ {e}`.
    pub(crate) fn without(&self, (v, w): Edge) -> Self {
        let mut inner = self.inner.clone();
        inner.remove_edge(v, w);
        Self { inner }
    }

    /// Remove every edge of `removed`, then add every edge of `added`.
    ///
    /// Panics if an edge to remove is missing or an added edge would give a
    /// vertex degree two; both mean the caller's alternating structure is wrong.
    pub(crate) fn exchange(&self, removed: &[Edge], added: &[Edge]) -> Self {
        let mut inner = self.inner.clone();
        for &(v, w) in removed {
            assert!(inner.remove_edge(v, w), "edge {v}-{w} is not matched");
        }
        for &(v, w) in added {
            assert!(
                inner.degree(v) == 0 && inner.degree(w) == 0,
                "edge {v}-{w} would share a matched endpoint"
            );
            inner.insert(v, w);
        }
        Self { inner }
    }
}

impl fmt::Display for Matching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (v, w)) in self.edges().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({v}, {w})")?;
        }
        write!(f, "}}")
    }
}
