//! Max-flow oracle and the initial maximum matching.
//!
//! The matching problem is reduced to a flow network on `2N + 2` vertices:
//! a super-source `2N` with unit arcs into every left vertex, a super-sink
//! `2N + 1` fed by unit arcs from every right vertex, and one unbounded arc
//! per graph edge. Ford–Fulkerson with shortest augmenting paths (BFS) then
//! saturates at most `N` source arcs; cross arcs carrying flow form a maximum
//! matching.

use std::collections::VecDeque;

use tracing::debug;

use crate::graph::{BipartiteGraph, Matching, Vertex};

pub type Capacity = i64;

/// Capacity used for the cross arcs of the matching network.
pub const UNBOUNDED: Capacity = Capacity::MAX;

/// Arc `from → to` with capacity and current flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: Vertex,
    pub to: Vertex,
    pub capacity: Capacity,
    pub flow: Capacity,
}

impl FlowEdge {
    pub fn new(from: Vertex, to: Vertex, capacity: Capacity) -> Self {
        assert!(capacity >= 0, "edge capacity must be nonnegative");
        Self {
            from,
            to,
            capacity,
            flow: 0,
        }
    }

    /// Endpoint opposite to `v`.
    pub fn other(&self, v: Vertex) -> Vertex {
        if v == self.from {
            self.to
        } else {
            self.from
        }
    }

    /// Residual capacity in the direction ending at `v`.
    pub fn residual_capacity_to(&self, v: Vertex) -> Capacity {
        if v == self.from {
            self.flow
        } else {
            self.capacity - self.flow
        }
    }

    fn add_residual_flow_to(&mut self, v: Vertex, delta: Capacity) {
        if v == self.from {
            self.flow -= delta;
        } else {
            self.flow += delta;
        }
    }
}

/// Edge-indexed flow network; each vertex lists the edges incident to it.
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    edges: Vec<FlowEdge>,
    adj: Vec<Vec<usize>>,
}

impl FlowNetwork {
    pub fn new(vertices: usize) -> Self {
        Self {
            edges: Vec::new(),
            adj: vec![Vec::new(); vertices],
        }
    }

    /// Add an edge; returns its index.
    pub fn add_edge(&mut self, e: FlowEdge) -> usize {
        let idx = self.edges.len();
        self.adj[e.from].push(idx);
        self.adj[e.to].push(idx);
        self.edges.push(e);
        idx
    }

    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge(&self, idx: usize) -> &FlowEdge {
        &self.edges[idx]
    }

    /// Edges incident to `v` (both directions).
    pub fn adj(&self, v: Vertex) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.adj[v].iter().map(move |&i| &self.edges[i])
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }
}

/// Result of a max-flow run.
#[derive(Clone, Debug)]
pub struct FordFulkerson {
    value: Capacity,
    augmentations: usize,
}

impl FordFulkerson {
    /// Push a maximum `s`-`t` flow through `net`, leaving per-edge flows in place.
    pub fn new(net: &mut FlowNetwork, s: Vertex, t: Vertex) -> Self {
        assert!(s != t, "source equals sink");
        let mut value = 0;
        let mut augmentations = 0;
        while let Some(edge_to) = shortest_augmenting_path(net, s, t) {
            let mut bottleneck = UNBOUNDED;
            let mut v = t;
            while v != s {
                let e = &net.edges[edge_to[v]];
                bottleneck = bottleneck.min(e.residual_capacity_to(v));
                v = e.other(v);
            }
            let mut v = t;
            while v != s {
                let idx = edge_to[v];
                net.edges[idx].add_residual_flow_to(v, bottleneck);
                v = net.edges[idx].other(v);
            }
            value += bottleneck;
            augmentations += 1;
        }
        Self {
            value,
            augmentations,
        }
    }

    pub fn value(&self) -> Capacity {
        self.value
    }

    pub fn augmentations(&self) -> usize {
        self.augmentations
    }
}

// BFS over the residual network; returns the incoming edge index per vertex.
fn shortest_augmenting_path(net: &FlowNetwork, s: Vertex, t: Vertex) -> Option<Vec<usize>> {
    let n = net.vertex_count();
    let mut edge_to = vec![usize::MAX; n];
    let mut marked = vec![false; n];
    let mut queue = VecDeque::new();
    marked[s] = true;
    queue.push_back(s);
    while let Some(v) = queue.pop_front() {
        for &idx in &net.adj[v] {
            let e = &net.edges[idx];
            let w = e.other(v);
            if !marked[w] && e.residual_capacity_to(w) > 0 {
                marked[w] = true;
                edge_to[w] = idx;
                if w == t {
                    return Some(edge_to);
                }
                queue.push_back(w);
            }
        }
    }
    None
}

/// One maximum matching of `g`, read off a maximum flow.
pub fn initial_matching(g: &BipartiteGraph) -> Matching {
    let side = g.side_size();
    let (s, t) = (2 * side, 2 * side + 1);
    let mut net = FlowNetwork::new(2 * side + 2);
    let mut cross = Vec::with_capacity(g.edge_count());
    for (v, w) in g.edges() {
        cross.push(net.add_edge(FlowEdge::new(v, w, UNBOUNDED)));
    }
    for i in 0..side {
        net.add_edge(FlowEdge::new(s, i, 1));
        net.add_edge(FlowEdge::new(i + side, t, 1));
    }
    let maxflow = FordFulkerson::new(&mut net, s, t);
    let matched = cross
        .into_iter()
        .map(|idx| net.edge(idx))
        .filter(|e| e.flow > 0)
        .map(|e| (e.from, e.to));
    let m = Matching::from_edges(side, matched)
        .unwrap_or_else(|err| panic!("unit-capacity flow is not a matching: {err}"));
    assert_eq!(
        m.len() as Capacity,
        maxflow.value(),
        "flow value differs from matching size"
    );
    debug!(
        size = m.len(),
        augmentations = maxflow.augmentations(),
        "initial maximum matching"
    );
    m
}
