//! Directed graphs with a DFS reachability oracle and SCC diagnostics.
//!
//! `DirectedPaths` answers "is `v` reachable from `s`, and along which path?".
//! Asking for the source itself reports a closed walk `s →+ s`, which is how
//! the enumeration finds alternating cycles in the implication digraph.
//!
//! `Scc` (Kosaraju–Sharir) is diagnostic only; nothing in the search consults it.

use std::fmt;

use crate::graph::Vertex;

/// Adjacency-list digraph on vertices `0..V`. Arcs keep insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digraph {
    adj: Vec<Vec<Vertex>>,
    arcs: usize,
}

impl Digraph {
    pub fn new(vertices: usize) -> Self {
        Self {
            adj: vec![Vec::new(); vertices],
            arcs: 0,
        }
    }

    pub fn add_arc(&mut self, v: Vertex, w: Vertex) {
        self.adj[v].push(w);
        self.arcs += 1;
    }

    pub fn adj(&self, v: Vertex) -> &[Vertex] {
        &self.adj[v]
    }

    pub fn has_arc(&self, v: Vertex, w: Vertex) -> bool {
        self.adj.get(v).is_some_and(|ws| ws.contains(&w))
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    #[inline]
    pub fn arc_count(&self) -> usize {
        self.arcs
    }

    /// All arcs `(v, w)` grouped by tail.
    pub fn arcs(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(v, ws)| ws.iter().map(move |&w| (v, w)))
    }

    /// Same vertices, every arc reversed.
    pub fn reverse(&self) -> Self {
        let mut r = Self::new(self.vertex_count());
        for (v, w) in self.arcs() {
            r.add_arc(w, v);
        }
        r
    }
}

impl fmt::Display for Digraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vertices, {} arcs", self.vertex_count(), self.arcs)?;
        for (v, ws) in self.adj.iter().enumerate() {
            write!(f, "{v}:")?;
            for w in ws {
                write!(f, " {w}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Depth-first search tree rooted at `source`.
#[derive(Clone, Debug)]
pub struct DirectedPaths {
    source: Vertex,
    marked: Vec<bool>,
    edge_to: Vec<Option<Vertex>>,
    // First vertex (in DFS order) with an arc back into the source.
    closing: Option<Vertex>,
}

impl DirectedPaths {
    /// Run an iterative DFS from `source`.
    pub fn new(g: &Digraph, source: Vertex) -> Self {
        let n = g.vertex_count();
        let mut marked = vec![false; n];
        let mut edge_to = vec![None; n];
        let mut closing = None;
        marked[source] = true;
        let mut stack: Vec<(Vertex, usize)> = vec![(source, 0)];
        while let Some(&(v, next)) = stack.last() {
            let Some(&w) = g.adj(v).get(next) else {
                stack.pop();
                continue;
            };
            let top = stack.len() - 1;
            stack[top].1 += 1;
            if w == source {
                closing.get_or_insert(v);
            } else if !marked[w] {
                marked[w] = true;
                edge_to[w] = Some(v);
                stack.push((w, 0));
            }
        }
        Self {
            source,
            marked,
            edge_to,
            closing,
        }
    }

    pub fn source(&self) -> Vertex {
        self.source
    }

    /// For `v == source` this asks for a cycle through the source.
    pub fn has_path_to(&self, v: Vertex) -> bool {
        if v == self.source {
            self.closing.is_some()
        } else {
            self.marked[v]
        }
    }

    /// Vertices from the source to `v`, both included.
    ///
    /// For `v == source` the result is a simple cycle `[s, x1, ..., s]`.
    pub fn path_to(&self, v: Vertex) -> Option<Vec<Vertex>> {
        if !self.has_path_to(v) {
            return None;
        }
        let mut path = Vec::new();
        let mut x = if v == self.source {
            path.push(self.source);
            self.closing?
        } else {
            v
        };
        loop {
            path.push(x);
            match self.edge_to[x] {
                Some(p) => x = p,
                None => break,
            }
        }
        path.reverse();
        Some(path)
    }
}

/// Strongly connected components (Kosaraju–Sharir).
#[derive(Clone, Debug)]
pub struct Scc {
    id: Vec<usize>,
    count: usize,
}

impl Scc {
    pub fn kosaraju(g: &Digraph) -> Self {
        const UNSET: usize = usize::MAX;
        let mut id = vec![UNSET; g.vertex_count()];
        let mut count = 0;
        for s in reverse_postorder(&g.reverse()) {
            if id[s] != UNSET {
                continue;
            }
            id[s] = count;
            let mut stack = vec![s];
            while let Some(v) = stack.pop() {
                for &w in g.adj(v) {
                    if id[w] == UNSET {
                        id[w] = count;
                        stack.push(w);
                    }
                }
            }
            count += 1;
        }
        Self { id, count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn id(&self, v: Vertex) -> usize {
        self.id[v]
    }

    pub fn strongly_connected(&self, v: Vertex, w: Vertex) -> bool {
        self.id[v] == self.id[w]
    }

    /// Members of each component, ascending, indexed by component id.
    pub fn components(&self) -> Vec<Vec<Vertex>> {
        let mut comps = vec![Vec::new(); self.count];
        for (v, &c) in self.id.iter().enumerate() {
            comps[c].push(v);
        }
        comps
    }
}

fn reverse_postorder(g: &Digraph) -> Vec<Vertex> {
    let n = g.vertex_count();
    let mut marked = vec![false; n];
    let mut post = Vec::with_capacity(n);
    for s in 0..n {
        if marked[s] {
            continue;
        }
        marked[s] = true;
        let mut stack: Vec<(Vertex, usize)> = vec![(s, 0)];
        while let Some(&(v, next)) = stack.last() {
            match g.adj(v).get(next) {
                Some(&w) => {
                    let top = stack.len() - 1;
                    stack[top].1 += 1;
                    if !marked[w] {
                        marked[w] = true;
                        stack.push((w, 0));
                    }
                }
                None => {
                    post.push(v);
                    stack.pop();
                }
            }
        }
    }
    post.reverse();
    post
}
