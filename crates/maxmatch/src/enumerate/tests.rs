//! Engine-level checks: the reference scenarios, brute-force completeness on
//! small graphs, budgets and sinks.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::time::Duration;

use proptest::prelude::*;

use super::*;
use crate::error::MatchError;
use crate::graph::{BipartiteGraph, Edge, Matching};
use crate::random::{complete_bipartite, draw_bipartite, RandomGraphCfg, ReplayToken};

fn graph(side: usize, edges: &[Edge]) -> BipartiteGraph {
    BipartiteGraph::from_edges(side, edges.iter().copied()).unwrap()
}

fn sorted_edge_sets<'a>(ms: impl IntoIterator<Item = &'a Matching>) -> Vec<Vec<Edge>> {
    let mut out: Vec<Vec<Edge>> = ms.into_iter().map(|m| m.edges().collect()).collect();
    out.sort();
    out
}

/// All maximum matchings by exhaustive assignment of left vertices.
fn brute_force(g: &BipartiteGraph) -> Vec<Vec<Edge>> {
    fn rec(
        g: &BipartiteGraph,
        v: usize,
        used: &mut [bool],
        cur: &mut Vec<Edge>,
        out: &mut Vec<Vec<Edge>>,
    ) {
        if v == g.side_size() {
            out.push(cur.clone());
            return;
        }
        rec(g, v + 1, used, cur, out);
        for w in g.adj(v) {
            if !used[w] {
                used[w] = true;
                cur.push((v, w));
                rec(g, v + 1, used, cur, out);
                cur.pop();
                used[w] = false;
            }
        }
    }
    let mut all = Vec::new();
    let mut used = vec![false; g.vertex_count()];
    rec(g, 0, &mut used, &mut Vec::new(), &mut all);
    let k = all.iter().map(Vec::len).max().unwrap_or(0);
    let mut best: Vec<Vec<Edge>> = all.into_iter().filter(|m| m.len() == k).collect();
    best.sort();
    best
}

/// Cardinality, validity, uniqueness, completeness and the depth bound.
fn check_against_brute_force(g: &BipartiteGraph) {
    let mut all = ResultSet::new();
    let report = enumerate(g, EnumCfg::default(), &mut all);
    assert!(report.complete);
    assert_eq!(report.emitted, all.len());
    assert!(report.stats.max_depth <= g.edge_count());
    let k = report.cardinality;
    for m in &all {
        assert_eq!(m.len(), k, "cardinality drift in {m}");
        assert!(m.is_subgraph_of(g), "{m} uses a missing edge");
        let pair = m.pairs();
        for (v, w) in m.edges() {
            assert_eq!(pair[v], Some(w));
            assert_eq!(pair[w], Some(v));
        }
    }
    let distinct: HashSet<&Matching> = all.iter().collect();
    assert_eq!(distinct.len(), all.len(), "duplicate matching emitted");
    assert_eq!(sorted_edge_sets(&all), brute_force(g), "graph:\n{g}");
}

#[test]
fn scenario_complete_k22() {
    let g = graph(2, &[(0, 2), (0, 3), (1, 2), (1, 3)]);
    let all = enumerate_maximum_matchings(&g);
    assert_eq!(
        sorted_edge_sets(&all),
        vec![vec![(0, 2), (1, 3)], vec![(0, 3), (1, 2)]]
    );
}

#[test]
fn scenario_single_forced_edge() {
    let g = graph(2, &[(0, 2)]);
    let all = enumerate_maximum_matchings(&g);
    assert_eq!(sorted_edge_sets(&all), vec![vec![(0, 2)]]);
}

#[test]
fn scenario_empty_graph_yields_empty_matching() {
    let g = BipartiteGraph::new(2);
    let mut all = ResultSet::new();
    let report = enumerate(&g, EnumCfg::default(), &mut all);
    assert_eq!(report.cardinality, 0);
    assert_eq!(all.len(), 1);
    assert!(all.get(0).is_some_and(Matching::is_empty));
}

#[test]
fn scenario_path_like_graph() {
    let g = graph(3, &[(0, 3), (1, 3), (1, 4), (2, 4), (2, 5)]);
    let all = enumerate_maximum_matchings(&g);
    assert_eq!(sorted_edge_sets(&all), vec![vec![(0, 3), (1, 4), (2, 5)]]);
    check_against_brute_force(&g);
}

#[test]
fn star_uses_length_two_alternatives() {
    // One left vertex, three right: k = 1, three matchings, no cycles.
    let g = graph(3, &[(0, 3), (0, 4), (0, 5)]);
    let mut all = ResultSet::new();
    let report = enumerate(&g, EnumCfg::default(), &mut all);
    assert_eq!(all.len(), 3);
    assert_eq!(report.stats.cycle_branches, 0);
    assert_eq!(report.stats.alt_branches, 2);
    // Mirror image exercises the left-side scan.
    check_against_brute_force(&graph(3, &[(0, 3), (1, 3), (2, 3)]));
}

#[test]
fn complete_bipartite_has_factorial_count() {
    for (n, count) in [(1, 1), (2, 2), (3, 6), (4, 24), (5, 120)] {
        let all = enumerate_maximum_matchings(&complete_bipartite(n));
        assert_eq!(all.len(), count, "K_{{{n},{n}}}");
    }
}

#[test]
fn mixed_cycles_and_alternatives() {
    // Square on {0,1}x{3,4}; 1-5 links it to the pendant edge 2-5.
    let g = graph(3, &[(0, 3), (0, 4), (1, 3), (1, 4), (1, 5), (2, 5)]);
    check_against_brute_force(&g);
    // No perfect matching: 0 and 1 share 4, 2 and 3 share 6.
    let h = graph(4, &[(0, 4), (1, 4), (2, 5), (2, 6), (3, 6)]);
    check_against_brute_force(&h);
}

#[test]
fn seeded_random_graphs_match_brute_force() {
    for index in 0..240u64 {
        let cfg = RandomGraphCfg {
            side: 1 + (index % 6) as usize,
            edge_prob: [0.2, 0.4, 0.6, 0.8][(index % 4) as usize],
        };
        let g = draw_bipartite(cfg, ReplayToken { seed: 2024, index });
        check_against_brute_force(&g);
    }
}

#[test]
fn discovery_order_is_deterministic() {
    let g = draw_bipartite(
        RandomGraphCfg {
            side: 5,
            edge_prob: 0.6,
        },
        ReplayToken { seed: 9, index: 1 },
    );
    let a = enumerate_maximum_matchings(&g);
    let b = enumerate_maximum_matchings(&g);
    assert_eq!(a, b);
}

#[test]
fn max_results_truncates() {
    let g = complete_bipartite(3);
    let mut out = ResultSet::new();
    let cfg = EnumCfg {
        max_results: Some(4),
        ..EnumCfg::default()
    };
    let report = enumerate(&g, cfg, &mut out);
    assert_eq!(out.len(), 4);
    assert_eq!(report.emitted, 4);
    assert!(!report.complete);

    // A cap equal to the true count still completes.
    let k22 = graph(2, &[(0, 2), (0, 3), (1, 2), (1, 3)]);
    let mut out = ResultSet::new();
    let cfg = EnumCfg {
        max_results: Some(2),
        ..EnumCfg::default()
    };
    let report = enumerate(&k22, cfg, &mut out);
    assert_eq!(out.len(), 2);
    assert!(report.complete);

    let mut none = ResultSet::new();
    let cfg = EnumCfg {
        max_results: Some(0),
        ..EnumCfg::default()
    };
    let report = enumerate(&k22, cfg, &mut none);
    assert!(none.is_empty());
    assert!(!report.complete);
}

#[test]
fn zero_time_budget_stops_after_initial_matching() {
    let g = complete_bipartite(3);
    let mut out = ResultSet::new();
    let cfg = EnumCfg {
        time_budget: Some(Duration::ZERO),
        ..EnumCfg::default()
    };
    let report = enumerate(&g, cfg, &mut out);
    assert_eq!(out.len(), 1);
    assert!(!report.complete);
}

#[test]
fn closure_sink_can_stop_the_run() {
    let g = complete_bipartite(4);
    let mut seen = Vec::new();
    let mut sink = |m: &Matching| {
        seen.push(m.clone());
        if seen.len() == 3 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };
    let report = enumerate(&g, EnumCfg::default(), &mut sink);
    assert_eq!(report.emitted, 3);
    assert!(!report.complete);
    assert_eq!(seen.len(), 3);
}

#[test]
fn enumerate_from_supplied_matching() {
    let g = graph(3, &[(0, 3), (0, 4), (1, 3), (1, 4), (2, 5)]);
    let start = Matching::from_edges(3, [(0, 4), (1, 3), (2, 5)]).unwrap();
    let mut out = ResultSet::new();
    let report = enumerate_from(&g, start.clone(), EnumCfg::default(), &mut out).unwrap();
    assert!(report.complete);
    assert_eq!(out.get(0), Some(&start));
    assert_eq!(sorted_edge_sets(&out), brute_force(&g));
}

#[test]
fn enumerate_from_rejects_foreign_matching() {
    let g = graph(2, &[(0, 2)]);
    let mut out = ResultSet::new();
    let bad = Matching::from_edges(2, [(1, 3)]).unwrap();
    assert_eq!(
        enumerate_from(&g, bad, EnumCfg::default(), &mut out),
        Err(MatchError::NotInGraph { v: 1, w: 3 })
    );
    let wrong_size = Matching::empty(3);
    assert_eq!(
        enumerate_from(&g, wrong_size, EnumCfg::default(), &mut out),
        Err(MatchError::SideMismatch {
            graph: 2,
            matching: 3
        })
    );
    assert!(out.is_empty());
}

fn small_graph() -> impl Strategy<Value = BipartiteGraph> {
    (1usize..=5).prop_flat_map(|n| {
        proptest::collection::vec(any::<bool>(), n * n).prop_map(move |bits| {
            let edges = bits
                .iter()
                .enumerate()
                .filter(|&(_, &b)| b)
                .map(|(i, _)| (i / n, n + i % n));
            BipartiteGraph::from_edges(n, edges).unwrap()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn prop_enumeration_equals_brute_force(g in small_graph()) {
        let all = enumerate_maximum_matchings(&g);
        prop_assert_eq!(sorted_edge_sets(&all), brute_force(&g));
    }
}
