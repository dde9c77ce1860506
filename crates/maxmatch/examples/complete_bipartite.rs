//! Print every perfect matching of `K_{n,n}`.
//!
//! Usage:
//!   cargo run -p maxmatch --example complete_bipartite -- 3
//!
//! Prints the `n!` matchings in discovery order, then the run statistics.

use maxmatch::prelude::*;

fn main() {
    let n = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(3);
    let g = complete_bipartite(n);
    println!("{g}");
    let mut all = ResultSet::new();
    let report = enumerate(&g, EnumCfg::default(), &mut all);
    for (i, m) in all.iter().enumerate() {
        println!("#{} {m}", i + 1);
    }
    println!(
        "k={} count={} complete={} nodes={} cycles={} alternatives={}",
        report.cardinality,
        report.emitted,
        report.complete,
        report.stats.nodes,
        report.stats.cycle_branches,
        report.stats.alt_branches
    );
}
