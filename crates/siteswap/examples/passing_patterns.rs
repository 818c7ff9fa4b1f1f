//! Two-juggler passing patterns for seven clubs.
//!
//! Runs one exhaustive session with the default built-in filters (at least one
//! pass, no zaps, no holds) and a pattern filter asking for a pass followed by
//! a self throw, then prints each result with its pass count.

use siteswap::prelude::*;

fn main() {
    let params = GenerationParameters {
        period_length: 4,
        max_throw: 10,
        number_of_objects: 7,
        number_of_jugglers: 2,
        ..GenerationParameters::default()
    };
    let mut filters = FilterList::new();
    filters.add(PatternFilter::parse("p s", Polarity::Include, 2).expect("valid pattern"));
    filters.reconcile(&params, BuiltinToggles::default());
    for f in &filters {
        println!("filter: {f}");
    }

    let out = generate(&params, &filters, SearchCfg::default()).expect("valid parameters");
    println!(
        "{} patterns, {} ({} steps, {:.1} ms)",
        out.results.len(),
        out.termination,
        out.steps,
        out.elapsed.as_secs_f64() * 1e3
    );
    for s in &out.results {
        let passes = s
            .heights()
            .iter()
            .filter(|&&h| s.layout().is_pass(h))
            .count();
        println!("{s}\tpasses={passes}");
    }
}
