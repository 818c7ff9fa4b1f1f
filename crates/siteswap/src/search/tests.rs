use std::collections::HashSet;

use proptest::prelude::*;

use super::*;
use crate::filter::{
    BuiltinKind, Filter, FilterList, NumberFilter, PatternFilter, Polarity,
};
use crate::params::{GenerationParameters, Layout};
use crate::pattern::{check_validity, is_canonical};
use crate::session::{generate, Generation};

fn params(period: usize, min: u32, max: u32, objects: u32, jugglers: usize) -> GenerationParameters {
    GenerationParameters {
        period_length: period,
        min_throw: min,
        max_throw: max,
        number_of_objects: objects,
        number_of_jugglers: jugglers,
        is_sync_pattern: false,
        is_random_generation: false,
        max_results: 10_000,
        timeout_seconds: 60,
    }
}

fn run(params: &GenerationParameters, filters: &FilterList) -> Generation {
    generate(params, filters, SearchCfg::default()).unwrap()
}

fn random_run(params: &GenerationParameters, filters: &FilterList, seed: u64) -> Generation {
    let params = GenerationParameters {
        is_random_generation: true,
        ..params.clone()
    };
    let cfg = SearchCfg {
        stale_draw_limit: 2_000,
        seed: Some(seed),
        ..SearchCfg::default()
    };
    generate(&params, filters, cfg).unwrap()
}

fn heights(out: &Generation) -> Vec<Vec<u32>> {
    out.results.iter().map(|s| s.heights().to_vec()).collect()
}

/// Every canonical, valid, filter-accepted sequence, in lexicographic order.
fn brute_force(params: &GenerationParameters, filters: &FilterList) -> Vec<Vec<u32>> {
    fn fill(
        seq: &mut Vec<u32>,
        params: &GenerationParameters,
        filters: &FilterList,
        out: &mut Vec<Vec<u32>>,
    ) {
        if seq.len() == params.period_length {
            let layout = params.layout();
            if check_validity(seq, params.number_of_objects, layout).is_ok()
                && is_canonical(seq, layout.hands_per_beat)
                && filters.accepts(&Siteswap::new(seq.clone(), layout))
            {
                out.push(seq.clone());
            }
            return;
        }
        for h in params.min_throw..=params.max_throw {
            seq.push(h);
            fill(seq, params, filters, out);
            seq.pop();
        }
    }
    let mut out = Vec::new();
    fill(&mut Vec::new(), params, filters, &mut out);
    out
}

#[test]
fn three_ball_period_three_contains_cascade() {
    let p = params(3, 0, 5, 3, 1);
    let out = run(&p, &FilterList::new());
    assert_eq!(out.termination, Termination::Completed);
    let found = heights(&out);
    assert!(found.contains(&vec![3, 3, 3]));
    assert!(found.contains(&vec![1, 4, 4]));
    assert!(found.contains(&vec![1, 5, 3]));
    assert!(!found.contains(&vec![4, 4, 1]), "only canonical rotations");
    for seq in &found {
        assert_eq!(seq.iter().sum::<u32>(), 9, "{seq:?}");
    }
}

#[test]
fn hold_exclusion_removes_zeros() {
    let p = params(3, 0, 5, 3, 1);
    let mut filters = FilterList::new();
    filters.add(BuiltinKind::Hold.filter(p.layout()));
    let out = run(&p, &filters);
    assert!(!out.results.is_empty());
    assert!(out.results.iter().all(|s| !s.contains(0)));
    let unfiltered = run(&p, &FilterList::new());
    assert!(unfiltered.results.iter().any(|s| s.contains(0)));
}

#[test]
fn result_cap_stops_search() {
    let p = GenerationParameters {
        max_results: 1,
        ..params(5, 2, 10, 7, 1)
    };
    let out = run(&p, &FilterList::new());
    assert_eq!(out.results.len(), 1);
    assert_eq!(out.termination, Termination::ResultCapReached);
}

#[test]
fn zero_timeout_times_out() {
    let p = GenerationParameters {
        timeout_seconds: 0,
        max_results: 100,
        ..params(10, 0, 15, 7, 1)
    };
    for random in [false, true] {
        let p = GenerationParameters {
            is_random_generation: random,
            ..p.clone()
        };
        let out = run(&p, &FilterList::new());
        assert_eq!(out.termination, Termination::TimedOut);
        assert!(out.results.len() <= p.max_results);
    }
}

#[test]
fn exhaustive_matches_brute_force() {
    let cases = [
        params(3, 0, 5, 3, 1),
        params(4, 0, 6, 3, 1),
        params(5, 1, 6, 4, 1),
        params(3, 0, 7, 4, 2),
        params(4, 2, 8, 5, 2),
        params(3, 0, 6, 3, 3),
    ];
    for p in cases {
        let out = run(&p, &FilterList::new());
        assert_eq!(out.termination, Termination::Completed);
        assert_eq!(heights(&out), brute_force(&p, &FilterList::new()), "{p:?}");
    }
}

#[test]
fn sync_search_matches_brute_force() {
    let p = GenerationParameters {
        is_sync_pattern: true,
        ..params(4, 0, 8, 4, 2)
    };
    let out = run(&p, &FilterList::new());
    let found = heights(&out);
    assert_eq!(found, brute_force(&p, &FilterList::new()));
    assert!(found.contains(&vec![4, 4, 4, 4]));
    assert!(found.contains(&vec![2, 6, 6, 2]));
    let layout = p.layout();
    for seq in &found {
        for (i, &h) in seq.iter().enumerate() {
            assert!(layout.lands_in_later_beat(i, h), "{seq:?}");
        }
    }
}

#[test]
fn filters_are_applied_during_search() {
    let p = params(4, 0, 9, 4, 2);
    let layout = p.layout();
    let filters: FilterList = [
        BuiltinKind::Pass.filter(layout),
        Filter::from(NumberFilter::excluding_height(0, layout)),
        Filter::from(PatternFilter::parse("p s", Polarity::Include, 2).unwrap()),
    ]
    .into_iter()
    .collect();
    let out = run(&p, &filters);
    assert!(!out.results.is_empty());
    assert!(out.results.iter().all(|s| filters.accepts(s)));
    assert_eq!(heights(&out), brute_force(&p, &filters));
}

#[test]
fn exhaustive_is_deterministic_and_sorted() {
    let p = params(5, 0, 7, 4, 1);
    let a = heights(&run(&p, &FilterList::new()));
    let b = heights(&run(&p, &FilterList::new()));
    assert_eq!(a, b);
    let mut sorted = a.clone();
    sorted.sort();
    assert_eq!(a, sorted);
}

#[test]
fn vetoing_filter_leaves_nothing() {
    // only "33" fits the range
    let p = params(2, 3, 3, 3, 1);
    let out = run(&p, &FilterList::new());
    assert_eq!(heights(&out), vec![vec![3, 3]]);
    let filters: FilterList = [Filter::from(NumberFilter::excluding_height(3, Layout::SOLO))]
        .into_iter()
        .collect();
    let out = run(&p, &filters);
    assert!(out.results.is_empty());
    assert_eq!(out.termination, Termination::Completed);
}

#[test]
fn random_results_are_valid_and_distinct() {
    let p = params(5, 0, 7, 4, 1);
    let out = random_run(&p, &FilterList::new(), 7);
    assert!(!out.results.is_empty());
    let all: HashSet<Vec<u32>> = brute_force(&p, &FilterList::new()).into_iter().collect();
    let mut seen = HashSet::new();
    for s in &out.results {
        assert!(s.is_valid(4), "{s}");
        assert!(s.is_canonical(), "{s}");
        assert!(all.contains(s.heights()), "{s}");
        assert!(seen.insert(s.heights().to_vec()), "duplicate {s}");
    }
}

#[test]
fn random_exhausts_tiny_space() {
    let p = params(1, 0, 5, 3, 1);
    let out = random_run(&p, &FilterList::new(), 1);
    assert_eq!(out.termination, Termination::Completed);
    assert_eq!(heights(&out), vec![vec![3]]);
}

#[test]
fn random_finds_whole_small_space() {
    let p = params(3, 0, 5, 3, 1);
    let out = random_run(&p, &FilterList::new(), 3);
    assert_eq!(out.termination, Termination::Completed);
    let mut found = heights(&out);
    found.sort();
    assert_eq!(found, brute_force(&p, &FilterList::new()));
}

#[test]
fn random_is_reproducible_from_seed() {
    let p = params(6, 0, 8, 4, 2);
    let a = random_run(&p, &FilterList::new(), 42);
    let b = random_run(&p, &FilterList::new(), 42);
    assert_eq!(a.seed, Some(42));
    assert_eq!(heights(&a), heights(&b));
}

#[test]
fn random_respects_cap_and_filters() {
    let p = GenerationParameters {
        max_results: 3,
        ..params(5, 2, 10, 7, 1)
    };
    let mut filters = FilterList::new();
    filters.add(NumberFilter::excluding_height(2, p.layout()));
    let out = random_run(&p, &filters, 9);
    assert_eq!(out.termination, Termination::ResultCapReached);
    assert_eq!(out.results.len(), 3);
    assert!(out.results.iter().all(|s| !s.contains(2) && s.is_valid(7)));
}

#[test]
fn budget_polls_on_first_step() {
    let p = GenerationParameters {
        timeout_seconds: 0,
        ..GenerationParameters::default()
    };
    let mut budget = Budget::new(&p, &SearchCfg::default(), CancelHandle::new());
    assert_eq!(budget.tick(), Some(Termination::TimedOut));
    let cancel = CancelHandle::new();
    let p = GenerationParameters::default();
    let cfg = SearchCfg {
        check_interval: 4,
        ..SearchCfg::default()
    };
    let mut budget = Budget::new(&p, &cfg, cancel.clone());
    assert_eq!(budget.tick(), None);
    cancel.cancel();
    // next poll is at step 4
    for _ in 1..4 {
        assert_eq!(budget.tick(), None);
    }
    assert_eq!(budget.tick(), Some(Termination::Cancelled));
}

fn small_params() -> impl Strategy<Value = GenerationParameters> {
    (1usize..=4, 1u32..=4, 0u32..=2, 1usize..=2, any::<bool>()).prop_flat_map(
        |(period, objects, extra, jugglers, sync)| {
            (0..=objects).prop_map(move |min| GenerationParameters {
                is_sync_pattern: sync,
                ..params(period, min, objects + extra, objects, jugglers)
            })
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]

    #[test]
    fn exhaustive_agrees_with_brute_force(p in small_params()) {
        prop_assume!(p.validate().is_ok());
        let out = run(&p, &FilterList::new());
        prop_assert_eq!(out.termination, Termination::Completed);
        prop_assert_eq!(heights(&out), brute_force(&p, &FilterList::new()));
    }

    #[test]
    fn random_output_is_a_subset_without_rotations(p in small_params(), seed in any::<u64>()) {
        prop_assume!(p.validate().is_ok());
        let out = random_run(&p, &FilterList::new(), seed);
        let all: HashSet<Vec<u32>> = brute_force(&p, &FilterList::new()).into_iter().collect();
        let mut seen = HashSet::new();
        for s in &out.results {
            prop_assert!(all.contains(s.heights()));
            prop_assert!(seen.insert(s.canonical()));
        }
    }
}
