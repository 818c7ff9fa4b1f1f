//! Random walks over the state graph.
//!
//! Each draw walks one period from the empty state, choosing uniformly among
//! the throws that keep the period closable. A closed walk is rotated to its
//! canonical form; forms already drawn are discarded, so results never
//! repeat. When `stale_draw_limit` consecutive draws bring nothing new the
//! space is treated as exhausted.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::pattern::{canonical_offset, Siteswap};

use super::{Budget, Frame, SearchCfg, SearchOutcome, SearchSpace, Termination};

/// Sample distinct canonical sequences of `space` until a limit hits.
pub(crate) fn search(space: &SearchSpace<'_>, budget: &mut Budget, cfg: &SearchCfg) -> SearchOutcome {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    debug!(seed, "random search seeded");
    WalkRunner::new(space, budget, seed, cfg.stale_draw_limit).solve()
}

/// Outcome of a single draw.
enum Draw {
    /// A canonical form not seen before (accepted or filtered out).
    Novel,
    /// Dead end, open cycle or repeated form.
    Stale,
}

struct WalkRunner<'s, 'b> {
    space: &'s SearchSpace<'s>,
    budget: &'b mut Budget,
    rng: StdRng,
    seed: u64,
    stale_limit: u64,
    seen: HashSet<Vec<u32>>,
    heights: Vec<u32>,
    options: Vec<(u32, Frame)>,
    results: Vec<Siteswap>,
}

impl<'s, 'b> WalkRunner<'s, 'b> {
    fn new(space: &'s SearchSpace<'s>, budget: &'b mut Budget, seed: u64, stale_limit: u64) -> Self {
        Self {
            space,
            budget,
            rng: StdRng::seed_from_u64(seed),
            seed,
            stale_limit: stale_limit.max(1),
            seen: HashSet::new(),
            heights: Vec::with_capacity(space.period),
            options: Vec::new(),
            results: Vec::new(),
        }
    }

    fn solve(mut self) -> SearchOutcome {
        let mut draws = 0u64;
        let mut stale = 0u64;
        let termination = loop {
            draws += 1;
            match self.draw() {
                Err(t) => break t,
                Ok(Draw::Novel) => stale = 0,
                Ok(Draw::Stale) => {
                    stale += 1;
                    if stale >= self.stale_limit {
                        debug!(draws, distinct = self.seen.len(), "no new patterns, stopping");
                        break Termination::Completed;
                    }
                }
            }
        };
        SearchOutcome {
            results: self.results,
            termination,
            steps: self.budget.steps(),
            seed: Some(self.seed),
        }
    }

    fn draw(&mut self) -> Result<Draw, Termination> {
        let mut frame = Frame::START;
        self.heights.clear();
        for position in 0..self.space.period {
            if let Some(t) = self.budget.tick() {
                return Err(t);
            }
            self.options.clear();
            for h in frame.state.legal_throws(self.space.min, self.space.max) {
                if let Some(next) = frame.advance(self.space, position, h) {
                    self.options.push((h, next));
                }
            }
            let Some(&(h, next)) = self.options.choose(&mut self.rng) else {
                return Ok(Draw::Stale);
            };
            self.heights.push(h);
            frame = next;
        }
        if !frame.closes(self.space.period) {
            return Ok(Draw::Stale);
        }
        let offset = canonical_offset(&self.heights, self.space.layout.hands_per_beat);
        let mut canonical = self.heights.clone();
        canonical.rotate_left(offset);
        if !self.seen.insert(canonical.clone()) {
            return Ok(Draw::Stale);
        }
        if let Some(found) = self.space.admit(canonical) {
            self.results.push(found);
            if self.budget.is_full(self.results.len()) {
                return Err(Termination::ResultCapReached);
            }
        }
        Ok(Draw::Novel)
    }
}
