//! Depth-first enumeration of canonical sequences in lexicographic order.

use crate::pattern::{is_canonical, Siteswap};

use super::{Budget, Frame, SearchOutcome, SearchSpace, Termination};

/// Enumerate every canonical sequence of `space` until exhausted or a budget limit hits.
pub(crate) fn search(space: &SearchSpace<'_>, budget: &mut Budget) -> SearchOutcome {
    DfsRunner::new(space, budget).solve()
}

/// DFS runner carrying shared context and accumulators.
struct DfsRunner<'s, 'b> {
    space: &'s SearchSpace<'s>,
    budget: &'b mut Budget,
    prefix: Vec<u32>,
    results: Vec<Siteswap>,
    stop: Option<Termination>,
}

impl<'s, 'b> DfsRunner<'s, 'b> {
    fn new(space: &'s SearchSpace<'s>, budget: &'b mut Budget) -> Self {
        Self {
            space,
            budget,
            prefix: Vec::with_capacity(space.period),
            results: Vec::new(),
            stop: None,
        }
    }

    fn solve(mut self) -> SearchOutcome {
        self.recur(Frame::START);
        SearchOutcome {
            results: self.results,
            termination: self.stop.unwrap_or(Termination::Completed),
            steps: self.budget.steps(),
            seed: None,
        }
    }

    fn recur(&mut self, frame: Frame) {
        if let Some(t) = self.budget.tick() {
            self.stop = Some(t);
            return;
        }
        let position = self.prefix.len();
        if position == self.space.period {
            if frame.closes(self.space.period) {
                self.accept();
            }
            return;
        }
        let hands = self.space.layout.hands_per_beat;
        for h in frame.state.legal_throws(self.space.min, self.space.max) {
            // No later beat may start below the first one, or the rotation starting there is smaller.
            if position > 0 && position % hands == 0 && h < self.prefix[0] {
                continue;
            }
            let Some(next) = frame.advance(self.space, position, h) else {
                continue;
            };
            self.prefix.push(h);
            self.recur(next);
            self.prefix.pop();
            if self.stop.is_some() {
                return;
            }
        }
    }

    fn accept(&mut self) {
        if !is_canonical(&self.prefix, self.space.layout.hands_per_beat) {
            return;
        }
        let Some(found) = self.space.admit(self.prefix.clone()) else {
            return;
        };
        self.results.push(found);
        if self.budget.is_full(self.results.len()) {
            self.stop = Some(Termination::ResultCapReached);
        }
    }
}
