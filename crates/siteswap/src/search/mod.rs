//! Search engines over the state graph: exhaustive DFS and random walks.
//!
//! Purpose
//! - Both engines walk `JugglingState` one position at a time from the empty
//!   state and share the same admissibility test (`Frame::advance`), so they
//!   agree on what a candidate is.
//! - Results are canonical rotations, checked against the `FilterList`, and
//!   accumulated under a `Budget` (result cap, wall-clock deadline,
//!   cooperative cancellation polled every `check_interval` steps).
//!
//! Pruning (`Frame::advance`)
//! - Sync: a non-zero throw must land in a later beat.
//! - Average: the remaining positions must still be able to reach the
//!   required sum with throws in `[min, max]`.
//! - Objects: at most `objects` throws may start from an empty hand.
//! - Closure: objects that land at or after the period end fold onto
//!   positions of the next period. Folded positions already decided must be
//!   ones that threw from an empty hand, and no two objects may fold together.

use std::fmt;
use std::time::Instant;

use crate::cfg::{DEFAULT_CHECK_INTERVAL, DEFAULT_STALE_DRAW_LIMIT};
use crate::filter::FilterList;
use crate::params::{GenerationParameters, Layout};
use crate::pattern::{fold_positions, position_mask, Siteswap};
use crate::session::CancelHandle;
use crate::state::JugglingState;

pub(crate) mod exhaustive;
pub(crate) mod random;

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchCfg {
    /// Search steps between deadline/cancellation polls.
    pub check_interval: u64,
    /// Random mode: consecutive draws without a new pattern before the space
    /// counts as exhausted.
    pub stale_draw_limit: u64,
    /// Random mode: RNG seed; `None` draws a fresh one (reported back).
    pub seed: Option<u64>,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
            stale_draw_limit: DEFAULT_STALE_DRAW_LIMIT,
            seed: None,
        }
    }
}

/// Why a search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The space was exhausted (exhaustive) or stopped yielding new patterns (random).
    Completed,
    TimedOut,
    ResultCapReached,
    Cancelled,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "completed",
            Self::TimedOut => "timed out",
            Self::ResultCapReached => "result cap reached",
            Self::Cancelled => "cancelled",
        })
    }
}

/// Accepted sequences and how the engine stopped.
#[derive(Clone, Debug)]
pub(crate) struct SearchOutcome {
    pub results: Vec<Siteswap>,
    pub termination: Termination,
    pub steps: u64,
    pub seed: Option<u64>,
}

/// Resource bounds of one session.
pub(crate) struct Budget {
    deadline: Option<Instant>,
    cancel: CancelHandle,
    interval: u64,
    steps: u64,
    max_results: usize,
}

impl Budget {
    pub fn new(params: &GenerationParameters, cfg: &SearchCfg, cancel: CancelHandle) -> Self {
        Self {
            deadline: Instant::now().checked_add(params.timeout()),
            cancel,
            interval: cfg.check_interval.max(1),
            steps: 0,
            max_results: params.max_results,
        }
    }

    /// Count one search step; every `interval` steps (starting with the
    /// first) poll cancellation and the deadline.
    #[inline]
    pub fn tick(&mut self) -> Option<Termination> {
        let due = self.steps % self.interval == 0;
        self.steps += 1;
        if due {
            self.poll()
        } else {
            None
        }
    }

    pub fn poll(&self) -> Option<Termination> {
        if self.cancel.is_cancelled() {
            return Some(Termination::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Termination::TimedOut),
            _ => None,
        }
    }

    #[inline]
    pub fn is_full(&self, found: usize) -> bool {
        found >= self.max_results
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

/// Parameters of the walk, shared by both engines.
pub(crate) struct SearchSpace<'a> {
    pub period: usize,
    pub min: u32,
    pub max: u32,
    pub objects: u32,
    pub target_sum: u64,
    pub layout: Layout,
    pub filters: &'a FilterList,
}

impl<'a> SearchSpace<'a> {
    pub fn new(params: &GenerationParameters, filters: &'a FilterList) -> Self {
        Self {
            period: params.period_length,
            min: params.min_throw,
            max: params.max_throw,
            objects: params.number_of_objects,
            target_sum: params.target_sum(),
            layout: params.layout(),
            filters,
        }
    }

    /// Wrap `heights` and run the filter pipeline; `None` if a filter vetoes.
    pub fn admit(&self, heights: Vec<u32>) -> Option<Siteswap> {
        let candidate = Siteswap::new(heights, self.layout);
        self.filters.accepts(&candidate).then_some(candidate)
    }
}

/// Walk state after a prefix of the period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    pub state: JugglingState,
    /// Positions that threw from an empty hand.
    pub injected: u128,
    pub injected_count: u32,
    pub sum: u64,
}

impl Frame {
    pub const START: Self = Self {
        state: JugglingState::EMPTY,
        injected: 0,
        injected_count: 0,
        sum: 0,
    };

    /// Frame after throwing `height` at `position`, or `None` if the period
    /// can no longer close.
    pub fn advance(&self, space: &SearchSpace<'_>, position: usize, height: u32) -> Option<Self> {
        if !space.layout.lands_in_later_beat(position, height) {
            return None;
        }
        let remaining = (space.period - position - 1) as u64;
        let sum = self.sum + u64::from(height);
        if sum + remaining * u64::from(space.min) > space.target_sum
            || sum + remaining * u64::from(space.max) < space.target_sum
        {
            return None;
        }
        let (injected, injected_count) = if height > 0 && !self.state.lands_now() {
            (self.injected | (1u128 << position), self.injected_count + 1)
        } else {
            (self.injected, self.injected_count)
        };
        if injected_count > space.objects {
            return None;
        }
        let state = self.state.step(height).ok()?;
        let folded = fold_positions(state.beyond(remaining as usize), space.period)?;
        if folded & position_mask(position + 1) & !injected != 0 {
            return None;
        }
        Some(Self {
            state,
            injected,
            injected_count,
            sum,
        })
    }

    /// After a full period: every object left in the air lands on an injected position.
    #[inline]
    pub fn closes(&self, period: usize) -> bool {
        crate::pattern::closes_cycle(self.state, self.injected, period)
    }
}

#[cfg(test)]
mod tests;
