//! Filters over the multiset of throw heights.

use std::fmt;

use super::Polarity;
use crate::params::Layout;
use crate::pattern::Siteswap;

/// Which throws a `NumberFilter` counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThrowMatcher {
    Height(u32),
    /// Any throw landing on another juggler.
    Pass,
    /// Any non-zero throw staying with the thrower.
    SelfThrow,
}

impl ThrowMatcher {
    #[inline]
    pub fn matches(self, layout: Layout, height: u32) -> bool {
        match self {
            Self::Height(h) => height == h,
            Self::Pass => layout.is_pass(height),
            Self::SelfThrow => height > 0 && !layout.is_pass(height),
        }
    }
}

impl fmt::Display for ThrowMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Height(h) => write!(f, "{h}"),
            Self::Pass => f.write_str("p"),
            Self::SelfThrow => f.write_str("s"),
        }
    }
}

/// Constraint on how many throws match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CountBound {
    AtLeast(usize),
    AtMost(usize),
    Exactly(usize),
}

impl CountBound {
    #[inline]
    pub fn holds(self, count: usize) -> bool {
        match self {
            Self::AtLeast(n) => count >= n,
            Self::AtMost(n) => count <= n,
            Self::Exactly(n) => count == n,
        }
    }
}

impl fmt::Display for CountBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::AtMost(n) => write!(f, "at most {n}"),
            Self::Exactly(n) => write!(f, "exactly {n}"),
        }
    }
}

/// Counts matching throws, optionally restricted to one synchronous hand
/// and/or one position, and compares the count against `bound`.
///
/// The filter carries its own juggler and hand counts so evaluation needs no
/// session parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NumberFilter {
    pub matcher: ThrowMatcher,
    pub bound: CountBound,
    pub polarity: Polarity,
    pub hand: Option<usize>,
    pub position: Option<usize>,
    pub jugglers: usize,
    pub sync_hands: usize,
}

impl NumberFilter {
    pub fn new(
        matcher: ThrowMatcher,
        bound: CountBound,
        polarity: Polarity,
        layout: Layout,
    ) -> Self {
        Self {
            matcher,
            bound,
            polarity,
            hand: None,
            position: None,
            jugglers: layout.jugglers,
            sync_hands: layout.hands_per_beat,
        }
    }

    /// Reject every sequence containing `height`.
    pub fn excluding_height(height: u32, layout: Layout) -> Self {
        Self::new(
            ThrowMatcher::Height(height),
            CountBound::AtLeast(1),
            Polarity::Exclude,
            layout,
        )
    }

    /// Keep only sequences with `height` at `position`.
    pub fn requiring_height_at(height: u32, position: usize, layout: Layout) -> Self {
        Self::new(
            ThrowMatcher::Height(height),
            CountBound::AtLeast(1),
            Polarity::Include,
            layout,
        )
        .at_position(position)
    }

    pub fn on_hand(mut self, hand: usize) -> Self {
        self.hand = Some(hand);
        self
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Re-read the hand restriction for a new number of synchronous hands.
    pub fn with_sync_hands(mut self, sync_hands: usize) -> Self {
        self.sync_hands = sync_hands.max(1);
        self
    }

    fn layout(&self) -> Layout {
        Layout {
            jugglers: self.jugglers.max(1),
            hands_per_beat: self.sync_hands.max(1),
        }
    }

    /// Number of throws the bound is compared against.
    pub fn count(&self, siteswap: &Siteswap) -> usize {
        let layout = self.layout();
        siteswap
            .heights()
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.position.map_or(true, |p| p == i))
            .filter(|&(i, _)| self.hand.map_or(true, |h| layout.sync_hand_of(i) == h))
            .filter(|&(_, &height)| self.matcher.matches(layout, height))
            .count()
    }

    pub fn accepts(&self, siteswap: &Siteswap) -> bool {
        self.polarity.verdict(self.bound.holds(self.count(siteswap)))
    }
}

impl fmt::Display for NumberFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} × {}", self.polarity, self.bound, self.matcher)?;
        if let Some(h) = self.hand {
            write!(f, " on hand {h}")?;
        }
        if let Some(p) = self.position {
            write!(f, " at position {p}")?;
        }
        Ok(())
    }
}
