//! Filter pipeline: predicates every candidate must pass before acceptance.
//!
//! Model
//! - `Filter` is a closed enum over `NumberFilter` (counts throws of a kind)
//!   and `PatternFilter` (looks for a sub-sequence in one juggler's throws).
//! - Each variant carries a `Polarity`: inclusion filters veto on non-match,
//!   exclusion filters veto on match.
//! - A `FilterList` accepts iff every filter accepts. Built-in filters
//!   (pass/zip/zap/hold) are regular entries managed by `FilterList::reconcile`,
//!   which the host calls before starting a session.

use std::fmt;

mod list;
mod number;
mod pattern;

pub use list::{BuiltinKind, BuiltinToggles, FilterList};
pub use number::{CountBound, NumberFilter, ThrowMatcher};
pub use pattern::{PatternFilter, PatternParseError, PatternToken};

use crate::pattern::Siteswap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Include,
    Exclude,
}

impl Polarity {
    /// Turn "the filter's predicate matched" into accept/reject.
    #[inline]
    pub fn verdict(self, matched: bool) -> bool {
        match self {
            Self::Include => matched,
            Self::Exclude => !matched,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    Number(NumberFilter),
    Pattern(PatternFilter),
}

impl Filter {
    #[inline]
    pub fn accepts(&self, siteswap: &Siteswap) -> bool {
        match self {
            Self::Number(f) => f.accepts(siteswap),
            Self::Pattern(f) => f.accepts(siteswap),
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Self::Number(f) => f.polarity,
            Self::Pattern(f) => f.polarity,
        }
    }
}

impl From<NumberFilter> for Filter {
    fn from(f: NumberFilter) -> Self {
        Self::Number(f)
    }
}

impl From<PatternFilter> for Filter {
    fn from(f: PatternFilter) -> Self {
        Self::Pattern(f)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(nf) => nf.fmt(f),
            Self::Pattern(pf) => pf.fmt(f),
        }
    }
}

/// True if `siteswap` passes every filter of `filters`.
pub fn accepts(siteswap: &Siteswap, filters: &FilterList) -> bool {
    filters.accepts(siteswap)
}
