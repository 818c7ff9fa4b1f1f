//! Ordered filter collection and the auto-managed built-in filters.

use std::fmt;

use super::{CountBound, Filter, NumberFilter, Polarity, ThrowMatcher};
use crate::params::{GenerationParameters, Layout};
use crate::pattern::Siteswap;

/// Built-in filters added and removed by `FilterList::reconcile`.
///
/// They are ordinary `NumberFilter`s; `recognize` identifies them by their
/// configuration alone, so a list keeps working after parameters change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    /// At least one pass per period (multi-juggler only).
    Pass,
    /// Excludes local 2s: height `2J`, same hand.
    Zip,
    /// Excludes local 1s: height `J`, crossing to the other hand.
    Zap,
    /// Excludes empty hands: height `0`.
    Hold,
}

impl BuiltinKind {
    pub const ALL: [Self; 4] = [Self::Pass, Self::Zip, Self::Zap, Self::Hold];

    /// Throw height an exclusion built-in targets.
    pub fn height(self, jugglers: usize) -> Option<u32> {
        let j = jugglers.max(1) as u32;
        match self {
            Self::Pass => None,
            Self::Zip => Some(2 * j),
            Self::Zap => Some(j),
            Self::Hold => Some(0),
        }
    }

    pub fn filter(self, layout: Layout) -> Filter {
        let nf = match self.height(layout.jugglers) {
            Some(h) => NumberFilter::excluding_height(h, layout),
            None => NumberFilter::new(
                ThrowMatcher::Pass,
                CountBound::AtLeast(1),
                Polarity::Include,
                layout,
            ),
        };
        Filter::Number(nf)
    }

    pub fn recognize(filter: &Filter) -> Option<Self> {
        let Filter::Number(nf) = filter else {
            return None;
        };
        if nf.hand.is_some() || nf.position.is_some() || nf.bound != CountBound::AtLeast(1) {
            return None;
        }
        match (nf.polarity, nf.matcher) {
            (Polarity::Include, ThrowMatcher::Pass) => Some(Self::Pass),
            (Polarity::Exclude, ThrowMatcher::Height(h)) => Self::ALL
                .into_iter()
                .find(|kind| kind.height(nf.jugglers) == Some(h)),
            _ => None,
        }
    }

    fn wanted(self, params: &GenerationParameters, toggles: BuiltinToggles) -> bool {
        let in_range = |h: u32| params.min_throw <= h && h <= params.max_throw;
        let height = self.height(params.number_of_jugglers);
        match self {
            Self::Pass => params.number_of_jugglers > 1,
            Self::Zip => !toggles.zips && height.is_some_and(in_range),
            Self::Zap => !toggles.zaps && height.is_some_and(in_range),
            Self::Hold => !toggles.holds && height.is_some_and(in_range),
        }
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pass => "pass",
            Self::Zip => "zip",
            Self::Zap => "zap",
            Self::Hold => "hold",
        };
        f.write_str(name)
    }
}

/// Coarse include switches for zips, zaps and holds. `true` allows them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinToggles {
    pub zips: bool,
    pub zaps: bool,
    pub holds: bool,
}

impl Default for BuiltinToggles {
    fn default() -> Self {
        Self {
            zips: true,
            zaps: false,
            holds: false,
        }
    }
}

/// Filters in insertion order. Membership compares configurations; `add`
/// skips filters already present, `push` does not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterList {
    filters: Vec<Filter>,
}

impl FilterList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    pub fn contains(&self, filter: &Filter) -> bool {
        self.filters.contains(filter)
    }

    /// Append unless an equal filter is present. Returns whether it was added.
    pub fn add(&mut self, filter: impl Into<Filter>) -> bool {
        let filter = filter.into();
        if self.contains(&filter) {
            return false;
        }
        self.filters.push(filter);
        true
    }

    /// Append even if an equal filter is present.
    pub fn push(&mut self, filter: impl Into<Filter>) {
        self.filters.push(filter.into());
    }

    /// Remove every occurrence of `filter`; returns how many were removed.
    pub fn remove_all(&mut self, filter: &Filter) -> usize {
        let before = self.filters.len();
        self.filters.retain(|f| f != filter);
        before - self.filters.len()
    }

    pub fn replace(&mut self, old: &Filter, new: impl Into<Filter>) {
        self.remove_all(old);
        self.add(new);
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Logical AND over all filters.
    pub fn accepts(&self, siteswap: &Siteswap) -> bool {
        self.filters.iter().all(|f| f.accepts(siteswap))
    }

    /// Built-ins currently in the list, in list order.
    pub fn builtins(&self) -> impl Iterator<Item = BuiltinKind> + '_ {
        self.filters.iter().filter_map(BuiltinKind::recognize)
    }

    /// Update the synchronous hand count of every number filter.
    pub fn set_sync_hands(&mut self, sync_hands: usize) {
        for f in &mut self.filters {
            if let Filter::Number(nf) = f {
                *nf = nf.clone().with_sync_hands(sync_hands);
            }
        }
    }

    /// Drop all built-ins (whatever parameters they were made for) and add the
    /// ones `params` and `toggles` call for. User filters keep their order.
    pub fn reconcile(&mut self, params: &GenerationParameters, toggles: BuiltinToggles) {
        self.filters.retain(|f| BuiltinKind::recognize(f).is_none());
        let layout = params.layout();
        for kind in BuiltinKind::ALL {
            if kind.wanted(params, toggles) {
                self.add(kind.filter(layout));
            }
        }
    }

    /// Clear user filters and start over with built-ins only.
    pub fn reset(&mut self, params: &GenerationParameters, toggles: BuiltinToggles) {
        self.clear();
        self.reconcile(params, toggles);
    }
}

impl FromIterator<Filter> for FilterList {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        let mut list = Self::new();
        for f in iter {
            list.push(f);
        }
        list
    }
}

impl<'a> IntoIterator for &'a FilterList {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
