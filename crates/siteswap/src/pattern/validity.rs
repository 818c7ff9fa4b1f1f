//! Validity checking: average theorem plus a closed state walk.
//!
//! The walk starts from the empty state. Throws from an empty hand are
//! recorded as *injected* positions: their object must come from an earlier
//! period. After one period the objects still in the air are folded onto the
//! positions they land on (modulo the period). The cycle closes iff the fold
//! is collision-free and hits exactly the injected positions, i.e. every
//! landing in the repeated pattern is caught by exactly one throw.

use std::fmt;

use crate::cfg::{MAX_PERIOD_LIMIT, MAX_THROW_LIMIT};
use crate::params::Layout;
use crate::state::{CollisionError, JugglingState};

/// Reason a sequence is not a siteswap for the requested object count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidityError {
    Empty,
    TooLong { period: usize },
    TooHigh { height: u32 },
    /// Sync mode: the period does not cover whole beats.
    PartialBeat { period: usize, hands_per_beat: usize },
    /// Sum does not match `objects * period`.
    Average { sum: u64, expected: u64 },
    /// Sync mode: a throw lands within its own beat.
    SameBeat { position: usize },
    Collision {
        position: usize,
        cause: CollisionError,
    },
    /// Objects left in the air do not line up with the next period.
    OpenCycle,
}

impl fmt::Display for ValidityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty sequence"),
            Self::TooLong { period } => {
                write!(f, "period {period} exceeds {MAX_PERIOD_LIMIT}")
            }
            Self::TooHigh { height } => write!(f, "throw {height} exceeds {MAX_THROW_LIMIT}"),
            Self::PartialBeat {
                period,
                hands_per_beat,
            } => write!(
                f,
                "period {period} is not a multiple of {hands_per_beat} hands per beat"
            ),
            Self::Average { sum, expected } => {
                write!(f, "throw sum {sum} does not match {expected}")
            }
            Self::SameBeat { position } => {
                write!(f, "throw at position {position} lands in its own beat")
            }
            Self::Collision { position, cause } => {
                write!(f, "collision at position {position}: {cause}")
            }
            Self::OpenCycle => write!(f, "pattern does not repeat without collisions"),
        }
    }
}

impl std::error::Error for ValidityError {}

/// True if `sequence` is a valid siteswap for `objects` objects.
pub fn is_valid(sequence: &[u32], objects: u32, jugglers: usize, sync: bool) -> bool {
    check_validity(sequence, objects, Layout::new(jugglers, sync)).is_ok()
}

/// Like `is_valid`, but reports the first violated rule.
pub fn check_validity(sequence: &[u32], objects: u32, layout: Layout) -> Result<(), ValidityError> {
    let period = sequence.len();
    if period == 0 {
        return Err(ValidityError::Empty);
    }
    if period > MAX_PERIOD_LIMIT {
        return Err(ValidityError::TooLong { period });
    }
    if let Some(&height) = sequence.iter().find(|&&h| h > MAX_THROW_LIMIT) {
        return Err(ValidityError::TooHigh { height });
    }
    if period % layout.hands_per_beat != 0 {
        return Err(ValidityError::PartialBeat {
            period,
            hands_per_beat: layout.hands_per_beat,
        });
    }
    // Cheap reject before simulating.
    let sum: u64 = sequence.iter().map(|&h| u64::from(h)).sum();
    let expected = u64::from(objects) * period as u64;
    if sum != expected {
        return Err(ValidityError::Average { sum, expected });
    }

    let mut state = JugglingState::EMPTY;
    let mut injected = 0u128;
    for (position, &h) in sequence.iter().enumerate() {
        if !layout.lands_in_later_beat(position, h) {
            return Err(ValidityError::SameBeat { position });
        }
        if h > 0 && !state.lands_now() {
            injected |= 1u128 << position;
        }
        state = state
            .step(h)
            .map_err(|cause| ValidityError::Collision { position, cause })?;
    }
    if closes_cycle(state, injected, period) {
        Ok(())
    } else {
        Err(ValidityError::OpenCycle)
    }
}

/// Mask with the lowest `count` bits set.
#[inline]
pub(crate) fn position_mask(count: usize) -> u128 {
    if count >= u128::BITS as usize {
        u128::MAX
    } else {
        (1u128 << count) - 1
    }
}

/// Fold landing offsets onto period positions; `None` if two objects share one.
pub(crate) fn fold_positions(mut bits: u128, period: usize) -> Option<u128> {
    let mut folded = 0u128;
    while bits != 0 {
        let k = bits.trailing_zeros() as usize;
        bits &= bits - 1;
        let p = 1u128 << (k % period);
        if folded & p != 0 {
            return None;
        }
        folded |= p;
    }
    Some(folded)
}

/// `end` is the state after a full period walked from empty.
#[inline]
pub(crate) fn closes_cycle(end: JugglingState, injected: u128, period: usize) -> bool {
    fold_positions(end.bits(), period) == Some(injected)
}
