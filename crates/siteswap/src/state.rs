//! Juggling states and the transitions between them.
//!
//! Model
//! - A `JugglingState` is a bitset over future positions: bit `k` set means an
//!   object lands `k` positions from now. Bit 0 is the object arriving in the
//!   hand that throws at the current position.
//! - A throw of height `h > 0` sends an object to bit `h - 1` of the state
//!   after the shift; height `0` throws nothing.
//! - Walks start from the empty state. A non-zero throw from an empty hand is
//!   allowed: it stands for an object that arrives from an earlier period and
//!   is accounted for when the walk closes (see `crate::pattern::closes_cycle`).
//!
//! States are `Copy` values, so `legal_throws` can be restarted from any state
//! without hidden cursor state.

use std::fmt;

use crate::cfg::MAX_THROW_LIMIT;

/// Illegal transition in the state graph. Search code prunes on it; the
/// validity checker reports it as `ValidityError::Collision`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionError {
    /// Another object already lands on the target position.
    Occupied { height: u32 },
    /// An object lands now but the throw is `0`, so it would be dropped.
    Dropped,
    /// The throw does not fit into the state bitset.
    OutOfRange { height: u32 },
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied { height } => write!(f, "throw {height} lands on an occupied beat"),
            Self::Dropped => write!(f, "an object lands on a hold"),
            Self::OutOfRange { height } => {
                write!(f, "throw {height} exceeds the state width {MAX_THROW_LIMIT}")
            }
        }
    }
}

impl std::error::Error for CollisionError {}

/// Occupied future landing positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JugglingState(u128);

impl JugglingState {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    #[inline]
    pub fn bits(self) -> u128 {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of objects in the air.
    #[inline]
    pub fn airborne(self) -> u32 {
        self.0.count_ones()
    }

    /// True if an object lands at the current position.
    #[inline]
    pub fn lands_now(self) -> bool {
        self.0 & 1 == 1
    }

    /// True if an object lands `k` positions from now.
    #[inline]
    pub fn is_set(self, k: u32) -> bool {
        k < u128::BITS && (self.0 >> k) & 1 == 1
    }

    /// Bits landing at least `horizon` positions from now, re-based to the horizon.
    #[inline]
    pub fn beyond(self, horizon: usize) -> u128 {
        if horizon >= u128::BITS as usize {
            0
        } else {
            self.0 >> horizon
        }
    }

    /// Advance one position by throwing `height`.
    pub fn step(self, height: u32) -> Result<Self, CollisionError> {
        if height > MAX_THROW_LIMIT {
            return Err(CollisionError::OutOfRange { height });
        }
        if height == 0 {
            if self.lands_now() {
                return Err(CollisionError::Dropped);
            }
            return Ok(Self(self.0 >> 1));
        }
        // Target bit relative to the current position is `height`.
        if self.is_set(height) {
            return Err(CollisionError::Occupied { height });
        }
        Ok(Self((self.0 >> 1) | (1u128 << (height - 1))))
    }

    /// Non-colliding throws in `[min, max]`, ascending.
    pub fn legal_throws(self, min: u32, max: u32) -> LegalThrows {
        LegalThrows::new(self, min, max)
    }
}

impl fmt::Display for JugglingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = u128::BITS - self.0.leading_zeros();
        if width == 0 {
            return write!(f, "-");
        }
        for k in 0..width {
            f.write_str(if self.is_set(k) { "x" } else { "-" })?;
        }
        Ok(())
    }
}

/// Lazy ascending sequence of legal throw heights from one state.
#[derive(Clone, Debug)]
pub struct LegalThrows {
    state: JugglingState,
    next: u32,
    max: u32,
}

impl LegalThrows {
    fn new(state: JugglingState, min: u32, max: u32) -> Self {
        // A landing object must be thrown again, so `0` is only legal on an empty hand.
        let lo = if state.lands_now() { min.max(1) } else { min };
        Self {
            state,
            next: lo,
            max: max.min(MAX_THROW_LIMIT),
        }
    }
}

impl Iterator for LegalThrows {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while self.next <= self.max {
            let h = self.next;
            self.next += 1;
            if h == 0 || !self.state.is_set(h) {
                return Some(h);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(throws: &[u32]) -> Result<JugglingState, CollisionError> {
        throws
            .iter()
            .try_fold(JugglingState::EMPTY, |s, &h| s.step(h))
    }

    #[test]
    fn step_sets_landing_bit_and_shifts() {
        let s = JugglingState::EMPTY.step(3).unwrap();
        assert_eq!(s.bits(), 0b100);
        let s = s.step(1).unwrap();
        assert_eq!(s.bits(), 0b11);
        assert!(s.lands_now());
    }

    #[test]
    fn collisions_are_reported() {
        assert_eq!(walk(&[2, 1]), Err(CollisionError::Occupied { height: 1 }));
        let s = JugglingState::from_bits(0b1);
        assert_eq!(s.step(0), Err(CollisionError::Dropped));
        assert_eq!(
            JugglingState::EMPTY.step(MAX_THROW_LIMIT + 1),
            Err(CollisionError::OutOfRange {
                height: MAX_THROW_LIMIT + 1
            })
        );
    }

    #[test]
    fn three_cascade_reaches_ground_state() {
        let s = walk(&[3, 3, 3]).unwrap();
        assert_eq!(s.bits(), 0b111);
        assert_eq!(s.airborne(), 3);
        assert_eq!(s.to_string(), "xxx");
    }

    #[test]
    fn legal_throws_are_ascending_and_skip_occupied() {
        let s = JugglingState::from_bits(0b1011);
        let hs: Vec<u32> = s.legal_throws(0, 5).collect();
        assert_eq!(hs, vec![2, 4, 5]);
        // empty hand: a hold is allowed when the range includes 0
        let s = JugglingState::from_bits(0b110);
        let hs: Vec<u32> = s.legal_throws(0, 3).collect();
        assert_eq!(hs, vec![0, 3]);
        let hs: Vec<u32> = s.legal_throws(1, 3).collect();
        assert_eq!(hs, vec![3]);
    }

    #[test]
    fn legal_throws_restart_from_same_state() {
        let s = JugglingState::from_bits(0b101);
        let a: Vec<u32> = s.legal_throws(0, 4).collect();
        let b: Vec<u32> = s.legal_throws(0, 4).collect();
        assert_eq!(a, b);
        assert_eq!(a, vec![1, 3, 4]);
    }
}
