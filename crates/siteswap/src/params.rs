//! Generation parameters, their validation, and the juggler/hand layout.
//!
//! Conventions
//! - Sequences use global notation: position `i` is thrown by juggler
//!   `i mod jugglers` and a throw of height `h` lands at position `i + h`.
//! - In sync mode all jugglers throw together, so one beat spans
//!   `hands_per_beat = jugglers` positions; otherwise one position is one beat.
//! - `number_of_objects` counts all objects of all jugglers.

use std::fmt;
use std::time::Duration;

use crate::cfg::{MAX_JUGGLERS, MAX_PERIOD_LIMIT, MAX_THROW_LIMIT};

/// Parameter a validation failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamField {
    PeriodLength,
    MinThrow,
    MaxThrow,
    NumberOfObjects,
    NumberOfJugglers,
    MaxResults,
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PeriodLength => "period_length",
            Self::MinThrow => "min_throw",
            Self::MaxThrow => "max_throw",
            Self::NumberOfObjects => "number_of_objects",
            Self::NumberOfJugglers => "number_of_jugglers",
            Self::MaxResults => "max_results",
        };
        f.write_str(name)
    }
}

/// Caller-supplied values violate the documented constraints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidParameterError {
    pub field: ParamField,
    pub reason: String,
}

impl InvalidParameterError {
    fn new(field: ParamField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InvalidParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.reason)
    }
}

impl std::error::Error for InvalidParameterError {}

/// Input of one generation session. Read-only while the session runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationParameters {
    pub period_length: usize,
    pub min_throw: u32,
    pub max_throw: u32,
    pub number_of_objects: u32,
    pub number_of_jugglers: usize,
    pub is_sync_pattern: bool,
    pub is_random_generation: bool,
    pub max_results: usize,
    pub timeout_seconds: u64,
}

impl Default for GenerationParameters {
    /// Seven objects, period five, two jugglers passing asynchronously.
    fn default() -> Self {
        Self {
            period_length: 5,
            min_throw: 2,
            max_throw: 10,
            number_of_objects: 7,
            number_of_jugglers: 2,
            is_sync_pattern: false,
            is_random_generation: false,
            max_results: 100,
            timeout_seconds: 5,
        }
    }
}

impl GenerationParameters {
    /// Check ranges before any search work starts.
    pub fn validate(&self) -> Result<(), InvalidParameterError> {
        use ParamField::*;
        if self.period_length < 1 {
            return Err(InvalidParameterError::new(PeriodLength, "must be at least 1"));
        }
        if self.number_of_objects < 1 {
            return Err(InvalidParameterError::new(NumberOfObjects, "must be at least 1"));
        }
        if self.number_of_jugglers < 1 || self.number_of_jugglers > MAX_JUGGLERS {
            return Err(InvalidParameterError::new(
                NumberOfJugglers,
                format!("must be in [1, {MAX_JUGGLERS}]"),
            ));
        }
        if self.max_throw < self.number_of_objects {
            return Err(InvalidParameterError::new(
                MaxThrow,
                "must not be smaller than the number of objects",
            ));
        }
        if self.min_throw > self.number_of_objects {
            return Err(InvalidParameterError::new(
                MinThrow,
                "must not be greater than the number of objects",
            ));
        }
        if self.max_throw > MAX_THROW_LIMIT {
            return Err(InvalidParameterError::new(
                MaxThrow,
                format!("must be at most {MAX_THROW_LIMIT}"),
            ));
        }
        if self.period_length > MAX_PERIOD_LIMIT {
            return Err(InvalidParameterError::new(
                PeriodLength,
                format!("must be at most {MAX_PERIOD_LIMIT}"),
            ));
        }
        if self.period_length % self.hands_per_beat() != 0 {
            return Err(InvalidParameterError::new(
                PeriodLength,
                format!(
                    "sync patterns need a multiple of {} throws per period",
                    self.hands_per_beat()
                ),
            ));
        }
        if self.max_results < 1 {
            return Err(InvalidParameterError::new(MaxResults, "must be at least 1"));
        }
        Ok(())
    }

    /// Positions thrown simultaneously on one beat.
    #[inline]
    pub fn hands_per_beat(&self) -> usize {
        if self.is_sync_pattern {
            self.number_of_jugglers
        } else {
            1
        }
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        Layout::new(self.number_of_jugglers, self.is_sync_pattern)
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Required throw sum of one period (average theorem in global notation).
    #[inline]
    pub fn target_sum(&self) -> u64 {
        u64::from(self.number_of_objects) * self.period_length as u64
    }
}

/// Role of a throw with respect to the thrower's hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandRole {
    /// Height `0`: the hand stays empty.
    Hold,
    /// Lands in the hand on the same side as the throwing hand.
    Straight,
    /// Lands in the hand on the other side.
    Cross,
}

/// Mapping from positions to jugglers, hands, and beats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    pub jugglers: usize,
    pub hands_per_beat: usize,
}

impl Layout {
    pub fn new(jugglers: usize, sync: bool) -> Self {
        let jugglers = jugglers.max(1);
        Self {
            jugglers,
            hands_per_beat: if sync { jugglers } else { 1 },
        }
    }

    pub const SOLO: Self = Self {
        jugglers: 1,
        hands_per_beat: 1,
    };

    #[inline]
    pub fn is_sync(&self) -> bool {
        self.hands_per_beat > 1
    }

    #[inline]
    pub fn juggler_of(&self, position: usize) -> usize {
        position % self.jugglers
    }

    /// Slot of `position` within its beat (the synchronous hand index).
    #[inline]
    pub fn sync_hand_of(&self, position: usize) -> usize {
        position % self.hands_per_beat
    }

    /// Each juggler alternates hands on consecutive own positions.
    #[inline]
    pub fn hand_side_of(&self, position: usize) -> usize {
        (position / self.jugglers) % 2
    }

    /// True if the throw lands on another juggler.
    #[inline]
    pub fn is_pass(&self, height: u32) -> bool {
        height as usize % self.jugglers != 0
    }

    pub fn hand_role(&self, position: usize, height: u32) -> HandRole {
        if height == 0 {
            return HandRole::Hold;
        }
        let from = self.hand_side_of(position);
        let to = self.hand_side_of(position + height as usize);
        if from == to {
            HandRole::Straight
        } else {
            HandRole::Cross
        }
    }

    /// A non-zero throw must not land within the beat it was thrown on.
    #[inline]
    pub fn lands_in_later_beat(&self, position: usize, height: u32) -> bool {
        height == 0 || self.sync_hand_of(position) + height as usize >= self.hands_per_beat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solo(period: usize, min: u32, max: u32, objects: u32) -> GenerationParameters {
        GenerationParameters {
            period_length: period,
            min_throw: min,
            max_throw: max,
            number_of_objects: objects,
            number_of_jugglers: 1,
            ..GenerationParameters::default()
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(GenerationParameters::default().validate().is_ok());
    }

    #[test]
    fn range_checks_name_the_field() {
        let cases = [
            (solo(0, 0, 5, 3), ParamField::PeriodLength),
            (solo(3, 0, 5, 0), ParamField::NumberOfObjects),
            (solo(3, 0, 2, 3), ParamField::MaxThrow),
            (solo(3, 4, 5, 3), ParamField::MinThrow),
            (solo(3, 0, MAX_THROW_LIMIT + 1, 3), ParamField::MaxThrow),
            (solo(MAX_PERIOD_LIMIT + 1, 0, 5, 3), ParamField::PeriodLength),
        ];
        for (params, field) in cases {
            let err = params.validate().unwrap_err();
            assert_eq!(err.field, field, "{err}");
        }
        let mut p = solo(3, 0, 5, 3);
        p.number_of_jugglers = 11;
        assert_eq!(p.validate().unwrap_err().field, ParamField::NumberOfJugglers);
        p.number_of_jugglers = 0;
        assert_eq!(p.validate().unwrap_err().field, ParamField::NumberOfJugglers);
        let mut p = solo(3, 0, 5, 3);
        p.max_results = 0;
        assert_eq!(p.validate().unwrap_err().field, ParamField::MaxResults);
    }

    #[test]
    fn sync_period_must_cover_whole_beats() {
        let mut p = solo(3, 0, 6, 3);
        p.number_of_jugglers = 2;
        p.is_sync_pattern = true;
        assert_eq!(p.validate().unwrap_err().field, ParamField::PeriodLength);
        p.period_length = 4;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn layout_roles_follow_parity_convention() {
        let solo = Layout::SOLO;
        assert_eq!(solo.hand_role(0, 0), HandRole::Hold);
        assert_eq!(solo.hand_role(0, 3), HandRole::Cross);
        assert_eq!(solo.hand_role(1, 4), HandRole::Straight);
        let pair = Layout::new(2, false);
        assert!(pair.is_pass(3));
        assert!(!pair.is_pass(4));
        // local 1 crosses, local 2 stays in the same hand
        assert_eq!(pair.hand_role(0, 2), HandRole::Cross);
        assert_eq!(pair.hand_role(1, 4), HandRole::Straight);
    }

    #[test]
    fn sync_throws_leave_their_beat() {
        let sync = Layout::new(2, true);
        assert!(!sync.lands_in_later_beat(0, 1));
        assert!(sync.lands_in_later_beat(1, 1));
        assert!(sync.lands_in_later_beat(0, 2));
        assert!(sync.lands_in_later_beat(0, 0));
        assert!(Layout::SOLO.lands_in_later_beat(0, 1));
    }
}
