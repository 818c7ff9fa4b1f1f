//! Limits and tuning defaults (internal).
//!
//! Policy
//! - Hard limits follow from the `u128` bitsets used by the walker; they are
//!   enforced by parameter validation so the engines never see larger inputs.
//! - Tuning defaults seed `SearchCfg::default()`; callers override them per
//!   session instead of editing these constants.

/// Largest supported throw height. A throw of height `h` occupies bit `h - 1`
/// of the post-step state, and the walker keeps one spare bit for the shift.
pub const MAX_THROW_LIMIT: u32 = 127;
/// Largest supported period. Positions are tracked in a `u128` mask.
pub const MAX_PERIOD_LIMIT: usize = 128;
/// Largest supported number of jugglers (caller contract, mirrored here).
pub const MAX_JUGGLERS: usize = 10;

/// Search steps between two deadline/cancellation polls.
pub(crate) const DEFAULT_CHECK_INTERVAL: u64 = 1024;
/// Consecutive non-novel random draws after which the sampled space is
/// considered exhausted.
pub(crate) const DEFAULT_STALE_DRAW_LIMIT: u64 = 50_000;
