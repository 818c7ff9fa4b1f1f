//! Throw sequences and the validity checker.
//!
//! Purpose
//! - `Siteswap`: immutable heights read in a `Layout` (jugglers, hands per beat),
//!   with canonical rotation as the pattern's identity.
//! - `is_valid` / `check_validity`: pure functions deciding whether a sequence
//!   is a siteswap for a given object count, juggler count, and synchrony.
//!
//! Rules
//! - Average theorem in global notation: `sum == objects * period`. Kept as a
//!   cheap early reject even though the walk below implies it.
//! - Closed walk: simulate one period on `JugglingState` from empty; no
//!   collisions, and the objects left in the air must land exactly on the
//!   positions that threw from an empty hand.

mod siteswap;
mod validity;

pub use siteswap::{Siteswap, SiteswapParseError, Throw};
pub use validity::{check_validity, is_valid, ValidityError};

pub(crate) use siteswap::{canonical_offset, is_canonical};
pub(crate) use validity::{closes_cycle, fold_positions, position_mask};

#[cfg(test)]
mod tests;
