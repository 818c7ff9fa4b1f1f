//! Siteswap generation and filtering engine.
//!
//! Enumerates (exhaustively or by random sampling) the periodic throw
//! sequences that are valid siteswaps for a given period, throw range, object
//! count and juggler count, in async or sync mode, and keeps those that pass a
//! user-configured filter pipeline. One representative per cyclic class is
//! emitted: its canonical (lexicographically smallest) rotation.
//!
//! Layout
//! - `state`: the landing-schedule bitset the searches walk.
//! - `pattern`: `Siteswap` values and the validity checker.
//! - `params`: generation parameters, validation and the hand layout.
//! - `filter`: number/pattern filters and the `FilterList` pipeline.
//! - `search`: exhaustive and random engines under a shared budget.
//! - `session`: lifecycle, cancellation and worker threads.
//!
//! API Policy
//! - `api` and `prelude` are the curated surfaces; module paths may move.

pub mod api;
pub mod cfg;
pub mod filter;
pub mod params;
pub mod pattern;
pub mod search;
pub mod session;
pub mod state;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use params::{GenerationParameters, InvalidParameterError};
pub use pattern::Siteswap;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::filter::{
        BuiltinKind, BuiltinToggles, CountBound, Filter, FilterList, NumberFilter, PatternFilter,
        Polarity, ThrowMatcher,
    };
    pub use crate::params::{GenerationParameters, InvalidParameterError, Layout};
    pub use crate::pattern::{check_validity, is_valid, Siteswap};
    pub use crate::search::{SearchCfg, Termination};
    pub use crate::session::{generate, Generation, GenerationSession, SessionStatus};
}
