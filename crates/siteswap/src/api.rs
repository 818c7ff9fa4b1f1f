//! Curated API surface (UNSTABLE).
//!
//! Prefer these re-exports over deep module paths; the module layout behind
//! them may change.

// Sequences and validity
pub use crate::pattern::{
    check_validity, is_valid, Siteswap, SiteswapParseError, Throw, ValidityError,
};
pub use crate::state::{CollisionError, JugglingState, LegalThrows};
// Parameters
pub use crate::cfg::{MAX_JUGGLERS, MAX_PERIOD_LIMIT, MAX_THROW_LIMIT};
pub use crate::params::{GenerationParameters, HandRole, InvalidParameterError, Layout, ParamField};
// Filters
pub use crate::filter::{
    accepts, BuiltinKind, BuiltinToggles, CountBound, Filter, FilterList, NumberFilter,
    PatternFilter, PatternParseError, PatternToken, Polarity, ThrowMatcher,
};
// Sessions
pub use crate::search::{SearchCfg, Termination};
pub use crate::session::{
    generate, CancelHandle, Generation, GenerationSession, SessionHandle, SessionMonitor,
    SessionStatus,
};
