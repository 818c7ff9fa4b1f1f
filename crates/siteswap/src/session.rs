//! Generation sessions: lifecycle, cancellation and result delivery.
//!
//! Purpose
//! - One session runs one search (exhaustive or random) over a snapshot of
//!   `GenerationParameters` and a `FilterList`, either on the caller's thread
//!   (`run`) or on a worker thread (`start`).
//! - Status moves `Idle -> Running -> {Completed, TimedOut, ResultCapReached,
//!   Cancelled}` and never leaves a terminal state.
//!
//! Cancellation
//! - A shared flag the engines poll at the same checkpoints as the deadline.
//! - `cancel` flips the status to `Cancelled` right away. A worker finishing
//!   afterwards reports `Cancelled` too, and the status does not change again.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::info;

use crate::filter::FilterList;
use crate::params::{GenerationParameters, InvalidParameterError};
use crate::pattern::Siteswap;
use crate::search::{exhaustive, random, Budget, SearchCfg, SearchSpace, Termination};

/// Observable lifecycle state of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
    Completed,
    TimedOut,
    ResultCapReached,
    Cancelled,
}

impl SessionStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Idle | Self::Running)
    }
}

impl From<Termination> for SessionStatus {
    fn from(t: Termination) -> Self {
        match t {
            Termination::Completed => Self::Completed,
            Termination::TimedOut => Self::TimedOut,
            Termination::ResultCapReached => Self::ResultCapReached,
            Termination::Cancelled => Self::Cancelled,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::TimedOut => "timed out",
            Self::ResultCapReached => "result cap reached",
            Self::Cancelled => "cancelled",
        })
    }
}

/// Cooperative cancellation flag shared with a running search.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a finished session.
#[derive(Clone, Debug)]
pub struct Generation {
    /// Accepted sequences, canonical, no two rotations of each other.
    pub results: Vec<Siteswap>,
    pub termination: Termination,
    /// Search steps taken (one per throw tried).
    pub steps: u64,
    pub elapsed: Duration,
    /// Seed of a random session, for replay.
    pub seed: Option<u64>,
}

/// Cloneable view of a session for other threads: status and cancellation.
#[derive(Clone, Debug, Default)]
pub struct SessionMonitor {
    status: Arc<Mutex<SessionStatus>>,
    cancel: CancelHandle,
}

impl SessionMonitor {
    pub fn status(&self) -> SessionStatus {
        *self.lock()
    }

    /// Request cancellation; a running session reports `Cancelled` from now on.
    pub fn cancel(&self) {
        self.cancel.cancel();
        let mut status = self.lock();
        if !status.is_terminal() {
            *status = SessionStatus::Cancelled;
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SessionStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) {
        let mut status = self.lock();
        if *status == SessionStatus::Idle {
            *status = SessionStatus::Running;
        }
    }

    /// Record the engine's termination unless a cancel got there first.
    fn finish(&self, termination: Termination) -> Termination {
        let mut status = self.lock();
        if *status == SessionStatus::Cancelled {
            return Termination::Cancelled;
        }
        *status = termination.into();
        termination
    }
}

/// A session that has not started yet.
#[derive(Debug, Default)]
pub struct GenerationSession {
    cfg: SearchCfg,
    monitor: SessionMonitor,
}

impl GenerationSession {
    pub fn new(cfg: SearchCfg) -> Self {
        Self {
            cfg,
            monitor: SessionMonitor::default(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.monitor.status()
    }

    pub fn monitor(&self) -> SessionMonitor {
        self.monitor.clone()
    }

    pub fn cancel(&self) {
        self.monitor.cancel();
    }

    /// Validate, then search on the current thread until a termination condition hits.
    pub fn run(
        self,
        params: &GenerationParameters,
        filters: &FilterList,
    ) -> Result<Generation, InvalidParameterError> {
        params.validate()?;
        self.monitor.begin();
        Ok(execute(&self.cfg, params, filters, &self.monitor))
    }

    /// Validate, then search on a worker thread. Inputs are moved into the
    /// session, so later edits by the caller cannot reach the search.
    pub fn start(
        self,
        params: GenerationParameters,
        filters: FilterList,
    ) -> Result<SessionHandle, InvalidParameterError> {
        params.validate()?;
        self.monitor.begin();
        let monitor = self.monitor.clone();
        let cfg = self.cfg;
        let worker = thread::spawn(move || execute(&cfg, &params, &filters, &monitor));
        Ok(SessionHandle {
            monitor: self.monitor,
            worker,
        })
    }
}

/// A session running on a worker thread.
#[derive(Debug)]
pub struct SessionHandle {
    monitor: SessionMonitor,
    worker: JoinHandle<Generation>,
}

impl SessionHandle {
    pub fn status(&self) -> SessionStatus {
        self.monitor.status()
    }

    pub fn monitor(&self) -> SessionMonitor {
        self.monitor.clone()
    }

    pub fn cancel(&self) {
        self.monitor.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker and take its results.
    pub fn join(self) -> Generation {
        match self.worker.join() {
            Ok(generation) => generation,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// One blocking session with `cfg`; see `GenerationSession::run`.
pub fn generate(
    params: &GenerationParameters,
    filters: &FilterList,
    cfg: SearchCfg,
) -> Result<Generation, InvalidParameterError> {
    GenerationSession::new(cfg).run(params, filters)
}

fn execute(
    cfg: &SearchCfg,
    params: &GenerationParameters,
    filters: &FilterList,
    monitor: &SessionMonitor,
) -> Generation {
    let started = Instant::now();
    info!(
        period = params.period_length,
        objects = params.number_of_objects,
        min = params.min_throw,
        max = params.max_throw,
        jugglers = params.number_of_jugglers,
        sync = params.is_sync_pattern,
        random = params.is_random_generation,
        filters = filters.len(),
        "generation started"
    );
    let space = SearchSpace::new(params, filters);
    let mut budget = Budget::new(params, cfg, monitor.cancel_handle());
    let outcome = if params.is_random_generation {
        random::search(&space, &mut budget, cfg)
    } else {
        exhaustive::search(&space, &mut budget)
    };
    let termination = monitor.finish(outcome.termination);
    let elapsed = started.elapsed();
    info!(
        %termination,
        results = outcome.results.len(),
        steps = outcome.steps,
        elapsed_ms = elapsed.as_millis() as u64,
        "generation finished"
    );
    Generation {
        results: outcome.results,
        termination,
        steps: outcome.steps,
        elapsed,
        seed: outcome.seed,
    }
}
