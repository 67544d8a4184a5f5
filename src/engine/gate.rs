//! Mutual exclusion for the one shared engine resource.
//!
//! Every engine call in the process must pass through one gate: the
//! native side is stateful and non-reentrant, so at most one logical
//! call may be in flight. The gate waits a bounded time and then gives
//! up with a [`GateTimeout`], a resource-contention failure distinct
//! from anything the engine itself can report, so callers can retry
//! instead of treating it as a data error.

use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use thiserror::Error;

/// Default bound on how long a caller waits for exclusive access.
pub const DEFAULT_GATE_TIMEOUT: Duration = Duration::from_secs(15);

/// The gate could not be acquired within its bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out after waiting {waited:?} for exclusive engine access")]
pub struct GateTimeout {
    pub waited: Duration,
}

/// A bounded-wait mutex over the engine backend.
#[derive(Debug)]
pub struct ConcurrencyGate<T> {
    inner: Mutex<T>,
    timeout: Duration,
}

impl<T> ConcurrencyGate<T> {
    pub fn new(value: T) -> Self {
        Self::with_timeout(value, DEFAULT_GATE_TIMEOUT)
    }

    pub fn with_timeout(value: T, timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(value),
            timeout,
        }
    }

    /// Acquires exclusive access, waiting at most the configured bound.
    ///
    /// There is no cancellation once the guard is handed out; it is held
    /// until dropped.
    pub fn acquire(&self) -> Result<MutexGuard<'_, T>, GateTimeout> {
        self.inner
            .try_lock_for(self.timeout)
            .ok_or(GateTimeout {
                waited: self.timeout,
            })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
