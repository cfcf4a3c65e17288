//! External termination via a shared cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{Termination, TerminationReason};
use crate::statistics::StatisticsCollector;

/// Cloneable handle for cancelling a running search from another thread.
///
/// # Example
///
/// ```
/// use dishes_solver::termination::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
///
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Terminates when its cancellation token is triggered.
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    token: CancellationToken,
}

impl ExternalTermination {
    /// Creates a termination that checks the given token.
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }
}

impl Termination for ExternalTermination {
    fn check(&self, _stats: &StatisticsCollector) -> Option<TerminationReason> {
        self.token
            .is_cancelled()
            .then_some(TerminationReason::Cancelled)
    }
}
