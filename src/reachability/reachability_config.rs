use crate::transitions::TransitionSystem;
use std::sync::Arc;

/// A "flat" configuration object for colored reachability problems.
pub struct ReachabilityConfig<T: TransitionSystem> {
    /// The transition system explored by the reachability procedure.
    ///
    /// # Panics
    ///
    /// The procedure is allowed to panic if initialized with states that do not belong
    /// to this system.
    pub system: Arc<T>,
    /// Stop the procedure with an error if it exceeds the specified number of iterations
    /// (default: `usize::MAX`).
    pub max_iterations: usize,
}

impl<T: TransitionSystem> Clone for ReachabilityConfig<T> {
    fn clone(&self) -> Self {
        ReachabilityConfig {
            system: self.system.clone(),
            max_iterations: self.max_iterations,
        }
    }
}

impl<T: TransitionSystem> From<Arc<T>> for ReachabilityConfig<T> {
    fn from(value: Arc<T>) -> Self {
        ReachabilityConfig::new(value)
    }
}

impl<T: TransitionSystem> From<&Arc<T>> for ReachabilityConfig<T> {
    fn from(value: &Arc<T>) -> Self {
        ReachabilityConfig::new(value.clone())
    }
}

impl<T: TransitionSystem> ReachabilityConfig<T> {
    /// Create a new instance of [`ReachabilityConfig`] without an iteration limit.
    pub fn new(system: Arc<T>) -> ReachabilityConfig<T> {
        ReachabilityConfig {
            system,
            max_iterations: usize::MAX,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> ReachabilityConfig<T> {
        self.max_iterations = max_iterations;
        self
    }
}
