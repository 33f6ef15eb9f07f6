use thiserror::Error;

/// The reason why a reachability procedure did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReachabilityError {
    #[error("reachability exceeded the limit of {limit} iterations")]
    IterationLimit { limit: usize },
}
