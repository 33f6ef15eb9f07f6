//! Colored reachability in a parametrized transition system.
//!
//! The result of a reachability procedure is a [`ColoredStates`] map: for every reached
//! state, the set of parameter valuations for which the state is reachable. Every step
//! extends the current set by its image over the transition system, restricted by the
//! edge colors, until no new state/color pair can be added.
//!
//! # Type Aliases
//!
//!  - [`ForwardReachability`]: everything reachable from the initial set.
//!  - [`BackwardReachability`]: everything that can reach the initial set.
//!
//! # Example
//!
//! ```no_run
//! use biodivine_ode_generator::algorithm_trait::Algorithm;
//! use biodivine_ode_generator::model::OdeModel;
//! use biodivine_ode_generator::reachability::{ColoredStates, ForwardReachability};
//! use biodivine_ode_generator::transitions::{OdeTransitionSystem, TransitionSystem};
//! use std::sync::Arc;
//!
//! # fn load_model() -> OdeModel { unimplemented!() }
//! let system = Arc::new(OdeTransitionSystem::new(&load_model()).unwrap());
//! let initial = ColoredStates::with_universal_color(system.algebra(), [0]);
//! let reachable = ForwardReachability::<OdeTransitionSystem>::configure(&system, initial)
//!     .run()
//!     .unwrap();
//! ```


mod colored_states;
mod iterative_union;
mod reachability_config;
mod reachability_error;
mod reachability_state;
mod step_operators;

pub use colored_states::ColoredStates;
pub use iterative_union::IterativeUnion;
pub use reachability_config::ReachabilityConfig;
pub use reachability_error::ReachabilityError;
pub use reachability_state::ReachabilityState;
pub use step_operators::{BfsPredecessors, BfsSuccessors};

use crate::transitions::{SystemColor, TransitionSystem};

/// Forward reachability, exploring the system layer by layer.
pub type ForwardReachability<T> = IterativeUnion<T, BfsSuccessors>;

/// Backward reachability, exploring the system layer by layer.
pub type BackwardReachability<T> = IterativeUnion<T, BfsPredecessors>;

/// Used to reduce code repetition in various reachability-like algorithms.
///
/// Implementors define a single step of a reachability procedure, which is then
/// iterated by higher-level algorithms like [`IterativeUnion`].
pub trait ReachabilityStep<T: TransitionSystem> {
    /// Perform a single step of reachability computation.
    ///
    /// Returns the newly discovered state/color pairs (not already in `state`),
    /// or an empty set if nothing new can be reached.
    fn step(
        context: &ReachabilityConfig<T>,
        state: &ColoredStates<SystemColor<T>>,
    ) -> ColoredStates<SystemColor<T>>;
}
