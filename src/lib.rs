//! Parametrized rectangular abstraction of multi-affine ODE models.
//!
//! The continuous state space of an [`OdeModel`](model::OdeModel) is partitioned by
//! per-variable thresholds into a grid of rectangular cells. The crate computes the
//! transition system over these cells, where every transition is labelled by the set of
//! parameter valuations (a *color*) for which the flow can cross from one cell to the other.
//!
//!  - [`model`]: the model representation and its validation.
//!  - [`color`]: parameter sets and their Boolean algebra.
//!  - [`transitions`]: the lazily computed [`TransitionSystem`](transitions::TransitionSystem).
//!  - [`reachability`]: colored forward/backward reachability on top of a transition system.

use crate::reachability::ColoredStates;

#[cfg(test)]
mod test_utils;

pub mod algorithm_trait;
pub mod color;
pub mod dependency;
pub mod evaluator;
pub mod grid;
pub mod model;
pub mod reachability;
pub mod transitions;

/// A utility method for printing useful metadata of colored sets.
fn log_set<C: Clone>(set: &ColoredStates<C>) -> String {
    format!("states={}", set.len())
}

/// Extract the "simple name" of a type argument at compile time.
///
/// In the future, this should be a `const fn`, but `type_name` and `unwrap_or` are not
/// yet stabilized as `const` functions (even thought they probably are).
fn simple_type_name<T>() -> &'static str {
    std::any::type_name::<T>().split("::").last().unwrap_or("?")
}
