use crate::color::ColorAlgebra;
use crate::log_set;
use crate::reachability::{ColoredStates, ReachabilityConfig, ReachabilityStep};
use crate::transitions::{SystemColor, TransitionSystem};
use log::trace;

/// Computes the direct successors of the current reachable set, excluding values that are
/// already in the reachable set.
pub struct BfsSuccessors;

/// Computes the direct predecessors of the current reachable set, excluding values that are
/// already in the reachable set.
pub struct BfsPredecessors;

impl<T: TransitionSystem> ReachabilityStep<T> for BfsSuccessors {
    fn step(
        context: &ReachabilityConfig<T>,
        state: &ColoredStates<SystemColor<T>>,
    ) -> ColoredStates<SystemColor<T>> {
        let system = context.system.as_ref();
        let mut post = ColoredStates::new();
        for (source, color) in state.iter() {
            for target in system.successors(source) {
                let edge = system.transition_color(source, *target);
                image_step(system, state, &mut post, *target, color, &edge);
            }
        }
        trace!("Successors computed ({}).", log_set(&post));
        post
    }
}

impl<T: TransitionSystem> ReachabilityStep<T> for BfsPredecessors {
    fn step(
        context: &ReachabilityConfig<T>,
        state: &ColoredStates<SystemColor<T>>,
    ) -> ColoredStates<SystemColor<T>> {
        let system = context.system.as_ref();
        let mut pre = ColoredStates::new();
        for (target, color) in state.iter() {
            for source in system.predecessors(target) {
                let edge = system.transition_color(*source, target);
                image_step(system, state, &mut pre, *source, color, &edge);
            }
        }
        trace!("Predecessors computed ({}).", log_set(&pre));
        pre
    }
}

/// Add `color & edge` to `image[state]`, but only the part that is not in `known[state]` yet.
fn image_step<T: TransitionSystem>(
    system: &T,
    known: &ColoredStates<SystemColor<T>>,
    image: &mut ColoredStates<SystemColor<T>>,
    state: usize,
    color: &SystemColor<T>,
    edge: &SystemColor<T>,
) {
    let algebra = system.algebra();
    let reached = algebra.intersect(color, edge);
    let new = match known.get(state) {
        Some(current) => algebra.minus(&reached, current),
        None => reached,
    };
    image.insert(algebra, state, new);
}
