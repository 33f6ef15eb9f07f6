use crate::algorithm_trait::Algorithm;
use crate::reachability::{
    ColoredStates, ReachabilityConfig, ReachabilityError, ReachabilityState, ReachabilityStep,
};
use crate::transitions::{SystemColor, TransitionSystem};
use crate::{log_set, simple_type_name};
use log::debug;
use std::marker::PhantomData;

/// A helper implementation of [`Algorithm`] that repeatedly calls a [`ReachabilityStep`]
/// function, collecting the results into the current `state`.
pub struct IterativeUnion<T: TransitionSystem, S: ReachabilityStep<T>> {
    context: ReachabilityConfig<T>,
    state: ReachabilityState<SystemColor<T>>,
    _step: PhantomData<S>,
}

impl<T: TransitionSystem, S: ReachabilityStep<T>> IterativeUnion<T, S> {
    /// Create the algorithm from anything that converts into its configuration
    /// and initial state.
    pub fn configure<I1, I2>(context: I1, initial_state: I2) -> Self
    where
        I1: Into<ReachabilityConfig<T>>,
        I2: Into<ReachabilityState<SystemColor<T>>>,
    {
        Self::create((context.into(), initial_state.into()))
    }

    /// The intermediate state of the computation.
    pub fn state(&self) -> &ReachabilityState<SystemColor<T>> {
        &self.state
    }
}

impl<T: TransitionSystem, S: ReachabilityStep<T>> Algorithm for IterativeUnion<T, S> {
    type State = (ReachabilityConfig<T>, ReachabilityState<SystemColor<T>>);
    type Output = ColoredStates<SystemColor<T>>;
    type Error = ReachabilityError;

    fn create(initial_state: Self::State) -> Self {
        let (context, state) = initial_state;
        IterativeUnion {
            context,
            state,
            _step: PhantomData,
        }
    }

    fn advance(&mut self) -> Result<Option<Self::Output>, ReachabilityError> {
        let state = &mut self.state;
        if state.iteration >= self.context.max_iterations {
            debug!(
                "[iteration:{}] Union<{}> canceled (exceeded iteration count).",
                state.iteration,
                simple_type_name::<S>()
            );

            return Err(ReachabilityError::IterationLimit {
                limit: self.context.max_iterations,
            });
        } else {
            state.iteration += 1;
        }

        let to_union = S::step(&self.context, &state.set);
        if to_union.is_empty() {
            debug!(
                "[iteration:{}] Union<{}> finished with ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_set(&state.set)
            );

            Ok(Some(state.set.clone()))
        } else {
            let algebra = self.context.system.algebra();
            state.set = state.set.union(algebra, &to_union);

            debug!(
                "[iteration:{}] Union<{}> increased to ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_set(&state.set)
            );

            Ok(None)
        }
    }
}
