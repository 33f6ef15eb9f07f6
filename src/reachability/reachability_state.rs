use crate::reachability::ColoredStates;

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachabilityState<C> {
    pub iteration: usize,
    pub set: ColoredStates<C>,
}

impl<C> From<ColoredStates<C>> for ReachabilityState<C> {
    fn from(value: ColoredStates<C>) -> Self {
        ReachabilityState {
            iteration: 0,
            set: value,
        }
    }
}

impl<C: Clone> From<&ColoredStates<C>> for ReachabilityState<C> {
    fn from(value: &ColoredStates<C>) -> Self {
        Self::from(value.clone())
    }
}

impl<C> From<ReachabilityState<C>> for ColoredStates<C> {
    fn from(value: ReachabilityState<C>) -> Self {
        value.set
    }
}
