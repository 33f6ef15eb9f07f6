use crate::color::ColorAlgebra;
use std::collections::BTreeMap;

/// A set of states where every state carries the (non-empty) color for which it belongs
/// to the set.
///
/// The map never stores an unsatisfiable color, so a state is in the set if and only if
/// [`ColoredStates::get`] returns a value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColoredStates<C> {
    states: BTreeMap<usize, C>,
}

impl<C> Default for ColoredStates<C> {
    fn default() -> Self {
        ColoredStates {
            states: BTreeMap::new(),
        }
    }
}

impl<C: Clone> ColoredStates<C> {
    pub fn new() -> ColoredStates<C> {
        ColoredStates::default()
    }

    /// A single state with the given color (ignored if the color is empty).
    pub fn singleton<A: ColorAlgebra<Color = C>>(
        algebra: &A,
        state: usize,
        color: C,
    ) -> ColoredStates<C> {
        let mut result = ColoredStates::new();
        result.insert(algebra, state, color);
        result
    }

    /// The given states, each with the universal color.
    pub fn with_universal_color<A: ColorAlgebra<Color = C>>(
        algebra: &A,
        states: impl IntoIterator<Item = usize>,
    ) -> ColoredStates<C> {
        let mut result = ColoredStates::new();
        for state in states {
            result.insert(algebra, state, algebra.universal());
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The number of states (regardless of color).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn get(&self, state: usize) -> Option<&C> {
        self.states.get(&state)
    }

    pub fn contains(&self, state: usize) -> bool {
        self.states.contains_key(&state)
    }

    /// States in ascending order.
    pub fn states(&self) -> impl Iterator<Item = usize> + '_ {
        self.states.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &C)> + '_ {
        self.states.iter().map(|(s, c)| (*s, c))
    }

    /// Extend the color of `state` by `color`. Returns `true` if the set changed.
    pub fn insert<A: ColorAlgebra<Color = C>>(
        &mut self,
        algebra: &A,
        state: usize,
        color: C,
    ) -> bool {
        if !algebra.is_satisfiable(&color) {
            return false;
        }
        match self.states.get(&state) {
            None => {
                self.states.insert(state, color);
                true
            }
            Some(current) if algebra.is_subset(&color, current) => false,
            Some(current) => {
                let updated = algebra.canonicalize(&algebra.union(current, &color));
                self.states.insert(state, updated);
                true
            }
        }
    }

    pub fn union<A: ColorAlgebra<Color = C>>(
        &self,
        algebra: &A,
        other: &ColoredStates<C>,
    ) -> ColoredStates<C> {
        let mut result = self.clone();
        for (state, color) in other.iter() {
            result.insert(algebra, state, color.clone());
        }
        result
    }
}
