//! Parametrized transition system of the rectangular abstraction.
//!
//! The states of the system are the cells of the threshold grid. A transition between two
//! adjacent cells is enabled for those parameter valuations (colors) for which the flow
//! crosses the shared facet in the right direction. Every state additionally has a
//! self-loop, unless the flow is guaranteed to leave the cell for all parameters.
//!
//! The main implementation is [`OdeTransitionSystem`], which computes everything lazily
//! and caches the results. It can be safely queried from multiple threads.

mod facet_table;
mod generator_config;
mod ode_transition_system;

#[cfg(test)]
mod tests;

pub use generator_config::GeneratorConfig;
pub use ode_transition_system::OdeTransitionSystem;

use crate::color::ColorAlgebra;

/// The color type used by a [`TransitionSystem`].
pub type SystemColor<T> = <<T as TransitionSystem>::Algebra as ColorAlgebra>::Color;

/// A graph over `0..state_count()` where every edge is labelled by a color.
pub trait TransitionSystem: Send + Sync {
    type Algebra: ColorAlgebra;

    fn algebra(&self) -> &Self::Algebra;

    fn state_count(&self) -> usize;

    /// All states reachable from `state` in one step, for at least one parameter valuation.
    fn successors(&self, state: usize) -> &[usize];

    /// All states that reach `state` in one step, for at least one parameter valuation.
    fn predecessors(&self, state: usize) -> &[usize];

    /// The color of the edge `source -> target`. Empty if there is no such edge.
    fn transition_color(
        &self,
        source: usize,
        target: usize,
    ) -> <Self::Algebra as ColorAlgebra>::Color;
}

/// Identifies one of the four flow conditions on the facets of a cell along one dimension.
///
/// The "positive" facet is the upper side of the cell, the "negative" facet is the lower side.
/// Flow *in* through the upper facet means the derivative is negative there, flow *out* means
/// it is positive. On the lower facet, the meaning of the sign is reversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    PositiveIn = 0,
    PositiveOut = 1,
    NegativeIn = 2,
    NegativeOut = 3,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::PositiveIn,
        Orientation::PositiveOut,
        Orientation::NegativeIn,
        Orientation::NegativeOut,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// True if this orientation describes the upper facet of a cell.
    pub fn is_upper(self) -> bool {
        matches!(self, Orientation::PositiveIn | Orientation::PositiveOut)
    }

    /// The sign of the derivative that realizes this flow.
    pub fn is_positive_derivative(self) -> bool {
        matches!(self, Orientation::PositiveOut | Orientation::NegativeIn)
    }

    /// The same facet as seen from the neighbouring cell across it.
    pub fn dual(self) -> Orientation {
        match self {
            Orientation::PositiveIn => Orientation::NegativeOut,
            Orientation::PositiveOut => Orientation::NegativeIn,
            Orientation::NegativeIn => Orientation::PositiveOut,
            Orientation::NegativeOut => Orientation::PositiveIn,
        }
    }
}
