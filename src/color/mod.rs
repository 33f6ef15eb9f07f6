//! Boolean algebra over parameter sets ("colors").
//!
//! The transition generator never inspects the representation of a color. It only relies
//! on the operations of [`ColorAlgebra`], so alternative representations of parameter sets
//! can be used without touching the generator itself. The crate provides
//! [`RectangleAlgebra`], where a color is a finite union of axis-aligned rectangles.

mod rectangle;


pub use rectangle::{Interval, Rectangle, RectangleAlgebra, RectangleSet};

use std::fmt::Debug;

/// A Boolean algebra of parameter sets bounded by the parameter space of one model.
///
/// All operations are pure: they never modify their arguments. The algebra object itself
/// carries the information about the parameter space (e.g. its bounds), which is why
/// even simple constants like [`ColorAlgebra::universal`] are methods.
pub trait ColorAlgebra: Send + Sync {
    type Color: Clone + PartialEq + Debug + Send + Sync;

    /// The set of all admissible parameter valuations.
    fn universal(&self) -> Self::Color;

    /// The empty set of parameter valuations.
    fn empty(&self) -> Self::Color;

    fn union(&self, left: &Self::Color, right: &Self::Color) -> Self::Color;

    fn intersect(&self, left: &Self::Color, right: &Self::Color) -> Self::Color;

    /// Complement with respect to [`ColorAlgebra::universal`].
    fn complement(&self, color: &Self::Color) -> Self::Color;

    /// True if the color contains at least one parameter valuation.
    fn is_satisfiable(&self, color: &Self::Color) -> bool;

    /// Simplify the representation of a color. The denoted set must not change.
    fn canonicalize(&self, color: &Self::Color) -> Self::Color;

    /// The universal color where the `parameter` axis is restricted to `[low, high]`.
    fn restrict(&self, parameter: usize, low: f64, high: f64) -> Self::Color;

    fn minus(&self, left: &Self::Color, right: &Self::Color) -> Self::Color {
        self.intersect(left, &self.complement(right))
    }

    fn is_subset(&self, left: &Self::Color, right: &Self::Color) -> bool {
        !self.is_satisfiable(&self.minus(left, right))
    }

    /// Semantic equality of two colors, regardless of their representation.
    fn is_equivalent(&self, left: &Self::Color, right: &Self::Color) -> bool {
        self.is_subset(left, right) && self.is_subset(right, left)
    }
}
