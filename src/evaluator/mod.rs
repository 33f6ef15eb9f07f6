//! Evaluation of derivative signs at grid vertices.
//!
//! Every equation is affine in (at most) one parameter. At a fixed vertex, the derivative is
//! therefore `base + coefficient * p`, and the set of parameter values for which it has a given
//! sign is a single interval of `p`. This rule is implemented once by [`AffineDerivative`];
//! the individual evaluators only differ in how they compute `base` and `coefficient`:
//!
//!  - [`InterpretedEvaluator`] walks the summands of the model on every call.
//!  - [`CompiledEvaluator`] turns every equation into a closure once, when it is created.

mod compiled;
mod interpreted;


pub use compiled::CompiledEvaluator;
pub use interpreted::InterpretedEvaluator;

use crate::color::ColorAlgebra;
use crate::grid::Vertex;
use crate::model::OdeModel;

/// Computes the set of parameters for which a derivative has a given sign at a vertex.
pub trait DerivativeEvaluator<A: ColorAlgebra>: Send + Sync {
    /// The color for which the derivative of `dimension` at `vertex` is strictly positive
    /// (or strictly negative if `positive` is false). May return the empty color.
    fn sign_color(&self, algebra: &A, vertex: &Vertex, dimension: usize, positive: bool)
    -> A::Color;
}

/// A type-erased evaluator, chosen at runtime through [`EvaluatorStrategy`].
pub type DynEvaluator<A> = Box<dyn DerivativeEvaluator<A>>;

impl<A: ColorAlgebra, E: DerivativeEvaluator<A> + ?Sized> DerivativeEvaluator<A> for Box<E> {
    fn sign_color(
        &self,
        algebra: &A,
        vertex: &Vertex,
        dimension: usize,
        positive: bool,
    ) -> A::Color {
        (**self).sign_color(algebra, vertex, dimension, positive)
    }
}

/// Selects the derivative evaluator installed by the default transition system constructor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvaluatorStrategy {
    #[default]
    Interpreted,
    Compiled,
}

impl EvaluatorStrategy {
    pub fn build<A: ColorAlgebra + 'static>(&self, model: &OdeModel) -> DynEvaluator<A> {
        match self {
            EvaluatorStrategy::Interpreted => Box::new(InterpretedEvaluator::new(model)),
            EvaluatorStrategy::Compiled => Box::new(CompiledEvaluator::new(model)),
        }
    }
}

/// The value of one derivative at a fixed vertex: `base + coefficient * p`,
/// where `p` is the (optional) parameter of the equation with range `[low, high]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineDerivative {
    pub base: f64,
    pub coefficient: f64,
    /// The parameter index and its range.
    pub parameter: Option<(usize, (f64, f64))>,
}

impl AffineDerivative {
    /// Translate the sign condition on the derivative into a parameter set.
    pub fn sign_color<A: ColorAlgebra>(&self, algebra: &A, positive: bool) -> A::Color {
        let parameter = match self.parameter {
            Some(parameter) if self.coefficient != 0.0 => parameter,
            _ => {
                // The sign does not depend on the parameter.
                return if (positive && self.base > 0.0) || (!positive && self.base < 0.0) {
                    algebra.universal()
                } else {
                    algebra.empty()
                };
            }
        };

        let (index, (low, high)) = parameter;
        // Dividing by a negative coefficient flips the inequality.
        let want_upper = (self.coefficient > 0.0) == positive;
        let root = (-self.base / self.coefficient).max(low).min(high);
        let (new_low, new_high) = if want_upper {
            (root, high)
        } else {
            (low, root)
        };

        if new_low >= new_high {
            algebra.empty()
        } else {
            algebra.restrict(index, new_low, new_high)
        }
    }
}
