use crate::color::ColorAlgebra;
use crate::evaluator::{AffineDerivative, DerivativeEvaluator};
use crate::grid::Vertex;
use crate::model::{OdeModel, Summand};

/// A [`DerivativeEvaluator`] that interprets the summands of the model equations.
#[derive(Clone, Debug)]
pub struct InterpretedEvaluator {
    equations: Vec<Vec<Summand>>,
    ranges: Vec<(f64, f64)>,
}

impl InterpretedEvaluator {
    pub fn new(model: &OdeModel) -> InterpretedEvaluator {
        InterpretedEvaluator {
            equations: model.variables.iter().map(|v| v.equation.clone()).collect(),
            ranges: model.parameter_bounds(),
        }
    }

    /// Evaluate the equation of `dimension` at the given vertex.
    pub fn derivative(&self, vertex: &Vertex, dimension: usize) -> AffineDerivative {
        let mut base = 0.0;
        let mut coefficient = 0.0;
        let mut parameter = None;
        for summand in &self.equations[dimension] {
            let value = summand.eval(|var| vertex.value(var));
            if let Some(index) = summand.param_index {
                parameter = Some((index, self.ranges[index]));
                coefficient += value;
            } else {
                base += value;
            }
        }
        AffineDerivative {
            base,
            coefficient,
            parameter,
        }
    }
}

impl<A: ColorAlgebra> DerivativeEvaluator<A> for InterpretedEvaluator {
    fn sign_color(
        &self,
        algebra: &A,
        vertex: &Vertex,
        dimension: usize,
        positive: bool,
    ) -> A::Color {
        self.derivative(vertex, dimension)
            .sign_color(algebra, positive)
    }
}
