use crate::color::ColorAlgebra;
use crate::evaluator::{AffineDerivative, DerivativeEvaluator};
use crate::grid::Vertex;
use crate::model::{Evaluable, OdeModel, Summand};

type Term = Box<dyn Fn(&Vertex) -> f64 + Send + Sync>;

/// A compiled summand, together with a flag telling whether it is multiplied by the parameter.
struct CompiledTerm {
    parametric: bool,
    term: Term,
}

/// An equation as a list of closures, in the order of its summands.
struct CompiledEquation {
    terms: Vec<CompiledTerm>,
    parameter: Option<(usize, (f64, f64))>,
}

/// A [`DerivativeEvaluator`] which turns every summand into a closure when created.
///
/// Nonlinear functions are captured by value, so evaluation does not need to dispatch
/// over the structure of the model. Summands are evaluated and added up in the same order
/// as in [`InterpretedEvaluator`](crate::evaluator::InterpretedEvaluator), so both
/// evaluators produce identical floating point results.
pub struct CompiledEvaluator {
    equations: Vec<CompiledEquation>,
}

impl CompiledEvaluator {
    pub fn new(model: &OdeModel) -> CompiledEvaluator {
        let ranges = model.parameter_bounds();
        let equations = model
            .variables
            .iter()
            .map(|variable| {
                let parameter = variable
                    .parameter()
                    .map(|index| (index, ranges[index]));
                let terms = variable
                    .equation
                    .iter()
                    .map(|summand| CompiledTerm {
                        parametric: summand.has_param(),
                        term: compile(summand),
                    })
                    .collect();
                CompiledEquation { terms, parameter }
            })
            .collect();
        CompiledEvaluator { equations }
    }

    pub fn derivative(&self, vertex: &Vertex, dimension: usize) -> AffineDerivative {
        let equation = &self.equations[dimension];
        let mut base = 0.0;
        let mut coefficient = 0.0;
        for CompiledTerm { parametric, term } in &equation.terms {
            if *parametric {
                coefficient += term(vertex);
            } else {
                base += term(vertex);
            }
        }
        AffineDerivative {
            base,
            coefficient,
            parameter: equation.parameter,
        }
    }
}

fn compile(summand: &Summand) -> Term {
    let constant = summand.constant;
    if summand.variable_indices.is_empty() && summand.evaluables.is_empty() {
        return Box::new(move |_: &Vertex| constant);
    }
    let variables = summand.variable_indices.clone();
    let functions: Vec<Evaluable> = summand.evaluables.clone();
    Box::new(move |vertex: &Vertex| {
        let mut partial = constant;
        for var in &variables {
            partial *= vertex.value(*var);
        }
        if partial != 0.0 {
            for function in &functions {
                partial *= function.eval(vertex.value(function.var_index()));
            }
        }
        partial
    })
}

impl<A: ColorAlgebra> DerivativeEvaluator<A> for CompiledEvaluator {
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
