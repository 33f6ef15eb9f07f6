//! In-memory representation of a multi-affine ODE model.
//!
//! A model consists of a list of [`Variable`] objects (each with its thresholds and equation)
//! and a list of [`Parameter`] objects (each with a closed range of admissible values). The
//! transition generator assumes the model is immutable and valid, which is established
//! once by [`OdeModel::validate`].

mod evaluable;
mod model_error;


pub use evaluable::Evaluable;
pub use model_error::ModelError;

use std::collections::BTreeSet;

/// The largest number of variables whose corner masks still fit into a `usize`.
pub const MAX_VARIABLES: usize = (usize::BITS - 1) as usize;

/// A complete ODE model: variables with thresholds and equations, plus uncertain parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OdeModel {
    pub variables: Vec<Variable>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: Vec<Parameter>,
}

/// One dimension of the model.
///
/// The `thresholds` split the variable's range into `thresholds.len() - 1` grid cells.
/// The derivative of the variable is the sum of all summands in `equation`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    pub name: String,
    pub thresholds: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equation: Vec<Summand>,
}

/// An uncertain model parameter with a closed range of admissible values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: String,
    pub range: (f64, f64),
}

/// A single multiplicative term of an equation:
/// `constant * x_i * x_j * ... * f_1(x_k) * ... * p`, where the parameter `p` is optional.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summand {
    pub constant: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variable_indices: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub evaluables: Vec<Evaluable>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub param_index: Option<usize>,
}

impl Summand {
    /// A summand consisting only of a constant.
    pub fn constant(constant: f64) -> Summand {
        Summand {
            constant,
            variable_indices: Vec::new(),
            evaluables: Vec::new(),
            param_index: None,
        }
    }

    /// Multiply this summand by the value of a variable.
    pub fn times_variable(mut self, variable: usize) -> Summand {
        self.variable_indices.push(variable);
        self
    }

    /// Multiply this summand by a nonlinear function of some variable.
    pub fn times(mut self, evaluable: Evaluable) -> Summand {
        self.evaluables.push(evaluable);
        self
    }

    /// Multiply this summand by a parameter.
    pub fn with_parameter(mut self, parameter: usize) -> Summand {
        self.param_index = Some(parameter);
        self
    }

    pub fn has_param(&self) -> bool {
        self.param_index.is_some()
    }

    /// Indices of all variables whose value influences this summand.
    pub fn dependencies(&self) -> impl Iterator<Item = usize> + '_ {
        self.variable_indices
            .iter()
            .copied()
            .chain(self.evaluables.iter().map(|it| it.var_index()))
    }

    /// Evaluate the summand (without the parameter) using the given variable values.
    ///
    /// Nonlinear functions are skipped once the partial product is zero, so that
    /// singular function values at the boundary do not turn a zero term into `NaN`.
    pub fn eval(&self, value_of: impl Fn(usize) -> f64) -> f64 {
        let mut partial = self.constant;
        for var in &self.variable_indices {
            partial *= value_of(*var);
        }
        if partial != 0.0 {
            for function in &self.evaluables {
                partial *= function.eval(value_of(function.var_index()));
            }
        }
        partial
    }
}

impl Variable {
    pub fn new(name: &str, thresholds: Vec<f64>, equation: Vec<Summand>) -> Variable {
        Variable {
            name: name.to_string(),
            thresholds,
            equation,
        }
    }

    /// The number of grid cells along this variable.
    pub fn cell_count(&self) -> usize {
        self.thresholds.len().saturating_sub(1)
    }

    /// The set of variables this variable's derivative depends on.
    pub fn dependencies(&self) -> BTreeSet<usize> {
        self.equation.iter().flat_map(|s| s.dependencies()).collect()
    }

    /// The parameter referenced by this variable's equation, if any.
    pub fn parameter(&self) -> Option<usize> {
        self.equation.iter().find_map(|s| s.param_index)
    }
}

impl Parameter {
    pub fn new(name: &str, low: f64, high: f64) -> Parameter {
        Parameter {
            name: name.to_string(),
            range: (low, high),
        }
    }
}

impl OdeModel {
    /// Create a new model and immediately check that it is valid.
    pub fn new(
        variables: Vec<Variable>,
        parameters: Vec<Parameter>,
    ) -> Result<OdeModel, ModelError> {
        let model = OdeModel {
            variables,
            parameters,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn dimensions(&self) -> usize {
        self.variables.len()
    }

    /// The total number of grid cells (states) of the model.
    pub fn state_count(&self) -> usize {
        self.variables.iter().map(|v| v.cell_count()).product()
    }

    /// The parameter space bounds as a list of `(low, high)` pairs.
    pub fn parameter_bounds(&self) -> Vec<(f64, f64)> {
        self.parameters.iter().map(|p| p.range).collect()
    }

    /// Check the structural assumptions of the transition generator.
    ///
    /// This is not a deep semantic validation of the model. It only verifies what the
    /// generator relies on: non-empty ordered thresholds, consistent parameter ranges,
    /// in-bounds variable/parameter references, at most one parameter per equation,
    /// well-formed nonlinear functions, and a grid whose facets can be indexed by `usize`.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.variables.is_empty() {
            return Err(ModelError::NoVariables);
        }
        if self.variables.len() > MAX_VARIABLES {
            return Err(ModelError::TooManyVariables {
                count: self.variables.len(),
                limit: MAX_VARIABLES,
            });
        }

        for parameter in &self.parameters {
            let (low, high) = parameter.range;
            if !low.is_finite() || !high.is_finite() || low >= high {
                return Err(ModelError::InvalidParameterRange {
                    parameter: parameter.name.clone(),
                    low,
                    high,
                });
            }
        }

        for variable in &self.variables {
            self.validate_variable(variable)?;
        }

        if self.checked_facet_count().is_none() {
            return Err(ModelError::TooManyStates {
                dimensions: self.dimensions(),
            });
        }

        Ok(())
    }

    /// The number of facet slots (`states * dimensions * 4`), or `None` if any
    /// intermediate product does not fit into `usize`.
    fn checked_facet_count(&self) -> Option<usize> {
        let states = self
            .variables
            .iter()
            .try_fold(1usize, |acc, v| acc.checked_mul(v.cell_count()))?;
        states.checked_mul(self.dimensions())?.checked_mul(4)
    }

    fn validate_variable(&self, variable: &Variable) -> Result<(), ModelError> {
        if variable.thresholds.len() < 2 {
            return Err(ModelError::NotEnoughThresholds {
                variable: variable.name.clone(),
                count: variable.thresholds.len(),
            });
        }
        if variable.thresholds.iter().any(|t| !t.is_finite()) {
            return Err(ModelError::NonFiniteValue {
                variable: variable.name.clone(),
            });
        }
        if variable.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ModelError::UnorderedThresholds {
                variable: variable.name.clone(),
            });
        }

        let mut parameter: Option<usize> = None;
        for summand in &variable.equation {
            if !summand.constant.is_finite() {
                return Err(ModelError::NonFiniteValue {
                    variable: variable.name.clone(),
                });
            }
            for function in &summand.evaluables {
                if !function.is_finite() {
                    return Err(ModelError::NonFiniteValue {
                        variable: variable.name.clone(),
                    });
                }
                if !function.has_ordered_points() {
                    return Err(ModelError::UnorderedFunctionPoints {
                        variable: variable.name.clone(),
                    });
                }
            }
            if let Some(index) = summand.dependencies().find(|i| *i >= self.variables.len()) {
                return Err(ModelError::UnknownVariable {
                    variable: variable.name.clone(),
                    index,
                });
            }
            if let Some(index) = summand.param_index {
                if index >= self.parameters.len() {
                    return Err(ModelError::UnknownParameter {
                        variable: variable.name.clone(),
                        index,
                    });
                }
                match parameter {
                    Some(first) if first != index => {
                        return Err(ModelError::MultipleParameters {
                            variable: variable.name.clone(),
                            first,
                            second: index,
                        });
                    }
                    _ => parameter = Some(index),
                }
            }
        }

        Ok(())
    }
}
