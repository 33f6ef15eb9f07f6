use thiserror::Error;

/// A structural problem of an [`OdeModel`](crate::model::OdeModel) which prevents
/// the construction of a transition system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("model has no variables")]
    NoVariables,
    #[error("model has {count} variables, but at most {limit} are supported")]
    TooManyVariables { count: usize, limit: usize },
    #[error("grid of {dimensions} variables has too many states to be indexed")]
    TooManyStates { dimensions: usize },
    #[error("variable `{variable}` has {count} thresholds, but at least 2 are required")]
    NotEnoughThresholds { variable: String, count: usize },
    #[error("thresholds of variable `{variable}` are not strictly increasing")]
    UnorderedThresholds { variable: String },
    #[error("variable `{variable}` contains a non-finite threshold, constant or function parameter")]
    NonFiniteValue { variable: String },
    #[error("parameter `{parameter}` has an invalid range [{low}, {high}]")]
    InvalidParameterRange {
        parameter: String,
        low: f64,
        high: f64,
    },
    #[error("explicit function in the equation of `{variable}` has unordered points")]
    UnorderedFunctionPoints { variable: String },
    #[error("equation of `{variable}` references unknown variable #{index}")]
    UnknownVariable { variable: String, index: usize },
    #[error("equation of `{variable}` references unknown parameter #{index}")]
    UnknownParameter { variable: String, index: usize },
    #[error("equation of `{variable}` references parameters #{first} and #{second}")]
    MultipleParameters {
        variable: String,
        first: usize,
        second: usize,
    },
}
