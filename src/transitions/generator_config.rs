use crate::evaluator::EvaluatorStrategy;

/// Configuration of an [`OdeTransitionSystem`](crate::transitions::OdeTransitionSystem).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Remove from each self-loop the parameters for which the flow is guaranteed to leave
    /// the cell (default: `true`).
    ///
    /// If disabled, every state keeps a self-loop with the universal color.
    pub create_self_loops: bool,
    /// The derivative evaluator installed by the convenience constructors
    /// (default: [`EvaluatorStrategy::Interpreted`]).
    pub evaluator: EvaluatorStrategy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::new()
    }
}

impl From<EvaluatorStrategy> for GeneratorConfig {
    fn from(value: EvaluatorStrategy) -> Self {
        GeneratorConfig {
            evaluator: value,
            ..GeneratorConfig::new()
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> GeneratorConfig {
        GeneratorConfig {
            create_self_loops: true,
            evaluator: EvaluatorStrategy::default(),
        }
    }

    pub fn with_universal_self_loops(mut self) -> GeneratorConfig {
        self.create_self_loops = false;
        self
    }
}
