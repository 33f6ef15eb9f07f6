use crate::color::{ColorAlgebra, RectangleAlgebra};
use crate::dependency::DependencyMasks;
use crate::evaluator::{DerivativeEvaluator, DynEvaluator};
use crate::grid::{GridEncoder, NodeEncoder};
use crate::model::{ModelError, OdeModel};
use crate::transitions::facet_table::FacetTable;
use crate::transitions::{GeneratorConfig, Orientation, TransitionSystem};
use dashmap::DashMap;
use log::{debug, info, trace};
use rayon::prelude::*;
use std::sync::OnceLock;

/// The parametrized transition system of an [`OdeModel`].
///
/// Facet colors, edge colors, and successor/predecessor lists are computed on demand and
/// cached. Each cache slot is written at most once, so concurrent queries for different
/// (or even the same) states always observe the same results.
///
/// The type parameters allow replacing the parameter representation (`A`), the derivative
/// evaluator (`E`) and the grid encoding (`G`). Use [`OdeTransitionSystem::new`] to obtain
/// the default rectangle-based system.
pub struct OdeTransitionSystem<
    A: ColorAlgebra = RectangleAlgebra,
    E: DerivativeEvaluator<A> = DynEvaluator<RectangleAlgebra>,
    G: GridEncoder = NodeEncoder,
> {
    algebra: A,
    evaluator: E,
    encoder: G,
    masks: DependencyMasks,
    config: GeneratorConfig,
    facets: FacetTable<A::Color>,
    edges: DashMap<(usize, usize), A::Color>,
    successors: Vec<OnceLock<Vec<usize>>>,
    predecessors: Vec<OnceLock<Vec<usize>>>,
}

impl OdeTransitionSystem {
    /// Build the default transition system for the given model.
    pub fn new(model: &OdeModel) -> Result<OdeTransitionSystem, ModelError> {
        OdeTransitionSystem::with_config(model, GeneratorConfig::default())
    }

    /// Same as [`OdeTransitionSystem::new`], but the evaluator and self-loop behaviour
    /// are given by the `config`.
    pub fn with_config(
        model: &OdeModel,
        config: GeneratorConfig,
    ) -> Result<OdeTransitionSystem, ModelError> {
        model.validate()?;
        let algebra = RectangleAlgebra::from_model(model);
        let evaluator = config.evaluator.build(model);
        debug!("Using {:?} derivative evaluator.", config.evaluator);
        let encoder = NodeEncoder::new(model);
        OdeTransitionSystem::from_parts(model, algebra, evaluator, encoder, config)
    }
}

impl<A: ColorAlgebra, E: DerivativeEvaluator<A>, G: GridEncoder> OdeTransitionSystem<A, E, G> {
    /// Assemble a transition system from custom components.
    ///
    /// The components must describe the same `model`: the algebra must cover its parameter
    /// space and the encoder must have one dimension per model variable.
    pub fn from_parts(
        model: &OdeModel,
        algebra: A,
        evaluator: E,
        encoder: G,
        config: GeneratorConfig,
    ) -> Result<OdeTransitionSystem<A, E, G>, ModelError> {
        model.validate()?;
        let state_count = encoder.state_count();
        let dimensions = encoder.dimensions();
        info!(
            "Created transition system with {} states, {} dimensions and {} parameters (self-loops: {}).",
            state_count,
            dimensions,
            model.parameters.len(),
            config.create_self_loops,
        );
        Ok(OdeTransitionSystem {
            masks: DependencyMasks::new(model),
            facets: FacetTable::new(state_count, dimensions),
            edges: DashMap::new(),
            successors: (0..state_count).map(|_| OnceLock::new()).collect(),
            predecessors: (0..state_count).map(|_| OnceLock::new()).collect(),
            algebra,
            evaluator,
            encoder,
            config,
        })
    }

    pub fn encoder(&self) -> &G {
        &self.encoder
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn dependency_masks(&self) -> &DependencyMasks {
        &self.masks
    }

    /// The color for which the flow of `dimension` satisfies `orientation` on the
    /// corresponding facet of `state`.
    ///
    /// The first computation of a facet also fills in the same facet as seen from the
    /// adjacent cell (if there is one).
    ///
    /// # Panics
    ///
    /// Panics if `state` or `dimension` is not part of the grid.
    pub fn facet_color(
        &self,
        state: usize,
        dimension: usize,
        orientation: Orientation,
    ) -> &A::Color {
        if let Some(color) = self.facets.get(state, dimension, orientation) {
            return color;
        }

        let color = self.compute_facet(state, dimension, orientation);
        let neighbour = if orientation.is_upper() {
            self.encoder.higher_node(state, dimension)
        } else {
            self.encoder.lower_node(state, dimension)
        };
        if let Some(neighbour) = neighbour {
            self.facets
                .insert(neighbour, dimension, orientation.dual(), color.clone());
        }
        self.facets.insert(state, dimension, orientation, color)
    }

    /// The facet color if it has been computed already.
    pub fn stored_facet_color(
        &self,
        state: usize,
        dimension: usize,
        orientation: Orientation,
    ) -> Option<&A::Color> {
        self.facets.get(state, dimension, orientation)
    }

    fn compute_facet(
        &self,
        state: usize,
        dimension: usize,
        orientation: Orientation,
    ) -> A::Color {
        let upper = orientation.is_upper();
        let positive = orientation.is_positive_derivative();
        let self_dependent = self.masks.is_self_dependent(dimension);
        let mut color = self.algebra.empty();
        for mask in self.masks.valid_masks(dimension) {
            // Only corners on the queried side of the cell matter.
            if self_dependent && ((mask >> dimension) & 1 == 1) != upper {
                continue;
            }
            let vertex = self.encoder.vertex(state, *mask);
            let sign = self
                .evaluator
                .sign_color(&self.algebra, &vertex, dimension, positive);
            color = self.algebra.union(&color, &sign);
        }
        let color = self.algebra.canonicalize(&color);
        trace!(
            "[state:{state}][dim:{dimension}] Facet {orientation:?} has color {color:?}."
        );
        color
    }

    /// The part of the parameter space where the flow along `dimension` is guaranteed
    /// to leave the cell through the upper (`positive == true`) or the lower facet.
    fn escaping_flow(&self, state: usize, dimension: usize, positive: bool) -> A::Color {
        let positive_in = self.facet_color(state, dimension, Orientation::PositiveIn);
        let positive_out = self.facet_color(state, dimension, Orientation::PositiveOut);
        let negative_in = self.facet_color(state, dimension, Orientation::NegativeIn);
        let negative_out = self.facet_color(state, dimension, Orientation::NegativeOut);
        let algebra = &self.algebra;
        if positive {
            algebra.minus(
                &algebra.intersect(negative_in, positive_out),
                &algebra.union(negative_out, positive_in),
            )
        } else {
            algebra.minus(
                &algebra.intersect(negative_out, positive_in),
                &algebra.union(negative_in, positive_out),
            )
        }
    }

    /// Compute the successors (`forward == true`) or predecessors of `state`,
    /// recording the color of every discovered edge.
    ///
    /// The self-loop is reduced by the flow that escapes the cell only when
    /// [`GeneratorConfig::create_self_loops`] is enabled.
    fn compute_neighbours(&self, state: usize, forward: bool) -> Vec<usize> {
        let mut result = Vec::new();
        // Without elimination, every state keeps the universal self-loop.
        let eliminate = self.config.create_self_loops;
        let mut self_loop = self.algebra.universal();
        for dimension in 0..self.encoder.dimensions() {
            if let Some(higher) = self.encoder.higher_node(state, dimension) {
                let orientation = if forward {
                    Orientation::PositiveOut
                } else {
                    Orientation::PositiveIn
                };
                self.record_edge(state, higher, dimension, orientation, forward, &mut result);
                if eliminate {
                    let escaping = self.escaping_flow(state, dimension, true);
                    self_loop = self.algebra.minus(&self_loop, &escaping);
                }
            }
            if let Some(lower) = self.encoder.lower_node(state, dimension) {
                let orientation = if forward {
                    Orientation::NegativeOut
                } else {
                    Orientation::NegativeIn
                };
                self.record_edge(state, lower, dimension, orientation, forward, &mut result);
                if eliminate {
                    let escaping = self.escaping_flow(state, dimension, false);
                    self_loop = self.algebra.minus(&self_loop, &escaping);
                }
            }
        }

        if self.algebra.is_satisfiable(&self_loop) {
            let self_loop = self.algebra.canonicalize(&self_loop);
            trace!("[state:{state}] Self-loop has color {self_loop:?}.");
            self.edges.entry((state, state)).or_insert(self_loop);
            result.push(state);
        }

        debug!(
            "[state:{state}] Found {} {}.",
            result.len(),
            if forward { "successors" } else { "predecessors" }
        );
        result
    }

    fn record_edge(
        &self,
        state: usize,
        neighbour: usize,
        dimension: usize,
        orientation: Orientation,
        forward: bool,
        result: &mut Vec<usize>,
    ) {
        let color = self.facet_color(state, dimension, orientation);
        if self.algebra.is_satisfiable(color) {
            let key = if forward {
                (state, neighbour)
            } else {
                (neighbour, state)
            };
            self.edges.entry(key).or_insert_with(|| color.clone());
            result.push(neighbour);
        }
    }

    /// Compute the successors and predecessors of every state, using all available threads.
    ///
    /// Returns the total number of recorded edges (including self-loops).
    pub fn par_explore(&self) -> usize {
        let edges = (0..self.state_count())
            .into_par_iter()
            .map(|state| {
                self.predecessors(state);
                self.successors(state).len()
            })
            .sum();
        info!(
            "Explored {} states with {} edges ({} facets cached).",
            self.state_count(),
            edges,
            self.facets.occupied()
        );
        edges
    }
}

impl<A: ColorAlgebra, E: DerivativeEvaluator<A>, G: GridEncoder> TransitionSystem
    for OdeTransitionSystem<A, E, G>
{
    type Algebra = A;

    fn algebra(&self) -> &A {
        &self.algebra
    }

    fn state_count(&self) -> usize {
        self.encoder.state_count()
    }

    /// # Panics
    ///
    /// Panics if `state` is not part of the grid.
    fn successors(&self, state: usize) -> &[usize] {
        if let Some(successors) = self.successors[state].get() {
            return successors;
        }
        let successors = self.compute_neighbours(state, true);
        self.successors[state].get_or_init(|| successors)
    }

    /// # Panics
    ///
    /// Panics if `state` is not part of the grid.
    fn predecessors(&self, state: usize) -> &[usize] {
        if let Some(predecessors) = self.predecessors[state].get() {
            return predecessors;
        }
        let predecessors = self.compute_neighbours(state, false);
        self.predecessors[state].get_or_init(|| predecessors)
    }

    /// Edge colors are recorded while computing successors, so the successors
    /// of `source` are computed first if necessary.
    fn transition_color(&self, source: usize, target: usize) -> A::Color {
        if let Some(color) = self.edges.get(&(source, target)) {
            return color.clone();
        }
        self.successors(source);
        self.edges
            .get(&(source, target))
            .map(|color| color.clone())
            .unwrap_or_else(|| self.algebra.empty())
    }
}
