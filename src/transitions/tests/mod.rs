mod properties;

use crate::color::{ColorAlgebra, RectangleAlgebra, RectangleSet};
use crate::evaluator::EvaluatorStrategy;
use crate::grid::GridEncoder;
use crate::model::{ModelError, OdeModel};
use crate::test_utils::{init_logger, parametric_model, regulated_model, stable_point_model};
use crate::transitions::{GeneratorConfig, OdeTransitionSystem, Orientation, TransitionSystem};

/// Check that successors and predecessors describe the same edges and that every
/// recorded edge has a satisfiable color.
pub(super) fn assert_consistent<T: TransitionSystem>(system: &T) {
    let algebra = system.algebra();
    for source in 0..system.state_count() {
        for target in 0..system.state_count() {
            let forward = system.successors(source).contains(&target);
            let backward = system.predecessors(target).contains(&source);
            assert_eq!(
                forward, backward,
                "Edge {source} -> {target} is not consistent."
            );
            let color = system.transition_color(source, target);
            assert_eq!(
                forward,
                algebra.is_satisfiable(&color),
                "Color of {source} -> {target} does not match the edge."
            );
        }
    }
}

/// Every parameter valuation has at least one successor in every state.
pub(super) fn assert_total<T: TransitionSystem>(system: &T) {
    let algebra = system.algebra();
    for source in 0..system.state_count() {
        let covered = system
            .successors(source)
            .iter()
            .fold(algebra.empty(), |acc, target| {
                algebra.union(&acc, &system.transition_color(source, *target))
            });
        assert!(
            algebra.is_equivalent(&covered, &algebra.universal()),
            "State {source} has no successor for some parameters."
        );
    }
}

fn range(algebra: &RectangleAlgebra, low: f64, high: f64) -> RectangleSet {
    algebra.restrict(0, low, high)
}

fn sorted(states: &[usize]) -> Vec<usize> {
    let mut states = states.to_vec();
    states.sort();
    states
}

#[test]
fn parametric_successors() {
    init_logger();
    let system = OdeTransitionSystem::new(&parametric_model()).unwrap();
    assert_eq!(system.state_count(), 4);
    // Higher neighbours come first, self-loops last.
    assert_eq!(system.successors(0), &[1, 2]);
    assert_eq!(system.successors(1), &[3, 1]);
    assert_eq!(system.successors(2), &[3, 0]);
    assert_eq!(system.successors(3), &[1, 3]);

    let algebra = system.algebra().clone();
    let expected = [
        ((0, 1), algebra.universal()),
        ((0, 2), range(&algebra, 1.0, 2.0)),
        ((1, 3), range(&algebra, 1.0, 2.0)),
        ((1, 1), range(&algebra, 0.0, 1.0)),
        ((2, 3), algebra.universal()),
        ((2, 0), range(&algebra, 0.0, 1.0)),
        ((3, 1), range(&algebra, 0.0, 1.0)),
        ((3, 3), range(&algebra, 1.0, 2.0)),
    ];
    for ((source, target), color) in expected {
        let actual = system.transition_color(source, target);
        assert!(
            algebra.is_equivalent(&actual, &color),
            "Edge {source} -> {target} has color {actual}, expected {color}."
        );
    }
    assert!(!algebra.is_satisfiable(&system.transition_color(0, 0)));
    assert!(!algebra.is_satisfiable(&system.transition_color(0, 3)));
}

#[test]
fn parametric_predecessors() {
    init_logger();
    let system = OdeTransitionSystem::new(&parametric_model()).unwrap();
    assert_eq!(sorted(system.predecessors(0)), vec![2]);
    assert_eq!(sorted(system.predecessors(1)), vec![0, 1, 3]);
    assert_eq!(sorted(system.predecessors(2)), vec![0]);
    assert_eq!(sorted(system.predecessors(3)), vec![1, 2, 3]);
    assert_consistent(&system);
}

#[test]
fn parametric_edges_cover_parameter_space() {
    init_logger();
    let system = OdeTransitionSystem::new(&parametric_model()).unwrap();
    assert_total(&system);
}

#[test]
fn parametric_facets() {
    init_logger();
    let system = OdeTransitionSystem::new(&parametric_model()).unwrap();
    let algebra = system.algebra().clone();
    let check = |state: usize, orientation: Orientation, expected: RectangleSet| {
        let actual = system.facet_color(state, 1, orientation);
        assert!(
            algebra.is_equivalent(actual, &expected),
            "Facet {orientation:?} of {state} is {actual}, expected {expected}."
        );
    };
    // Bottom row, y in [0, 1].
    check(0, Orientation::PositiveIn, range(&algebra, 0.0, 1.0));
    check(0, Orientation::PositiveOut, range(&algebra, 1.0, 2.0));
    check(0, Orientation::NegativeIn, algebra.universal());
    check(0, Orientation::NegativeOut, algebra.empty());
    // Top row, y in [1, 2].
    check(2, Orientation::PositiveIn, algebra.universal());
    check(2, Orientation::PositiveOut, algebra.empty());
    check(2, Orientation::NegativeIn, range(&algebra, 1.0, 2.0));
    check(2, Orientation::NegativeOut, range(&algebra, 0.0, 1.0));
}

#[test]
fn single_stable_cell() {
    init_logger();
    let system = OdeTransitionSystem::new(&stable_point_model()).unwrap();
    assert_eq!(system.successors(0), &[1, 2]);
    assert_eq!(system.successors(1), &[3]);
    assert_eq!(system.successors(2), &[3]);
    assert_eq!(system.successors(3), &[3]);
    let with_loop: Vec<usize> = (0..4)
        .filter(|s| system.successors(*s).contains(s))
        .collect();
    assert_eq!(with_loop, vec![3]);
    assert_consistent(&system);
    assert_total(&system);
}

#[test]
fn universal_self_loops_without_elimination() {
    init_logger();
    let config = GeneratorConfig::new().with_universal_self_loops();
    let system = OdeTransitionSystem::with_config(&parametric_model(), config).unwrap();
    let algebra = system.algebra().clone();
    assert_eq!(system.successors(0), &[1, 2, 0]);
    assert_eq!(system.successors(1), &[3, 1]);
    assert_eq!(system.successors(2), &[3, 0, 2]);
    assert_eq!(system.successors(3), &[1, 3]);
    for state in 0..system.state_count() {
        assert!(system.predecessors(state).contains(&state));
        let color = system.transition_color(state, state);
        assert!(algebra.is_equivalent(&color, &algebra.universal()));
    }
    assert_consistent(&system);
    assert_total(&system);

    // A cell the flow always leaves still keeps its self-loop.
    let config = GeneratorConfig {
        create_self_loops: false,
        ..Default::default()
    };
    let system = OdeTransitionSystem::with_config(&stable_point_model(), config).unwrap();
    assert_eq!(system.successors(0), &[1, 2, 0]);
    assert_eq!(system.successors(3), &[3]);
    for state in 0..system.state_count() {
        assert!(!system.successors(state).is_empty());
    }
    assert_consistent(&system);
}

#[test]
fn facet_duality() {
    init_logger();
    let model = regulated_model();
    let system = OdeTransitionSystem::new(&model).unwrap();
    // Computing one facet fills in the facet of the neighbour.
    assert!(system.stored_facet_color(1, 0, Orientation::NegativeIn).is_none());
    let color = system.facet_color(0, 0, Orientation::PositiveOut).clone();
    assert_eq!(
        system.stored_facet_color(1, 0, Orientation::NegativeIn),
        Some(&color)
    );
    let color = system.facet_color(3, 1, Orientation::NegativeOut).clone();
    assert_eq!(
        system.stored_facet_color(0, 1, Orientation::PositiveIn),
        Some(&color)
    );

    system.par_explore();
    let encoder = system.encoder();
    for state in 0..system.state_count() {
        for dimension in 0..2 {
            for orientation in Orientation::ALL {
                let neighbour = if orientation.is_upper() {
                    encoder.higher_node(state, dimension)
                } else {
                    encoder.lower_node(state, dimension)
                };
                let Some(neighbour) = neighbour else {
                    continue;
                };
                assert_eq!(
                    system.facet_color(state, dimension, orientation),
                    system.facet_color(neighbour, dimension, orientation.dual()),
                );
            }
        }
    }
}

#[test]
fn repeated_queries_are_stable() {
    init_logger();
    let model = regulated_model();
    let first = OdeTransitionSystem::new(&model).unwrap();
    let second = OdeTransitionSystem::new(&model).unwrap();
    // Query the second system in the opposite order.
    for state in (0..second.state_count()).rev() {
        second.predecessors(state);
        second.successors(state);
    }
    for state in 0..first.state_count() {
        let successors = first.successors(state).to_vec();
        assert_eq!(first.successors(state), successors.as_slice());
        assert_eq!(second.successors(state), successors.as_slice());
        assert_eq!(sorted(first.predecessors(state)), sorted(second.predecessors(state)));
        for target in successors {
            assert_eq!(
                first.transition_color(state, target),
                second.transition_color(state, target)
            );
        }
    }
    assert_consistent(&first);
    assert_total(&first);
}

#[test]
fn parallel_exploration_matches_sequential() {
    init_logger();
    let model = regulated_model();
    let parallel = OdeTransitionSystem::new(&model).unwrap();
    let sequential = OdeTransitionSystem::new(&model).unwrap();
    let edges = parallel.par_explore();
    let mut sequential_edges = 0;
    for state in 0..sequential.state_count() {
        sequential_edges += sequential.successors(state).len();
        assert_eq!(parallel.successors(state), sequential.successors(state));
        assert_eq!(parallel.predecessors(state), sequential.predecessors(state));
    }
    assert_eq!(edges, sequential_edges);
    let algebra = parallel.algebra();
    for state in 0..parallel.state_count() {
        for target in parallel.successors(state) {
            assert!(algebra.is_equivalent(
                &parallel.transition_color(state, *target),
                &sequential.transition_color(state, *target),
            ));
        }
    }
}

#[test]
fn compiled_evaluator_builds_same_system() {
    init_logger();
    let model = regulated_model();
    let interpreted = OdeTransitionSystem::new(&model).unwrap();
    let compiled =
        OdeTransitionSystem::with_config(&model, GeneratorConfig::from(EvaluatorStrategy::Compiled))
            .unwrap();
    assert_eq!(compiled.config().evaluator, EvaluatorStrategy::Compiled);
    let algebra = interpreted.algebra();
    for state in 0..interpreted.state_count() {
        assert_eq!(interpreted.successors(state), compiled.successors(state));
        for target in interpreted.successors(state) {
            assert!(algebra.is_equivalent(
                &interpreted.transition_color(state, *target),
                &compiled.transition_color(state, *target),
            ));
        }
    }
}

#[test]
fn transition_color_without_prior_query() {
    let system = OdeTransitionSystem::new(&parametric_model()).unwrap();
    let algebra = system.algebra().clone();
    // Nothing has been computed yet, but the edge is still found.
    assert!(algebra.is_equivalent(
        &system.transition_color(3, 3),
        &range(&algebra, 1.0, 2.0)
    ));
    assert!(!algebra.is_satisfiable(&system.transition_color(3, 0)));
}

#[test]
fn invalid_model_is_rejected() {
    let model = OdeModel {
        variables: Vec::new(),
        parameters: Vec::new(),
    };
    assert!(matches!(
        OdeTransitionSystem::new(&model),
        Err(ModelError::NoVariables)
    ));
}

#[test]
#[should_panic]
fn unknown_state_panics() {
    let system = OdeTransitionSystem::new(&parametric_model()).unwrap();
    system.successors(4);
}
