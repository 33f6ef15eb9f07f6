use crate::color::ColorAlgebra;
use crate::grid::GridEncoder;
use crate::model::{OdeModel, Parameter, Summand, Variable};
use crate::transitions::tests::{assert_consistent, assert_total};
use crate::transitions::{GeneratorConfig, OdeTransitionSystem, Orientation, TransitionSystem};
use proptest::prelude::*;

/// `x' = a0 + a1 * x + a2 * y + a3 * x * y + a4 * p`
/// `y' = b0 + b1 * x + b2 * y + b3 * x * y + b4 * q * x`
fn random_model(a: &[i8], b: &[i8]) -> OdeModel {
    let equation = |c: &[i8], parameter: Summand| {
        vec![
            Summand::constant(f64::from(c[0])),
            Summand::constant(f64::from(c[1])).times_variable(0),
            Summand::constant(f64::from(c[2])).times_variable(1),
            Summand::constant(f64::from(c[3]))
                .times_variable(0)
                .times_variable(1),
            parameter,
        ]
    };
    OdeModel::new(
        vec![
            Variable::new(
                "x",
                vec![0.0, 1.0, 2.0, 3.0],
                equation(a, Summand::constant(f64::from(a[4])).with_parameter(0)),
            ),
            Variable::new(
                "y",
                vec![-1.0, 0.5, 2.0],
                equation(
                    b,
                    Summand::constant(f64::from(b[4]))
                        .times_variable(0)
                        .with_parameter(1),
                ),
            ),
        ],
        vec![
            Parameter::new("p", 0.0, 2.0),
            Parameter::new("q", -1.0, 1.0),
        ],
    )
    .unwrap()
}

fn coefficients() -> impl Strategy<Value = Vec<i8>> {
    prop::collection::vec(-2i8..=2, 5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_models_are_consistent(a in coefficients(), b in coefficients()) {
        let system = OdeTransitionSystem::new(&random_model(&a, &b)).unwrap();
        system.par_explore();
        assert_consistent(&system);
        assert_total(&system);
    }

    #[test]
    fn random_models_satisfy_duality(a in coefficients(), b in coefficients()) {
        let system = OdeTransitionSystem::new(&random_model(&a, &b)).unwrap();
        system.par_explore();
        let encoder = system.encoder();
        for state in 0..system.state_count() {
            for dimension in 0..encoder.dimensions() {
                for orientation in Orientation::ALL {
                    let neighbour = if orientation.is_upper() {
                        encoder.higher_node(state, dimension)
                    } else {
                        encoder.lower_node(state, dimension)
                    };
                    if let Some(neighbour) = neighbour {
                        prop_assert_eq!(
                            system.facet_color(state, dimension, orientation),
                            system.facet_color(neighbour, dimension, orientation.dual())
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn skipped_elimination_only_widens_loops(a in coefficients(), b in coefficients()) {
        let model = random_model(&a, &b);
        let eliminated = OdeTransitionSystem::new(&model).unwrap();
        let config = GeneratorConfig::new().with_universal_self_loops();
        let universal = OdeTransitionSystem::with_config(&model, config).unwrap();
        let algebra = universal.algebra();
        for state in 0..eliminated.state_count() {
            let mut expected: Vec<usize> = eliminated
                .successors(state)
                .iter()
                .copied()
                .filter(|s| *s != state)
                .collect();
            expected.push(state);
            prop_assert_eq!(universal.successors(state), expected.as_slice());
            let color = universal.transition_color(state, state);
            prop_assert!(algebra.is_equivalent(&color, &algebra.universal()));
        }
        assert_consistent(&universal);
        assert_total(&universal);
    }
}
