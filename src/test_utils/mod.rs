use crate::model::{Evaluable, OdeModel, Parameter, Summand, Variable};

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// A parameter-free model with two cells along `x` and three cells along `y`.
///
/// Thresholds are `x: [0, 1, 2]` and `y: [0, 10, 20, 30]`, equations are `x' = 1` and `y' = -y`.
pub fn two_by_three_model() -> OdeModel {
    OdeModel::new(
        vec![
            Variable::new("x", vec![0.0, 1.0, 2.0], vec![Summand::constant(1.0)]),
            Variable::new(
                "y",
                vec![0.0, 10.0, 20.0, 30.0],
                vec![Summand::constant(-1.0).times_variable(1)],
            ),
        ],
        Vec::new(),
    )
    .unwrap()
}

/// `x' = 1.5 - x` and `y' = p - y` with `p` in `[0, 2]`. Both variables have
/// thresholds `[0, 1, 2]`, i.e. the grid has four states.
pub fn parametric_model() -> OdeModel {
    OdeModel::new(
        vec![
            Variable::new(
                "x",
                vec![0.0, 1.0, 2.0],
                vec![
                    Summand::constant(1.5),
                    Summand::constant(-1.0).times_variable(0),
                ],
            ),
            Variable::new(
                "y",
                vec![0.0, 1.0, 2.0],
                vec![
                    Summand::constant(1.0).with_parameter(0),
                    Summand::constant(-1.0).times_variable(1),
                ],
            ),
        ],
        vec![Parameter::new("p", 0.0, 2.0)],
    )
    .unwrap()
}

/// `x' = 1.5 - x` and `y' = 1.5 - y` on the same grid as [`parametric_model`]. The only
/// stable cell is `[1, 2]x[1, 2]`.
pub fn stable_point_model() -> OdeModel {
    let equation = |var: usize| {
        vec![
            Summand::constant(1.5),
            Summand::constant(-1.0).times_variable(var),
        ]
    };
    OdeModel::new(
        vec![
            Variable::new("x", vec![0.0, 1.0, 2.0], equation(0)),
            Variable::new("y", vec![0.0, 1.0, 2.0], equation(1)),
        ],
        Vec::new(),
    )
    .unwrap()
}

/// A two-parameter model with nonlinear regulation:
///
/// `x' = p * hill+(y) - 0.5 * x` and `y' = 2 * sigmoid-(x) - q * y + 0.25`.
pub fn regulated_model() -> OdeModel {
    OdeModel::new(
        vec![
            Variable::new(
                "x",
                vec![0.0, 1.0, 2.0, 3.0],
                vec![
                    Summand::constant(1.0)
                        .times(Evaluable::Hill {
                            var_index: 1,
                            theta: 1.0,
                            n: 2.0,
                            a: 0.0,
                            b: 1.0,
                            positive: true,
                        })
                        .with_parameter(0),
                    Summand::constant(-0.5).times_variable(0),
                ],
            ),
            Variable::new(
                "y",
                vec![0.0, 1.5, 3.0],
                vec![
                    Summand::constant(2.0).times(Evaluable::Sigmoid {
                        var_index: 0,
                        k: 2.0,
                        theta: 1.5,
                        a: 0.0,
                        b: 2.0,
                        positive: false,
                    }),
                    Summand::constant(-1.0).times_variable(1).with_parameter(1),
                    Summand::constant(0.25),
                ],
            ),
        ],
        vec![
            Parameter::new("p", 0.0, 2.0),
            Parameter::new("q", 0.5, 1.5),
        ],
    )
    .unwrap()
}

/// A single variable with thresholds `[0, 1, 2, 3]` whose derivative at threshold `i`
/// is exactly `values[i]`.
pub fn one_dim_model(values: [f64; 4]) -> OdeModel {
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();
    OdeModel::new(
        vec![Variable::new(
            "x",
            vec![0.0, 1.0, 2.0, 3.0],
            vec![Summand::constant(1.0).times(Evaluable::explicit(0, points))],
        )],
        Vec::new(),
    )
    .unwrap()
}
