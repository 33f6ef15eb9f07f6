/// A univariate nonlinear function bound to one model variable.
///
/// These are the regulation functions commonly used in biological models. Each variant stores
/// the index of the variable it is applied to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Evaluable {
    /// Hill function `a + (b - a) * x^n / (theta^n + x^n)`. The negative variant
    /// is mirrored, i.e. `a + b - hill(x)`.
    Hill {
        var_index: usize,
        theta: f64,
        n: f64,
        a: f64,
        b: f64,
        positive: bool,
    },
    /// Sigmoid function `a + (b - a) * (1 + tanh(k * (x - theta))) / 2`. The negative
    /// variant is mirrored, i.e. `a + b - sigmoid(x)`.
    Sigmoid {
        var_index: usize,
        k: f64,
        theta: f64,
        a: f64,
        b: f64,
        positive: bool,
    },
    /// Haldane-Andrews growth term `x / (theta + x + x^2 / kappa)`.
    Haldane {
        var_index: usize,
        theta: f64,
        kappa: f64,
    },
    /// A function given by a table of `(x, f(x))` points, interpolated linearly between
    /// them and constant outside of the table.
    Explicit {
        var_index: usize,
        points: Vec<(f64, f64)>,
    },
}

impl Evaluable {
    /// Build an [`Evaluable::Explicit`] function, sorting the points by their `x` coordinate.
    ///
    /// Tables created directly (e.g. when deserialized) must already be sorted, otherwise
    /// the model is rejected by [`OdeModel::validate`](crate::model::OdeModel::validate).
    pub fn explicit(var_index: usize, mut points: Vec<(f64, f64)>) -> Evaluable {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Evaluable::Explicit { var_index, points }
    }

    pub fn var_index(&self) -> usize {
        match self {
            Evaluable::Hill { var_index, .. }
            | Evaluable::Sigmoid { var_index, .. }
            | Evaluable::Haldane { var_index, .. }
            | Evaluable::Explicit { var_index, .. } => *var_index,
        }
    }

    /// True if every numeric field of the function is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Evaluable::Hill { theta, n, a, b, .. } => {
                [theta, n, a, b].iter().all(|v| v.is_finite())
            }
            Evaluable::Sigmoid { k, theta, a, b, .. } => {
                [k, theta, a, b].iter().all(|v| v.is_finite())
            }
            Evaluable::Haldane { theta, kappa, .. } => theta.is_finite() && kappa.is_finite(),
            Evaluable::Explicit { points, .. } => points
                .iter()
                .all(|(x, y)| x.is_finite() && y.is_finite()),
        }
    }

    /// False for explicit tables whose `x` coordinates are not strictly increasing.
    pub fn has_ordered_points(&self) -> bool {
        match self {
            Evaluable::Explicit { points, .. } => points.windows(2).all(|w| w[0].0 < w[1].0),
            _ => true,
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Evaluable::Hill {
                theta,
                n,
                a,
                b,
                positive,
                ..
            } => {
                let x_n = x.powf(*n);
                let value = a + (b - a) * x_n / (theta.powf(*n) + x_n);
                if *positive { value } else { a + b - value }
            }
            Evaluable::Sigmoid {
                k,
                theta,
                a,
                b,
                positive,
                ..
            } => {
                let value = a + (b - a) * 0.5 * (1.0 + (k * (x - theta)).tanh());
                if *positive { value } else { a + b - value }
            }
            Evaluable::Haldane { theta, kappa, .. } => x / (theta + x + x.powi(2) / kappa),
            Evaluable::Explicit { points, .. } => interpolate(points, x),
        }
    }
}

fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    if x <= first.0 {
        return first.1;
    }
    for window in points.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        if x == x1 {
            return y1;
        }
        if x < x1 {
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    points[points.len() - 1].1
}
