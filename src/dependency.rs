//! Static analysis of variable dependencies in model equations.
//!
//! The sign of a derivative at the facet of a cell only depends on the corners that differ in
//! dimensions the derivative actually depends on. For each variable, we therefore precompute
//! the set of *valid* corner masks: masks with zero bits in all dimensions the variable's
//! derivative does not depend on.

use crate::model::OdeModel;
use log::trace;

/// Per-variable dependence masks and the corresponding valid corner masks.
#[derive(Clone, Debug, PartialEq)]
pub struct DependencyMasks {
    /// Bit `i` is set if the variable does *not* depend on variable `i`.
    independence: Vec<usize>,
    valid_masks: Vec<Vec<usize>>,
}

impl DependencyMasks {
    pub fn new(model: &OdeModel) -> DependencyMasks {
        let dimensions = model.dimensions();
        let full = full_mask(dimensions);
        let mut independence = Vec::with_capacity(dimensions);
        let mut valid_masks = Vec::with_capacity(dimensions);
        for (var, variable) in model.variables.iter().enumerate() {
            let dependent = variable
                .dependencies()
                .into_iter()
                .fold(0usize, |mask, i| mask | (1 << i));
            let independent = full & !dependent;
            let masks = submasks(dependent);
            trace!(
                "[var:{var}] Dependence mask {independent:#b} admits {} corner masks.",
                masks.len()
            );
            independence.push(independent);
            valid_masks.push(masks);
        }
        DependencyMasks {
            independence,
            valid_masks,
        }
    }

    /// Bit mask of dimensions the variable's derivative does *not* depend on.
    pub fn independence_mask(&self, variable: usize) -> usize {
        self.independence[variable]
    }

    /// A corner mask is valid for a variable if it has no set bit in an independent dimension.
    pub fn is_valid(&self, variable: usize, mask: usize) -> bool {
        self.independence[variable] & mask == 0
    }

    /// All valid corner masks of the variable, in ascending order.
    pub fn valid_masks(&self, variable: usize) -> &[usize] {
        &self.valid_masks[variable]
    }

    /// True if the variable's derivative depends on the value of the variable itself.
    pub fn is_self_dependent(&self, variable: usize) -> bool {
        (self.independence[variable] >> variable) & 1 == 0
    }
}

fn full_mask(dimensions: usize) -> usize {
    if dimensions >= usize::BITS as usize {
        usize::MAX
    } else {
        (1usize << dimensions) - 1
    }
}

/// All submasks of `mask` in ascending order. This is the same set as filtering all
/// `2^dimensions` masks, but only costs time proportional to the number of valid masks.
fn submasks(mask: usize) -> Vec<usize> {
    let mut result = Vec::with_capacity(1 << mask.count_ones());
    let mut current = mask;
    loop {
        result.push(current);
        if current == 0 {
            break;
        }
        current = (current - 1) & mask;
    }
    result.reverse();
    result
}

#[cfg(test)]
mod tests {
    use crate::dependency::{DependencyMasks, submasks};
    use crate::model::{Evaluable, OdeModel, Parameter, Summand, Variable};

    fn model() -> OdeModel {
        let t = vec![0.0, 1.0, 2.0];
        OdeModel::new(
            vec![
                // x' = p - x * y
                Variable::new(
                    "x",
                    t.clone(),
                    vec![
                        Summand::constant(1.0).with_parameter(0),
                        Summand::constant(-1.0).times_variable(0).times_variable(1),
                    ],
                ),
                // y' = haldane(z)
                Variable::new(
                    "y",
                    t.clone(),
                    vec![Summand::constant(1.0).times(Evaluable::Haldane {
                        var_index: 2,
                        theta: 1.0,
                        kappa: 1.0,
                    })],
                ),
                // z' = 2
                Variable::new("z", t, vec![Summand::constant(2.0)]),
            ],
            vec![Parameter::new("p", 0.0, 1.0)],
        )
        .unwrap()
    }

    #[test]
    fn submasks_are_sorted() {
        assert_eq!(submasks(0), vec![0]);
        assert_eq!(submasks(0b101), vec![0b000, 0b001, 0b100, 0b101]);
        assert_eq!(submasks(0b111).len(), 8);
    }

    #[test]
    fn independence_masks() {
        let masks = DependencyMasks::new(&model());
        assert_eq!(masks.independence_mask(0), 0b100);
        assert_eq!(masks.independence_mask(1), 0b011);
        assert_eq!(masks.independence_mask(2), 0b111);
    }

    #[test]
    fn valid_masks_match_brute_force_filter() {
        let masks = DependencyMasks::new(&model());
        for var in 0..3 {
            let expected: Vec<usize> = (0..8).filter(|m| masks.is_valid(var, *m)).collect();
            assert_eq!(masks.valid_masks(var), expected.as_slice());
        }
        assert_eq!(masks.valid_masks(0), &[0b00, 0b01, 0b10, 0b11]);
        assert_eq!(masks.valid_masks(1), &[0b000, 0b100]);
    }

    #[test]
    fn constant_derivative_has_single_mask() {
        let masks = DependencyMasks::new(&model());
        assert_eq!(masks.valid_masks(2), &[0]);
        assert!(!masks.is_self_dependent(2));
    }

    #[test]
    fn self_dependence() {
        let masks = DependencyMasks::new(&model());
        assert!(masks.is_self_dependent(0));
        assert!(!masks.is_self_dependent(1));
    }
}
