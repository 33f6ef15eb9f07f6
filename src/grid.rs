//! Encoding of the rectangular threshold grid.
//!
//! States are the cells of the grid. A state is identified by a single `usize` which encodes
//! the cell coordinates in a mixed-radix system where the first variable is the least
//! significant "digit".

use crate::model::OdeModel;

/// A concrete corner of a grid cell: one threshold value for every model variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    values: Vec<f64>,
}

impl Vertex {
    pub fn new(values: Vec<f64>) -> Vertex {
        Vertex { values }
    }

    /// The threshold value of the given variable in this vertex.
    pub fn value(&self, variable: usize) -> f64 {
        self.values[variable]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Navigation in a rectangular grid of states.
///
/// # Panics
///
/// Implementations are allowed to panic when given a state or a dimension that does not
/// belong to the grid.
pub trait GridEncoder: Send + Sync {
    fn dimensions(&self) -> usize;

    fn state_count(&self) -> usize;

    /// The neighbouring state above `state` in the given dimension, unless `state` lies
    /// at the upper boundary of the grid.
    fn higher_node(&self, state: usize, dimension: usize) -> Option<usize>;

    /// The neighbouring state below `state` in the given dimension, unless `state` lies
    /// at the lower boundary of the grid.
    fn lower_node(&self, state: usize, dimension: usize) -> Option<usize>;

    /// The corner of `state` selected by `mask`: bit `i` selects the lower (`0`) or upper
    /// (`1`) threshold of the cell in dimension `i`.
    fn vertex(&self, state: usize, mask: usize) -> Vertex;
}

/// The default [`GridEncoder`] built directly from model thresholds.
#[derive(Clone, Debug)]
pub struct NodeEncoder {
    thresholds: Vec<Vec<f64>>,
    /// `strides[i]` is the product of cell counts of all variables before `i`.
    strides: Vec<usize>,
    state_count: usize,
}

impl NodeEncoder {
    pub fn new(model: &OdeModel) -> NodeEncoder {
        let thresholds: Vec<Vec<f64>> = model
            .variables
            .iter()
            .map(|v| v.thresholds.clone())
            .collect();
        let mut strides = Vec::with_capacity(thresholds.len());
        let mut state_count = 1;
        for t in &thresholds {
            strides.push(state_count);
            state_count *= t.len() - 1;
        }
        NodeEncoder {
            thresholds,
            strides,
            state_count,
        }
    }

    fn cell_count(&self, dimension: usize) -> usize {
        self.thresholds[dimension].len() - 1
    }

    /// The cell coordinate of `state` in the given dimension.
    pub fn coordinate(&self, state: usize, dimension: usize) -> usize {
        (state / self.strides[dimension]) % self.cell_count(dimension)
    }

    /// Cell coordinates of `state` in all dimensions.
    pub fn decode(&self, state: usize) -> Vec<usize> {
        (0..self.dimensions())
            .map(|d| self.coordinate(state, d))
            .collect()
    }

    /// Inverse of [`NodeEncoder::decode`].
    pub fn encode(&self, coordinates: &[usize]) -> usize {
        coordinates
            .iter()
            .zip(&self.strides)
            .map(|(c, stride)| c * stride)
            .sum()
    }

    /// Human-readable description of the cell, e.g. `[0, 1]x[2, 3.5]`.
    pub fn describe(&self, state: usize) -> String {
        let parts: Vec<String> = (0..self.dimensions())
            .map(|d| {
                let c = self.coordinate(state, d);
                format!("[{}, {}]", self.thresholds[d][c], self.thresholds[d][c + 1])
            })
            .collect();
        parts.join("x")
    }
}

impl GridEncoder for NodeEncoder {
    fn dimensions(&self) -> usize {
        self.thresholds.len()
    }

    fn state_count(&self) -> usize {
        self.state_count
    }

    fn higher_node(&self, state: usize, dimension: usize) -> Option<usize> {
        assert!(state < self.state_count, "State {state} is not in the grid.");
        if self.coordinate(state, dimension) + 1 < self.cell_count(dimension) {
            Some(state + self.strides[dimension])
        } else {
            None
        }
    }

    fn lower_node(&self, state: usize, dimension: usize) -> Option<usize> {
        assert!(state < self.state_count, "State {state} is not in the grid.");
        if self.coordinate(state, dimension) > 0 {
            Some(state - self.strides[dimension])
        } else {
            None
        }
    }

    fn vertex(&self, state: usize, mask: usize) -> Vertex {
        assert!(state < self.state_count, "State {state} is not in the grid.");
        let values = (0..self.dimensions())
            .map(|d| {
                let upper = (mask >> d) & 1;
                self.thresholds[d][self.coordinate(state, d) + upper]
            })
            .collect();
        Vertex::new(values)
    }
}
