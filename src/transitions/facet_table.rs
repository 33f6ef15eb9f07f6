use crate::transitions::Orientation;
use std::sync::OnceLock;

/// A flat write-once table with one slot for every `(state, dimension, orientation)` facet.
///
/// Slots are laid out as `state + states * dimension + states * dimensions * orientation`.
pub struct FacetTable<C> {
    state_count: usize,
    dimensions: usize,
    slots: Vec<OnceLock<C>>,
}

impl<C> FacetTable<C> {
    pub fn new(state_count: usize, dimensions: usize) -> FacetTable<C> {
        let size = state_count * dimensions * Orientation::ALL.len();
        FacetTable {
            state_count,
            dimensions,
            slots: (0..size).map(|_| OnceLock::new()).collect(),
        }
    }

    fn index(&self, state: usize, dimension: usize, orientation: Orientation) -> usize {
        assert!(
            state < self.state_count && dimension < self.dimensions,
            "Facet ({state}, {dimension}) is not in the grid."
        );
        state
            + self.state_count * dimension
            + self.state_count * self.dimensions * orientation.index()
    }

    pub fn get(&self, state: usize, dimension: usize, orientation: Orientation) -> Option<&C> {
        self.slots[self.index(state, dimension, orientation)].get()
    }

    /// Store `value` unless the slot is already occupied. Returns the stored value.
    pub fn insert(
        &self,
        state: usize,
        dimension: usize,
        orientation: Orientation,
        value: C,
    ) -> &C {
        self.slots[self.index(state, dimension, orientation)].get_or_init(|| value)
    }

    /// The number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }
}
