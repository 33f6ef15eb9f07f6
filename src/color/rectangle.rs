use crate::color::ColorAlgebra;
use crate::model::OdeModel;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A one-dimensional interval `[low, high]`. Intervals with `low >= high` are empty,
/// i.e. a single point is not a valid (non-empty) interval.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

/// An axis-aligned rectangle in the parameter space, one [`Interval`] per parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    intervals: Vec<Interval>,
}

/// A finite union of non-empty [`Rectangle`] objects.
///
/// Two sets with the same rectangles are equal, but the same parameter set can have multiple
/// representations. Use [`ColorAlgebra::canonicalize`] to obtain a simplified, sorted
/// representation, or [`ColorAlgebra::is_equivalent`] to compare the denoted sets.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectangleSet {
    rectangles: Vec<Rectangle>,
}

/// Implements [`ColorAlgebra`] for [`RectangleSet`] colors within fixed parameter bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct RectangleAlgebra {
    bounds: Rectangle,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Interval {
        Interval { low, high }
    }

    pub fn is_empty(&self) -> bool {
        self.low >= self.high
    }

    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.low.max(other.low), self.high.min(other.high))
    }

    pub fn encloses(&self, other: &Interval) -> bool {
        other.is_empty() || (other.low >= self.low && other.high <= self.high)
    }

    /// True if the two intervals overlap or share an endpoint.
    fn touches(&self, other: &Interval) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    fn hull(&self, other: &Interval) -> Interval {
        Interval::new(self.low.min(other.low), self.high.max(other.high))
    }

    fn total_cmp(&self, other: &Interval) -> Ordering {
        self.low
            .total_cmp(&other.low)
            .then(self.high.total_cmp(&other.high))
    }
}

impl Rectangle {
    pub fn new(intervals: Vec<Interval>) -> Rectangle {
        Rectangle { intervals }
    }

    pub fn from_bounds(bounds: &[(f64, f64)]) -> Rectangle {
        Rectangle::new(bounds.iter().map(|(l, h)| Interval::new(*l, *h)).collect())
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn dimensions(&self) -> usize {
        self.intervals.len()
    }

    /// A rectangle is empty if any of its intervals is empty. Note that a zero-dimensional
    /// rectangle is not empty (it represents the single valuation of no parameters).
    pub fn is_empty(&self) -> bool {
        self.intervals.iter().any(|i| i.is_empty())
    }

    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        Rectangle::new(
            self.intervals
                .iter()
                .zip(&other.intervals)
                .map(|(a, b)| a.intersect(b))
                .collect(),
        )
    }

    pub fn encloses(&self, other: &Rectangle) -> bool {
        other.is_empty()
            || self
                .intervals
                .iter()
                .zip(&other.intervals)
                .all(|(a, b)| a.encloses(b))
    }

    /// Try to merge two rectangles into one. This succeeds if they are equal, or differ
    /// in exactly one dimension where the intervals overlap or touch.
    pub fn merge(&self, other: &Rectangle) -> Option<Rectangle> {
        let mut merge_on = None;
        for (i, (a, b)) in self.intervals.iter().zip(&other.intervals).enumerate() {
            if a != b {
                if merge_on.is_none() && a.touches(b) {
                    merge_on = Some(i);
                } else {
                    return None;
                }
            }
        }
        let Some(dim) = merge_on else {
            return Some(self.clone());
        };
        let mut intervals = self.intervals.clone();
        intervals[dim] = self.intervals[dim].hull(&other.intervals[dim]);
        Some(Rectangle::new(intervals))
    }

    /// Compute `self \ other` as a list of disjoint non-empty rectangles.
    pub fn subtract(&self, other: &Rectangle) -> Vec<Rectangle> {
        if self.intersect(other).is_empty() {
            return vec![self.clone()];
        }
        let mut working = self.intervals.clone();
        let mut result = Vec::new();
        for dim in 0..self.intervals.len() {
            let this = self.intervals[dim];
            let that = other.intervals[dim];
            let below = Interval::new(this.low, that.low);
            let above = Interval::new(that.high, this.high);
            for piece in [below, above] {
                if !piece.is_empty() {
                    let mut intervals = working.clone();
                    intervals[dim] = piece;
                    result.push(Rectangle::new(intervals));
                }
            }
            working[dim] = this.intersect(&that);
        }
        result
    }

    fn total_cmp(&self, other: &Rectangle) -> Ordering {
        for (a, b) in self.intervals.iter().zip(&other.intervals) {
            let cmp = a.total_cmp(b);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        self.intervals.len().cmp(&other.intervals.len())
    }
}

impl RectangleSet {
    /// Build a set from arbitrary rectangles. Empty rectangles are discarded.
    pub fn new(rectangles: Vec<Rectangle>) -> RectangleSet {
        RectangleSet {
            rectangles: rectangles.into_iter().filter(|r| !r.is_empty()).collect(),
        }
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }
}

impl RectangleAlgebra {
    pub fn new(bounds: Rectangle) -> RectangleAlgebra {
        RectangleAlgebra { bounds }
    }

    /// The algebra over the full parameter space of the given model.
    pub fn from_model(model: &OdeModel) -> RectangleAlgebra {
        RectangleAlgebra::new(Rectangle::from_bounds(&model.parameter_bounds()))
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }
}

impl ColorAlgebra for RectangleAlgebra {
    type Color = RectangleSet;

    fn universal(&self) -> RectangleSet {
        RectangleSet::new(vec![self.bounds.clone()])
    }

    fn empty(&self) -> RectangleSet {
        RectangleSet::default()
    }

    fn union(&self, left: &RectangleSet, right: &RectangleSet) -> RectangleSet {
        if left.is_empty() {
            return right.clone();
        }
        if right.is_empty() {
            return left.clone();
        }
        let all = left.rectangles.iter().chain(&right.rectangles).cloned();
        RectangleSet {
            rectangles: remove_redundant(all),
        }
    }

    fn intersect(&self, left: &RectangleSet, right: &RectangleSet) -> RectangleSet {
        let mut result = Vec::new();
        for a in &left.rectangles {
            for b in &right.rectangles {
                let r = a.intersect(b);
                if !r.is_empty() {
                    result.push(r);
                }
            }
        }
        RectangleSet {
            rectangles: remove_redundant(result),
        }
    }

    fn complement(&self, color: &RectangleSet) -> RectangleSet {
        let mut remaining = vec![self.bounds.clone()];
        for cut in &color.rectangles {
            remaining = remaining.iter().flat_map(|r| r.subtract(cut)).collect();
        }
        RectangleSet::new(remaining)
    }

    fn is_satisfiable(&self, color: &RectangleSet) -> bool {
        !color.is_empty()
    }

    fn canonicalize(&self, color: &RectangleSet) -> RectangleSet {
        let mut rectangles = remove_redundant(color.rectangles.iter().cloned());
        while let Some((i, j, merged)) = find_merge(&rectangles) {
            rectangles.swap_remove(j);
            rectangles[i] = merged;
            rectangles = remove_redundant(rectangles);
        }
        rectangles.sort_by(|a, b| a.total_cmp(b));
        RectangleSet { rectangles }
    }

    /// # Panics
    ///
    /// Panics if `parameter` is not a dimension of the parameter space.
    fn restrict(&self, parameter: usize, low: f64, high: f64) -> RectangleSet {
        let mut intervals = self.bounds.intervals.clone();
        intervals[parameter] = intervals[parameter].intersect(&Interval::new(low, high));
        RectangleSet::new(vec![Rectangle::new(intervals)])
    }
}

/// Drop every rectangle that is enclosed by another one (keeping one copy of duplicates).
fn remove_redundant(rectangles: impl IntoIterator<Item = Rectangle>) -> Vec<Rectangle> {
    let mut result: Vec<Rectangle> = Vec::new();
    for r in rectangles {
        if r.is_empty() || result.iter().any(|kept| kept.encloses(&r)) {
            continue;
        }
        result.retain(|kept| !r.encloses(kept));
        result.push(r);
    }
    result
}

fn find_merge(rectangles: &[Rectangle]) -> Option<(usize, usize, Rectangle)> {
    for i in 0..rectangles.len() {
        for j in (i + 1)..rectangles.len() {
            if let Some(merged) = rectangles[i].merge(&rectangles[j]) {
                return Some((i, j, merged));
            }
        }
    }
    None
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.intervals.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("x"))
    }
}

impl Display for RectangleSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.rectangles.iter().map(|r| r.to_string()).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
