//! Closed arcs of the circle.

use std::fmt;

use super::point::{distance_between, is_between, CirclePoint};

/// Closed arc running forward from `left` to `right`.
///
/// `length` is always `distance_between(left, right)`, except for arcs built by
/// [`Arc::full_circle`], which have equal endpoints and length 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    left: CirclePoint,
    right: CirclePoint,
    length: f64,
}

impl Arc {
    pub fn new(left: CirclePoint, right: CirclePoint) -> Self {
        Self {
            left,
            right,
            length: distance_between(left, right),
        }
    }

    /// The whole circle, anchored at `anchor`.
    pub fn full_circle(anchor: CirclePoint) -> Self {
        Self {
            left: anchor,
            right: anchor,
            length: 1.0,
        }
    }

    #[inline]
    pub fn left(&self) -> CirclePoint {
        self.left
    }

    #[inline]
    pub fn right(&self) -> CirclePoint {
        self.right
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_full_circle(&self) -> bool {
        self.length == 1.0
    }

    pub fn contains(&self, t: CirclePoint) -> bool {
        self.is_full_circle() || is_between(self.left, self.right, t)
    }

    /// Splits the arc at `cutting` and keeps the piece that contains `reference`.
    ///
    /// A `cutting` point outside the arc leaves it unchanged.
    ///
    /// Panics if `reference` is not in the arc.
    pub fn cut_off(&mut self, reference: CirclePoint, cutting: CirclePoint) {
        assert!(
            self.contains(reference),
            "cut_off: reference point {reference} is outside {self}"
        );
        if !self.contains(cutting) {
            return;
        }
        *self = if is_between(self.left, reference, cutting) {
            Arc::new(cutting, self.right)
        } else {
            Arc::new(self.left, cutting)
        };
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}
