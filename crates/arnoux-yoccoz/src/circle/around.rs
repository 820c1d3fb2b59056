//! Per-division-point exclusion arcs.
//!
//! Purpose
//! - For every division point of a foliation, remember the largest arc around it that
//!   contains none of the intersection points recorded so far.
//! - Separatrix segments carry one of these as a snapshot of "where the segment has
//!   already crossed the boundary"; goodness and closing-arc tests read it.
//!
//! Why this design
//! - The division points are owned once by the foliation and shared through an `Rc<[_]>`.
//!   Every snapshot holds a clone of the same `Rc`, so intersecting two snapshots can check
//!   identity cheaply and the owner can never mutate the points under a borrower.

use std::fmt;
use std::rc::Rc;

use super::arc::Arc;
use super::point::CirclePoint;

#[derive(Clone, Debug)]
pub struct ArcsAroundDivPoints {
    div_points: Rc<[CirclePoint]>,
    // Empty until the first insertion: nothing has been excluded yet.
    arcs: Vec<Arc>,
}

impl ArcsAroundDivPoints {
    pub fn new(div_points: Rc<[CirclePoint]>) -> Self {
        Self {
            div_points,
            arcs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn div_points(&self) -> &[CirclePoint] {
        &self.div_points
    }

    /// One arc per division point, or an empty slice before the first insertion.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    fn shares_div_points(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.div_points, &other.div_points) || self.div_points == other.div_points
    }

    /// Records an intersection point.
    ///
    /// The first insertion anchors a full circle at `point` around every division point;
    /// later insertions shrink each arc toward its own division point.
    pub fn insert_point(&mut self, point: CirclePoint) {
        if self.arcs.is_empty() {
            self.arcs = vec![Arc::full_circle(point); self.div_points.len()];
        } else {
            for (arc, div) in self.arcs.iter_mut().zip(self.div_points.iter()) {
                arc.cut_off(*div, point);
            }
        }
    }

    /// Whether `point` lies in some arc. Vacuously true while empty.
    pub fn contains(&self, point: CirclePoint) -> bool {
        self.arcs.is_empty() || self.arcs.iter().any(|arc| arc.contains(point))
    }

    /// Combines the recorded intersection points of `self` and `other`.
    ///
    /// An empty operand acts as the identity.
    ///
    /// Panics if the two objects were built over different division points.
    pub fn intersect(&self, other: &Self) -> Self {
        assert!(
            self.shares_div_points(other),
            "cannot intersect arcs around different division points"
        );
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut out = self.clone();
        for ((arc, div), cut) in out
            .arcs
            .iter_mut()
            .zip(self.div_points.iter())
            .zip(other.arcs.iter())
        {
            arc.cut_off(*div, cut.left());
            arc.cut_off(*div, cut.right());
        }
        out
    }

    /// `arc` avoids every recorded endpoint and ends inside one of the stored arcs.
    pub fn contains_arc(&self, arc: &Arc) -> bool {
        if self.arcs.is_empty() {
            return true;
        }
        let crosses = self
            .arcs
            .iter()
            .any(|a| arc.contains(a.left()) || arc.contains(a.right()));
        !crosses && self.arcs.iter().any(|a| a.contains(arc.right()))
    }

    pub fn contains_div_point(&self, arc: &Arc) -> bool {
        self.div_points.iter().any(|d| arc.contains(*d))
    }

    /// Number of division points inside `arc`.
    pub fn div_points_in(&self, arc: &Arc) -> usize {
        self.div_points.iter().filter(|d| arc.contains(**d)).count()
    }

    /// `arc` stays inside the stored arcs and passes through exactly one division point.
    pub fn contains_arc_through_div_point(&self, arc: &Arc) -> bool {
        self.contains_arc(arc) && self.div_points_in(arc) == 1
    }
}

impl fmt::Display for ArcsAroundDivPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, div) in self.div_points.iter().enumerate() {
            match self.arcs.get(i) {
                Some(arc) => writeln!(f, "{i} ({div}): {arc}")?,
                None => writeln!(f, "{i} ({div}): whole circle")?,
            }
        }
        Ok(())
    }
}
