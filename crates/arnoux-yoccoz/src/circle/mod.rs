//! Circle geometry on `R/Z`: side-tagged points, arcs, and per-division-point arcs.
//!
//! The boundary of the disk model has circumference 1. A point may be shifted
//! infinitesimally to the left or right of its value, which is how shifted separatrix
//! endpoints and the two copies of a division point are told apart without picking an
//! epsilon.

mod arc;
mod around;
mod point;

pub use arc::Arc;
pub use around::ArcsAroundDivPoints;
pub use point::{distance_between, frac_part, is_between, CirclePoint, Side};
