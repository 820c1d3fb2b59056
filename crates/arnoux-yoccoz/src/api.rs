//! Curated API for the CLI and benches.
//!
//! Prefer these re-exports over reaching into submodules, so internal layout can change
//! without touching callers.

// Circle primitives
pub use crate::circle::{
    distance_between, frac_part, is_between, Arc, ArcsAroundDivPoints, CirclePoint, Side,
};
// Disk foliations and their inputs
pub use crate::disk::{
    validate_lengths, validate_pairing, FoliationDisk, InputError, NodeId, WeightedTree,
};
// Perron–Frobenius matrices
pub use crate::matrix::{AlmostPfMatrix, MatrixError};
// RP² search
pub use crate::rp2::{
    are_depths_good_for_one_sided_curve, CurveReport, FoliationRp2, GoodOneSidedCurve,
    PseudoAnosov, SearchCfg, SearchError, SeparatrixSegment, Symmetry, TransitionData,
    TransitionMatrix,
};
