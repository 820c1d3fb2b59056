//! Arnoux–Yoccoz style pseudo-Anosov maps on the projective plane.
//!
//! A measured foliation of RP² is encoded on the disk model by its boundary data (interval
//! lengths and pairing). Separatrices are extended crossing by crossing; pairs of good
//! separatrix segments close up into one-sided curves; cutting along such a curve gives a
//! new disk foliation and an integer transition matrix. When the cut reproduces a rescaled
//! copy of the foliation, the Perron–Frobenius data of that matrix describes a pseudo-Anosov
//! map.
//!
//! Layout
//! - `circle`: points with side tags, arcs, per-division-point exclusion arcs.
//! - `matrix`: non-negative integer matrices and their Perron–Frobenius eigenpair.
//! - `disk`: foliations of the disk, input validation, weighted trees.
//! - `rp2`: the search engine (segments, curves, cuts, self-similarity).
//!
//! API Policy
//! - The crate is consumed by the workspace CLI. `api` lists the names callers should
//!   reach for; everything else may move between releases.

pub mod api;
pub mod circle;
pub mod disk;
pub mod matrix;
pub mod rp2;

mod cfg;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use disk::{FoliationDisk, InputError, WeightedTree};
pub use rp2::{FoliationRp2, SearchCfg, SearchError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::circle::{Arc, CirclePoint, Side};
    pub use crate::disk::{FoliationDisk, InputError, WeightedTree};
    pub use crate::matrix::AlmostPfMatrix;
    pub use crate::rp2::{
        CurveReport, FoliationRp2, GoodOneSidedCurve, PseudoAnosov, SearchCfg, SearchError,
        Symmetry,
    };
}
