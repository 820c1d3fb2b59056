//! Foliations of RP²: separatrix tracking, one-sided curves, and self-similarity.
//!
//! Purpose
//! - RP² is the disk with antipodal boundary points identified. A separatrix leaving a
//!   division point crosses the disk, re-enters at the antipode, follows a leaf, and so on;
//!   `FoliationRp2` extends these paths one crossing at a time and keeps every prefix
//!   ("segment") that could still close up into a transverse one-sided curve.
//! - Pairs of such segments yield good one-sided curves. Cutting RP² along one of them
//!   gives a new disk foliation plus an integer transition matrix; when the cut foliation
//!   is a rescaled copy of the original, the matrix's PF eigenvalue is the stretch data of
//!   an Arnoux–Yoccoz style pseudo-Anosov map.
//!
//! Why this design
//! - All search is lazy and incremental: segments are only lengthened when a query needs
//!   a deeper one, and results are cached per separatrix and side.
//! - Expected failures are values (`SearchError`): `NotFound` lets callers try the next
//!   candidate, `SaddleConnection` is sticky per separatrix and aborts the dependent search.
//! - Candidate foliations built from eigenvectors are ordinary `FoliationRp2` values with
//!   their own caches, so a self-similarity check is the same search run on the candidate.
//!
//! Layout: `types.rs` (segments, curves, errors, settings), `segments.rs` (lengthening and
//! good-segment queries), `curves.rs` (curve discovery), `cut.rs` (cut and reglue),
//! `similarity.rs` (pseudo-Anosov detection).

mod curves;
mod cut;
mod segments;
mod similarity;
mod types;

pub use curves::are_depths_good_for_one_sided_curve;
pub use cut::{Symmetry, TransitionData, TransitionMatrix};
pub use similarity::{CurveReport, PseudoAnosov};
pub use types::{GoodOneSidedCurve, SearchCfg, SearchError, SeparatrixSegment};

use std::fmt;

use crate::circle::Side;
use crate::disk::{FoliationDisk, InputError, WeightedTree};

#[derive(Clone, Debug)]
pub struct FoliationRp2 {
    disk: FoliationDisk,
    cfg: SearchCfg,
    // Unshifted segment of each separatrix at its current depth.
    current: Vec<SeparatrixSegment>,
    // good[sep][side.slot()], increasing depth.
    good: Vec<[Vec<SeparatrixSegment>; 2]>,
    saddle: Vec<bool>,
    // Deduplicated, longest connecting arc first.
    curves: Vec<GoodOneSidedCurve>,
}

impl FoliationRp2 {
    pub fn new(lengths: Vec<f64>, pairing: Vec<usize>) -> Result<Self, InputError> {
        Ok(Self::from_disk(FoliationDisk::new(lengths, pairing)?))
    }

    pub fn from_tree(tree: &WeightedTree) -> Self {
        Self::from_disk(FoliationDisk::from_tree(tree))
    }

    /// The genus-`genus` Arnoux–Yoccoz foliation (`genus >= 3`).
    pub fn arnoux_yoccoz(genus: usize) -> Result<Self, InputError> {
        Ok(Self::from_tree(&WeightedTree::arnoux_yoccoz(genus)?))
    }

    pub fn from_disk(disk: FoliationDisk) -> Self {
        let n = disk.num_separatrices();
        let current: Vec<SeparatrixSegment> = (0..n)
            .map(|sep| SeparatrixSegment::new(sep, &disk))
            .collect();
        let mut good: Vec<[Vec<SeparatrixSegment>; 2]> =
            (0..n).map(|_| [Vec::new(), Vec::new()]).collect();
        for (segment, lists) in current.iter().zip(good.iter_mut()) {
            segments::push_good_shifts(&disk, segment, lists);
        }
        Self {
            disk,
            cfg: SearchCfg::default(),
            current,
            good,
            saddle: vec![false; n],
            curves: Vec::new(),
        }
    }

    pub fn with_cfg(mut self, cfg: SearchCfg) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn disk(&self) -> &FoliationDisk {
        &self.disk
    }

    pub fn cfg(&self) -> SearchCfg {
        self.cfg
    }

    #[inline]
    pub fn num_separatrices(&self) -> usize {
        self.disk.num_separatrices()
    }

    /// Depth reached so far by the unshifted segment of `separatrix`.
    pub fn current_depth(&self, separatrix: usize) -> usize {
        self.current[separatrix].depth
    }

    /// Good shifted segments found so far, by increasing depth.
    pub fn good_segments(&self, separatrix: usize, side: Side) -> &[SeparatrixSegment] {
        &self.good[separatrix][side.slot()]
    }

    pub fn has_saddle_connection(&self, separatrix: usize) -> bool {
        self.saddle[separatrix]
    }

    pub fn saddle_connections(&self) -> Vec<usize> {
        (0..self.num_separatrices())
            .filter(|&sep| self.saddle[sep])
            .collect()
    }

    /// Curves found by [`FoliationRp2::generate_good_curves`], longest connecting arc first.
    pub fn good_curves(&self) -> &[GoodOneSidedCurve] {
        &self.curves
    }
}

impl fmt::Display for FoliationRp2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.disk.fmt(f)
    }
}
