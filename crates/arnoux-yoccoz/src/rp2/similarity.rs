//! Self-similar foliations and the pseudo-Anosov maps they carry.

use std::fmt;

use super::cut::{Symmetry, TransitionData};
use super::types::{GoodOneSidedCurve, SearchError};
use super::FoliationRp2;
use crate::circle::Side;
use crate::disk::FoliationDisk;
use crate::matrix::AlmostPfMatrix;

/// A foliation that reproduces itself, scaled, after cutting along `curve` and relabeling
/// by `symmetry`.
#[derive(Clone, Debug)]
pub struct PseudoAnosov {
    foliation: FoliationDisk,
    curve: GoodOneSidedCurve,
    symmetry: Symmetry,
    matrix: AlmostPfMatrix,
    eigenvalue: f64,
}

impl PseudoAnosov {
    pub fn foliation(&self) -> &FoliationDisk {
        &self.foliation
    }

    pub fn curve(&self) -> &GoodOneSidedCurve {
        &self.curve
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Folded transition matrix of the cut.
    pub fn matrix(&self) -> &AlmostPfMatrix {
        &self.matrix
    }

    /// Perron–Frobenius eigenvalue of [`PseudoAnosov::matrix`].
    pub fn eigenvalue(&self) -> f64 {
        self.eigenvalue
    }

    /// Factor by which the cut rescales the foliation: the reciprocal of the eigenvalue.
    pub fn stretch_factor(&self) -> f64 {
        1.0 / self.eigenvalue
    }
}

impl fmt::Display for PseudoAnosov {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.foliation)?;
        writeln!(f, "Curve: {}", self.curve)?;
        writeln!(f, "Symmetry: {}", self.symmetry)?;
        writeln!(
            f,
            "Eigenvalue: {:.12} (stretch factor {:.12})",
            self.eigenvalue,
            self.stretch_factor()
        )?;
        write!(f, "Matrix:\n{}", self.matrix)
    }
}

/// Outcome of the pseudo-Anosov search along one good curve.
#[derive(Clone, Debug)]
pub struct CurveReport {
    pub curve: GoodOneSidedCurve,
    pub outcome: Result<Vec<PseudoAnosov>, SearchError>,
}

impl FoliationRp2 {
    /// Pseudo-Anosov maps obtained by cutting along `curve`.
    ///
    /// Every relabeling of the cut disk with the original pairing proposes a candidate
    /// foliation whose lengths come from the PF eigenvector of the folded matrix. A candidate
    /// is kept when cutting it along the corresponding curve gives it back.
    pub fn find_new_pseudo_anosovs(
        &mut self,
        curve: &GoodOneSidedCurve,
    ) -> Result<Vec<PseudoAnosov>, SearchError> {
        let mut data = self.cut_along_curve(curve)?;
        let mut found = Vec::new();
        for reflection in [false, true] {
            for rotation in 0..self.num_separatrices() {
                if data.disk().pairs_equal(&self.disk) {
                    let symmetry = Symmetry {
                        reflection,
                        rotation,
                    };
                    found.extend(self.self_similar_candidate(curve, &data, symmetry));
                }
                data.rotate();
            }
            data.reflect();
        }
        Ok(found)
    }

    fn self_similar_candidate(
        &self,
        curve: &GoodOneSidedCurve,
        data: &TransitionData,
        symmetry: Symmetry,
    ) -> Option<PseudoAnosov> {
        let matrix = data.folded_matrix().ok()?;
        let eigenvector = matrix.pf_eigenvector()?;
        let pairing = self.disk.pairing().to_vec();
        let mut lengths = vec![0.0; pairing.len()];
        for (j, &v) in eigenvector.iter().enumerate() {
            lengths[2 * j] = v;
            lengths[pairing[2 * j]] = v;
        }
        let mut candidate = FoliationRp2::new(lengths, pairing).ok()?.with_cfg(self.cfg);
        candidate
            .check_self_similarity(
                curve.left.separatrix,
                curve.left.depth,
                Side::Left,
                curve.right.depth,
                symmetry,
            )
            .ok()
            .flatten()
    }

    /// Cuts along the curve given by `(separatrix, depth, side)` and its partner at
    /// `partner_depth`, applies `symmetry`, and compares with `self`.
    ///
    /// `Ok(None)` means the cut is a different foliation or its folded matrix is not
    /// Perron–Frobenius.
    pub fn check_self_similarity(
        &mut self,
        separatrix: usize,
        depth: usize,
        side: Side,
        partner_depth: usize,
        symmetry: Symmetry,
    ) -> Result<Option<PseudoAnosov>, SearchError> {
        let curve = self.good_one_sided_curve(separatrix, depth, side, partner_depth)?;
        let mut data = self.cut_along_curve(&curve)?;
        data.apply(symmetry);
        if !self.disk.equals(data.disk(), self.cfg.length_tolerance) {
            return Ok(None);
        }
        let Ok(matrix) = data.folded_matrix() else {
            return Ok(None);
        };
        let Some(eigenvalue) = matrix.pf_eigenvalue() else {
            return Ok(None);
        };
        Ok(Some(PseudoAnosov {
            foliation: self.disk.clone(),
            curve,
            symmetry,
            matrix,
            eigenvalue,
        }))
    }

    /// Generates good curves to `depth` and searches each curve whose segments are within
    /// the budget. A failure on one curve is reported and the next curve is tried.
    pub fn search_pseudo_anosovs(&mut self, depth: usize) -> Vec<CurveReport> {
        let curves: Vec<GoodOneSidedCurve> = self
            .generate_good_curves(depth)
            .iter()
            .filter(|c| c.left.depth <= depth && c.right.depth <= depth)
            .cloned()
            .collect();
        curves
            .into_iter()
            .map(|curve| {
                let outcome = self.find_new_pseudo_anosovs(&curve);
                CurveReport { curve, outcome }
            })
            .collect()
    }
}
