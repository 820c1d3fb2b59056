//! Cutting RP² along a one-sided curve and regluing it into a disk.
//!
//! Purpose
//! - The curve's connecting arc, doubled, is the boundary of the new disk. Every
//!   separatrix first meets that arc at some good segment; the rescaled meeting points are
//!   the new division points.
//! - Each new interval is bounded by two such segments. Summing their interval crossings
//!   gives the column of the transition matrix for that interval.
//!
//! Why this design
//! - `TransitionData` keeps the cut disk and the matrix together so a dihedral relabeling
//!   of the disk permutes the matrix columns in the same step.
//! - One new interval wraps around the antipode of the arc's left end; its bounding
//!   segments are not the ones its endpoints suggest, so it gets a separate correction.

use std::fmt;

use super::types::{GoodOneSidedCurve, SearchError, SeparatrixSegment};
use super::FoliationRp2;
use crate::circle::{distance_between, Arc, CirclePoint, Side};
use crate::disk::FoliationDisk;
use crate::matrix::{AlmostPfMatrix, MatrixError};

/// Crossing counts of the cut: entry `(row, col)` counts how often the segments bounding
/// new interval `col` cross original interval `row`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionMatrix {
    rows: Vec<Vec<i64>>,
}

impl TransitionMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            rows: vec![vec![0; n]; n],
        }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn entry(&self, row: usize, col: usize) -> i64 {
        self.rows[row][col]
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Adds `weights[col] * crossings[row]` to every entry.
    pub fn accumulate(&mut self, crossings: &[usize], weights: &[i64]) {
        for (row, &count) in self.rows.iter_mut().zip(crossings) {
            let count = count as i64;
            for (entry, &w) in row.iter_mut().zip(weights) {
                *entry += w * count;
            }
        }
    }

    /// Column `i` becomes column `i + 1`.
    pub fn rotate_columns(&mut self) {
        for row in &mut self.rows {
            row.rotate_right(1);
        }
    }

    /// Column `i` becomes column `n - 1 - i`.
    pub fn reverse_columns(&mut self) {
        for row in &mut self.rows {
            row.reverse();
        }
    }
}

impl fmt::Display for TransitionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|x| x.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Dihedral relabeling: optional reflection first, then `rotation` rotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Symmetry {
    pub reflection: bool,
    pub rotation: usize,
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reflection {
            write!(f, "reflect, rotate {}", self.rotation)
        } else {
            write!(f, "rotate {}", self.rotation)
        }
    }
}

/// The disk obtained by cutting along a curve, with its transition matrix.
#[derive(Clone, Debug)]
pub struct TransitionData {
    disk: FoliationDisk,
    matrix: TransitionMatrix,
}

impl TransitionData {
    pub fn disk(&self) -> &FoliationDisk {
        &self.disk
    }

    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    pub fn rotate(&mut self) {
        self.disk.rotate();
        self.matrix.rotate_columns();
    }

    pub fn reflect(&mut self) {
        self.disk.reflect();
        self.matrix.reverse_columns();
    }

    pub fn apply(&mut self, symmetry: Symmetry) {
        if symmetry.reflection {
            self.reflect();
        }
        for _ in 0..symmetry.rotation {
            self.rotate();
        }
    }

    /// Half-size matrix over the paired intervals: `m[i][j] = M[2i][2j] + M[2i][pair(2j)]`.
    ///
    /// Fails with `NegativeEntry` when the wrap-around correction overshoots.
    pub fn folded_matrix(&self) -> Result<AlmostPfMatrix, MatrixError> {
        let half = self.disk.num_separatrices() / 2;
        let rows = (0..half)
            .map(|i| {
                (0..half)
                    .map(|j| {
                        self.matrix.entry(2 * i, 2 * j)
                            + self.matrix.entry(2 * i, self.disk.pair(2 * j))
                    })
                    .collect()
            })
            .collect();
        AlmostPfMatrix::new(rows)
    }
}

fn unit(n: usize, k: usize) -> Vec<i64> {
    let mut v = vec![0; n];
    v[k] = 1;
    v
}

impl FoliationRp2 {
    /// Cuts along `curve` and reglues into a disk.
    ///
    /// Saddle connections met while lengthening propagate; a degenerate cut (coinciding
    /// meeting points, or a pairing that is not a valid disk pairing) is `NotFound`.
    pub fn cut_along_curve(
        &mut self,
        curve: &GoodOneSidedCurve,
    ) -> Result<TransitionData, SearchError> {
        let n = self.num_separatrices();
        let arc = curve.connecting_arc;
        let circumference = 2.0 * arc.length();

        let mut segments: Vec<SeparatrixSegment> = Vec::with_capacity(n);
        let mut points: Vec<CirclePoint> = Vec::with_capacity(n);
        for sep in 0..n {
            let segment = self.get_first_intersection(sep, &arc, Side::Right)?;
            let t = distance_between(arc.left(), segment.endpoint) / circumference;
            points.push(if segment.ends_on_front_side() {
                CirclePoint::new(t)
            } else {
                CirclePoint::new(t + 0.5)
            });
            segments.push(segment);
        }

        // order[i]: old separatrix at new division point i; position is its inverse.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| points[a].value().total_cmp(&points[b].value()));
        let mut position = vec![0; n];
        for (i, &sep) in order.iter().enumerate() {
            position[sep] = i;
        }
        let lengths: Vec<f64> = (0..n)
            .map(|i| distance_between(points[order[i]], points[order[(i + 1) % n]]))
            .collect();
        let wrap = order
            .iter()
            .filter(|&&sep| points[sep].value() < 0.5)
            .count()
            .checked_sub(1);

        let mut pairing = vec![0; n];
        for (i, &sep) in order.iter().enumerate() {
            let reversed = segments[sep].reverses_orientation();
            let partner = if reversed {
                self.disk.pair(self.disk.decrease_index(sep))
            } else {
                self.disk.increase_index(self.disk.pair(sep))
            };
            let j = position[partner];
            pairing[i] = if reversed == segments[partner].reverses_orientation() {
                (j + n - 1) % n
            } else {
                j
            };
        }

        let mut matrix = TransitionMatrix::zeros(n);
        for start in (0..n).step_by(2) {
            let wrapping = match wrap {
                Some(w) if w == start || w == pairing[start] => w,
                _ => {
                    let lower =
                        self.good_segment_for_endpoint(&segments[order[start + 1]], Side::Left)?;
                    let upper = self
                        .good_segment_for_endpoint(&segments[order[pairing[start]]], Side::Right)?;
                    matrix.accumulate(&lower.crossings, &unit(n, start));
                    matrix.accumulate(&upper.crossings, &unit(n, start));
                    continue;
                }
            };
            let right_bound =
                self.good_segment_for_endpoint(&segments[order[(wrapping + 1) % n]], Side::Left)?;
            let left_bound =
                self.good_segment_for_endpoint(&segments[order[pairing[wrapping]]], Side::Right)?;
            let half_arc = Arc::new(arc.left(), arc.right().centered());
            let across = self.disk.pair(self.disk.decrease_index(order[0]));
            let middle = self.get_first_intersection(across, &half_arc, Side::Left)?;
            let middle = self.good_segment_for_endpoint(&middle, Side::Left)?;
            let first = self.good_segment_for_endpoint(&segments[order[0]], Side::Left)?;
            let incomplete: Vec<i64> = (0..n)
                .map(|k| i64::from(k % 2 == 0) - i64::from(k < wrapping))
                .collect();
            matrix.accumulate(&middle.crossings, &incomplete);
            matrix.accumulate(&first.crossings, &incomplete);
            matrix.accumulate(&left_bound.crossings, &unit(n, start));
            matrix.accumulate(&right_bound.crossings, &unit(n, start));
        }

        let disk = FoliationDisk::new(lengths, pairing).map_err(|_| SearchError::NotFound)?;
        Ok(TransitionData { disk, matrix })
    }
}
