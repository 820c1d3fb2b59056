//! Measured foliations of the disk, transverse to the boundary.
//!
//! Purpose
//! - Encode a foliation by its boundary data: `n` intervals of the unit circle, the
//!   involution pairing the two ends of each leaf band, and the band widths (lengths).
//! - Follow a leaf from one boundary point to the next, and relabel intervals under the
//!   dihedral symmetries of the circle.
//!
//! Why this design
//! - Lengths are normalized to total 1 and paired lengths averaged once at construction,
//!   so every downstream computation can treat the circle as `R/Z`.
//! - Division points are shared as `Rc<[CirclePoint]>`; they never change after
//!   construction (rotation and reflection rebuild them), so snapshots that borrow them
//!   stay consistent.
//!
//! Conventions
//! - Interval `i` runs from division point `i` to division point `i + 1` (cyclically).
//! - A division point belongs to the interval that ends at it (point 0 to interval 0).

mod pairing;
mod tree;

pub use pairing::{validate_lengths, validate_pairing, InputError};
pub use tree::{NodeId, WeightedTree};

use std::fmt;
use std::rc::Rc;

use crate::circle::{CirclePoint, Side};

#[derive(Clone, Debug)]
pub struct FoliationDisk {
    lengths: Vec<f64>,
    pairing: Vec<usize>,
    div_points: Rc<[CirclePoint]>,
    // div[pair[i]] + div[i + 1]: following a leaf from interval i is t -> offset - t.
    leaf_offsets: Vec<f64>,
}

impl FoliationDisk {
    /// Validates `lengths` and `pairing`, averages paired lengths, and normalizes.
    pub fn new(lengths: Vec<f64>, pairing: Vec<usize>) -> Result<Self, InputError> {
        validate_lengths(&lengths, &pairing)?;
        validate_pairing(&pairing)?;
        Ok(Self::from_parts(lengths, pairing))
    }

    /// The foliation whose leaf space is `tree`.
    pub fn from_tree(tree: &WeightedTree) -> Self {
        let (lengths, pairing) = tree.lengths_and_pairing();
        Self::build(lengths, pairing)
    }

    // Caller guarantees a valid pairing and positive lengths.
    fn from_parts(mut lengths: Vec<f64>, pairing: Vec<usize>) -> Self {
        for i in 0..lengths.len() {
            let j = pairing[i];
            if j > i {
                let average = (lengths[i] + lengths[j]) / 2.0;
                lengths[i] = average;
                lengths[j] = average;
            }
        }
        Self::build(lengths, pairing)
    }

    fn build(mut lengths: Vec<f64>, pairing: Vec<usize>) -> Self {
        let total: f64 = lengths.iter().sum();
        for l in &mut lengths {
            *l /= total;
        }
        let n = lengths.len();
        let mut div_points = Vec::with_capacity(n);
        let mut point = CirclePoint::new(0.0);
        for l in &lengths {
            div_points.push(point);
            point = point + *l;
        }
        let leaf_offsets = (0..n)
            .map(|i| div_points[pairing[i]].value() + div_points[(i + 1) % n].value())
            .collect();
        Self {
            lengths,
            pairing,
            div_points: div_points.into(),
            leaf_offsets,
        }
    }

    #[inline]
    pub fn num_separatrices(&self) -> usize {
        self.lengths.len()
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn pairing(&self) -> &[usize] {
        &self.pairing
    }

    #[inline]
    pub fn pair(&self, i: usize) -> usize {
        self.pairing[i]
    }

    pub fn div_points(&self) -> &[CirclePoint] {
        &self.div_points
    }

    #[inline]
    pub fn div_point(&self, i: usize) -> CirclePoint {
        self.div_points[i]
    }

    pub(crate) fn shared_div_points(&self) -> Rc<[CirclePoint]> {
        Rc::clone(&self.div_points)
    }

    #[inline]
    pub fn increase_index(&self, i: usize) -> usize {
        if i + 1 < self.num_separatrices() {
            i + 1
        } else {
            0
        }
    }

    #[inline]
    pub fn decrease_index(&self, i: usize) -> usize {
        if i > 0 {
            i - 1
        } else {
            self.num_separatrices() - 1
        }
    }

    /// The separatrix that bounds, together with separatrix `i`, the leaf band on `side` of `i`.
    ///
    /// Panics on `Side::Center`.
    pub fn separatrix_index_of_pair(&self, i: usize, side: Side) -> usize {
        match side {
            Side::Right => self.increase_index(self.pairing[i]),
            Side::Left => self.pairing[self.decrease_index(i)],
            Side::Center => panic!("separatrix_index_of_pair needs a shifted side"),
        }
    }

    /// Index `i` with `div[i] < t <= div[i + 1]`, or 0 for `t` in `[0, div[1]]`. O(log n).
    pub fn which_interval_contains(&self, t: CirclePoint) -> usize {
        self.div_points[1..].partition_point(|d| d.value() < t.value())
    }

    /// Where the leaf through boundary point `t` meets the boundary again.
    pub fn follow_the_leaf(&self, t: CirclePoint) -> CirclePoint {
        -t + self.leaf_offsets[self.which_interval_contains(t)]
    }

    /// Exact value match with a division point (sides ignored).
    pub fn is_div_point(&self, t: CirclePoint) -> bool {
        self.div_points.iter().any(|d| d.value() == t.value())
    }

    /// Relabels interval `i` as `i + 1`.
    pub fn rotate(&mut self) {
        let n = self.num_separatrices();
        let lengths = (0..n).map(|i| self.lengths[(i + n - 1) % n]).collect();
        let pairing = (0..n)
            .map(|i| (self.pairing[(i + n - 1) % n] + 1) % n)
            .collect();
        *self = Self::build(lengths, pairing);
    }

    /// Relabels interval `i` as `n - 1 - i`.
    pub fn reflect(&mut self) {
        let n = self.num_separatrices();
        let lengths = (0..n).map(|i| self.lengths[n - 1 - i]).collect();
        let pairing = (0..n).map(|i| n - 1 - self.pairing[n - 1 - i]).collect();
        *self = Self::build(lengths, pairing);
    }

    /// Prong counts of the singularities, largest first.
    ///
    /// Every maximal run of intervals between two paired ends bounds a singularity; the
    /// outermost run is the singularity at the center of the disk. For a foliation of RP²
    /// the counts satisfy `Σ (k - 2) = -2`.
    pub fn prong_signature(&self) -> Vec<usize> {
        let mut prongs = Vec::new();
        if self.num_separatrices() > 0 {
            self.count_prongs(0, self.num_separatrices() - 1, true, &mut prongs);
        }
        prongs.sort_unstable_by(|a, b| b.cmp(a));
        prongs
    }

    fn count_prongs(&self, begin: usize, end: usize, outermost: bool, prongs: &mut Vec<usize>) {
        let mut count = usize::from(!outermost);
        let mut i = begin;
        while i <= end {
            count += 1;
            let pair = self.pairing[i];
            if i + 2 < pair {
                self.count_prongs(i + 1, pair - 1, false, prongs);
            } else {
                prongs.push(1);
            }
            i = pair + 1;
        }
        prongs.push(count);
    }

    pub fn pairs_equal(&self, other: &Self) -> bool {
        self.pairing == other.pairing
    }

    pub fn lengths_equal(&self, other: &Self, tol: f64) -> bool {
        self.num_separatrices() == other.num_separatrices()
            && self
                .lengths
                .iter()
                .zip(&other.lengths)
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    pub fn equals(&self, other: &Self, tol: f64) -> bool {
        self.pairs_equal(other) && self.lengths_equal(other, tol)
    }

    pub fn equals_up_to_rotation(&self, other: &Self, tol: f64) -> bool {
        if self.num_separatrices() != other.num_separatrices() {
            return false;
        }
        let mut turned = other.clone();
        for _ in 0..self.num_separatrices() {
            if self.equals(&turned, tol) {
                return true;
            }
            turned.rotate();
        }
        false
    }

    pub fn equals_up_to_rotation_and_reflection(&self, other: &Self, tol: f64) -> bool {
        if self.equals_up_to_rotation(other, tol) {
            return true;
        }
        let mut mirrored = other.clone();
        mirrored.reflect();
        self.equals_up_to_rotation(&mirrored, tol)
    }
}

fn join<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for FoliationDisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lengths = self.lengths.iter().map(|l| format!("{l:.8}"));
        writeln!(f, "Lengths: {}", join(lengths))?;
        writeln!(f, "Pairing: {}", join(&self.pairing))?;
        write!(f, "Singularity type: {}", join(self.prong_signature()))
    }
}

#[cfg(test)]
mod tests;
