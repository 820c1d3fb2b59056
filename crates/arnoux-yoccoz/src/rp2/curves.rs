//! Good one-sided curves: two good segments closed up by a boundary arc.

use super::types::{GoodOneSidedCurve, SearchError, SeparatrixSegment};
use super::FoliationRp2;
use crate::circle::{Arc, Side};

/// Depths `(d1, d2)` of a right- and a left-shifted segment that can close up into a
/// one-sided curve: `d1` odd and `d1 - d2 ≡ 2 (mod 4)`.
pub fn are_depths_good_for_one_sided_curve(d1: usize, d2: usize) -> bool {
    d1 % 2 == 1 && d1.abs_diff(d2) % 4 == 2
}

// Directed arc between the endpoints that avoids both segments and meets exactly one
// division point.
fn closing_arc(first: &SeparatrixSegment, second: &SeparatrixSegment) -> Result<Arc, SearchError> {
    let joint = first.arcs.intersect(&second.arcs);
    [
        Arc::new(first.endpoint, second.endpoint),
        Arc::new(second.endpoint, first.endpoint),
    ]
    .into_iter()
    .find(|arc| joint.contains_arc_through_div_point(arc))
    .ok_or(SearchError::NotFound)
}

impl GoodOneSidedCurve {
    /// Closes `left` (start shifted left) and `right` (start shifted right) into a curve.
    ///
    /// Only the orientation whose connecting arc starts at a left-shifted point is kept.
    pub fn try_new(
        left: &SeparatrixSegment,
        right: &SeparatrixSegment,
    ) -> Result<Self, SearchError> {
        if !are_depths_good_for_one_sided_curve(right.depth, left.depth) {
            return Err(SearchError::NotFound);
        }
        let connecting_arc = closing_arc(right, left)?;
        if !connecting_arc.left().is_shifted_to(Side::Left) {
            return Err(SearchError::NotFound);
        }
        Ok(Self {
            left: left.clone(),
            right: right.clone(),
            connecting_arc,
        })
    }
}

impl FoliationRp2 {
    /// Lengthens every separatrix to `depth` and collects the good one-sided curves.
    ///
    /// Curves accumulate across calls without duplicates, longest connecting arc first.
    pub fn generate_good_curves(&mut self, depth: usize) -> &[GoodOneSidedCurve] {
        self.generate_good_segments(depth);
        for sep in 0..self.num_separatrices() {
            let partner = self.disk.separatrix_index_of_pair(sep, Side::Right);
            let rights = &self.good[sep][Side::Right.slot()];
            let lefts = &self.good[partner][Side::Left.slot()];
            for right in rights {
                for left in lefts {
                    let Ok(curve) = GoodOneSidedCurve::try_new(left, right) else {
                        continue;
                    };
                    if !self.curves.contains(&curve) {
                        self.curves.push(curve);
                    }
                }
            }
        }
        self.curves.sort_by(|a, b| {
            b.connecting_arc
                .length()
                .total_cmp(&a.connecting_arc.length())
        });
        &self.curves
    }

    /// Rebuilds the curve from `separatrix` at `depth` shifted to `side` and its partner
    /// at `partner_depth` on the opposite side.
    pub fn good_one_sided_curve(
        &mut self,
        separatrix: usize,
        depth: usize,
        side: Side,
        partner_depth: usize,
    ) -> Result<GoodOneSidedCurve, SearchError> {
        let partner = self.disk.separatrix_index_of_pair(separatrix, side);
        let first = self.get_good_separatrix_segment(separatrix, depth, side)?;
        let second = self.get_good_separatrix_segment(partner, partner_depth, side.opposite())?;
        match side {
            Side::Left => GoodOneSidedCurve::try_new(&first, &second),
            _ => GoodOneSidedCurve::try_new(&second, &first),
        }
    }
}
