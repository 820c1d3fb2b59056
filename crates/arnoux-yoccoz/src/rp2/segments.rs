//! Lengthening separatrices and querying their good shifted segments.

use super::types::{SearchError, SeparatrixSegment};
use super::FoliationRp2;
use crate::circle::{Arc, Side};
use crate::disk::FoliationDisk;

impl SeparatrixSegment {
    /// Pushes the start of an unshifted segment off its division point to `side`.
    ///
    /// The endpoint moves with it, and the extra interval crossings this creates are
    /// counted: the band next to the start, and for front-side endpoints of depth > 1 the
    /// interval under the endpoint.
    pub(crate) fn shift_to_side(&mut self, side: Side, disk: &FoliationDisk) {
        assert_eq!(self.side, Side::Center, "segment is already shifted");
        self.side = side;
        let endpoint_side = self.endpoint_shift_when_begin_shifted_to(side);
        self.endpoint.shift(endpoint_side);
        let start_band = match side {
            Side::Left => disk.decrease_index(self.separatrix),
            _ => self.separatrix,
        };
        self.crossings[start_band] += 1;
        if self.depth > 1 {
            if self.ends_on_front_side() {
                self.crossings[disk.which_interval_contains(self.endpoint)] += 1;
            }
            self.arcs
                .insert_point(disk.div_point(self.separatrix).shifted_to(side));
        }
    }

    /// Crosses the disk once more. Returns `true` if the new endpoint is a division point.
    pub(crate) fn advance(&mut self, disk: &FoliationDisk) -> bool {
        if self.depth > 1 {
            self.crossings[disk.which_interval_contains(self.endpoint)] += 1;
            self.arcs.insert_point(self.endpoint);
        }
        self.endpoint = if self.ends_on_front_side() {
            self.endpoint.antipodal()
        } else {
            disk.follow_the_leaf(self.endpoint)
        };
        self.depth += 1;
        disk.is_div_point(self.endpoint)
    }
}

/// Appends both shifted copies of `segment` that are still good to `lists` (Left, Right).
///
/// Nothing is recorded for a segment that is itself no longer good.
pub(crate) fn push_good_shifts(
    disk: &FoliationDisk,
    segment: &SeparatrixSegment,
    lists: &mut [Vec<SeparatrixSegment>; 2],
) {
    if !segment.is_good() {
        return;
    }
    for side in Side::SHIFTED {
        let mut shifted = segment.clone();
        shifted.shift_to_side(side, disk);
        if shifted.is_good() {
            lists[side.slot()].push(shifted);
        }
    }
}

impl FoliationRp2 {
    fn saddle_error(&self, separatrix: usize) -> SearchError {
        SearchError::SaddleConnection {
            separatrix,
            depth: self.current[separatrix].depth,
        }
    }

    /// Extends the primary segment of `separatrix` by one crossing.
    ///
    /// Fails, now and on every later call, once the separatrix has run into a division point.
    pub(crate) fn lengthen(&mut self, separatrix: usize) -> Result<(), SearchError> {
        if self.saddle[separatrix] {
            return Err(self.saddle_error(separatrix));
        }
        let segment = &mut self.current[separatrix];
        if segment.advance(&self.disk) {
            self.saddle[separatrix] = true;
            return Err(self.saddle_error(separatrix));
        }
        push_good_shifts(&self.disk, segment, &mut self.good[separatrix]);
        Ok(())
    }

    /// Lengthens every separatrix to `depth`, or until it hits a saddle connection.
    pub fn generate_good_segments(&mut self, depth: usize) {
        for sep in 0..self.num_separatrices() {
            while self.current[sep].depth < depth {
                if self.lengthen(sep).is_err() {
                    break;
                }
            }
        }
    }

    /// The good segment of `separatrix` at exactly `depth`, shifted to `side`.
    ///
    /// Lengthens the separatrix as needed. `NotFound` means the segment at that depth is not
    /// good; a saddle connection at or before `depth` fails with `SaddleConnection`, on every
    /// call.
    pub fn get_good_separatrix_segment(
        &mut self,
        separatrix: usize,
        depth: usize,
        side: Side,
    ) -> Result<SeparatrixSegment, SearchError> {
        let slot = side.slot();
        if self.saddle[separatrix] && depth >= self.current[separatrix].depth {
            return Err(self.saddle_error(separatrix));
        }
        if self.current[separatrix].depth >= depth {
            return self.good[separatrix][slot]
                .iter()
                .find(|s| s.depth == depth)
                .cloned()
                .ok_or(SearchError::NotFound);
        }
        if depth > self.cfg.max_depth {
            return Err(SearchError::DepthExhausted {
                separatrix,
                max_depth: self.cfg.max_depth,
            });
        }
        while self.current[separatrix].depth < depth {
            self.lengthen(separatrix)?;
        }
        match self.good[separatrix][slot].last() {
            Some(s) if s.depth == depth => Ok(s.clone()),
            _ => Err(SearchError::NotFound),
        }
    }

    /// `segment` itself if its endpoint is shifted to `endpoint_side`, otherwise the good
    /// segment of the same separatrix and depth with the opposite start shift.
    pub(crate) fn good_segment_for_endpoint(
        &mut self,
        segment: &SeparatrixSegment,
        endpoint_side: Side,
    ) -> Result<SeparatrixSegment, SearchError> {
        if segment.endpoint_shift_when_begin_shifted_to(segment.side) == endpoint_side {
            return Ok(segment.clone());
        }
        self.get_good_separatrix_segment(segment.separatrix, segment.depth, segment.side.opposite())
    }

    /// The shallowest good segment of `separatrix`, shifted to `side`, whose endpoint lies
    /// in `arc`.
    pub fn get_first_intersection(
        &mut self,
        separatrix: usize,
        arc: &Arc,
        side: Side,
    ) -> Result<SeparatrixSegment, SearchError> {
        let slot = side.slot();
        if let Some(found) = self.good[separatrix][slot]
            .iter()
            .find(|s| arc.contains(s.endpoint.centered()))
        {
            return Ok(found.clone());
        }
        loop {
            if self.current[separatrix].depth >= self.cfg.max_depth {
                return Err(SearchError::DepthExhausted {
                    separatrix,
                    max_depth: self.cfg.max_depth,
                });
            }
            let before = self.good[separatrix][slot].len();
            self.lengthen(separatrix)?;
            if let Some(found) = self.good[separatrix][slot][before..]
                .iter()
                .find(|s| arc.contains(s.endpoint.centered()))
            {
                return Ok(found.clone());
            }
        }
    }
}
