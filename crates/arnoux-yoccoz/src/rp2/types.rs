//! Data types of the RP² search: segments, curves, outcomes, and search settings.

use std::fmt;

use crate::cfg::{DEFAULT_MAX_DEPTH, LENGTH_EPS};
use crate::circle::{Arc, ArcsAroundDivPoints, CirclePoint, Side};
use crate::disk::FoliationDisk;

/// Why a search request produced no object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// The separatrix ran into a singularity at `depth`; nothing past that depth exists.
    SaddleConnection { separatrix: usize, depth: usize },
    /// No object qualifies. Callers move on to the next candidate.
    NotFound,
    /// Lengthening `separatrix` reached the depth budget without finding the object.
    DepthExhausted { separatrix: usize, max_depth: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaddleConnection { separatrix, depth } => write!(
                f,
                "saddle connection on separatrix {separatrix} at depth {depth}"
            ),
            Self::NotFound => write!(f, "no good object found"),
            Self::DepthExhausted {
                separatrix,
                max_depth,
            } => write!(
                f,
                "separatrix {separatrix} reached the depth budget {max_depth}"
            ),
        }
    }
}

impl std::error::Error for SearchError {}

/// Search settings carried by a foliation and inherited by the candidates it builds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchCfg {
    /// Largest per-interval length difference for two foliations to count as equal.
    pub length_tolerance: f64,
    /// No separatrix is lengthened past this depth while hunting for an intersection.
    pub max_depth: usize,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            length_tolerance: LENGTH_EPS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Initial piece of a separatrix, from its division point across the disk `depth` times.
///
/// Odd depths end on the boundary copy the separatrix started from ("front side"), even
/// depths on the antipodal copy. The counts in `crossings` record how often each original
/// interval was crossed, and sum to `depth - 2` for an unshifted segment of depth ≥ 2.
#[derive(Clone, Debug)]
pub struct SeparatrixSegment {
    pub(crate) separatrix: usize,
    pub(crate) depth: usize,
    pub(crate) endpoint: CirclePoint,
    pub(crate) arcs: ArcsAroundDivPoints,
    pub(crate) crossings: Vec<usize>,
    pub(crate) side: Side,
}

impl SeparatrixSegment {
    pub(crate) fn new(separatrix: usize, disk: &FoliationDisk) -> Self {
        Self {
            separatrix,
            depth: 1,
            endpoint: disk.div_point(separatrix),
            arcs: ArcsAroundDivPoints::new(disk.shared_div_points()),
            crossings: vec![0; disk.num_separatrices()],
            side: Side::Center,
        }
    }

    pub fn separatrix(&self) -> usize {
        self.separatrix
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn endpoint(&self) -> CirclePoint {
        self.endpoint
    }

    pub fn arcs(&self) -> &ArcsAroundDivPoints {
        &self.arcs
    }

    pub fn interval_crossings(&self) -> &[usize] {
        &self.crossings
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn ends_on_front_side(&self) -> bool {
        self.depth % 2 == 1
    }

    pub fn reverses_orientation(&self) -> bool {
        matches!(self.depth % 4, 0 | 3)
    }

    /// Side the endpoint moves to when the start of the segment is pushed to `side`.
    pub fn endpoint_shift_when_begin_shifted_to(&self, side: Side) -> Side {
        let reversed = self.reverses_orientation();
        if (!reversed && side == Side::Right) || (reversed && side == Side::Left) {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// The endpoint is not yet enclosed away from every division point.
    pub fn is_good(&self) -> bool {
        self.arcs.contains(self.endpoint)
    }
}

impl fmt::Display for SeparatrixSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Left => "left",
            Side::Right => "right",
            Side::Center => "center",
        };
        let crossings: Vec<String> = self.crossings.iter().map(|c| c.to_string()).collect();
        write!(
            f,
            "separatrix {}, depth {}, shifted {side}, endpoint {}, crossings [{}]",
            self.separatrix,
            self.depth,
            self.endpoint,
            crossings.join(" ")
        )
    }
}

/// One-sided closed curve transverse to the foliation: a left-shifted and a right-shifted
/// good segment joined by a boundary arc through a division point.
///
/// Two curves are equal when their defining (separatrix, depth) pairs agree.
#[derive(Clone, Debug)]
pub struct GoodOneSidedCurve {
    pub(crate) left: SeparatrixSegment,
    pub(crate) right: SeparatrixSegment,
    pub(crate) connecting_arc: Arc,
}

impl GoodOneSidedCurve {
    pub fn left(&self) -> &SeparatrixSegment {
        &self.left
    }

    pub fn right(&self) -> &SeparatrixSegment {
        &self.right
    }

    pub fn connecting_arc(&self) -> Arc {
        self.connecting_arc
    }

    fn key(&self) -> (usize, usize, usize, usize) {
        (
            self.left.separatrix,
            self.left.depth,
            self.right.separatrix,
            self.right.depth,
        )
    }
}

impl PartialEq for GoodOneSidedCurve {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for GoodOneSidedCurve {}

impl fmt::Display for GoodOneSidedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segments (separatrix, depth, endpoint): ({}, {}, {}), ({}, {}, {}); \
             double length {:.10}; connecting arc {}",
            self.left.separatrix,
            self.left.depth,
            self.left.endpoint,
            self.right.separatrix,
            self.right.depth,
            self.right.endpoint,
            2.0 * self.connecting_arc.length(),
            self.connecting_arc
        )
    }
}
