//! Points on the unit-circumference circle with an infinitesimal side tag.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Infinitesimal shift of a point: slightly left, slightly right, or exactly on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Center,
}

impl Side {
    /// The two shifted sides, in the order good-segment lists are indexed.
    pub const SHIFTED: [Side; 2] = [Side::Left, Side::Right];

    /// Left and Right swap; Center stays.
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Center => Side::Center,
        }
    }

    /// Slot of a shifted side in a `[_; 2]` table.
    ///
    /// Panics on `Center`: unshifted objects are never stored per side.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
            Side::Center => panic!("Side::Center has no per-side slot"),
        }
    }

    // Tie-break order: Left < Center < Right.
    #[inline]
    fn rank(self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Center => 1,
            Side::Right => 2,
        }
    }
}

/// Fractional part mapped into `[0, 1)`.
///
/// `t - floor(t)` can round up to exactly 1.0 for tiny negative `t`; that case folds to 0.
#[inline]
pub fn frac_part(t: f64) -> f64 {
    let f = t - t.floor();
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// A point of `R/Z` together with a [`Side`] tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CirclePoint {
    value: f64,
    side: Side,
}

impl CirclePoint {
    /// Centered point at `t mod 1`.
    pub fn new(t: f64) -> Self {
        Self::with_side(t, Side::Center)
    }

    pub fn with_side(t: f64, side: Side) -> Self {
        Self {
            value: frac_part(t),
            side,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The point half a turn away; the side tag is kept.
    pub fn antipodal(&self) -> Self {
        Self::with_side(self.value + 0.5, self.side)
    }

    pub fn centered(&self) -> Self {
        Self::with_side(self.value, Side::Center)
    }

    pub fn shifted_to(&self, side: Side) -> Self {
        Self::with_side(self.value, side)
    }

    pub fn shift(&mut self, side: Side) {
        self.side = side;
    }

    pub fn is_shifted_to(&self, side: Side) -> bool {
        self.side == side
    }
}

impl PartialOrd for CirclePoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.value.partial_cmp(&other.value)? {
            Ordering::Equal => Some(self.side.rank().cmp(&other.side.rank())),
            ord => Some(ord),
        }
    }
}

/// Reflection `t -> -t`; the reflection also mirrors the side tag.
impl Neg for CirclePoint {
    type Output = CirclePoint;

    fn neg(self) -> CirclePoint {
        CirclePoint::with_side(-self.value, self.side.opposite())
    }
}

/// Rotation by `rhs`; the side tag is kept.
impl Add<f64> for CirclePoint {
    type Output = CirclePoint;

    fn add(self, rhs: f64) -> CirclePoint {
        CirclePoint::with_side(self.value + rhs, self.side)
    }
}

impl Sub<f64> for CirclePoint {
    type Output = CirclePoint;

    fn sub(self, rhs: f64) -> CirclePoint {
        CirclePoint::with_side(self.value - rhs, self.side)
    }
}

impl fmt::Display for CirclePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.value)?;
        match self.side {
            Side::Left => write!(f, "(-)"),
            Side::Right => write!(f, "(+)"),
            Side::Center => Ok(()),
        }
    }
}

/// Forward (counterclockwise) distance from `a` to `b` in `[0, 1)`. Sides are ignored.
pub fn distance_between(a: CirclePoint, b: CirclePoint) -> f64 {
    if a.value <= b.value {
        b.value - a.value
    } else {
        b.value - a.value + 1.0
    }
}

/// Whether `third` lies on the closed arc running forward from `left` to `right`.
///
/// Comparisons respect side tags, so `x(-)` is outside an arc starting at `x` itself.
pub fn is_between(left: CirclePoint, right: CirclePoint, third: CirclePoint) -> bool {
    if left <= right {
        left <= third && third <= right
    } else {
        left <= third || third <= right
    }
}
