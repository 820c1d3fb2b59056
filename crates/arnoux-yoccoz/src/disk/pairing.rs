//! Input validation for interval pairings, lengths, and weighted trees.

use std::fmt;

use crate::cfg::MIN_SEPARATRICES;

/// Rejected foliation input. Nothing built from rejected input reaches the search state.
#[derive(Clone, Debug, PartialEq)]
pub enum InputError {
    OddLengthCount { count: usize },
    TooFewIntervals { count: usize, min: usize },
    NonPositiveLength { index: usize, value: f64 },
    NonFiniteTotal { total: f64 },
    CountMismatch { lengths: usize, pairing: usize },
    PairOutOfRange { index: usize, pair: usize, count: usize },
    SelfPaired { index: usize },
    NotAnInvolution { index: usize, pair: usize },
    CrossingPairs { first: usize, second: usize },
    NonPositiveWeight { index: usize, value: f64 },
    RootDegree { children: usize },
    DegreeTwoVertex { node: usize },
    TooManyGroups { groups: usize },
    TooFewEdges { edges: usize },
    GenusTooSmall { genus: usize },
    SamplingFailed { attempts: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddLengthCount { count } => {
                write!(f, "the number of intervals must be even, got {count}")
            }
            Self::TooFewIntervals { count, min } => {
                write!(f, "need at least {min} intervals, got {count}")
            }
            Self::NonPositiveLength { index, value } => {
                write!(f, "length {index} must be positive, got {value}")
            }
            Self::NonFiniteTotal { total } => {
                write!(f, "the lengths must have a finite sum, got {total}")
            }
            Self::CountMismatch { lengths, pairing } => write!(
                f,
                "{lengths} lengths but {pairing} pairing entries; the counts must agree"
            ),
            Self::PairOutOfRange { index, pair, count } => {
                write!(f, "interval {index} is paired with {pair}, outside 0..{count}")
            }
            Self::SelfPaired { index } => write!(f, "interval {index} is paired with itself"),
            Self::NotAnInvolution { index, pair } => write!(
                f,
                "interval {index} is paired with {pair}, but {pair} is not paired back"
            ),
            Self::CrossingPairs { first, second } => {
                write!(f, "the pair ({first}, {second}) crosses another pair")
            }
            Self::NonPositiveWeight { index, value } => {
                write!(f, "weight {index} must be positive, got {value}")
            }
            Self::RootDegree { children } => {
                write!(f, "the root needs at least 3 children, got {children}")
            }
            Self::DegreeTwoVertex { node } => {
                write!(f, "vertex {node} has exactly one child (degree 2)")
            }
            Self::TooManyGroups { groups } => write!(
                f,
                "{groups} weight groups, more than there are vertices to attach them to"
            ),
            Self::TooFewEdges { edges } => {
                write!(f, "a tree needs at least 3 edges, got {edges}")
            }
            Self::GenusTooSmall { genus } => {
                write!(f, "the Arnoux–Yoccoz family starts at genus 3, got {genus}")
            }
            Self::SamplingFailed { attempts } => {
                write!(f, "no valid random tree after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Checks that `pairing` is a fixed-point-free involution without crossing pairs.
///
/// Non-crossing pairings are exactly the balanced-parenthesis words: opening at the
/// smaller index of each pair, closing at the larger. One stack pass checks that.
pub fn validate_pairing(pairing: &[usize]) -> Result<(), InputError> {
    let count = pairing.len();
    for (index, &pair) in pairing.iter().enumerate() {
        if pair >= count {
            return Err(InputError::PairOutOfRange { index, pair, count });
        }
        if pair == index {
            return Err(InputError::SelfPaired { index });
        }
        if pairing[pair] != index {
            return Err(InputError::NotAnInvolution { index, pair });
        }
    }
    let mut open: Vec<usize> = Vec::new();
    for (index, &pair) in pairing.iter().enumerate() {
        if pair > index {
            open.push(index);
        } else if open.pop() != Some(pair) {
            return Err(InputError::CrossingPairs {
                first: pair,
                second: index,
            });
        }
    }
    Ok(())
}

/// Checks interval lengths against a pairing: even count, at least six intervals, all positive
/// with a finite sum.
pub fn validate_lengths(lengths: &[f64], pairing: &[usize]) -> Result<(), InputError> {
    let count = lengths.len();
    if count != pairing.len() {
        return Err(InputError::CountMismatch {
            lengths: count,
            pairing: pairing.len(),
        });
    }
    if count % 2 != 0 {
        return Err(InputError::OddLengthCount { count });
    }
    if count < MIN_SEPARATRICES {
        return Err(InputError::TooFewIntervals {
            count,
            min: MIN_SEPARATRICES,
        });
    }
    if let Some((index, &value)) = lengths
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.is_finite() && **v > 0.0))
    {
        return Err(InputError::NonPositiveLength { index, value });
    }
    let total: f64 = lengths.iter().sum();
    if !total.is_finite() {
        return Err(InputError::NonFiniteTotal { total });
    }
    Ok(())
}
