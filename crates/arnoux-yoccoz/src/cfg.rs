//! Tolerance and budget defaults for the foliation search (internal).
//!
//! Policy
//! - Defaults are fixed constants; `rp2::SearchCfg` picks them up through `Default`
//!   and is the only place callers override them.

/// Absolute tolerance when comparing normalized interval lengths of two foliations.
pub(crate) const LENGTH_EPS: f64 = 1e-7;

/// Depth budget for lengthening a single separatrix while looking for an intersection.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 1_000_000;

/// Retry cap for rejection sampling of random weighted trees.
pub(crate) const RANDOM_TREE_ATTEMPTS: usize = 1_000;

/// Fewest separatrices (intervals) accepted for a foliation of RP².
pub(crate) const MIN_SEPARATRICES: usize = 6;
