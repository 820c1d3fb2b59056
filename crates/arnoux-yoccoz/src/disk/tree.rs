//! Weighted trees describing foliations of the disk.
//!
//! Purpose
//! - A planar tree with positive edge weights is the leaf space of a measured foliation on
//!   the disk: every edge becomes a pair of intervals of equal length.
//! - Parse the generation-grouped weight format, draw random trees, and build the
//!   Arnoux–Yoccoz star tree.
//!
//! Why this design
//! - Nodes live in an arena and refer to each other by index; there are no owning
//!   pointers to free. Breadth-first parsing pushes children after their parents, so
//!   descendant counts fill in with one reverse sweep.
//! - Random generation is bounded rejection sampling driven by a caller-provided RNG.
//!
//! Format
//! - Weights are listed generation by generation; `0` ends the children of the current
//!   vertex. Vertices receive groups in breadth-first order, and a trailing `0` is optional.
//!   Example: `0.1 0.2 0.3 0 0.4 0.5` gives the root three children, and its first child two.

use std::collections::VecDeque;

use rand::Rng;

use super::pairing::InputError;
use crate::cfg::RANDOM_TREE_ATTEMPTS;
use crate::matrix::AlmostPfMatrix;

/// Index of a vertex in a [`WeightedTree`]; the root is `NodeId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug)]
struct Node {
    // Weight of the edge to the parent; unused for the root.
    weight: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    descendants: usize,
}

#[derive(Clone, Debug)]
pub struct WeightedTree {
    nodes: Vec<Node>,
}

impl WeightedTree {
    pub const ROOT: NodeId = NodeId(0);

    /// Parses generation-grouped weights (see the module docs).
    pub fn from_weights(weights: &[f64]) -> Result<Self, InputError> {
        let body = weights.strip_suffix(&[0.0]).unwrap_or(weights);
        let mut nodes = vec![Node {
            weight: 0.0,
            parent: None,
            children: Vec::new(),
            descendants: 0,
        }];
        let mut pending = VecDeque::from([Self::ROOT]);
        let mut offset = 0;
        for (g, group) in body.split(|w| *w == 0.0).enumerate() {
            let Some(parent) = pending.pop_front() else {
                return Err(InputError::TooManyGroups { groups: g + 1 });
            };
            if let Some((i, &value)) = group
                .iter()
                .enumerate()
                .find(|(_, w)| !(w.is_finite() && **w > 0.0))
            {
                return Err(InputError::NonPositiveWeight {
                    index: offset + i,
                    value,
                });
            }
            if parent == Self::ROOT && group.len() < 3 {
                return Err(InputError::RootDegree {
                    children: group.len(),
                });
            }
            if parent != Self::ROOT && group.len() == 1 {
                return Err(InputError::DegreeTwoVertex { node: parent.0 });
            }
            for &weight in group {
                let id = NodeId(nodes.len());
                nodes.push(Node {
                    weight,
                    parent: Some(parent),
                    children: Vec::new(),
                    descendants: 0,
                });
                nodes[parent.0].children.push(id);
                pending.push_back(id);
            }
            offset += group.len() + 1;
        }
        // Children always come after their parent in the arena.
        for id in (1..nodes.len()).rev() {
            let add = nodes[id].descendants + 1;
            if let Some(parent) = nodes[id].parent {
                nodes[parent.0].descendants += add;
            }
        }
        Ok(Self { nodes })
    }

    /// A random tree with `num_edges` edges and weights in `(0, 1)`.
    ///
    /// Shapes that fail validation (for example a zero weight splitting a group) are
    /// redrawn, at most `max_attempts` times.
    pub fn random<R: Rng>(
        num_edges: usize,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<Self, InputError> {
        if num_edges < 3 {
            return Err(InputError::TooFewEdges { edges: num_edges });
        }
        for _ in 0..max_attempts {
            let weights = random_weights(num_edges, rng);
            if let Ok(tree) = Self::from_weights(&weights) {
                if tree.num_edges() == num_edges {
                    return Ok(tree);
                }
            }
        }
        Err(InputError::SamplingFailed {
            attempts: max_attempts,
        })
    }

    /// [`WeightedTree::random`] with the default retry cap.
    pub fn random_default<R: Rng>(
        num_edges: usize,
        rng: &mut R,
    ) -> Result<Self, InputError> {
        Self::random(num_edges, rng, RANDOM_TREE_ATTEMPTS)
    }

    /// Star tree whose foliation carries the genus-`genus` Arnoux–Yoccoz pseudo-Anosov.
    ///
    /// With `a` the reciprocal of the PF root of `x^g - x^(g-1) - ... - 1`, the edges weigh
    /// `(a^i + a^(i+1)) / 4` for `i = 1..g-1`, and the last one `(a + a^g) / 4`.
    pub fn arnoux_yoccoz(genus: usize) -> Result<Self, InputError> {
        if genus < 3 {
            return Err(InputError::GenusTooSmall { genus });
        }
        let lambda = AlmostPfMatrix::arnoux_yoccoz(genus)
            .pf_eigenvalue()
            .ok_or(InputError::GenusTooSmall { genus })?;
        let alpha = 1.0 / lambda;
        let g = genus as i32;
        let mut weights: Vec<f64> = (1..g)
            .map(|i| (alpha.powi(i) + alpha.powi(i + 1)) / 4.0)
            .collect();
        weights.push((alpha + alpha.powi(g)) / 4.0);
        Self::from_weights(&weights)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.nodes[0].descendants
    }

    /// Intervals (separatrices) of the associated foliation: two per edge.
    pub fn num_separatrices(&self) -> usize {
        2 * self.num_edges()
    }

    pub fn weight(&self, node: NodeId) -> f64 {
        self.nodes[node.0].weight
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn num_descendants(&self, node: NodeId) -> usize {
        self.nodes[node.0].descendants
    }

    /// Interval lengths and pairing, laid out depth first.
    ///
    /// A child `c` starting at interval `s` occupies `s` and `s + 2·desc(c) + 1`; its own
    /// subtree fills the intervals strictly between them.
    pub fn lengths_and_pairing(&self) -> (Vec<f64>, Vec<usize>) {
        let n = self.num_separatrices();
        let mut lengths = vec![0.0; n];
        let mut pairing = vec![0; n];
        self.lay_out(Self::ROOT, 0, &mut lengths, &mut pairing);
        (lengths, pairing)
    }

    fn lay_out(&self, node: NodeId, start: usize, lengths: &mut [f64], pairing: &mut [usize]) {
        let mut first = start;
        for &child in self.children(node) {
            let last = first + 2 * self.num_descendants(child) + 1;
            lengths[first] = self.weight(child);
            lengths[last] = self.weight(child);
            pairing[first] = last;
            pairing[last] = first;
            self.lay_out(child, first + 1, lengths, pairing);
            first = last + 1;
        }
    }
}

// One weight for the root's first child, then groups of at least two children;
// a group size of `remaining - 1` would leave a single edge, i.e. a degree-2 vertex.
fn random_weights<R: Rng>(num_edges: usize, rng: &mut R) -> Vec<f64> {
    let mut weights = vec![rng.gen::<f64>()];
    let mut remaining = num_edges - 1;
    while remaining > 0 {
        let size = loop {
            let k = rng.gen_range(2..=remaining);
            if k != remaining - 1 {
                break k;
            }
        };
        weights.extend((0..size).map(|_| rng.gen::<f64>()));
        weights.push(0.0);
        remaining -= size;
    }
    weights
}
