//! The current incumbent tour and the LP basis anchored to it.

use crate::instance::{edge::distance::Distance, node::Node};

/// Basic/at-bound status of one LP row or column, mirroring the abstract `Relaxation`
/// facade's basis representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisStatus {
    Basic,
    AtLower,
    AtUpper,
}

/// A saved LP basis: one status per column, one per row.
#[derive(Debug, Clone, Default)]
pub struct Basis {
    pub column_status: Vec<BasisStatus>,
    pub row_status: Vec<BasisStatus>,
}

impl Basis {
    pub fn is_empty(&self) -> bool {
        self.column_status.is_empty() && self.row_status.is_empty()
    }
}

/// The resident incumbent: a node sequence, its inverse permutation, the edge-incidence
/// vector aligned with [`crate::graph::CoreGraph`], and the LP basis instated at it.
///
/// Invariant: `incidence` has exactly `tour.len()` ones for an integral tour, and
/// `length` equals the sum of the lengths of the edges with incidence 1.
#[derive(Debug, Clone)]
pub struct ActiveTour {
    tour: Vec<Node>,
    /// `perm[tour[i]] == i`.
    perm: Vec<usize>,
    length: Distance,
    /// Per-`CoreGraph`-edge-index LP value; 1.0 for tour edges when integral, possibly
    /// fractional while a pivot is in progress.
    incidence: Vec<f64>,
    basis: Basis,
}

impl ActiveTour {
    pub fn from_tour(tour: Vec<Node>, length: Distance, edge_count: usize) -> Self {
        let mut perm = vec![0usize; tour.len()];
        for (i, node) in tour.iter().enumerate() {
            perm[node.0] = i;
        }
        Self {
            tour,
            perm,
            length,
            incidence: vec![0.0; edge_count],
            basis: Basis::default(),
        }
    }

    pub fn tour(&self) -> &[Node] {
        &self.tour
    }

    pub fn len(&self) -> usize {
        self.tour.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tour.is_empty()
    }

    pub fn position(&self, node: Node) -> usize {
        self.perm[node.0]
    }

    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    pub fn length(&self) -> Distance {
        self.length
    }

    pub fn incidence(&self) -> &[f64] {
        &self.incidence
    }

    pub fn incidence_mut(&mut self) -> &mut Vec<f64> {
        &mut self.incidence
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    pub fn set_basis(&mut self, basis: Basis) {
        self.basis = basis;
    }

    /// Returns true if `a` and `b` are tour-adjacent.
    pub fn tour_adjacent(&self, a: Node, b: Node) -> bool {
        let n = self.tour.len();
        let pa = self.perm[a.0];
        let pb = self.perm[b.0];
        let diff = pa.abs_diff(pb);
        diff == 1 || diff == n - 1
    }

    /// Distance along the tour from position of `a` to position of `b`, walking forward.
    pub fn forward_gap(&self, a: Node, b: Node) -> usize {
        let n = self.tour.len();
        let pa = self.perm[a.0];
        let pb = self.perm[b.0];
        (pb + n - pa) % n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perm_is_inverse_of_tour() {
        let tour = vec![Node(2), Node(0), Node(1)];
        let active = ActiveTour::from_tour(tour.clone(), Distance(10), 3);
        for (i, node) in tour.iter().enumerate() {
            assert_eq!(active.position(*node), i);
        }
    }

    #[test]
    fn tour_adjacency_wraps_around() {
        let tour = vec![Node(0), Node(1), Node(2), Node(3)];
        let active = ActiveTour::from_tour(tour, Distance(1), 4);
        assert!(active.tour_adjacent(Node(0), Node(3)));
        assert!(active.tour_adjacent(Node(1), Node(2)));
        assert!(!active.tour_adjacent(Node(0), Node(2)));
    }
}
