//! One cut, independent of its LP row position.
//!
//! Grounded on the `CMR::Sep::HyperGraph` class: a sense, a right-hand side, a clique
//! (and, for domino-parity cuts, tooth) list, and two aging counters. Cut type is derived
//! from the shape of the clique/tooth lists rather than stored as an explicit tag.

use std::rc::Rc;

use crate::cuts::{clique::Clique, tooth::Tooth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Greater,
    Less,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutType {
    Subtour,
    Comb,
    Domino,
    /// A branch constraint or a GMI row: no clique representation, coefficients come
    /// straight from the sparse row the separator produced.
    Non,
}

#[derive(Debug, Clone)]
pub struct HyperGraph {
    sense: Sense,
    rhs: f64,
    cliques: Vec<Rc<Clique>>,
    teeth: Vec<Rc<Tooth>>,
    tour_age: i32,
    piv_age: i32,
}

impl HyperGraph {
    /// A subtour elimination constraint (single clique) or comb (multiple cliques, the
    /// first being the handle).
    pub fn new_clique_cut(cliques: Vec<Rc<Clique>>, sense: Sense, rhs: f64) -> Self {
        debug_assert!(!cliques.is_empty());
        Self {
            sense,
            rhs,
            cliques,
            teeth: Vec::new(),
            tour_age: 0,
            piv_age: 0,
        }
    }

    /// A simple domino-parity cut: `handle` is the sole entry of `cliques`, `teeth` the
    /// tooth list.
    pub fn new_domino_cut(handle: Rc<Clique>, teeth: Vec<Rc<Tooth>>, rhs: f64) -> Self {
        Self {
            sense: Sense::Less,
            rhs,
            cliques: vec![handle],
            teeth,
            tour_age: 0,
            piv_age: 0,
        }
    }

    /// A cut with no clique representation at all (a branch bound or a safe-GMI row);
    /// coefficients for such a cut must come from the sparse row the caller already has.
    pub fn new_opaque(sense: Sense, rhs: f64) -> Self {
        Self {
            sense,
            rhs,
            cliques: Vec::new(),
            teeth: Vec::new(),
            tour_age: 0,
            piv_age: 0,
        }
    }

    pub fn cut_type(&self) -> CutType {
        if !self.teeth.is_empty() {
            CutType::Domino
        } else {
            match self.cliques.len() {
                0 => CutType::Non,
                1 => CutType::Subtour,
                _ => CutType::Comb,
            }
        }
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn cliques(&self) -> &[Rc<Clique>] {
        &self.cliques
    }

    pub fn teeth(&self) -> &[Rc<Tooth>] {
        &self.teeth
    }

    pub fn tour_age(&self) -> i32 {
        self.tour_age
    }

    pub fn piv_age(&self) -> i32 {
        self.piv_age
    }

    /// A cut discovered at the current tour/pivot has not aged yet.
    pub fn fresh_cut(&self) -> bool {
        self.tour_age <= 0 || self.piv_age <= 0
    }

    pub fn reset_ages(&mut self) {
        self.tour_age = 0;
        self.piv_age = 0;
    }

    pub fn bump_tour_age(&mut self) {
        self.tour_age += 1;
    }

    pub fn bump_piv_age(&mut self) {
        self.piv_age += 1;
    }

    /// Constraint-matrix coefficient of the edge `(a_pos, b_pos)`, given the two
    /// endpoints' positions in *this cut's source bank's* saved tour (not the active
    /// tour -- see the crate's design notes on saved-tour-vs-active-tour).
    pub fn get_coeff(&self, a_pos: usize, b_pos: usize) -> f64 {
        match self.cut_type() {
            CutType::Domino => self.domino_coeff(a_pos, b_pos),
            CutType::Non => 0.0,
            CutType::Subtour | CutType::Comb => self
                .cliques
                .iter()
                .filter(|clique| clique.contains_pos(a_pos) != clique.contains_pos(b_pos))
                .count() as f64,
        }
    }

    fn domino_coeff(&self, a_pos: usize, b_pos: usize) -> f64 {
        let handle = &self.cliques[0];
        let a_in_h = handle.contains_pos(a_pos);
        let b_in_h = handle.contains_pos(b_pos);
        let mut total = u32::from(a_in_h) + u32::from(b_in_h);
        for tooth in &self.teeth {
            let a_in_body = tooth.body.contains_pos(a_pos);
            let b_in_body = tooth.body.contains_pos(b_pos);
            let a_in_root = tooth.handle.contains_pos(a_pos);
            let b_in_root = tooth.handle.contains_pos(b_pos);
            total += if a_in_body && b_in_body {
                2
            } else if (a_in_body && b_in_root) || (b_in_body && a_in_root) {
                1
            } else {
                0
            };
        }
        (total / 2) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtour_coeff_counts_crossings() {
        let clique = Rc::new(Clique::from_positions(vec![0, 1, 2]));
        let cut = HyperGraph::new_clique_cut(vec![clique], Sense::Greater, 2.0);
        assert_eq!(cut.cut_type(), CutType::Subtour);
        assert_eq!(cut.get_coeff(0, 1), 0.0);
        assert_eq!(cut.get_coeff(1, 3), 1.0);
        assert_eq!(cut.get_coeff(4, 5), 0.0);
    }

    #[test]
    fn comb_coeff_sums_over_cliques() {
        let handle = Rc::new(Clique::from_positions(vec![0, 1, 2, 3]));
        let tooth_a = Rc::new(Clique::from_positions(vec![0, 1]));
        let tooth_b = Rc::new(Clique::from_positions(vec![4]));
        let cut = HyperGraph::new_clique_cut(vec![handle, tooth_a, tooth_b], Sense::Less, 5.0);
        assert_eq!(cut.cut_type(), CutType::Comb);
        // edge (1,4): inside handle & inside tooth_a -> crosses neither; crosses tooth_b.
        assert_eq!(cut.get_coeff(1, 4), 1.0);
    }
}
