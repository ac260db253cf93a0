//! LP-row-aligned cut storage, decoupled from cut identity.
//!
//! Grounded on `CMR::Sep::ExternalCuts`: cut addition/deletion mutate the LP row set, so
//! cuts cannot be keyed by row number. `ExternalCuts` keeps a primary bank pair for live
//! cuts and a second bank pair for a pool of cuts expelled from the LP but kept around in
//! case they become useful again.

use crate::cuts::{
    bank::Bank,
    clique::Clique,
    hypergraph::HyperGraph,
    tooth::Tooth,
};
use crate::instance::node::Node;

pub struct ExternalCuts {
    node_count: usize,
    clique_bank: Bank<Clique>,
    tooth_bank: Bank<Tooth>,
    cuts: Vec<HyperGraph>,
    pool_clique_bank: Bank<Clique>,
    pool_tooth_bank: Bank<Tooth>,
    cut_pool: Vec<HyperGraph>,
    pool_capacity: usize,
}

impl ExternalCuts {
    /// `pool_capacity` is `SearchParams::pool_capacity`: how many expelled cuts the pool
    /// holds onto before LRU-by-pivot-age eviction kicks in.
    pub fn new(tour: Vec<Node>, pool_capacity: usize) -> Self {
        let node_count = tour.len();
        Self {
            node_count,
            clique_bank: Bank::new(tour.clone()),
            tooth_bank: Bank::new(tour.clone()),
            cuts: Vec::new(),
            pool_clique_bank: Bank::new(tour.clone()),
            pool_tooth_bank: Bank::new(tour),
            cut_pool: Vec::new(),
            pool_capacity,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Appends a cut, returning its LP row number (`node_count + position`).
    pub fn push(&mut self, cut: HyperGraph) -> usize {
        let row = self.node_count + self.cuts.len();
        self.cuts.push(cut);
        row
    }

    pub fn get_cut(&self, lp_rownum: usize) -> &HyperGraph {
        &self.cuts[lp_rownum - self.node_count]
    }

    pub fn cuts(&self) -> &[HyperGraph] {
        &self.cuts
    }

    pub fn cut_count(&self) -> usize {
        self.cuts.len()
    }

    pub fn pool_count(&self) -> usize {
        self.cut_pool.len()
    }

    pub fn get_cbank(&self) -> &Bank<Clique> {
        &self.clique_bank
    }

    pub fn get_cbank_mut(&mut self) -> &mut Bank<Clique> {
        &mut self.clique_bank
    }

    pub fn get_tbank(&self) -> &Bank<Tooth> {
        &self.tooth_bank
    }

    pub fn get_tbank_mut(&mut self) -> &mut Bank<Tooth> {
        &mut self.tooth_bank
    }

    /// Column of coefficients for a not-yet-priced edge `(a, b)`, one per live cut, in
    /// row order. Used when `CoreLP` appends a new LP column.
    pub fn get_col(&self, a: Node, b: Node) -> Vec<f64> {
        let perm = self.clique_bank.perm();
        self.cuts
            .iter()
            .map(|cut| cut.get_coeff(perm[a.0], perm[b.0]))
            .collect()
    }

    pub fn reset_ages(&mut self) {
        for cut in &mut self.cuts {
            cut.reset_ages();
        }
    }

    /// Bumps the tour-age counter of every cut whose dual is (numerically) zero at the
    /// new tour, i.e. slack cuts that survived augmentation unused.
    pub fn tour_age_cuts(&mut self, duals: &[f64], dust: f64) {
        debug_assert_eq!(duals.len(), self.cuts.len());
        for (cut, dual) in self.cuts.iter_mut().zip(duals) {
            if dual.abs() < dust {
                cut.bump_tour_age();
            }
        }
    }

    pub fn piv_age_cuts(&mut self, duals: &[f64], dust: f64) {
        debug_assert_eq!(duals.len(), self.cuts.len());
        for (cut, dual) in self.cuts.iter_mut().zip(duals) {
            if dual.abs() < dust {
                cut.bump_piv_age();
            }
        }
    }

    /// Removes the cuts at the given row-aligned positions (`0`-indexed into `cuts`, not
    /// LP row numbers). `to_pool[i]` controls whether `delset[i]` is moved into the cut
    /// pool or dropped outright.
    pub fn del_cuts(&mut self, delset: &[usize], to_pool: &[bool]) {
        debug_assert_eq!(delset.len(), to_pool.len());
        let mut sorted: Vec<(usize, bool)> = delset.iter().copied().zip(to_pool.iter().copied()).collect();
        sorted.sort_unstable_by_key(|(idx, _)| *idx);
        let mut kept = Vec::with_capacity(self.cuts.len() - sorted.len());
        let mut del_iter = sorted.iter().peekable();
        for (index, cut) in self.cuts.drain(..).enumerate() {
            if let Some((del_index, pool)) = del_iter.peek().copied() {
                if *del_index == index {
                    del_iter.next();
                    if pool {
                        self.cut_pool.push(cut);
                    }
                    continue;
                }
            }
            kept.push(cut);
        }
        self.cuts = kept;
        if self.cut_pool.len() > self.pool_capacity {
            self.evict_pool(self.pool_capacity);
        }
    }

    /// LRU-by-pivot-age eviction once the pool exceeds `capacity`; resolves the open
    /// question of pool eviction policy left unspecified upstream. Sorts ascending by
    /// pivot-age so the freshest (lowest-age) cuts sort first and survive the truncate.
    fn evict_pool(&mut self, capacity: usize) {
        if self.cut_pool.len() <= capacity {
            return;
        }
        self.cut_pool.sort_by_key(|cut| cut.piv_age());
        self.cut_pool.truncate(capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuts::hypergraph::Sense;
    use std::rc::Rc;

    fn sample_tour() -> Vec<Node> {
        (0..5).map(Node).collect()
    }

    #[test]
    fn row_numbers_align_with_node_count() {
        let mut ext = ExternalCuts::new(sample_tour(), 2000);
        let clique = ext.get_cbank_mut().intern(Clique::from_positions(vec![0, 1]));
        let row = ext.push(HyperGraph::new_clique_cut(vec![clique], Sense::Greater, 2.0));
        assert_eq!(row, 5);
        assert_eq!(ext.get_cut(row).rhs(), 2.0);
    }

    #[test]
    fn del_cuts_moves_to_pool() {
        let mut ext = ExternalCuts::new(sample_tour(), 2000);
        let clique: Rc<Clique> = ext.get_cbank_mut().intern(Clique::from_positions(vec![0, 1]));
        ext.push(HyperGraph::new_clique_cut(vec![Rc::clone(&clique)], Sense::Greater, 2.0));
        ext.push(HyperGraph::new_clique_cut(vec![clique], Sense::Greater, 2.0));
        ext.del_cuts(&[0], &[true]);
        assert_eq!(ext.cut_count(), 1);
        assert_eq!(ext.pool_count(), 1);
    }

    #[test]
    fn evict_pool_keeps_freshest_by_pivot_age() {
        let mut ext = ExternalCuts::new(sample_tour(), 2);
        let clique: Rc<Clique> = ext.get_cbank_mut().intern(Clique::from_positions(vec![0, 1]));
        for _ in 0..3 {
            ext.push(HyperGraph::new_clique_cut(vec![Rc::clone(&clique)], Sense::Greater, 2.0));
        }
        // Age the first two cuts before the third (freshest, piv_age 0) is also pooled, so
        // eviction has a real stale/fresh distinction to pick between.
        ext.cuts[0].bump_piv_age();
        ext.cuts[0].bump_piv_age();
        ext.cuts[1].bump_piv_age();

        ext.del_cuts(&[0, 1, 2], &[true, true, true]);

        assert_eq!(ext.pool_count(), 2);
        let ages: Vec<i32> = ext.cut_pool.iter().map(HyperGraph::piv_age).collect();
        assert!(ages.iter().all(|&age| age <= 1), "stalest cut (piv_age 2) should have been evicted");
    }
}
