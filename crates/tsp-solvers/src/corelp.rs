//! The primal pivot loop: CoreLP owns the LP relaxation, the live cut set, and the
//! incumbent tour, and keeps the three in lockstep.
//!
//! Grounded on §4.1's CoreLP contract. Row `n + k` of the relaxation always corresponds to
//! `HyperGraph` `k` in [`ExternalCuts`]; every method that touches rows keeps the two in
//! sync in one pass rather than leaving a window where they disagree.

use log::{debug, trace};
use tsp_core::{
    active_tour::ActiveTour,
    cuts::{ExternalCuts, HyperGraph},
    cuts::hypergraph::Sense as CutSense,
    graph::CoreGraph,
    instance::{edge::distance::Distance, node::Node, Instance},
    tolerances::Tolerances,
};
use tsp_lp::{Bound, PivotOutcome, Relaxation, RelaxationError, Sense, SparseRow};

use crate::error::SolveError;

/// The classification a primal pivot reduces to, per §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotClass {
    /// The post-pivot objective equals the tour length and the basis is dual-feasible.
    FathomedTour,
    /// An integral, connected, strictly-better-than-incumbent solution was found.
    Tour,
    /// Integral 0/1 solution with a disconnected support graph.
    Subtour,
    /// At least one basic column has a fractional value.
    Frac,
}

/// A cut ready for LP insertion. `hyper` already carries its own sense and right-hand
/// side; inserting it means adding a row built from those plus its crossing-count
/// coefficients, and pushing `hyper` itself into `ExternalCuts` at the same position.
///
/// `row` is `Some` only for cuts with no clique representation (`CutType::Non`: branch
/// rows, SafeGMI) -- their coefficients come straight from the sparse row the separator
/// already built, rather than from `HyperGraph::get_coeff`.
pub struct CutCandidate {
    pub hyper: HyperGraph,
    pub row: Option<SparseRow>,
}

fn lp_sense(sense: CutSense) -> Sense {
    match sense {
        CutSense::Greater => Sense::Greater,
        CutSense::Less => Sense::Less,
    }
}

pub struct CoreLp<R: Relaxation> {
    relaxation: R,
    graph: CoreGraph,
    active_tour: ActiveTour,
    external_cuts: ExternalCuts,
    instance: Instance,
    tolerances: Tolerances,
}

impl<R: Relaxation> CoreLp<R> {
    /// Seeds the relaxation with one degree-equality row per node and one column per
    /// tour edge; pricing (§4.7) is expected to grow the edge set from there.
    ///
    /// `pool_capacity` is `SearchParams::pool_capacity`, threaded down to the cut pool's
    /// LRU-by-pivot-age eviction.
    pub fn new(
        instance: Instance,
        initial_tour: Vec<Node>,
        mut relaxation: R,
        tolerances: Tolerances,
        pool_capacity: usize,
    ) -> Result<Self, SolveError> {
        let node_count = instance.dimension();
        let mut graph = CoreGraph::new(node_count);
        for w in 0..initial_tour.len() {
            let a = initial_tour[w];
            let b = initial_tour[(w + 1) % initial_tour.len()];
            let len = instance.distance(a, b);
            graph.add_edge(a, b, len);
        }

        for _ in 0..node_count {
            relaxation.new_row(Sense::Equal, 2.0);
        }
        for edge in graph.edges() {
            let row = SparseRow::new(vec![edge.ends[0].0, edge.ends[1].0], vec![1.0, 1.0]);
            relaxation.add_col(
                f64::from(edge.len.0),
                row,
                Bound {
                    lower: 0.0,
                    upper: 1.0,
                },
            );
        }

        let length = tour_length(&instance, &initial_tour);
        let mut active_tour = ActiveTour::from_tour(initial_tour.clone(), length, graph.edge_count());
        for value in active_tour.incidence_mut().iter_mut() {
            *value = 1.0;
        }
        relaxation.copy_start(active_tour.incidence())?;

        let external_cuts = ExternalCuts::new(initial_tour, pool_capacity);

        debug!(
            target: "tsp_solvers::corelp",
            "CoreLP initialized: {node_count} nodes, {} edges, tour length {}",
            graph.edge_count(),
            length.0
        );

        Ok(Self {
            relaxation,
            graph,
            active_tour,
            external_cuts,
            instance,
            tolerances,
        })
    }

    pub fn graph(&self) -> &CoreGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut CoreGraph {
        &mut self.graph
    }

    pub fn active_tour(&self) -> &ActiveTour {
        &self.active_tour
    }

    pub fn external_cuts(&self) -> &ExternalCuts {
        &self.external_cuts
    }

    pub fn external_cuts_mut(&mut self) -> &mut ExternalCuts {
        &mut self.external_cuts
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn relaxation(&self) -> &R {
        &self.relaxation
    }

    pub fn relaxation_mut(&mut self) -> &mut R {
        &mut self.relaxation
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// §4.1: one non-degenerate primal pivot anchored at the active tour's edge
    /// incidence vector.
    pub fn primal_pivot(&mut self) -> Result<PivotClass, SolveError> {
        let cutoff = f64::from(self.active_tour.length().0) - self.tolerances.zero;
        let outcome = self.relaxation.nondegen_pivot(cutoff)?;
        if outcome == PivotOutcome::Unbounded {
            return Err(SolveError::Relaxation(RelaxationError::Infeasible));
        }

        let x = self.relaxation.get_x();
        let objective = self.relaxation.objective();

        if outcome == PivotOutcome::Optimal
            && (objective - f64::from(self.active_tour.length().0)).abs() < self.tolerances.zero
        {
            return Ok(PivotClass::FathomedTour);
        }

        let integral = x.iter().all(|&v| (v - v.round()).abs() < self.tolerances.zero);
        if !integral {
            return Ok(PivotClass::Frac);
        }

        let support: Vec<usize> = (0..x.len())
            .filter(|&i| x[i] >= 1.0 - self.tolerances.zero)
            .collect();

        let Some(order) = self.connected_tour_order(&support) else {
            return Ok(PivotClass::Subtour);
        };

        let new_length = tour_length(&self.instance, &order);
        if f64::from(new_length.0) < f64::from(self.active_tour.length().0) - self.tolerances.zero {
            let mut new_active = ActiveTour::from_tour(order, new_length, self.graph.edge_count());
            new_active.incidence_mut().copy_from_slice(&x);
            self.active_tour = new_active;
            trace!(target: "tsp_solvers::corelp", "pivot found improving tour, length {}", new_length.0);
            Ok(PivotClass::Tour)
        } else {
            Ok(PivotClass::FathomedTour)
        }
    }

    /// DFS over the support graph starting at node 0; `None` if it does not visit every
    /// node (a disconnected, i.e. subtour, support).
    fn connected_tour_order(&self, support: &[usize]) -> Option<Vec<Node>> {
        let node_count = self.graph.node_count();
        if node_count == 0 {
            return Some(Vec::new());
        }
        let mut adj: Vec<Vec<Node>> = vec![Vec::new(); node_count];
        for &edge_idx in support {
            let e = self.graph.edge(edge_idx);
            adj[e.ends[0].0].push(e.ends[1]);
            adj[e.ends[1].0].push(e.ends[0]);
        }
        let mut visited = vec![false; node_count];
        let mut order = Vec::with_capacity(node_count);
        let mut stack = vec![Node(0)];
        visited[0] = true;
        while let Some(n) = stack.pop() {
            order.push(n);
            for &next in &adj[n.0] {
                if !visited[next.0] {
                    visited[next.0] = true;
                    stack.push(next);
                }
            }
        }
        (order.len() == node_count).then_some(order)
    }

    /// §4.1 "Cut addition". Each candidate becomes one LP row plus one `HyperGraph`
    /// pushed into `ExternalCuts` at the same position. Candidates whose tour activity
    /// is not tight are dropped rather than inserted (primality is not negotiable).
    pub fn add_cuts(&mut self, candidates: Vec<CutCandidate>) -> Result<usize, SolveError> {
        let perm = self.external_cuts.get_cbank().perm().to_vec();
        let mut added = 0;
        for candidate in candidates {
            let rhs = candidate.hyper.rhs();
            let row = match candidate.row {
                Some(row) => row,
                None => self.coefficients_for(&candidate.hyper, &perm),
            };
            let activity: f64 = row
                .indices
                .iter()
                .zip(row.coeffs.iter())
                .map(|(&col, &coeff)| coeff * self.active_tour.incidence()[col])
                .sum();
            if (activity - rhs).abs() > self.tolerances.cut {
                trace!(
                    target: "tsp_solvers::corelp",
                    "dropping non-tight cut candidate (activity {activity}, rhs {rhs})"
                );
                continue;
            }
            self.relaxation.add_cut(rhs, lp_sense(candidate.hyper.sense()), row);
            self.external_cuts.push(candidate.hyper);
            added += 1;
        }
        debug_assert_eq!(
            self.external_cuts.cut_count(),
            self.relaxation.num_rows() - self.graph.node_count(),
            "LP row count and ExternalCuts size must stay in lockstep"
        );
        Ok(added)
    }

    fn coefficients_for(&self, hyper: &HyperGraph, perm: &[usize]) -> SparseRow {
        let mut indices = Vec::new();
        let mut coeffs = Vec::new();
        for (idx, edge) in self.graph.edges().iter().enumerate() {
            let coeff = hyper.get_coeff(perm[edge.ends[0].0], perm[edge.ends[1].0]);
            if coeff != 0.0 {
                indices.push(idx);
                coeffs.push(coeff);
            }
        }
        SparseRow::new(indices, coeffs)
    }

    /// §4.1 "Cut pruning". Rows with nonzero slack at the (possibly new) active tour are
    /// dropped; all are moved to the cut pool rather than discarded, since nothing in
    /// this codebase's cut representation distinguishes a cut worth remembering from one
    /// that is not.
    pub fn prune_slack_cuts(&mut self) -> usize {
        let slacks = self.relaxation.get_row_slacks();
        let node_count = self.graph.node_count();
        let mut row_delstat = vec![false; self.relaxation.num_rows()];
        let mut cut_delset = Vec::new();
        let mut to_pool = Vec::new();

        for (row, &slack) in slacks.iter().enumerate().skip(node_count) {
            if slack.abs() > self.tolerances.zero {
                row_delstat[row] = true;
                cut_delset.push(row - node_count);
                to_pool.push(true);
            }
        }
        if cut_delset.is_empty() {
            return 0;
        }
        self.relaxation.del_set_rows(&row_delstat);
        self.external_cuts.del_cuts(&cut_delset, &to_pool);
        debug_assert_eq!(
            self.external_cuts.cut_count(),
            self.relaxation.num_rows() - node_count
        );
        cut_delset.len()
    }

    /// §4.1 "Edge add/remove". New columns get cost = edge length, the two degree-row
    /// coefficients, and whatever coefficients `ExternalCuts` reports for the live cuts.
    /// `reinstate` reinstalls the active tour as the resident basis afterward.
    pub fn add_edges(&mut self, edges: &[(Node, Node)], reinstate: bool) -> Result<Vec<usize>, SolveError> {
        let mut new_indices = Vec::with_capacity(edges.len());
        for &(a, b) in edges {
            if self.graph.find_edge(a, b).is_some() {
                continue;
            }
            let len = self.instance.distance(a, b);
            let idx = self.graph.add_edge(a, b, len);

            let mut indices = vec![a.0, b.0];
            let mut coeffs = vec![1.0, 1.0];
            for (row_offset, coeff) in self.external_cuts.get_col(a, b).into_iter().enumerate() {
                if coeff != 0.0 {
                    indices.push(self.graph.node_count() + row_offset);
                    coeffs.push(coeff);
                }
            }
            self.relaxation.add_col(
                f64::from(len.0),
                SparseRow::new(indices, coeffs),
                Bound {
                    lower: 0.0,
                    upper: 1.0,
                },
            );
            self.active_tour.incidence_mut().push(0.0);
            new_indices.push(idx);
        }
        if reinstate {
            self.relaxation.copy_start(self.active_tour.incidence())?;
        }
        Ok(new_indices)
    }

    /// §4.7's edge elimination bookkeeping: drops the marked columns from the relaxation,
    /// the core graph, and the active tour's incidence vector in one lockstep pass, using
    /// `CoreGraph::remove_edges`' returned remap to keep the incidence vector aligned with
    /// the renumbered edge set.
    pub fn remove_edges(&mut self, delstat: &[bool]) {
        let delset: Vec<usize> = delstat.iter().enumerate().filter(|&(_, &d)| d).map(|(i, _)| i).collect();
        if delset.is_empty() {
            return;
        }
        let remap = self.graph.remove_edges(delset);
        self.relaxation.del_set_cols(delstat);
        let old_incidence = std::mem::take(self.active_tour.incidence_mut());
        let new_incidence: Vec<f64> = old_incidence
            .into_iter()
            .enumerate()
            .filter(|&(i, _)| remap[i] != usize::MAX)
            .map(|(_, v)| v)
            .collect();
        *self.active_tour.incidence_mut() = new_incidence;
    }

    /// §4.2's full separator cascade: the graph-level separators first, falling back to
    /// SafeGMI and then meta-cut transforms on existing combs if still short of
    /// `threshold`.
    pub fn separate(&mut self, threshold: usize) -> Vec<CutCandidate> {
        let x = self.relaxation.get_x();
        let mut found = crate::separators::find_cuts(
            &self.graph,
            &self.active_tour,
            &x,
            &mut self.external_cuts,
            &self.tolerances,
            threshold,
        );
        if found.len() >= threshold {
            return found;
        }

        found.extend(crate::separators::safe_gmi::separate(
            &self.relaxation,
            self.graph.edge_count(),
            self.tolerances.zero,
        ));
        if found.len() >= threshold {
            return found;
        }

        let edges = crate::separators::support_edges(&self.graph, &x, self.tolerances.zero);
        let slacks = self.relaxation.get_row_slacks();
        let node_count = self.graph.node_count();
        let cut_slacks = &slacks[node_count.min(slacks.len())..];
        found.extend(crate::separators::metacuts::transform(
            &edges,
            &mut self.external_cuts,
            cut_slacks,
            self.tolerances.zero,
        ));
        found
    }
}

fn tour_length(instance: &Instance, tour: &[Node]) -> Distance {
    if tour.is_empty() {
        return Distance(0);
    }
    (0..tour.len())
        .map(|w| instance.distance(tour[w], tour[(w + 1) % tour.len()]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::edge::data::symmetric::EdgeDataMatrixSym;
    use tsp_core::tsp_lib_spec::{EdgeWeightType, NodeCoordType, ProblemType};
    use tsp_lp::DenseSimplex;

    fn square_instance() -> Instance {
        // 4 nodes on a unit square; optimal tour is the perimeter, length 4.
        let coords = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let matrix = EdgeDataMatrixSym::new_from_distance_function(4, |a, b| {
            let (ax, ay) = coords[a.0];
            let (bx, by) = coords[b.0];
            Distance(((ax - bx).powi(2) + (ay - by).powi(2)).sqrt().round() as i32)
        });
        let metadata = tsp_core::InstanceMetadata {
            name: "square".to_string(),
            problem_type: ProblemType::TSP,
            comment: None,
            dimension: 4,
            capacity: None,
            edge_weight_type: EdgeWeightType::EUC_2D,
            edge_weight_format: None,
            edge_data_format: None,
            node_coord_type: NodeCoordType::NO_COORDS,
            display_data_type: None,
        };
        Instance::new(matrix, metadata)
    }

    #[test]
    fn fathoms_the_optimal_perimeter_tour() {
        let instance = square_instance();
        let tour = vec![Node(0), Node(1), Node(2), Node(3)];
        let mut corelp: CoreLp<DenseSimplex> =
            CoreLp::new(instance, tour, DenseSimplex::new(), Tolerances::default(), 2000)
                .expect("construction succeeds");
        let outcome = corelp.primal_pivot().expect("pivot succeeds");
        assert_eq!(outcome, PivotClass::FathomedTour);
    }
}
