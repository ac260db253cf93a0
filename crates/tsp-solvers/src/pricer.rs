//! §4.7's edge pricer: two edge-generators (a 50-nearest neighborhood and a full scan over
//! every node pair), a primal-correct dual solution, and the exact lower bound that
//! certifies a branch-and-cut node can be fathomed.

use tsp_core::{
    cuts::hypergraph::Sense as CutSense,
    instance::{edge::distance::Distance, node::Node, Instance},
    tolerances::Tolerances,
};
use tsp_lp::{ExactNum, Relaxation};

use crate::corelp::CoreLp;
use crate::error::SolveError;

/// How many edges [`Pricer::inside_scan`]/[`Pricer::full_scan`] add in one LP round before
/// re-pivoting. The teacher's own Held-Karp penalty loop works a whole row at a time; this
/// plays the same role for the simplex-based pricer.
const ROUND_BATCH: usize = 2_000;
/// A full-scan round is "small" once its candidate queue drops below this -- the other half
/// of §4.7 step 4's termination check alongside the round penalty.
const SMALL_QUEUE: usize = 16;
const FEASIBILITY_POOL: usize = 250;

/// The outcome of one pricing call, per §4.7 steps 3-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOutcome {
    /// Inside scan added a batch of negative-reduced-cost edges; the LP should re-pivot.
    Partial,
    /// Inside scan found nothing; the incumbent tour is optimal over the inside neighborhood.
    PartOpt,
    /// Full scan converged (round penalty and queue both small) without reaching the upper
    /// bound.
    Full,
    /// Full scan's post-add objective reached the global upper bound.
    FullOpt,
}

/// Node duals plus cut duals, post-processed so that a `≥` cut's negative dual and a `≤`
/// cut's positive dual are zeroed -- §4.7 step 1's "primal-correct reduced costs". A raw
/// simplex dual of the wrong sign for its row's sense would otherwise understate some
/// edges' true reduced cost.
fn dual_solution<R: Relaxation>(corelp: &CoreLp<R>) -> Vec<f64> {
    let mut pi = corelp.relaxation().get_pi();
    let node_count = corelp.graph().node_count();
    for (k, cut) in corelp.external_cuts().cuts().iter().enumerate() {
        let row = node_count + k;
        if row >= pi.len() {
            break;
        }
        match cut.sense() {
            CutSense::Greater if pi[row] < 0.0 => pi[row] = 0.0,
            CutSense::Less if pi[row] > 0.0 => pi[row] = 0.0,
            _ => {}
        }
    }
    pi
}

/// §4.7 step 2: `c(u,v) − π(u) − π(v) − Σ_k cut_coef(k,(u,v)) · π_k`, reusing
/// `ExternalCuts::get_col` the same way `CoreLp::add_edges` does for a newly priced column.
fn reduced_cost<R: Relaxation>(corelp: &CoreLp<R>, duals: &[f64], a: Node, b: Node, len: Distance) -> f64 {
    let node_count = corelp.graph().node_count();
    let mut rc = f64::from(len.0) - duals[a.0] - duals[b.0];
    for (k, coeff) in corelp.external_cuts().get_col(a, b).into_iter().enumerate() {
        if coeff != 0.0 {
            rc -= coeff * duals[node_count + k];
        }
    }
    rc
}

pub struct Pricer {
    neighbors: Vec<Vec<Node>>,
    candidate_edges: Vec<(Node, Node)>,
}

impl Pricer {
    /// Builds the inside neighborhood once per instance: for each node, the `inside_k`
    /// cheapest other nodes, picked via `select_nth_unstable_by` the same way the Held-Karp
    /// penalty loop partitions a distance row for its own cheapest-neighbor scan, just
    /// generalized from two neighbors to `inside_k`.
    pub fn new(instance: &Instance, inside_k: usize) -> Self {
        let n = instance.dimension();
        let mut neighbors = Vec::with_capacity(n);
        for u in 0..n {
            let mut ranked: Vec<(Distance, Node)> = (0..n)
                .filter(|&v| v != u)
                .map(|v| (instance.distance(Node(u), Node(v)), Node(v)))
                .collect();
            let k = inside_k.min(ranked.len());
            if k > 0 && k < ranked.len() {
                ranked.select_nth_unstable_by(k - 1, |a, b| a.0.cmp(&b.0));
            }
            ranked.truncate(k);
            ranked.sort_by_key(|&(d, _)| d);
            neighbors.push(ranked.into_iter().map(|(_, v)| v).collect());
        }

        // Union both directions of the (generally asymmetric) nearest-neighbor relation
        // into one undirected candidate-edge list, so a pair only missing from one
        // endpoint's list is still scanned.
        let mut candidate_edges = std::collections::HashSet::new();
        for u in 0..n {
            for &v in &neighbors[u] {
                candidate_edges.insert((u.min(v.0), u.max(v.0)));
            }
        }
        let candidate_edges = candidate_edges.into_iter().map(|(a, b)| (Node(a), Node(b))).collect();

        Self { neighbors, candidate_edges }
    }

    /// §4.7 step 3: scans the inside neighborhood for negative reduced cost, used while the
    /// incumbent pivot is a `Tour`.
    pub fn inside_scan<R: Relaxation>(&self, corelp: &mut CoreLp<R>) -> Result<PriceOutcome, SolveError> {
        let tol = corelp.tolerances().zero;
        let duals = dual_solution(corelp);
        let mut candidates = Vec::new();
        for &(a, b) in &self.candidate_edges {
            if corelp.graph().find_edge(a, b).is_some() {
                continue;
            }
            let len = corelp.instance().distance(a, b);
            let rc = reduced_cost(corelp, &duals, a, b, len);
            if rc < -tol {
                candidates.push((rc, a, b));
            }
        }
        if candidates.is_empty() {
            return Ok(PriceOutcome::PartOpt);
        }
        candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        let batch: Vec<(Node, Node)> = candidates.into_iter().take(ROUND_BATCH).map(|(_, a, b)| (a, b)).collect();
        corelp.add_edges(&batch, false)?;
        Ok(PriceOutcome::Partial)
    }

    /// Every node pair not already in the core graph, regardless of inside-neighborhood
    /// membership -- the exhaustive generator §4.7 calls "full".
    fn full_candidates<R: Relaxation>(
        corelp: &CoreLp<R>,
        duals: &[f64],
        tol: f64,
    ) -> Vec<(f64, Node, Node)> {
        let node_count = corelp.graph().node_count();
        let mut candidates = Vec::new();
        for u in 0..node_count {
            for v in (u + 1)..node_count {
                let a = Node(u);
                let b = Node(v);
                if corelp.graph().find_edge(a, b).is_some() {
                    continue;
                }
                let len = corelp.instance().distance(a, b);
                let rc = reduced_cost(corelp, duals, a, b, len);
                if rc < -tol {
                    candidates.push((rc, a, b));
                }
            }
        }
        candidates
    }

    /// §4.7 step 4: runs the full scan in rounds while the incumbent pivot is a
    /// `FathomedTour`, re-pivoting after each batch, until the round is both small-penalty
    /// and small-queue (`Full`) or the post-add objective reaches `upper_bound` (`FullOpt`).
    pub fn full_scan<R: Relaxation>(
        &self,
        corelp: &mut CoreLp<R>,
        upper_bound: f64,
    ) -> Result<PriceOutcome, SolveError> {
        let tol = corelp.tolerances().zero;
        loop {
            let duals = dual_solution(corelp);
            let mut candidates = Self::full_candidates(corelp, &duals, tol);
            if candidates.is_empty() {
                return Ok(PriceOutcome::Full);
            }

            let round_penalty: f64 = candidates.iter().map(|&(rc, _, _)| rc).sum();
            let small_queue = candidates.len() < SMALL_QUEUE;

            candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
            let batch: Vec<(Node, Node)> =
                candidates.into_iter().take(ROUND_BATCH).map(|(_, a, b)| (a, b)).collect();
            corelp.add_edges(&batch, false)?;
            corelp.primal_pivot()?;

            if corelp.relaxation().objective() >= upper_bound - tol {
                return Ok(PriceOutcome::FullOpt);
            }
            if round_penalty.abs() < corelp.tolerances().cut && small_queue {
                return Ok(PriceOutcome::Full);
            }
        }
    }

    /// Post-branch feasibility recovery: candidate edges are admitted purely on
    /// `π̂(u) + π̂(v) > 0`, ignoring edge length entirely, and added in `PoolSize` chunks
    /// (here [`FEASIBILITY_POOL`]) until `primal_recover` reports the LP feasible again or
    /// the candidate pool runs dry (a provably infeasible branch).
    pub fn recover_feasibility<R: Relaxation>(&self, corelp: &mut CoreLp<R>) -> Result<bool, SolveError> {
        loop {
            let pi_hat = corelp.relaxation().get_pi();
            let node_count = corelp.graph().node_count();
            let mut candidates = Vec::new();
            for u in 0..node_count {
                for v in (u + 1)..node_count {
                    let a = Node(u);
                    let b = Node(v);
                    if corelp.graph().find_edge(a, b).is_some() {
                        continue;
                    }
                    let est = pi_hat[u] + pi_hat[v];
                    if est > 0.0 {
                        candidates.push((est, a, b));
                    }
                }
            }
            if candidates.is_empty() {
                return Ok(false);
            }
            candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
            let batch: Vec<(Node, Node)> = candidates
                .into_iter()
                .take(FEASIBILITY_POOL)
                .map(|(_, a, b)| (a, b))
                .collect();
            corelp.add_edges(&batch, true)?;
            if corelp.relaxation_mut().primal_recover()? == tsp_lp::PivotOutcome::Optimal {
                return Ok(true);
            }
        }
    }

    /// §4.7's exact lower bound: `Σ π_i · rhs_i − Σ_{e : redcost(e) < 0} redcost(e)`, built
    /// entirely over [`ExactNum`] so tableau rounding error can't inflate a certified bound
    /// past the true optimum.
    pub fn exact_lower_bound<R: Relaxation>(&self, corelp: &CoreLp<R>) -> ExactNum {
        let duals = dual_solution(corelp);
        let node_count = corelp.graph().node_count();

        let mut bound = ExactNum::zero();
        for &dual in duals.iter().take(node_count) {
            bound = bound + ExactNum::from_f64_reconstructed(dual) * ExactNum::from_integer(2);
        }
        for (k, cut) in corelp.external_cuts().cuts().iter().enumerate() {
            let row = node_count + k;
            if row >= duals.len() {
                break;
            }
            bound = bound
                + ExactNum::from_f64_reconstructed(duals[row]) * ExactNum::from_f64_reconstructed(cut.rhs());
        }

        let penalty: ExactNum = corelp
            .relaxation()
            .get_redcosts()
            .into_iter()
            .filter(|&rc| rc < 0.0)
            .map(|rc| ExactNum::from_f64_reconstructed(rc))
            .sum();
        bound - penalty
    }

    /// §4.7's "edge elimination": a non-basic core-graph edge at `x_e = 0` whose exact
    /// reduced cost exceeds `upper_bound - lower_bound - 1` can never appear in any tour
    /// better than `upper_bound`, so it is safe to drop from the LP outright.
    pub fn eliminate_edges<R: Relaxation>(
        &self,
        corelp: &mut CoreLp<R>,
        upper_bound: f64,
        lower_bound: f64,
    ) -> Result<usize, SolveError> {
        let slack = upper_bound - lower_bound - 1.0;
        if slack < 0.0 {
            return Ok(0);
        }
        let duals = dual_solution(corelp);
        let x = corelp.relaxation().get_x();
        let tol = corelp.tolerances().zero;
        let mut delstat = vec![false; corelp.graph().edge_count()];
        let mut removed = 0;
        for (idx, edge) in corelp.graph().edges().iter().enumerate() {
            if edge.removable && x[idx] < tol {
                let rc = reduced_cost(corelp, &duals, edge.ends[0], edge.ends[1], edge.len);
                if rc > slack {
                    delstat[idx] = true;
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            corelp.remove_edges(&delstat);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::edge::data::symmetric::EdgeDataMatrixSym;
    use tsp_core::tsp_lib_spec::{EdgeWeightType, NodeCoordType, ProblemType};
    use tsp_core::InstanceMetadata;
    use tsp_lp::DenseSimplex;

    fn line_instance(n: usize) -> Instance {
        let matrix = EdgeDataMatrixSym::new_from_distance_function(n, |a, b| {
            Distance((a.0 as i32 - b.0 as i32).abs())
        });
        let metadata = InstanceMetadata {
            name: "line".to_string(),
            problem_type: ProblemType::TSP,
            comment: None,
            dimension: n,
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
    fn inside_neighborhood_excludes_self_and_is_sorted_by_distance() {
        let instance = line_instance(8);
        let pricer = Pricer::new(&instance, 3);
        let neighbors = &pricer.neighbors[0];
        assert_eq!(neighbors.len(), 3);
        assert!(!neighbors.contains(&Node(0)));
        let distances: Vec<i32> = neighbors.iter().map(|&n| instance.distance(Node(0), n).0).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn inside_scan_on_fathomed_line_tour_finds_no_improving_edge() {
        let instance = line_instance(4);
        let tour = vec![Node(0), Node(1), Node(2), Node(3)];
        let mut corelp: CoreLp<DenseSimplex> =
            CoreLp::new(instance.clone(), tour, DenseSimplex::new(), Tolerances::default(), 2000)
                .expect("construction succeeds");
        corelp.primal_pivot().expect("pivot succeeds");
        let pricer = Pricer::new(&instance, 3);
        let outcome = pricer.inside_scan(&mut corelp).expect("scan succeeds");
        assert!(matches!(outcome, PriceOutcome::PartOpt | PriceOutcome::Partial));
    }
}
