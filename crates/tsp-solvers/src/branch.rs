//! §4.8's augment-branch-cut framework: strong branch-edge selection, the branch-tour
//! estimator, the `BranchHistory` arena, and pluggable node-selection rules.
//!
//! `BranchHistory` is an arena (`Vec<BranchNode>` plus `Option<usize>` parent indices), not
//! `Rc`/`Weak` back-pointers -- the same choice this workspace's `tsp-core` data model makes
//! everywhere else a tree needs only upward links.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use tsp_core::{
    active_tour::Basis,
    instance::{edge::distance::Distance, node::Node, Instance},
    tolerances::{NodeSelectionRule, SearchParams},
};
use tsp_lp::{BasisStatus, BoundSense, PivotOutcome, Relaxation, StrongBranchEstimate};

use crate::corelp::CoreLp;
use crate::error::SolveError;

const ROUND1_ITER_LIMIT: usize = 15;
const ROUND2_ITER_LIMIT: usize = 80;
const ROUND2_KEEP: usize = 2;

/// Which side of the branch an edge was pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeFix {
    Down,
    Up,
}

/// One branch decision: node pair rather than LP column index, since column indices get
/// renumbered by `CoreLp::remove_edges` and a branch decision must survive that.
#[derive(Debug, Clone, Copy)]
pub struct BranchDecision {
    pub a: Node,
    pub b: Node,
    pub fix: EdgeFix,
}

impl BranchDecision {
    fn col<R: Relaxation>(&self, corelp: &CoreLp<R>) -> Option<usize> {
        corelp.graph().find_edge(self.a, self.b)
    }

    /// Pins the bound and marks the edge non-removable, so pricing's edge elimination
    /// (which only looks at `x_e = 0` and `Edge::removable`) can never drop a branched-down
    /// edge out from under this decision.
    fn apply<R: Relaxation>(&self, corelp: &mut CoreLp<R>) -> Result<(), SolveError> {
        let col = self.col(corelp).expect("branch edge must still be in the core graph");
        corelp.graph_mut().set_removable(col, false);
        match self.fix {
            EdgeFix::Down => corelp.relaxation_mut().tighten_bound(col, BoundSense::Upper, 0.0)?,
            EdgeFix::Up => corelp.relaxation_mut().tighten_bound(col, BoundSense::Lower, 1.0)?,
        }
        Ok(())
    }

    /// Restores the edge's natural `[0, 1]` bound. A no-op if the edge has since been
    /// eliminated (it can't have been, per `apply`'s `removable = false`, but node
    /// traversal doesn't assume that invariant holds forever).
    fn undo<R: Relaxation>(&self, corelp: &mut CoreLp<R>) -> Result<(), SolveError> {
        let Some(col) = self.col(corelp) else {
            return Ok(());
        };
        match self.fix {
            EdgeFix::Down => corelp.relaxation_mut().tighten_bound(col, BoundSense::Upper, 1.0)?,
            EdgeFix::Up => corelp.relaxation_mut().tighten_bound(col, BoundSense::Lower, 0.0)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Open,
    /// No tour respects this node's fixed edges (degree overflow or premature subtour
    /// closure in the branch-tour estimator).
    Infeasible,
    /// Pruned by bound, or by the integer-optimality check in `CoreLp::primal_pivot`.
    Fathomed,
    Done,
}

/// One node of the branch tree. `tour`/`tour_length`/`lp_estimate`/`basis` are populated by
/// [`split`] and read by the node selector and by node traversal's warm start.
pub struct BranchNode {
    pub parent: Option<usize>,
    pub decision: Option<BranchDecision>,
    pub depth: usize,
    pub tour: Option<Vec<Node>>,
    pub tour_length: f64,
    pub lp_estimate: f64,
    pub basis: Option<Basis>,
    pub status: NodeStatus,
}

/// The branch tree, owned by the search loop. Node indices are stable for the life of the
/// search (never renumbered or erased), matching the spec's "node-selector heaps store
/// these iterators ... the node is retained for parent-pointer walks in children".
pub struct BranchHistory {
    nodes: Vec<BranchNode>,
}

impl BranchHistory {
    pub fn new_root() -> Self {
        Self {
            nodes: vec![BranchNode {
                parent: None,
                decision: None,
                depth: 0,
                tour: None,
                tour_length: f64::INFINITY,
                lp_estimate: f64::NEG_INFINITY,
                basis: None,
                status: NodeStatus::Open,
            }],
        }
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn node(&self, idx: usize) -> &BranchNode {
        &self.nodes[idx]
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut BranchNode {
        &mut self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push_child(&mut self, parent: usize, decision: BranchDecision) -> usize {
        let depth = self.nodes[parent].depth + 1;
        let idx = self.nodes.len();
        self.nodes.push(BranchNode {
            parent: Some(parent),
            decision: Some(decision),
            depth,
            tour: None,
            tour_length: f64::INFINITY,
            lp_estimate: f64::NEG_INFINITY,
            basis: None,
            status: NodeStatus::Open,
        });
        idx
    }

    /// Every branch decision between `idx` and the root, in root-to-`idx` order.
    fn ancestor_decisions(&self, mut idx: usize) -> Vec<BranchDecision> {
        let mut decisions = Vec::with_capacity(self.nodes[idx].depth);
        while let Some(decision) = self.nodes[idx].decision {
            decisions.push(decision);
            idx = self.nodes[idx].parent.expect("a node with a decision always has a parent");
        }
        decisions.reverse();
        decisions
    }

    fn lca(&self, a: usize, b: usize) -> usize {
        let ancestors_of_a: HashSet<usize> = {
            let mut set = HashSet::new();
            let mut cur = a;
            loop {
                set.insert(cur);
                match self.nodes[cur].parent {
                    Some(p) => cur = p,
                    None => break,
                }
            }
            set
        };
        let mut cur = b;
        while !ancestors_of_a.contains(&cur) {
            cur = self.nodes[cur].parent.expect("root is an ancestor of every node");
        }
        cur
    }

    /// §4.8 "Node traversal": walk up from `from` to the LCA undoing bound clamps, then
    /// down from the LCA to `to` applying them, installs `to`'s branch tour as the active
    /// tour, and reinstates its saved warm-start basis if one was recorded.
    pub fn traverse<R: Relaxation>(&self, corelp: &mut CoreLp<R>, from: usize, to: usize) -> Result<(), SolveError> {
        let lca = self.lca(from, to);

        let mut cur = from;
        while cur != lca {
            if let Some(decision) = self.nodes[cur].decision {
                decision.undo(corelp)?;
            }
            cur = self.nodes[cur].parent.expect("lca lies on the path to root");
        }

        let mut down_path = Vec::new();
        let mut cur = to;
        while cur != lca {
            down_path.push(cur);
            cur = self.nodes[cur].parent.expect("lca lies on the path to root");
        }
        for &idx in down_path.iter().rev() {
            if let Some(decision) = self.nodes[idx].decision {
                decision.apply(corelp)?;
            }
        }

        let target = &self.nodes[to];
        if let Some(basis) = &target.basis {
            corelp.relaxation_mut().copy_base(&basis.row_status, &basis.column_status)?;
        }
        Ok(())
    }
}

fn estimate_value(estimate: StrongBranchEstimate) -> f64 {
    match estimate.outcome {
        PivotOutcome::Unbounded => f64::MAX,
        _ => estimate.objective,
    }
}

/// §4.8 "Branch-edge selection": two rounds of strong branching, narrowing from
/// `≤ params.strong_branch_candidates` fractional long-edge candidates down to a single
/// winner. Returns `None` if no column is fractional (the caller should not have reached
/// branching at all in that case).
pub fn select_branch_edge<R: Relaxation>(
    corelp: &mut CoreLp<R>,
    params: &SearchParams,
) -> Result<Option<(Node, Node)>, SolveError> {
    let round1 = candidate_columns(corelp, params.strong_branch_candidates);
    if round1.is_empty() {
        return Ok(None);
    }

    let mut scored = score_candidates(corelp, &round1, ROUND1_ITER_LIMIT, params.strong_branch_gamma)?;
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
    scored.truncate(ROUND2_KEEP);
    let round2: Vec<usize> = scored.into_iter().map(|(_, col)| col).collect();

    let final_scores = score_candidates(corelp, &round2, ROUND2_ITER_LIMIT, params.strong_branch_gamma)?;
    let winner = final_scores
        .into_iter()
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap())
        .map(|(_, col)| col);

    Ok(winner.map(|col| {
        let edge = corelp.graph().edge(col);
        (edge.ends[0], edge.ends[1])
    }))
}

/// Fractional basic columns ranked by long-edge-near-0.5 bias (`edge_len * (1 - 2|v - 0.5|)`
/// -- maximal for a long edge sitting exactly at 0.5, falling off toward either bound),
/// capped at `limit`.
fn candidate_columns<R: Relaxation>(corelp: &CoreLp<R>, limit: usize) -> Vec<usize> {
    let x = corelp.relaxation().get_x();
    let (_, col_status) = corelp.relaxation().get_base();
    let tol = corelp.tolerances().zero;

    let mut scored: Vec<(f64, usize)> = (0..corelp.graph().edge_count())
        .filter(|&c| col_status[c] == BasisStatus::Basic)
        .filter_map(|c| {
            let v = x[c];
            if (v - v.round()).abs() < tol {
                return None;
            }
            let len = f64::from(corelp.graph().edge(c).len.0);
            let bias = 1.0 - 2.0 * (v - 0.5).abs();
            Some((len * bias, c))
        })
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
    scored.truncate(limit);
    scored.into_iter().map(|(_, c)| c).collect()
}

/// §4.8 steps 2-3: a strong-branch probe in both directions per candidate, scored
/// `(γ·min(v0,v1) + max(v0,v1)) / (γ + 1)`.
fn score_candidates<R: Relaxation>(
    corelp: &mut CoreLp<R>,
    cols: &[usize],
    iter_limit: usize,
    gamma: f64,
) -> Result<Vec<(f64, usize)>, SolveError> {
    let mut scored = Vec::with_capacity(cols.len());
    for &col in cols {
        let (down, up) = corelp.relaxation_mut().primal_strong_branch(col, 0.0, 1.0, iter_limit)?;
        let v0 = estimate_value(down);
        let v1 = estimate_value(up);
        let (lo, hi) = if v0 < v1 { (v0, v1) } else { (v1, v0) };
        scored.push(((gamma * lo + hi) / (gamma + 1.0), col));
    }
    Ok(scored)
}

/// §4.8 "Split": installs both children of `parent` (branching on `(a, b)`) into `history`,
/// computing each one's branch-tour estimate, LP estimate, and warm-start basis. Returns
/// `(down_idx, up_idx)`; a child whose estimate tour doesn't exist is left `Infeasible`
/// rather than pruned by the caller (its `status` already reflects that).
pub fn split<R: Relaxation>(
    corelp: &mut CoreLp<R>,
    history: &mut BranchHistory,
    parent: usize,
    instance: &Instance,
    edge: (Node, Node),
) -> Result<(usize, usize), SolveError> {
    let (a, b) = edge;
    let down_idx = history.push_child(parent, BranchDecision { a, b, fix: EdgeFix::Down });
    let up_idx = history.push_child(parent, BranchDecision { a, b, fix: EdgeFix::Up });

    for &idx in &[down_idx, up_idx] {
        let decision = history.node(idx).decision.expect("just pushed with a decision");
        decision.apply(corelp)?;

        let decisions = history.ancestor_decisions(idx);
        let (up_fixed, down_fixed) = split_fixes(&decisions);
        let node = history.node_mut(idx);
        match estimate_tour(instance, &up_fixed, &down_fixed) {
            Ok(tour) => {
                node.tour_length = tour_length(instance, &tour);
                node.tour = Some(tour);
                node.lp_estimate = corelp.relaxation().objective();
                // The trait's strong-branch probe restores the prior basis on return, so
                // there is no post-probe basis to capture here; the parent's active-tour
                // basis is the best warm start this API surface can offer.
                node.basis = Some(corelp.active_tour().basis().clone());
            }
            Err(()) => node.status = NodeStatus::Infeasible,
        }

        decision.undo(corelp)?;
    }
    Ok((down_idx, up_idx))
}

fn split_fixes(decisions: &[BranchDecision]) -> (HashSet<(usize, usize)>, HashSet<(usize, usize)>) {
    let mut up = HashSet::new();
    let mut down = HashSet::new();
    for decision in decisions {
        let key = (decision.a.0.min(decision.b.0), decision.a.0.max(decision.b.0));
        match decision.fix {
            EdgeFix::Up => {
                up.insert(key);
            }
            EdgeFix::Down => {
                down.insert(key);
            }
        }
    }
    (up, down)
}

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

/// §4.8's branch-tour estimator: a constrained greedy-edge constructor, scoped down from
/// Lin-Kernighan (out of scope per this system's Non-goals) to "produce *a*
/// constraint-respecting tour, not the best one". Up-fixed edges are force-added first,
/// failing immediately (as the spec requires) on a degree overflow or a premature subtour
/// closure; every other non-down-fixed edge is then offered in ascending cost order, same
/// union-find-guarded degree check, until a Hamiltonian cycle closes.
pub fn estimate_tour(
    instance: &Instance,
    up_fixed: &HashSet<(usize, usize)>,
    down_fixed: &HashSet<(usize, usize)>,
) -> Result<Vec<Node>, ()> {
    let n = instance.dimension();
    let mut degree = vec![0u8; n];
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut uf = UnionFind::new(n);
    let mut edges_added = 0usize;

    let mut add_edge = |a: usize, b: usize, degree: &mut [u8], adj: &mut [Vec<usize>], uf: &mut UnionFind, edges_added: &mut usize| -> bool {
        if degree[a] >= 2 || degree[b] >= 2 {
            return false;
        }
        let closes_cycle = uf.find(a) == uf.find(b);
        if closes_cycle && *edges_added != n - 1 {
            return false;
        }
        degree[a] += 1;
        degree[b] += 1;
        adj[a].push(b);
        adj[b].push(a);
        uf.union(a, b);
        *edges_added += 1;
        true
    };

    for &(a, b) in up_fixed {
        if !add_edge(a, b, &mut degree, &mut adj, &mut uf, &mut edges_added) {
            return Err(());
        }
    }

    let mut rest: Vec<(Distance, usize, usize)> = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            if up_fixed.contains(&(a, b)) || down_fixed.contains(&(a, b)) {
                continue;
            }
            rest.push((instance.distance(Node(a), Node(b)), a, b));
        }
    }
    rest.sort_unstable_by_key(|&(d, _, _)| d);

    for (_, a, b) in rest {
        if edges_added == n {
            break;
        }
        add_edge(a, b, &mut degree, &mut adj, &mut uf, &mut edges_added);
    }

    if edges_added != n || degree.iter().any(|&d| d != 2) {
        return Err(());
    }

    let mut tour = Vec::with_capacity(n);
    let mut prev = usize::MAX;
    let mut cur = 0;
    for _ in 0..n {
        tour.push(Node(cur));
        let next = adj[cur].iter().copied().find(|&nx| nx != prev).expect("degree-2 cycle always has an unvisited neighbor");
        prev = cur;
        cur = next;
    }
    Ok(tour)
}

fn tour_length(instance: &Instance, tour: &[Node]) -> f64 {
    if tour.is_empty() {
        return 0.0;
    }
    (0..tour.len())
        .map(|w| f64::from(instance.distance(tour[w], tour[(w + 1) % tour.len()]).0))
        .sum()
}

#[derive(Clone, Copy)]
struct ScoredNode {
    key: f64,
    idx: usize,
}

impl PartialEq for ScoredNode {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for ScoredNode {}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredNode {
    // Reversed so `BinaryHeap` (a max-heap) pops the *smallest* key first: best-tour and
    // best-bound both want the minimum estimate explored next.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key.partial_cmp(&self.key).unwrap_or(Ordering::Equal)
    }
}

/// §4.8's four pluggable node-selection rules, all backed by the same `BranchHistory`
/// membership so a node pushed once is visible to whichever rule is active.
pub struct NodeSelector {
    rule: NodeSelectionRule,
    dfs_stack: Vec<usize>,
    best_tour_heap: BinaryHeap<ScoredNode>,
    best_bound_heap: BinaryHeap<ScoredNode>,
    pop_count: usize,
}

impl NodeSelector {
    pub fn new(rule: NodeSelectionRule) -> Self {
        Self {
            rule,
            dfs_stack: Vec::new(),
            best_tour_heap: BinaryHeap::new(),
            best_bound_heap: BinaryHeap::new(),
            pop_count: 0,
        }
    }

    pub fn push(&mut self, history: &BranchHistory, idx: usize) {
        let node = history.node(idx);
        self.dfs_stack.push(idx);
        self.best_tour_heap.push(ScoredNode { key: node.tour_length, idx });
        self.best_bound_heap.push(ScoredNode { key: -node.lp_estimate, idx });
    }

    /// Pops the next node per the active rule, skipping over entries whose node has since
    /// left `Open` status (the lazy-deletion discipline the spec's "history entry itself
    /// is not erased" note implies every heap/stack here needs).
    pub fn pop(&mut self, history: &BranchHistory) -> Option<usize> {
        loop {
            let popped = match self.rule {
                NodeSelectionRule::Dfs => self.dfs_stack.pop(),
                NodeSelectionRule::BestTour => self.best_tour_heap.pop().map(|s| s.idx),
                NodeSelectionRule::BestBound => self.best_bound_heap.pop().map(|s| s.idx),
                NodeSelectionRule::Interleaved => {
                    self.pop_count += 1;
                    if self.pop_count % 10 == 0 {
                        self.best_bound_heap.pop().map(|s| s.idx)
                    } else {
                        self.best_tour_heap.pop().map(|s| s.idx)
                    }
                }
            };
            match popped {
                None => return None,
                Some(idx) if history.node(idx).status == NodeStatus::Open => return Some(idx),
                Some(_) => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::edge::data::symmetric::EdgeDataMatrixSym;
    use tsp_core::tsp_lib_spec::{EdgeWeightType, NodeCoordType, ProblemType};
    use tsp_core::InstanceMetadata;

    fn square_instance() -> Instance {
        let coords = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let matrix = EdgeDataMatrixSym::new_from_distance_function(4, |a, b| {
            let (ax, ay) = coords[a.0];
            let (bx, by) = coords[b.0];
            Distance(((ax - bx).powi(2) + (ay - by).powi(2)).sqrt().round() as i32)
        });
        let metadata = InstanceMetadata {
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
    fn estimate_tour_with_no_fixes_builds_perimeter() {
        let instance = square_instance();
        let tour = estimate_tour(&instance, &HashSet::new(), &HashSet::new()).expect("tour found");
        assert_eq!(tour.len(), 4);
        assert_eq!(tour_length(&instance, &tour), 4.0);
    }

    #[test]
    fn estimate_tour_rejects_degree_overflow_among_up_fixed_edges() {
        let instance = square_instance();
        let mut up = HashSet::new();
        up.insert((0, 1));
        up.insert((0, 2));
        up.insert((0, 3));
        assert!(estimate_tour(&instance, &up, &HashSet::new()).is_err());
    }

    #[test]
    fn estimate_tour_respects_down_fixed_edges() {
        let instance = square_instance();
        let mut down = HashSet::new();
        down.insert((0, 1));
        let tour = estimate_tour(&instance, &HashSet::new(), &down).expect("tour found");
        assert!(!tour_adjacent(&tour, Node(0), Node(1)));
    }

    fn tour_adjacent(tour: &[Node], a: Node, b: Node) -> bool {
        let n = tour.len();
        (0..n).any(|i| {
            let next = (i + 1) % n;
            (tour[i] == a && tour[next] == b) || (tour[i] == b && tour[next] == a)
        })
    }

    #[test]
    fn branch_history_lca_is_common_ancestor() {
        let mut history = BranchHistory::new_root();
        let root = history.root();
        let a = Node(0);
        let b = Node(1);
        let left = history.push_child(root, BranchDecision { a, b, fix: EdgeFix::Down });
        let right = history.push_child(root, BranchDecision { a, b, fix: EdgeFix::Up });
        assert_eq!(history.lca(left, right), root);
        assert_eq!(history.lca(left, left), left);
    }

    #[test]
    fn node_selector_dfs_is_lifo() {
        let mut history = BranchHistory::new_root();
        let root = history.root();
        let a = Node(0);
        let b = Node(1);
        let first = history.push_child(root, BranchDecision { a, b, fix: EdgeFix::Down });
        let second = history.push_child(root, BranchDecision { a, b, fix: EdgeFix::Up });
        let mut selector = NodeSelector::new(NodeSelectionRule::Dfs);
        selector.push(&history, first);
        selector.push(&history, second);
        assert_eq!(selector.pop(&history), Some(second));
        assert_eq!(selector.pop(&history), Some(first));
    }
}
