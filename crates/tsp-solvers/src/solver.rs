//! The top-level driving loop: one `primal_pivot -> separate -> add_cuts -> price` round
//! per LP, wrapped in the augment-branch-cut search tree of [`crate::branch`].
//!
//! Grounded on §5's ordering guarantee ("within a single primal_pivot -> find_cuts ->
//! add_cuts -> pivot_back round, all data updates are observable in program order") and
//! §4.8's node-traversal/selection contract.

use tsp_core::{
    instance::{edge::distance::Distance, node::Node, Instance},
    tolerances::{CutPreset, SearchParams},
};
use tsp_lp::{PivotOutcome, Relaxation};

use crate::branch::{self, BranchHistory, NodeSelector, NodeStatus};
use crate::corelp::{CoreLp, PivotClass};
use crate::error::SolveError;
use crate::pricer::{PriceOutcome, Pricer};

/// How many cuts a separation round should find before it's considered worth a re-pivot,
/// rather than falling through to pricing. Aggressive mode accepts a smaller haul per
/// round since it expects to need more rounds of everything anyway.
fn cut_threshold(preset: CutPreset) -> usize {
    match preset {
        CutPreset::Vanilla => 5,
        CutPreset::Aggressive => 1,
    }
}

#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub tour: Vec<Node>,
    pub length: Distance,
    pub lower_bound: f64,
    pub nodes_explored: usize,
    /// True if `length == lower_bound` within tolerance (optimality proven), or the
    /// search stopped early because `length` already met `-l`'s target.
    pub optimal: bool,
}

pub struct Solver<R: Relaxation> {
    corelp: CoreLp<R>,
    pricer: Pricer,
    params: SearchParams,
    instance: Instance,
    history: BranchHistory,
    selector: NodeSelector,
    current_node: usize,
    incumbent: Vec<Node>,
    incumbent_length: Distance,
    /// Fired every time a pivot installs a strictly shorter integral tour; `-G`'s
    /// one-file-per-improvement mode hangs off this rather than the search loop polling
    /// the incumbent after the fact.
    on_improved_tour: Option<Box<dyn FnMut(&[Node], Distance)>>,
}

impl<R: Relaxation> Solver<R> {
    pub fn new(corelp: CoreLp<R>, pricer: Pricer, params: SearchParams, instance: Instance) -> Self {
        let mut history = BranchHistory::new_root();
        let root = history.root();
        let incumbent = corelp.active_tour().tour().to_vec();
        let incumbent_length = corelp.active_tour().length();
        {
            let node = history.node_mut(root);
            node.tour = Some(incumbent.clone());
            node.tour_length = f64::from(incumbent_length.0);
            node.lp_estimate = corelp.relaxation().objective();
        }
        let mut selector = NodeSelector::new(params.node_selection);
        selector.push(&history, root);
        Self {
            corelp,
            pricer,
            params,
            instance,
            history,
            selector,
            current_node: root,
            incumbent,
            incumbent_length,
            on_improved_tour: None,
        }
    }

    pub fn with_tour_callback(mut self, callback: impl FnMut(&[Node], Distance) + 'static) -> Self {
        self.on_improved_tour = Some(Box::new(callback));
        self
    }

    /// Runs the search to completion (every node fathomed, proven infeasible, or branched
    /// away) or until `-l`'s target lower bound is met.
    pub fn run(mut self) -> Result<SolveOutcome, SolveError> {
        let mut nodes_explored = 0usize;
        let mut hit_target = false;

        while let Some(node_idx) = self.selector.pop(&self.history) {
            self.history.traverse(&mut self.corelp, self.current_node, node_idx)?;
            self.current_node = node_idx;
            nodes_explored += 1;

            let status = self.process_node()?;
            match status {
                NodeStatus::Open => {
                    self.branch_node(node_idx)?;
                }
                other => {
                    self.history.node_mut(node_idx).status = other;
                }
            }

            if let Some(target) = self.params.lower_bound_target {
                if f64::from(self.incumbent_length.0) <= target + self.corelp.tolerances().zero {
                    hit_target = true;
                    break;
                }
            }
        }

        let lower_bound = self.global_lower_bound();
        let optimal = hit_target || (f64::from(self.incumbent_length.0) - lower_bound).abs() < self.corelp.tolerances().zero;
        Ok(SolveOutcome {
            tour: self.incumbent,
            length: self.incumbent_length,
            lower_bound,
            nodes_explored,
            optimal,
        })
    }

    /// Drives one node's LP to either a fathomed/infeasible terminal state, or exhausts
    /// separation and pricing while still fractional (`NodeStatus::Open`, meaning the
    /// caller must branch).
    fn process_node(&mut self) -> Result<NodeStatus, SolveError> {
        if self.corelp.relaxation_mut().primal_recover()? != PivotOutcome::Optimal
            && !self.pricer.recover_feasibility(&mut self.corelp)?
        {
            return Ok(NodeStatus::Infeasible);
        }

        loop {
            match self.corelp.primal_pivot()? {
                PivotClass::Tour => {
                    if f64::from(self.corelp.active_tour().length().0) < f64::from(self.incumbent_length.0) {
                        self.incumbent = self.corelp.active_tour().tour().to_vec();
                        self.incumbent_length = self.corelp.active_tour().length();
                        if let Some(callback) = &mut self.on_improved_tour {
                            callback(&self.incumbent, self.incumbent_length);
                        }
                    }
                }
                PivotClass::Subtour => {
                    let cuts = self.corelp.separate(1);
                    if cuts.is_empty() {
                        return Err(SolveError::StrongBranchFailed);
                    }
                    self.corelp.add_cuts(cuts)?;
                }
                PivotClass::Frac => {
                    let threshold = cut_threshold(self.params.cut_preset);
                    let cuts = self.corelp.separate(threshold);
                    if !cuts.is_empty() {
                        self.corelp.add_cuts(cuts)?;
                        continue;
                    }
                    if self.params.sparse {
                        return Ok(NodeStatus::Open);
                    }
                    match self.pricer.inside_scan(&mut self.corelp)? {
                        PriceOutcome::Partial => continue,
                        PriceOutcome::PartOpt => {
                            match self.pricer.full_scan(&mut self.corelp, f64::from(self.incumbent_length.0))? {
                                // Pricing exhausted every full-scan candidate: nothing left to
                                // improve the relaxation with, so the node must be branched.
                                PriceOutcome::Full => return Ok(NodeStatus::Open),
                                // The objective cleared the incumbent bound mid-scan: the node
                                // is proven unable to beat the incumbent regardless of
                                // integrality, so it is pruned here rather than re-pivoted.
                                PriceOutcome::FullOpt => {
                                    self.corelp.prune_slack_cuts();
                                    let objective = self.corelp.relaxation().objective();
                                    self.history.node_mut(self.current_node).lp_estimate = objective;
                                    self.pricer.eliminate_edges(
                                        &mut self.corelp,
                                        f64::from(self.incumbent_length.0),
                                        objective,
                                    )?;
                                    return Ok(NodeStatus::Fathomed);
                                }
                                _ => unreachable!("full_scan only returns Full or FullOpt"),
                            }
                        }
                        _ => unreachable!("inside_scan only returns Partial or PartOpt"),
                    }
                }
                PivotClass::FathomedTour => {
                    self.corelp.prune_slack_cuts();
                    let lower_bound = self.pricer.exact_lower_bound(&self.corelp).to_f64();
                    self.history.node_mut(self.current_node).lp_estimate = lower_bound;
                    self.pricer.eliminate_edges(&mut self.corelp, f64::from(self.incumbent_length.0), lower_bound)?;
                    return Ok(NodeStatus::Fathomed);
                }
            }
        }
    }

    fn branch_node(&mut self, node_idx: usize) -> Result<(), SolveError> {
        if self.params.pure_primal {
            self.history.node_mut(node_idx).status = NodeStatus::Fathomed;
            return Ok(());
        }
        match branch::select_branch_edge(&mut self.corelp, &self.params)? {
            Some(edge) => {
                let (down, up) = branch::split(&mut self.corelp, &mut self.history, node_idx, &self.instance, edge)?;
                self.history.node_mut(node_idx).status = NodeStatus::Done;
                if self.history.node(down).status == NodeStatus::Open {
                    self.selector.push(&self.history, down);
                }
                if self.history.node(up).status == NodeStatus::Open {
                    self.selector.push(&self.history, up);
                }
            }
            None => self.history.node_mut(node_idx).status = NodeStatus::Fathomed,
        }
        Ok(())
    }

    /// The minimum LP estimate among nodes still `Open` once the selector drains; the
    /// incumbent's own length if none remain (optimality is then proven).
    fn global_lower_bound(&self) -> f64 {
        let mut bound = f64::from(self.incumbent_length.0);
        for idx in 0..self.history.len() {
            let node = self.history.node(idx);
            if node.status == NodeStatus::Open {
                bound = bound.min(node.lp_estimate);
            }
        }
        bound
    }
}
