//! The cut separation cascade (§4.2-4.6): a fixed order of primal separators, each
//! producing [`CutCandidate`]s against the current LP support graph.
//!
//! Every separator is a free function over the support graph and the LP point, never a
//! `Box<dyn Separator>` — the cascade in [`find_cuts`] is a plain `match`, not dynamic
//! dispatch, matching the rest of this codebase's avoidance of trait objects in hot loops.

pub mod blossom;
pub mod domino;
pub mod gomory_hu;
pub mod metacuts;
pub mod safe_gmi;
pub mod subtour;

use std::rc::Rc;

use tsp_core::{
    active_tour::ActiveTour, cuts::clique::Clique, cuts::ExternalCuts, graph::CoreGraph,
    instance::node::Node, tolerances::Tolerances,
};

use crate::corelp::CutCandidate;

/// One support-graph edge as seen by a separator: both endpoints plus its LP value.
#[derive(Debug, Clone, Copy)]
pub struct SupportEdge {
    pub a: Node,
    pub b: Node,
    pub x: f64,
}

/// Builds the support graph (edges with `x > tol`) straight off `CoreGraph` and the LP
/// point, in the order `CoreGraph::edges` puts them (i.e. aligned with LP column index).
pub fn support_edges(graph: &CoreGraph, x: &[f64], tol: f64) -> Vec<SupportEdge> {
    graph
        .edges()
        .iter()
        .zip(x.iter())
        .filter(|(_, &xv)| xv > tol)
        .map(|(edge, &xv)| SupportEdge {
            a: edge.ends[0],
            b: edge.ends[1],
            x: xv,
        })
        .collect()
}

/// Interns a node subset as a [`Clique`] against `cuts`' live clique bank, converting
/// node ids into the bank's own (fixed, construction-time) tour positions first -- never
/// the active tour's, per the saved-tour-vs-active-tour split documented on `Bank`.
pub fn intern_clique(cuts: &mut ExternalCuts, nodes: &[Node]) -> Rc<Clique> {
    let perm = cuts.get_cbank().perm();
    let positions: Vec<usize> = nodes.iter().map(|n| perm[n.0]).collect();
    cuts.get_cbank_mut().intern(Clique::from_positions(positions))
}

/// Tour activity of a clique-based cut: twice the number of support edges crossing it
/// weighted by LP value (i.e. `x(delta(S))`), used by every separator's own primal filter
/// before `CoreLp::add_cuts` double-checks it against the integral tour.
pub fn crossing_value(nodes: &[Node], edges: &[SupportEdge]) -> f64 {
    let set: std::collections::HashSet<usize> = nodes.iter().map(|n| n.0).collect();
    edges
        .iter()
        .filter(|e| set.contains(&e.a.0) != set.contains(&e.b.0))
        .map(|e| e.x)
        .sum()
}

/// Runs the fixed separator cascade of §4.2, short-circuiting once `threshold` cuts have
/// been queued. Assumes the LP point handed in (`x`) comes from a pivot that was
/// classified `Subtour` or `Frac` -- callers don't invoke this after a `FathomedTour`.
pub fn find_cuts(
    graph: &CoreGraph,
    active_tour: &ActiveTour,
    x: &[f64],
    cuts: &mut ExternalCuts,
    tolerances: &Tolerances,
    threshold: usize,
) -> Vec<CutCandidate> {
    let edges = support_edges(graph, x, tolerances.zero);
    let mut found = Vec::new();

    found.extend(subtour::separate(graph, &edges, cuts, tolerances.cut));
    if found.len() >= threshold {
        return found;
    }

    found.extend(blossom::separate_blossoms(graph, &edges, cuts, tolerances.cut));
    if found.len() >= threshold {
        return found;
    }

    found.extend(blossom::separate_block_combs(graph, &edges, cuts, tolerances.cut));
    if found.len() >= threshold {
        return found;
    }

    if found.is_empty() {
        found.extend(domino::separate(graph, active_tour, &edges, cuts, tolerances.cut));
    }
    found
}
