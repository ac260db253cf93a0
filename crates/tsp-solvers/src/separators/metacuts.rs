//! Meta-cut transforms (§4.6): double-decker, handling, and teething rewrites of combs and
//! dominoes already resident in the LP, producing related cuts by editing their existing
//! Clique/Tooth structure instead of searching from scratch.

use std::collections::HashSet;
use std::rc::Rc;

use tsp_core::cuts::{
    clique::Clique,
    hypergraph::{CutType, HyperGraph, Sense},
    tooth::Tooth,
    ExternalCuts,
};

use super::SupportEdge;
use crate::corelp::CutCandidate;

const MAX_KEPT: usize = 250;
/// Only cuts already close to tight (row slack within this of zero) are worth
/// transforming; far-slack cuts aren't driving the LP and a transform of them wouldn't be
/// either.
const SLACK_THRESHOLD: f64 = 0.5;

/// Tour activity `x(delta(...))` of a `HyperGraph`, evaluated against support edges and
/// the bank's fixed tour permutation -- shared by all three transforms below instead of
/// re-deriving the crossing formula per transform.
fn hyper_activity(hyper: &HyperGraph, perm: &[usize], edges: &[SupportEdge]) -> f64 {
    edges
        .iter()
        .map(|e| e.x * hyper.get_coeff(perm[e.a.0], perm[e.b.0]))
        .sum()
}

fn crossing_in_positions(positions: &HashSet<usize>, perm: &[usize], edges: &[SupportEdge]) -> f64 {
    edges
        .iter()
        .filter(|e| positions.contains(&perm[e.a.0]) != positions.contains(&perm[e.b.0]))
        .map(|e| e.x)
        .sum()
}

/// Runs all three transforms against every resident cut whose row slack (`slacks[i]`,
/// aligned one-for-one with `cuts.cuts()`) sits within [`SLACK_THRESHOLD`] of zero,
/// returning at most [`MAX_KEPT`] candidates ranked by how strongly they're violated at
/// the current LP point.
pub fn transform(
    edges: &[SupportEdge],
    cuts: &mut ExternalCuts,
    slacks: &[f64],
    tol: f64,
) -> Vec<CutCandidate> {
    let perm = cuts.get_cbank().perm().to_vec();
    let resident: Vec<HyperGraph> = cuts.cuts().to_vec();
    let mut scored: Vec<(f64, CutCandidate)> = Vec::new();

    for (i, cut) in resident.iter().enumerate() {
        let slack = slacks.get(i).copied().unwrap_or(f64::INFINITY);
        if slack.abs() > SLACK_THRESHOLD {
            continue;
        }
        let found = match cut.cut_type() {
            CutType::Domino => double_decker(cut, cuts, &perm, edges, tol),
            CutType::Comb => handling(cut, &perm, edges, tol),
            CutType::Subtour => teething(cut, &perm, edges, tol),
            CutType::Non => None,
        };
        if let Some(candidate) = found {
            scored.push(candidate);
        }
    }

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
    scored.into_iter().take(MAX_KEPT).map(|(_, c)| c).collect()
}

/// Splits one multi-node tooth body at its tour midpoint into two lighter teeth sharing
/// the same root, re-deriving the aggregated domino row (§4.4) over the new tooth list.
fn double_decker(
    cut: &HyperGraph,
    cuts: &mut ExternalCuts,
    perm: &[usize],
    edges: &[SupportEdge],
    tol: f64,
) -> Option<(f64, CutCandidate)> {
    let teeth = cut.teeth();
    let (split_idx, tooth) = teeth.iter().enumerate().find(|(_, t)| t.body.size() >= 2)?;
    let root_pos = tooth.root_position();
    let positions: Vec<usize> = tooth
        .body
        .segments()
        .iter()
        .flat_map(|&(lo, hi)| lo..=hi)
        .collect();
    let mid = positions.len() / 2;
    let (first_half, second_half) = positions.split_at(mid);
    if first_half.is_empty() || second_half.is_empty() {
        return None;
    }

    let tooth_a = cuts
        .get_tbank_mut()
        .intern(Tooth::new(root_pos, Clique::from_positions(first_half.to_vec())));
    let tooth_b = cuts
        .get_tbank_mut()
        .intern(Tooth::new(root_pos, Clique::from_positions(second_half.to_vec())));

    let mut new_teeth: Vec<Rc<Tooth>> = teeth
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != split_idx)
        .map(|(_, t)| Rc::clone(t))
        .collect();
    new_teeth.push(tooth_a);
    new_teeth.push(tooth_b);

    let handle = Rc::clone(&cut.cliques()[0]);
    let body_len_sum: usize = new_teeth.iter().map(|t| t.body.size().saturating_sub(1)).sum();
    let rhs = ((handle.size() + body_len_sum) / 2) as f64;
    let hyper = HyperGraph::new_domino_cut(handle, new_teeth, rhs);
    let activity = hyper_activity(&hyper, perm, edges);
    if activity <= rhs + tol {
        return None;
    }
    Some((activity - rhs, CutCandidate { hyper, row: None }))
}

/// Grows a comb's handle by absorbing a tooth whose crossing value is exactly 2 (it isn't
/// contributing anything a plain handle extension couldn't), dropping the now-redundant
/// tooth and re-deriving the standard `3k+1` comb right-hand side for the smaller `k`.
fn handling(cut: &HyperGraph, perm: &[usize], edges: &[SupportEdge], tol: f64) -> Option<(f64, CutCandidate)> {
    let cliques = cut.cliques();
    if cliques.len() < 2 {
        return None;
    }
    let handle = &cliques[0];
    let handle_positions: HashSet<usize> = (0..perm.len()).filter(|&p| handle.contains_pos(p)).collect();

    let (drop_idx, tooth_clique) = cliques[1..].iter().enumerate().find(|(_, t)| {
        let positions: HashSet<usize> = (0..perm.len()).filter(|&p| t.contains_pos(p)).collect();
        (crossing_in_positions(&positions, perm, edges) - 2.0).abs() < tol
    })?;

    let merged_positions: HashSet<usize> = handle_positions
        .iter()
        .copied()
        .chain((0..perm.len()).filter(|&p| tooth_clique.contains_pos(p)))
        .collect();
    let new_handle = Rc::new(Clique::from_positions(merged_positions.into_iter().collect()));

    let mut new_cliques = vec![new_handle];
    new_cliques.extend(
        cliques[1..]
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != drop_idx)
            .map(|(_, c)| Rc::clone(c)),
    );
    let teeth_count = new_cliques.len() - 1;
    if teeth_count == 0 {
        return None;
    }
    let rhs = (3 * teeth_count + 1) as f64;
    let hyper = HyperGraph::new_clique_cut(new_cliques, Sense::Greater, rhs);
    let activity = hyper_activity(&hyper, perm, edges);
    if activity >= rhs - tol {
        return None;
    }
    Some((rhs - activity, CutCandidate { hyper, row: None }))
}

/// Adds a singleton tooth on every fractional support-graph neighbor of a bare SEC's
/// clique, turning it into a genuine comb: a comb needs an odd `t >= 3` teeth count, so
/// unlike a single absorbed neighbor (`t = 1`, not a valid comb at all) this gathers every
/// fractional crossing edge and only fires when that count is odd and at least 3.
fn teething(cut: &HyperGraph, perm: &[usize], edges: &[SupportEdge], tol: f64) -> Option<(f64, CutCandidate)> {
    let handle = &cut.cliques()[0];
    let handle_positions: HashSet<usize> = (0..perm.len()).filter(|&p| handle.contains_pos(p)).collect();

    let candidate_edges: Vec<&SupportEdge> = edges
        .iter()
        .filter(|e| {
            let pa = perm[e.a.0];
            let pb = perm[e.b.0];
            handle_positions.contains(&pa) != handle_positions.contains(&pb) && e.x > tol && e.x < 1.0 - tol
        })
        .collect();
    if candidate_edges.len() < 3 || candidate_edges.len() % 2 == 0 {
        return None;
    }

    let mut new_cliques = vec![Rc::clone(handle)];
    for e in &candidate_edges {
        let pa = perm[e.a.0];
        let outside_pos = if handle_positions.contains(&pa) { perm[e.b.0] } else { pa };
        new_cliques.push(Rc::new(Clique::singleton(outside_pos)));
    }

    let teeth_count = candidate_edges.len();
    let rhs = (3 * teeth_count + 1) as f64;
    let hyper = HyperGraph::new_clique_cut(new_cliques, Sense::Greater, rhs);
    let activity = hyper_activity(&hyper, perm, edges);
    if activity >= rhs - tol {
        return None;
    }
    Some((rhs - activity, CutCandidate { hyper, row: None }))
}
