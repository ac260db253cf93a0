//! Simple domino-parity separation via the witness cut-graph (§4.4).
//!
//! Candidate teeth are generated by growing tour-consecutive segments off each root until
//! they stop being light; a witness graph over degree-nodes, a star node, and tooth nodes
//! is then handed to [`gomory_hu`] and any tree edge whose shore holds an odd, non-trivial
//! count of odd witness nodes at low cut value yields a candidate simple-DP inequality.
//! `tsp-core`'s `HyperGraph::new_domino_cut` has no slot for the "non-negative edge"
//! correction term the full Concorde formula carries, so this separator (like the data
//! model it targets) omits it rather than inventing a field nothing consumes.

use std::collections::HashSet;
use std::rc::Rc;

use tsp_core::{
    active_tour::ActiveTour,
    cuts::{clique::Clique, hypergraph::HyperGraph, tooth::Tooth, ExternalCuts},
    graph::CoreGraph,
    instance::node::Node,
};

use super::{gomory_hu, intern_clique, SupportEdge};
use crate::corelp::CutCandidate;

const MAX_BODY_LEN: usize = 40;

struct Candidate {
    root_pos: usize,
    body: Vec<usize>,
    slack: f64,
}

/// Grows one light tooth per root (the longest tour-consecutive segment starting right
/// after the root whose crossing value stays within `body_len + 1 - tol`), a simplified
/// stand-in for the full adjacency-zone-deduplicated enumeration.
fn candidate_teeth(active_tour: &ActiveTour, edges: &[SupportEdge], tol: f64) -> Vec<Candidate> {
    let tour = active_tour.tour();
    let n = tour.len();
    let mut out = Vec::new();

    for root_pos in 0..n {
        let root = tour[root_pos];
        let mut body_positions = Vec::new();
        let mut best: Option<Candidate> = None;
        for step in 1..=n.saturating_sub(2).min(MAX_BODY_LEN) {
            let pos = (root_pos + step) % n;
            body_positions.push(pos);
            let mut nodes = vec![root];
            nodes.extend(body_positions.iter().map(|&p| tour[p]));
            let crossing = super::crossing_value(&nodes, edges);
            let limit = body_positions.len() as f64 + 1.0;
            if crossing <= limit - tol {
                best = Some(Candidate {
                    root_pos,
                    body: body_positions.clone(),
                    slack: limit - crossing,
                });
            } else {
                break;
            }
        }
        if let Some(candidate) = best {
            out.push(candidate);
        }
    }
    out
}

/// Separates simple domino-parity cuts against the current LP support graph.
pub fn separate(
    graph: &CoreGraph,
    active_tour: &ActiveTour,
    edges: &[SupportEdge],
    cuts: &mut ExternalCuts,
    tol: f64,
) -> Vec<CutCandidate> {
    let n = graph.node_count();
    if n < 6 {
        return Vec::new();
    }
    let teeth = candidate_teeth(active_tour, edges, tol);
    if teeth.is_empty() {
        return Vec::new();
    }

    let star = n;
    let total = n + 1 + teeth.len();
    let tooth_index = |k: usize| n + 1 + k;

    let mut capacity = vec![vec![0.0; total]; total];
    let mut degree_count = vec![0u32; total];
    let add_edge = |cap: &mut Vec<Vec<f64>>, deg: &mut Vec<u32>, a: usize, b: usize, w: f64| {
        cap[a][b] += w;
        cap[b][a] += w;
        deg[a] += 1;
        deg[b] += 1;
    };

    for root_pos in 0..n {
        add_edge(&mut capacity, &mut degree_count, root_pos, star, 0.0);
    }

    // At most one tooth per root in this simplified generator, so a tooth's parent is
    // always its root's degree-node (no same-root containment to chain through).
    let mut root_to_tooth = vec![None; n];
    for (k, candidate) in teeth.iter().enumerate() {
        root_to_tooth[candidate.root_pos] = Some(k);
        add_edge(
            &mut capacity,
            &mut degree_count,
            tooth_index(k),
            candidate.root_pos,
            candidate.slack,
        );
    }

    let endpoint_node = |root_pos: usize, other: Node, active_tour: &ActiveTour| -> usize {
        match root_to_tooth[root_pos] {
            Some(k) => {
                let body = &teeth[k].body;
                let other_pos = active_tour.position(other);
                if body.contains(&other_pos) {
                    tooth_index(k)
                } else {
                    root_pos
                }
            }
            None => root_pos,
        }
    };

    for e in edges {
        let pos_a = active_tour.position(e.a);
        let pos_b = active_tour.position(e.b);
        let endpoint_a = endpoint_node(pos_a, e.b, active_tour);
        let endpoint_b = endpoint_node(pos_b, e.a, active_tour);
        if endpoint_a != endpoint_b {
            add_edge(&mut capacity, &mut degree_count, endpoint_a, endpoint_b, e.x);
        }
    }

    let odd: HashSet<usize> = (0..total).filter(|&i| degree_count[i] % 2 == 1).collect();
    if odd.len() < 2 {
        return Vec::new();
    }

    let tree = gomory_hu::build(&capacity);
    let mut found = Vec::new();

    for node in 1..total {
        if tree.weight[node] >= 1.0 - tol {
            continue;
        }
        let shore = tree.shore(node, &capacity);
        let shore_set: HashSet<usize> = shore.into_iter().collect();
        let odd_in_shore = shore_set.intersection(&odd).count();
        if odd_in_shore <= 1 || odd_in_shore % 2 == 0 {
            continue;
        }

        let handle_side_has_star = shore_set.contains(&star);
        let handle_positions: Vec<usize> = if handle_side_has_star {
            (0..n).filter(|p| !shore_set.contains(p)).collect()
        } else {
            (0..n).filter(|p| shore_set.contains(p)).collect()
        };
        let tooth_ks: Vec<usize> = (0..teeth.len())
            .filter(|&k| shore_set.contains(&tooth_index(k)) != handle_side_has_star)
            .collect();
        if handle_positions.is_empty() || tooth_ks.is_empty() {
            continue;
        }

        let tour = active_tour.tour();
        let handle_nodes: Vec<Node> = handle_positions.iter().map(|&p| tour[p]).collect();
        let handle_bank_clique = intern_clique(cuts, &handle_nodes);

        let mut body_len_sum = 0usize;
        let mut tooth_objs: Vec<Rc<Tooth>> = Vec::new();
        for &k in &tooth_ks {
            let candidate = &teeth[k];
            let root_node = tour[candidate.root_pos];
            let body_nodes: Vec<Node> = candidate.body.iter().map(|&p| tour[p]).collect();
            body_len_sum += body_nodes.len().saturating_sub(1);

            let perm = cuts.get_cbank().perm().to_vec();
            let root_bank_pos = perm[root_node.0];
            let body_bank_clique = Clique::from_positions(body_nodes.iter().map(|n| perm[n.0]).collect());
            let tooth = Tooth::new(root_bank_pos, body_bank_clique);
            tooth_objs.push(cuts.get_tbank_mut().intern(tooth));
        }

        let rhs = ((handle_positions.len() + body_len_sum) / 2) as f64;
        let hyper = HyperGraph::new_domino_cut(handle_bank_clique, tooth_objs, rhs);
        let activity = domino_activity(&hyper, cuts, edges);
        if (activity - rhs).abs() > tol {
            continue;
        }
        found.push(CutCandidate { hyper, row: None });
    }
    found
}

fn domino_activity(hyper: &HyperGraph, cuts: &ExternalCuts, edges: &[SupportEdge]) -> f64 {
    let perm = cuts.get_cbank().perm();
    edges
        .iter()
        .map(|e| e.x * hyper.get_coeff(perm[e.a.0], perm[e.b.0]))
        .sum()
}
