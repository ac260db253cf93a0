//! Exact subtour elimination via a Stoer-Wagner global minimum cut.

use tsp_core::{
    cuts::{hypergraph::Sense, ExternalCuts, HyperGraph},
    graph::CoreGraph,
    instance::node::Node,
};

use super::{crossing_value, intern_clique, SupportEdge};
use crate::corelp::CutCandidate;

/// One phase of the Stoer-Wagner algorithm: maximum-adjacency ordering, merging the last
/// two vertices visited and recording the cut-of-the-phase.
fn min_cut_phase(weights: &mut [Vec<f64>], active: &mut Vec<usize>) -> (f64, usize, usize) {
    let mut in_a = vec![false; weights.len()];
    let mut w = vec![0.0; weights.len()];
    let mut order = Vec::with_capacity(active.len());

    for _ in 0..active.len() {
        let next = *active
            .iter()
            .filter(|v| !in_a[**v])
            .max_by(|a, b| w[**a].partial_cmp(&w[**b]).unwrap())
            .expect("active set nonempty while vertices remain unvisited");
        in_a[next] = true;
        order.push(next);
        for &y in active.iter() {
            if !in_a[y] {
                w[y] += weights[next][y];
            }
        }
    }

    let last = order[order.len() - 1];
    let prev = order[order.len() - 2];
    let cut_of_phase = w[last];

    for &y in active.iter() {
        if y != prev && y != last {
            let add = weights[last][y];
            weights[prev][y] += add;
            weights[y][prev] += add;
        }
    }
    active.retain(|&v| v != last);
    (cut_of_phase, last, prev)
}

/// Global minimum cut over a weighted undirected graph on `node_count` vertices, returning
/// the cut weight and one shore's vertex set. `O(n^3)`; fine for the support graphs this
/// runs against (a few thousand LP columns at most).
fn stoer_wagner(node_count: usize, edges: &[SupportEdge]) -> Option<(f64, Vec<usize>)> {
    if node_count < 2 {
        return None;
    }
    let mut weights = vec![vec![0.0; node_count]; node_count];
    for e in edges {
        weights[e.a.0][e.b.0] += e.x;
        weights[e.b.0][e.a.0] += e.x;
    }
    let mut groups: Vec<Vec<usize>> = (0..node_count).map(|i| vec![i]).collect();
    let mut active: Vec<usize> = (0..node_count).collect();

    let mut best_weight = f64::MAX;
    let mut best_side = Vec::new();

    while active.len() > 1 {
        let (cut_of_phase, merged_away, absorber) = min_cut_phase(&mut weights, &mut active);
        if cut_of_phase < best_weight {
            best_weight = cut_of_phase;
            best_side = groups[merged_away].clone();
        }
        let absorbed = std::mem::take(&mut groups[merged_away]);
        groups[absorber].extend(absorbed);
    }
    if best_side.is_empty() {
        None
    } else {
        Some((best_weight, best_side))
    }
}

/// Exact SEC separation: any global min-cut below `2 - tol` is a violated subtour
/// elimination constraint on the smaller shore.
pub fn separate(
    graph: &CoreGraph,
    edges: &[SupportEdge],
    cuts: &mut ExternalCuts,
    tol: f64,
) -> Vec<CutCandidate> {
    let node_count = graph.node_count();
    let Some((weight, side)) = stoer_wagner(node_count, edges) else {
        return Vec::new();
    };
    if weight >= 2.0 - tol || side.len() >= node_count {
        return Vec::new();
    }

    let nodes: Vec<Node> = side.into_iter().map(Node).collect();
    let activity = crossing_value(&nodes, edges);
    if (activity - 2.0).abs() > tol {
        return Vec::new();
    }

    let clique = intern_clique(cuts, &nodes);
    vec![CutCandidate {
        hyper: HyperGraph::new_clique_cut(vec![clique], Sense::Greater, 2.0),
        row: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_a_light_cut_in_a_dumbbell_graph() {
        // Two triangles (0,1,2) and (3,4,5) joined by a single light edge 2-3.
        let edges = vec![
            SupportEdge { a: Node(0), b: Node(1), x: 1.0 },
            SupportEdge { a: Node(1), b: Node(2), x: 1.0 },
            SupportEdge { a: Node(0), b: Node(2), x: 1.0 },
            SupportEdge { a: Node(3), b: Node(4), x: 1.0 },
            SupportEdge { a: Node(4), b: Node(5), x: 1.0 },
            SupportEdge { a: Node(3), b: Node(5), x: 1.0 },
            SupportEdge { a: Node(2), b: Node(3), x: 0.3 },
        ];
        let (weight, side) = stoer_wagner(6, &edges).expect("graph is connected");
        assert!((weight - 0.3).abs() < 1e-9);
        assert_eq!(side.len(), 3);
    }
}
