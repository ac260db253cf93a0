//! Fast blossoms and block combs: a Padberg-Rao style odd-component heuristic over the
//! support graph's fractional-degree components.

use std::collections::{HashMap, HashSet};

use tsp_core::{
    cuts::{hypergraph::Sense, ExternalCuts, HyperGraph},
    graph::CoreGraph,
    instance::node::Node,
};

use super::{intern_clique, SupportEdge};
use crate::corelp::CutCandidate;

/// Union-find over node ids, used to contract the "even" (degree exactly 2, both edges
/// weight 1) parts of the support graph into single components before looking for an odd
/// handle among what's left.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
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

/// Degree (sum of LP values of incident support edges) of every node.
fn fractional_degrees(node_count: usize, edges: &[SupportEdge]) -> Vec<f64> {
    let mut deg = vec![0.0; node_count];
    for e in edges {
        deg[e.a.0] += e.x;
        deg[e.b.0] += e.x;
    }
    deg
}

/// Contracts every edge whose two endpoints both sit at LP-degree exactly 2 with integral
/// incident weights (i.e. nodes the heuristic treats as "even", interior to a 2-factor
/// path) into single components, leaving candidate handles among what remains.
fn contract_even_components(node_count: usize, edges: &[SupportEdge], tol: f64) -> UnionFind {
    let degrees = fractional_degrees(node_count, edges);
    let mut uf = UnionFind::new(node_count);
    for e in edges {
        let a_even = (degrees[e.a.0] - 2.0).abs() < tol;
        let b_even = (degrees[e.b.0] - 2.0).abs() < tol;
        if a_even && b_even && (e.x - 1.0).abs() < tol {
            uf.union(e.a.0, e.b.0);
        }
    }
    uf
}

/// Fast blossoms: find an odd handle among the contracted components (one whose total
/// LP-degree sum is odd-ish, i.e. not an even integer), build singleton teeth on the
/// support edges crossing it with fractional value, and emit one comb per handle found.
pub fn separate_blossoms(
    graph: &CoreGraph,
    edges: &[SupportEdge],
    cuts: &mut ExternalCuts,
    tol: f64,
) -> Vec<CutCandidate> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Vec::new();
    }
    let mut uf = contract_even_components(node_count, edges, tol);

    let mut components: HashMap<usize, Vec<usize>> = HashMap::new();
    for node in 0..node_count {
        components.entry(uf.find(node)).or_default().push(node);
    }

    let mut found = Vec::new();
    for handle_nodes in components.values() {
        if handle_nodes.len() < 2 || handle_nodes.len() >= node_count {
            continue;
        }
        let handle_set: HashSet<usize> = handle_nodes.iter().copied().collect();
        let crossing: Vec<&SupportEdge> = edges
            .iter()
            .filter(|e| handle_set.contains(&e.a.0) != handle_set.contains(&e.b.0))
            .collect();
        // An odd handle has an odd number of fractional crossing edges with value
        // strictly between 0 and 1; that is the comb's singleton-tooth set.
        let teeth_edges: Vec<&SupportEdge> = crossing
            .iter()
            .filter(|e| e.x < 1.0 - tol)
            .copied()
            .collect();
        if teeth_edges.len() < 3 || teeth_edges.len() % 2 == 0 {
            continue;
        }

        let handle_nodes_n: Vec<Node> = handle_nodes.iter().copied().map(Node).collect();
        let mut cliques = vec![intern_clique(cuts, &handle_nodes_n)];
        let mut all_nodes = handle_nodes_n.clone();
        for e in &teeth_edges {
            let tooth_node = if handle_set.contains(&e.a.0) { e.b } else { e.a };
            cliques.push(intern_clique(cuts, &[tooth_node]));
            all_nodes.push(tooth_node);
        }

        let teeth_count = teeth_edges.len();
        let rhs = (3 * teeth_count + 1) as f64;
        let activity = comb_activity(&handle_set, &teeth_edges, edges);
        if (activity - rhs).abs() > tol {
            continue;
        }
        found.push(CutCandidate {
            hyper: HyperGraph::new_clique_cut(cliques, Sense::Greater, rhs),
            row: None,
        });
    }
    found
}

/// A comb's tour activity: `x(delta(H)) + sum_k x(delta(T_k))`, the standard comb
/// left-hand side evaluated at the current LP point.
fn comb_activity(handle: &HashSet<usize>, teeth: &[&SupportEdge], edges: &[SupportEdge]) -> f64 {
    let handle_cross: f64 = edges
        .iter()
        .filter(|e| handle.contains(&e.a.0) != handle.contains(&e.b.0))
        .map(|e| e.x)
        .sum();
    let teeth_cross: f64 = teeth
        .iter()
        .map(|tooth_edge| {
            let tooth_node = if handle.contains(&tooth_edge.a.0) {
                tooth_edge.b.0
            } else {
                tooth_edge.a.0
            };
            edges
                .iter()
                .filter(|e| (e.a.0 == tooth_node) != (e.b.0 == tooth_node))
                .map(|e| e.x)
                .sum::<f64>()
        })
        .sum();
    handle_cross + teeth_cross
}

/// Block combs: instead of [`separate_blossoms`]'s handle (an even-component contraction),
/// groups nodes sitting at fractional (non-integral) LP-degree that are connected through
/// other fractional-degree nodes into one candidate handle -- a coarser but cheap
/// approximation of "shares a biconnected block" -- then builds a genuine multi-tooth comb
/// over it the same way [`separate_blossoms`] does: odd, `>=3` singleton teeth on the
/// fractional crossing edges, `3t+1` right-hand side.
pub fn separate_block_combs(
    graph: &CoreGraph,
    edges: &[SupportEdge],
    cuts: &mut ExternalCuts,
    tol: f64,
) -> Vec<CutCandidate> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Vec::new();
    }
    let degrees = fractional_degrees(node_count, edges);
    let odd: Vec<usize> = (0..node_count)
        .filter(|&n| (degrees[n] - degrees[n].round()).abs() > tol)
        .collect();
    if odd.len() < 4 {
        return Vec::new();
    }

    let mut uf = UnionFind::new(node_count);
    for e in edges {
        if (degrees[e.a.0] - degrees[e.a.0].round()).abs() > tol
            && (degrees[e.b.0] - degrees[e.b.0].round()).abs() > tol
        {
            uf.union(e.a.0, e.b.0);
        }
    }

    let mut blocks: HashMap<usize, Vec<usize>> = HashMap::new();
    for &n in &odd {
        blocks.entry(uf.find(n)).or_default().push(n);
    }

    let mut found = Vec::new();
    for block in blocks.values() {
        if block.len() < 2 || block.len() >= node_count {
            continue;
        }
        let handle_set: HashSet<usize> = block.iter().copied().collect();
        let crossing: Vec<&SupportEdge> = edges
            .iter()
            .filter(|e| handle_set.contains(&e.a.0) != handle_set.contains(&e.b.0))
            .collect();
        let teeth_edges: Vec<&SupportEdge> = crossing
            .iter()
            .filter(|e| e.x < 1.0 - tol)
            .copied()
            .collect();
        if teeth_edges.len() < 3 || teeth_edges.len() % 2 == 0 {
            continue;
        }

        let handle_nodes: Vec<Node> = block.iter().copied().map(Node).collect();
        let mut cliques = vec![intern_clique(cuts, &handle_nodes)];
        for e in &teeth_edges {
            let tooth_node = if handle_set.contains(&e.a.0) { e.b } else { e.a };
            cliques.push(intern_clique(cuts, &[tooth_node]));
        }

        let teeth_count = teeth_edges.len();
        let rhs = (3 * teeth_count + 1) as f64;
        let activity = comb_activity(&handle_set, &teeth_edges, edges);
        if (activity - rhs).abs() > tol {
            continue;
        }
        found.push(CutCandidate {
            hyper: HyperGraph::new_clique_cut(cliques, Sense::Greater, rhs),
            row: None,
        });
    }
    found
}
