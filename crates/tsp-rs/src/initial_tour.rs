//! Builds the starting tour `CoreLp::new` is seeded with, when `-t` didn't supply one: a
//! plain nearest-neighbor construction, grounded the same way `branch::estimate_tour` is --
//! a cheap constructive heuristic standing in for the out-of-scope Lin-Kernighan collaborator.

use tsp_core::instance::{node::Node, Instance};

pub fn nearest_neighbor_tour(instance: &Instance) -> Vec<Node> {
    let n = instance.dimension();
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = Node(0);
    visited[0] = true;
    tour.push(current);

    for _ in 1..n {
        let next = (0..n)
            .filter(|&v| !visited[v])
            .min_by_key(|&v| instance.distance(current, Node(v)))
            .expect("at least one unvisited node remains");
        visited[next] = true;
        tour.push(Node(next));
        current = Node(next);
    }
    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::edge::data::symmetric::EdgeDataMatrixSym;
    use tsp_core::instance::edge::distance::Distance;
    use tsp_core::instance::InstanceMetadata;
    use tsp_core::tsp_lib_spec::{EdgeWeightType, NodeCoordType, ProblemType};

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
    fn nearest_neighbor_visits_every_node_exactly_once() {
        let instance = line_instance(8);
        let tour = nearest_neighbor_tour(&instance);
        let mut seen: Vec<usize> = tour.iter().map(|n| n.0).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn nearest_neighbor_on_a_line_walks_straight_out() {
        let instance = line_instance(5);
        let tour = nearest_neighbor_tour(&instance);
        assert_eq!(tour, vec![Node(0), Node(1), Node(2), Node(3), Node(4)]);
    }
}
