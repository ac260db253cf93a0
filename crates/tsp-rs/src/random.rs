//! `-R`'s random Euclidean instance generator: `n` points scattered uniformly over a
//! `grid_side x grid_side` square, distances rounded to the nearest integer the way
//! TSPLIB's `EUC_2D` weight type does.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::time::{SystemTime, UNIX_EPOCH};

use tsp_core::instance::edge::data::symmetric::EdgeDataMatrixSym;
use tsp_core::instance::edge::distance::Distance;
use tsp_core::instance::node::Node;
use tsp_core::instance::{Instance, InstanceMetadata};
use tsp_core::tsp_lib_spec::{EdgeWeightType, NodeCoordType, ProblemType};

pub struct RandomInstance {
    pub instance: Instance,
    pub coords: Vec<(f64, f64)>,
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

pub fn generate(node_count: usize, grid_side: u32, seed: Option<u64>) -> RandomInstance {
    let mut rng = StdRng::seed_from_u64(resolve_seed(seed));
    let coords: Vec<(f64, f64)> = (0..node_count)
        .map(|_| {
            (
                rng.random_range(0..=grid_side) as f64,
                rng.random_range(0..=grid_side) as f64,
            )
        })
        .collect();

    let matrix = EdgeDataMatrixSym::new_from_distance_function(node_count, |a, b| {
        let (ax, ay) = coords[a.0];
        let (bx, by) = coords[b.0];
        euclidean_distance(ax, ay, bx, by)
    });

    let metadata = InstanceMetadata {
        name: "random".to_string(),
        problem_type: ProblemType::TSP,
        comment: Some(format!("generated, n={node_count}, grid={grid_side}")),
        dimension: node_count,
        capacity: None,
        edge_weight_type: EdgeWeightType::EUC_2D,
        edge_weight_format: None,
        edge_data_format: None,
        node_coord_type: NodeCoordType::NO_COORDS,
        display_data_type: None,
    };

    RandomInstance {
        instance: Instance::new(matrix, metadata),
        coords,
    }
}

fn euclidean_distance(ax: f64, ay: f64, bx: f64, by: f64) -> Distance {
    Distance((((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_reproducible_under_a_fixed_seed() {
        let a = generate(20, 1000, Some(42));
        let b = generate(20, 1000, Some(42));
        assert_eq!(a.coords, b.coords);
        for i in 0..20 {
            for j in 0..20 {
                assert_eq!(
                    a.instance.distance(Node(i), Node(j)),
                    b.instance.distance(Node(i), Node(j))
                );
            }
        }
    }

    #[test]
    fn generated_instance_has_requested_dimension() {
        let generated = generate(15, 500, Some(1));
        assert_eq!(generated.instance.dimension(), 15);
        assert_eq!(generated.coords.len(), 15);
    }
}
