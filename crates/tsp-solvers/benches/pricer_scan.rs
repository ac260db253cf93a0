use criterion::{BatchSize::SmallInput, Criterion, criterion_group, criterion_main};

use tsp_core::instance::edge::data::symmetric::EdgeDataMatrixSym;
use tsp_core::instance::edge::distance::Distance;
use tsp_core::instance::node::Node;
use tsp_core::instance::{Instance, InstanceMetadata};
use tsp_core::tolerances::Tolerances;
use tsp_core::tsp_lib_spec::{EdgeWeightType, NodeCoordType, ProblemType};
use tsp_lp::DenseSimplex;
use tsp_solvers::{CoreLp, Pricer};

const GRID_SIDE: usize = 16;

fn grid_instance() -> Instance {
    let n = GRID_SIDE * GRID_SIDE;
    let matrix = EdgeDataMatrixSym::new_from_distance_function(n, |a, b| {
        let (ax, ay) = (a.0 % GRID_SIDE, a.0 / GRID_SIDE);
        let (bx, by) = (b.0 % GRID_SIDE, b.0 / GRID_SIDE);
        let dx = ax as f64 - bx as f64;
        let dy = ay as f64 - by as f64;
        Distance((dx * dx + dy * dy).sqrt().round() as i32)
    });
    let metadata = InstanceMetadata {
        name: "grid".to_string(),
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

/// Boustrophedon sweep of the grid: a cheap, valid starting tour that keeps `CoreLp::new`
/// from immediately fathoming on the optimal tour, so the reduced-cost scan has real work
/// to do against a non-trivial dual solution.
fn boustrophedon_tour() -> Vec<Node> {
    let mut tour = Vec::with_capacity(GRID_SIDE * GRID_SIDE);
    for row in 0..GRID_SIDE {
        if row % 2 == 0 {
            for col in 0..GRID_SIDE {
                tour.push(Node(row * GRID_SIDE + col));
            }
        } else {
            for col in (0..GRID_SIDE).rev() {
                tour.push(Node(row * GRID_SIDE + col));
            }
        }
    }
    tour
}

fn pricer_inside_scan_benchmark(c: &mut Criterion) {
    let instance = grid_instance();
    let tour = boustrophedon_tour();
    let pricer = Pricer::new(&instance, 10);

    c.bench_function("pricer inside_scan over a 16x16 grid", |b| {
        b.iter_batched_ref(
            || {
                CoreLp::new(instance.clone(), tour.clone(), DenseSimplex::new(), Tolerances::default(), 2000)
                    .expect("construction succeeds")
            },
            |corelp| {
                let _ = pricer.inside_scan(corelp);
            },
            SmallInput,
        )
    });
}

criterion_group!(pricer_scan, pricer_inside_scan_benchmark);
criterion_main!(pricer_scan);
