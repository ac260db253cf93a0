use criterion::{BatchSize::SmallInput, Criterion, criterion_group, criterion_main};
use tsp_solvers::separators::gomory_hu;

const NODE_COUNT: usize = 40;

/// A dense symmetric capacity matrix with no particular structure, just enough variation to
/// exercise the Gomory-Hu cut tree's repeated max-flow computations the way a fractional
/// support graph built from LP edge values would.
fn capacity_matrix() -> Vec<Vec<f64>> {
    let mut capacity = vec![vec![0.0; NODE_COUNT]; NODE_COUNT];
    for i in 0..NODE_COUNT {
        for j in (i + 1)..NODE_COUNT {
            let w = 1.0 + ((i * 31 + j * 17) % 23) as f64;
            capacity[i][j] = w;
            capacity[j][i] = w;
        }
    }
    capacity
}

fn gomory_hu_build_benchmark(c: &mut Criterion) {
    let capacity = capacity_matrix();
    c.bench_function("gomory_hu tree build over 40 nodes", |b| {
        b.iter_batched_ref(
            || capacity.clone(),
            |capacity| gomory_hu::build(capacity),
            SmallInput,
        )
    });
}

criterion_group!(gomory_hu_bench, gomory_hu_build_benchmark);
criterion_main!(gomory_hu_bench);
