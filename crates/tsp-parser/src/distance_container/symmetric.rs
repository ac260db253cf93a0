use tsp_core::instance::{
    edge::{data::symmetric::EdgeDataMatrixSym, distance::Distance},
    node::Node,
};

use super::find_row_column_from_lower_triangle_index;

// TODO(perf): Add more fine grained benchmarks to determine optimal parallelism bound
const PARALLELISM_BOUND: usize = 100_000;

/// Builds a symmetric distance matrix from a node coordinate listing and a pairwise distance
/// function, computing the lower-triangular entries directly (no dense n×n intermediate).
pub fn from_node_coord_section<PointType: Sync + Send>(
    node_data: &[PointType],
    dimension: usize,
    distance_function: impl Fn(&PointType, &PointType) -> Distance + Sync + Send + Copy,
) -> EdgeDataMatrixSym<Distance> {
    let number_of_entries = (dimension * (dimension + 1)) / 2;
    let mut distance_data = vec![Distance(0); number_of_entries];

    if number_of_entries < PARALLELISM_BOUND {
        fill_entries(&mut distance_data, node_data, 0, number_of_entries, distance_function);
    } else {
        let nthreads = std::thread::available_parallelism().unwrap();
        let entries_per_chunk = number_of_entries.div_ceil(nthreads.get());

        std::thread::scope(|scope| {
            let mut first_entry_index = 0;
            let mut rest = distance_data.as_mut_slice();
            while first_entry_index < number_of_entries {
                let chunk_len = entries_per_chunk.min(number_of_entries - first_entry_index);
                let (chunk, remainder) = rest.split_at_mut(chunk_len);
                rest = remainder;

                scope.spawn(move || {
                    fill_entries(chunk, node_data, first_entry_index, chunk_len, distance_function);
                });

                first_entry_index += chunk_len;
            }
        });
    }

    EdgeDataMatrixSym::new(distance_data, dimension)
}

/// Fills `chunk`, the entries `[first_entry_index, first_entry_index + chunk.len())` of the
/// triangular layout, with the distances for the corresponding (row, column) pairs.
fn fill_entries<PointType>(
    chunk: &mut [Distance],
    node_data: &[PointType],
    first_entry_index: usize,
    chunk_len: usize,
    distance_function: impl Fn(&PointType, &PointType) -> Distance,
) {
    for offset in 0..chunk_len {
        let (row, column) = find_row_column_from_lower_triangle_index(first_entry_index + offset);
        chunk[offset] = distance_function(&node_data[row], &node_data[column]);
    }
}

/// Builds a symmetric distance matrix from an `EDGE_WEIGHT_SECTION` of explicit weights, in the
/// row/column-major, diagonal-included/excluded order `format` dictates.
pub fn from_explicit_section(
    raw_weights: &[i32],
    dimension: usize,
    positions: &[(usize, usize)],
) -> EdgeDataMatrixSym<Distance> {
    debug_assert_eq!(raw_weights.len(), positions.len());
    let mut matrix = EdgeDataMatrixSym::new_from_dimension_with_value(dimension, Distance(0));
    for (&weight, &(row, column)) in raw_weights.iter().zip(positions) {
        matrix.set_data(Node(row), Node(column), Distance(weight));
    }
    matrix
}
