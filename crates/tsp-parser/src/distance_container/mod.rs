//! Assembly of a parsed [`EdgeDataMatrixSym`] from whatever section shape TSPLIB95 handed us:
//! node coordinates plus a distance function, or an already-explicit distance matrix.

pub mod symmetric;

/// Row/column of entry `index` in a flattened lower-(left-)triangular matrix (including the
/// diagonal), the same packing [`tsp_core::instance::edge::data::symmetric::EdgeDataMatrixSym`]
/// uses internally.
fn find_row_column_from_lower_triangle_index(index: usize) -> (usize, usize) {
    let row = (-0.5 + (0.25 + 2.0 * index as f64).sqrt()).floor() as usize;
    let column = index - (row * (row + 1)) / 2;
    (row, column)
}
