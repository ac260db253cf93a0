//! §6's file formats: the tour-nodes reader `-t` loads from, and the tour-edges,
//! xy-coordinates, and LP-solution writers `-E`/`-X`/GIF mode produce.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tsp_core::instance::node::Node;

use crate::error::CliError;

/// Reads a tour-nodes file: first line `n`, then a whitespace-separated cyclic permutation
/// of `{0, ..., n-1}` (the ten-per-line layout a writer uses is just for readability; the
/// reader only splits on whitespace).
pub fn read_tour_nodes(path: &Path) -> Result<Vec<Node>, CliError> {
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    let mut tokens = contents.split_whitespace();
    let n: usize = tokens
        .next()
        .ok_or_else(|| CliError::Args("tour file is empty".to_string()))?
        .parse()
        .map_err(|_| CliError::Args("tour file's node count is not an integer".to_string()))?;

    let tour: Vec<Node> = tokens
        .map(|tok| tok.parse::<usize>().map(Node))
        .collect::<Result<_, _>>()
        .map_err(|_| CliError::Args("tour file contains a non-integer node id".to_string()))?;

    if tour.len() != n {
        return Err(CliError::Args(format!(
            "tour file declares {n} nodes but lists {}",
            tour.len()
        )));
    }
    Ok(tour)
}

pub fn write_tour_nodes(path: &Path, tour: &[Node]) -> Result<(), CliError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", tour.len())?;
    for chunk in tour.chunks(10) {
        let line: Vec<String> = chunk.iter().map(|n| n.0.to_string()).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    Ok(())
}

pub fn write_tour_edges(path: &Path, tour: &[Node]) -> Result<(), CliError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let n = tour.len();
    writeln!(writer, "{n} {n}")?;
    for i in 0..n {
        let a = tour[i];
        let b = tour[(i + 1) % n];
        writeln!(writer, "{} {} 1.0", a.0, b.0)?;
    }
    Ok(())
}

pub fn write_xy_coords(path: &Path, coords: &[(f64, f64)]) -> Result<(), CliError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", coords.len())?;
    for &(x, y) in coords {
        writeln!(writer, "{x} {y}")?;
    }
    Ok(())
}

/// `u < v`, fixed 6-digit precision, one line per nonzero-value edge.
pub fn write_lp_solution(path: &Path, edges: &[(Node, Node, f64)]) -> Result<(), CliError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{} {}", edges.len(), edges.len())?;
    for &(a, b, x) in edges {
        let (lo, hi) = if a.0 < b.0 { (a, b) } else { (b, a) };
        writeln!(writer, "{} {} {:.6}", lo.0, hi.0, x)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn read_tour_nodes_is_whitespace_insensitive() {
        let dir = std::env::temp_dir();
        let path = dir.join("tsp_rs_test_tour.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "4\n0 2\n1 3").unwrap();
        }
        let tour = read_tour_nodes(&path).unwrap();
        assert_eq!(tour, vec![Node(0), Node(2), Node(1), Node(3)]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn read_tour_nodes_rejects_mismatched_count() {
        let dir = std::env::temp_dir();
        let path = dir.join("tsp_rs_test_tour_bad.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "4\n0 1 2").unwrap();
        }
        assert!(read_tour_nodes(&path).is_err());
        std::fs::remove_file(&path).ok();
    }
}
