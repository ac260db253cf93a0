//! Tour-nodes file: a cyclic node permutation, ten values per line.

use std::io::{self, BufRead, Write};

use crate::{error::CoreError, instance::node::Node};

pub fn read<R: BufRead>(mut reader: R) -> Result<Vec<Node>, CoreError> {
    let mut first_line = String::new();
    reader.read_line(&mut first_line)?;
    let dimension: usize = first_line.trim().parse().map_err(|_| CoreError::MalformedFile {
        what: "tour-nodes",
        detail: format!("expected node count on the first line, got {first_line:?}"),
    })?;

    let mut rest = String::new();
    reader.read_to_string(&mut rest)?;
    let nodes: Vec<Node> = rest
        .split_ascii_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map(Node)
                .map_err(|_| CoreError::MalformedFile {
                    what: "tour-nodes",
                    detail: format!("expected a node index, got {token:?}"),
                })
        })
        .collect::<Result<_, _>>()?;

    if nodes.len() != dimension {
        return Err(CoreError::MalformedFile {
            what: "tour-nodes",
            detail: format!("header declared {dimension} nodes but found {}", nodes.len()),
        });
    }
    Ok(nodes)
}

pub fn write<W: Write>(mut writer: W, tour: &[Node]) -> io::Result<()> {
    writeln!(writer, "{}", tour.len())?;
    for chunk in tour.chunks(10) {
        let line = chunk
            .iter()
            .map(|node| node.0.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_tour() {
        let tour: Vec<Node> = (0..23).map(Node).collect();
        let mut buf = Vec::new();
        write(&mut buf, &tour).unwrap();
        let parsed = read(io::Cursor::new(buf)).unwrap();
        assert_eq!(parsed, tour);
    }
}
