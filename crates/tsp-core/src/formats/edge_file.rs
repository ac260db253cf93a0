//! Tour-edges file: `n m` header followed by `u v 1.0` per tour edge.

use std::io::{self, BufRead, Write};

use crate::{error::CoreError, instance::node::Node};

pub fn read<R: BufRead>(reader: R) -> Result<(usize, Vec<(Node, Node)>), CoreError> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or_else(|| CoreError::MalformedFile {
        what: "tour-edges",
        detail: "empty file".to_string(),
    })??;
    let mut header_parts = header.split_ascii_whitespace();
    let (n, m) = (
        header_parts
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| CoreError::MalformedFile {
                what: "tour-edges",
                detail: format!("bad header {header:?}"),
            })?,
        header_parts
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| CoreError::MalformedFile {
                what: "tour-edges",
                detail: format!("bad header {header:?}"),
            })?,
    );

    let mut edges = Vec::with_capacity(m);
    for line in lines {
        let line = line?;
        let mut parts = line.split_ascii_whitespace();
        let u = parts
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| CoreError::MalformedFile {
                what: "tour-edges",
                detail: format!("bad edge line {line:?}"),
            })?;
        let v = parts
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| CoreError::MalformedFile {
                what: "tour-edges",
                detail: format!("bad edge line {line:?}"),
            })?;
        edges.push((Node(u), Node(v)));
    }
    if edges.len() != m {
        return Err(CoreError::MalformedFile {
            what: "tour-edges",
            detail: format!("header declared {m} edges but found {}", edges.len()),
        });
    }
    Ok((n, edges))
}

pub fn write<W: Write>(mut writer: W, node_count: usize, edges: &[(Node, Node)]) -> io::Result<()> {
    writeln!(writer, "{node_count} {}", edges.len())?;
    for (u, v) in edges {
        writeln!(writer, "{} {} 1.0", u.0, v.0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_tour_edges() {
        let edges = vec![(Node(0), Node(1)), (Node(1), Node(2)), (Node(2), Node(0))];
        let mut buf = Vec::new();
        write(&mut buf, 3, &edges).unwrap();
        let (n, parsed) = read(io::Cursor::new(buf)).unwrap();
        assert_eq!(n, 3);
        assert_eq!(parsed, edges);
    }
}
