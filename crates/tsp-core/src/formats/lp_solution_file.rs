//! LP solution dump: `n m` header, then `u v x` (`u < v`) for each nonzero-value edge.

use std::io::{self, BufRead, Write};

use crate::{error::CoreError, instance::node::Node};

pub fn read<R: BufRead>(reader: R) -> Result<(usize, Vec<(Node, Node, f64)>), CoreError> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or_else(|| CoreError::MalformedFile {
        what: "lp-solution",
        detail: "empty file".to_string(),
    })??;
    let mut header_parts = header.split_ascii_whitespace();
    let n: usize = header_parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CoreError::MalformedFile {
            what: "lp-solution",
            detail: format!("bad header {header:?}"),
        })?;
    let m: usize = header_parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CoreError::MalformedFile {
            what: "lp-solution",
            detail: format!("bad header {header:?}"),
        })?;

    let mut entries = Vec::with_capacity(m);
    for line in lines {
        let line = line?;
        let mut parts = line.split_ascii_whitespace();
        let u: usize = parts.next().and_then(|s| s.parse().ok()).ok_or_else(|| {
            CoreError::MalformedFile {
                what: "lp-solution",
                detail: format!("bad entry {line:?}"),
            }
        })?;
        let v: usize = parts.next().and_then(|s| s.parse().ok()).ok_or_else(|| {
            CoreError::MalformedFile {
                what: "lp-solution",
                detail: format!("bad entry {line:?}"),
            }
        })?;
        let x: f64 = parts.next().and_then(|s| s.parse().ok()).ok_or_else(|| {
            CoreError::MalformedFile {
                what: "lp-solution",
                detail: format!("bad entry {line:?}"),
            }
        })?;
        entries.push((Node(u), Node(v), x));
    }
    Ok((n, entries))
}

pub fn write<W: Write>(mut writer: W, node_count: usize, entries: &[(Node, Node, f64)]) -> io::Result<()> {
    writeln!(writer, "{node_count} {}", entries.len())?;
    for (u, v, x) in entries {
        writeln!(writer, "{} {} {:.6}", u.0, v.0, x)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_fractional_entries() {
        let entries = vec![(Node(0), Node(1), 0.5), (Node(1), Node(2), 1.0)];
        let mut buf = Vec::new();
        write(&mut buf, 3, &entries).unwrap();
        let (n, parsed) = read(io::Cursor::new(buf)).unwrap();
        assert_eq!(n, 3);
        assert_eq!(parsed, entries);
    }
}
