//! xy-coordinates file: `n` header followed by one `x y` pair per node.

use std::io::{self, BufRead, Write};

use crate::error::CoreError;

pub fn read<R: BufRead>(mut reader: R) -> Result<Vec<(f64, f64)>, CoreError> {
    let mut first_line = String::new();
    reader.read_line(&mut first_line)?;
    let n: usize = first_line.trim().parse().map_err(|_| CoreError::MalformedFile {
        what: "xy-coordinates",
        detail: format!("expected a node count on the first line, got {first_line:?}"),
    })?;

    let mut coords = Vec::with_capacity(n);
    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_ascii_whitespace();
        let x: f64 = parts.next().and_then(|s| s.parse().ok()).ok_or_else(|| {
            CoreError::MalformedFile {
                what: "xy-coordinates",
                detail: format!("bad coordinate line {line:?}"),
            }
        })?;
        let y: f64 = parts.next().and_then(|s| s.parse().ok()).ok_or_else(|| {
            CoreError::MalformedFile {
                what: "xy-coordinates",
                detail: format!("bad coordinate line {line:?}"),
            }
        })?;
        coords.push((x, y));
    }

    if coords.len() != n {
        return Err(CoreError::MalformedFile {
            what: "xy-coordinates",
            detail: format!("header declared {n} nodes but found {}", coords.len()),
        });
    }
    Ok(coords)
}

pub fn write<W: Write>(mut writer: W, coords: &[(f64, f64)]) -> io::Result<()> {
    writeln!(writer, "{}", coords.len())?;
    for (x, y) in coords {
        writeln!(writer, "{x} {y}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_coordinates() {
        let coords = vec![(0.0, 0.0), (1.5, -2.25), (42.0, 7.0)];
        let mut buf = Vec::new();
        write(&mut buf, &coords).unwrap();
        let parsed = read(io::Cursor::new(buf)).unwrap();
        assert_eq!(parsed, coords);
    }
}
