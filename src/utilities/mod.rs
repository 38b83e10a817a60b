//! Grid construction helpers and plain-text grid I/O

use crate::engine::array::GridArray;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Build a grid with a constant border and a constant interior fill
pub fn bordered_grid(rows: usize, cols: usize, border: f64, interior: f64) -> GridArray {
    let mut grid = GridArray::from_scalar((rows, cols), interior);
    for j in 0..cols {
        grid.data[[0, j]] = border;
        grid.data[[rows - 1, j]] = border;
    }
    for i in 0..rows {
        grid.data[[i, 0]] = border;
        grid.data[[i, cols - 1]] = border;
    }
    grid
}

/// Read a rows x cols grid of whitespace-separated values from a file
pub fn read_grid<P: AsRef<Path>>(path: P, rows: usize, cols: usize) -> Result<GridArray> {
    let file = File::open(path)?;
    parse_grid(BufReader::new(file), rows, cols)
}

/// Parse a rows x cols grid of whitespace-separated row-major values.
///
/// Line breaks are interchangeable with spaces; the total value count
/// must match the requested shape exactly.
pub fn parse_grid<R: BufRead>(reader: R, rows: usize, cols: usize) -> Result<GridArray> {
    let mut values = Vec::with_capacity(rows * cols);
    for line in reader.lines() {
        for token in line?.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| Error::MalformedValue {
                token: token.to_string(),
                position: values.len(),
            })?;
            values.push(value);
        }
    }
    GridArray::from_vec(rows, cols, values)
}

/// Write a grid as rows of space-separated values with ten digits after
/// the decimal point
pub fn write_grid<W: Write>(writer: &mut W, grid: &GridArray) -> io::Result<()> {
    for row in grid.data.rows() {
        for value in row.iter() {
            write!(writer, "{value:.10} ")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
