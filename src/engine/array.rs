//! Core grid type for relaxation solves
//!
//! This module provides the fundamental dense 2-D grid used throughout the
//! library. It wraps ndarray for efficient numerical operations on
//! double-precision cells.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use num_traits::Zero;

/// The main grid type for relaxation solves
#[derive(Debug, Clone)]
pub struct GridArray<T = f64> {
    /// The underlying ndarray
    pub data: Array2<T>,
}

impl<T> GridArray<T>
where
    T: Clone + Zero,
{
    /// Create a new grid filled with zeros
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self {
            data: Array2::zeros(shape),
        }
    }

    /// Create a new grid from a scalar value
    pub fn from_scalar(shape: (usize, usize), value: T) -> Self {
        Self {
            data: Array2::from_elem(shape, value),
        }
    }

    /// Get the shape as a (rows, cols) tuple
    pub fn shape_tuple(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Get a view of the grid
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a mutable view of the grid
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.data.view_mut()
    }

    /// Check if the grid is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl GridArray<f64> {
    /// Build a grid from row-major values, checking the length
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(Error::ValueCount {
                expected: rows * cols,
                found: values.len(),
            });
        }
        let data = Array2::from_shape_vec((rows, cols), values).expect("length checked above");
        Ok(Self { data })
    }

    /// Largest absolute cell-wise difference between two same-shape grids
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
