//! Stencil operations for relaxation sweeps
//!
//! These operate on plain ndarray views so the numeric kernel stays
//! independent of the thread plumbing in `parallel_utils`.

use ndarray::{s, ArrayView2, ArrayViewMut2};
use std::ops::Range;

/// Relax one band of rows: every interior cell of `band` is replaced by
/// the mean of its four orthogonal neighbors, written into `next_band`
/// (a view of just the band rows).
///
/// Returns the largest absolute change over the band. A cell that does
/// not change contributes nothing, so an empty or fully settled band
/// reports 0.0 and always counts as converged.
pub fn relax_band(
    current: ArrayView2<'_, f64>,
    mut next_band: ArrayViewMut2<'_, f64>,
    band: Range<usize>,
) -> f64 {
    let cols = current.ncols();
    let mut max_delta = 0.0_f64;
    for i in band.clone() {
        for j in 1..cols - 1 {
            let mean = (current[[i, j + 1]]
                + current[[i, j - 1]]
                + current[[i + 1, j]]
                + current[[i - 1, j]])
                / 4.0;
            let delta = (mean - current[[i, j]]).abs();
            if delta > max_delta {
                max_delta = delta;
            }
            next_band[[i - band.start, j]] = mean;
        }
    }
    max_delta
}

/// Publish a band: copy the interior columns of `next_band` back into
/// `current_band`. Boundary columns are never written; they are identical
/// in both buffers from initialization.
pub fn copy_back_band(next_band: ArrayView2<'_, f64>, mut current_band: ArrayViewMut2<'_, f64>) {
    let cols = next_band.ncols();
    if next_band.nrows() == 0 || cols < 2 {
        return;
    }
    current_band
        .slice_mut(s![.., 1..cols - 1])
        .assign(&next_band.slice(s![.., 1..cols - 1]));
}
