//! Row-band decomposition for the parallel solve
//!
//! This module splits the interior rows of a grid into contiguous bands,
//! one per worker. Boundary rows (the first and the last) hold fixed
//! values and are never assigned to a band.

use std::ops::Range;

/// Assignment of interior rows to workers
#[derive(Debug, Clone)]
pub struct RowPartition {
    bands: Vec<Range<usize>>,
}

impl RowPartition {
    /// Divide the interior rows `1..rows-1` evenly across `workers` bands.
    ///
    /// Every interior row lands in exactly one band; bands are contiguous
    /// and may be empty when there are more workers than interior rows.
    ///
    /// Panics if `workers` is zero or `rows < 2`; both are programming
    /// errors, not runtime conditions.
    pub fn new(rows: usize, workers: usize) -> Self {
        assert!(workers > 0, "at least one worker band is required");
        assert!(rows >= 2, "a grid needs two boundary rows");

        let interior = rows - 2;
        let bands: Vec<Range<usize>> = (0..workers)
            .map(|w| (w * interior / workers + 1)..((w + 1) * interior / workers + 1))
            .collect();

        // the bands must tile the interior exactly
        let mut expected = 1;
        for band in &bands {
            assert_eq!(band.start, expected, "bands must be contiguous");
            assert!(band.end >= band.start, "band must not be reversed");
            expected = band.end;
        }
        assert_eq!(expected, rows - 1, "bands must cover the whole interior");

        Self { bands }
    }

    /// Band of rows owned by `worker`
    pub fn band(&self, worker: usize) -> Range<usize> {
        self.bands[worker].clone()
    }

    /// Number of bands (one per worker)
    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    /// Iterate over all bands in worker order
    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.bands.iter().cloned()
    }
}
