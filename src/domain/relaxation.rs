//! Coordinator for the parallel relaxation solve
//!
//! Owns the double-buffered grid, spawns one worker per row band, and
//! collects the converged result.

use crate::domain::worker::{Worker, WorkerReport};
use crate::engine::array::GridArray;
use crate::error::{Error, Result};
use crate::parallel_utils::{ConvergenceVote, RendezvousBarrier, SharedGrid};
use crate::row_partition::RowPartition;
use log::{debug, info};
use std::thread;

/// Parameters for a relaxation solve
#[derive(Debug, Clone)]
pub struct RelaxationParams {
    /// Number of worker threads
    pub workers: usize,
    /// A band has converged once its largest per-cell change drops below this
    pub threshold: f64,
    /// Safety cap on the number of rounds
    pub max_iterations: usize,
}

impl Default for RelaxationParams {
    fn default() -> Self {
        Self {
            workers: 4,
            threshold: 1e-5,
            max_iterations: 100_000,
        }
    }
}

/// Result of a relaxation solve
#[derive(Debug, Clone)]
pub struct RelaxationResult {
    /// The relaxed grid
    pub grid: GridArray,
    /// Number of full stencil rounds performed
    pub iterations: usize,
    /// Largest per-cell change observed in the final round
    pub max_delta: f64,
    /// Whether every band converged (false only when the cap was hit)
    pub converged: bool,
}

/// Relax `grid` until every worker's band changes by less than the
/// threshold, and return the converged grid.
///
/// Boundary rows and columns act as fixed values: they are copied into
/// the scratch buffer once and never rewritten, so they are identical
/// before and after the solve.
pub fn solve(grid: GridArray, params: &RelaxationParams) -> Result<RelaxationResult> {
    let (rows, cols) = grid.shape_tuple();
    if params.workers == 0 {
        return Err(Error::NoWorkers);
    }
    if rows < 2 || cols < 2 {
        return Err(Error::GridTooSmall { rows, cols });
    }
    if !(params.threshold > 0.0) {
        return Err(Error::InvalidThreshold(params.threshold));
    }

    let partition = RowPartition::new(rows, params.workers);
    let next = SharedGrid::new(grid.clone());
    let current = SharedGrid::new(grid);
    let barrier = RendezvousBarrier::new(params.workers);
    let vote = ConvergenceVote::new(params.workers);

    debug!(
        "solving {}x{} grid with {} workers, threshold {:.1e}",
        rows, cols, params.workers, params.threshold
    );

    let reports: Vec<WorkerReport> = thread::scope(|scope| -> Result<Vec<WorkerReport>> {
        let mut handles = Vec::with_capacity(params.workers);
        for id in 0..params.workers {
            let worker = Worker {
                id,
                band: partition.band(id),
                current: &current,
                next: &next,
                barrier: &barrier,
                vote: &vote,
                threshold: params.threshold,
                max_iterations: params.max_iterations,
            };
            let spawned = thread::Builder::new()
                .name(format!("relax-{id}"))
                .spawn_scoped(scope, move || worker.run());
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    // unblock any workers already parked at the barrier
                    barrier.cancel();
                    return Err(Error::WorkerSpawn(source));
                }
            }
        }
        Ok(handles
            .into_iter()
            .map(|handle| handle.join().expect("relaxation worker panicked"))
            .collect())
    })?;

    let iterations = reports.iter().map(|r| r.iterations).max().unwrap_or(0);
    let max_delta = reports.iter().map(|r| r.max_delta).fold(0.0, f64::max);
    let converged = vote.is_done();

    info!(
        "relaxation finished after {} iterations (converged: {}, max delta {:.3e})",
        iterations, converged, max_delta
    );

    Ok(RelaxationResult {
        grid: current.into_inner(),
        iterations,
        max_delta,
        converged,
    })
}
