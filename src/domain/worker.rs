//! Per-thread relaxation worker
//!
//! Each worker owns a contiguous band of interior rows and runs the
//! compute / vote / publish loop until every band has converged.

use crate::engine::operations::{copy_back_band, relax_band};
use crate::parallel_utils::{ConvergenceVote, RendezvousBarrier, SharedGrid};
use log::trace;
use std::ops::Range;

/// What a worker hands back to the coordinator when it exits
#[derive(Debug, Clone, Copy)]
pub struct WorkerReport {
    /// Number of full stencil rounds this worker ran
    pub iterations: usize,
    /// The band's maximum change in the final round
    pub max_delta: f64,
}

/// One relaxation worker, bound to its row band and the shared solve state
pub struct Worker<'a> {
    pub id: usize,
    pub band: Range<usize>,
    pub current: &'a SharedGrid,
    pub next: &'a SharedGrid,
    pub barrier: &'a RendezvousBarrier,
    pub vote: &'a ConvergenceVote,
    pub threshold: f64,
    pub max_iterations: usize,
}

impl Worker<'_> {
    /// Run the solve loop until global convergence, the iteration cap, or
    /// a cancelled barrier.
    ///
    /// The two barrier waits per round are the publish points: the first
    /// guarantees every band of `next` and every vote of the round is in
    /// place before any copy-back starts; the second guarantees every
    /// copy-back and the done flag are visible before anyone decides
    /// whether to loop again. A worker with an empty band still takes
    /// part in both waits, otherwise the rendezvous would never fill.
    pub fn run(self) -> WorkerReport {
        let mut iterations = 0;
        let mut max_delta = 0.0;
        let mut voted = false;

        loop {
            iterations += 1;

            max_delta = {
                // SAFETY: this worker is the only writer of its band of
                // `next` until the barrier below.
                let next_band = unsafe { self.next.band_mut(self.band.clone()) };
                relax_band(self.current.view(), next_band, self.band.clone())
            };
            trace!(
                "worker {}: round {} max delta {:.3e}",
                self.id,
                iterations,
                max_delta
            );

            if !voted && max_delta < self.threshold {
                voted = true;
                self.vote.record();
            }

            if !self.barrier.wait() {
                break;
            }

            {
                // SAFETY: copy-back writes stay inside the owned band of
                // `current`, and nothing reads `current` again until the
                // barrier below.
                let current_band = unsafe { self.current.band_mut(self.band.clone()) };
                copy_back_band(self.next.band(self.band.clone()), current_band);
            }

            if self.vote.is_unanimous() {
                self.vote.mark_done();
            }

            if !self.barrier.wait() {
                break;
            }

            if self.vote.is_done() || iterations >= self.max_iterations {
                break;
            }
        }

        WorkerReport {
            iterations,
            max_delta,
        }
    }
}
