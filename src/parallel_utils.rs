//! Parallel plumbing for the relaxation solve
//!
//! This module provides the synchronization primitives shared by all
//! workers: the reusable two-phase rendezvous barrier, the convergence
//! vote, and the shared-grid cell that hands out band-exclusive writes.

use crate::engine::array::GridArray;
use ndarray::{s, ArrayView2, ArrayViewMut2};
use std::cell::UnsafeCell;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};

/// Reusable rendezvous barrier for a fixed set of participants.
///
/// `wait` releases the callers only once all participants have arrived.
/// It runs in two phases: an entry gate that opens when the last
/// participant arrives, and an exit gate that opens when the last
/// participant has left the entry gate. The split keeps a fast thread
/// from being counted into the next round while the current round is
/// still draining.
pub struct RendezvousBarrier {
    capacity: usize,
    state: Mutex<BarrierState>,
    entry: Condvar,
    exit: Condvar,
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    entry_tickets: usize,
    exit_tickets: usize,
    cancelled: bool,
}

impl RendezvousBarrier {
    /// Create a barrier for `capacity` participants. Panics on zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "a barrier needs at least one participant");
        Self {
            capacity,
            state: Mutex::new(BarrierState::default()),
            entry: Condvar::new(),
            exit: Condvar::new(),
        }
    }

    /// Number of participants released per round
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Block until every participant has arrived, then release them all
    /// and reset for the next round.
    ///
    /// Returns `false` if the barrier was cancelled before or during the
    /// wait; the caller should stop iterating.
    pub fn wait(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.cancelled {
            return false;
        }

        state.arrived += 1;
        if state.arrived == self.capacity {
            state.entry_tickets += self.capacity;
            self.entry.notify_all();
        }
        while state.entry_tickets == 0 && !state.cancelled {
            state = self.entry.wait(state).unwrap();
        }
        if state.cancelled {
            return false;
        }
        state.entry_tickets -= 1;

        state.arrived -= 1;
        if state.arrived == 0 {
            state.exit_tickets += self.capacity;
            self.exit.notify_all();
        }
        while state.exit_tickets == 0 && !state.cancelled {
            state = self.exit.wait(state).unwrap();
        }
        if state.cancelled {
            return false;
        }
        state.exit_tickets -= 1;

        true
    }

    /// Permanently break the barrier: every current and future `wait`
    /// returns `false`. Used on fatal error paths so no worker is left
    /// blocked on participants that will never arrive.
    pub fn cancel(&self) {
        let mut state = self.state.lock().unwrap();
        state.cancelled = true;
        self.entry.notify_all();
        self.exit.notify_all();
    }
}

/// Shared convergence state for one solve.
///
/// A worker whose band changed by less than the threshold records a vote;
/// a vote is permanent for the rest of the solve. Whichever worker first
/// observes a unanimous count marks the solve done; marking it twice is
/// harmless.
pub struct ConvergenceVote {
    workers: usize,
    votes: AtomicUsize,
    done: AtomicBool,
}

impl ConvergenceVote {
    /// Fresh vote state for `workers` participants
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            votes: AtomicUsize::new(0),
            done: AtomicBool::new(false),
        }
    }

    /// Record this worker's converged vote. Callers vote at most once per
    /// solve.
    pub fn record(&self) {
        self.votes.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether every worker has voted converged
    pub fn is_unanimous(&self) -> bool {
        self.votes.load(Ordering::Acquire) == self.workers
    }

    /// Authorize termination
    pub fn mark_done(&self) {
        self.done.store(true, Ordering::Release);
    }

    /// Whether termination has been authorized
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

/// A grid shared by every worker for the lifetime of a solve.
///
/// Reads of the whole grid are unrestricted; write access is handed out
/// per row band. Each worker may only take `band_mut` for the rows it
/// owns, and only in a phase where the barrier protocol guarantees no
/// other thread is touching them.
pub struct SharedGrid {
    cells: UnsafeCell<GridArray>,
}

unsafe impl Sync for SharedGrid {}

impl SharedGrid {
    /// Wrap a grid for shared access
    pub fn new(grid: GridArray) -> Self {
        Self {
            cells: UnsafeCell::new(grid),
        }
    }

    /// Shared read view of the whole grid
    pub fn view(&self) -> ArrayView2<'_, f64> {
        unsafe { (*self.cells.get()).data.view() }
    }

    /// Read view of one row band
    pub fn band(&self, band: Range<usize>) -> ArrayView2<'_, f64> {
        unsafe { (*self.cells.get()).data.slice(s![band, ..]) }
    }

    /// Mutable view of one row band.
    ///
    /// # Safety
    ///
    /// The caller must be the exclusive writer of these rows until the
    /// next barrier, and no other thread may read them in the meantime.
    /// The solve loop's row ownership plus its two barriers per iteration
    /// establish exactly that.
    pub unsafe fn band_mut(&self, band: Range<usize>) -> ArrayViewMut2<'_, f64> {
        (*self.cells.get()).data.slice_mut(s![band, ..])
    }

    /// Reclaim the grid once all workers have been joined
    pub fn into_inner(self) -> GridArray {
        self.cells.into_inner()
    }
}
