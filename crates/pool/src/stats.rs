//! Statistics tracking for object pools

use core::cell::Cell;

/// Point-in-time view of a pool's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Elements handed out and not returned yet
    pub active: usize,
    /// Elements waiting in the queue
    pub pooled: usize,
    /// Elements instantiated by the pool, stocked or on demand
    pub created: u64,
    /// Acquire calls
    pub gets: u64,
    /// Acquires served from the queue
    pub hits: u64,
    /// Acquires that found the queue empty
    pub misses: u64,
    /// Releases the pool accepted
    pub returns: u64,
    /// Releases the pool refused
    pub rejections: u64,
}

impl PoolStats {
    /// Share of acquires served from the queue, 0.0 when nothing was acquired
    pub fn hit_rate(&self) -> f64 {
        if self.gets == 0 {
            0.0
        } else {
            self.hits as f64 / self.gets as f64
        }
    }

    /// Elements this pool accounts for, in and out of the queue
    pub fn total(&self) -> usize {
        self.active + self.pooled
    }
}

/// Live counters owned by a pool
#[derive(Debug, Default)]
pub(crate) struct Counters {
    active: Cell<usize>,
    created: Cell<u64>,
    gets: Cell<u64>,
    hits: Cell<u64>,
    misses: Cell<u64>,
    returns: Cell<u64>,
    rejections: Cell<u64>,
}

fn bump(cell: &Cell<u64>) {
    cell.set(cell.get().saturating_add(1));
}

impl Counters {
    pub(crate) fn record_creation(&self) {
        bump(&self.created);
    }

    pub(crate) fn record_get(&self) {
        bump(&self.gets);
    }

    /// Element left the queue
    pub(crate) fn record_hit(&self) {
        bump(&self.hits);
        self.active.set(self.active.get() + 1);
    }

    pub(crate) fn record_miss(&self) {
        bump(&self.misses);
    }

    /// Element created on demand went straight to the caller
    pub(crate) fn record_handout(&self) {
        self.active.set(self.active.get() + 1);
    }

    /// Lenient pools accept elements they never handed out, so this saturates.
    pub(crate) fn record_return(&self) {
        bump(&self.returns);
        self.active.set(self.active.get().saturating_sub(1));
    }

    pub(crate) fn record_rejection(&self) {
        bump(&self.rejections);
    }

    pub(crate) fn snapshot(&self, pooled: usize) -> PoolStats {
        PoolStats {
            active: self.active.get(),
            pooled,
            created: self.created.get(),
            gets: self.gets.get(),
            hits: self.hits.get(),
            misses: self.misses.get(),
            returns: self.returns.get(),
            rejections: self.rejections.get(),
        }
    }
}
