//! Re-entrancy guard for operations that must not overlap.
//!
//! Gate submission and screen advance each own one [`BusyFlag`]. A second
//! caller that finds the flag raised gets `None` back and must treat its
//! request as a no-op.

use std::sync::atomic::{AtomicBool, Ordering};

/// A single boolean "operation pending" flag.
#[derive(Debug, Default)]
pub struct BusyFlag {
    busy: AtomicBool,
}

impl BusyFlag {
    /// Creates a lowered flag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Raises the flag if it is lowered. The flag is lowered again when the
    /// returned guard drops.
    #[must_use]
    pub fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { flag: self })
    }

    /// Returns `true` while a guard is alive.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Lowers its [`BusyFlag`] on drop.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.busy.store(false, Ordering::Release);
    }
}
