//! Per-thread guard around the write path
//!
//! Anything that logs from inside encoding or writing (a sink reporting
//! through `tracing` while the tracing bridge is installed, for instance)
//! would recurse into the same logger. Records produced while the guard is
//! held on the current thread are dropped.

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

pub(crate) struct ReentrancyGuard {
    // Must be dropped on the thread that created it.
    _not_send: PhantomData<*const ()>,
}

impl ReentrancyGuard {
    /// Enter the write path, or `None` if this thread is already in it
    pub(crate) fn enter() -> Option<Self> {
        let already = WRITING.with(|writing| writing.replace(true));
        (!already).then_some(Self {
            _not_send: PhantomData,
        })
    }

    pub(crate) fn is_active() -> bool {
        WRITING.with(Cell::get)
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        WRITING.with(|writing| writing.set(false));
    }
}
