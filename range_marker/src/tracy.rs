// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::vec::Vec;

use crate::backend::RangeBackend;

type BackendGuard = tracy_client::Span;

thread_local! {
    // `None` marks a range opened while no Tracy client was running; it still holds a slot so the
    // next `range_end` pops the right range.
    static STACK: RefCell<Vec<Option<BackendGuard>>> = const { RefCell::new(Vec::new()) };
}

/// Backend that emits Tracy zones via `tracy-client`.
///
/// Ranges opened while no Tracy client is running are tracked but produce no zone, so start/end
/// pairing survives a client that starts or stops mid-range. Open zones live on a per-thread stack
/// shared by all instances.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TracyBackend;

impl TracyBackend {
    /// Creates the backend. Start a `tracy_client::Client` separately to actually record zones.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Number of ranges this backend holds open on the calling thread.
    #[must_use]
    pub fn open_ranges(&self) -> usize {
        STACK.with_borrow(Vec::len)
    }

    fn start_zone(label: &str) -> Option<BackendGuard> {
        let client = tracy_client::Client::running()?;
        Some(client.span_alloc(Some(label), "range_marker.range", "range_marker", 0, 0))
    }
}

impl RangeBackend for TracyBackend {
    fn range_start(&self, label: &str) {
        let guard = Self::start_zone(label);
        STACK.with_borrow_mut(|stack| stack.push(guard));
    }

    fn range_end(&self) {
        // The zone ends when the guard drops, outside the stack borrow.
        let Some(guard) = STACK.with_borrow_mut(Vec::pop) else {
            tracing::warn!("range_end without an open range on this thread");
            return;
        };
        drop(guard);
    }
}
