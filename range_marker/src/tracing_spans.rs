// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::vec::Vec;

use tracing::span::EnteredSpan;

use crate::backend::RangeBackend;

thread_local! {
    static OPEN_SPANS: RefCell<Vec<EnteredSpan>> = const { RefCell::new(Vec::new()) };
}

/// Backend that turns each range into an entered `tracing` span.
///
/// Every range becomes an `INFO` span named `range` with a `label` field, so any subscriber that
/// records span timings (flame graphs, Chrome traces, Tracy layers) sees the same nesting as a GPU
/// profiler would. Entered spans live on a per-thread stack shared by all instances.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TracingBackend;

impl TracingBackend {
    /// Creates the backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Number of spans this backend holds open on the calling thread.
    #[must_use]
    pub fn open_ranges(&self) -> usize {
        OPEN_SPANS.with_borrow(Vec::len)
    }
}

impl RangeBackend for TracingBackend {
    fn range_start(&self, label: &str) {
        let span = tracing::info_span!("range", label).entered();
        OPEN_SPANS.with_borrow_mut(|spans| spans.push(span));
    }

    fn range_end(&self) {
        // Exit outside the borrow in case a subscriber re-enters this backend.
        let span = OPEN_SPANS.with_borrow_mut(Vec::pop);
        match span {
            Some(span) => drop(span),
            None => tracing::warn!("range_end without an open range on this thread"),
        }
    }
}
