// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::boxed::Box;
use std::sync::Arc;

/// A profiling backend that understands named, stack-disciplined ranges.
///
/// Ranges are tracked per thread: [`range_end`](Self::range_end) closes the most recently opened
/// range that is still open on the calling thread. Callers normally go through
/// [`ScopedRange`](crate::ScopedRange) rather than calling these methods directly, which keeps
/// every start paired with exactly one end on the same thread.
pub trait RangeBackend: Send + Sync {
    /// Opens a range named `label` on the calling thread.
    fn range_start(&self, label: &str);

    /// Closes the innermost open range on the calling thread.
    fn range_end(&self);
}

/// Backend that drops every signal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NullBackend;

impl RangeBackend for NullBackend {
    #[inline]
    fn range_start(&self, _label: &str) {}

    #[inline]
    fn range_end(&self) {}
}

impl<B: RangeBackend + ?Sized> RangeBackend for &B {
    #[inline]
    fn range_start(&self, label: &str) {
        (**self).range_start(label);
    }

    #[inline]
    fn range_end(&self) {
        (**self).range_end();
    }
}

impl<B: RangeBackend + ?Sized> RangeBackend for Box<B> {
    #[inline]
    fn range_start(&self, label: &str) {
        (**self).range_start(label);
    }

    #[inline]
    fn range_end(&self) {
        (**self).range_end();
    }
}

impl<B: RangeBackend + ?Sized> RangeBackend for Arc<B> {
    #[inline]
    fn range_start(&self, label: &str) {
        (**self).range_start(label);
    }

    #[inline]
    fn range_end(&self) {
        (**self).range_end();
    }
}
