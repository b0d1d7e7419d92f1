// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::marker::PhantomData;

use crate::backend::RangeBackend;
use crate::registry::{self, backend};

/// Guard for one open range.
///
/// Creating the guard emits `range_start(label)`; dropping it emits `range_end()`. The end signal
/// is emitted on every exit path, including unwinding. Guards dropped in reverse order of creation
/// close their ranges inner-to-outer, which is what the backends' per-thread stacks expect.
///
/// The guard is `!Send` so the end signal is always emitted on the thread that opened the range:
///
/// ```compile_fail
/// use range_marker::{NullBackend, ScopedRange};
///
/// static BACKEND: NullBackend = NullBackend;
/// let range = ScopedRange::enter(&BACKEND, "moved");
/// std::thread::spawn(move || drop(range));
/// ```
#[must_use = "the range closes as soon as the guard is dropped"]
pub struct ScopedRange<'a, B: RangeBackend + ?Sized = dyn RangeBackend> {
    backend: Option<&'a B>,
    _not_send: PhantomData<*const ()>,
}

impl<'a, B: RangeBackend + ?Sized> ScopedRange<'a, B> {
    /// Opens a range named `label` on `backend`.
    ///
    /// If emission is disabled (see [`set_enabled`](crate::set_enabled)) the guard is inert and
    /// emits nothing.
    pub fn enter(backend: &'a B, label: &str) -> Self {
        if !registry::is_enabled() {
            return Self::inert();
        }
        backend.range_start(label);
        Self {
            backend: Some(backend),
            _not_send: PhantomData,
        }
    }

    fn inert() -> Self {
        Self {
            backend: None,
            _not_send: PhantomData,
        }
    }

    /// Returns `true` if dropping this guard will emit an end signal.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.backend.is_some()
    }
}

impl<B: RangeBackend + ?Sized> Drop for ScopedRange<'_, B> {
    fn drop(&mut self) {
        if let Some(backend) = self.backend.take() {
            backend.range_end();
        }
    }
}

impl<B: RangeBackend + ?Sized> core::fmt::Debug for ScopedRange<'_, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScopedRange")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

/// Opens a range named `event_name` on the global backend.
///
/// ```
/// let _range = range_marker::scoped_range("load_weights");
/// // work measured by the profiler
/// ```
pub fn scoped_range(event_name: &str) -> ScopedRange<'static> {
    ScopedRange::enter(backend(), event_name)
}

/// Runs `work` inside a range named `event_name` on the global backend and returns its result.
pub fn in_range<R>(event_name: &str, work: impl FnOnce() -> R) -> R {
    let _range = scoped_range(event_name);
    work()
}

/// Runs `work` inside a range named `event_name` on `backend` and returns its result.
pub fn in_range_on<B, R>(backend: &B, event_name: &str, work: impl FnOnce() -> R) -> R
where
    B: RangeBackend + ?Sized,
{
    let _range = ScopedRange::enter(backend, event_name);
    work()
}
