// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide backend and enable switch.

use std::boxed::Box;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::backend::{NullBackend, RangeBackend};

static BACKEND: OnceLock<Box<dyn RangeBackend>> = OnceLock::new();
static NULL_BACKEND: NullBackend = NullBackend;
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Returned by [`set_backend`] when a backend is already installed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("a range backend is already installed")]
pub struct SetBackendError(());

/// Installs the process-wide backend used by [`scoped_range`](crate::scoped_range) and
/// [`instrument`](crate::instrument).
///
/// Only the first call succeeds; later calls return [`SetBackendError`] and drop `backend`.
pub fn set_backend<B: RangeBackend + 'static>(backend: B) -> Result<(), SetBackendError> {
    let backend_name = core::any::type_name::<B>();
    BACKEND.set(Box::new(backend)).map_err(|_| {
        tracing::warn!(backend = backend_name, "range backend already installed");
        SetBackendError(())
    })?;
    tracing::debug!(backend = backend_name, "installed range backend");
    Ok(())
}

/// Returns the installed backend, or a [`NullBackend`] if none was installed.
#[must_use]
pub fn backend() -> &'static dyn RangeBackend {
    match BACKEND.get() {
        Some(backend) => backend.as_ref(),
        None => &NULL_BACKEND,
    }
}

/// Turns range emission on or off for the whole process.
///
/// Guards acquired while disabled emit nothing. A guard acquired while enabled still emits its
/// end signal after emission is turned off, so start/end pairs are never split.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Returns whether newly acquired ranges are emitted.
#[must_use]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Backend handle that forwards to whatever [`backend`] returns at call time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl RangeBackend for Global {
    #[inline]
    fn range_start(&self, label: &str) {
        backend().range_start(label);
    }

    #[inline]
    fn range_end(&self) {
        backend().range_end();
    }
}
