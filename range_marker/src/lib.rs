// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped profiler range markers and instrumented calls.
//!
//! This crate brackets units of work with named ranges on a GPU profiling backend. A range is
//! opened with `range_start(label)` and closed with `range_end()`, and backends treat ranges as a
//! per-thread stack.
//!
//! There are two ways to open a range:
//! - [`scoped_range`] (or the [`scoped_range!`] macro) returns a [`ScopedRange`] guard that closes
//!   the range when dropped.
//! - [`instrument`] wraps a callable in an [`Instrumented`] adapter that brackets every call with a
//!   range labelled with the callable's fully-qualified path.
//!
//! The guard closes its range on every exit path, including unwinding from a panic.
//!
//! ## Backends
//! Ranges go to the process-wide backend installed with [`set_backend`], or nowhere if none is
//! installed. Provided backends:
//! - [`TracyBackend`] (feature `tracy`, on by default)
//! - [`NvtxBackend`] (feature `nvtx`, links `libnvToolsExt`)
//! - [`TracingBackend`], which opens `tracing` spans
//! - [`RecordingBackend`], which keeps every signal in memory
//! - [`NullBackend`]
//!
//! ## Example
//! ```
//! use range_marker::{RecordingBackend, ScopedRange, instrument};
//!
//! fn compute(x: i64) -> i64 {
//!     x * 2
//! }
//!
//! let recorder = RecordingBackend::new();
//! {
//!     let _outer = ScopedRange::enter(&recorder, "outer");
//!     let mut compute = instrument(compute).with_backend(&recorder);
//!     assert_eq!(compute.call((21,)), 42);
//! }
//! assert!(recorder.is_balanced());
//! ```

mod backend;
mod instrument;
pub mod label;
#[cfg(feature = "nvtx")]
#[allow(unsafe_code, reason = "NVTX is only reachable through its C API")]
mod nvtx;
mod recording;
mod registry;
mod scope;
mod tracing_spans;
#[cfg(feature = "tracy")]
mod tracy;

pub use backend::{NullBackend, RangeBackend};
pub use instrument::{Instrumented, Invoke, instrument};
#[cfg(feature = "nvtx")]
pub use nvtx::NvtxBackend;
pub use recording::{RangeEvent, RecordedEvent, RecordingBackend};
pub use registry::{Global, SetBackendError, backend, is_enabled, set_backend, set_enabled};
pub use scope::{ScopedRange, in_range, in_range_on, scoped_range};
pub use tracing_spans::TracingBackend;
#[cfg(feature = "tracy")]
pub use tracy::TracyBackend;

/// Opens a range on the global backend that lasts until the end of the enclosing block.
///
/// With no argument the range is labelled with the enclosing function's path, see
/// [`function_name!`].
///
/// ```
/// fn upload() {
///     range_marker::scoped_range!();
///     range_marker::scoped_range!("copy");
///     // ...
/// }
/// # upload();
/// ```
#[macro_export]
macro_rules! scoped_range {
    () => {
        let _range_marker_guard = $crate::scoped_range($crate::function_name!());
    };
    ($name:expr) => {
        let _range_marker_guard = $crate::scoped_range($name);
    };
}

/// Expands to the fully-qualified path of the enclosing function as a `&'static str`.
///
/// Closure markers are stripped, so the macro names the function a closure was written in.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        let name = $crate::label::qualified_name_of_val(&f);
        $crate::label::trim_closures(name.strip_suffix("::f").unwrap_or(name))
    }};
}
