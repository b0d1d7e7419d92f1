// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! NVTX ranges for Nsight Systems and Nsight Compute.

use core::ffi::{c_char, c_int};
use std::ffi::CString;

use crate::backend::RangeBackend;

#[link(name = "nvToolsExt")]
unsafe extern "C" {
    fn nvtxRangePushA(message: *const c_char) -> c_int;
    fn nvtxRangePop() -> c_int;
}

/// Backend that pushes and pops NVTX ranges.
///
/// NVTX keeps its own per-thread range stack, so this backend holds no state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NvtxBackend;

impl NvtxBackend {
    /// Creates the backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Converts `label` to a C string, truncating at the first interior NUL.
fn c_label(label: &str) -> CString {
    let (text, truncated) = match label.find('\0') {
        Some(nul) => (&label[..nul], true),
        None => (label, false),
    };
    if truncated {
        tracing::warn!(label = text, "NVTX range label truncated at interior NUL");
    }
    // `text` has no NUL left, so this cannot fail.
    CString::new(text).unwrap_or_default()
}

impl RangeBackend for NvtxBackend {
    fn range_start(&self, label: &str) {
        let message = c_label(label);
        // SAFETY: `message` is a valid NUL-terminated string that outlives the call; NVTX copies
        // the text before returning.
        unsafe {
            nvtxRangePushA(message.as_ptr());
        }
    }

    fn range_end(&self) {
        // SAFETY: `nvtxRangePop` takes no arguments; popping an empty stack returns a negative
        // depth instead of failing.
        let depth = unsafe { nvtxRangePop() };
        if depth < 0 {
            tracing::warn!("range_end without an open NVTX range on this thread");
        }
    }
}
