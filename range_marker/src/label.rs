// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range labels derived from Rust paths.
//!
//! Function items have a type whose name is the function's path, so the label of an instrumented
//! function is `crate::module::function`. Closures report the path of the function they were
//! written in followed by one `{{closure}}` segment per level of nesting.

const CLOSURE_SEGMENT: &str = "::{{closure}}";

/// Returns the type path of `val`.
///
/// For a function item this is the function's fully-qualified path. The exact text comes from
/// [`core::any::type_name`] and is meant for humans, not for parsing.
#[must_use]
pub fn qualified_name_of_val<T: ?Sized>(_val: &T) -> &'static str {
    core::any::type_name::<T>()
}

/// Returns the type path of `T`.
#[must_use]
pub fn qualified_name_of<T: ?Sized>() -> &'static str {
    core::any::type_name::<T>()
}

/// Removes trailing `{{closure}}` segments from `path`.
#[must_use]
pub fn trim_closures(mut path: &str) -> &str {
    while let Some(rest) = path.strip_suffix(CLOSURE_SEGMENT) {
        path = rest;
    }
    path
}

/// Returns the last segment of `path`, skipping trailing closure markers.
///
/// Only separators outside generic arguments and qualified-path brackets count, so
/// `a::Wrapper<c::D>` gives `Wrapper<c::D>` and `<a::X as a::T>::run` gives `run`.
#[must_use]
pub fn short_name(path: &str) -> &str {
    let path = trim_closures(path);
    let bytes = path.as_bytes();
    let mut depth = 0_usize;
    let mut last_sep = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` in a fn pointer type is not a closing bracket.
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                last_sep = Some(i);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    last_sep.map_or(path, |sep| &path[sep + 2..])
}
