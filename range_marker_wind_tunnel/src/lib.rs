// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `range_marker`. See `benches/`.
