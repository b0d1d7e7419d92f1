// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;
use std::string::String;
use std::thread::{self, ThreadId};
use std::vec::Vec;

use parking_lot::Mutex;

use crate::backend::RangeBackend;

/// One signal received by a [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RangeEvent {
    /// `range_start(label)`.
    Start(String),
    /// `range_end()`.
    End,
}

/// A [`RangeEvent`] together with the thread that emitted it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Emitting thread.
    pub thread: ThreadId,
    /// The signal.
    pub event: RangeEvent,
}

/// Backend that keeps every signal in memory, in arrival order.
///
/// Useful in tests and for checking that instrumented code pairs its ranges.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingBackend {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded signal.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    /// Returns the signals emitted by the calling thread.
    #[must_use]
    pub fn events_for_current_thread(&self) -> Vec<RangeEvent> {
        let current = thread::current().id();
        self.events
            .lock()
            .iter()
            .filter(|recorded| recorded.thread == current)
            .map(|recorded| recorded.event.clone())
            .collect()
    }

    /// Replays the calling thread's signals against a stack and returns the labels of the ranges
    /// each end signal closed, in closing order.
    ///
    /// End signals with nothing open are skipped.
    #[must_use]
    pub fn closed_labels_for_current_thread(&self) -> Vec<String> {
        let mut open = Vec::new();
        let mut closed = Vec::new();
        for event in self.events_for_current_thread() {
            match event {
                RangeEvent::Start(label) => open.push(label),
                RangeEvent::End => closed.extend(open.pop()),
            }
        }
        closed
    }

    /// Returns `true` if, on every thread, each end closes an open range and no range is left
    /// open.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let events = self.events.lock();
        let mut depths: HashMap<ThreadId, usize> = HashMap::new();
        for recorded in events.iter() {
            let depth = depths.entry(recorded.thread).or_default();
            match recorded.event {
                RangeEvent::Start(_) => *depth += 1,
                RangeEvent::End => match depth.checked_sub(1) {
                    Some(next) => *depth = next,
                    None => return false,
                },
            }
        }
        depths.values().all(|depth| *depth == 0)
    }

    /// Removes and returns every recorded signal.
    pub fn take(&self) -> Vec<RecordedEvent> {
        core::mem::take(&mut *self.events.lock())
    }

    fn record(&self, event: RangeEvent) {
        let thread = thread::current().id();
        self.events.lock().push(RecordedEvent { thread, event });
    }
}

impl RangeBackend for RecordingBackend {
    fn range_start(&self, label: &str) {
        self.record(RangeEvent::Start(label.into()));
    }

    fn range_end(&self) {
        self.record(RangeEvent::End);
    }
}
