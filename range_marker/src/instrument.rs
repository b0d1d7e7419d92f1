// Copyright 2026 the Range Marker Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callables whose every call is bracketed by a profiler range.

use std::borrow::Cow;

use crate::backend::RangeBackend;
use crate::label;
use crate::registry::Global;
use crate::scope::ScopedRange;

/// Calls a callable with its arguments packed in a tuple.
///
/// Implemented for every `FnMut` taking up to eight arguments, so `f(a, b)` is
/// `f.invoke((a, b))` and `f()` is `f.invoke(())`.
pub trait Invoke<Args> {
    /// Return type of the call.
    type Output;

    /// Calls `self` with `args` unpacked.
    fn invoke(&mut self, args: Args) -> Self::Output;
}

macro_rules! impl_invoke {
    ($($arg:ident),*) => {
        impl<Func, Ret, $($arg,)*> Invoke<($($arg,)*)> for Func
        where
            Func: FnMut($($arg),*) -> Ret,
        {
            type Output = Ret;

            #[inline]
            #[allow(non_snake_case, reason = "argument bindings reuse the type parameter names")]
            fn invoke(&mut self, ($($arg,)*): ($($arg,)*)) -> Ret {
                self($($arg),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A);
impl_invoke!(A, B);
impl_invoke!(A, B, C);
impl_invoke!(A, B, C, D);
impl_invoke!(A, B, C, D, E);
impl_invoke!(A, B, C, D, E, F);
impl_invoke!(A, B, C, D, E, F, G);
impl_invoke!(A, B, C, D, E, F, G, H);

/// Wraps `func` so that each call runs inside a range on the global backend.
///
/// The range label is the callable's fully-qualified path, e.g. `my_crate::model::forward` for a
/// function item. Closures are labelled with the path of the function they were written in plus
/// `{{closure}}` markers; use [`Instrumented::with_label`] to name them explicitly.
///
/// ```
/// fn forward(batch: usize, scale: f32) -> f32 {
///     batch as f32 * scale
/// }
///
/// let mut forward = range_marker::instrument(forward);
/// assert_eq!(forward.call((4, 0.5)), 2.0);
/// assert_eq!(forward.short_name(), "forward");
/// ```
pub fn instrument<F>(func: F) -> Instrumented<F> {
    Instrumented {
        label: Cow::Borrowed(label::qualified_name_of::<F>()),
        func,
        backend: Global,
    }
}

/// A callable whose calls are each bracketed by one range. See [`instrument`].
///
/// The wrapper forwards the callable's identity: [`label`](Self::label) is its qualified path,
/// [`short_name`](Self::short_name) its unqualified name, and `Debug` prints both.
#[derive(Clone)]
pub struct Instrumented<F, B = Global> {
    func: F,
    label: Cow<'static, str>,
    backend: B,
}

impl<F, B> Instrumented<F, B> {
    /// Sends this callable's ranges to `backend` instead of the current one.
    #[must_use]
    pub fn with_backend<B2: RangeBackend>(self, backend: B2) -> Instrumented<F, B2> {
        Instrumented {
            func: self.func,
            label: self.label,
            backend,
        }
    }

    /// Replaces the range label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// The range label, by default the wrapped callable's qualified path.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The last segment of [`label`](Self::label).
    #[must_use]
    pub fn short_name(&self) -> &str {
        label::short_name(&self.label)
    }

    /// The wrapped callable.
    #[must_use]
    pub fn inner(&self) -> &F {
        &self.func
    }

    /// Unwraps the callable.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F, B: RangeBackend> Instrumented<F, B> {
    /// Calls the wrapped callable inside a range and returns its result unchanged.
    ///
    /// Arguments are passed as a tuple: `()` for none, `(x,)` for one.
    pub fn call<Args>(&mut self, args: Args) -> <F as Invoke<Args>>::Output
    where
        F: Invoke<Args>,
    {
        let _range = ScopedRange::enter(&self.backend, &self.label);
        self.func.invoke(args)
    }
}

impl<F, B> core::fmt::Debug for Instrumented<F, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Instrumented")
            .field("label", &self.label())
            .field("name", &self.short_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::instrument;
    use crate::recording::{RangeEvent, RecordingBackend};
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn compute(x: i64) -> i64 {
        x * 2
    }

    fn checked_div(a: u32, b: u32) -> Result<u32, &'static str> {
        a.checked_div(b).ok_or("division by zero")
    }

    fn two_words() -> (&'static str, &'static str) {
        ("gpu", "range")
    }

    struct Wrapper<T>(T);

    impl<T: Copy> Wrapper<T> {
        fn forward(&self) -> T {
            self.0
        }
    }

    trait Stage {
        fn run(&self) -> u8;
    }

    struct Unit;

    impl Stage for Unit {
        fn run(&self) -> u8 {
            7
        }
    }

    #[test]
    fn compute_scenario() {
        let recorder = RecordingBackend::new();
        let mut wrapped = instrument(compute).with_backend(&recorder);
        assert_eq!(wrapped.call((21,)), 42);
        assert_eq!(
            recorder.events_for_current_thread(),
            vec![
                RangeEvent::Start(concat!(module_path!(), "::compute").into()),
                RangeEvent::End
            ]
        );
    }

    #[test]
    fn label_is_qualified_path_of_the_callable() {
        let wrapped = instrument(compute);
        assert_eq!(wrapped.label(), concat!(module_path!(), "::compute"));
        assert_eq!(wrapped.short_name(), "compute");
        assert!(
            !wrapped.label().contains("Instrumented"),
            "label should name the callable, not the wrapper"
        );
    }

    #[test]
    fn results_and_errors_pass_through() {
        let recorder = RecordingBackend::new();
        let mut wrapped = instrument(checked_div).with_backend(&recorder);
        assert_eq!(wrapped.call((9, 3)), checked_div(9, 3));
        assert_eq!(wrapped.call((1, 0)), Err("division by zero"));
        assert_eq!(recorder.events().len(), 4);
        assert!(recorder.is_balanced(), "each call should close its range");
    }

    #[test]
    fn zero_argument_calls() {
        let recorder = RecordingBackend::new();
        let mut wrapped = instrument(two_words).with_backend(&recorder);
        assert_eq!(wrapped.call(()), ("gpu", "range"));
    }

    #[test]
    fn one_range_per_call() {
        let recorder = RecordingBackend::new();
        let mut wrapped = instrument(compute).with_backend(&recorder);
        for x in 0..3 {
            assert_eq!(wrapped.call((x,)), x * 2);
        }
        let events = recorder.events_for_current_thread();
        assert_eq!(events.len(), 6);
        assert!(
            events
                .chunks(2)
                .all(|pair| matches!(pair, [RangeEvent::Start(_), RangeEvent::End])),
            "calls should not interleave: {events:?}"
        );
    }

    #[test]
    fn stateful_closures_with_custom_label() {
        let recorder = RecordingBackend::new();
        let mut total = 0;
        {
            let mut accumulate = instrument(|x: i32, y: i32| {
                total += x * y;
                total
            })
            .with_label("accumulate")
            .with_backend(&recorder);
            assert_eq!(accumulate.call((2, 3)), 6);
            assert_eq!(accumulate.call((1, 4)), 10);
            assert_eq!(accumulate.short_name(), "accumulate");
        }
        assert_eq!(total, 10);
        assert_eq!(
            recorder.closed_labels_for_current_thread(),
            vec!["accumulate".to_owned(), "accumulate".to_owned()]
        );
    }

    #[test]
    fn closure_label_names_enclosing_function() {
        let wrapped = instrument(|| ());
        assert!(
            wrapped
                .label()
                .starts_with(concat!(module_path!(), "::closure_label_names_enclosing_function")),
            "unexpected label {}",
            wrapped.label()
        );
        assert_eq!(wrapped.short_name(), "closure_label_names_enclosing_function");
    }

    #[test]
    fn panics_propagate_and_close_the_range() {
        let recorder = RecordingBackend::new();
        let mut wrapped = instrument(|divisor: u32| 10 / divisor).with_backend(&recorder);
        let outcome = catch_unwind(AssertUnwindSafe(|| wrapped.call((0,))));
        assert!(outcome.is_err(), "division by zero should panic");
        assert!(recorder.is_balanced(), "range should close during unwinding");
    }

    #[test]
    fn debug_names_the_callable() {
        let wrapped = instrument(compute);
        let debug = format!("{wrapped:?}");
        assert!(debug.contains("name: \"compute\""), "unexpected Debug output {debug}");
    }

    #[test]
    fn methods_report_their_own_name() {
        let recorder = RecordingBackend::new();
        let mut forward = instrument(Wrapper::<u8>::forward).with_backend(&recorder);
        assert_eq!(forward.short_name(), "forward");
        assert_eq!(forward.call((&Wrapper(3_u8),)), 3);

        let mut run = instrument(<Unit as Stage>::run).with_backend(&recorder);
        assert_eq!(run.short_name(), "run");
        assert_eq!(run.call((&Unit,)), 7);
        assert!(
            run.label().ends_with("::run"),
            "unexpected label {}",
            run.label()
        );
        assert!(recorder.is_balanced(), "each method call should close its range");
    }

    #[test]
    fn into_inner_returns_the_callable() {
        let wrapped = instrument(compute);
        assert_eq!((wrapped.inner())(5), 10);
        assert_eq!((wrapped.into_inner())(4), 8);
    }
}
