// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace sink: the diagnostic channel fired events write their trace text to.
//!
//! ## Overview
//!
//! A [`TraceSink`] joins the textual representation of a list of items and
//! forwards the result to a [`TraceDelegate`] when one is installed, or to
//! standard output in debug builds otherwise. The last joined string is kept
//! for inspection.
//!
//! [`TraceSink::shared`] returns the sink for the current thread, created on
//! first use. UI work is confined to one thread, so the shared sink is
//! thread-local state rather than a lock. Tests and embedders that need
//! isolation build their own sink with [`TraceSink::new`] and hand it to
//! [`Detector::with_sink`](crate::detector::Detector::with_sink).
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_tracking::trace::{TraceDelegate, TraceSink};
//!
//! #[derive(Default)]
//! struct Collect(RefCell<Vec<String>>);
//!
//! impl TraceDelegate for Collect {
//!     fn print(&self, trace: &str) {
//!         self.0.borrow_mut().push(trace.to_owned());
//!     }
//! }
//!
//! let sink = TraceSink::new();
//! let collect = Rc::new(Collect::default());
//! sink.set_delegate(Some(collect.clone()));
//! sink.print(["checkout", "tapped"]);
//! assert_eq!(collect.0.borrow().as_slice(), ["checkout tapped"]);
//! assert_eq!(sink.last_output().as_deref(), Some("checkout tapped"));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Receives joined trace output instead of standard output.
pub trait TraceDelegate {
    /// Handle one joined trace line (without terminator).
    fn print(&self, trace: &str);
}

thread_local! {
    static SHARED: Rc<TraceSink> = Rc::new(TraceSink::new());
}

/// Joins and forwards trace output.
#[derive(Default)]
pub struct TraceSink {
    delegate: RefCell<Option<Rc<dyn TraceDelegate>>>,
    last_output: RefCell<Option<String>>,
}

impl fmt::Debug for TraceSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceSink")
            .field("has_delegate", &self.has_delegate())
            .field("last_output", &self.last_output.borrow())
            .finish()
    }
}

impl TraceSink {
    /// Create an isolated sink with no delegate.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sink shared by everything on the current thread.
    pub fn shared() -> Rc<Self> {
        SHARED.with(Rc::clone)
    }

    /// Install (or remove, with `None`) the delegate, returning the previous one.
    pub fn set_delegate(
        &self,
        delegate: Option<Rc<dyn TraceDelegate>>,
    ) -> Option<Rc<dyn TraceDelegate>> {
        self.delegate.replace(delegate)
    }

    /// Returns `true` if a delegate is installed.
    pub fn has_delegate(&self) -> bool {
        self.delegate.borrow().is_some()
    }

    /// The most recent joined output, if anything was emitted.
    pub fn last_output(&self) -> Option<String> {
        self.last_output.borrow().clone()
    }

    /// Drop the delegate and forget the last output.
    pub fn reset(&self) {
        self.delegate.replace(None);
        self.last_output.replace(None);
    }

    /// Join `items` with a single space and emit them, newline-terminated.
    pub fn print<I>(&self, items: I)
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.emit(items, " ", "\n");
    }

    /// Join `items` with `separator` and emit the result.
    ///
    /// The delegate receives the joined text; the default output appends
    /// `terminator`. The joined text is recorded either way.
    pub fn emit<I>(&self, items: I, separator: &str, terminator: &str)
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let mut output = String::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                output.push_str(separator);
            }
            output.push_str(&item.to_string());
        }

        // Clone out of the slot so the delegate may call back into the sink.
        let delegate = self.delegate.borrow().clone();
        match delegate {
            Some(delegate) => delegate.print(&output),
            None => default_output(&output, terminator),
        }

        self.last_output.replace(Some(output));
    }
}

/// Print `items` through the current thread's shared sink.
pub fn print<I>(items: I)
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    TraceSink::shared().print(items);
}

#[cfg(debug_assertions)]
fn default_output(output: &str, terminator: &str) {
    print!("{output}{terminator}");
}

#[cfg(not(debug_assertions))]
fn default_output(_output: &str, _terminator: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl TraceDelegate for Recorder {
        fn print(&self, trace: &str) {
            self.0.borrow_mut().push(trace.to_owned());
        }
    }

    #[test]
    fn single_item_without_delegate() {
        let sink = TraceSink::new();
        sink.print(["foo"]);
        assert_eq!(sink.last_output().as_deref(), Some("foo"));
    }

    #[test]
    fn multiple_items_are_space_joined() {
        let sink = TraceSink::new();
        sink.print(["foo", "bar"]);
        assert_eq!(sink.last_output().as_deref(), Some("foo bar"));
    }

    #[test]
    fn custom_separator_and_mixed_items() {
        let sink = TraceSink::new();
        let items: [&dyn fmt::Display; 3] = [&"count", &3, &'!'];
        sink.emit(items, ", ", "");
        assert_eq!(sink.last_output().as_deref(), Some("count, 3, !"));
    }

    #[test]
    fn empty_items_emit_empty_string() {
        let sink = TraceSink::new();
        sink.print(core::iter::empty::<&str>());
        assert_eq!(sink.last_output().as_deref(), Some(""));
    }

    #[test]
    fn delegate_receives_joined_text_without_terminator() {
        let sink = TraceSink::new();
        let recorder = Rc::new(Recorder::default());
        assert!(sink.set_delegate(Some(recorder.clone())).is_none());
        assert!(sink.has_delegate());

        sink.print(["foo"]);
        sink.print(["foo", "bar"]);
        assert_eq!(recorder.0.borrow().as_slice(), ["foo", "foo bar"]);
        assert_eq!(sink.last_output().as_deref(), Some("foo bar"));
    }

    #[test]
    fn set_delegate_is_last_write_wins() {
        let sink = TraceSink::new();
        let first = Rc::new(Recorder::default());
        let second = Rc::new(Recorder::default());
        sink.set_delegate(Some(first.clone()));
        let previous = sink.set_delegate(Some(second.clone()));
        assert!(previous.is_some());

        sink.print(["x"]);
        assert!(first.0.borrow().is_empty());
        assert_eq!(second.0.borrow().as_slice(), ["x"]);
    }

    #[test]
    fn delegate_may_reenter_the_sink() {
        struct Echo(Rc<TraceSink>);
        impl TraceDelegate for Echo {
            fn print(&self, trace: &str) {
                let _ = self.0.last_output();
                assert!(self.0.has_delegate(), "delegate slot must not be borrowed");
                let _ = trace;
            }
        }
        let sink = Rc::new(TraceSink::new());
        sink.set_delegate(Some(Rc::new(Echo(sink.clone()))));
        sink.print(["ping"]);
        assert_eq!(sink.last_output().as_deref(), Some("ping"));
        // Break the Rc cycle.
        sink.reset();
    }

    #[test]
    fn reset_clears_delegate_and_output() {
        let sink = TraceSink::new();
        sink.set_delegate(Some(Rc::new(Recorder::default())));
        sink.print(["foo"]);
        sink.reset();
        assert!(!sink.has_delegate());
        assert!(sink.last_output().is_none());
    }

    #[test]
    fn shared_sink_is_one_instance_per_thread() {
        let a = TraceSink::shared();
        let b = TraceSink::shared();
        assert!(Rc::ptr_eq(&a, &b));

        a.reset();
        print(["shared", "sink"]);
        assert_eq!(b.last_output().as_deref(), Some("shared sink"));
        a.reset();
    }
}
