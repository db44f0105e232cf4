// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events: a trigger paired with an action, trace text, and an identifier.
//!
//! ## Identity and equality
//!
//! Two events are equal when trigger, identifier, trace and action are all
//! equal. Actions compare by identity of the callback allocation: cloning an
//! [`Action`] (or duplicating an [`Event`]) keeps the same allocation, while
//! two closures created separately never compare equal even if they do the
//! same thing.
//!
//! ```
//! use understory_tracking::event::{Action, Event};
//! use understory_tracking::trigger::Trigger;
//!
//! let action = Action::new(|_| {});
//! let event = Event::new(Trigger::DID_APPEAR)
//!     .with_trace("home banner")
//!     .with_action_handle(action.clone());
//!
//! assert_eq!(event.duplicate(), event);
//!
//! let other = Event::from_parts(
//!     Trigger::DID_APPEAR,
//!     Some("home banner".into()),
//!     event.identifier,
//!     Some(Action::new(|_| {})),
//! );
//! assert_ne!(other, event);
//! ```

use std::fmt;
use std::rc::Rc;
use std::time::SystemTime;

use uuid::Uuid;

use crate::trace::TraceSink;
use crate::trigger::Trigger;

/// A shared, identity-compared event callback.
///
/// The callback receives the time at which the event fired.
#[derive(Clone)]
pub struct Action(Rc<dyn Fn(SystemTime)>);

impl Action {
    /// Wrap a closure.
    pub fn new(f: impl Fn(SystemTime) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, timestamp: SystemTime) {
        (self.0)(timestamp);
    }

    /// Returns `true` if both handles share one callback allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Action {}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

/// A trackable event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Condition that fires this event.
    pub trigger: Trigger,
    /// Callback run when the event fires.
    pub action: Option<Action>,
    /// Text written to the trace sink after the action has run.
    pub trace: Option<String>,
    /// Identifier; generated on construction unless explicitly cleared.
    pub identifier: Option<Uuid>,
}

impl Event {
    /// Create an event for `trigger` with a fresh identifier, no trace, and no action.
    pub fn new(trigger: Trigger) -> Self {
        Self {
            trigger,
            action: None,
            trace: None,
            identifier: Some(Uuid::new_v4()),
        }
    }

    /// Create an event from every field. `identifier: None` leaves it without one.
    pub fn from_parts(
        trigger: Trigger,
        trace: Option<String>,
        identifier: Option<Uuid>,
        action: Option<Action>,
    ) -> Self {
        Self {
            trigger,
            action,
            trace,
            identifier,
        }
    }

    /// Set the trace text.
    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Set the action from a closure.
    #[must_use]
    pub fn with_action(self, f: impl Fn(SystemTime) + 'static) -> Self {
        self.with_action_handle(Action::new(f))
    }

    /// Set the action from an existing handle, sharing its identity.
    #[must_use]
    pub fn with_action_handle(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Replace the identifier; `None` clears it.
    #[must_use]
    pub fn with_identifier(mut self, identifier: Option<Uuid>) -> Self {
        self.identifier = identifier;
        self
    }

    /// An equal, independent copy sharing the same action allocation.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Multi-line diagnostic text naming trigger, trace, identifier, and action.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Run the action with the current time, then emit the trace (if any) to `sink`.
    ///
    /// Always returns `true`: reaching the event is what counts as firing.
    pub fn fire(&self, sink: &TraceSink) -> bool {
        if let Some(action) = &self.action {
            action.call(SystemTime::now());
        }
        if self.trace.is_some() {
            let description = self.describe();
            sink.print(["Traced event:", description.as_str()]);
        }
        true
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Event")?;
        writeln!(f, "   trigger = {}", self.trigger)?;
        writeln!(f, "   trace = {}", self.trace.as_deref().unwrap_or("nil"))?;
        match &self.identifier {
            Some(id) => writeln!(f, "   identifier = {id}")?,
            None => writeln!(f, "   identifier = nil")?,
        }
        match &self.action {
            Some(action) => write!(f, "   action = {action:?}"),
            None => write!(f, "   action = nil"),
        }
    }
}
