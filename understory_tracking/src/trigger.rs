// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triggers: named conditions an [`Event`](crate::event::Event) waits for.
//!
//! ## Custom triggers
//!
//! Matching is plain value equality on the name, so applications can add
//! their own triggers without touching the [`Detector`](crate::detector::Detector):
//!
//! ```
//! use understory_tracking::trigger::Trigger;
//!
//! const DID_LONG_PRESS: Trigger = Trigger::new("didLongPress");
//!
//! assert_eq!(DID_LONG_PRESS, Trigger::custom(String::from("didLongPress")));
//! assert_ne!(DID_LONG_PRESS, Trigger::DID_END_TOUCH);
//! ```

use std::borrow::Cow;
use std::fmt;

/// A named trigger condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Trigger(Cow<'static, str>);

impl Trigger {
    /// No trigger. None of the category entry points use it; only
    /// [`Detector::fire`](crate::detector::Detector::fire) can dispatch it.
    pub const NONE: Self = Self::new("none");
    /// A view has appeared on screen.
    pub const DID_APPEAR: Self = Self::new("didAppear");
    /// A view has disappeared from screen.
    pub const DID_DISAPPEAR: Self = Self::new("didDisappear");
    /// A touch ended inside a view or control.
    pub const DID_END_TOUCH: Self = Self::new("didEndTouch");
    /// A scroll container began scrolling.
    pub const DID_BEGIN_SCROLL: Self = Self::new("didBeginScroll");
    /// A view became first responder.
    pub const DID_BECOME_FIRST_RESPONDER: Self = Self::new("didBecomeFirstResponder");
    /// A view resigned first responder.
    pub const DID_RESIGN_FIRST_RESPONDER: Self = Self::new("didResignFirstResponder");
    /// A control's target-action fired.
    pub const TARGET_ACTION: Self = Self::new("targetAction");
    /// A control was selected.
    pub const DID_SELECT: Self = Self::new("didSelect");
    /// A control was deselected.
    pub const DID_DESELECT: Self = Self::new("didDeselect");

    /// Create a trigger from a static name. Usable in `const` items.
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a trigger from a name only known at runtime.
    pub fn custom(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The trigger's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
