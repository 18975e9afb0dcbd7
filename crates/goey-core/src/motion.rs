#![forbid(unsafe_code)]

//! The reduced-motion preference.
//!
//! Hosts query the platform preference and push it in with
//! [`ReducedMotion::set`]. Every toast holds a clone of the same signal and
//! compares [`revision`](ReducedMotion::revision) against the last value it
//! saw to notice a live change.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MotionCell {
    reduced: Cell<bool>,
    revision: Cell<u64>,
}

/// Shared, observable reduced-motion flag. Clones observe the same value.
#[derive(Debug, Clone, Default)]
pub struct ReducedMotion {
    inner: Rc<MotionCell>,
}

impl ReducedMotion {
    pub fn new(reduced: bool) -> Self {
        let signal = Self::default();
        signal.inner.reduced.set(reduced);
        signal
    }

    pub fn get(&self) -> bool {
        self.inner.reduced.get()
    }

    /// Update the preference. The revision advances only on an actual change.
    pub fn set(&self, reduced: bool) {
        if self.inner.reduced.replace(reduced) != reduced {
            self.inner.revision.set(self.inner.revision.get() + 1);
            crate::debug!(reduced, "reduced motion preference changed");
        }
    }

    pub fn revision(&self) -> u64 {
        self.inner.revision.get()
    }
}
