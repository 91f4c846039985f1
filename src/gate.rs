//! Per-view reentrancy gate.
//!
//! Every mutating action for a view scope runs as: check the gate, call the
//! remote service, apply the confirmed result, release. All scope access
//! happens on a single cooperative UI thread, so a plain check-then-set is
//! race-free as long as no await sits between the check and the set. The
//! release is the part that must never be skipped (a leaked busy flag
//! permanently disables the view's affordances), so it lives in a guard's
//! `Drop` rather than in every exit path by hand.

use std::cell::Cell;

/// Busy flag for one view scope.
///
/// At most one logical mutating operation may hold the gate at a time.
/// A second gesture arriving while the gate is held is debounced by the
/// caller (it simply never starts), not reported as an error.
#[derive(Debug, Default)]
pub struct ActionGate {
    busy: Cell<bool>,
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to enter the gate.
    ///
    /// Returns `None` without side effect if an operation is already in
    /// flight for this scope. Otherwise marks the scope busy and returns a
    /// guard; dropping the guard releases the gate on every path, including
    /// early returns and unwinds.
    pub fn try_enter(&self) -> Option<GateGuard<'_>> {
        if self.busy.get() {
            tracing::debug!("action gate busy, dropping gesture");
            return None;
        }
        self.busy.set(true);
        Some(GateGuard { gate: self })
    }

    /// Whether an operation currently holds the gate.
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Scoped hold on an [`ActionGate`]; releases on drop.
#[derive(Debug)]
pub struct GateGuard<'a> {
    gate: &'a ActionGate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.set(false);
    }
}
