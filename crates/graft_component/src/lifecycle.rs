//! The init gate.
//!
//! Every standard callback, and `render()` when an `oninit` hook exists, runs
//! the gate before anything else. The first call on an instance marks it as
//! initializing, registers the instance as the listener for every hook type of
//! its class and dispatches one `init` event. Every later call, including one
//! made from inside an `init` hook, returns immediately.
//!
//! A call from another thread while the transition is in progress blocks until
//! it finishes, so no dispatch layer runs before the listeners exist. An `init`
//! hook must therefore not wait on another thread that calls back into the
//! same instance.

use core::fmt;
use std::thread::{self, ThreadId};

use graft_element::Event;
use parking_lot::{Condvar, Mutex};

use crate::error::ComponentError;
use crate::instance::Instance;

// ─────────────────────────────────────────────────────────────────────────────
// InitState
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Closed,
    Opening(ThreadId),
    Open,
}

/// Per-instance init transition.
pub(crate) struct InitState {
    phase: Mutex<Phase>,
    opened: Condvar,
}

impl InitState {
    pub(crate) fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::Closed),
            opened: Condvar::new(),
        }
    }

    /// Claims the transition. Returns `false` if it is done or already
    /// running on this thread; waits while another thread runs it.
    fn claim(&self) -> bool {
        let current = thread::current().id();
        let mut phase = self.phase.lock();
        loop {
            match *phase {
                Phase::Open => return false,
                Phase::Opening(owner) if owner == current => return false,
                Phase::Opening(_) => self.opened.wait(&mut phase),
                Phase::Closed => {
                    *phase = Phase::Opening(current);
                    return true;
                }
            }
        }
    }

    pub(crate) fn is_claimed(&self) -> bool {
        *self.phase.lock() != Phase::Closed
    }
}

impl fmt::Debug for InitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InitState").field(&*self.phase.lock()).finish()
    }
}

/// Opens the gate when dropped, even if the init hook unwinds.
struct Opening<'a>(&'a InitState);

impl Drop for Opening<'_> {
    fn drop(&mut self) {
        *self.0.phase.lock() = Phase::Open;
        self.0.opened.notify_all();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gate
// ─────────────────────────────────────────────────────────────────────────────

impl<T: Send + Sync + 'static> Instance<T> {
    /// Runs the init gate.
    ///
    /// The instance counts as initialized once the transition is claimed, so
    /// it happens once even if registration or the `init` hook fails.
    pub(crate) fn run_init_gate(&self) -> Result<(), ComponentError> {
        if !self.init_state.claim() {
            return Ok(());
        }
        let _opening = Opening(&self.init_state);

        let mut registered = 0;
        for event_type in self.hook_types() {
            if self.add_event_listener(event_type.as_str()) {
                registered += 1;
            }
        }
        tracing::debug!(
            component = self.class().name(),
            registered,
            "initializing component"
        );

        self.dispatch_event(&Event::init())
    }

    /// Whether the init gate has run, or is running.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.init_state.is_claimed()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::Descriptor;

    #[derive(Default)]
    struct Inits {
        count: AtomicUsize,
    }

    #[test]
    fn gate_runs_once() {
        let class = Descriptor::<Inits>::new()
            .oninit(|this, _| {
                this.count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .augment();
        let instance = Instance::new(&class, Inits::default());

        assert!(!instance.is_initialized());
        instance.run_init_gate().unwrap();
        instance.run_init_gate().unwrap();

        assert!(instance.is_initialized());
        assert_eq!(instance.count.load(Ordering::SeqCst), 1);
        assert_eq!(instance.element().listeners().count("init"), 1);
    }

    #[test]
    fn reentrant_gate_short_circuits() {
        let class = Descriptor::<Inits>::new()
            .oninit(|this, _| {
                this.count.fetch_add(1, Ordering::SeqCst);
                this.connected_callback()
            })
            .augment();
        let instance = Instance::new(&class, Inits::default());

        instance.connected_callback().unwrap();

        assert_eq!(instance.count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn initialized_while_init_hook_runs() {
        let class = Descriptor::<Inits>::new()
            .oninit(|this, _| {
                assert!(this.is_initialized());
                this.count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .augment();
        let instance = Instance::new(&class, Inits::default());

        instance.connected_callback().unwrap();

        assert_eq!(instance.count.load(Ordering::SeqCst), 1);
        assert!(format!("{instance:?}").contains("initialized: true"));
    }

    #[test]
    fn gate_without_hooks_registers_nothing() {
        let class = Descriptor::<Inits>::new().augment();
        let instance = Instance::new(&class, Inits::default());

        instance.disconnected_callback().unwrap();

        assert!(instance.is_initialized());
        assert_eq!(instance.element().listeners().total(), 0);
    }
}
