// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Latency simulation for filesystem operations.

use crate::op::Op;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
enum Durations {
    None,
    Uniform(Duration),
    PerOp(HashMap<Op, Duration>),
}

/// Modifiers for a single [`LatencySimulator::simulate`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatencyOptions {
    /// Sleep only on the first call per operation, until [`LatencySimulator::reset`].
    pub once: bool,
    /// Release the gate before sleeping so concurrent calls overlap.
    pub concurrent: bool,
}

/// Sleeps according to per-operation durations.
///
/// The duration table is shared between clones; the once-fired set and
/// the gate serializing synchronous sleeps are per-instance, so a handle
/// cloned off a filesystem accounts its own once-mode firing.
#[derive(Debug)]
pub struct LatencySimulator {
    durations: Arc<Durations>,
    fired: Mutex<HashSet<Op>>,
    gate: Mutex<()>,
}

impl LatencySimulator {
    /// A simulator that never sleeps.
    pub fn none() -> Self {
        Self::with_durations(Durations::None)
    }

    /// The same delay for every operation.
    pub fn uniform(duration: Duration) -> Self {
        Self::with_durations(Durations::Uniform(duration))
    }

    /// Per-operation delays; operations absent from the map incur none.
    pub fn per_op(durations: HashMap<Op, Duration>) -> Self {
        Self::with_durations(Durations::PerOp(durations))
    }

    fn with_durations(durations: Durations) -> Self {
        LatencySimulator {
            durations: Arc::new(durations),
            fired: Mutex::new(HashSet::new()),
            gate: Mutex::new(()),
        }
    }

    /// The delay configured for `op`, if any.
    pub fn duration(&self, op: Op) -> Option<Duration> {
        match &*self.durations {
            Durations::None => None,
            Durations::Uniform(d) => Some(*d),
            Durations::PerOp(map) => map.get(&op).copied(),
        }
    }

    /// Sleep for the delay configured for `op`, honoring `opts`.
    ///
    /// Without the `concurrent` option the gate is held across the sleep,
    /// serializing every simulated operation on this instance.
    pub fn simulate(&self, op: Op, opts: LatencyOptions) {
        let Some(duration) = self.duration(op) else {
            return;
        };
        if duration.is_zero() {
            return;
        }
        if opts.once && !self.fired.lock().insert(op) {
            return;
        }
        let gate = self.gate.lock();
        if opts.concurrent {
            drop(gate);
            std::thread::sleep(duration);
        } else {
            std::thread::sleep(duration);
            drop(gate);
        }
    }

    /// Forget which operations already slept in once mode. Handles call
    /// this on close.
    pub fn reset(&self) {
        self.fired.lock().clear();
    }
}

impl Clone for LatencySimulator {
    /// Shares the duration table; once-state and the gate start fresh.
    fn clone(&self) -> Self {
        LatencySimulator {
            durations: Arc::clone(&self.durations),
            fired: Mutex::new(HashSet::new()),
            gate: Mutex::new(()),
        }
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
#[path = "latency_tests.rs"]
mod tests;
