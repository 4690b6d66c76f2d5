// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation statistics: lock-free counters, snapshots, and assertions.

use crate::error::FsError;
use crate::op::Op;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Rejected counter assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failure count {failures} exceeds total {total} for {op}")]
pub struct InvalidCounts {
    pub op: Op,
    pub total: u64,
    pub failures: u64,
}

/// Per-operation attempt and failure counters, plus byte totals.
///
/// Every counter is atomic; recording never takes a lock. One recorder
/// belongs to one filesystem or one handle, never shared between them.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    totals: [AtomicU64; Op::COUNT],
    failures: [AtomicU64; Op::COUNT],
    bytes_read: AtomicU64,
    bytes_written: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attempt of `op` and its outcome.
    ///
    /// Failed attempts count toward the total and the failure counter.
    /// Bytes are tallied only for successful reads and writes; other
    /// operations ignore the byte count.
    pub fn record(&self, op: Op, bytes: usize, err: Option<&FsError>) {
        self.totals[op.as_index()].fetch_add(1, Ordering::Relaxed);
        if err.is_some() {
            self.failures[op.as_index()].fetch_add(1, Ordering::Relaxed);
            return;
        }
        if bytes > 0 {
            match op {
                Op::Read => {
                    self.bytes_read.fetch_add(bytes as u64, Ordering::Relaxed);
                }
                Op::Write => {
                    self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
                }
                _ => {}
            }
        }
    }

    /// Overwrite the counters for one operation.
    pub fn set(&self, op: Op, total: u64, failures: u64) -> Result<(), InvalidCounts> {
        if failures > total {
            return Err(InvalidCounts { op, total, failures });
        }
        self.totals[op.as_index()].store(total, Ordering::Relaxed);
        self.failures[op.as_index()].store(failures, Ordering::Relaxed);
        Ok(())
    }

    /// Overwrite the byte totals.
    pub fn set_bytes(&self, read: u64, written: u64) {
        self.bytes_read.store(read, Ordering::Relaxed);
        self.bytes_written.store(written, Ordering::Relaxed);
    }

    /// Zero every counter.
    pub fn reset(&self) {
        for i in 0..Op::COUNT {
            self.totals[i].store(0, Ordering::Relaxed);
            self.failures[i].store(0, Ordering::Relaxed);
        }
        self.bytes_read.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
    }

    /// Immutable copy of the current counters.
    ///
    /// Counters are read one by one; a snapshot taken mid-operation may
    /// lag by a single count on one axis but is never torn.
    pub fn snapshot(&self) -> Snapshot {
        let mut totals = [0i64; Op::COUNT];
        let mut failures = [0i64; Op::COUNT];
        for i in 0..Op::COUNT {
            totals[i] = self.totals[i].load(Ordering::Relaxed) as i64;
            failures[i] = self.failures[i].load(Ordering::Relaxed) as i64;
        }
        Snapshot {
            totals,
            failures,
            bytes_read: self.bytes_read.load(Ordering::Relaxed) as i64,
            bytes_written: self.bytes_written.load(Ordering::Relaxed) as i64,
        }
    }

    /// Current counters minus a snapshot taken earlier.
    pub fn delta(&self, earlier: &Snapshot) -> Snapshot {
        self.snapshot().delta(earlier)
    }

    /// Start a fluent expectation over the current counters.
    pub fn expect(&self) -> Expect<'_> {
        Expect { recorder: self, checks: Vec::new() }
    }
}

/// Immutable, comparable, subtractable view of a recorder.
///
/// Deltas can go negative, so counts are signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    totals: [i64; Op::COUNT],
    failures: [i64; Op::COUNT],
    bytes_read: i64,
    bytes_written: i64,
}

impl Snapshot {
    /// A snapshot with every counter at zero.
    pub fn zero() -> Self {
        Snapshot {
            totals: [0; Op::COUNT],
            failures: [0; Op::COUNT],
            bytes_read: 0,
            bytes_written: 0,
        }
    }

    /// Attempts recorded for `op`, failures included.
    pub fn count(&self, op: Op) -> i64 {
        self.totals[op.as_index()]
    }

    pub fn count_success(&self, op: Op) -> i64 {
        self.totals[op.as_index()] - self.failures[op.as_index()]
    }

    pub fn count_failure(&self, op: Op) -> i64 {
        self.failures[op.as_index()]
    }

    pub fn bytes_read(&self) -> i64 {
        self.bytes_read
    }

    pub fn bytes_written(&self) -> i64 {
        self.bytes_written
    }

    pub fn has_failures(&self) -> bool {
        self.failures.iter().any(|&f| f != 0)
    }

    /// Sum of attempt counts across every operation.
    pub fn operations(&self) -> i64 {
        self.totals.iter().sum()
    }

    /// Operations with at least one recorded failure, in stable order.
    pub fn failed_operations(&self) -> Vec<Op> {
        (0..Op::COUNT)
            .filter(|&i| self.failures[i] != 0)
            .map(Op::from_index)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.operations() == 0 && self.bytes_read == 0 && self.bytes_written == 0
    }

    /// Pointwise `self - other`.
    pub fn delta(&self, other: &Snapshot) -> Snapshot {
        let mut totals = [0i64; Op::COUNT];
        let mut failures = [0i64; Op::COUNT];
        for i in 0..Op::COUNT {
            totals[i] = self.totals[i] - other.totals[i];
            failures[i] = self.failures[i] - other.failures[i];
        }
        Snapshot {
            totals,
            failures,
            bytes_read: self.bytes_read - other.bytes_read,
            bytes_written: self.bytes_written - other.bytes_written,
        }
    }
}

impl fmt::Display for Snapshot {
    /// Human-readable summary listing only operations with activity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} operations ({} failed), {} B read, {} B written",
            self.operations(),
            self.failures.iter().sum::<i64>(),
            self.bytes_read,
            self.bytes_written,
        )?;
        for i in 0..Op::COUNT {
            if self.totals[i] != 0 || self.failures[i] != 0 {
                write!(
                    f,
                    "\n  {}: {} ({} failed)",
                    Op::from_index(i),
                    self.totals[i],
                    self.failures[i],
                )?;
            }
        }
        Ok(())
    }
}

// ── Fluent expectations ─────────────────────────────────────────────────

/// Sink for expectation failures.
pub trait FailureReporter {
    fn report(&mut self, failure: String);
}

impl FailureReporter for Vec<String> {
    fn report(&mut self, failure: String) {
        self.push(failure);
    }
}

/// Expectation failures collected in one verification pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct Expectations(pub Vec<String>);

impl fmt::Display for Expectations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stats expectation(s) failed:", self.0.len())?;
        for failure in &self.0 {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

enum Check {
    Count(Op, i64),
    Success(Op, i64),
    Failure(Op, i64),
    BytesRead(i64),
    BytesWritten(i64),
    NoFailures,
    Empty,
}

/// Fluent assertions over a recorder, evaluated in a single pass.
///
/// Every failed expectation is collected, not just the first.
#[must_use = "call verify(), assert(), or report() to evaluate the expectations"]
pub struct Expect<'a> {
    recorder: &'a StatsRecorder,
    checks: Vec<Check>,
}

impl Expect<'_> {
    pub fn count(mut self, op: Op, want: i64) -> Self {
        self.checks.push(Check::Count(op, want));
        self
    }

    pub fn success(mut self, op: Op, want: i64) -> Self {
        self.checks.push(Check::Success(op, want));
        self
    }

    pub fn failure(mut self, op: Op, want: i64) -> Self {
        self.checks.push(Check::Failure(op, want));
        self
    }

    pub fn bytes_read(mut self, want: i64) -> Self {
        self.checks.push(Check::BytesRead(want));
        self
    }

    pub fn bytes_written(mut self, want: i64) -> Self {
        self.checks.push(Check::BytesWritten(want));
        self
    }

    pub fn no_failures(mut self) -> Self {
        self.checks.push(Check::NoFailures);
        self
    }

    pub fn empty(mut self) -> Self {
        self.checks.push(Check::Empty);
        self
    }

    /// Evaluate against a snapshot taken now.
    pub fn verify(self) -> Result<(), Expectations> {
        let mut failures = Vec::new();
        self.report(&mut failures);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Expectations(failures))
        }
    }

    /// Evaluate, sending each failed expectation to `reporter`.
    pub fn report(self, reporter: &mut impl FailureReporter) {
        let snap = self.recorder.snapshot();
        for check in &self.checks {
            match *check {
                Check::Count(op, want) => {
                    let got = snap.count(op);
                    if got != want {
                        reporter.report(format!("{op}: count {got}, want {want}"));
                    }
                }
                Check::Success(op, want) => {
                    let got = snap.count_success(op);
                    if got != want {
                        reporter.report(format!("{op}: successes {got}, want {want}"));
                    }
                }
                Check::Failure(op, want) => {
                    let got = snap.count_failure(op);
                    if got != want {
                        reporter.report(format!("{op}: failures {got}, want {want}"));
                    }
                }
                Check::BytesRead(want) => {
                    let got = snap.bytes_read();
                    if got != want {
                        reporter.report(format!("bytes read {got}, want {want}"));
                    }
                }
                Check::BytesWritten(want) => {
                    let got = snap.bytes_written();
                    if got != want {
                        reporter.report(format!("bytes written {got}, want {want}"));
                    }
                }
                Check::NoFailures => {
                    if snap.has_failures() {
                        reporter.report(format!(
                            "unexpected failures in {:?}",
                            snap.failed_operations(),
                        ));
                    }
                }
                Check::Empty => {
                    if !snap.is_empty() {
                        reporter.report(format!("recorder not empty: {snap}"));
                    }
                }
            }
        }
    }

    /// Evaluate and panic with the collected report on any failure.
    #[allow(clippy::panic)]
    pub fn assert(self) {
        if let Err(failures) = self.verify() {
            panic!("{failures}");
        }
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
