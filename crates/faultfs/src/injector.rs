// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error injection: rule tables keyed by operation.

use crate::error::FsError;
use crate::matcher::{PathMatcher, PatternError};
use crate::op::Op;
use crate::rule::{FireMode, Rule};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Decides, per operation and cleaned path, whether to inject an error.
///
/// The standard implementation is [`ErrorInjector`]; tests may plug in
/// their own. One injector is shared by a filesystem and every handle it
/// issues, so reconfiguring it affects open handles immediately.
///
/// Only four methods are required; the `add_*` conveniences are provided
/// on top of [`Inject::add`].
pub trait Inject: Send + Sync {
    /// Evaluate the rules for `op` in insertion order, advancing rule
    /// state, and return the first error that fires. Rules filed under
    /// [`Op::Unknown`] are evaluated after the op-specific bucket, for
    /// every operation.
    fn check_and_apply(&self, op: Op, path: &str) -> Option<FsError>;

    /// Append a rule to the bucket for `op`.
    fn add(&self, op: Op, rule: Rule);

    /// Discard every rule.
    fn clear(&self);

    /// An independent injector whose rules are rewritten relative to
    /// `prefix`, with fresh firing state.
    fn clone_for_sub(&self, prefix: &str) -> Arc<dyn Inject>;

    /// Rule matching one exact path.
    fn add_exact(&self, op: Op, path: &str, error: FsError, mode: FireMode, after_n: u64) {
        self.add(op, Rule::new(error, mode, after_n, vec![PathMatcher::exact(path)]));
    }

    /// Rule matching a regex. A compile failure leaves the table untouched.
    fn add_regex(
        &self,
        op: Op,
        pattern: &str,
        error: FsError,
        mode: FireMode,
        after_n: u64,
    ) -> Result<(), PatternError> {
        let matcher = PathMatcher::regex(pattern)?;
        self.add(op, Rule::new(error, mode, after_n, vec![matcher]));
        Ok(())
    }

    /// Rule matching a glob. A compile failure leaves the table untouched.
    fn add_glob(
        &self,
        op: Op,
        pattern: &str,
        error: FsError,
        mode: FireMode,
        after_n: u64,
    ) -> Result<(), PatternError> {
        let matcher = PathMatcher::glob(pattern)?;
        self.add(op, Rule::new(error, mode, after_n, vec![matcher]));
        Ok(())
    }

    /// Rule matching every path, for one operation.
    fn add_all(&self, op: Op, error: FsError, mode: FireMode, after_n: u64) {
        self.add(op, Rule::new(error, mode, after_n, vec![PathMatcher::Wildcard]));
    }

    /// Exact-path rule cloned, with independent state, into every
    /// operation's bucket.
    fn add_exact_for_all_ops(&self, path: &str, error: FsError, mode: FireMode, after_n: u64) {
        let rule = Rule::new(error, mode, after_n, vec![PathMatcher::exact(path)]);
        self.add_for_all_ops(rule);
    }

    /// Regex rule cloned, with independent state, into every operation's
    /// bucket.
    fn add_regex_for_all_ops(
        &self,
        pattern: &str,
        error: FsError,
        mode: FireMode,
        after_n: u64,
    ) -> Result<(), PatternError> {
        let matcher = PathMatcher::regex(pattern)?;
        self.add_for_all_ops(Rule::new(error, mode, after_n, vec![matcher]));
        Ok(())
    }

    /// Glob rule cloned, with independent state, into every operation's
    /// bucket.
    fn add_glob_for_all_ops(
        &self,
        pattern: &str,
        error: FsError,
        mode: FireMode,
        after_n: u64,
    ) -> Result<(), PatternError> {
        let matcher = PathMatcher::glob(pattern)?;
        self.add_for_all_ops(Rule::new(error, mode, after_n, vec![matcher]));
        Ok(())
    }

    /// Wildcard rule cloned, with independent state, into every
    /// operation's bucket.
    fn add_all_for_all_ops(&self, error: FsError, mode: FireMode, after_n: u64) {
        self.add_for_all_ops(Rule::new(error, mode, after_n, vec![PathMatcher::Wildcard]));
    }

    /// One fresh-state clone of `rule` per valid operation.
    fn add_for_all_ops(&self, rule: Rule) {
        for op in Op::ALL {
            self.add(op, rule.clone_fresh());
        }
    }
}

/// The standard rule table.
///
/// A reader-writer lock guards the table; [`Inject::check_and_apply`]
/// takes the read lock only, and rule state advances through the rules'
/// own atomics.
#[derive(Default)]
pub struct ErrorInjector {
    rules: RwLock<IndexMap<Op, Vec<Rule>>>,
}

impl ErrorInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defensive copy of the whole table, for introspection. Rule state
    /// in the copy is a snapshot; firing it does not affect the live
    /// rules.
    pub fn rules(&self) -> IndexMap<Op, Vec<Rule>> {
        self.rules.read().clone()
    }

    /// Total number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.read().values().all(Vec::is_empty)
    }
}

impl Inject for ErrorInjector {
    fn check_and_apply(&self, op: Op, path: &str) -> Option<FsError> {
        let rules = self.rules.read();
        let buckets: &[Op] = if op == Op::Unknown { &[Op::Unknown] } else { &[op, Op::Unknown] };
        for bucket in buckets {
            for rule in rules.get(bucket).into_iter().flatten() {
                if rule.matches(path) && rule.should_fire() {
                    let error = rule.error().clone();
                    tracing::debug!(op = %op, path, %error, "injecting error");
                    return Some(error);
                }
            }
        }
        None
    }

    fn add(&self, op: Op, rule: Rule) {
        self.rules.write().entry(op).or_default().push(rule);
    }

    fn clear(&self) {
        self.rules.write().clear();
    }

    fn clone_for_sub(&self, prefix: &str) -> Arc<dyn Inject> {
        let rules = self.rules.read();
        let cloned = rules
            .iter()
            .map(|(op, bucket)| {
                (*op, bucket.iter().map(|r| r.clone_for_sub(prefix)).collect::<Vec<_>>())
            })
            .collect();
        Arc::new(ErrorInjector { rules: RwLock::new(cloned) })
    }
}

#[cfg(test)]
#[path = "injector_tests.rs"]
mod tests;
