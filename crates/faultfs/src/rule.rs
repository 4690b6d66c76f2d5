// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Injection rules: an error, a firing mode, and path matchers.

use crate::error::FsError;
use crate::matcher::PathMatcher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// When a matching rule surfaces its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FireMode {
    /// Fire on every matching call.
    Always,
    /// Fire on exactly one matching call, concurrent callers included.
    Once,
    /// Let the first N matching calls through, then fire on every later one.
    AfterN,
    /// Fire on the first N matching calls, then stop.
    NextN,
}

impl fmt::Display for FireMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FireMode::Always => "always",
            FireMode::Once => "once",
            FireMode::AfterN => "after-n",
            FireMode::NextN => "next-n",
        })
    }
}

/// A configured fault.
///
/// Mode state lives in atomics so concurrent evaluations advance it
/// without a rule-local lock.
#[derive(Debug)]
pub struct Rule {
    error: FsError,
    mode: FireMode,
    after_n: u64,
    matchers: Vec<PathMatcher>,
    used_once: AtomicBool,
    hits: AtomicU64,
}

impl Rule {
    /// Build a rule. An empty matcher set matches nothing; use
    /// [`PathMatcher::Wildcard`] to fire on every path.
    pub fn new(error: FsError, mode: FireMode, after_n: u64, matchers: Vec<PathMatcher>) -> Self {
        Rule {
            error,
            mode,
            after_n,
            matchers,
            used_once: AtomicBool::new(false),
            hits: AtomicU64::new(0),
        }
    }

    pub fn error(&self) -> &FsError {
        &self.error
    }

    pub fn mode(&self) -> FireMode {
        self.mode
    }

    pub fn after_n(&self) -> u64 {
        self.after_n
    }

    pub fn matchers(&self) -> &[PathMatcher] {
        &self.matchers
    }

    /// Matching calls seen so far (counting modes only).
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Acquire)
    }

    /// True when any matcher accepts the cleaned path.
    pub fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }

    /// Advance the mode state machine and report whether to surface the
    /// error on this call.
    pub fn should_fire(&self) -> bool {
        match self.mode {
            FireMode::Always => true,
            FireMode::Once => self
                .used_once
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok(),
            FireMode::AfterN => self.hits.fetch_add(1, Ordering::AcqRel) + 1 > self.after_n,
            FireMode::NextN => self.hits.fetch_add(1, Ordering::AcqRel) + 1 <= self.after_n,
        }
    }

    /// Copy with identical configuration and fresh firing state.
    pub fn clone_fresh(&self) -> Rule {
        Rule::new(self.error.clone(), self.mode, self.after_n, self.matchers.clone())
    }

    /// Copy with matchers rewritten relative to `prefix` and fresh state.
    pub fn clone_for_sub(&self, prefix: &str) -> Rule {
        Rule::new(
            self.error.clone(),
            self.mode,
            self.after_n,
            self.matchers.iter().map(|m| m.clone_for_sub(prefix)).collect(),
        )
    }
}

impl Clone for Rule {
    /// Copies configuration and a snapshot of the current firing state.
    fn clone(&self) -> Self {
        Rule {
            error: self.error.clone(),
            mode: self.mode,
            after_n: self.after_n,
            matchers: self.matchers.clone(),
            used_once: AtomicBool::new(self.used_once.load(Ordering::Acquire)),
            hits: AtomicU64::new(self.hits.load(Ordering::Acquire)),
        }
    }
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
