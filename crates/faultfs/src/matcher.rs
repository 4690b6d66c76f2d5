// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path matchers attached to injection rules.

use crate::path;
use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A matcher pattern that failed to compile.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),
}

/// Decides whether a rule applies to a cleaned candidate path.
///
/// [`PathMatcher::clone_for_sub`] produces a matcher that behaves, inside
/// a sub-filesystem, exactly like the original does against the
/// parent-absolute path.
#[derive(Clone)]
pub enum PathMatcher {
    /// A single cleaned path.
    Exact(String),
    /// A compiled regular expression. When `prefix` is set the pattern is
    /// evaluated against `prefix/path` rather than the path itself.
    Regex {
        regex: Arc<Regex>,
        prefix: Option<String>,
    },
    /// A shell-style glob; `*` and `?` do not cross `/`. Prefix
    /// composition works as for `Regex`.
    Glob {
        matcher: Arc<GlobMatcher>,
        pattern: String,
        prefix: Option<String>,
    },
    /// Matches every path.
    Wildcard,
    /// Matches no path. Produced by sub-cloning an exact matcher that
    /// lies outside the sub-root.
    Nothing,
}

impl PathMatcher {
    /// Matcher for one cleaned path.
    pub fn exact(path: impl Into<String>) -> Self {
        PathMatcher::Exact(path.into())
    }

    /// Compile a regex matcher. Fails on a malformed pattern.
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern)?;
        Ok(PathMatcher::Regex { regex: Arc::new(regex), prefix: None })
    }

    /// Compile a glob matcher. Fails on a malformed pattern.
    pub fn glob(pattern: &str) -> Result<Self, PatternError> {
        let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
        Ok(PathMatcher::Glob {
            matcher: Arc::new(glob.compile_matcher()),
            pattern: pattern.to_string(),
            prefix: None,
        })
    }

    /// True when this matcher accepts the cleaned path `p`.
    pub fn matches(&self, p: &str) -> bool {
        match self {
            PathMatcher::Exact(path) => path == p,
            PathMatcher::Regex { regex, prefix } => regex.is_match(&composed(prefix, p)),
            PathMatcher::Glob { matcher, prefix, .. } => {
                matcher.is_match(&*composed(prefix, p))
            }
            PathMatcher::Wildcard => true,
            PathMatcher::Nothing => false,
        }
    }

    /// A matcher for paths relative to the sub-root `prefix`.
    ///
    /// Exact matchers rewrite textually; regex and glob matchers keep the
    /// original pattern and compose the prefix back on at match time, so
    /// patterns naming parent-relative prefixes keep their meaning.
    pub fn clone_for_sub(&self, prefix: &str) -> PathMatcher {
        match self {
            PathMatcher::Exact(path) => {
                if path == prefix {
                    PathMatcher::Exact(".".to_string())
                } else if let Some(rest) = path.strip_prefix(prefix).and_then(|r| r.strip_prefix('/')) {
                    PathMatcher::Exact(rest.to_string())
                } else {
                    PathMatcher::Nothing
                }
            }
            PathMatcher::Regex { regex, prefix: old } => PathMatcher::Regex {
                regex: Arc::clone(regex),
                prefix: Some(compose_prefix(old.as_deref(), prefix)),
            },
            PathMatcher::Glob { matcher, pattern, prefix: old } => PathMatcher::Glob {
                matcher: Arc::clone(matcher),
                pattern: pattern.clone(),
                prefix: Some(compose_prefix(old.as_deref(), prefix)),
            },
            PathMatcher::Wildcard => PathMatcher::Wildcard,
            PathMatcher::Nothing => PathMatcher::Nothing,
        }
    }
}

/// The parent-absolute path a prefixed matcher evaluates against.
fn composed<'a>(prefix: &Option<String>, p: &'a str) -> Cow<'a, str> {
    match prefix {
        None => Cow::Borrowed(p),
        Some(pre) => Cow::Owned(path::join(pre, p)),
    }
}

fn compose_prefix(old: Option<&str>, new: &str) -> String {
    match old {
        Some(old) => path::join(old, new),
        None => new.to_string(),
    }
}

impl fmt::Debug for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathMatcher::Exact(path) => write!(f, "Exact({path:?})"),
            PathMatcher::Regex { regex, prefix } => {
                write!(f, "Regex({:?}, prefix={prefix:?})", regex.as_str())
            }
            PathMatcher::Glob { pattern, prefix, .. } => {
                write!(f, "Glob({pattern:?}, prefix={prefix:?})")
            }
            PathMatcher::Wildcard => f.write_str("Wildcard"),
            PathMatcher::Nothing => f.write_str("Nothing"),
        }
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
