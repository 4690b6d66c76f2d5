// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path validation and lexical cleaning.
//!
//! Tree keys and matcher inputs are always cleaned paths: forward
//! slashes, no leading slash, no `.` or `..` segments, with `.` alone
//! denoting the root. Platform-native separators are not recognized.

use crate::error::{ErrorKind, FsError};
use crate::op::Op;

/// Validate `path` and return its cleaned form.
///
/// Rejected: the empty string, a leading `/`, and any `..` segment.
/// Duplicate slashes, `.` segments, and trailing slashes are collapsed.
/// A path that cleans to nothing (`"."`, `"./"`) becomes `"."`.
pub fn clean(op: Op, path: &str) -> Result<String, FsError> {
    if path.is_empty() || path.starts_with('/') {
        return Err(FsError::new(op, path, ErrorKind::Invalid));
    }
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(FsError::new(op, path, ErrorKind::Invalid)),
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        Ok(".".to_string())
    } else {
        Ok(segments.join("/"))
    }
}

/// Last segment of a cleaned path. The root's base name is `.`.
pub(crate) fn base_name(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, base)) => base,
        None => path,
    }
}

/// Parent of a cleaned path; `.` for top-level entries and the root.
pub(crate) fn parent(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => ".",
    }
}

/// Join a cleaned prefix and a cleaned relative path.
pub(crate) fn join(prefix: &str, rel: &str) -> String {
    if rel.is_empty() || rel == "." {
        prefix.to_string()
    } else if prefix.is_empty() || prefix == "." {
        rel.to_string()
    } else {
        format!("{prefix}/{rel}")
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
