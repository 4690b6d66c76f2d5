// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds and structured filesystem errors.

use crate::op::Op;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Well-known failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Invalid,
    Permission,
    Exist,
    NotExist,
    Closed,
    Eof,
    DiskFull,
    Timeout,
    Corrupted,
    TooManyHandles,
    NotDir,
    NotEmpty,
    NegativeOffset,
    UnexpectedEof,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Invalid => "invalid argument",
            ErrorKind::Permission => "permission denied",
            ErrorKind::Exist => "file already exists",
            ErrorKind::NotExist => "file does not exist",
            ErrorKind::Closed => "file already closed",
            ErrorKind::Eof => "end of file",
            ErrorKind::DiskFull => "no space left on device",
            ErrorKind::Timeout => "operation timed out",
            ErrorKind::Corrupted => "data corrupted",
            ErrorKind::TooManyHandles => "too many open handles",
            ErrorKind::NotDir => "not a directory",
            ErrorKind::NotEmpty => "directory not empty",
            ErrorKind::NegativeOffset => "negative offset",
            ErrorKind::UnexpectedEof => "unexpected end of file",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error produced by the mock filesystem or configured for injection.
///
/// Injected errors come back exactly as configured, so tests can match
/// them with `==` or by [`FsError::kind`]. Errors raised by the
/// filesystem itself carry the operation and the caller-supplied path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsError {
    /// A failure tied to a specific operation and path.
    #[error("{op} {path}: {kind}")]
    Op { op: Op, path: String, kind: ErrorKind },

    /// A bare failure category, the usual shape for injected errors.
    #[error("{0}")]
    Bare(ErrorKind),
}

impl FsError {
    pub fn new(op: Op, path: impl Into<String>, kind: ErrorKind) -> Self {
        FsError::Op { op, path: path.into(), kind }
    }

    /// The failure category, regardless of shape.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::Op { kind, .. } => *kind,
            FsError::Bare(kind) => *kind,
        }
    }

    /// The offending path, when the error carries one.
    pub fn path(&self) -> Option<&str> {
        match self {
            FsError::Op { path, .. } => Some(path),
            FsError::Bare(_) => None,
        }
    }

    /// The operation that failed, when the error carries one.
    pub fn op(&self) -> Option<Op> {
        match self {
            FsError::Op { op, .. } => Some(*op),
            FsError::Bare(_) => None,
        }
    }
}

impl From<ErrorKind> for FsError {
    fn from(kind: ErrorKind) -> Self {
        FsError::Bare(kind)
    }
}

impl From<FsError> for io::Error {
    fn from(err: FsError) -> Self {
        let kind = match err.kind() {
            ErrorKind::Invalid | ErrorKind::NegativeOffset => io::ErrorKind::InvalidInput,
            ErrorKind::Permission => io::ErrorKind::PermissionDenied,
            ErrorKind::Exist => io::ErrorKind::AlreadyExists,
            ErrorKind::NotExist => io::ErrorKind::NotFound,
            ErrorKind::Eof | ErrorKind::UnexpectedEof => io::ErrorKind::UnexpectedEof,
            ErrorKind::DiskFull => io::ErrorKind::StorageFull,
            ErrorKind::Timeout => io::ErrorKind::TimedOut,
            ErrorKind::NotDir => io::ErrorKind::NotADirectory,
            ErrorKind::NotEmpty => io::ErrorKind::DirectoryNotEmpty,
            ErrorKind::Closed | ErrorKind::Corrupted | ErrorKind::TooManyHandles => {
                io::ErrorKind::Other
            }
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
