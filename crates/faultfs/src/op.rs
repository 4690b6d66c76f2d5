// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation codes used to key injection rules, latency, and statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A filesystem or handle operation that can be intercepted.
///
/// The discriminant order is stable; counters and rule buckets are keyed
/// by it. [`Op::Unknown`] doubles as the wildcard bucket: rules filed
/// under it apply to every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Unknown,
    Stat,
    Open,
    Read,
    Write,
    Close,
    Seek,
    ReadDir,
    Mkdir,
    MkdirAll,
    Remove,
    RemoveAll,
    Rename,
}

impl Op {
    /// Number of operation codes, including [`Op::Unknown`].
    pub const COUNT: usize = 13;

    /// Every interceptable operation in stable order, excluding `Unknown`.
    pub const ALL: [Op; 12] = [
        Op::Stat,
        Op::Open,
        Op::Read,
        Op::Write,
        Op::Close,
        Op::Seek,
        Op::ReadDir,
        Op::Mkdir,
        Op::MkdirAll,
        Op::Remove,
        Op::RemoveAll,
        Op::Rename,
    ];

    /// Canonical title-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Unknown => "Unknown",
            Op::Stat => "Stat",
            Op::Open => "Open",
            Op::Read => "Read",
            Op::Write => "Write",
            Op::Close => "Close",
            Op::Seek => "Seek",
            Op::ReadDir => "ReadDir",
            Op::Mkdir => "Mkdir",
            Op::MkdirAll => "MkdirAll",
            Op::Remove => "Remove",
            Op::RemoveAll => "RemoveAll",
            Op::Rename => "Rename",
        }
    }

    pub(crate) fn as_index(self) -> usize {
        self as usize
    }

    pub(crate) fn from_index(i: usize) -> Op {
        match i {
            1 => Op::Stat,
            2 => Op::Open,
            3 => Op::Read,
            4 => Op::Write,
            5 => Op::Close,
            6 => Op::Seek,
            7 => Op::ReadDir,
            8 => Op::Mkdir,
            9 => Op::MkdirAll,
            10 => Op::Remove,
            11 => Op::RemoveAll,
            12 => Op::Rename,
            _ => Op::Unknown,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an operation name does not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid operation name: {0:?}")]
pub struct InvalidOp(pub String);

impl FromStr for Op {
    type Err = InvalidOp;

    /// Case-insensitive parse of the canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unknown" => Ok(Op::Unknown),
            "stat" => Ok(Op::Stat),
            "open" => Ok(Op::Open),
            "read" => Ok(Op::Read),
            "write" => Ok(Op::Write),
            "close" => Ok(Op::Close),
            "seek" => Ok(Op::Seek),
            "readdir" => Ok(Op::ReadDir),
            "mkdir" => Ok(Op::Mkdir),
            "mkdirall" => Ok(Op::MkdirAll),
            "remove" => Ok(Op::Remove),
            "removeall" => Ok(Op::RemoveAll),
            "rename" => Ok(Op::Rename),
            _ => Err(InvalidOp(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
