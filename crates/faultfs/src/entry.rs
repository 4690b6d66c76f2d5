// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tree entries and the metadata values derived from them.

use crate::path;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// The shared tree: cleaned path to entry. Keys sort lexically, which
/// gives directory listings their name-ascending order for free.
pub(crate) type Tree = Arc<RwLock<BTreeMap<String, Entry>>>;

/// Permission bits plus a directory flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileMode(u32);

impl FileMode {
    /// Directory flag bit.
    pub const DIR: u32 = 1 << 31;

    pub const fn new(bits: u32) -> Self {
        FileMode(bits)
    }

    /// File mode with the given permission bits.
    pub const fn file(perm: u32) -> Self {
        FileMode(perm & 0o777)
    }

    /// Directory mode with the given permission bits.
    pub const fn dir(perm: u32) -> Self {
        FileMode(perm & 0o777 | Self::DIR)
    }

    pub const fn is_dir(self) -> bool {
        self.0 & Self::DIR != 0
    }

    pub const fn perm(self) -> u32 {
        self.0 & 0o777
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The same permissions with the directory flag set.
    pub const fn as_dir(self) -> Self {
        FileMode(self.0 | Self::DIR)
    }

    /// The same permissions with the directory flag cleared.
    pub const fn as_file(self) -> Self {
        FileMode(self.0 & !Self::DIR)
    }
}

impl fmt::Display for FileMode {
    /// `ls`-style rendering, e.g. `drwxr-xr-x` or `-rw-r--r--`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_dir() { "d" } else { "-" })?;
        for shift in [6u32, 3, 0] {
            let triad = (self.perm() >> shift) & 0o7;
            f.write_str(if triad & 0o4 != 0 { "r" } else { "-" })?;
            f.write_str(if triad & 0o2 != 0 { "w" } else { "-" })?;
            f.write_str(if triad & 0o1 != 0 { "x" } else { "-" })?;
        }
        Ok(())
    }
}

/// One node in the tree. Directories hold no bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub data: Vec<u8>,
    pub mode: FileMode,
    pub mtime: SystemTime,
}

impl Entry {
    pub fn file(data: Vec<u8>, mode: FileMode) -> Self {
        Entry { data, mode: mode.as_file(), mtime: SystemTime::now() }
    }

    pub fn dir(mode: FileMode) -> Self {
        Entry { data: Vec::new(), mode: mode.as_dir(), mtime: SystemTime::now() }
    }

    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    /// Metadata value for this entry as stored at `path`.
    pub fn info(&self, path: &str) -> FileInfo {
        FileInfo {
            name: path::base_name(path).to_string(),
            size: self.data.len() as u64,
            mode: self.mode,
            modified: self.mtime,
        }
    }
}

/// Metadata for one entry, as returned by `stat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    name: String,
    size: u64,
    mode: FileMode,
    modified: SystemTime,
}

impl FileInfo {
    /// Assemble a metadata value directly, for custom read-dir handlers
    /// and standalone fixtures.
    pub fn new(name: impl Into<String>, size: u64, mode: FileMode, modified: SystemTime) -> Self {
        FileInfo { name: name.into(), size, mode, modified }
    }

    /// Base name of the path the entry was looked up under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Content length in bytes; zero for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }
}

/// One entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    name: String,
    info: FileInfo,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, info: FileInfo) -> Self {
        DirEntry { name: name.into(), info }
    }

    /// Name relative to the listed directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.info.is_dir()
    }

    pub fn info(&self) -> &FileInfo {
        &self.info
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
