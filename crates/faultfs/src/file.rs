// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Open-file handles.
//!
//! A handle wraps one tree entry and owns its position, pagination
//! cursor, latency once-state, and statistics. The injector is shared
//! with the filesystem that issued the handle, so reconfiguring faults
//! reaches handles that are already open.

use crate::entry::{DirEntry, Entry, FileInfo, FileMode, Tree};
use crate::error::{ErrorKind, FsError};
use crate::injector::{ErrorInjector, Inject};
use crate::latency::{LatencyOptions, LatencySimulator};
use crate::op::Op;
use crate::path;
use crate::stats::StatsRecorder;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{self, SeekFrom};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// How writes mutate content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Writes are rejected with a permission error.
    ReadOnly,
    /// Writes replace the content and leave the position at the end.
    #[default]
    Overwrite,
    /// Writes extend the content.
    Append,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteMode::ReadOnly => "read-only",
            WriteMode::Overwrite => "overwrite",
            WriteMode::Append => "append",
        })
    }
}

/// Pagination callback backing [`MockFile::read_dir`].
pub type ReadDirFn = Box<dyn FnMut(isize) -> Result<Vec<DirEntry>, FsError> + Send>;

/// Standard pagination handler over a listing snapshot.
///
/// For `n > 0` it yields at most `n` entries per call and an
/// [`ErrorKind::Eof`] error once the cursor is exhausted. For `n <= 0`
/// it yields everything remaining, without an error.
pub fn paginate(entries: Vec<DirEntry>) -> ReadDirFn {
    let mut cursor = 0usize;
    Box::new(move |n: isize| {
        if n <= 0 {
            let rest = entries[cursor..].to_vec();
            cursor = entries.len();
            return Ok(rest);
        }
        if cursor >= entries.len() {
            return Err(ErrorKind::Eof.into());
        }
        let take = (n as usize).min(entries.len() - cursor);
        let batch = entries[cursor..cursor + take].to_vec();
        cursor += take;
        Ok(batch)
    })
}

struct FileState {
    pos: u64,
    closed: bool,
    read_dir: Option<ReadDirFn>,
}

/// An open handle onto one tree entry.
///
/// Operations are serialized by an internal mutex, so a handle can be
/// shared across threads behind an `Arc`. Each operation records itself
/// on the handle's own stats recorder, simulates latency, and consults
/// the shared injector before touching the tree.
pub struct MockFile {
    path: String,
    tree: Tree,
    write_mode: WriteMode,
    injector: Arc<dyn Inject>,
    latency: LatencySimulator,
    stats: Arc<StatsRecorder>,
    state: Mutex<FileState>,
}

impl MockFile {
    /// Start building a standalone handle, not issued by a filesystem.
    pub fn builder(path: impl Into<String>) -> MockFileBuilder {
        MockFileBuilder {
            path: path.into(),
            content: Vec::new(),
            mode: FileMode::file(0o644),
            write_mode: WriteMode::default(),
            error_injector: None,
            latency: None,
            read_dir: None,
            stats: None,
        }
    }

    pub(crate) fn from_parts(
        path: String,
        tree: Tree,
        write_mode: WriteMode,
        injector: Arc<dyn Inject>,
        latency: LatencySimulator,
        stats: Arc<StatsRecorder>,
        read_dir: Option<ReadDirFn>,
    ) -> MockFile {
        MockFile {
            path,
            tree,
            write_mode,
            injector,
            latency,
            stats,
            state: Mutex::new(FileState { pos: 0, closed: false, read_dir }),
        }
    }

    /// The cleaned path this handle was opened at.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// This handle's own statistics.
    pub fn stats(&self) -> &StatsRecorder {
        &self.stats
    }

    /// This handle's own latency simulator.
    pub fn latency(&self) -> &LatencySimulator {
        &self.latency
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Read from the current position, advancing it. Returns `Ok(0)` at
    /// end of data.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, FsError> {
        let mut state = self.state.lock();
        let out = self.read_locked(&mut state, buf);
        self.record(Op::Read, out.as_ref().copied().unwrap_or(0), &out);
        out
    }

    /// Read at `offset` without touching the handle position.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize, FsError> {
        let mut state = self.state.lock();
        let out = self.read_at_locked(&mut state, buf, offset);
        self.record(Op::Read, out.as_ref().copied().unwrap_or(0), &out);
        out
    }

    /// Write according to the handle's [`WriteMode`].
    pub fn write(&self, buf: &[u8]) -> Result<usize, FsError> {
        let mut state = self.state.lock();
        let out = self.write_locked(&mut state, buf);
        self.record(Op::Write, out.as_ref().copied().unwrap_or(0), &out);
        out
    }

    /// Write at `offset` without touching the handle position, extending
    /// with zero bytes when the offset lies past the end.
    pub fn write_at(&self, buf: &[u8], offset: u64) -> Result<usize, FsError> {
        let mut state = self.state.lock();
        let out = self.write_at_locked(&mut state, buf, offset);
        self.record(Op::Write, out.as_ref().copied().unwrap_or(0), &out);
        out
    }

    /// Move the position. Seeking past the end is allowed; a negative
    /// resulting position is rejected.
    pub fn seek(&self, pos: SeekFrom) -> Result<u64, FsError> {
        let mut state = self.state.lock();
        let out = self.seek_locked(&mut state, pos);
        self.record(Op::Seek, 0, &out);
        out
    }

    /// Paginated directory listing; see [`paginate`] for the contract.
    /// Returns a not-a-directory error on file handles.
    pub fn read_dir(&self, n: isize) -> Result<Vec<DirEntry>, FsError> {
        let mut state = self.state.lock();
        let out = self.read_dir_locked(&mut state, n);
        self.record(Op::ReadDir, 0, &out);
        out
    }

    /// Metadata derived from the underlying tree entry.
    pub fn stat(&self) -> Result<FileInfo, FsError> {
        let mut state = self.state.lock();
        let out = self.stat_locked(&mut state);
        self.record(Op::Stat, 0, &out);
        out
    }

    /// Close the handle and reset its latency simulator.
    ///
    /// The handle transitions to closed even when an injected close error
    /// fires, so a retrying caller cannot leak it. A second close returns
    /// the closed error.
    pub fn close(&self) -> Result<(), FsError> {
        let mut state = self.state.lock();
        let out = self.close_locked(&mut state);
        self.record(Op::Close, 0, &out);
        out
    }

    fn record<T>(&self, op: Op, bytes: usize, out: &Result<T, FsError>) {
        match out {
            Ok(_) => self.stats.record(op, bytes, None),
            Err(e) => self.stats.record(op, bytes, Some(e)),
        }
    }

    fn check_open(&self, state: &FileState, op: Op) -> Result<(), FsError> {
        if state.closed {
            Err(FsError::new(op, &self.path, ErrorKind::Closed))
        } else {
            Ok(())
        }
    }

    /// Latency then injection, the common prologue after the closed check.
    fn gate(&self, op: Op) -> Result<(), FsError> {
        self.latency.simulate(op, LatencyOptions::default());
        match self.injector.check_and_apply(op, &self.path) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn read_locked(&self, state: &mut FileState, buf: &mut [u8]) -> Result<usize, FsError> {
        self.check_open(state, Op::Read)?;
        self.gate(Op::Read)?;
        let tree = self.tree.read();
        let entry = self.entry_of(&tree, Op::Read)?;
        if entry.is_dir() {
            return Err(FsError::new(Op::Read, &self.path, ErrorKind::Invalid));
        }
        let pos = state.pos as usize;
        if pos >= entry.data.len() {
            return Ok(0);
        }
        let n = buf.len().min(entry.data.len() - pos);
        buf[..n].copy_from_slice(&entry.data[pos..pos + n]);
        state.pos += n as u64;
        Ok(n)
    }

    fn read_at_locked(
        &self,
        state: &mut FileState,
        buf: &mut [u8],
        offset: u64,
    ) -> Result<usize, FsError> {
        self.check_open(state, Op::Read)?;
        self.gate(Op::Read)?;
        let tree = self.tree.read();
        let entry = self.entry_of(&tree, Op::Read)?;
        if entry.is_dir() {
            return Err(FsError::new(Op::Read, &self.path, ErrorKind::Invalid));
        }
        let offset = offset as usize;
        if offset >= entry.data.len() {
            return Ok(0);
        }
        let n = buf.len().min(entry.data.len() - offset);
        buf[..n].copy_from_slice(&entry.data[offset..offset + n]);
        Ok(n)
    }

    fn write_locked(&self, state: &mut FileState, buf: &[u8]) -> Result<usize, FsError> {
        self.check_open(state, Op::Write)?;
        self.gate(Op::Write)?;
        if self.write_mode == WriteMode::ReadOnly {
            return Err(FsError::new(Op::Write, &self.path, ErrorKind::Permission));
        }
        let mut tree = self.tree.write();
        let entry = self.entry_of_mut(&mut tree, Op::Write)?;
        if entry.is_dir() {
            return Err(FsError::new(Op::Write, &self.path, ErrorKind::Invalid));
        }
        match self.write_mode {
            WriteMode::Overwrite => {
                entry.data = buf.to_vec();
            }
            WriteMode::Append => {
                entry.data.extend_from_slice(buf);
            }
            WriteMode::ReadOnly => {}
        }
        entry.mtime = SystemTime::now();
        state.pos = entry.data.len() as u64;
        Ok(buf.len())
    }

    fn write_at_locked(
        &self,
        state: &mut FileState,
        buf: &[u8],
        offset: u64,
    ) -> Result<usize, FsError> {
        self.check_open(state, Op::Write)?;
        self.gate(Op::Write)?;
        if self.write_mode == WriteMode::ReadOnly {
            return Err(FsError::new(Op::Write, &self.path, ErrorKind::Permission));
        }
        let mut tree = self.tree.write();
        let entry = self.entry_of_mut(&mut tree, Op::Write)?;
        if entry.is_dir() {
            return Err(FsError::new(Op::Write, &self.path, ErrorKind::Invalid));
        }
        let offset = offset as usize;
        let end = offset + buf.len();
        if entry.data.len() < end {
            entry.data.resize(end, 0);
        }
        entry.data[offset..end].copy_from_slice(buf);
        entry.mtime = SystemTime::now();
        Ok(buf.len())
    }

    fn seek_locked(&self, state: &mut FileState, pos: SeekFrom) -> Result<u64, FsError> {
        self.check_open(state, Op::Seek)?;
        self.gate(Op::Seek)?;
        let len = {
            let tree = self.tree.read();
            self.entry_of(&tree, Op::Seek)?.data.len() as i64
        };
        let target = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::Current(delta) => state.pos as i64 + delta,
            SeekFrom::End(delta) => len + delta,
        };
        if target < 0 {
            return Err(FsError::new(Op::Seek, &self.path, ErrorKind::NegativeOffset));
        }
        state.pos = target as u64;
        Ok(state.pos)
    }

    fn read_dir_locked(&self, state: &mut FileState, n: isize) -> Result<Vec<DirEntry>, FsError> {
        self.check_open(state, Op::ReadDir)?;
        self.gate(Op::ReadDir)?;
        match state.read_dir.as_mut() {
            Some(handler) => handler(n),
            None => Err(FsError::new(Op::ReadDir, &self.path, ErrorKind::NotDir)),
        }
    }

    fn stat_locked(&self, state: &mut FileState) -> Result<FileInfo, FsError> {
        self.check_open(state, Op::Stat)?;
        self.gate(Op::Stat)?;
        let tree = self.tree.read();
        Ok(self.entry_of(&tree, Op::Stat)?.info(&self.path))
    }

    fn close_locked(&self, state: &mut FileState) -> Result<(), FsError> {
        self.check_open(state, Op::Close)?;
        self.latency.simulate(Op::Close, LatencyOptions::default());
        let injected = self.injector.check_and_apply(Op::Close, &self.path);
        state.closed = true;
        self.latency.reset();
        match injected {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn entry_of<'t>(
        &self,
        tree: &'t BTreeMap<String, Entry>,
        op: Op,
    ) -> Result<&'t Entry, FsError> {
        tree.get(&self.path)
            .ok_or_else(|| FsError::new(op, &self.path, ErrorKind::NotExist))
    }

    fn entry_of_mut<'t>(
        &self,
        tree: &'t mut BTreeMap<String, Entry>,
        op: Op,
    ) -> Result<&'t mut Entry, FsError> {
        tree.get_mut(&self.path)
            .ok_or_else(|| FsError::new(op, &self.path, ErrorKind::NotExist))
    }
}

impl fmt::Debug for MockFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockFile")
            .field("path", &self.path)
            .field("write_mode", &self.write_mode)
            .field("pos", &state.pos)
            .field("closed", &state.closed)
            .finish()
    }
}

impl io::Read for MockFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        MockFile::read(self, buf).map_err(Into::into)
    }
}

impl io::Read for &MockFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        MockFile::read(self, buf).map_err(Into::into)
    }
}

impl io::Write for MockFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        MockFile::write(self, buf).map_err(Into::into)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for &MockFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        MockFile::write(self, buf).map_err(Into::into)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Seek for MockFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        MockFile::seek(self, pos).map_err(Into::into)
    }
}

impl io::Seek for &MockFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        MockFile::seek(self, pos).map_err(Into::into)
    }
}

/// Configures a standalone [`MockFile`].
pub struct MockFileBuilder {
    path: String,
    content: Vec<u8>,
    mode: FileMode,
    write_mode: WriteMode,
    error_injector: Option<Arc<dyn Inject>>,
    latency: Option<LatencySimulator>,
    read_dir: Option<ReadDirFn>,
    stats: Option<Arc<StatsRecorder>>,
}

impl MockFileBuilder {
    /// Initial content of the entry.
    pub fn content(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.content = data.into();
        self
    }

    /// Permission bits, and the directory flag for directory handles.
    pub fn mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }

    /// Record onto a caller-owned recorder instead of a fresh one.
    pub fn stats(mut self, stats: Arc<StatsRecorder>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Reject writes through this handle.
    pub fn read_only(mut self) -> Self {
        self.write_mode = WriteMode::ReadOnly;
        self
    }

    /// Writes replace the content (the default).
    pub fn overwrite(mut self) -> Self {
        self.write_mode = WriteMode::Overwrite;
        self
    }

    /// Writes extend the content.
    pub fn append(mut self) -> Self {
        self.write_mode = WriteMode::Append;
        self
    }

    /// Share an injector instead of starting with an empty one.
    pub fn error_injector(mut self, injector: Arc<dyn Inject>) -> Self {
        self.error_injector = Some(injector);
        self
    }

    /// Uniform latency across all operations.
    pub fn latency(mut self, duration: Duration) -> Self {
        self.latency = Some(LatencySimulator::uniform(duration));
        self
    }

    /// Per-operation latency.
    pub fn per_op_latency(mut self, durations: HashMap<Op, Duration>) -> Self {
        self.latency = Some(LatencySimulator::per_op(durations));
        self
    }

    /// Use a prepared simulator.
    pub fn latency_simulator(mut self, simulator: LatencySimulator) -> Self {
        self.latency = Some(simulator);
        self
    }

    /// Install a custom pagination handler; the handle behaves as a
    /// directory.
    pub fn read_dir_handler(mut self, handler: ReadDirFn) -> Self {
        self.read_dir = Some(handler);
        self
    }

    /// Validate the path and build the handle over its own single-entry
    /// tree.
    pub fn build(self) -> Result<MockFile, FsError> {
        let path = path::clean(Op::Open, &self.path)?;
        let is_dir = self.mode.is_dir() || self.read_dir.is_some();
        if path == "." && !is_dir {
            return Err(FsError::new(Op::Open, &self.path, ErrorKind::Invalid));
        }

        let mut tree = BTreeMap::new();
        tree.insert(".".to_string(), Entry::dir(FileMode::dir(0o755)));
        let mut ancestor = String::new();
        for segment in path::parent(&path).split('/').filter(|s| *s != ".") {
            ancestor = path::join(&ancestor, segment);
            tree.insert(ancestor.clone(), Entry::dir(FileMode::dir(0o755)));
        }
        if path != "." {
            let entry = if is_dir {
                Entry::dir(self.mode)
            } else {
                Entry::file(self.content, self.mode)
            };
            tree.insert(path.clone(), entry);
        }

        let read_dir = match self.read_dir {
            Some(handler) => Some(handler),
            None if is_dir => Some(paginate(Vec::new())),
            None => None,
        };

        let injector = self
            .error_injector
            .unwrap_or_else(|| Arc::new(ErrorInjector::new()) as Arc<dyn Inject>);
        Ok(MockFile::from_parts(
            path,
            Arc::new(RwLock::new(tree)),
            self.write_mode,
            injector,
            self.latency.unwrap_or_default(),
            self.stats.unwrap_or_default(),
            read_dir,
        ))
    }
}

impl fmt::Debug for MockFileBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockFileBuilder")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("write_mode", &self.write_mode)
            .finish()
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
