// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-memory filesystem.
//!
//! A tree of cleaned paths drives every operation through the same
//! pipeline: validate the path, consult the shared injector, simulate
//! latency, then touch the tree under its lock. The injector and latency
//! run outside the tree lock, so a rule cleared mid-operation may still
//! be observed; real filesystems have the same lookup-to-action window.

use crate::entry::{DirEntry, Entry, FileInfo, FileMode, Tree};
use crate::error::{ErrorKind, FsError};
use crate::file::{paginate, MockFile, WriteMode};
use crate::injector::{ErrorInjector, Inject};
use crate::latency::{LatencyOptions, LatencySimulator};
use crate::matcher::PathMatcher;
use crate::op::Op;
use crate::path;
use crate::rule::{FireMode, Rule};
use crate::stats::StatsRecorder;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// An in-memory filesystem with programmable faults.
///
/// The root entry `.` always exists and is a directory. All methods take
/// `&self`; share the filesystem across threads behind an `Arc`.
pub struct MockFs {
    tree: Tree,
    injector: Arc<dyn Inject>,
    latency: LatencySimulator,
    stats: Arc<StatsRecorder>,
    write_mode: WriteMode,
    create_if_missing: bool,
}

impl MockFs {
    /// An empty filesystem with default settings.
    pub fn new() -> Self {
        MockFs {
            tree: new_tree(),
            injector: Arc::new(ErrorInjector::new()),
            latency: LatencySimulator::none(),
            stats: Arc::new(StatsRecorder::new()),
            write_mode: WriteMode::default(),
            create_if_missing: false,
        }
    }

    /// Start configuring a filesystem.
    pub fn builder() -> MockFsBuilder {
        MockFsBuilder::default()
    }

    // ── Shared engines ──────────────────────────────────────────────────

    /// The filesystem's own statistics. Handle activity is not included;
    /// each handle carries its own recorder.
    pub fn stats(&self) -> &StatsRecorder {
        &self.stats
    }

    /// The injector shared with every handle this filesystem issues.
    pub fn injector(&self) -> Arc<dyn Inject> {
        Arc::clone(&self.injector)
    }

    /// The latency simulator cloned into each handle.
    pub fn latency(&self) -> &LatencySimulator {
        &self.latency
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    pub fn create_if_missing(&self) -> bool {
        self.create_if_missing
    }

    // ── Read operations ─────────────────────────────────────────────────

    /// Metadata for the entry at `name`.
    pub fn stat(&self, name: &str) -> Result<FileInfo, FsError> {
        let out = self.stat_inner(name);
        self.record(Op::Stat, 0, &out);
        out
    }

    fn stat_inner(&self, name: &str) -> Result<FileInfo, FsError> {
        let cleaned = path::clean(Op::Stat, name)?;
        self.gate(Op::Stat, &cleaned)?;
        let tree = self.tree.read();
        let entry = tree
            .get(&cleaned)
            .ok_or_else(|| FsError::new(Op::Stat, name, ErrorKind::NotExist))?;
        Ok(entry.info(&cleaned))
    }

    /// Open a handle on the entry at `name`.
    ///
    /// The handle shares this filesystem's injector, clones its latency
    /// simulator, and starts with a fresh stats recorder. Directory
    /// handles paginate over a snapshot of the immediate children taken
    /// now, sorted by name.
    pub fn open(&self, name: &str) -> Result<MockFile, FsError> {
        let out = self.open_inner(name);
        self.record(Op::Open, 0, &out);
        out
    }

    fn open_inner(&self, name: &str) -> Result<MockFile, FsError> {
        let cleaned = path::clean(Op::Open, name)?;
        self.gate(Op::Open, &cleaned)?;
        let read_dir = {
            let tree = self.tree.read();
            let entry = tree
                .get(&cleaned)
                .ok_or_else(|| FsError::new(Op::Open, name, ErrorKind::NotExist))?;
            entry.is_dir().then(|| paginate(immediate_children(&tree, &cleaned)))
        };
        Ok(MockFile::from_parts(
            cleaned,
            Arc::clone(&self.tree),
            self.write_mode,
            Arc::clone(&self.injector),
            self.latency.clone(),
            Arc::new(StatsRecorder::new()),
            read_dir,
        ))
    }

    /// Sorted listing of a directory's immediate children.
    pub fn read_dir(&self, name: &str) -> Result<Vec<DirEntry>, FsError> {
        let out = self.read_dir_inner(name);
        self.record(Op::ReadDir, 0, &out);
        out
    }

    fn read_dir_inner(&self, name: &str) -> Result<Vec<DirEntry>, FsError> {
        let cleaned = path::clean(Op::ReadDir, name)?;
        self.gate(Op::ReadDir, &cleaned)?;
        let tree = self.tree.read();
        let entry = tree
            .get(&cleaned)
            .ok_or_else(|| FsError::new(Op::ReadDir, name, ErrorKind::NotExist))?;
        if !entry.is_dir() {
            return Err(FsError::new(Op::ReadDir, name, ErrorKind::NotDir));
        }
        Ok(immediate_children(&tree, &cleaned))
    }

    /// Open, drain, and close; the whole content of a file.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>, FsError> {
        let file = self.open(name)?;
        let mut data = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            match file.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => data.extend_from_slice(&chunk[..n]),
                Err(err) => {
                    let _ = file.close();
                    return Err(err);
                }
            }
        }
        file.close()?;
        Ok(data)
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Create a directory. The parent must already exist.
    pub fn mkdir(&self, name: &str, mode: FileMode) -> Result<(), FsError> {
        let out = self.mkdir_inner(name, mode);
        self.record(Op::Mkdir, 0, &out);
        out
    }

    fn mkdir_inner(&self, name: &str, mode: FileMode) -> Result<(), FsError> {
        let cleaned = path::clean(Op::Mkdir, name)?;
        self.gate(Op::Mkdir, &cleaned)?;
        if cleaned == "." {
            return Err(FsError::new(Op::Mkdir, name, ErrorKind::Exist));
        }
        let mut tree = self.tree.write();
        if tree.contains_key(&cleaned) {
            return Err(FsError::new(Op::Mkdir, name, ErrorKind::Exist));
        }
        match tree.get(path::parent(&cleaned)) {
            None => return Err(FsError::new(Op::Mkdir, name, ErrorKind::NotExist)),
            Some(parent) if !parent.is_dir() => {
                return Err(FsError::new(Op::Mkdir, name, ErrorKind::NotDir));
            }
            Some(_) => {}
        }
        tracing::trace!(path = %cleaned, "mkdir");
        tree.insert(cleaned, Entry::dir(mode));
        Ok(())
    }

    /// Create a directory and any missing parents. An existing non-directory
    /// prefix fails the whole call.
    pub fn mkdir_all(&self, name: &str, mode: FileMode) -> Result<(), FsError> {
        let out = self.mkdir_all_inner(name, mode);
        self.record(Op::MkdirAll, 0, &out);
        out
    }

    fn mkdir_all_inner(&self, name: &str, mode: FileMode) -> Result<(), FsError> {
        let cleaned = path::clean(Op::MkdirAll, name)?;
        self.gate(Op::MkdirAll, &cleaned)?;
        if cleaned == "." {
            return Ok(());
        }
        let mut tree = self.tree.write();
        let mut prefix = String::new();
        for segment in cleaned.split('/') {
            prefix = path::join(&prefix, segment);
            match tree.get(&prefix) {
                Some(entry) if entry.is_dir() => {}
                Some(_) => return Err(FsError::new(Op::MkdirAll, &prefix, ErrorKind::NotDir)),
                None => {
                    tree.insert(prefix.clone(), Entry::dir(mode));
                }
            }
        }
        tracing::trace!(path = %cleaned, "mkdir_all");
        Ok(())
    }

    /// Remove a file or an empty directory.
    pub fn remove(&self, name: &str) -> Result<(), FsError> {
        let out = self.remove_inner(name);
        self.record(Op::Remove, 0, &out);
        out
    }

    fn remove_inner(&self, name: &str) -> Result<(), FsError> {
        let cleaned = path::clean(Op::Remove, name)?;
        self.gate(Op::Remove, &cleaned)?;
        // the root stays, even when it has no children
        if cleaned == "." {
            return Err(FsError::new(Op::Remove, name, ErrorKind::Invalid));
        }
        let mut tree = self.tree.write();
        let entry = tree
            .get(&cleaned)
            .ok_or_else(|| FsError::new(Op::Remove, name, ErrorKind::NotExist))?;
        if entry.is_dir() && has_children(&tree, &cleaned) {
            return Err(FsError::new(Op::Remove, name, ErrorKind::NotEmpty));
        }
        tracing::trace!(path = %cleaned, "remove");
        tree.remove(&cleaned);
        Ok(())
    }

    /// Remove a path and every descendant. A missing path is not an error.
    pub fn remove_all(&self, name: &str) -> Result<(), FsError> {
        let out = self.remove_all_inner(name);
        self.record(Op::RemoveAll, 0, &out);
        out
    }

    fn remove_all_inner(&self, name: &str) -> Result<(), FsError> {
        let cleaned = path::clean(Op::RemoveAll, name)?;
        self.gate(Op::RemoveAll, &cleaned)?;
        if cleaned == "." {
            return Err(FsError::new(Op::RemoveAll, name, ErrorKind::Invalid));
        }
        let mut tree = self.tree.write();
        let prefix = format!("{cleaned}/");
        tracing::trace!(path = %cleaned, "remove_all");
        tree.retain(|key, _| key != &cleaned && !key.starts_with(&prefix));
        Ok(())
    }

    /// Move an entry, and its descendants when it is a directory. An
    /// existing destination is overwritten.
    pub fn rename(&self, old: &str, new: &str) -> Result<(), FsError> {
        let out = self.rename_inner(old, new);
        self.record(Op::Rename, 0, &out);
        out
    }

    fn rename_inner(&self, old: &str, new: &str) -> Result<(), FsError> {
        let from = path::clean(Op::Rename, old)?;
        let to = path::clean(Op::Rename, new)?;
        self.gate(Op::Rename, &from)?;
        if from == "." || to == "." {
            return Err(FsError::new(Op::Rename, if from == "." { old } else { new }, ErrorKind::Invalid));
        }
        if to.starts_with(&format!("{from}/")) {
            return Err(FsError::new(Op::Rename, new, ErrorKind::Invalid));
        }
        let mut tree = self.tree.write();
        if !tree.contains_key(&from) {
            return Err(FsError::new(Op::Rename, old, ErrorKind::NotExist));
        }
        match tree.get(path::parent(&to)) {
            None => return Err(FsError::new(Op::Rename, new, ErrorKind::NotExist)),
            Some(parent) if !parent.is_dir() => {
                return Err(FsError::new(Op::Rename, new, ErrorKind::NotDir));
            }
            Some(_) => {}
        }

        let from_prefix = format!("{from}/");
        let moved: Vec<(String, Entry)> = tree
            .iter()
            .filter(|(key, _)| key.as_str() == from || key.starts_with(&from_prefix))
            .map(|(key, entry)| {
                let rekeyed = if key == &from {
                    to.clone()
                } else {
                    format!("{to}/{}", &key[from_prefix.len()..])
                };
                (rekeyed, entry.clone())
            })
            .collect();
        tree.retain(|key, _| key != &from && !key.starts_with(&from_prefix));
        tracing::trace!(from = %from, to = %to, entries = moved.len(), "rename");
        tree.extend(moved);
        Ok(())
    }

    /// Write a whole file, honoring the filesystem write mode and the
    /// create-if-missing flag. `mode` applies only when the file is
    /// created.
    pub fn write_file(&self, name: &str, data: &[u8], mode: FileMode) -> Result<(), FsError> {
        let out = self.write_file_inner(name, data, mode);
        match &out {
            Ok(()) => self.stats.record(Op::Write, data.len(), None),
            Err(err) => self.stats.record(Op::Write, 0, Some(err)),
        }
        out
    }

    fn write_file_inner(&self, name: &str, data: &[u8], mode: FileMode) -> Result<(), FsError> {
        let cleaned = path::clean(Op::Write, name)?;
        self.gate(Op::Write, &cleaned)?;
        if self.write_mode == WriteMode::ReadOnly {
            return Err(FsError::new(Op::Write, name, ErrorKind::Permission));
        }
        let mut tree = self.tree.write();
        match tree.get_mut(&cleaned) {
            Some(entry) if entry.is_dir() => {
                Err(FsError::new(Op::Write, name, ErrorKind::Invalid))
            }
            Some(entry) => {
                match self.write_mode {
                    WriteMode::Overwrite => entry.data = data.to_vec(),
                    WriteMode::Append => entry.data.extend_from_slice(data),
                    WriteMode::ReadOnly => {}
                }
                entry.mtime = std::time::SystemTime::now();
                Ok(())
            }
            None => {
                if !self.create_if_missing {
                    return Err(FsError::new(Op::Write, name, ErrorKind::NotExist));
                }
                match tree.get(path::parent(&cleaned)) {
                    None => return Err(FsError::new(Op::Write, name, ErrorKind::NotExist)),
                    Some(parent) if !parent.is_dir() => {
                        return Err(FsError::new(Op::Write, name, ErrorKind::NotDir));
                    }
                    Some(_) => {}
                }
                tracing::trace!(path = %cleaned, bytes = data.len(), "create file");
                tree.insert(cleaned, Entry::file(data.to_vec(), mode));
                Ok(())
            }
        }
    }

    // ── Sub-views ───────────────────────────────────────────────────────

    /// A filesystem rooted at the directory `dir`.
    ///
    /// The sub-view deep-copies the entries under `dir` (re-keyed
    /// relative to it), clones the injector with rules rewritten for the
    /// new root, shares the latency configuration, and starts with fresh
    /// statistics. Later mutations of the parent do not reach the copy.
    pub fn sub(&self, dir: &str) -> Result<MockFs, FsError> {
        let cleaned = path::clean(Op::Open, dir)?;
        if cleaned == "." {
            return Err(FsError::new(Op::Open, dir, ErrorKind::Invalid));
        }
        let tree = self.tree.read();
        let entry = tree
            .get(&cleaned)
            .ok_or_else(|| FsError::new(Op::Open, dir, ErrorKind::NotExist))?;
        if !entry.is_dir() {
            return Err(FsError::new(Op::Open, dir, ErrorKind::NotDir));
        }

        let prefix = format!("{cleaned}/");
        let mut copied = BTreeMap::new();
        copied.insert(".".to_string(), entry.clone());
        for (key, value) in tree.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            copied.insert(key[prefix.len()..].to_string(), value.clone());
        }
        tracing::trace!(root = %cleaned, entries = copied.len(), "sub view");

        Ok(MockFs {
            tree: Arc::new(RwLock::new(copied)),
            injector: self.injector.clone_for_sub(&cleaned),
            latency: self.latency.clone(),
            stats: Arc::new(StatsRecorder::new()),
            write_mode: self.write_mode,
            create_if_missing: self.create_if_missing,
        })
    }

    // ── Test seeding and fault shortcuts ────────────────────────────────

    /// Insert a file, creating missing parent directories. Seeding
    /// bypasses injection, latency, and statistics.
    pub fn add_file(
        &self,
        name: &str,
        data: impl Into<Vec<u8>>,
        mode: FileMode,
    ) -> Result<(), FsError> {
        let cleaned = path::clean(Op::Write, name)?;
        if cleaned == "." {
            return Err(FsError::new(Op::Write, name, ErrorKind::Invalid));
        }
        let mut tree = self.tree.write();
        if tree.get(&cleaned).is_some_and(Entry::is_dir) {
            return Err(FsError::new(Op::Write, name, ErrorKind::NotDir));
        }
        ensure_parents(&mut tree, &cleaned, name)?;
        tree.insert(cleaned, Entry::file(data.into(), mode));
        Ok(())
    }

    /// Insert a directory, creating missing parents. Seeding bypasses
    /// injection, latency, and statistics.
    pub fn add_dir(&self, name: &str, mode: FileMode) -> Result<(), FsError> {
        let cleaned = path::clean(Op::Mkdir, name)?;
        if cleaned == "." {
            return Ok(());
        }
        let mut tree = self.tree.write();
        ensure_parents(&mut tree, &cleaned, name)?;
        match tree.get(&cleaned) {
            Some(entry) if !entry.is_dir() => {
                Err(FsError::new(Op::Mkdir, name, ErrorKind::NotDir))
            }
            Some(_) => Ok(()),
            None => {
                tree.insert(cleaned, Entry::dir(mode));
                Ok(())
            }
        }
    }

    /// Drop the given paths (and their descendants) from the tree and
    /// install always-firing not-exist rules for them across every
    /// operation.
    ///
    /// Sharp edge: a later [`MockFs::add_file`] at such a path does not
    /// cancel the injected rules; clear the injector to do that.
    pub fn mark_non_existent<I, S>(&self, paths: I) -> Result<(), FsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in paths {
            let cleaned = path::clean(Op::Remove, name.as_ref())?;
            if cleaned == "." {
                return Err(FsError::new(Op::Remove, name.as_ref(), ErrorKind::Invalid));
            }
            {
                let mut tree = self.tree.write();
                let prefix = format!("{cleaned}/");
                tree.retain(|key, _| key != &cleaned && !key.starts_with(&prefix));
            }
            let descendants = PathMatcher::regex(&format!("^{}/", regex::escape(&cleaned)))
                .map_err(|_| FsError::new(Op::Remove, name.as_ref(), ErrorKind::Invalid))?;
            self.injector.add(
                Op::Unknown,
                Rule::new(
                    ErrorKind::NotExist.into(),
                    FireMode::Always,
                    0,
                    vec![PathMatcher::exact(cleaned), descendants],
                ),
            );
        }
        Ok(())
    }

    // ── Introspection ───────────────────────────────────────────────────

    /// True when an entry exists at `name`; invalid paths are simply absent.
    pub fn contains(&self, name: &str) -> bool {
        match path::clean(Op::Stat, name) {
            Ok(cleaned) => self.tree.read().contains_key(&cleaned),
            Err(_) => false,
        }
    }

    /// Every tree key in sorted order, the root included.
    pub fn paths(&self) -> Vec<String> {
        self.tree.read().keys().cloned().collect()
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Injection then latency, the common prologue before the tree lock.
    fn gate(&self, op: Op, cleaned: &str) -> Result<(), FsError> {
        if let Some(err) = self.injector.check_and_apply(op, cleaned) {
            return Err(err);
        }
        self.latency.simulate(op, LatencyOptions::default());
        Ok(())
    }

    fn record<T>(&self, op: Op, bytes: usize, out: &Result<T, FsError>) {
        match out {
            Ok(_) => self.stats.record(op, bytes, None),
            Err(err) => self.stats.record(op, bytes, Some(err)),
        }
    }
}

impl Default for MockFs {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockFs")
            .field("entries", &self.tree.read().len())
            .field("write_mode", &self.write_mode)
            .field("create_if_missing", &self.create_if_missing)
            .finish()
    }
}

fn new_tree() -> Tree {
    let mut tree = BTreeMap::new();
    tree.insert(".".to_string(), Entry::dir(FileMode::dir(0o755)));
    Arc::new(RwLock::new(tree))
}

/// Immediate children of `dir`, sorted by name.
fn immediate_children(tree: &BTreeMap<String, Entry>, dir: &str) -> Vec<DirEntry> {
    let mut out = Vec::new();
    if dir == "." {
        for (key, entry) in tree.iter() {
            if key != "." && !key.contains('/') {
                out.push(DirEntry::new(key.clone(), entry.info(key)));
            }
        }
    } else {
        let prefix = format!("{dir}/");
        for (key, entry) in tree.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            let rest = &key[prefix.len()..];
            if !rest.contains('/') {
                out.push(DirEntry::new(rest.to_string(), entry.info(key)));
            }
        }
    }
    out
}

fn has_children(tree: &BTreeMap<String, Entry>, dir: &str) -> bool {
    let prefix = format!("{dir}/");
    tree.range(prefix.clone()..).next().is_some_and(|(key, _)| key.starts_with(&prefix))
}

/// Create any missing ancestor directories of `cleaned`.
fn ensure_parents(
    tree: &mut BTreeMap<String, Entry>,
    cleaned: &str,
    name: &str,
) -> Result<(), FsError> {
    let mut prefix = String::new();
    for segment in path::parent(cleaned).split('/').filter(|s| *s != ".") {
        prefix = path::join(&prefix, segment);
        match tree.get(&prefix) {
            Some(entry) if !entry.is_dir() => {
                return Err(FsError::new(Op::Mkdir, name, ErrorKind::NotDir));
            }
            Some(_) => {}
            None => {
                tree.insert(prefix.clone(), Entry::dir(FileMode::dir(0o755)));
            }
        }
    }
    Ok(())
}

/// Configures a [`MockFs`].
///
/// Seeded files and directories are inserted at build time in the order
/// given, with missing parents created automatically.
#[derive(Default)]
pub struct MockFsBuilder {
    error_injector: Option<Arc<dyn Inject>>,
    latency: Option<LatencySimulator>,
    write_mode: WriteMode,
    create_if_missing: bool,
    seeds: Vec<Seed>,
}

enum Seed {
    File { path: String, data: Vec<u8>, mode: FileMode },
    Dir { path: String, mode: FileMode },
}

impl MockFsBuilder {
    /// Permit `write_file` to create missing files.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Reject writes at the filesystem level.
    pub fn read_only(mut self) -> Self {
        self.write_mode = WriteMode::ReadOnly;
        self
    }

    /// `write_file` replaces content (the default).
    pub fn overwrite(mut self) -> Self {
        self.write_mode = WriteMode::Overwrite;
        self
    }

    /// `write_file` extends content.
    pub fn append(mut self) -> Self {
        self.write_mode = WriteMode::Append;
        self
    }

    /// Use a shared injector instead of a fresh empty one.
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

    /// Seed a file.
    pub fn file(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>, mode: FileMode) -> Self {
        self.seeds.push(Seed::File { path: path.into(), data: data.into(), mode });
        self
    }

    /// Seed a directory.
    pub fn dir(mut self, path: impl Into<String>, mode: FileMode) -> Self {
        self.seeds.push(Seed::Dir { path: path.into(), mode });
        self
    }

    /// Validate the seeds and build the filesystem.
    pub fn build(self) -> Result<MockFs, FsError> {
        let fs = MockFs {
            tree: new_tree(),
            injector: self
                .error_injector
                .unwrap_or_else(|| Arc::new(ErrorInjector::new()) as Arc<dyn Inject>),
            latency: self.latency.unwrap_or_default(),
            stats: Arc::new(StatsRecorder::new()),
            write_mode: self.write_mode,
            create_if_missing: self.create_if_missing,
        };
        for seed in self.seeds {
            match seed {
                Seed::File { path, data, mode } => fs.add_file(&path, data, mode)?,
                Seed::Dir { path, mode } => fs.add_dir(&path, mode)?,
            }
        }
        Ok(fs)
    }
}

impl fmt::Debug for MockFsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockFsBuilder")
            .field("write_mode", &self.write_mode)
            .field("create_if_missing", &self.create_if_missing)
            .field("seeds", &self.seeds.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
