// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! faultfs: an in-memory filesystem whose failures you control.
//!
//! Test suites point code at a [`MockFs`] and script its behavior: which
//! operations fail, on which paths, how often, and how slowly. The tree,
//! per-operation statistics, and injected faults are all programmable.
//!
//! ```
//! use std::sync::Arc;
//! use faultfs::{ErrorInjector, ErrorKind, FileMode, FireMode, Inject, MockFs, Op};
//!
//! # fn main() -> Result<(), faultfs::FsError> {
//! let injector = Arc::new(ErrorInjector::new());
//! injector.add_exact(
//!     Op::Read,
//!     "flaky.txt",
//!     ErrorKind::UnexpectedEof.into(),
//!     FireMode::Once,
//!     0,
//! );
//!
//! let fs = MockFs::builder()
//!     .file("flaky.txt", b"data".to_vec(), FileMode::file(0o644))
//!     .error_injector(injector)
//!     .build()?;
//!
//! // the first read fails, the retry succeeds
//! assert!(fs.read_file("flaky.txt").is_err());
//! assert_eq!(fs.read_file("flaky.txt")?, b"data");
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod error;
pub mod file;
pub mod fs;
pub mod injector;
pub mod latency;
pub mod matcher;
pub mod op;
pub mod path;
pub mod rule;
pub mod stats;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use entry::{DirEntry, FileInfo, FileMode};
pub use error::{ErrorKind, FsError};
pub use file::{paginate, MockFile, MockFileBuilder, ReadDirFn, WriteMode};
pub use fs::{MockFs, MockFsBuilder};
pub use injector::{ErrorInjector, Inject};
pub use latency::{LatencyOptions, LatencySimulator};
pub use matcher::{PathMatcher, PatternError};
pub use op::{InvalidOp, Op};
pub use rule::{FireMode, Rule};
pub use stats::{
    Expect, Expectations, FailureReporter, InvalidCounts, Snapshot, StatsRecorder,
};
