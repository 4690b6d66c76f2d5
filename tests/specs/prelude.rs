//! Shared imports and helpers for the spec suite.

pub use faultfs::{
    ErrorInjector, ErrorKind, FileMode, FireMode, FsError, Inject, MockFs, Op, Snapshot,
    StatsRecorder,
};
pub use std::sync::Arc;

/// The library's own sample tree: `file.txt`, `dir/`, `dir/nested.txt`.
pub fn seeded_fs() -> MockFs {
    faultfs::test_support::sample_fs()
}

/// A filesystem sharing the returned injector.
pub fn fs_with_injector(seed: &[(&str, &[u8])]) -> (MockFs, Arc<ErrorInjector>) {
    let injector = Arc::new(ErrorInjector::new());
    let mut builder = MockFs::builder().error_injector(Arc::clone(&injector) as Arc<dyn Inject>);
    for (path, data) in seed {
        builder = builder.file(*path, data.to_vec(), FileMode::file(0o644));
    }
    (builder.build().unwrap(), injector)
}
