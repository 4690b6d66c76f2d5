// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::entry::FileMode;
use crate::fs::MockFs;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for paths.
pub mod strategies {
    use proptest::prelude::*;

    /// A single path segment that survives cleaning unchanged.
    pub fn arb_segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,7}(\\.[a-z]{1,3})?"
    }

    /// A raw path decorated with redundant slashes and dot segments,
    /// paired with its expected cleaned form.
    pub fn arb_messy_path() -> impl Strategy<Value = (String, String)> {
        (
            prop::collection::vec(arb_segment(), 1..5),
            prop::collection::vec(0u8..3, 1..5),
            any::<bool>(),
        )
            .prop_map(|(segments, decorations, trailing)| {
                let cleaned = segments.join("/");
                let mut raw = String::new();
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        raw.push('/');
                    }
                    match decorations.get(i).copied().unwrap_or(0) {
                        1 => raw.push_str("./"),
                        2 if i > 0 => raw.push('/'),
                        _ => {}
                    }
                    raw.push_str(segment);
                }
                if trailing {
                    raw.push('/');
                }
                (raw, cleaned)
            })
    }
}

// ── Filesystem factories ────────────────────────────────────────────────

/// A small seeded filesystem shared by unit and spec tests.
pub fn sample_fs() -> MockFs {
    match MockFs::builder()
        .file("file.txt", b"hello world".to_vec(), FileMode::file(0o644))
        .dir("dir", FileMode::dir(0o755))
        .file("dir/nested.txt", b"nested".to_vec(), FileMode::file(0o644))
        .build()
    {
        Ok(fs) => fs,
        Err(err) => unreachable!("sample tree seeds are valid: {err}"),
    }
}
