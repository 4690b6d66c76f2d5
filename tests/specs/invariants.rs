//! Cross-component invariant specs.

use crate::prelude::*;

#[yare::parameterized(
    plain        = { "a/b.txt" },
    dot_prefix   = { "./a/b.txt" },
    double_slash = { "a//b.txt" },
    trailing     = { "a/b.txt/" },
    inner_dot    = { "a/./b.txt" },
)]
fn messy_variants_hit_the_same_rule_and_entry(raw: &str) {
    let (fs, injector) = fs_with_injector(&[("a/b.txt", b"content")]);
    injector.add_exact(Op::Stat, "a/b.txt", ErrorKind::Timeout.into(), FireMode::Always, 0);

    // the rule keyed on the cleaned form sees this variant too
    assert_eq!(fs.stat(raw).unwrap_err().kind(), ErrorKind::Timeout);
    // and the tree resolves it to the same entry
    assert_eq!(fs.read_file(raw).unwrap(), b"content");
}

#[test]
fn stats_totals_equal_per_op_sums() {
    let fs = seeded_fs();
    let _ = fs.stat("file.txt");
    let _ = fs.open("file.txt");
    let _ = fs.read_dir(".");
    let _ = fs.mkdir("d2", FileMode::dir(0o755));
    let _ = fs.rename("d2", "d3");
    let _ = fs.stat("missing");

    let snap = fs.stats().snapshot();
    let sum: i64 = Op::ALL.iter().map(|&op| snap.count(op)).sum();
    assert_eq!(snap.operations(), sum);
}

#[test]
fn byte_tallies_follow_successful_io_only() {
    let (fs, injector) = fs_with_injector(&[("f.txt", b"0123456789")]);
    injector.add_exact(Op::Read, "f.txt", ErrorKind::Corrupted.into(), FireMode::AfterN, 2);

    let file = fs.open("f.txt").unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(file.read(&mut buf).unwrap(), 4);
    assert_eq!(file.read(&mut buf).unwrap(), 4);
    assert!(file.read(&mut buf).is_err()); // injected: no bytes counted

    let snap = file.stats().snapshot();
    assert_eq!(snap.bytes_read(), 8);
    assert_eq!(snap.bytes_written(), 0);

    file.stats().reset();
    injector.add_exact(Op::Write, "f.txt", ErrorKind::Corrupted.into(), FireMode::Always, 0);
    assert_eq!(file.write(b"abcde").unwrap_err().kind(), ErrorKind::Corrupted);
    // the write never succeeded, so nothing was tallied
    assert_eq!(file.stats().snapshot().bytes_written(), 0);
}

#[test]
fn snapshots_stay_frozen_and_self_delta_is_zero() {
    let fs = seeded_fs();
    let _ = fs.stat("file.txt");

    let frozen = fs.stats().snapshot();
    let copy = frozen.clone();

    let _ = fs.stat("file.txt");
    let _ = fs.read_dir(".");

    assert_eq!(frozen, copy);
    assert_eq!(frozen.delta(&frozen), Snapshot::zero());
    assert_eq!(fs.stats().delta(&frozen).count(Op::Stat), 1);
}

#[test]
fn close_is_idempotent_toward_the_closed_error() {
    let fs = seeded_fs();
    let file = fs.open("file.txt").unwrap();

    file.close().unwrap();
    for _ in 0..3 {
        assert_eq!(file.close().unwrap_err().kind(), ErrorKind::Closed);
    }
}

#[test]
fn earlier_rules_keep_priority_over_later_ones() {
    let (fs, injector) = fs_with_injector(&[("f.txt", b"x")]);
    injector.add_exact(Op::Stat, "f.txt", ErrorKind::Timeout.into(), FireMode::Always, 0);
    injector.add_exact(Op::Stat, "f.txt", ErrorKind::Corrupted.into(), FireMode::Always, 0);
    injector.add_all(Op::Stat, ErrorKind::DiskFull.into(), FireMode::Always, 0);

    for _ in 0..5 {
        assert_eq!(fs.stat("f.txt").unwrap_err().kind(), ErrorKind::Timeout);
    }
}

#[test]
fn after_n_boundary_is_exact() {
    let (fs, injector) = fs_with_injector(&[("f.txt", b"x")]);
    injector.add_exact(Op::Stat, "f.txt", ErrorKind::Timeout.into(), FireMode::AfterN, 4);

    for i in 0..4 {
        assert!(fs.stat("f.txt").is_ok(), "call {i} should pass");
    }
    for i in 4..8 {
        assert!(fs.stat("f.txt").is_err(), "call {i} should fail");
    }
}

#[test]
fn next_n_fires_exactly_the_first_n() {
    let (fs, injector) = fs_with_injector(&[("f.txt", b"x")]);
    injector.add_exact(Op::Stat, "f.txt", ErrorKind::Timeout.into(), FireMode::NextN, 2);

    assert!(fs.stat("f.txt").is_err());
    assert!(fs.stat("f.txt").is_err());
    for _ in 0..4 {
        assert!(fs.stat("f.txt").is_ok());
    }
}

#[test]
fn sub_views_are_fully_isolated() {
    let (fs, injector) = fs_with_injector(&[
        ("data/keep.txt", b"keep"),
        ("data/nested/deep.txt", b"deep"),
        ("outside.txt", b"out"),
    ]);
    injector.add_exact(Op::Read, "data/keep.txt", ErrorKind::Timeout.into(), FireMode::Once, 0);

    let sub = fs.sub("data").unwrap();

    // injector clone: prefix-relative, fresh state
    assert_eq!(sub.read_file("keep.txt").unwrap_err().kind(), ErrorKind::Timeout);
    assert_eq!(sub.read_file("keep.txt").unwrap(), b"keep");
    assert_eq!(sub.read_file("nested/deep.txt").unwrap(), b"deep");
    assert!(!sub.contains("outside.txt"));

    // parent rule state was untouched by the sub's firing
    assert_eq!(fs.read_file("data/keep.txt").unwrap_err().kind(), ErrorKind::Timeout);

    // stats never bleed between the two
    assert_eq!(fs.stats().snapshot().count(Op::Open), 1);
    assert_eq!(sub.stats().snapshot().count(Op::Open), 3);

    // parent mutations after the copy do not reach the sub
    fs.remove_all("data/nested").unwrap();
    assert_eq!(sub.read_file("nested/deep.txt").unwrap(), b"deep");
}

#[test]
fn validation_failures_never_reach_rules_or_tree() {
    let (fs, injector) = fs_with_injector(&[("f.txt", b"x")]);
    injector.add_all_for_all_ops(ErrorKind::Corrupted.into(), FireMode::Always, 0);

    // invalid paths surface the validation error, not the injected one
    assert_eq!(fs.stat("../f.txt").unwrap_err().kind(), ErrorKind::Invalid);
    assert_eq!(fs.open("/f.txt").unwrap_err().kind(), ErrorKind::Invalid);
    assert_eq!(
        fs.write_file("", b"x", FileMode::file(0o644)).unwrap_err().kind(),
        ErrorKind::Invalid,
    );
}

#[test]
fn snapshots_serialize_for_fixture_comparison() {
    let fs = seeded_fs();
    let _ = fs.stat("file.txt");

    let json = serde_json::to_value(fs.stats().snapshot()).unwrap();
    assert_eq!(json["totals"][Op::Stat as usize], serde_json::json!(1));
    assert_eq!(json["bytes_read"], serde_json::json!(0));
}

#[test]
fn errors_carry_operation_and_caller_path() {
    let fs = seeded_fs();
    let err = fs.stat("missing/evidently").unwrap_err();
    assert_eq!(err.op(), Some(Op::Stat));
    assert_eq!(err.path(), Some("missing/evidently"));
    assert_eq!(err.to_string(), "Stat missing/evidently: file does not exist");
}
