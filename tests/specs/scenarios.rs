//! End-to-end scenario specs.
//!
//! Each test walks one complete flow: seed a tree, script faults, run
//! the operations a consumer would, and check both the data and the
//! bookkeeping that came out.

use crate::prelude::*;

#[test]
fn read_file_from_seeded_tree() {
    let fs = seeded_fs();

    let content = fs.read_file("file.txt").unwrap();
    assert_eq!(content, b"hello world");
    assert_eq!(content.len(), 11);

    fs.stats().expect().count(Op::Open, 1).count(Op::Stat, 0).no_failures().assert();
}

#[test]
fn flaky_read_fails_once_then_recovers() {
    let (fs, injector) = fs_with_injector(&[("flaky.txt", b"data")]);
    injector.add_exact(
        Op::Read,
        "flaky.txt",
        ErrorKind::UnexpectedEof.into(),
        FireMode::Once,
        0,
    );

    let file = fs.open("flaky.txt").unwrap();
    let mut buf = [0u8; 16];

    let err = file.read(&mut buf).unwrap_err();
    assert_eq!(err, FsError::from(ErrorKind::UnexpectedEof));

    let n = file.read(&mut buf).unwrap();
    assert_eq!(n, 4);
    assert_eq!(&buf[..4], b"data");
}

#[test]
fn stream_breaks_after_three_reads() {
    let (fs, injector) = fs_with_injector(&[("stream.txt", b"123456789")]);
    injector.add_exact(Op::Read, "stream.txt", ErrorKind::Eof.into(), FireMode::AfterN, 3);

    let file = fs.open("stream.txt").unwrap();
    let mut byte = [0u8; 1];

    for expected in [b'1', b'2', b'3'] {
        assert_eq!(file.read(&mut byte).unwrap(), 1);
        assert_eq!(byte[0], expected);
    }
    let err = file.read(&mut byte).unwrap_err();
    assert_eq!(err, FsError::from(ErrorKind::Eof));

    file.stats()
        .expect()
        .count(Op::Read, 4)
        .failure(Op::Read, 1)
        .bytes_read(3)
        .assert();
}

#[test]
fn sub_view_inherits_glob_rules_relative_to_its_root() {
    let (fs, injector) = fs_with_injector(&[
        ("app/config/dev.json", b"{}"),
        ("app/config/prod.json", b"{}"),
    ]);
    injector
        .add_glob(
            Op::Read,
            "app/config/*.json",
            ErrorKind::Permission.into(),
            FireMode::Always,
            0,
        )
        .unwrap();

    let sub = fs.sub("app/config").unwrap();

    let err = sub.read_file("dev.json").unwrap_err();
    assert_eq!(err, FsError::from(ErrorKind::Permission));

    let escape = sub.read_file("../x").unwrap_err();
    assert_eq!(escape.kind(), ErrorKind::Invalid);
}

#[test]
fn marked_paths_report_not_exist_everywhere() {
    let fs = MockFs::builder()
        .file("exists.txt", b"here".to_vec(), FileMode::file(0o644))
        .file("deleted.txt", b"soon gone".to_vec(), FileMode::file(0o644))
        .build()
        .unwrap();

    fs.mark_non_existent(["deleted.txt"]).unwrap();

    assert!(fs.stat("exists.txt").is_ok());
    assert_eq!(fs.stat("deleted.txt").unwrap_err().kind(), ErrorKind::NotExist);
    assert_eq!(fs.open("deleted.txt").unwrap_err().kind(), ErrorKind::NotExist);
    assert_eq!(fs.read_file("deleted.txt").unwrap_err().kind(), ErrorKind::NotExist);
}

#[test]
fn injected_stat_rule_spares_other_paths() {
    let (fs, injector) =
        fs_with_injector(&[("exists.txt", b"x"), ("doomed.txt", b"y")]);
    injector.add_exact(
        Op::Stat,
        "doomed.txt",
        ErrorKind::NotExist.into(),
        FireMode::Always,
        0,
    );

    assert!(fs.stat("exists.txt").is_ok());
    assert_eq!(fs.stat("doomed.txt").unwrap_err().kind(), ErrorKind::NotExist);
    // the entry is still there; only stat is scripted to fail
    assert!(fs.read_file("doomed.txt").is_ok());
}

#[test]
fn write_file_versions_land_on_filesystem_stats() {
    let fs = MockFs::builder().create_if_missing(true).overwrite().build().unwrap();

    fs.write_file("a.txt", b"v1", FileMode::file(0o644)).unwrap();
    fs.write_file("a.txt", b"v2", FileMode::file(0o644)).unwrap();

    assert_eq!(fs.read_file("a.txt").unwrap(), b"v2");
    fs.stats().expect().count(Op::Write, 2).success(Op::Write, 2).assert();

    // the handle used by read_file kept its own books
    assert_eq!(fs.stats().snapshot().count(Op::Read), 0);
}
