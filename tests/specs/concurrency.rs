//! Concurrency specs: rule state and counters under parallel callers.

use crate::prelude::*;
use std::thread;

#[test]
fn once_rule_fires_for_exactly_one_concurrent_caller() {
    let (fs, injector) = fs_with_injector(&[("hot.txt", b"contended")]);
    injector.add_exact(Op::Stat, "hot.txt", ErrorKind::Timeout.into(), FireMode::Once, 0);
    let fs = Arc::new(fs);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || (0..50).filter(|_| fs.stat("hot.txt").is_err()).count())
        })
        .collect();
    let failures: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(failures, 1);
    let snap = fs.stats().snapshot();
    assert_eq!(snap.count(Op::Stat), 400);
    assert_eq!(snap.count_failure(Op::Stat), 1);
}

#[test]
fn after_n_spares_exactly_n_concurrent_calls() {
    let (fs, injector) = fs_with_injector(&[("hot.txt", b"x")]);
    injector.add_exact(Op::Stat, "hot.txt", ErrorKind::Timeout.into(), FireMode::AfterN, 25);
    let fs = Arc::new(fs);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || (0..10).filter(|_| fs.stat("hot.txt").is_ok()).count())
        })
        .collect();
    let passed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(passed, 25);
}

#[test]
fn filesystem_counters_survive_parallel_load() {
    let fs = Arc::new(seeded_fs());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || {
                for j in 0..200 {
                    let _ = fs.stat("file.txt");
                    if (i + j) % 2 == 0 {
                        let _ = fs.read_dir(".");
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snap = fs.stats().snapshot();
    assert_eq!(snap.count(Op::Stat), 1600);
    assert_eq!(snap.count(Op::Stat) + snap.count(Op::ReadDir), snap.operations());
}

#[test]
fn handles_operate_independently_across_threads() {
    let fs = Arc::new(seeded_fs());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || {
                let file = fs.open("file.txt").unwrap();
                let mut buf = [0u8; 11];
                assert_eq!(file.read(&mut buf).unwrap(), 11);
                assert_eq!(&buf, b"hello world");
                file.close().unwrap();
                file.stats().snapshot()
            })
        })
        .collect();

    for h in handles {
        let snap = h.join().unwrap();
        // each handle saw exactly its own read and close
        assert_eq!(snap.count(Op::Read), 1);
        assert_eq!(snap.count(Op::Close), 1);
        assert_eq!(snap.bytes_read(), 11);
    }
    assert_eq!(fs.stats().snapshot().count(Op::Open), 4);
}

#[test]
fn one_handle_serializes_its_own_operations() {
    let fs = Arc::new(seeded_fs());
    let file = Arc::new(fs.open("file.txt").unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let file = Arc::clone(&file);
            thread::spawn(move || {
                for _ in 0..100 {
                    let mut buf = [0u8; 3];
                    let _ = file.read(&mut buf);
                    let _ = file.seek(std::io::SeekFrom::Start(0));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // every attempt is accounted for, none lost to races
    let snap = file.stats().snapshot();
    assert_eq!(snap.count(Op::Read), 400);
    assert_eq!(snap.count(Op::Seek), 400);
}

#[test]
fn injector_reconfiguration_reaches_running_threads() {
    let (fs, injector) = fs_with_injector(&[("f.txt", b"x")]);
    let fs = Arc::new(fs);

    // no rules yet: everything passes
    assert!(fs.stat("f.txt").is_ok());

    let worker = {
        let fs = Arc::clone(&fs);
        thread::spawn(move || {
            // spin until the rule added below starts firing
            for _ in 0..10_000 {
                if fs.stat("f.txt").is_err() {
                    return true;
                }
                thread::yield_now();
            }
            false
        })
    };

    injector.add_exact(Op::Stat, "f.txt", ErrorKind::Timeout.into(), FireMode::Always, 0);
    assert!(worker.join().unwrap(), "the new rule never fired");
}
