// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use std::time::Instant;

const DELAY: Duration = Duration::from_millis(60);

fn elapsed(f: impl FnOnce()) -> Duration {
    let start = Instant::now();
    f();
    start.elapsed()
}

#[test]
fn none_never_sleeps() {
    let sim = LatencySimulator::none();
    assert_eq!(sim.duration(Op::Read), None);
    let took = elapsed(|| sim.simulate(Op::Read, LatencyOptions::default()));
    assert!(took < DELAY, "took {took:?}");
}

#[test]
fn uniform_applies_to_every_operation() {
    let sim = LatencySimulator::uniform(DELAY);
    for op in [Op::Read, Op::Mkdir, Op::Close] {
        assert_eq!(sim.duration(op), Some(DELAY));
    }
    let took = elapsed(|| sim.simulate(Op::Seek, LatencyOptions::default()));
    assert!(took >= DELAY, "took {took:?}");
}

#[test]
fn per_op_skips_absent_operations() {
    let sim = LatencySimulator::per_op(HashMap::from([(Op::Read, DELAY)]));
    assert_eq!(sim.duration(Op::Read), Some(DELAY));
    assert_eq!(sim.duration(Op::Write), None);

    let took = elapsed(|| sim.simulate(Op::Write, LatencyOptions::default()));
    assert!(took < DELAY, "took {took:?}");
    let took = elapsed(|| sim.simulate(Op::Read, LatencyOptions::default()));
    assert!(took >= DELAY, "took {took:?}");
}

#[test]
fn zero_duration_returns_immediately() {
    let sim = LatencySimulator::uniform(Duration::ZERO);
    let took = elapsed(|| sim.simulate(Op::Read, LatencyOptions::default()));
    assert!(took < Duration::from_millis(20), "took {took:?}");
}

#[test]
fn once_sleeps_only_on_the_first_call() {
    let sim = LatencySimulator::uniform(DELAY);
    let opts = LatencyOptions { once: true, concurrent: false };

    let first = elapsed(|| sim.simulate(Op::Read, opts));
    assert!(first >= DELAY, "first took {first:?}");
    let second = elapsed(|| sim.simulate(Op::Read, opts));
    assert!(second < DELAY, "second took {second:?}");

    // a different operation still gets its first sleep
    let other = elapsed(|| sim.simulate(Op::Write, opts));
    assert!(other >= DELAY, "other took {other:?}");
}

#[test]
fn reset_rearms_once_mode() {
    let sim = LatencySimulator::uniform(DELAY);
    let opts = LatencyOptions { once: true, concurrent: false };

    sim.simulate(Op::Read, opts);
    sim.reset();
    let took = elapsed(|| sim.simulate(Op::Read, opts));
    assert!(took >= DELAY, "took {took:?}");
}

#[test]
fn clone_shares_durations_with_fresh_once_state() {
    let sim = LatencySimulator::uniform(DELAY);
    let opts = LatencyOptions { once: true, concurrent: false };
    sim.simulate(Op::Read, opts);

    let clone = sim.clone();
    assert_eq!(clone.duration(Op::Read), Some(DELAY));
    let took = elapsed(|| clone.simulate(Op::Read, opts));
    assert!(took >= DELAY, "took {took:?}");
}

#[test]
fn synchronous_sleeps_serialize() {
    let sim = Arc::new(LatencySimulator::uniform(DELAY));
    let took = elapsed(|| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let sim = Arc::clone(&sim);
                std::thread::spawn(move || sim.simulate(Op::Read, LatencyOptions::default()))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    });
    assert!(took >= DELAY * 2, "took {took:?}");
}

#[test]
fn concurrent_sleeps_overlap() {
    let sim = Arc::new(LatencySimulator::uniform(DELAY));
    let opts = LatencyOptions { once: false, concurrent: true };
    let took = elapsed(|| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let sim = Arc::clone(&sim);
                std::thread::spawn(move || sim.simulate(Op::Read, opts))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    });
    assert!(took < DELAY * 2, "took {took:?}");
}
