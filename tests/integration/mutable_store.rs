//! Integration tests for the per-scope mutable value store

use scopecfg::Scope;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

fn incr(v: Option<usize>) -> usize {
    v.unwrap_or(0) + 1
}

#[test]
fn test_mutable_values() {
    let bump = |v: Option<i32>| match v {
        None => 0,
        Some(n) => n + 1,
    };

    let root = Scope::new();
    assert_eq!(root.get_set_mutable_value(false, bump), 0);
    assert_eq!(root.get_set_mutable_value(false, bump), 1);
    assert_eq!(root.get_set_mutable_value(true, bump), 0);
    assert_eq!(root.get_set_mutable_value(false, bump), 1);
    assert_eq!(root.mutable_value(0i32), 1);

    let one = root.child_of("one");
    assert_eq!(one.get_set_mutable_value(true, bump), 0);
    assert_eq!(one.get_set_mutable_value(false, bump), 1);
    assert_eq!(one.get_set_mutable_value(true, bump), 0);
    assert_eq!(root.mutable_value(0i32), 1);
}

#[test]
fn test_mutable_values_parallel() {
    const EVENTS: usize = 1_000_000;
    const WORKERS: usize = 10;

    let root = Scope::new();
    let remaining = AtomicUsize::new(EVENTS);

    thread::scope(|s| {
        for _ in 0..WORKERS {
            let root = root.clone();
            let remaining = &remaining;
            s.spawn(move || {
                while remaining
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok()
                {
                    root.get_set_mutable_value(false, incr);
                }
            });
        }
    });

    assert_eq!(root.mutable_value(0usize), EVENTS);
}

#[test]
fn test_contention_is_per_scope() {
    const OPS: usize = 100_000;

    let root = Scope::new();
    let scopes: Vec<Scope> = (0..4).map(|i| root.child_of(&format!("w{}", i))).collect();

    thread::scope(|s| {
        for scope in &scopes {
            for _ in 0..2 {
                s.spawn(move || {
                    for _ in 0..OPS {
                        scope.get_set_mutable_value(false, incr);
                    }
                });
            }
        }
    });

    for scope in &scopes {
        assert_eq!(scope.mutable_value(0usize), 2 * OPS);
    }
    assert_eq!(root.mutable_value(0usize), 0);
}
