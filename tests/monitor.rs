use fermata::sync::{ConditionMutex, ConditionVariable, Mutex};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_wait_wakes_on_notify() {
    let mutex = Arc::new(Mutex::new().unwrap());
    let cond = Arc::new(ConditionVariable::new().unwrap());
    let ready = Arc::new(AtomicBool::new(false));
    let (waiting_tx, waiting_rx) = mpsc::channel();

    let m = mutex.clone();
    let c = cond.clone();
    let r = ready.clone();
    let waiter = thread::spawn(move || {
        m.lock().unwrap();
        waiting_tx.send(()).unwrap();
        // Spurious wakeups pass through; loop on the condition.
        while !r.load(Ordering::SeqCst) {
            c.wait(&m).unwrap();
        }
        m.unlock().unwrap();
    });

    waiting_rx.recv().unwrap();
    thread::sleep(Duration::from_millis(20));

    mutex.lock().unwrap();
    ready.store(true, Ordering::SeqCst);
    cond.notify_one().unwrap();
    mutex.unlock().unwrap();

    waiter.join().unwrap();
}

#[test]
fn test_notify_all_releases_every_waiter() {
    let mutex = Arc::new(Mutex::new().unwrap());
    let cond = Arc::new(ConditionVariable::new().unwrap());
    let ready = Arc::new(AtomicBool::new(false));
    let woken = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let m = mutex.clone();
            let c = cond.clone();
            let r = ready.clone();
            let woken = woken.clone();
            thread::spawn(move || {
                m.lock().unwrap();
                while !r.load(Ordering::SeqCst) {
                    c.wait(&m).unwrap();
                }
                woken.fetch_add(1, Ordering::SeqCst);
                m.unlock().unwrap();
            })
        })
        .collect();

    // Give every waiter time to park.
    thread::sleep(Duration::from_millis(50));

    mutex.lock().unwrap();
    ready.store(true, Ordering::SeqCst);
    cond.notify_all().unwrap();
    mutex.unlock().unwrap();

    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(woken.load(Ordering::SeqCst), 4);
}

/// A thread blocked on a false predicate is released only after another
/// thread flips the guarded state and unlocks.
#[test]
fn test_lock_when_waits_for_predicate() {
    let monitor = Arc::new(ConditionMutex::new().unwrap());
    let flag = Arc::new(AtomicBool::new(false));

    let mon = monitor.clone();
    let f = flag.clone();
    let started = Instant::now();
    let waiter = thread::spawn(move || {
        mon.lock_when(|| f.load(Ordering::SeqCst)).unwrap();
        let woke_after = started.elapsed();
        mon.unlock().unwrap();
        woke_after
    });

    thread::sleep(Duration::from_millis(50));

    monitor.lock().unwrap();
    flag.store(true, Ordering::SeqCst);
    // Unlock broadcasts to all waiters; no explicit notify needed.
    monitor.unlock().unwrap();

    let woke_after = waiter.join().unwrap();
    assert!(
        woke_after >= Duration::from_millis(50),
        "waiter returned before the predicate was made true"
    );
    assert!(flag.load(Ordering::SeqCst));
}

#[test]
fn test_lock_when_with_true_predicate_does_not_block() {
    let monitor = ConditionMutex::new().unwrap();
    monitor.lock_when(|| true).unwrap();
    monitor.unlock().unwrap();
}

#[test]
fn test_wait_until_holds_lock_on_return() {
    let monitor = Arc::new(ConditionMutex::new().unwrap());
    let flag = Arc::new(AtomicBool::new(false));

    let mon = monitor.clone();
    let f = flag.clone();
    let waiter = thread::spawn(move || {
        mon.lock().unwrap();
        mon.wait_until(|| f.load(Ordering::SeqCst)).unwrap();
        // Still holding: a try_lock from another thread must fail.
        let probe = mon.clone();
        let held = thread::spawn(move || !probe.try_lock().unwrap())
            .join()
            .unwrap();
        mon.unlock().unwrap();
        held
    });

    thread::sleep(Duration::from_millis(30));
    monitor.lock().unwrap();
    flag.store(true, Ordering::SeqCst);
    monitor.unlock().unwrap();

    assert!(
        waiter.join().unwrap(),
        "wait_until returned without the lock held"
    );
}
