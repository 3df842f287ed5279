use fermata::ErrorKind;
use fermata::sync::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_lock_unlock_roundtrip() {
    let m = Mutex::new().unwrap();
    m.lock().unwrap();
    m.unlock().unwrap();
}

#[test]
fn test_mutual_exclusion_under_contention() {
    let mutex = Arc::new(Mutex::new().unwrap());
    let inside = Arc::new(AtomicUsize::new(0));
    let max_inside = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let mutex = mutex.clone();
            let inside = inside.clone();
            let max_inside = max_inside.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    mutex.lock().unwrap();
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    inside.fetch_sub(1, Ordering::SeqCst);
                    mutex.unlock().unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(
        max_inside.load(Ordering::SeqCst),
        1,
        "More than one thread was inside the critical section"
    );
}

#[test]
fn test_try_lock_reports_contention() {
    let mutex = Arc::new(Mutex::new().unwrap());
    mutex.lock().unwrap();

    let m = mutex.clone();
    let contended = thread::spawn(move || m.try_lock().unwrap())
        .join()
        .unwrap();
    assert!(!contended, "try_lock should fail while the mutex is held");

    mutex.unlock().unwrap();

    assert!(mutex.try_lock().unwrap());
    mutex.unlock().unwrap();
}

#[test]
fn test_relock_by_owner_is_reported() {
    let m = Mutex::new().unwrap();
    m.lock().unwrap();

    let err = m.lock().expect_err("re-locking a held error-checking mutex");
    assert_eq!(err.kind(), ErrorKind::WouldDeadlock);

    m.unlock().unwrap();
}

#[test]
fn test_unlock_by_non_owner_is_reported() {
    let mutex = Arc::new(Mutex::new().unwrap());
    mutex.lock().unwrap();

    let m = mutex.clone();
    let err = thread::spawn(move || m.unlock())
        .join()
        .unwrap()
        .expect_err("unlocking from a thread that does not hold the mutex");
    assert_eq!(err.kind(), ErrorKind::NotOwner);

    mutex.unlock().unwrap();
}

#[test]
fn test_unlock_without_lock_is_reported() {
    let m = Mutex::new().unwrap();
    assert!(m.unlock().is_err(), "unlocking an unheld mutex must fail");
}

/// Thread A locks, sleeps, unlocks; thread B's lock must not return until
/// A has released.
#[test]
fn test_blocked_lock_waits_for_release() {
    let mutex = Arc::new(Mutex::new().unwrap());
    let (locked_tx, locked_rx) = mpsc::channel();

    let m = mutex.clone();
    let a = thread::spawn(move || {
        m.lock().unwrap();
        locked_tx.send(()).unwrap();
        thread::sleep(Duration::from_millis(50));
        let released_at = Instant::now();
        m.unlock().unwrap();
        released_at
    });

    // B only starts locking once A definitely holds the mutex.
    locked_rx.recv().unwrap();

    let m = mutex.clone();
    let b = thread::spawn(move || {
        m.lock().unwrap();
        let acquired_at = Instant::now();
        m.unlock().unwrap();
        acquired_at
    });

    let released_at = a.join().unwrap();
    let acquired_at = b.join().unwrap();

    assert!(
        acquired_at >= released_at,
        "B acquired the mutex before A released it"
    );
}
