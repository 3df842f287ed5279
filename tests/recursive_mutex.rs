use fermata::sync::RecursiveMutex;
use std::sync::Arc;
use std::thread;

#[test]
fn test_owner_can_relock() {
    let m = RecursiveMutex::new().unwrap();

    for _ in 0..5 {
        m.lock().unwrap();
    }
    for _ in 0..5 {
        m.unlock().unwrap();
    }
}

/// Locked k times and unlocked k-1 times the mutex is still held; only the
/// k-th unlock frees it for another thread.
#[test]
fn test_depth_must_return_to_zero() {
    let mutex = Arc::new(RecursiveMutex::new().unwrap());

    const DEPTH: usize = 4;
    for _ in 0..DEPTH {
        mutex.lock().unwrap();
    }
    for _ in 0..DEPTH - 1 {
        mutex.unlock().unwrap();
    }

    let m = mutex.clone();
    let contended = thread::spawn(move || m.try_lock().unwrap())
        .join()
        .unwrap();
    assert!(
        !contended,
        "mutex must still be held after {} unlocks of {} locks",
        DEPTH - 1,
        DEPTH
    );

    mutex.unlock().unwrap();

    let m = mutex.clone();
    let acquired = thread::spawn(move || {
        let acquired = m.try_lock().unwrap();
        if acquired {
            m.unlock().unwrap();
        }
        acquired
    })
    .join()
    .unwrap();
    assert!(acquired, "mutex must be free after the final unlock");
}

#[test]
fn test_threads_still_exclude_each_other() {
    let mutex = Arc::new(RecursiveMutex::new().unwrap());
    mutex.lock().unwrap();

    let m = mutex.clone();
    let contended = thread::spawn(move || m.try_lock().unwrap())
        .join()
        .unwrap();
    assert!(!contended, "another thread acquired a held recursive mutex");

    mutex.unlock().unwrap();
}
