use fermata::sync::{Guarded, LockGuard, Mutex, RecursiveMutex, SharedMutex};
use std::sync::Arc;
use std::thread;

#[test]
fn test_guard_scopes_the_lock() {
    let mutex = Arc::new(Mutex::new().unwrap());

    {
        let guard = LockGuard::new(&*mutex).unwrap();

        let m = mutex.clone();
        let contended = thread::spawn(move || m.try_lock().unwrap())
            .join()
            .unwrap();
        assert!(!contended, "guard is alive, the mutex must be held");

        // The guard exposes the lock for composition.
        let _lock_ref: &Mutex = guard.lock();
    }

    // Guard dropped: the mutex is free again.
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
    assert!(acquired, "guard dropped, the mutex must be free");
}

#[test]
fn test_guard_works_over_any_lock() {
    let recursive = RecursiveMutex::new().unwrap();
    {
        let _outer = LockGuard::new(&recursive).unwrap();
        let _inner = LockGuard::new(&recursive).unwrap();
    }

    let shared = SharedMutex::new().unwrap();
    {
        // A guard over a SharedMutex holds the writer side.
        let _guard = LockGuard::new(&shared).unwrap();
        assert!(!shared.try_lock_shared().unwrap());
    }
    assert!(shared.try_lock_shared().unwrap());
    shared.unlock_shared().unwrap();
}

#[test]
fn test_guarded_counter_across_threads() {
    let counter = Arc::new(Guarded::new(0u64).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let counter = counter.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let mut n = counter.lock().unwrap();
                    *n += 1;
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(*counter.lock().unwrap(), 8 * 500);
}

#[test]
fn test_guarded_try_lock() {
    let cell = Guarded::new(String::from("idle")).unwrap();

    let first = cell.try_lock().unwrap();
    assert!(first.is_some());

    // Exclusive ownership of the wrapper bypasses the lock entirely.
    drop(first);
    let mut cell = cell;
    cell.get_mut().push_str(" hands");
    assert_eq!(cell.into_inner(), "idle hands");
}

#[test]
fn test_guarded_over_custom_lock() {
    let lock = RecursiveMutex::new().unwrap();
    let slots = Guarded::with_lock(lock, vec![0u32; 4]);

    {
        let mut v = slots.lock().unwrap();
        v[2] = 7;
    }

    assert_eq!(slots.lock().unwrap()[2], 7);
}

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
mod spin {
    use fermata::sync::SpinLock;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_spinlock_excludes() {
        let lock = Arc::new(SpinLock::new().unwrap());
        let inside = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = lock.clone();
                let inside = inside.clone();
                let peak = peak.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        lock.lock().unwrap();
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        inside.fetch_sub(1, Ordering::SeqCst);
                        lock.unlock().unwrap();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_spinlock_try_lock() {
        let lock = SpinLock::new().unwrap();
        assert!(lock.try_lock().unwrap());
        assert!(!lock.try_lock().unwrap());
        lock.unlock().unwrap();
    }
}
