use fermata::sync::{Policy, SharedMutex};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[test]
fn test_readers_share() {
    let lock = Arc::new(SharedMutex::new().unwrap());
    let concurrent = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lock = lock.clone();
            let concurrent = concurrent.clone();
            let peak = peak.clone();
            thread::spawn(move || {
                lock.lock_shared().unwrap();
                let now = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(20));
                concurrent.fetch_sub(1, Ordering::SeqCst);
                lock.unlock_shared().unwrap();
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert!(
        peak.load(Ordering::SeqCst) > 1,
        "shared acquisitions never overlapped; readers are not sharing"
    );
}

#[test]
fn test_writer_excludes_readers_and_writers() {
    let lock = Arc::new(SharedMutex::new().unwrap());
    let readers = Arc::new(AtomicUsize::new(0));
    let writer_active = Arc::new(AtomicBool::new(false));

    let mut handles = Vec::new();

    for _ in 0..3 {
        let lock = lock.clone();
        let readers = readers.clone();
        let writer_active = writer_active.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                lock.lock_shared().unwrap();
                readers.fetch_add(1, Ordering::SeqCst);
                assert!(
                    !writer_active.load(Ordering::SeqCst),
                    "reader observed an active writer"
                );
                readers.fetch_sub(1, Ordering::SeqCst);
                lock.unlock_shared().unwrap();
            }
        }));
    }

    for _ in 0..2 {
        let lock = lock.clone();
        let readers = readers.clone();
        let writer_active = writer_active.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                lock.lock().unwrap();
                assert!(
                    !writer_active.swap(true, Ordering::SeqCst),
                    "two writers active at once"
                );
                assert_eq!(
                    readers.load(Ordering::SeqCst),
                    0,
                    "writer active while readers hold the lock"
                );
                writer_active.store(false, Ordering::SeqCst);
                lock.unlock().unwrap();
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }
}

/// A writer blocked behind readers only proceeds once every shared holder
/// has released.
#[test]
fn test_writer_waits_for_readers() {
    let lock = Arc::new(SharedMutex::new().unwrap());
    let readers_done = Arc::new(AtomicBool::new(false));
    let (reading_tx, reading_rx) = mpsc::channel();

    let mut readers = Vec::new();
    for _ in 0..2 {
        let lock = lock.clone();
        let readers_done = readers_done.clone();
        let reading_tx = reading_tx.clone();
        readers.push(thread::spawn(move || {
            lock.lock_shared().unwrap();
            reading_tx.send(()).unwrap();
            thread::sleep(Duration::from_millis(50));
            readers_done.store(true, Ordering::SeqCst);
            lock.unlock_shared().unwrap();
        }));
    }

    // Wait until both readers hold the lock before the writer tries.
    reading_rx.recv().unwrap();
    reading_rx.recv().unwrap();

    let l = lock.clone();
    let done = readers_done.clone();
    let writer = thread::spawn(move || {
        l.lock().unwrap();
        let saw_readers_done = done.load(Ordering::SeqCst);
        l.unlock().unwrap();
        saw_readers_done
    });

    for r in readers {
        r.join().unwrap();
    }
    assert!(
        writer.join().unwrap(),
        "writer acquired the lock before the readers released it"
    );
}

#[test]
fn test_try_variants_respect_holders() {
    let lock = SharedMutex::with_policy(Policy::PreferWriters).unwrap();

    lock.lock_shared().unwrap();
    // Shared and exclusive attempts against a read-held lock.
    assert!(!lock.try_lock().unwrap());
    lock.unlock_shared().unwrap();

    lock.lock().unwrap();
    assert!(!lock.try_lock_shared().unwrap());
    lock.unlock().unwrap();

    assert!(lock.try_lock_shared().unwrap());
    lock.unlock_shared().unwrap();
}
