use fermata::ErrorKind;
use fermata::thread::{Id, Thread};
use fermata::time::{Duration, Instant};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, mpsc};
use std::thread as std_thread;

#[test]
fn test_start_join_lifecycle() {
    let ran = Arc::new(AtomicBool::new(false));

    let mut t = Thread::new();
    assert!(!t.joinable());
    assert_eq!(t.id(), Id::NONE);

    let r = ran.clone();
    t.start(move || r.store(true, Ordering::SeqCst)).unwrap();
    assert!(t.joinable());
    assert!(t.id().is_some());

    t.join().unwrap();
    assert!(!t.joinable());
    assert_eq!(t.id(), Id::NONE);
    assert!(ran.load(Ordering::SeqCst));
}

#[test]
fn test_second_start_is_in_progress() {
    let (tx, rx) = mpsc::channel::<()>();

    let mut t = Thread::new();
    t.start(move || {
        // Park until the test is done asserting.
        let _ = rx.recv();
    })
    .unwrap();

    let err = t
        .start(|| {})
        .expect_err("starting an already-running thread");
    assert_eq!(err.kind(), ErrorKind::OperationInProgress);
    assert!(t.joinable(), "failed start must not disturb the handle");

    drop(tx);
    t.join().unwrap();
}

#[test]
fn test_join_without_start_is_invalid() {
    let mut t = Thread::new();
    let err = t.join().expect_err("joining an unstarted thread");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = t.detach().expect_err("detaching an unstarted thread");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_join_finished_thread_returns_promptly() {
    let mut t = Thread::new();
    t.start(|| {}).unwrap();

    // Give the thread ample time to finish before joining.
    std_thread::sleep(std::time::Duration::from_millis(50));

    t.join().unwrap();
    assert!(!t.joinable());
}

/// A thread that joins itself gets a deadlock error instead of hanging,
/// and the handle stays joinable for someone else to join.
#[test]
fn test_self_join_is_reported() {
    let slot: Arc<StdMutex<Option<Thread>>> = Arc::new(StdMutex::new(None));
    let (tx, rx) = mpsc::channel();

    let mut t = Thread::new();
    let shared = slot.clone();
    t.start(move || {
        // Wait until the main thread has parked our own handle in the slot.
        loop {
            let mut guard = shared.lock().unwrap();
            if let Some(this) = guard.as_mut() {
                tx.send(this.join().map_err(|e| e.kind())).unwrap();
                return;
            }
            drop(guard);
            std_thread::yield_now();
        }
    })
    .unwrap();

    *slot.lock().unwrap() = Some(t);

    let result = rx.recv().unwrap();
    assert_eq!(result, Err(ErrorKind::WouldDeadlock));

    let mut t = slot.lock().unwrap().take().unwrap();
    assert!(t.joinable(), "failed self-join must leave the handle intact");
    t.join().unwrap();
}

#[test]
fn test_detach_resets_handle() {
    let (tx, rx) = mpsc::channel::<()>();

    let mut t = Thread::new();
    t.start(move || {
        let _ = rx.recv();
    })
    .unwrap();

    t.detach().unwrap();
    assert!(!t.joinable());

    // The handle is reusable after detach.
    t.start(|| {}).unwrap();
    t.join().unwrap();

    drop(tx);
}

#[test]
#[should_panic(expected = "joinable")]
fn test_drop_while_joinable_panics() {
    let (tx, rx) = mpsc::channel::<()>();

    let mut t = Thread::new();
    t.start(move || {
        let _ = rx.recv();
    })
    .unwrap();

    // Keep the sender alive past the drop so the thread is still running.
    let _keep = tx;
    drop(t);
}

#[test]
fn test_current_id_is_stable_and_distinct() {
    let main_id = Thread::current_id();
    assert!(main_id.is_some());
    assert_eq!(main_id, Thread::current_id());

    let (tx, rx) = mpsc::channel();
    let mut t = Thread::new();
    t.start(move || {
        tx.send(Thread::current_id()).unwrap();
    })
    .unwrap();

    let child_id = rx.recv().unwrap();
    t.join().unwrap();
    assert_ne!(main_id, child_id);
}

#[test]
fn test_sleep_for_waits() {
    let start = Instant::now();
    Thread::sleep_for(Duration::from_millis(50)).unwrap();
    assert!(
        start.elapsed().as_secs_f64() >= 0.050,
        "sleep_for returned early"
    );
}

#[test]
fn test_degenerate_sleeps_return_immediately() {
    let start = Instant::now();
    Thread::sleep_for(Duration::from_secs_f64(-5.0)).unwrap();
    Thread::sleep_for(Duration::from_secs_f64(f64::NAN)).unwrap();
    Thread::sleep_for(Duration::ZERO).unwrap();
    assert!(
        start.elapsed().as_secs_f64() < 1.0,
        "degenerate durations must not sleep"
    );
}

#[test]
fn test_sleep_until_past_deadline_returns() {
    let deadline = Instant::now();
    Thread::sleep_for(Duration::from_millis(10)).unwrap();
    Thread::sleep_until(deadline).unwrap();
}

#[test]
fn test_sleep_until_waits_for_deadline() {
    let deadline = Instant::now() + Duration::from_millis(40);
    Thread::sleep_until(deadline).unwrap();
    assert!(Instant::now() >= deadline, "woke before the deadline");
}

#[test]
fn test_yield_now_returns() {
    Thread::yield_now();
}

#[test]
fn test_ids_are_ordered_and_hashable() {
    use std::collections::HashSet;

    let mut ids = HashSet::new();
    ids.insert(Id::NONE);
    ids.insert(Thread::current_id());
    assert_eq!(ids.len(), 2);

    assert!(Id::NONE < Thread::current_id() || Id::NONE > Thread::current_id());
}
