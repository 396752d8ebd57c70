use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fieldcheck::scheduler::DebounceScheduler;

const TIMEOUT: Duration = Duration::from_millis(700);

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let reader = {
        let count = Arc::clone(&count);
        move || count.load(Ordering::SeqCst)
    };
    (count, reader)
}

#[tokio::test(start_paused = true)]
async fn test_job_fires_after_quiet_period() {
    let scheduler = DebounceScheduler::new(TIMEOUT);
    let (count, fired) = counter();

    scheduler.schedule("email", move || {
        count.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(scheduler.pending_count(), 1);

    tokio::time::sleep(Duration::from_millis(650)).await;
    assert_eq!(fired(), 0, "must not fire before the quiet period elapses");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(fired(), 1);
    assert_eq!(scheduler.pending_count(), 0, "fired timer removes its entry");
}

#[tokio::test(start_paused = true)]
async fn test_rapid_events_coalesce_into_one_run() {
    let scheduler = DebounceScheduler::new(TIMEOUT);
    let fired: Arc<std::sync::Mutex<Vec<&'static str>>> = Arc::default();

    // Three interactions, each within the quiet window of the previous.
    for tag in ["first", "second", "third"] {
        let fired = Arc::clone(&fired);
        scheduler.schedule("email", move || {
            if let Ok(mut fired) = fired.lock() {
                fired.push(tag);
            }
        });
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    tokio::time::sleep(TIMEOUT).await;
    let fired = fired.lock().unwrap();
    assert_eq!(*fired, vec!["third"], "only the last event survives");
}

#[tokio::test(start_paused = true)]
async fn test_fields_debounce_independently() {
    let scheduler = DebounceScheduler::new(TIMEOUT);
    let (count_a, fired_a) = counter();
    let (count_b, fired_b) = counter();

    scheduler.schedule("a", move || {
        count_a.fetch_add(1, Ordering::SeqCst);
    });
    tokio::time::sleep(Duration::from_millis(500)).await;

    // Interaction on b must not push back a's timer.
    scheduler.schedule("b", move || {
        count_b.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(scheduler.pending_count(), 2);

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(fired_a(), 1, "a fires on its own schedule");
    assert_eq!(fired_b(), 0);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(fired_b(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_all_prevents_firing() {
    let scheduler = DebounceScheduler::new(TIMEOUT);
    let (count, fired) = counter();

    scheduler.schedule("email", move || {
        count.fetch_add(1, Ordering::SeqCst);
    });
    scheduler.cancel_all();
    assert_eq!(scheduler.pending_count(), 0);

    tokio::time::sleep(TIMEOUT * 2).await;
    assert_eq!(fired(), 0, "a cancelled timer never fires");
}

#[tokio::test(start_paused = true)]
async fn test_cancel_single_field() {
    let scheduler = DebounceScheduler::new(TIMEOUT);
    let (count_a, fired_a) = counter();
    let (count_b, fired_b) = counter();

    scheduler.schedule("a", move || {
        count_a.fetch_add(1, Ordering::SeqCst);
    });
    scheduler.schedule("b", move || {
        count_b.fetch_add(1, Ordering::SeqCst);
    });

    assert!(scheduler.cancel("a"));
    assert!(!scheduler.cancel("a"), "already cancelled");

    tokio::time::sleep(TIMEOUT * 2).await;
    assert_eq!(fired_a(), 0);
    assert_eq!(fired_b(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_superseding_keeps_replacement_cancellable() {
    let scheduler = DebounceScheduler::new(TIMEOUT);
    let (count, fired) = counter();

    // Rapid supersede: the replacement must be the only visible entry,
    // and cancelling everything must silence it too.
    for _ in 0..3 {
        let count = Arc::clone(&count);
        scheduler.schedule("email", move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
    }
    assert_eq!(scheduler.pending_count(), 1);

    scheduler.cancel_all();
    assert_eq!(scheduler.pending_count(), 0);
    tokio::time::sleep(TIMEOUT * 2).await;
    assert_eq!(fired(), 0, "no superseded or replacement job may run");
}

#[tokio::test(start_paused = true)]
async fn test_rescheduling_after_fire_stays_tracked() {
    let scheduler = DebounceScheduler::new(TIMEOUT);
    let (count, fired) = counter();

    {
        let count = Arc::clone(&count);
        scheduler.schedule("email", move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
    }
    tokio::time::sleep(TIMEOUT + Duration::from_millis(50)).await;
    assert_eq!(fired(), 1);
    assert_eq!(scheduler.pending_count(), 0);

    // A fresh timer under the same key is bookkept and cancellable.
    scheduler.schedule("email", move || {
        count.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(scheduler.pending_count(), 1);
    assert!(scheduler.cancel("email"));
    tokio::time::sleep(TIMEOUT * 2).await;
    assert_eq!(fired(), 1, "the cancelled second timer never runs");
}

#[tokio::test(start_paused = true)]
async fn test_drop_aborts_pending_timers() {
    let (count, fired) = counter();
    {
        let scheduler = DebounceScheduler::new(TIMEOUT);
        scheduler.schedule("email", move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
    }
    tokio::time::sleep(TIMEOUT * 2).await;
    assert_eq!(fired(), 0);
}
