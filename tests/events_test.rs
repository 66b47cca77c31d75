/*!
 * Queue Event Tests
 * Change notifications broadcast to subscribers
 */

use playback_queue::{PlaybackQueue, QueueEvent};
use pretty_assertions::assert_eq;
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::test]
async fn test_events_follow_queue_changes() {
    let queue = PlaybackQueue::new();
    let mut events = queue.subscribe();

    queue.put("a").await;
    queue.put_pos("b", 0).await.unwrap();
    queue.reverse();
    assert_eq!(queue.get().await, "a");
    queue.task_done().unwrap();
    assert_eq!(queue.clear(), 1);
    queue.task_done().unwrap();

    let expected = vec![
        QueueEvent::Added { position: 0, len: 1 },
        QueueEvent::Added { position: 0, len: 2 },
        QueueEvent::Reordered,
        QueueEvent::Taken { position: 0, len: 1 },
        QueueEvent::Cleared { removed: 1 },
        QueueEvent::Drained,
    ];
    for event in expected {
        assert_eq!(events.recv().await.unwrap(), event);
    }
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_put_without_subscribers() {
    let queue = PlaybackQueue::new();
    queue.put(1).await;
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_event_serialization() {
    let json = serde_json::to_string(&QueueEvent::Added { position: 2, len: 3 }).unwrap();
    assert_eq!(json, r#"{"event":"added","position":2,"len":3}"#);
}
