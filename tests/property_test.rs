/*!
 * Queue Property Tests
 * Ordering and multiset properties over generated inputs
 */

use futures::FutureExt;
use playback_queue::PlaybackQueue;
use proptest::prelude::*;

fn filled(items: &[u16]) -> PlaybackQueue<u16> {
    let queue = PlaybackQueue::new();
    for item in items {
        queue.try_put(*item).unwrap();
    }
    queue
}

fn drain(queue: &PlaybackQueue<u16>) -> Vec<u16> {
    std::iter::from_fn(|| queue.try_get()).collect()
}

proptest! {
    #[test]
    fn prop_get_returns_put_order(items in prop::collection::vec(any::<u16>(), 0..64)) {
        let queue = filled(&items);
        let received: Vec<u16> = items
            .iter()
            .map(|_| queue.get().now_or_never().unwrap())
            .collect();
        prop_assert_eq!(received, items);
        prop_assert!(queue.is_empty());
    }

    #[test]
    fn prop_put_pos_matches_vec_insert(
        items in prop::collection::vec(any::<u16>(), 0..32),
        item in any::<u16>(),
        pos in 0usize..40,
    ) {
        let queue = filled(&items);
        // Unbounded put_pos completes on first poll
        let result = queue.put_pos(item, pos).now_or_never().unwrap();

        let mut expected = items.clone();
        if pos <= items.len() {
            prop_assert!(result.is_ok());
            expected.insert(pos, item);
        } else {
            prop_assert!(result.is_err());
        }
        prop_assert_eq!(drain(&queue), expected);
    }

    #[test]
    fn prop_empty_iff_zero_size(items in prop::collection::vec(any::<u16>(), 0..16)) {
        let queue = filled(&items);
        prop_assert_eq!(queue.is_empty(), queue.len() == 0);
        queue.clear();
        prop_assert!(queue.is_empty());
    }

    #[test]
    fn prop_reverse_twice_restores(items in prop::collection::vec(any::<u16>(), 0..64)) {
        let queue = filled(&items);
        queue.reverse();
        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(queue.snapshot(), reversed);
        queue.reverse();
        prop_assert_eq!(queue.snapshot(), items);
    }

    #[test]
    fn prop_shuffle_preserves_multiset(items in prop::collection::vec(0u16..8, 0..64)) {
        let queue = filled(&items);
        queue.shuffle();
        let mut shuffled = queue.snapshot();
        let mut original = items.clone();
        shuffled.sort_unstable();
        original.sort_unstable();
        prop_assert_eq!(shuffled, original);
    }

    #[test]
    fn prop_task_done_balances_puts(count in 0usize..32) {
        let queue = PlaybackQueue::new();
        for n in 0..count {
            queue.try_put(n as u16).unwrap();
        }
        for _ in 0..count {
            prop_assert!(queue.task_done().is_ok());
        }
        prop_assert!(queue.task_done().is_err());
        prop_assert_eq!(queue.unfinished(), 0);
    }
}
