//! Property-based tests for the play queue
//!
//! Uses proptest to verify queue and fade invariants across many random inputs.

use chime_playback::{track_order, Fade, FadeTick, PlayQueue, QueueEntry, FADE_INTERVAL, QUEUE_CAPACITY};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

// ===== Property Tests =====

proptest! {
    /// Property: A folder order is always a permutation of 1..=count
    #[test]
    fn order_is_permutation(count in 0u8..=255, shuffle in any::<bool>(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order = track_order(count, shuffle, &mut rng);
        order.sort_unstable();
        prop_assert_eq!(order, (1..=count).collect::<Vec<u8>>());
    }

    /// Property: Without repeat, exactly `len` slots are filled and the rest are empty
    #[test]
    fn non_repeat_fill_ends_with_sentinels(folder in any::<u8>(), order in prop::collection::vec(1u8..=255, 1..300)) {
        let mut queue = PlayQueue::new();
        queue.fill_folder(folder, &order, false);

        let filled = order.len().min(QUEUE_CAPACITY);
        prop_assert_eq!(queue.playable_len(), filled);
        for (i, slot) in queue.entries().iter().enumerate() {
            if i < filled {
                prop_assert_eq!(*slot, Some(QueueEntry::new(folder, order[i])));
            } else {
                prop_assert_eq!(*slot, None);
            }
        }
    }

    /// Property: With repeat, every slot i holds order[i % len]
    #[test]
    fn repeat_fill_is_cyclic(folder in any::<u8>(), order in prop::collection::vec(1u8..=255, 1..40)) {
        let mut queue = PlayQueue::new();
        queue.fill_folder(folder, &order, true);

        prop_assert_eq!(queue.playable_len(), QUEUE_CAPACITY);
        for i in 0..QUEUE_CAPACITY {
            prop_assert_eq!(queue.get(i), Some(QueueEntry::new(folder, order[i % order.len()])));
        }
    }

    /// Property: The cursor stays in range no matter how often it advances
    #[test]
    fn cursor_stays_in_bounds(advances in 0usize..2000, repeat in any::<bool>()) {
        let mut queue = PlayQueue::new();
        queue.fill_single(QueueEntry::new(1, 1), repeat);

        for _ in 0..advances {
            queue.advance();
        }
        prop_assert!(queue.cursor() < QUEUE_CAPACITY);
        prop_assert_eq!(queue.cursor(), advances % QUEUE_CAPACITY);
    }

    /// Property: Any fade issues 31 levels within 0..=peak and ends at the right extreme
    #[test]
    fn fade_levels_bounded(peak in 0u8..=30, fade_in in any::<bool>()) {
        let start = Instant::now();
        let mut fade = if fade_in { Fade::fade_in(peak, start) } else { Fade::fade_out(peak, start) };

        let mut levels = Vec::new();
        let mut now = start;
        while let FadeTick::Step(level) = fade.poll(now) {
            levels.push(level);
            now += FADE_INTERVAL;
        }

        prop_assert_eq!(levels.len(), 31);
        prop_assert!(levels.iter().all(|&level| level <= peak));
        let (first, last) = if fade_in { (0, peak) } else { (peak, 0) };
        prop_assert_eq!(levels.first().copied(), Some(first));
        prop_assert_eq!(levels.last().copied(), Some(last));
    }
}
