//! Fixed-capacity play queue
//!
//! The queue is an arena of `QUEUE_CAPACITY` slots with a wrapping cursor.
//! An empty slot (`None`) marks the end of playback; with repeat enabled the
//! slots are filled cyclically so the cursor never reaches one.

use crate::types::QueueEntry;

/// Number of slots in the play queue
pub const QUEUE_CAPACITY: usize = 0x100;

/// Play queue with a wrapping cursor
///
/// Structure (folder of 3 tracks, repeat off):
/// ```text
/// cursor
///   ↓
/// [02/003] [02/001] [02/002] [ -- ] [ -- ] ... [ -- ]
/// ```
/// With repeat on, the same order continues cyclically through every slot.
#[derive(Debug, Clone)]
pub struct PlayQueue {
    /// Slots; `None` means "no more entries"
    entries: [Option<QueueEntry>; QUEUE_CAPACITY],

    /// Position of the entry currently playing
    cursor: usize,
}

impl PlayQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            entries: [None; QUEUE_CAPACITY],
            cursor: 0,
        }
    }

    /// Rebuild the queue around a single file
    ///
    /// Slot 0 holds the entry; the remaining slots repeat it when `repeat`
    /// is set and are empty otherwise.
    pub fn fill_single(&mut self, entry: QueueEntry, repeat: bool) {
        for (i, slot) in self.entries.iter_mut().enumerate() {
            *slot = (i == 0 || repeat).then_some(entry);
        }
        self.cursor = 0;
    }

    /// Rebuild the queue from a track order inside `folder`
    ///
    /// The order is laid out from slot 0 and, when `repeat` is set, repeated
    /// cyclically up to capacity. Slots at or beyond `order.len()` are empty
    /// otherwise. An order longer than the capacity is truncated.
    pub fn fill_folder(&mut self, folder: u8, order: &[u8], repeat: bool) {
        for (i, slot) in self.entries.iter_mut().enumerate() {
            *slot = if i < order.len() || (repeat && !order.is_empty()) {
                Some(QueueEntry::new(folder, order[i % order.len()]))
            } else {
                None
            };
        }
        self.cursor = 0;
    }

    /// Empty every slot and reset the cursor
    pub fn clear(&mut self) {
        self.entries = [None; QUEUE_CAPACITY];
        self.cursor = 0;
    }

    /// Entry under the cursor
    pub fn current(&self) -> Option<QueueEntry> {
        self.entries[self.cursor]
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor forward one slot, wrapping at capacity
    ///
    /// Returns the entry at the new position, or `None` when the queue is
    /// exhausted.
    pub fn advance(&mut self) -> Option<QueueEntry> {
        self.cursor = (self.cursor + 1) % QUEUE_CAPACITY;
        self.current()
    }

    /// Entry at a slot index
    pub fn get(&self, index: usize) -> Option<QueueEntry> {
        self.entries.get(index).copied().flatten()
    }

    /// All slots in order
    pub fn entries(&self) -> &[Option<QueueEntry>] {
        &self.entries
    }

    /// Number of occupied slots
    pub fn playable_len(&self) -> usize {
        self.entries.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check if no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}

impl Default for PlayQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_empty_queue() {
        let queue = PlayQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.current(), None);
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn single_file_without_repeat() {
        let mut queue = PlayQueue::new();
        queue.fill_single(QueueEntry::new(3, 7), false);

        assert_eq!(queue.playable_len(), 1);
        assert_eq!(queue.current(), Some(QueueEntry::new(3, 7)));
        assert!(queue.entries()[1..].iter().all(Option::is_none));
    }

    #[test]
    fn single_file_with_repeat_fills_every_slot() {
        let mut queue = PlayQueue::new();
        queue.fill_single(QueueEntry::new(3, 7), true);

        assert_eq!(queue.playable_len(), QUEUE_CAPACITY);
        assert!(queue
            .entries()
            .iter()
            .all(|slot| *slot == Some(QueueEntry::new(3, 7))));
    }

    #[test]
    fn folder_without_repeat_ends_after_order() {
        let mut queue = PlayQueue::new();
        queue.fill_folder(2, &[3, 1, 2], false);

        assert_eq!(queue.get(0), Some(QueueEntry::new(2, 3)));
        assert_eq!(queue.get(1), Some(QueueEntry::new(2, 1)));
        assert_eq!(queue.get(2), Some(QueueEntry::new(2, 2)));
        assert_eq!(queue.get(3), None);
        assert_eq!(queue.playable_len(), 3);
    }

    #[test]
    fn folder_with_repeat_is_cyclic() {
        let mut queue = PlayQueue::new();
        queue.fill_folder(2, &[3, 1, 2], true);

        assert_eq!(queue.playable_len(), QUEUE_CAPACITY);
        for i in 0..QUEUE_CAPACITY {
            let expected = [3, 1, 2][i % 3];
            assert_eq!(queue.get(i), Some(QueueEntry::new(2, expected)));
        }
    }

    #[test]
    fn empty_order_leaves_queue_empty() {
        let mut queue = PlayQueue::new();
        queue.fill_folder(2, &[], true);
        assert!(queue.is_empty());
    }

    #[test]
    fn advance_walks_and_reports_exhaustion() {
        let mut queue = PlayQueue::new();
        queue.fill_folder(1, &[1, 2], false);

        assert_eq!(queue.advance(), Some(QueueEntry::new(1, 2)));
        assert_eq!(queue.cursor(), 1);
        assert_eq!(queue.advance(), None);
        assert_eq!(queue.cursor(), 2);
    }

    #[test]
    fn advance_wraps_at_capacity() {
        let mut queue = PlayQueue::new();
        queue.fill_single(QueueEntry::new(1, 1), true);

        for _ in 0..QUEUE_CAPACITY - 1 {
            queue.advance();
        }
        assert_eq!(queue.cursor(), QUEUE_CAPACITY - 1);
        assert_eq!(queue.advance(), Some(QueueEntry::new(1, 1)));
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn rebuild_resets_cursor() {
        let mut queue = PlayQueue::new();
        queue.fill_folder(1, &[1, 2, 3], false);
        queue.advance();
        queue.advance();

        queue.fill_single(QueueEntry::new(4, 4), false);
        assert_eq!(queue.cursor(), 0);
        assert_eq!(queue.current(), Some(QueueEntry::new(4, 4)));
    }

    #[test]
    fn clear_queue() {
        let mut queue = PlayQueue::new();
        queue.fill_folder(1, &[1, 2, 3], true);
        queue.advance();

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), 0);
    }
}
