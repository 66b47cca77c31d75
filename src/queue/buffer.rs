/*!
 * Ordered Buffer
 * Backing sequence of queued items with positional access
 */

use crate::core::errors::{QueueError, QueueResult};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Ordered item storage
///
/// Front of the deque is the next item to be taken. Nothing here suspends.
#[derive(Debug, Clone)]
pub struct OrderedBuffer<T> {
    items: VecDeque<T>,
}

impl<T> OrderedBuffer<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    pub fn reverse(&mut self) {
        self.items.make_contiguous().reverse();
    }

    /// Uniform random permutation using the thread-local RNG
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Uniform random permutation using a caller-supplied RNG
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.items.make_contiguous().shuffle(rng);
    }

    pub fn append(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Insert so that the item ends up at `pos`
    ///
    /// `pos == len()` appends; anything larger is rejected.
    pub fn insert(&mut self, pos: usize, item: T) -> QueueResult<()> {
        self.check_insert(pos)?;
        self.items.insert(pos, item);
        Ok(())
    }

    /// Validate an insert position without mutating
    pub fn check_insert(&self, pos: usize) -> QueueResult<()> {
        if pos > self.items.len() {
            return Err(QueueError::IndexOutOfRange {
                pos,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn pop_at(&mut self, pos: usize) -> QueueResult<T> {
        let len = self.items.len();
        self.items
            .remove(pos)
            .ok_or(QueueError::IndexOutOfRange { pos, len })
    }

    pub fn get(&self, pos: usize) -> Option<&T> {
        self.items.get(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for OrderedBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn buffer_of(items: &[u32]) -> OrderedBuffer<u32> {
        let mut buffer = OrderedBuffer::new();
        for item in items {
            buffer.append(*item);
        }
        buffer
    }

    fn contents(buffer: &OrderedBuffer<u32>) -> Vec<u32> {
        buffer.iter().copied().collect()
    }

    #[test]
    fn test_insert_positions() {
        let mut buffer = buffer_of(&[1, 2]);
        buffer.insert(1, 9).unwrap();
        buffer.insert(3, 7).unwrap();
        buffer.insert(0, 0).unwrap();
        assert_eq!(contents(&buffer), vec![0, 1, 9, 2, 7]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut buffer = buffer_of(&[1]);
        assert_eq!(
            buffer.insert(3, 5),
            Err(QueueError::IndexOutOfRange { pos: 3, len: 1 })
        );
        assert_eq!(contents(&buffer), vec![1]);
    }

    #[test]
    fn test_pop_at() {
        let mut buffer = buffer_of(&[1, 2, 3]);
        assert_eq!(buffer.pop_at(1), Ok(2));
        assert_eq!(buffer.pop_at(5), Err(QueueError::IndexOutOfRange { pos: 5, len: 2 }));
        assert_eq!(buffer.pop_front(), Some(1));
    }

    #[test]
    fn test_clear_reports_removed() {
        let mut buffer = buffer_of(&[1, 2, 3]);
        assert_eq!(buffer.clear(), 3);
        assert!(buffer.is_empty());
        assert_eq!(buffer.clear(), 0);
    }

    #[test]
    fn test_reverse_after_wraparound() {
        // Pop then push so the deque storage wraps
        let mut buffer = buffer_of(&[1, 2, 3]);
        buffer.pop_front();
        buffer.append(4);
        buffer.reverse();
        assert_eq!(contents(&buffer), vec![4, 3, 2]);
    }

    #[test]
    fn test_shuffle_with_seed_is_permutation() {
        let mut buffer = buffer_of(&[1, 2, 3, 4, 5, 6, 7, 8]);
        buffer.shuffle_with(&mut StdRng::seed_from_u64(7));
        let mut shuffled = contents(&buffer);
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
