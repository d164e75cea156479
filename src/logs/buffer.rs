//! Fixed-capacity FIFO buffer.

use std::collections::VecDeque;

/// A FIFO buffer that never grows past its capacity.
///
/// Pushing into a full buffer evicts the oldest item. Capacity is clamped
/// to at least 1 so a push always lands.
#[derive(Debug)]
pub struct BoundedBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedBuffer<T> {
    /// Create a buffer holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an item, evicting the oldest if the buffer is full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Remove and return all buffered items, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        self.items.drain(..).collect()
    }

    /// Drop all buffered items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate the buffered items, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
