//! Circular-Buffer Deque Implementation
//!
//! A double-ended queue over a single owned buffer of slots that is addressed
//! with wrap-around index arithmetic.
//!
//! ## Design
//!
//! The deque tracks two cursors into the buffer:
//! - `head`: the slot immediately before the first element
//! - `tail`: the slot immediately after the last element
//!
//! `add_first` writes at `head` and moves it back, `add_last` writes at `tail` and
//! moves it forward. Removal moves the cursor the other way and takes the value out
//! of the slot, leaving `None` behind so nothing is retained.
//!
//! ## Resizing
//!
//! - The buffer doubles when an insertion finds it full
//! - The buffer halves when a removal leaves it one quarter full, never below [`MIN_CAPACITY`]
//!
//! A resize moves the elements, in logical order, to the start of a fresh buffer and
//! resets `head` to the last slot and `tail` to the element count.
//!
//! ## Performance Characteristics
//!
//! - **add_first / add_last**: O(1) amortized
//! - **remove_first / remove_last**: O(1) amortized
//! - **iteration**: O(1) per element
//!
//! ## Example
//!
//! ```rust
//! use randeque::Deque;
//!
//! let mut deque: Deque<&str> = Deque::new();
//! deque.add_first("A")?;
//! deque.add_last("B")?;
//! assert_eq!(deque.remove_last()?, "B");
//! deque.add_first("C")?;
//! assert_eq!(deque.remove_last()?, "A");
//! # Ok::<(), randeque::Error>(())
//! ```

use crate::metrics::{ContainerMetrics, MetricsCollector, OperationStats};
use crate::{Error, Result};
use core::fmt;
use core::iter::FusedIterator;

/// Smallest number of slots the buffer ever holds
pub const MIN_CAPACITY: usize = 2;

fn empty_buffer<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

/// Element in a slot that lies between `head` and `tail`
#[inline]
fn live<T>(slot: &Option<T>, index: usize) -> &T {
    match slot {
        Some(item) => item,
        None => unreachable!("live slot {} holds no element", index),
    }
}

/// A double-ended queue backed by a resizable circular buffer
///
/// # Type Parameters
///
/// * `T` - The type of elements stored in the deque
///
/// # Examples
///
/// ```rust
/// use randeque::Deque;
///
/// let mut deque: Deque<i32> = Deque::new();
/// deque.add_last(1)?;
/// deque.add_first(0)?;
/// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
/// # Ok::<(), randeque::Error>(())
/// ```
#[derive(Clone)]
pub struct Deque<T> {
    // Slot storage, `None` marks an unused slot
    buffer: Box<[Option<T>]>,

    // Number of live elements
    len: usize,

    // Slot immediately before the first element
    head: usize,

    // Slot immediately after the last element
    tail: usize,

    stats: OperationStats,
}

impl<T> Deque<T> {
    /// Create an empty deque with [`MIN_CAPACITY`] slots
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randeque::Deque;
    ///
    /// let deque: Deque<i32> = Deque::new();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.capacity(), 2);
    /// ```
    pub fn new() -> Self {
        Self {
            buffer: empty_buffer(MIN_CAPACITY),
            len: 0,
            head: MIN_CAPACITY - 1,
            tail: 0,
            stats: OperationStats::default(),
        }
    }

    /// Check if the deque holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of elements in the deque
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Get the number of slots in the backing buffer
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Insert an element at the front
    ///
    /// # Arguments
    ///
    /// * `item` - The element, or `None` to signal an absent element
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the element was stored
    /// * `Err(Error::InvalidArgument)` if `item` was `None`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randeque::{Deque, Error};
    ///
    /// let mut deque: Deque<i32> = Deque::new();
    /// assert!(deque.add_first(42).is_ok());
    /// assert_eq!(deque.add_first(None), Err(Error::InvalidArgument));
    /// assert_eq!(deque.len(), 1);
    /// ```
    pub fn add_first<I>(&mut self, item: I) -> Result<()>
    where
        I: Into<Option<T>>,
    {
        let outcome = item
            .into()
            .ok_or(Error::InvalidArgument)
            .map(|item| self.push_front(item));
        self.stats.record(&outcome, self.len);
        outcome
    }

    /// Insert an element at the back
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the element was stored
    /// * `Err(Error::InvalidArgument)` if `item` was `None`
    pub fn add_last<I>(&mut self, item: I) -> Result<()>
    where
        I: Into<Option<T>>,
    {
        let outcome = item
            .into()
            .ok_or(Error::InvalidArgument)
            .map(|item| self.push_back(item));
        self.stats.record(&outcome, self.len);
        outcome
    }

    /// Remove and return the front element
    ///
    /// # Returns
    ///
    /// * `Ok(value)` with the former front element
    /// * `Err(Error::EmptyContainer)` if the deque is empty
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randeque::{Deque, Error};
    ///
    /// let mut deque: Deque<i32> = Deque::new();
    /// deque.add_last(1)?;
    /// deque.add_last(2)?;
    /// assert_eq!(deque.remove_first(), Ok(1));
    /// assert_eq!(deque.remove_first(), Ok(2));
    /// assert_eq!(deque.remove_first(), Err(Error::EmptyContainer));
    /// # Ok::<(), randeque::Error>(())
    /// ```
    pub fn remove_first(&mut self) -> Result<T> {
        let outcome = self.pop_front().ok_or(Error::EmptyContainer);
        self.stats.record(&outcome, self.len);
        outcome
    }

    /// Remove and return the back element
    ///
    /// # Returns
    ///
    /// * `Ok(value)` with the former back element
    /// * `Err(Error::EmptyContainer)` if the deque is empty
    pub fn remove_last(&mut self) -> Result<T> {
        let outcome = self.pop_back().ok_or(Error::EmptyContainer);
        self.stats.record(&outcome, self.len);
        outcome
    }

    /// Borrow the front element without removing it
    pub fn peek_first(&self) -> Result<&T> {
        let outcome = if self.is_empty() {
            Err(Error::EmptyContainer)
        } else {
            let index = self.slot(0);
            Ok(live(&self.buffer[index], index))
        };
        self.stats.record(&outcome, self.len);
        outcome
    }

    /// Borrow the back element without removing it
    pub fn peek_last(&self) -> Result<&T> {
        let outcome = if self.is_empty() {
            Err(Error::EmptyContainer)
        } else {
            let index = self.retreat(self.tail);
            Ok(live(&self.buffer[index], index))
        };
        self.stats.record(&outcome, self.len);
        outcome
    }

    /// Drop every element and return to [`MIN_CAPACITY`] slots
    pub fn clear(&mut self) {
        if self.capacity() > MIN_CAPACITY {
            self.stats.record_shrink();
        }
        self.buffer = empty_buffer(MIN_CAPACITY);
        self.len = 0;
        self.head = MIN_CAPACITY - 1;
        self.tail = 0;
        self.stats.record(&Ok::<(), Error>(()), 0);
    }

    /// Iterate from the first to the last element
    ///
    /// The iterator borrows the deque, so the deque cannot change while it is in use:
    ///
    /// ```compile_fail
    /// use randeque::Deque;
    ///
    /// let mut deque: Deque<u32> = Deque::new();
    /// deque.add_last(1).unwrap();
    /// let mut iter = deque.iter();
    /// deque.add_last(2).unwrap();
    /// iter.next();
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: &self.buffer,
            head: self.head,
            front: 0,
            back: self.len,
        }
    }

    /// Empty the slot of the element `offset` places after the front, leaving the
    /// bookkeeping untouched
    #[cfg(test)]
    pub(crate) fn vacate(&mut self, offset: usize) {
        let index = self.slot(offset);
        self.buffer[index] = None;
    }

    fn push_front(&mut self, item: T) {
        if self.len == self.capacity() {
            self.resize(2 * self.capacity());
        }
        self.buffer[self.head] = Some(item);
        self.head = self.retreat(self.head);
        self.len += 1;
    }

    fn push_back(&mut self, item: T) {
        if self.len == self.capacity() {
            self.resize(2 * self.capacity());
        }
        self.buffer[self.tail] = Some(item);
        self.tail = self.advance(self.tail);
        self.len += 1;
    }

    fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.advance(self.head);
        let item = match self.buffer[slot].take() {
            Some(item) => item,
            None => unreachable!("live slot {} holds no element", slot),
        };
        self.head = slot;
        self.len -= 1;
        self.settle_after_removal();
        Some(item)
    }

    fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.retreat(self.tail);
        let item = match self.buffer[slot].take() {
            Some(item) => item,
            None => unreachable!("live slot {} holds no element", slot),
        };
        self.tail = slot;
        self.len -= 1;
        self.settle_after_removal();
        Some(item)
    }

    fn settle_after_removal(&mut self) {
        let capacity = self.capacity();
        if self.len == 0 {
            self.head = capacity - 1;
            self.tail = 0;
        } else if self.len == capacity / 4 && capacity / 2 >= MIN_CAPACITY {
            self.resize(capacity / 2);
        }
    }

    /// Physical slot of the element `offset` places after the front
    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.head + 1 + offset) % self.capacity()
    }

    #[inline]
    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }

    #[inline]
    fn retreat(&self, index: usize) -> usize {
        (index + self.capacity() - 1) % self.capacity()
    }

    fn resize(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        let old_capacity = self.capacity();
        let mut buffer = empty_buffer(capacity);
        for (offset, dst) in buffer.iter_mut().take(self.len).enumerate() {
            let src = self.slot(offset);
            *dst = self.buffer[src].take();
        }
        self.buffer = buffer;
        self.head = capacity - 1;
        self.tail = self.len;

        if capacity > old_capacity {
            self.stats.record_grow();
        } else {
            self.stats.record_shrink();
        }
        log::trace!(
            "deque resized from {} to {} slots with {} elements",
            old_capacity,
            capacity,
            self.len
        );
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MetricsCollector for Deque<T> {
    fn metrics(&self) -> ContainerMetrics {
        self.stats.snapshot()
    }

    fn reset_metrics(&self) {
        self.stats.reset();
    }

    fn set_metrics_enabled(&self, enabled: bool) {
        self.stats.set_enabled(enabled);
    }

    fn is_metrics_enabled(&self) -> bool {
        self.stats.is_enabled()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Capacity and counters are not part of equality
impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
            self.stats.record(&Ok::<(), Error>(()), self.len);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Deque::new();
        deque.extend(iter);
        deque
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

/// Borrowing front-to-back iterator over a [`Deque`]
#[derive(Debug)]
pub struct Iter<'a, T> {
    buffer: &'a [Option<T>],
    head: usize,
    // Logical offsets still to be yielded: `front..back`
    front: usize,
    back: usize,
}

impl<T> Iter<'_, T> {
    /// Removal through the iterator is not supported
    ///
    /// # Returns
    ///
    /// Always `Err(Error::UnsupportedOperation)`; the deque is never touched.
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedOperation)
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer,
            head: self.head,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let buffer: &'a [Option<T>] = self.buffer;
        let index = (self.head + 1 + self.front) % buffer.len();
        self.front += 1;
        Some(live(&buffer[index], index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let buffer: &'a [Option<T>] = self.buffer;
        let index = (self.head + 1 + self.back) % buffer.len();
        Some(live(&buffer[index], index))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Consuming front-to-back iterator over a [`Deque`]
#[derive(Debug)]
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len, Some(self.deque.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
