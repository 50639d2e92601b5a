//! Randomized Queue Implementation
//!
//! A multiset that hands its elements back in uniformly random order.
//!
//! ## Design
//!
//! Elements live in a singly linked chain of nodes, appended at the tail. Nodes are
//! kept in a slot arena and linked by slot index, so the queue never holds raw
//! pointers. Slots freed by `dequeue` are threaded on a free list and reused by the
//! next `enqueue`. When removals leave the arena three quarters vacant, the chain is
//! moved in linked order into a fresh arena sized to fit it; once the queue drains
//! completely the arena is released.
//!
//! `dequeue` and `sample` draw a position uniformly from `[0, len)` and walk the
//! chain to it. Iterators copy the chain's slot indices and pick from them with
//! their own generator, so every iterator yields its own random permutation.
//!
//! ## Performance Characteristics
//!
//! - **enqueue**: O(1) amortized
//! - **dequeue**: O(n), walks to the predecessor of the chosen node
//! - **sample**: O(n)
//! - **iter**: O(n) to create, O(1) per element
//!
//! ## Example
//!
//! ```rust
//! use randeque::RandomizedQueue;
//!
//! let mut queue: RandomizedQueue<u32> = RandomizedQueue::new();
//! for i in 1..=100u32 {
//!     queue.enqueue(i)?;
//! }
//!
//! let mut drained = Vec::new();
//! while let Ok(value) = queue.dequeue() {
//!     drained.push(value);
//! }
//! drained.sort_unstable();
//! assert_eq!(drained, (1..=100).collect::<Vec<_>>());
//! # Ok::<(), randeque::Error>(())
//! ```

use crate::metrics::{ContainerMetrics, MetricsCollector, OperationStats};
use crate::{Error, Result};
use core::cell::RefCell;
use core::fmt;
use core::iter::FusedIterator;
use rand::rngs::{SmallRng, ThreadRng};
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
struct Node<T> {
    item: T,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

/// Node in a slot reached through a chain link
#[inline]
fn linked<T>(slot: &Slot<T>, index: usize) -> &Node<T> {
    match slot {
        Slot::Occupied(node) => node,
        Slot::Vacant { .. } => unreachable!("vacant slot {} is linked into the chain", index),
    }
}

/// A queue whose removals and samples pick a uniformly random element
///
/// # Type Parameters
///
/// * `T` - The type of elements stored in the queue
/// * `R` - The random number generator, the thread-local generator by default
///
/// # Examples
///
/// ```rust
/// use randeque::RandomizedQueue;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut queue: RandomizedQueue<&str, StdRng> = RandomizedQueue::with_rng(StdRng::seed_from_u64(7));
/// queue.enqueue("a")?;
/// queue.enqueue("b")?;
///
/// let picked = *queue.sample()?;
/// assert!(picked == "a" || picked == "b");
/// assert_eq!(queue.len(), 2);
/// # Ok::<(), randeque::Error>(())
/// ```
pub struct RandomizedQueue<T, R = ThreadRng> {
    slots: Vec<Slot<T>>,

    // Head of the vacant slot list
    free: Option<usize>,

    first: Option<usize>,
    last: Option<usize>,
    len: usize,

    rng: RefCell<R>,
    stats: OperationStats,
}

impl<T> RandomizedQueue<T> {
    /// Create an empty queue drawing from the thread-local generator
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl<T, R> RandomizedQueue<T, R> {
    /// Check if the queue holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of elements in the queue
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    fn node(&self, index: usize) -> &Node<T> {
        linked(&self.slots[index], index)
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("vacant slot {} is linked into the chain", index),
        }
    }

    /// Walk the chain to `position`, returning the preceding slot and the slot itself
    fn locate(&self, position: usize) -> (Option<usize>, usize) {
        debug_assert!(position < self.len);
        let mut prev = None;
        let mut current = self.first;
        for _ in 0..position {
            prev = current;
            current = current.and_then(|index| self.node(index).next);
        }
        match current {
            Some(index) => (prev, index),
            None => unreachable!("chain is shorter than {} nodes", self.len),
        }
    }

    fn push(&mut self, item: T) {
        let node = Node { item, next: None };
        let index = match self.free {
            Some(index) => {
                match &self.slots[index] {
                    Slot::Vacant { next_free } => self.free = *next_free,
                    Slot::Occupied(_) => unreachable!("free list points at occupied slot {}", index),
                }
                self.slots[index] = Slot::Occupied(node);
                index
            }
            None => {
                let reserved = self.slots.capacity();
                self.slots.push(Slot::Occupied(node));
                if self.slots.capacity() != reserved {
                    self.stats.record_grow();
                }
                self.slots.len() - 1
            }
        };

        match self.last {
            Some(last) => self.node_mut(last).next = Some(index),
            None => self.first = Some(index),
        }
        self.last = Some(index);
        self.len += 1;
    }

    /// Unlink and return the element at `position` in chain order
    fn unlink(&mut self, position: usize) -> T {
        let (prev, index) = self.locate(position);
        let next = self.node(index).next;
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.first = next,
        }
        if self.last == Some(index) {
            self.last = prev;
        }

        let slot = core::mem::replace(
            &mut self.slots[index],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(index);
        self.len -= 1;
        if self.len == 0 {
            self.release();
        } else if self.len <= self.slots.len() / 4 {
            self.compact();
        }

        match slot {
            Slot::Occupied(node) => node.item,
            Slot::Vacant { .. } => unreachable!("vacant slot {} is linked into the chain", index),
        }
    }

    /// Move the chain, in linked order, into a fresh arena with no vacant slots
    fn compact(&mut self) {
        let old_slots = self.slots.len();
        let mut slots = Vec::with_capacity(2 * self.len);
        let mut current = self.first;
        while let Some(index) = current {
            let vacant = Slot::Vacant { next_free: None };
            let node = match core::mem::replace(&mut self.slots[index], vacant) {
                Slot::Occupied(node) => node,
                Slot::Vacant { .. } => {
                    unreachable!("vacant slot {} is linked into the chain", index)
                }
            };
            current = node.next;
            let next = current.map(|_| slots.len() + 1);
            slots.push(Slot::Occupied(Node {
                item: node.item,
                next,
            }));
        }
        debug_assert_eq!(slots.len(), self.len);

        log::trace!(
            "randomized queue compacted from {} to {} slots",
            old_slots,
            slots.len()
        );
        self.slots = slots;
        self.free = None;
        self.first = Some(0);
        self.last = Some(self.len - 1);
        self.stats.record_shrink();
    }

    fn release(&mut self) {
        log::trace!("randomized queue drained, releasing {} slots", self.slots.len());
        self.slots = Vec::new();
        self.free = None;
        self.first = None;
        self.last = None;
        self.stats.record_shrink();
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Mark the slot at `position` in chain order vacant without unlinking it
    #[cfg(test)]
    pub(crate) fn vacate(&mut self, position: usize) {
        let (_, index) = self.locate(position);
        self.slots[index] = Slot::Vacant { next_free: None };
    }

    /// Walk the chain and check its bookkeeping
    #[cfg(test)]
    pub(crate) fn check_links(&self) -> bool {
        if self.len == 0 {
            return self.first.is_none() && self.last.is_none();
        }
        let mut visited = 0;
        let mut current = self.first;
        let mut tail = None;
        while let Some(index) = current {
            visited += 1;
            if visited > self.len {
                return false;
            }
            tail = Some(index);
            current = self.node(index).next;
        }
        visited == self.len && tail == self.last
    }
}

impl<T, R: Rng> RandomizedQueue<T, R> {
    /// Create an empty queue drawing from `rng`
    ///
    /// A seeded generator makes every draw reproducible, which is handy in tests.
    pub fn with_rng(rng: R) -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            first: None,
            last: None,
            len: 0,
            rng: RefCell::new(rng),
            stats: OperationStats::default(),
        }
    }

    /// Append an element
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the element was stored
    /// * `Err(Error::InvalidArgument)` if `item` was `None`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randeque::{Error, RandomizedQueue};
    ///
    /// let mut queue: RandomizedQueue<i32> = RandomizedQueue::new();
    /// assert!(queue.enqueue(1).is_ok());
    /// assert_eq!(queue.enqueue(None), Err(Error::InvalidArgument));
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn enqueue<I>(&mut self, item: I) -> Result<()>
    where
        I: Into<Option<T>>,
    {
        let outcome = item
            .into()
            .ok_or(Error::InvalidArgument)
            .map(|item| self.push(item));
        self.stats.record(&outcome, self.len);
        outcome
    }

    /// Remove and return a uniformly random element
    ///
    /// # Returns
    ///
    /// * `Ok(value)` with the removed element
    /// * `Err(Error::EmptyContainer)` if the queue is empty
    pub fn dequeue(&mut self) -> Result<T> {
        let outcome = self.take_random().ok_or(Error::EmptyContainer);
        self.stats.record(&outcome, self.len);
        outcome
    }

    /// Borrow a uniformly random element without removing it
    ///
    /// Every call is an independent draw, so the same element may come back
    /// several times in a row.
    ///
    /// # Returns
    ///
    /// * `Ok(&value)` with the sampled element
    /// * `Err(Error::EmptyContainer)` if the queue is empty
    pub fn sample(&self) -> Result<&T> {
        let outcome = if self.is_empty() {
            Err(Error::EmptyContainer)
        } else {
            let (_, index) = self.locate(self.draw());
            Ok(&self.node(index).item)
        };
        self.stats.record(&outcome, self.len);
        outcome
    }

    /// Iterate over every element once, in random order
    ///
    /// Each iterator gets its own generator, seeded from the queue's, and its own
    /// permutation state. The iterator borrows the queue, so the queue cannot change
    /// while it is in use:
    ///
    /// ```compile_fail
    /// use randeque::RandomizedQueue;
    ///
    /// let mut queue: RandomizedQueue<u32> = RandomizedQueue::new();
    /// queue.enqueue(1).unwrap();
    /// let mut iter = queue.iter();
    /// queue.dequeue().unwrap();
    /// iter.next();
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let seed = self.rng.borrow_mut().gen::<u64>();
        let mut pending = Vec::with_capacity(self.len);
        let mut current = self.first;
        while let Some(index) = current {
            pending.push(index);
            current = self.node(index).next;
        }
        Iter {
            slots: &self.slots,
            pending,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn draw(&self) -> usize {
        self.rng.borrow_mut().gen_range(0..self.len)
    }

    fn take_random(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let position = self.draw();
        Some(self.unlink(position))
    }
}

impl<T> Default for RandomizedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> MetricsCollector for RandomizedQueue<T, R> {
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

// Element order carries no meaning, so only the size is shown
impl<T, R> fmt::Debug for RandomizedQueue<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomizedQueue")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl<T, R: Rng> Extend<T> for RandomizedQueue<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
            self.stats.record(&Ok::<(), Error>(()), self.len);
        }
    }
}

impl<T> FromIterator<T> for RandomizedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = RandomizedQueue::new();
        queue.extend(iter);
        queue
    }
}

impl<'a, T, R: Rng> IntoIterator for &'a RandomizedQueue<T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, R: Rng> IntoIterator for RandomizedQueue<T, R> {
    type Item = T;
    type IntoIter = IntoIter<T, R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

/// Borrowing random-order iterator over a [`RandomizedQueue`]
#[derive(Debug)]
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    // Slots not yet yielded
    pending: Vec<usize>,
    rng: SmallRng,
}

impl<T> Iter<'_, T> {
    /// Removal through the iterator is not supported
    ///
    /// # Returns
    ///
    /// Always `Err(Error::UnsupportedOperation)`; the queue is never touched.
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedOperation)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..self.pending.len());
        let index = self.pending.swap_remove(pick);
        let slots: &'a [Slot<T>] = self.slots;
        Some(&linked(&slots[index], index).item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len(), Some(self.pending.len()))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Consuming iterator over a [`RandomizedQueue`], yielding by repeated `dequeue`
#[derive(Debug)]
pub struct IntoIter<T, R = ThreadRng> {
    queue: RandomizedQueue<T, R>,
}

impl<T, R: Rng> Iterator for IntoIter<T, R> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.take_random()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T, R: Rng> ExactSizeIterator for IntoIter<T, R> {}

impl<T, R: Rng> FusedIterator for IntoIter<T, R> {}
