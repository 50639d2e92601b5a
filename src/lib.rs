//! # randeque
//!
//! Two small, generic containers meant as building blocks for larger algorithms.
//!
//! ## Features
//!
//! - **Deque**: double-ended queue over a resizable circular buffer, amortized O(1) at both ends
//! - **RandomizedQueue**: O(1) enqueue, uniformly random dequeue and sampling, random-order iteration
//!
//! ## Quick Start
//!
//! ```rust
//! use randeque::{Deque, RandomizedQueue};
//!
//! let mut deque: Deque<&str> = Deque::new();
//! deque.add_first("A")?;
//! deque.add_last("B")?;
//! assert_eq!(deque.remove_last()?, "B");
//!
//! let mut queue: RandomizedQueue<u32> = RandomizedQueue::new();
//! queue.enqueue(7u32)?;
//! assert_eq!(queue.dequeue()?, 7);
//! # Ok::<(), randeque::Error>(())
//! ```
//!
//! ## Absent Elements
//!
//! Insertion methods accept anything convertible into `Option<T>`. A plain value is
//! always stored; an explicit `None` is rejected with [`Error::InvalidArgument`] and
//! leaves the container unchanged.
//!
//! ## Iterators
//!
//! Both containers hand out iterators that borrow the container, so mutating a
//! container while one of its iterators is alive does not compile. Neither iterator
//! can remove elements: [`deque::Iter::remove`] and [`queue::Iter::remove`] always
//! return [`Error::UnsupportedOperation`].
//!
//! ## Thread Safety
//!
//! The containers are meant for single-threaded use and do no internal locking.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod deque;
pub mod metrics;
pub mod queue;

pub use crate::deque::Deque;
pub use crate::metrics::{ContainerMetrics, MetricsCollector};
pub use crate::queue::RandomizedQueue;

/// Error types for randeque operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An absent element was offered for storage
    InvalidArgument,
    /// Removal or sampling on a container with no elements
    EmptyContainer,
    /// Removal through an iterator
    UnsupportedOperation,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "Cannot store an absent element"),
            Error::EmptyContainer => write!(f, "Container is empty"),
            Error::UnsupportedOperation => write!(f, "Iterators do not support removal"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for randeque operations
pub type Result<T> = core::result::Result<T, Error>;
