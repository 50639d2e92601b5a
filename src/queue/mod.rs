//! Queue implementations
//!
//! ## Available Queues
//!
//! - [`RandomizedQueue`]: multiset with O(1) enqueue and uniformly random dequeue/sample
//!
//! ## Performance Characteristics
//!
//! | Queue Type | Enqueue | Dequeue | Sample | Iterate |
//! |------------|---------|---------|--------|---------|
//! | Randomized | O(1) amortized | O(n) | O(n) | O(n) setup, O(1) per element |
//!
//! ## Examples
//!
//! ```rust
//! use randeque::queue::RandomizedQueue;
//!
//! let mut queue: RandomizedQueue<&str> = RandomizedQueue::new();
//! queue.enqueue("heads")?;
//! queue.enqueue("tails")?;
//!
//! let flip = queue.sample()?;
//! assert!(*flip == "heads" || *flip == "tails");
//! # Ok::<(), randeque::Error>(())
//! ```

pub mod randomized;

pub use self::randomized::{IntoIter, Iter, RandomizedQueue};


#[cfg(test)]
mod proptests;
