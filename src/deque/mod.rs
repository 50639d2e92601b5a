//! Deque (double-ended queue) implementation
//!
//! ## Available Deques
//!
//! - [`Deque`]: growable circular-buffer deque with O(1) amortized operations at both ends
//!
//! ## Choosing a Deque
//!
//! - Use `Deque` for sliding windows, undo stacks, and any algorithm that works both ends
//! - Iteration always follows logical front-to-back order, whatever the resize history

pub mod circular;

pub use self::circular::{Deque, IntoIter, Iter, MIN_CAPACITY};


#[cfg(test)]
mod proptests;
