//! Container Metrics Module
//!
//! Operation counters shared by both containers. Collection is single-threaded and
//! backed by `Cell`s, so read-only operations such as `sample` can record too.

use core::cell::Cell;

/// Snapshot of a container's operation counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContainerMetrics {
    /// Total number of recorded operations
    pub total_operations: u64,
    /// Number of operations that returned `Ok`
    pub successful_operations: u64,
    /// Number of operations that returned an error
    pub failed_operations: u64,
    /// Number of times the backing storage grew
    pub grow_events: u64,
    /// Number of times the backing storage shrank
    pub shrink_events: u64,
    /// Largest element count observed
    pub peak_len: usize,
}

impl ContainerMetrics {
    /// Calculate success rate as percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_operations == 0 {
            0.0
        } else {
            (self.successful_operations as f64 / self.total_operations as f64) * 100.0
        }
    }

    /// Calculate failure rate as percentage
    pub fn failure_rate(&self) -> f64 {
        if self.total_operations == 0 {
            0.0
        } else {
            (self.failed_operations as f64 / self.total_operations as f64) * 100.0
        }
    }

    /// Total number of storage resizes in either direction
    pub fn resize_events(&self) -> u64 {
        self.grow_events + self.shrink_events
    }
}

/// Internal counter storage embedded in each container
#[derive(Debug)]
pub(crate) struct OperationStats {
    enabled: Cell<bool>,
    total_operations: Cell<u64>,
    successful_operations: Cell<u64>,
    failed_operations: Cell<u64>,
    grow_events: Cell<u64>,
    shrink_events: Cell<u64>,
    peak_len: Cell<usize>,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            enabled: Cell::new(true),
            total_operations: Cell::new(0),
            successful_operations: Cell::new(0),
            failed_operations: Cell::new(0),
            grow_events: Cell::new(0),
            shrink_events: Cell::new(0),
            peak_len: Cell::new(0),
        }
    }
}

impl Clone for OperationStats {
    fn clone(&self) -> Self {
        Self {
            enabled: Cell::new(self.enabled.get()),
            ..Self::default()
        }
    }
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get().saturating_add(1));
}

impl OperationStats {
    /// Record the outcome of one operation and the element count after it
    pub(crate) fn record<T>(&self, outcome: &crate::Result<T>, len: usize) {
        if !self.enabled.get() {
            return;
        }
        bump(&self.total_operations);
        match outcome {
            Ok(_) => bump(&self.successful_operations),
            Err(_) => bump(&self.failed_operations),
        }
        if len > self.peak_len.get() {
            self.peak_len.set(len);
        }
    }

    /// Record a storage growth
    pub(crate) fn record_grow(&self) {
        if self.enabled.get() {
            bump(&self.grow_events);
        }
    }

    /// Record a storage shrink
    pub(crate) fn record_shrink(&self) {
        if self.enabled.get() {
            bump(&self.shrink_events);
        }
    }

    pub(crate) fn snapshot(&self) -> ContainerMetrics {
        ContainerMetrics {
            total_operations: self.total_operations.get(),
            successful_operations: self.successful_operations.get(),
            failed_operations: self.failed_operations.get(),
            grow_events: self.grow_events.get(),
            shrink_events: self.shrink_events.get(),
            peak_len: self.peak_len.get(),
        }
    }

    pub(crate) fn reset(&self) {
        self.total_operations.set(0);
        self.successful_operations.set(0);
        self.failed_operations.set(0);
        self.grow_events.set(0);
        self.shrink_events.set(0);
        self.peak_len.set(0);
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

/// Trait for containers that keep operation metrics
pub trait MetricsCollector {
    /// Get current metrics
    fn metrics(&self) -> ContainerMetrics;

    /// Reset all counters to zero
    fn reset_metrics(&self);

    /// Enable or disable metrics collection
    fn set_metrics_enabled(&self, enabled: bool);

    /// Check if metrics collection is enabled
    fn is_metrics_enabled(&self) -> bool;
}
