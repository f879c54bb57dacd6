//! Reuse pool for evaluation containers.
//!
//! Containers handed out by the pool are always blank: a value is reset
//! before it goes back on the queue, so the next acquirer never sees the
//! previous owner's expression or payload.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crossbeam::queue::ArrayQueue;

use crate::{EvalConfig, EvalValue};

/// Bounded lock-free pool of blank [`EvalValue`]s.
pub struct EvalValuePool {
    queue: ArrayQueue<Box<EvalValue>>,
}

impl EvalValuePool {
    /// A pool holding at most `capacity` idle containers (at least one).
    pub fn new(capacity: usize) -> Self {
        EvalValuePool {
            queue: ArrayQueue::new(capacity.max(1)),
        }
    }

    pub fn from_config(config: &EvalConfig) -> Self {
        Self::new(config.pool_capacity)
    }

    /// Take a blank container, allocating one if the pool is empty.
    pub fn acquire(&self) -> PooledValue<'_> {
        let value = self.queue.pop().unwrap_or_default();
        PooledValue {
            pool: self,
            value: Some(value),
        }
    }

    /// Idle containers ready to hand out.
    #[inline]
    pub fn available(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    fn release(&self, mut value: Box<EvalValue>) {
        value.reset();
        if self.queue.push(value).is_err() {
            tracing::trace!(capacity = self.capacity(), "pool full, dropping container");
        }
    }
}

impl Default for EvalValuePool {
    fn default() -> Self {
        Self::from_config(&EvalConfig::default())
    }
}

impl fmt::Debug for EvalValuePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalValuePool")
            .field("available", &self.available())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// A container borrowed from an [`EvalValuePool`]; goes back blank on drop.
pub struct PooledValue<'pool> {
    pool: &'pool EvalValuePool,
    /// `None` only while dropping.
    value: Option<Box<EvalValue>>,
}

impl Deref for PooledValue<'_> {
    type Target = EvalValue;

    fn deref(&self) -> &EvalValue {
        match &self.value {
            Some(value) => value,
            None => unreachable!("pooled value used after release"),
        }
    }
}

impl DerefMut for PooledValue<'_> {
    fn deref_mut(&mut self) -> &mut EvalValue {
        match &mut self.value {
            Some(value) => value,
            None => unreachable!("pooled value used after release"),
        }
    }
}

impl Drop for PooledValue<'_> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.release(value);
        }
    }
}

impl fmt::Debug for PooledValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
