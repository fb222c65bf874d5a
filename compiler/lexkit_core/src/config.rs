//! Construction parameters for [`LexBuffer`](crate::LexBuffer).

/// Default initial capacity: one cache line.
pub const DEFAULT_CAPACITY: usize = 64;

/// Buffer construction parameters.
///
/// ```
/// use lexkit_core::LexConfig;
///
/// let config = LexConfig::new(16).with_max_capacity(4096);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexConfig {
    /// Capacity allocated up front. Must be non-zero.
    pub initial_capacity: usize,
    /// Ceiling for growth. `None` grows until the allocator refuses.
    ///
    /// Bounds the bytes held between dumps, so a single runaway token
    /// cannot exhaust memory. A token of exactly `max_capacity` bytes still
    /// ends cleanly at end-of-stream; a `next()` that would store one more
    /// byte fails with `AllocationFailure` and keeps that byte for the
    /// first read after a dump.
    pub max_capacity: Option<usize>,
}

impl LexConfig {
    /// Config with the given initial capacity and no ceiling.
    pub const fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity: None,
        }
    }

    /// Set a growth ceiling.
    #[must_use]
    pub const fn with_max_capacity(mut self, limit: usize) -> Self {
        self.max_capacity = Some(limit);
        self
    }

    /// Check the parameters without allocating.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if let Some(limit) = self.max_capacity {
            if self.initial_capacity > limit {
                return Err(ConfigError::CapacityExceedsLimit {
                    capacity: self.initial_capacity,
                    limit,
                });
            }
        }
        Ok(())
    }
}

impl Default for LexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Rejected construction parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The buffer needs room for at least one byte.
    #[error("initial capacity must be non-zero")]
    ZeroCapacity,
    /// The initial capacity is larger than the growth ceiling.
    #[error("initial capacity {capacity} exceeds maximum capacity {limit}")]
    CapacityExceedsLimit { capacity: usize, limit: usize },
}

#[cfg(test)]
mod tests;
