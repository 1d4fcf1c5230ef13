//! Aggregation options.

/// Options for structure aggregation.
///
/// Degraded mode triggers when fewer than `degraded_max_elements` elements
/// are classified while more than `degraded_min_raw_items` raw items were
/// seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Element count below which the stream may be degraded
    pub degraded_max_elements: usize,

    /// Raw item count above which the stream may be degraded
    pub degraded_min_raw_items: usize,
}

impl AggregateOptions {
    /// Create new aggregate options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element count threshold.
    pub fn with_degraded_max_elements(mut self, count: usize) -> Self {
        self.degraded_max_elements = count;
        self
    }

    /// Set the raw item count threshold.
    pub fn with_degraded_min_raw_items(mut self, count: usize) -> Self {
        self.degraded_min_raw_items = count;
        self
    }

    /// Check if the counts describe a degraded item stream.
    pub fn is_degraded(&self, total_elements: usize, raw_item_count: usize) -> bool {
        total_elements < self.degraded_max_elements && raw_item_count > self.degraded_min_raw_items
    }
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            degraded_max_elements: 10,
            degraded_min_raw_items: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_thresholds() {
        let options = AggregateOptions::default();
        assert!(options.is_degraded(0, 150));
        assert!(options.is_degraded(9, 101));
        assert!(!options.is_degraded(10, 150));
        assert!(!options.is_degraded(0, 100));

        let options = options.with_degraded_min_raw_items(5);
        assert!(options.is_degraded(0, 6));
    }
}
