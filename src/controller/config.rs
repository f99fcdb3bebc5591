use std::time::Duration;

/// Where optimistic and realtime inserts land in the visible sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Prepend: newest entries show first (transactions, recipes).
    Front,
    /// Append: list order is kept (grocery items, meal plans, categories).
    Back,
}

/// Configuration for one collection controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// How long a cached query result stays valid (seconds). Observed
    /// per-resource values range from 2 minutes for grocery items up to
    /// 30 minutes for categories.
    pub ttl_seconds: u64,

    /// Where inserts land in the visible sequence.
    pub insert_position: InsertPosition,

    /// Prefix marking controller-issued provisional ids.
    pub temp_id_prefix: String,
}

impl ControllerConfig {
    /// Configuration with the given cache TTL and front insertion.
    ///
    /// # Arguments
    /// * `ttl_seconds` - Cache time-to-live in seconds
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            insert_position: InsertPosition::Front,
            temp_id_prefix: "temp-".to_string(),
        }
    }

    /// Change where inserts land in the sequence.
    pub fn with_insert_position(mut self, position: InsertPosition) -> Self {
        self.insert_position = position;
        self
    }

    /// Change the cache time-to-live.
    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Get the cache TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(5 * 60)
    }
}
