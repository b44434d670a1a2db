//! Pure freshness rules for cached champion data
//!
//! Nothing here touches the linked list or the disk; the engine evaluates
//! these on the read path.

use time::{Duration, OffsetDateTime};
use tracing::debug;

/// Default expiration window for a scraped slot (in days)
pub const EXPIRATION_DAYS: i64 = 7;

/// A slot that was never stamped counts as expired
pub fn is_expired(created_at: Option<OffsetDateTime>, now: OffsetDateTime, window: Duration) -> bool {
    match created_at {
        Some(created_at) => now - created_at >= window,
        None => true,
    }
}

/// Log cache hit information
pub fn log_cache_hit(created_at: Option<OffsetDateTime>, now: OffsetDateTime, slot: &str) {
    let age_hours = created_at.map(|t| (now - t).whole_hours());
    debug!(age_hours = ?age_hours, slot = slot, "Champion cache HIT");
}

/// Log cache miss information
pub fn log_cache_miss(reason: &str, slot: &str) {
    debug!(reason = reason, slot = slot, "Champion cache MISS");
}
