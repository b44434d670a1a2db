pub mod cached_data;
pub mod lru_cache;
pub mod persistence;

pub use cached_data::{CachedData, ChampionEntry};
pub use lru_cache::{CACHE_FORMAT_VERSION, CacheConfig, CacheStats, DEFAULT_CAPACITY, LruCache};
pub use persistence::{restore, restore_or_new, save};

use crate::models::ChampionId;

/// Champion cache as used by the application, keyed by champion id
pub type ChampionCache = LruCache<ChampionId>;
