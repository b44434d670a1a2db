pub mod cache;
pub mod cache_logic;
pub mod champion_data;
pub mod champion_meta;
pub mod error;
pub mod globals;
pub mod models;

pub use cache::{
    CACHE_FORMAT_VERSION, CacheConfig, CacheStats, CachedData, ChampionCache, ChampionEntry,
    DEFAULT_CAPACITY, LruCache, restore, restore_or_new, save,
};
pub use champion_data::{
    ChampionDataSource, FetchedData, get_or_fetch_champion_data, resolve_position,
};
pub use champion_meta::{ChampionMeta, ChampionMetaStore, ChampionStats, RoleStats};
pub use error::DffError;
pub use globals::{
    get_cache_directory_path, get_champion_cache, get_champion_cache_path,
    get_champion_meta_path, initialize_caches, initialize_caches_from, save_caches,
    shutdown_caches,
};
pub use models::{
    ChampionId, DffRunePage, GameMode, Item, ItemBlock, ItemPage, ItemSet, Position, RunePage,
    Spells,
};
