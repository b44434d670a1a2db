//! Fixed-capacity LRU cache of champion entries
//!
//! Entries live in an arena (`Vec<Node<K>>`) linked into a recency list by
//! index, with a `HashMap` from champion key to arena slot. The head of the
//! list is the most recently used entry, the tail is the next eviction victim.
//! Every structural change goes through `attach_front`, `attach_back`,
//! `detach` and `remove_node`, which keep `index`, `nodes` and the list in
//! step.

use super::cached_data::{CachedData, ChampionEntry};
use crate::cache_logic::{self, EXPIRATION_DAYS};
use crate::error::DffError;
use crate::models::{GameMode, Position};
use bincode::Options;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::io::{Read, Write};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

/// Max number of champions held at once
pub const DEFAULT_CAPACITY: usize = 16;

/// Bump whenever the encoded layout of `ChampionEntry` or the header changes
pub const CACHE_FORMAT_VERSION: u16 = 3;

// Upper bound for a single decoded record, guards against corrupt length prefixes
const MAX_RECORD_BYTES: u64 = 4 * 1024 * 1024;

/// Configuration for the champion cache
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of champion entries
    pub capacity: usize,
    /// Age after which a slot is dropped on read
    pub expiration: Duration,
    /// Format tag written to and required from persisted files
    pub format_version: u16,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            expiration: Duration::days(EXPIRATION_DAYS),
            format_version: CACHE_FORMAT_VERSION,
        }
    }
}

impl CacheConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }
}

#[derive(Debug)]
struct Node<K> {
    entry: ChampionEntry<K>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// LRU cache keyed by champion, see the module docs for the layout
#[derive(Debug)]
pub struct LruCache<K> {
    config: CacheConfig,
    game_version: String,
    nodes: Vec<Node<K>>,
    index: HashMap<K, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

/// Cache statistics for monitoring and debugging
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub entry_count: usize,
    pub capacity: usize,
    pub populated_slots: usize,
    pub oldest_slot: Option<OffsetDateTime>,
    pub newest_slot: Option<OffsetDateTime>,
}

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_RECORD_BYTES)
}

impl<K> LruCache<K>
where
    K: Hash + Eq + Clone + Debug,
{
    /// Create an empty cache tagged with the current game version
    pub fn new(mut config: CacheConfig, game_version: impl Into<String>) -> Self {
        if config.capacity == 0 {
            warn!("Cache capacity of 0 requested, using 1");
            config.capacity = 1;
        }

        Self {
            nodes: Vec::with_capacity(config.capacity),
            index: HashMap::with_capacity(config.capacity),
            config,
            game_version: game_version.into(),
            head: None,
            tail: None,
        }
    }

    /// Get the slot for (`key`, `mode`, `position`), creating the champion
    /// entry if needed. The bool is true only for a fresh hit.
    ///
    /// The returned slot is the cache's own storage: on a miss the caller
    /// fills it in place. Every call moves `key` to the front of the
    /// recency order.
    pub fn get_or_put(
        &mut self,
        key: K,
        mode: GameMode,
        position: Position,
    ) -> Result<(&mut CachedData, bool), DffError> {
        self.get_or_put_at(key, mode, position, OffsetDateTime::now_utc())
    }

    /// `get_or_put` with an explicit clock for the expiration check
    pub fn get_or_put_at(
        &mut self,
        key: K,
        mode: GameMode,
        position: Position,
        now: OffsetDateTime,
    ) -> Result<(&mut CachedData, bool), DffError> {
        // Reject before touching the list so a bad call leaves no trace
        if mode == GameMode::Default && !position.is_concrete() {
            return Err(DffError::UnresolvedPosition);
        }

        let existing = self.index.get(&key).copied();
        let (idx, mut fresh) = match existing {
            Some(idx) => {
                self.touch(idx);
                (idx, true)
            }
            None => (self.insert_new(key), false),
        };

        let expiration = self.config.expiration;
        let slot_name = format!("{}/{}", mode, position);
        let slot = self.nodes[idx]
            .entry
            .slot_mut(mode, position)
            .ok_or(DffError::UnresolvedPosition)?;

        if cache_logic::is_expired(slot.creation_time, now, expiration) {
            if slot.creation_time.is_some() {
                cache_logic::log_cache_miss("expired", &slot_name);
            }
            slot.reset();
            fresh = false;
        }

        if slot.rune_pages.is_empty() {
            fresh = false;
        }

        if fresh {
            cache_logic::log_cache_hit(slot.creation_time, now, &slot_name);
        } else {
            cache_logic::log_cache_miss("not populated", &slot_name);
        }

        Ok((slot, fresh))
    }

    /// Access a champion entry directly, counting as a use.
    /// A missing key changes nothing.
    pub fn lookup_entry(&mut self, key: &K) -> Option<&mut ChampionEntry<K>> {
        let idx = *self.index.get(key)?;
        self.touch(idx);
        Some(&mut self.nodes[idx].entry)
    }

    /// Read-only access without affecting recency
    pub fn peek_entry(&self, key: &K) -> Option<&ChampionEntry<K>> {
        self.index.get(key).map(|&idx| &self.nodes[idx].entry)
    }

    /// Drop the least recently used entry. No-op on an empty cache.
    pub fn evict_least_recently_used(&mut self) -> Option<ChampionEntry<K>> {
        let idx = self.tail?;
        self.detach(idx);
        let node = self.remove_node(idx);
        self.index.remove(&node.entry.key);

        debug!(key = ?node.entry.key, entries = self.nodes.len(), "Evicted LRU champion entry");
        Some(node.entry)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn game_version(&self) -> &str {
        &self.game_version
    }

    /// Entries from most to least recently used
    pub fn iter(&self) -> impl Iterator<Item = &ChampionEntry<K>> {
        std::iter::successors(self.head, move |&idx| self.nodes[idx].next)
            .map(move |idx| &self.nodes[idx].entry)
    }

    /// Keys from most to least recently used
    pub fn keys_mru(&self) -> Vec<K> {
        self.iter().map(|entry| entry.key.clone()).collect()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
        info!("Cleared all champion cache entries");
    }

    pub fn stats(&self) -> CacheStats {
        let stamped: Vec<OffsetDateTime> = self
            .iter()
            .flat_map(|entry| entry.slots())
            .filter(|(_, _, data)| data.is_complete())
            .filter_map(|(_, _, data)| data.creation_time)
            .collect();

        CacheStats {
            entry_count: self.len(),
            capacity: self.capacity(),
            populated_slots: stamped.len(),
            oldest_slot: stamped.iter().min().copied(),
            newest_slot: stamped.iter().max().copied(),
        }
    }

    /// Write header and entries in MRU to LRU order
    pub fn encode<W: Write>(&self, mut writer: W) -> Result<(), DffError>
    where
        K: Serialize,
    {
        wire_options().serialize_into(&mut writer, &self.config.format_version)?;
        wire_options().serialize_into(&mut writer, &self.game_version)?;
        wire_options().serialize_into(&mut writer, &(self.config.capacity as u64))?;
        wire_options().serialize_into(&mut writer, &(self.len() as u64))?;

        for entry in self.iter() {
            wire_options().serialize_into(&mut writer, entry)?;
        }

        Ok(())
    }

    /// Rebuild a cache from `encode` output.
    ///
    /// The format and game version tags are checked before any entry is
    /// read; a mismatch yields `DffError::IncompatibleCache`.
    pub fn decode<R: Read>(
        mut reader: R,
        config: CacheConfig,
        expected_game_version: &str,
    ) -> Result<Self, DffError>
    where
        K: DeserializeOwned,
    {
        let format_version: u16 = wire_options().deserialize_from(&mut reader)?;
        if format_version != config.format_version {
            return Err(DffError::IncompatibleCache {
                reason: format!(
                    "format version {} (expected {})",
                    format_version, config.format_version
                ),
            });
        }

        let game_version: String = wire_options().deserialize_from(&mut reader)?;
        if game_version != expected_game_version {
            return Err(DffError::IncompatibleCache {
                reason: format!(
                    "game version {} (expected {})",
                    game_version, expected_game_version
                ),
            });
        }

        let stored_capacity: u64 = wire_options().deserialize_from(&mut reader)?;
        let size: u64 = wire_options().deserialize_from(&mut reader)?;

        let mut cache = Self::new(config, game_version);
        if stored_capacity != cache.capacity() as u64 {
            debug!(
                stored_capacity = stored_capacity,
                capacity = cache.capacity(),
                "Persisted cache capacity differs from configuration"
            );
        }

        for _ in 0..size {
            let entry: ChampionEntry<K> = wire_options().deserialize_from(&mut reader)?;
            if cache.contains(&entry.key) {
                warn!(key = ?entry.key, "Duplicate champion entry in persisted cache, skipping");
                continue;
            }
            cache.push_back(entry);
        }

        if cache.len() > cache.capacity() {
            warn!(
                entries = cache.len(),
                capacity = cache.capacity(),
                "Persisted cache exceeds capacity, trimming"
            );
            while cache.len() > cache.capacity() {
                cache.evict_least_recently_used();
            }
        }

        Ok(cache)
    }

    fn insert_new(&mut self, key: K) -> usize {
        if self.len() >= self.capacity() {
            self.evict_least_recently_used();
        }

        let idx = self.nodes.len();
        self.nodes.push(Node {
            entry: ChampionEntry::new(key.clone()),
            prev: None,
            next: None,
        });
        self.index.insert(key, idx);
        self.attach_front(idx);

        debug!(entries = self.nodes.len(), "Created champion entry");
        idx
    }

    // Append as least recently used, used when rebuilding from disk
    fn push_back(&mut self, entry: ChampionEntry<K>) {
        let idx = self.nodes.len();
        self.index.insert(entry.key.clone(), idx);
        self.nodes.push(Node {
            entry,
            prev: None,
            next: None,
        });
        self.attach_back(idx);
    }

    fn touch(&mut self, idx: usize) {
        if self.head != Some(idx) {
            self.detach(idx);
            self.attach_front(idx);
        }
    }

    fn attach_front(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = self.head;
        match self.head {
            Some(head) => self.nodes[head].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn attach_back(&mut self, idx: usize) {
        self.nodes[idx].next = None;
        self.nodes[idx].prev = self.tail;
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    // Node must already be detached. The last node moves into `idx`.
    fn remove_node(&mut self, idx: usize) -> Node<K> {
        let node = self.nodes.swap_remove(idx);

        if idx < self.nodes.len() {
            let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
            match prev {
                Some(prev) => self.nodes[prev].next = Some(idx),
                None => self.head = Some(idx),
            }
            match next {
                Some(next) => self.nodes[next].prev = Some(idx),
                None => self.tail = Some(idx),
            }
            if let Some(slot) = self.index.get_mut(&self.nodes[idx].entry.key) {
                *slot = idx;
            }
        }

        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DffRunePage;

    fn populate(data: &mut CachedData, url: &str) {
        data.creation_time = Some(OffsetDateTime::now_utc());
        data.source_url = url.to_string();
        data.rune_pages = vec![DffRunePage {
            name: "Conqueror".to_string(),
            pick_rate: 0.4,
            win_rate: 0.52,
            sample_count: 1200,
            ..Default::default()
        }];
    }

    // Walks the list both ways and checks it against the index
    fn assert_consistent<K: Hash + Eq + Clone + Debug>(cache: &LruCache<K>) {
        let forward = cache.keys_mru();
        assert_eq!(forward.len(), cache.len());
        assert_eq!(cache.index.len(), cache.len());
        assert!(cache.len() <= cache.capacity());

        let mut backward = Vec::new();
        let mut cursor = cache.tail;
        while let Some(idx) = cursor {
            backward.push(cache.nodes[idx].entry.key.clone());
            cursor = cache.nodes[idx].prev;
        }
        backward.reverse();
        assert_eq!(forward, backward);

        for (key, &idx) in &cache.index {
            assert_eq!(&cache.nodes[idx].entry.key, key);
        }
    }

    #[test]
    fn test_basic_get_or_put() {
        let mut cache = LruCache::new(CacheConfig::default(), "14.1");
        assert!(cache.is_empty());

        let (data, fresh) = cache.get_or_put(1, GameMode::Default, Position::Top).unwrap();
        assert!(!fresh);
        populate(data, "https://example.com/aatrox/top");

        let (data, fresh) = cache.get_or_put(1, GameMode::Default, Position::Top).unwrap();
        assert!(fresh);
        assert_eq!(data.source_url, "https://example.com/aatrox/top");
        assert_eq!(cache.len(), 1);
        assert_consistent(&cache);
    }

    #[test]
    fn test_unresolved_position_is_rejected_without_side_effects() {
        let mut cache = LruCache::new(CacheConfig::default(), "14.1");
        cache.get_or_put(1, GameMode::Aram, Position::None).unwrap();

        let result = cache.get_or_put(2, GameMode::Default, Position::None);
        assert!(matches!(result, Err(DffError::UnresolvedPosition)));
        assert_eq!(cache.keys_mru(), vec![1]);
    }

    #[test]
    fn test_empty_rune_pages_is_a_miss() {
        let mut cache = LruCache::new(CacheConfig::default(), "14.1");
        let (data, _) = cache.get_or_put(1, GameMode::Urf, Position::None).unwrap();
        data.creation_time = Some(OffsetDateTime::now_utc());
        data.source_url = "partial".to_string();

        let (data, fresh) = cache.get_or_put(1, GameMode::Urf, Position::None).unwrap();
        assert!(!fresh);
        // Stamped but incomplete data is kept for the caller to finish
        assert_eq!(data.source_url, "partial");
    }

    #[test]
    fn test_unstamped_slot_is_reset() {
        let mut cache = LruCache::new(CacheConfig::default(), "14.1");
        let (data, _) = cache.get_or_put(1, GameMode::Aram, Position::None).unwrap();
        populate(data, "aram");
        data.creation_time = None;

        let (data, fresh) = cache.get_or_put(1, GameMode::Aram, Position::None).unwrap();
        assert!(!fresh);
        assert!(data.rune_pages.is_empty());
        assert!(data.source_url.is_empty());
    }

    #[test]
    fn test_expiration_resets_slot() {
        let mut cache = LruCache::new(CacheConfig::default(), "14.1");
        let now = OffsetDateTime::now_utc();

        let (data, _) = cache.get_or_put(1, GameMode::Default, Position::Mid).unwrap();
        populate(data, "stale");
        data.creation_time = Some(now - Duration::days(8));

        let (data, _) = cache.get_or_put(2, GameMode::Default, Position::Mid).unwrap();
        populate(data, "recent");
        data.creation_time = Some(now - Duration::days(6));

        let (_, fresh) = cache
            .get_or_put_at(1, GameMode::Default, Position::Mid, now)
            .unwrap();
        assert!(!fresh);
        let entry = cache.peek_entry(&1).unwrap();
        assert!(entry.default[2].rune_pages.is_empty());
        assert!(entry.default[2].creation_time.is_none());

        let (data, fresh) = cache
            .get_or_put_at(2, GameMode::Default, Position::Mid, now)
            .unwrap();
        assert!(fresh);
        assert_eq!(data.source_url, "recent");
    }

    #[test]
    fn test_expiration_only_touches_addressed_slot() {
        let mut cache = LruCache::new(CacheConfig::default(), "14.1");
        let now = OffsetDateTime::now_utc();

        let (data, _) = cache.get_or_put(1, GameMode::Urf, Position::None).unwrap();
        populate(data, "urf");
        data.creation_time = Some(now - Duration::days(30));
        let (data, _) = cache.get_or_put(1, GameMode::Aram, Position::None).unwrap();
        populate(data, "aram");
        data.creation_time = Some(now - Duration::days(30));

        cache.get_or_put_at(1, GameMode::Urf, Position::None, now).unwrap();

        let entry = cache.peek_entry(&1).unwrap();
        assert!(entry.urf.rune_pages.is_empty());
        assert_eq!(entry.aram.source_url, "aram");
    }

    #[test]
    fn test_lookup_entry_touches_only_on_hit() {
        let mut cache = LruCache::new(CacheConfig::with_capacity(3), "14.1");
        for key in [1, 2, 3] {
            cache.get_or_put(key, GameMode::Aram, Position::None).unwrap();
        }
        assert_eq!(cache.keys_mru(), vec![3, 2, 1]);

        let entry = cache.lookup_entry(&1).unwrap();
        entry.default_position = Position::Jungle;
        entry.available_positions = vec![Position::Jungle, Position::Top];
        assert_eq!(cache.keys_mru(), vec![1, 3, 2]);

        assert!(cache.lookup_entry(&9).is_none());
        assert_eq!(cache.keys_mru(), vec![1, 3, 2]);
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.peek_entry(&1).unwrap().default_position, Position::Jungle);
        assert_consistent(&cache);
    }

    #[test]
    fn test_evict_on_empty_cache_is_noop() {
        let mut cache: LruCache<i64> = LruCache::new(CacheConfig::default(), "14.1");
        assert!(cache.evict_least_recently_used().is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_evict_returns_tail() {
        let mut cache = LruCache::new(CacheConfig::default(), "14.1");
        for key in [1, 2, 3] {
            cache.get_or_put(key, GameMode::Urf, Position::None).unwrap();
        }
        let evicted = cache.evict_least_recently_used().unwrap();
        assert_eq!(evicted.key, 1);
        assert_eq!(cache.keys_mru(), vec![3, 2]);
        assert_consistent(&cache);
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut cache = LruCache::new(CacheConfig::with_capacity(2), "14.1");
        for key in [1, 2] {
            cache.get_or_put(key, GameMode::Urf, Position::None).unwrap();
        }
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.evict_least_recently_used().is_none());

        cache.get_or_put(3, GameMode::Urf, Position::None).unwrap();
        assert_eq!(cache.keys_mru(), vec![3]);
        assert_consistent(&cache);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = LruCache::new(CacheConfig::with_capacity(0), "14.1");
        cache.get_or_put(1, GameMode::Urf, Position::None).unwrap();
        cache.get_or_put(2, GameMode::Urf, Position::None).unwrap();
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.keys_mru(), vec![2]);
    }

    #[test]
    fn test_arena_stays_consistent_under_churn() {
        let mut cache = LruCache::new(CacheConfig::with_capacity(4), "14.1");
        // Deterministic pseudo-random key sequence
        let mut seed: u64 = 0x2545F4914F6CDD1D;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let key = (seed % 9) as i64;
            if seed % 3 == 0 {
                cache.lookup_entry(&key);
            } else {
                cache.get_or_put(key, GameMode::Aram, Position::None).unwrap();
                assert_eq!(cache.keys_mru()[0], key);
            }
            assert_consistent(&cache);
        }
    }

    #[test]
    fn test_stats() {
        let mut cache = LruCache::new(CacheConfig::default(), "14.1");
        let stats = cache.stats();
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.populated_slots, 0);
        assert!(stats.oldest_slot.is_none());

        let (data, _) = cache.get_or_put(1, GameMode::Default, Position::Adc).unwrap();
        populate(data, "adc");
        cache.get_or_put(2, GameMode::Urf, Position::None).unwrap();

        let stats = cache.stats();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.capacity, DEFAULT_CAPACITY);
        assert_eq!(stats.populated_slots, 1);
        assert_eq!(stats.oldest_slot, stats.newest_slot);
    }

    #[test]
    fn test_encode_decode_preserves_order_and_contents() {
        let mut cache: LruCache<i64> = LruCache::new(CacheConfig::with_capacity(5), "14.1");
        let (data, _) = cache.get_or_put(3, GameMode::Default, Position::Mid).unwrap();
        populate(data, "someURL");
        cache.get_or_put(0, GameMode::Default, Position::Adc).unwrap();
        cache.get_or_put(2, GameMode::Default, Position::Jungle).unwrap();
        cache.get_or_put(1, GameMode::Urf, Position::None).unwrap();

        let mut buf = Vec::new();
        cache.encode(&mut buf).unwrap();

        let mut decoded: LruCache<i64> =
            LruCache::decode(buf.as_slice(), CacheConfig::with_capacity(5), "14.1").unwrap();
        assert_eq!(decoded.keys_mru(), vec![1, 2, 0, 3]);
        assert_eq!(decoded.game_version(), "14.1");
        assert_eq!(decoded.peek_entry(&3), cache.peek_entry(&3));
        assert_consistent(&decoded);

        let (data, fresh) = decoded
            .get_or_put(3, GameMode::Default, Position::Mid)
            .unwrap();
        assert!(fresh);
        assert_eq!(data.source_url, "someURL");
        assert_eq!(decoded.keys_mru(), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_decode_rejects_mismatched_versions() {
        let cache: LruCache<i64> = LruCache::new(CacheConfig::default(), "14.1");
        let mut buf = Vec::new();
        cache.encode(&mut buf).unwrap();

        let result = LruCache::<i64>::decode(buf.as_slice(), CacheConfig::default(), "14.2");
        assert!(matches!(result, Err(DffError::IncompatibleCache { .. })));

        let older = CacheConfig {
            format_version: CACHE_FORMAT_VERSION + 1,
            ..Default::default()
        };
        let result = LruCache::<i64>::decode(buf.as_slice(), older, "14.1");
        assert!(matches!(result, Err(DffError::IncompatibleCache { .. })));
    }

    #[test]
    fn test_decode_header_layout() {
        let cache: LruCache<i64> = LruCache::new(CacheConfig::default(), "v1");
        let mut buf = Vec::new();
        cache.encode(&mut buf).unwrap();

        // u16 format version, u64 length + bytes, u64 capacity, u64 size
        assert_eq!(&buf[0..2], &CACHE_FORMAT_VERSION.to_le_bytes());
        assert_eq!(&buf[2..10], &2u64.to_le_bytes());
        assert_eq!(&buf[10..12], b"v1");
        assert_eq!(&buf[12..20], &(DEFAULT_CAPACITY as u64).to_le_bytes());
        assert_eq!(&buf[20..28], &0u64.to_le_bytes());
        assert_eq!(buf.len(), 28);
    }

    #[test]
    fn test_decode_keeps_first_of_duplicate_keys() {
        let mut buf = Vec::new();
        wire_options().serialize_into(&mut buf, &CACHE_FORMAT_VERSION).unwrap();
        wire_options().serialize_into(&mut buf, &"14.1".to_string()).unwrap();
        wire_options().serialize_into(&mut buf, &(DEFAULT_CAPACITY as u64)).unwrap();
        wire_options().serialize_into(&mut buf, &3u64).unwrap();
        for (key, url) in [(1i64, "first"), (1, "second"), (2, "other")] {
            let mut entry = ChampionEntry::new(key);
            entry.urf.source_url = url.to_string();
            wire_options().serialize_into(&mut buf, &entry).unwrap();
        }

        let decoded: LruCache<i64> =
            LruCache::decode(buf.as_slice(), CacheConfig::default(), "14.1").unwrap();
        assert_eq!(decoded.keys_mru(), vec![1, 2]);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.peek_entry(&1).unwrap().urf.source_url, "first");
        assert_consistent(&decoded);
    }

    #[test]
    fn test_decode_trims_oversized_cache() {
        let mut cache: LruCache<i64> = LruCache::new(CacheConfig::with_capacity(4), "14.1");
        for key in [1, 2, 3, 4] {
            cache.get_or_put(key, GameMode::Aram, Position::None).unwrap();
        }
        let mut buf = Vec::new();
        cache.encode(&mut buf).unwrap();

        let decoded: LruCache<i64> =
            LruCache::decode(buf.as_slice(), CacheConfig::with_capacity(2), "14.1").unwrap();
        assert_eq!(decoded.keys_mru(), vec![4, 3]);
        assert_consistent(&decoded);
    }

    #[test]
    fn test_decode_truncated_body_fails() {
        let mut cache: LruCache<i64> = LruCache::new(CacheConfig::default(), "14.1");
        cache.get_or_put(1, GameMode::Aram, Position::None).unwrap();
        let mut buf = Vec::new();
        cache.encode(&mut buf).unwrap();
        buf.truncate(buf.len() - 3);

        let result = LruCache::<i64>::decode(buf.as_slice(), CacheConfig::default(), "14.1");
        assert!(matches!(result, Err(DffError::Serialization(_))));
    }
}
