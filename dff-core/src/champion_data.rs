//! Cache-gated access to scraped champion data
//!
//! The polling loop asks for (champion, mode, position). A fresh slot is
//! returned straight from the cache; otherwise the data source is awaited
//! and its result is written into the slot `get_or_put` hands back.

use crate::cache::{CachedData, ChampionCache};
use crate::champion_meta::ChampionMeta;
use crate::error::DffError;
use crate::models::{ChampionId, GameMode, Position};
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Produces champion data on a cache miss (the stats-site scraper)
pub trait ChampionDataSource {
    fn fetch(
        &self,
        champion_id: ChampionId,
        mode: GameMode,
        position: Position,
    ) -> impl Future<Output = Result<CachedData, DffError>> + Send;
}

/// Result of a cache-gated lookup
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedData {
    pub data: CachedData,
    /// Concrete position the data was stored under
    pub position: Position,
    pub from_cache: bool,
}

pub(crate) fn lock_cache(cache: &Mutex<ChampionCache>) -> Result<MutexGuard<'_, ChampionCache>, DffError> {
    cache
        .lock()
        .map_err(|e| DffError::Cache(format!("Champion cache lock poisoned: {}", e)))
}

/// Pick the position to address for `mode`.
///
/// Only the default mode with `Position::None` needs resolving: the entry's
/// own default position wins, then the meta list (which is written back
/// onto the entry).
pub fn resolve_position(
    cache: &mut ChampionCache,
    meta: Option<&ChampionMeta>,
    champion_id: ChampionId,
    mode: GameMode,
    position: Position,
) -> Result<Position, DffError> {
    if mode != GameMode::Default || position.is_concrete() {
        return Ok(position);
    }

    if let Some(entry) = cache.lookup_entry(&champion_id) {
        if entry.default_position.is_concrete() {
            return Ok(entry.default_position);
        }
    }

    let resolved = meta
        .map(|meta| meta.default_position(champion_id))
        .unwrap_or(Position::None);
    if !resolved.is_concrete() {
        return Err(DffError::UnresolvedPosition);
    }

    // Entry is created by the caller's get_or_put if it does not exist yet
    if let (Some(meta), Some(entry)) = (meta, cache.lookup_entry(&champion_id)) {
        meta.apply_to_entry(entry);
    }

    debug!(champion_id = champion_id, position = %resolved, "Resolved default position");
    Ok(resolved)
}

/// Return cached data for the champion, fetching it from `source` on a miss.
///
/// The cache lock is released while the source is awaited.
pub async fn get_or_fetch_champion_data<S>(
    cache: &Mutex<ChampionCache>,
    meta: Option<&ChampionMeta>,
    champion_id: ChampionId,
    mode: GameMode,
    position: Position,
    source: &S,
) -> Result<FetchedData, DffError>
where
    S: ChampionDataSource,
{
    // Check cache first (separate scope to release lock)
    let position = {
        let mut guard = lock_cache(cache)?;
        let position = resolve_position(&mut guard, meta, champion_id, mode, position)?;
        let (data, fresh) = guard.get_or_put(champion_id, mode, position)?;
        if fresh {
            return Ok(FetchedData {
                data: data.clone(),
                position,
                from_cache: true,
            });
        }

        if let Some(meta) = meta {
            if let Some(entry) = guard.lookup_entry(&champion_id) {
                if entry.available_positions.is_empty() {
                    meta.apply_to_entry(entry);
                }
            }
        }
        position
    };

    debug!(
        champion_id = champion_id,
        mode = %mode,
        position = %position,
        "Champion cache MISS, fetching from source"
    );
    let mut fetched = source.fetch(champion_id, mode, position).await?;
    if fetched.creation_time.is_none() {
        fetched.creation_time = Some(OffsetDateTime::now_utc());
    }

    // Write into the slot handed back by get_or_put (separate scope to release lock)
    {
        let mut guard = lock_cache(cache)?;
        let (slot, _) = guard.get_or_put(champion_id, mode, position)?;
        *slot = fetched.clone();
    }

    info!(
        champion_id = champion_id,
        mode = %mode,
        position = %position,
        rune_pages = fetched.rune_pages.len(),
        "Champion data cached"
    );

    Ok(FetchedData {
        data: fetched,
        position,
        from_cache: false,
    })
}
