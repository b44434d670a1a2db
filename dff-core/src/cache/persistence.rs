//! Save/restore of the champion cache to a single binary file
//!
//! The engine owns the encoding; this module owns the filesystem. Saves go
//! through a temp file and a rename so a crash mid-write leaves the previous
//! file intact.

use super::lru_cache::{CacheConfig, LruCache};
use crate::error::DffError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::fs::{self, File};
use std::hash::Hash;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Load a cache saved by [`save`].
///
/// Fails with `DffError::Io` if the file cannot be opened and with
/// `DffError::IncompatibleCache` if it was written by a different format or
/// for a different game version.
pub fn restore<K>(path: &Path, config: CacheConfig, game_version: &str) -> Result<LruCache<K>, DffError>
where
    K: Hash + Eq + Clone + Debug + DeserializeOwned,
{
    let file = File::open(path)?;
    let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);
    debug!(
        path = %path.display(),
        file_size_kb = file_size / 1024,
        "Reading champion cache from disk"
    );

    let cache = LruCache::decode(BufReader::new(file), config, game_version)?;

    info!(
        entries = cache.len(),
        game_version = %game_version,
        path = %path.display(),
        "Restored champion cache from disk"
    );
    Ok(cache)
}

/// Write the cache to `path`, replacing any previous file
pub fn save<K>(cache: &LruCache<K>, path: &Path) -> Result<(), DffError>
where
    K: Hash + Eq + Clone + Debug + Serialize,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            info!(cache_dir = %parent.display(), "Created champion cache directory");
        }
    }

    let temp_path = path.with_extension("tmp");
    let written = write_temp_file(cache, &temp_path)
        .and_then(|()| fs::rename(&temp_path, path).map_err(DffError::from));
    if let Err(e) = written {
        // Leave no partial file behind
        fs::remove_file(&temp_path).ok();
        warn!(path = %path.display(), error = %e, "Failed to save champion cache");
        return Err(e);
    }

    info!(
        entries = cache.len(),
        path = %path.display(),
        "Saved champion cache to disk"
    );
    Ok(())
}

fn write_temp_file<K>(cache: &LruCache<K>, temp_path: &Path) -> Result<(), DffError>
where
    K: Hash + Eq + Clone + Debug + Serialize,
{
    let mut writer = BufWriter::new(File::create(temp_path)?);
    cache.encode(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Restore from `path`, or start empty if the file is missing, unreadable
/// or incompatible. Never fails.
pub fn restore_or_new<K>(path: &Path, config: CacheConfig, game_version: &str) -> LruCache<K>
where
    K: Hash + Eq + Clone + Debug + DeserializeOwned,
{
    match restore(path, config.clone(), game_version) {
        Ok(cache) => cache,
        Err(e) if e.is_not_found() => {
            info!(path = %path.display(), "No existing champion cache found, starting empty");
            LruCache::new(config, game_version)
        }
        Err(e) if e.is_incompatible() => {
            info!(error = %e, "Discarding incompatible champion cache");
            LruCache::new(config, game_version)
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Failed to restore champion cache, starting empty"
            );
            LruCache::new(config, game_version)
        }
    }
}
