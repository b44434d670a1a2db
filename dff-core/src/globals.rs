use crate::cache::{CacheConfig, ChampionCache, restore_or_new, save};
use crate::champion_data::lock_cache;
use crate::error::DffError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, info};

// Global singleton - all cache access goes through this one mutex
static CHAMPION_CACHE: OnceLock<Arc<Mutex<ChampionCache>>> = OnceLock::new();
static CHAMPION_CACHE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Restore the champion cache from disk (or start empty) and install it as
/// the process-wide instance. Call once at startup, after the game version
/// is known.
pub fn initialize_caches(game_version: &str) -> Result<(), DffError> {
    initialize_caches_from(&get_champion_cache_path(), game_version)
}

/// Like `initialize_caches`, but backed by the cache file at `path`.
/// Later `save_caches` calls write back to the same file.
pub fn initialize_caches_from(path: &Path, game_version: &str) -> Result<(), DffError> {
    if CHAMPION_CACHE.get().is_some() {
        debug!("Champion cache already initialized, keeping existing instance");
        return Ok(());
    }

    let cache: ChampionCache = restore_or_new(path, CacheConfig::default(), game_version);
    info!(
        entries = cache.len(),
        game_version = %game_version,
        path = %path.display(),
        "Champion cache initialized at startup"
    );

    if CHAMPION_CACHE.set(Arc::new(Mutex::new(cache))).is_err() {
        debug!("Champion cache initialized concurrently, keeping existing instance");
        return Ok(());
    }
    CHAMPION_CACHE_PATH.get_or_init(|| path.to_path_buf());
    Ok(())
}

pub fn get_champion_cache() -> Result<&'static Arc<Mutex<ChampionCache>>, DffError> {
    CHAMPION_CACHE.get().ok_or_else(|| {
        DffError::Cache(
            "Champion cache not initialized - call initialize_caches() at startup".to_string(),
        )
    })
}

// Save the in-memory cache to disk (without shutdown)
pub fn save_caches() -> Result<(), DffError> {
    let cache = get_champion_cache()?;
    let guard = lock_cache(cache)?;
    let path = CHAMPION_CACHE_PATH
        .get()
        .cloned()
        .unwrap_or_else(get_champion_cache_path);
    save(&*guard, &path)?;
    debug!(entries = guard.len(), "Champion cache saved to disk");
    Ok(())
}

// Shutdown function - save all caches to disk
pub fn shutdown_caches() -> Result<(), DffError> {
    info!("Saving champion cache to disk before shutdown");
    save_caches()?;
    info!("Champion cache saved successfully");
    Ok(())
}

/// Get the actual cache directory path
pub fn get_cache_directory_path() -> PathBuf {
    ProjectDirs::from("", "", "dff")
        .map(|proj_dirs| proj_dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("dff-cache"))
}

/// Get the champion cache file path
pub fn get_champion_cache_path() -> PathBuf {
    get_cache_directory_path().join("champion_cache.bin")
}

/// Get the champion meta list file path
pub fn get_champion_meta_path() -> PathBuf {
    get_cache_directory_path().join("champion_meta.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::{GameMode, Position};

    // The only test in this binary that installs the process-wide cache
    #[test]
    fn test_initialize_save_and_shutdown() {
        let dir = std::env::temp_dir().join(format!("dff-globals-{}", std::process::id()));
        let path = dir.join("champion_cache.bin");

        // No cache file yet: starts empty
        assert!(initialize_caches_from(&path, "14.1.1").is_ok());
        assert!(initialize_caches_from(&path, "14.1.1").is_ok());

        let cache = get_champion_cache().unwrap();
        {
            let mut guard = cache.lock().unwrap();
            assert!(guard.is_empty());
            assert_eq!(guard.game_version(), "14.1.1");
            guard.get_or_put(266, GameMode::Aram, Position::None).unwrap();
        }

        shutdown_caches().unwrap();
        assert!(path.exists());

        let restored: ChampionCache =
            crate::cache::restore(&path, CacheConfig::default(), "14.1.1").unwrap();
        assert_eq!(restored.keys_mru(), vec![266]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_cache_paths() {
        let dir = get_cache_directory_path();
        assert!(get_champion_cache_path().starts_with(&dir));
        assert!(get_champion_meta_path().ends_with("champion_meta.json"));
    }
}
