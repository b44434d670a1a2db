//! Champion meta list: which positions each champion is played in
//!
//! Built from the stats site's champion summary, persisted as JSON next to
//! the champion cache and used to pick a default position when the caller
//! has none.

use crate::cache::ChampionEntry;
use crate::cache_logic::{self, EXPIRATION_DAYS};
use crate::error::DffError;
use crate::models::{ChampionId, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

/// Bump whenever the JSON layout of `ChampionMeta` changes
pub const META_FORMAT_VERSION: u16 = 1;

const NOT_ENOUGH_SAMPLES: &str = "Not enough sample count";

/// Summary row supplied by the scraping side
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChampionStats {
    pub id: ChampionId,
    #[serde(default)]
    pub is_rip: bool,
    #[serde(default)]
    pub positions: Vec<RoleStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleStats {
    pub name: String,
    pub role_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaPosition {
    pub position: Position,
    pub role_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaChampion {
    pub is_rip: bool,
    pub positions: Vec<MetaPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionMeta {
    pub created_at: OffsetDateTime,
    pub format_version: u16,
    pub game_version: String,
    pub champions: HashMap<ChampionId, MetaChampion>,
}

impl ChampionMeta {
    /// Build the meta list from summary rows.
    ///
    /// Champions without usable position data are offered every role.
    pub fn from_stats(game_version: &str, stats: &[ChampionStats]) -> Result<Self, DffError> {
        let mut champions = HashMap::with_capacity(stats.len());

        for champ in stats {
            let positions = if champ.is_rip || champ.positions.is_empty() {
                Position::ALL
                    .into_iter()
                    .map(|position| MetaPosition {
                        position,
                        role_rate: NOT_ENOUGH_SAMPLES.to_string(),
                    })
                    .collect()
            } else {
                champ
                    .positions
                    .iter()
                    .map(|role| {
                        let position: Position = role.name.parse()?;
                        Ok(MetaPosition {
                            position,
                            role_rate: format!("Pick rate: {:.1}%", role.role_rate * 100.0),
                        })
                    })
                    .collect::<Result<Vec<_>, DffError>>()?
            };

            champions.insert(
                champ.id,
                MetaChampion {
                    is_rip: champ.is_rip,
                    positions,
                },
            );
        }

        info!(
            champion_count = champions.len(),
            game_version = %game_version,
            "Built champion meta list"
        );

        Ok(Self {
            created_at: OffsetDateTime::now_utc(),
            format_version: META_FORMAT_VERSION,
            game_version: game_version.to_string(),
            champions,
        })
    }

    pub fn available_positions(&self, id: ChampionId) -> Vec<Position> {
        self.champions
            .get(&id)
            .map(|champ| champ.positions.iter().map(|p| p.position).collect())
            .unwrap_or_default()
    }

    /// Most played position, or `Position::None` for unknown champions
    pub fn default_position(&self, id: ChampionId) -> Position {
        self.champions
            .get(&id)
            .and_then(|champ| champ.positions.first())
            .map(|p| p.position)
            .unwrap_or(Position::None)
    }

    /// Copy position data onto a cache entry. Returns false if the champion
    /// is not in the meta list.
    pub fn apply_to_entry(&self, entry: &mut ChampionEntry<ChampionId>) -> bool {
        if !self.champions.contains_key(&entry.key) {
            debug!(champion_id = entry.key, "Champion missing from meta list");
            return false;
        }
        entry.available_positions = self.available_positions(entry.key);
        entry.default_position = self.default_position(entry.key);
        true
    }

    fn is_expired(&self, now: OffsetDateTime) -> bool {
        cache_logic::is_expired(Some(self.created_at), now, Duration::days(EXPIRATION_DAYS))
    }
}

/// JSON file holding the champion meta list
#[derive(Debug)]
pub struct ChampionMetaStore {
    path: PathBuf,
}

impl ChampionMetaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the meta list, rejecting expired or incompatible documents
    pub fn load(&self, game_version: &str) -> Result<ChampionMeta, DffError> {
        let content = fs::read_to_string(&self.path)?;
        let meta: ChampionMeta = serde_json::from_str(&content)?;

        if meta.is_expired(OffsetDateTime::now_utc()) {
            info!(max_age_days = EXPIRATION_DAYS, "Champion meta list expired");
            return Err(DffError::ExpiredData);
        }

        if meta.format_version != META_FORMAT_VERSION || meta.game_version != game_version {
            return Err(DffError::IncompatibleCache {
                reason: format!(
                    "meta list v{} for game {} (expected v{} for {})",
                    meta.format_version, meta.game_version, META_FORMAT_VERSION, game_version
                ),
            });
        }

        info!(
            champion_count = meta.champions.len(),
            path = %self.path.display(),
            "Loaded champion meta list from disk"
        );
        Ok(meta)
    }

    /// Load if usable, logging why not otherwise
    pub fn load_valid(&self, game_version: &str) -> Option<ChampionMeta> {
        match self.load(game_version) {
            Ok(meta) => Some(meta),
            Err(e) if e.is_not_found() => {
                debug!(path = %self.path.display(), "No champion meta list on disk");
                None
            }
            Err(e) => {
                warn!(error = %e, "Ignoring champion meta list on disk");
                None
            }
        }
    }

    pub fn save(&self, meta: &ChampionMeta) -> Result<(), DffError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(meta)?;
        fs::write(&self.path, content)?;

        info!(
            champion_count = meta.champions.len(),
            path = %self.path.display(),
            "Saved champion meta list to disk"
        );
        Ok(())
    }

    pub fn clear(&self) -> Result<(), DffError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
