//! Per-champion payload stored by the LRU cache

use crate::models::{DffRunePage, GameMode, ItemPage, Position, Spells};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Scraped configuration for one (champion, mode, position) slot.
///
/// `creation_time == None` marks a slot that was never populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedData {
    pub creation_time: Option<OffsetDateTime>,
    pub pick_rate: String,
    pub source_url: String,
    pub spells: Spells,
    pub rune_pages: Vec<DffRunePage>,
    pub item_page: ItemPage,
}

impl CachedData {
    /// Stamped and carrying at least one rune page
    pub fn is_complete(&self) -> bool {
        self.creation_time.is_some() && !self.rune_pages.is_empty()
    }

    pub fn reset(&mut self) {
        *self = CachedData::default();
    }
}

/// Everything cached for one champion. Evicted as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionEntry<K> {
    pub key: K,
    pub urf: CachedData,
    pub aram: CachedData,
    pub default: [CachedData; 5],
    pub available_positions: Vec<Position>,
    pub default_position: Position,
}

impl<K> ChampionEntry<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            urf: CachedData::default(),
            aram: CachedData::default(),
            default: Default::default(),
            available_positions: Vec::new(),
            default_position: Position::None,
        }
    }

    /// The slot addressed by `mode`/`position`. `None` only for the default
    /// mode without a concrete position.
    pub fn slot(&self, mode: GameMode, position: Position) -> Option<&CachedData> {
        match mode {
            GameMode::Urf => Some(&self.urf),
            GameMode::Aram => Some(&self.aram),
            GameMode::Default => position.slot_index().map(|i| &self.default[i]),
        }
    }

    pub fn slot_mut(&mut self, mode: GameMode, position: Position) -> Option<&mut CachedData> {
        match mode {
            GameMode::Urf => Some(&mut self.urf),
            GameMode::Aram => Some(&mut self.aram),
            GameMode::Default => position.slot_index().map(|i| &mut self.default[i]),
        }
    }

    /// Iterate every slot with its address, default slots in role order
    pub fn slots(&self) -> impl Iterator<Item = (GameMode, Position, &CachedData)> {
        Position::ALL
            .into_iter()
            .zip(self.default.iter())
            .map(|(p, data)| (GameMode::Default, p, data))
            .chain([
                (GameMode::Aram, Position::None, &self.aram),
                (GameMode::Urf, Position::None, &self.urf),
            ])
    }
}
