//! Game-side data shapes shared by the cache and its collaborators.
//!
//! The rune and item shapes mirror the JSON the local game client accepts.
//! The cache stores them verbatim and never looks inside.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DffError;

/// Champion identity as reported by the game client
pub type ChampionId = i64;

/// Lane role. `None` means "use the champion's default position".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    None,
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Position {
    /// The five concrete roles, in storage order
    pub const ALL: [Position; 5] = [
        Position::Top,
        Position::Jungle,
        Position::Mid,
        Position::Adc,
        Position::Support,
    ];

    /// Index into a champion's per-position slots. `None` has no slot.
    pub fn slot_index(self) -> Option<usize> {
        match self {
            Position::None => None,
            Position::Top => Some(0),
            Position::Jungle => Some(1),
            Position::Mid => Some(2),
            Position::Adc => Some(3),
            Position::Support => Some(4),
        }
    }

    pub fn is_concrete(self) -> bool {
        self != Position::None
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::None => write!(f, ""),
            Position::Top => write!(f, "Top"),
            Position::Jungle => write!(f, "Jungle"),
            Position::Mid => write!(f, "Mid"),
            Position::Adc => write!(f, "Adc"),
            Position::Support => write!(f, "Support"),
        }
    }
}

impl FromStr for Position {
    type Err = DffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TOP" => Ok(Position::Top),
            "JUNGLE" => Ok(Position::Jungle),
            "MID" | "MIDDLE" => Ok(Position::Mid),
            "ADC" | "BOTTOM" => Ok(Position::Adc),
            "SUPPORT" | "UTILITY" => Ok(Position::Support),
            _ => Err(DffError::UnknownRole(s.to_string())),
        }
    }
}

/// Game mode, keyed by the client's queue id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Default,
    Aram,
    Urf,
}

impl GameMode {
    pub fn queue_id(self) -> i64 {
        match self {
            GameMode::Default => 0,
            GameMode::Aram => 450,
            GameMode::Urf => 900,
        }
    }

    /// Unknown queues fall back to the default (position based) mode
    pub fn from_queue_id(queue_id: i64) -> GameMode {
        match queue_id {
            450 => GameMode::Aram,
            900 => GameMode::Urf,
            _ => GameMode::Default,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Default => write!(f, "Default"),
            GameMode::Aram => write!(f, "ARAM"),
            GameMode::Urf => write!(f, "URF"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spells {
    pub spell1_id: i64,
    pub spell2_id: i64,
}

/// Rune page as posted to the game client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunePage {
    pub name: String,
    pub current: bool,
    pub primary_style_id: i64,
    pub sub_style_id: i64,
    pub selected_perk_ids: Vec<i64>,
}

/// A scraped rune page together with its aggregate statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DffRunePage {
    pub name: String,
    pub pick_rate: f64,
    pub win_rate: f64,
    pub sample_count: i64,
    pub page: RunePage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub count: i64,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBlock {
    pub hide_if_summoner_spell: String,
    pub items: Vec<Item>,
    pub show_if_summoner_spell: String,
    #[serde(rename = "type")]
    pub block_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSet {
    pub associated_champions: Vec<ChampionId>,
    pub associated_maps: Vec<i64>,
    pub blocks: Vec<ItemBlock>,
    pub map: String,
    pub mode: String,
    pub sortrank: i64,
    pub started_from: String,
    pub title: String,
    #[serde(rename = "type")]
    pub set_type: String,
    pub uid: String,
}

/// Item page as posted to the game client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub account_id: i64,
    pub item_sets: Vec<ItemSet>,
    pub timestamp: i64,
}
