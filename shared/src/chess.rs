//! Decoding schema for the chess platform's public API.
//!
//! Every field is optional and falls back to a default, so a response with
//! missing keys never fails to decode. Values of the wrong type still do.

use std::str::FromStr;

use serde::Deserialize;
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArchiveList {
    /// Monthly archive urls, oldest first.
    pub archives: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonthlyArchive {
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Game {
    pub url: String,
    /// Unix seconds.
    pub end_time: Option<i64>,
    pub white: Option<Player>,
    pub black: Option<Player>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Player {
    pub username: String,
    pub rating: Option<u32>,
    pub result: String,
}

impl Player {
    pub fn is(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username)
    }

    pub fn result(&self) -> GameResult {
        GameResult::from_str(&self.result).unwrap_or_else(|_| GameResult::Other(self.result.clone()))
    }
}

impl Game {
    /// Seat the given user occupied in this game, white checked first.
    pub fn seat_of(&self, username: &str) -> Option<&Player> {
        self.white
            .iter()
            .chain(self.black.iter())
            .find(|player| player.is(username))
    }

    pub fn outcome_for(&self, username: &str) -> Outcome {
        self.seat_of(username)
            .map_or(Outcome::Other, |player| player.result().outcome())
    }
}

/// Per-seat result codes reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum GameResult {
    Win,
    Checkmated,
    Agreed,
    Repetition,
    Timeout,
    Resigned,
    Stalemate,
    Lose,
    Insufficient,
    #[strum(serialize = "50move")]
    FiftyMove,
    Abandoned,
    KingOfTheHill,
    ThreeCheck,
    TimeVsInsufficient,
    BughousePartnerLose,
    #[strum(default)]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    /// Draws, resignations, abandonment and anything else.
    Other,
}

impl GameResult {
    pub const fn outcome(&self) -> Outcome {
        match self {
            Self::Win => Outcome::Win,
            Self::Checkmated | Self::Timeout => Outcome::Loss,
            _ => Outcome::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum GameMode {
    Blitz,
    Rapid,
    Bullet,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerStats {
    pub chess_blitz: Option<ModeStats>,
    pub chess_rapid: Option<ModeStats>,
    pub chess_bullet: Option<ModeStats>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModeStats {
    pub last: Option<RatingSnapshot>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RatingSnapshot {
    pub rating: Option<u32>,
}

impl PlayerStats {
    pub const fn mode(&self, mode: GameMode) -> Option<&ModeStats> {
        match mode {
            GameMode::Blitz => self.chess_blitz.as_ref(),
            GameMode::Rapid => self.chess_rapid.as_ref(),
            GameMode::Bullet => self.chess_bullet.as_ref(),
        }
    }

    /// Latest rating in the given mode, 0 when the user never played it.
    pub fn last_rating(&self, mode: GameMode) -> u32 {
        self.mode(mode)
            .and_then(|stats| stats.last.as_ref())
            .and_then(|last| last.rating)
            .unwrap_or_default()
    }
}
