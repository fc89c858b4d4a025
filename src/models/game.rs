//! Game record model.
//!
//! Mirrors the shape of one line of the Lichess "export games of a user"
//! NDJSON stream. Almost every field is optional upstream; the aggregator
//! applies the documented defaults, so deserialization stays permissive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side won the game. Absent in the source means draw or ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Account reference inside a player side. Anonymous players have no user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRef {
    /// Lowercase-comparable handle.
    pub id: Option<String>,
    /// Display name (case-preserving).
    pub name: Option<String>,
}

/// One side of the board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerSide {
    pub user: Option<UserRef>,
    pub rating: Option<i32>,
}

/// Both sides of the board.
///
/// Lichess always emits the `players` object, but a side can be missing in
/// corrupt exports; that case is surfaced as a hard error by the aggregator
/// rather than silently defaulted, since side resolution depends on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Players {
    pub white: Option<PlayerSide>,
    pub black: Option<PlayerSide>,
}

/// Opening metadata, present when the export is requested with
/// `opening=true` and the game reached book theory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opening {
    pub name: String,
}

/// One game as reported by Lichess.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Opaque game identifier.
    pub id: String,

    /// Time-control category label ("bullet", "blitz", "rapid", ...).
    pub speed: Option<String>,

    pub opening: Option<Opening>,

    /// Whitespace-delimited move list as a single string.
    #[serde(default)]
    pub moves: String,

    pub winner: Option<Color>,

    #[serde(default)]
    pub players: Players,

    /// Creation timestamp, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl GameRecord {
    /// Move count: number of whitespace-separated tokens.
    pub fn move_count(&self) -> usize {
        self.moves.split_whitespace().count()
    }
}
