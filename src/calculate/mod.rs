//! Statistics calculation engine.
//!
//! Computes derived metrics from one player's game history:
//! - Opening and opponent frequency (top 5)
//! - Favorite time control
//! - Win/lose streaks
//! - Longest game and rating trajectory
//!
//! The aggregator is a pure single-pass fold over caller-ordered games; it
//! holds no state across calls and never re-sorts its input.

use indexmap::IndexMap;
use thiserror::Error;

use crate::models::{Color, GameRecord, NamedCount, PlayerSide, RatingJourney, StatsSummary};

/// How many openings/opponents the summary keeps.
const TOP_N: usize = 5;

/// Errors produced while aggregating a batch of games.
///
/// One bad record fails the whole batch: partial summaries over silently
/// skipped games are worse than an explicit error.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("game {game_id} is missing the {side} player side")]
    MalformedRecord {
        game_id: String,
        side: &'static str,
    },

    #[error("user {username} played in neither side of game {game_id}")]
    PlayerNotInGame { game_id: String, username: String },
}

/// Fold a chronologically ordered game sequence into summary statistics.
///
/// `username` must already be lowercased by the caller; it is matched against
/// each game's side handles to resolve which color the player occupied.
pub fn aggregate(games: &[GameRecord], username: &str) -> Result<StatsSummary, AggregateError> {
    let mut openings: IndexMap<String, u32> = IndexMap::new();
    let mut opponents: IndexMap<String, u32> = IndexMap::new();
    let mut time_controls: IndexMap<String, u32> = IndexMap::new();

    let mut longest_game: u32 = 0;
    let mut start_rating: Option<i32> = None;
    let mut end_rating: Option<i32> = None;

    let mut current_win_streak: u32 = 0;
    let mut current_lose_streak: u32 = 0;
    let mut max_win_streak: u32 = 0;
    let mut max_lose_streak: u32 = 0;

    for game in games {
        let color = resolve_color(game, username)?;
        let (own, other) = match color {
            Color::White => (side(game, "white")?, side(game, "black")?),
            Color::Black => (side(game, "black")?, side(game, "white")?),
        };

        if let Some(rating) = own.rating {
            start_rating.get_or_insert(rating);
            end_rating = Some(rating);
        }

        if let Some(opening) = &game.opening {
            let name = simplify_opening(&opening.name);
            *openings.entry(name.to_string()).or_default() += 1;
        }

        let opponent = other
            .user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .unwrap_or("Anonymous");
        if opponent != "Anonymous" {
            *opponents.entry(opponent.to_string()).or_default() += 1;
        }

        let speed = game.speed.as_deref().unwrap_or("unknown");
        *time_controls.entry(speed.to_string()).or_default() += 1;

        let moves = game.move_count() as u32;
        if moves > longest_game {
            longest_game = moves;
        }

        match game.winner {
            Some(winner) if winner == color => {
                current_win_streak += 1;
                current_lose_streak = 0;
                max_win_streak = max_win_streak.max(current_win_streak);
            }
            Some(_) => {
                current_lose_streak += 1;
                current_win_streak = 0;
                max_lose_streak = max_lose_streak.max(current_lose_streak);
            }
            // Draws and ongoing games break both streaks.
            None => {
                current_win_streak = 0;
                current_lose_streak = 0;
            }
        }
    }

    let favorite_time_control = top_counts(&time_controls, 1)
        .into_iter()
        .next()
        .unwrap_or_else(|| NamedCount::new("unknown", 0));

    let start = start_rating.unwrap_or(0);
    let end = end_rating.unwrap_or(0);

    Ok(StatsSummary {
        total_games: games.len() as u32,
        top_openings: top_counts(&openings, TOP_N),
        top_opponents: top_counts(&opponents, TOP_N),
        max_win_streak,
        max_lose_streak,
        favorite_time_control,
        longest_game,
        rating_journey: RatingJourney {
            start,
            end,
            diff: end - start,
        },
    })
}

/// Strip variation suffixes from an opening name: truncate at the first `:`,
/// then at the first `,`.
pub fn simplify_opening(name: &str) -> &str {
    let name = name.split(':').next().unwrap_or(name);
    name.split(',').next().unwrap_or(name)
}

/// Resolve which color the player occupied in this game.
///
/// The reference frontend silently treated an unmatched username as the
/// black side, which misattributes every downstream metric. Here an
/// unmatched username is a hard error instead.
fn resolve_color(game: &GameRecord, username: &str) -> Result<Color, AggregateError> {
    if handle_matches(side(game, "white")?, username) {
        Ok(Color::White)
    } else if handle_matches(side(game, "black")?, username) {
        Ok(Color::Black)
    } else {
        Err(AggregateError::PlayerNotInGame {
            game_id: game.id.clone(),
            username: username.to_string(),
        })
    }
}

fn handle_matches(side: &PlayerSide, username: &str) -> bool {
    side.user
        .as_ref()
        .and_then(|u| u.id.as_deref())
        .is_some_and(|id| id.to_lowercase() == username)
}

fn side<'a>(game: &'a GameRecord, which: &'static str) -> Result<&'a PlayerSide, AggregateError> {
    let side = match which {
        "white" => game.players.white.as_ref(),
        _ => game.players.black.as_ref(),
    };
    side.ok_or_else(|| AggregateError::MalformedRecord {
        game_id: game.id.clone(),
        side: which,
    })
}

/// Sort a tally descending by count and keep the first `limit` entries.
///
/// The sort is stable over an insertion-ordered map, so ties break by
/// first-encounter order and the output is deterministic.
fn top_counts(tally: &IndexMap<String, u32>, limit: usize) -> Vec<NamedCount> {
    let mut entries: Vec<NamedCount> = tally
        .iter()
        .map(|(name, count)| NamedCount::new(name.clone(), *count))
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}
