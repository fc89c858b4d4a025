//! Aggregated statistics model.
//!
//! Output of the stats aggregator, serialized with the exact field names the
//! frontend consumes (`totalGames`, `topOpenings`, ...).

use serde::{Deserialize, Serialize};

/// A name with an occurrence count, used for top-N lists and the favorite
/// time control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: u32,
}

impl NamedCount {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Rating change from the first to the last rated game in the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingJourney {
    pub start: i32,
    pub end: i32,
    pub diff: i32,
}

/// Summary statistics over one player's game history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_games: u32,
    /// Up to 5 openings, descending by count.
    pub top_openings: Vec<NamedCount>,
    /// Up to 5 opponents, descending by count.
    pub top_opponents: Vec<NamedCount>,
    pub max_win_streak: u32,
    pub max_lose_streak: u32,
    pub favorite_time_control: NamedCount,
    /// Move count of the longest game.
    pub longest_game: u32,
    pub rating_journey: RatingJourney,
}

impl Default for StatsSummary {
    fn default() -> Self {
        Self {
            total_games: 0,
            top_openings: Vec::new(),
            top_opponents: Vec::new(),
            max_win_streak: 0,
            max_lose_streak: 0,
            favorite_time_control: NamedCount::new("unknown", 0),
            longest_game: 0,
            rating_journey: RatingJourney::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_camel_case() {
        let summary = StatsSummary::default();
        let json = serde_json::to_value(&summary).unwrap();
        let obj = json.as_object().unwrap();

        for key in [
            "totalGames",
            "topOpenings",
            "topOpponents",
            "maxWinStreak",
            "maxLoseStreak",
            "favoriteTimeControl",
            "longestGame",
            "ratingJourney",
        ] {
            assert!(obj.contains_key(key), "missing field {key}");
        }
        assert_eq!(obj.len(), 8);
    }

    #[test]
    fn test_default_summary() {
        let summary = StatsSummary::default();

        assert_eq!(summary.total_games, 0);
        assert!(summary.top_openings.is_empty());
        assert_eq!(summary.favorite_time_control, NamedCount::new("unknown", 0));
        assert_eq!(summary.rating_journey, RatingJourney::default());
    }

    #[test]
    fn test_summary_round_trip() {
        let summary = StatsSummary {
            total_games: 2,
            top_openings: vec![NamedCount::new("Italian Game", 2)],
            top_opponents: vec![NamedCount::new("bob", 1), NamedCount::new("carol", 1)],
            max_win_streak: 1,
            max_lose_streak: 1,
            favorite_time_control: NamedCount::new("blitz", 2),
            longest_game: 42,
            rating_journey: RatingJourney {
                start: 1500,
                end: 1512,
                diff: 12,
            },
        };

        let json = serde_json::to_string(&summary).unwrap();
        let parsed: StatsSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, parsed);
    }
}
