//! Core data structures.

pub mod game;
pub mod stats;

pub use game::{Color, GameRecord, Opening, PlayerSide, Players, UserRef};
pub use stats::{NamedCount, RatingJourney, StatsSummary};
