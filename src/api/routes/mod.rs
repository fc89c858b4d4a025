pub mod profile;
pub mod stats;
