//! Storage module for exporting leaderboard pages

mod md;

pub use md::write_markdown;
