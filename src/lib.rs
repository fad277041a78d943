//! An arcade of browser games served by Rocket, with per-game high scores
//! kept in flat JSON files.

pub mod aggregator;
pub mod apps;
pub mod cli;
pub mod config;
pub mod games;
pub mod score;
#[cfg(test)]
mod tests;
