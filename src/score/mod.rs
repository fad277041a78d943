use rocket::serde::{Deserialize, Serialize};

pub mod api;
mod file;
mod keeper;
mod memory;
mod store_error;

pub use file::FileScoreStore;
pub use keeper::{ScoreKeeper, ScoreReport};
pub use memory::MemoryScoreStore;
pub use store_error::*;

pub type GameScore = i64;

/// The persisted document. The key name is the on-disk contract and must not change.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct HighScore {
    pub highscore: GameScore,
}

impl HighScore {
    pub fn new(highscore: GameScore) -> Self {
        Self { highscore }
    }
}

/// A candidate score sent by a client. A missing `score` reads as zero.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
#[serde(crate = "rocket::serde")]
pub struct Submission {
    #[serde(default)]
    pub score: GameScore,
}

/// Raw persistence backend for a single game's high score.
///
/// Backends report every failure; deciding what a failure means for the
/// player is left to [`ScoreKeeper`].
#[rocket::async_trait]
pub trait ScoreStore: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    async fn read(&self) -> StoreResult<Option<GameScore>>;

    /// Replaces the stored record with `score`.
    async fn write(&self, score: GameScore) -> StoreResult<()>;
}
