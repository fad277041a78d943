use rocket::serde::Serialize;
use tokio::sync::Mutex;

use super::*;

/// Best-effort high score bookkeeping on top of a [`ScoreStore`].
///
/// Every storage failure is logged and then degraded: a failed read counts as
/// no score yet, a failed write counts as "not a new record". Read-modify-write
/// cycles are serialised so concurrent submissions cannot lose a record.
pub struct ScoreKeeper {
    game_name: String,
    store: Box<dyn ScoreStore>,
    lock: Mutex<()>,
}

/// Outcome of a submission, as reported back to the player.
#[derive(Clone, Copy, Serialize, PartialEq, Eq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ScoreReport {
    pub success: bool,
    pub is_new_record: bool,
    pub highscore: GameScore,
}

impl ScoreKeeper {
    pub fn new(game_name: impl Into<String>, store: impl ScoreStore + 'static) -> Self {
        Self {
            game_name: game_name.into(),
            store: Box::new(store),
            lock: Mutex::new(()),
        }
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    /// The current high score, or zero if none can be read.
    pub async fn load(&self) -> GameScore {
        let _guard = self.lock.lock().await;
        self.current().await
    }

    /// Stores `candidate` if it beats the current high score.
    /// Returns whether a new record was written.
    pub async fn save(&self, candidate: GameScore) -> bool {
        let _guard = self.lock.lock().await;
        self.save_locked(candidate).await
    }

    /// Saves `candidate` and reports the high score as it stands afterwards.
    pub async fn submit(&self, candidate: GameScore) -> ScoreReport {
        let _guard = self.lock.lock().await;
        let is_new_record = self.save_locked(candidate).await;
        ScoreReport {
            success: true,
            is_new_record,
            highscore: self.current().await,
        }
    }

    async fn current(&self) -> GameScore {
        match self.store.read().await {
            Ok(score) => score.unwrap_or(0),
            Err(error) => {
                log::warn!("{}: treating high score as 0: {}", self.game_name, error);
                0
            }
        }
    }

    async fn save_locked(&self, candidate: GameScore) -> bool {
        let current = self.current().await;
        if candidate <= current {
            return false;
        }

        match self.store.write(candidate).await {
            Ok(()) => {
                log::info!("{}: new high score {} (was {})", self.game_name, candidate, current);
                true
            }
            Err(error) => {
                log::warn!("{}: failed to save high score {}: {}", self.game_name, candidate, error);
                false
            }
        }
    }
}

impl std::fmt::Debug for ScoreKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreKeeper")
            .field("game_name", &self.game_name)
            .finish_non_exhaustive()
    }
}
