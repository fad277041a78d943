use std::sync::Mutex;

use super::*;

/// Keeps the record in memory. Used in tests and wherever persistence is not wanted.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    record: Mutex<Option<GameScore>>,
    reject_writes: bool,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(score: GameScore) -> Self {
        Self {
            record: Mutex::new(Some(score)),
            reject_writes: false,
        }
    }

    /// A store whose every write fails, for exercising storage-failure paths.
    pub fn read_only(initial: Option<GameScore>) -> Self {
        Self {
            record: Mutex::new(initial),
            reject_writes: true,
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable {
            reason: "record lock poisoned".to_owned(),
        }
    }
}

#[rocket::async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn read(&self) -> StoreResult<Option<GameScore>> {
        let record = self.record.lock().map_err(|_| Self::poisoned())?;
        Ok(*record)
    }

    async fn write(&self, score: GameScore) -> StoreResult<()> {
        if self.reject_writes {
            return Err(StoreError::Unavailable {
                reason: "store is read-only".to_owned(),
            });
        }
        let mut record = self.record.lock().map_err(|_| Self::poisoned())?;
        *record = Some(score);
        Ok(())
    }
}
