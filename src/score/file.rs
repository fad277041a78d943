use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rocket::serde::json::serde_json;
use rocket::serde::Deserialize;

use super::*;

/// Keeps the high score as `{"highscore": <int>}` in a single JSON file.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the record,
/// so a crash mid-write leaves the previous record intact.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

// A record that deserializes but lacks the key (or holds null) counts as empty.
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
struct StoredRecord {
    #[serde(default)]
    highscore: Option<GameScore>,
}

impl FileScoreStore {
    pub const FILE_NAME: &'static str = "highscore.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The canonical location of a game's record: `<score_dir>/<game>/highscore.json`.
    pub fn for_game(score_dir: &Path, game_name: &str) -> Self {
        Self::new(score_dir.join(game_name).join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[rocket::async_trait]
impl ScoreStore for FileScoreStore {
    async fn read(&self) -> StoreResult<Option<GameScore>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error(error)),
        };

        let record: StoredRecord =
            serde_json::from_slice(&bytes).map_err(|error| StoreError::Malformed {
                path: self.path.clone(),
                reason: error.to_string(),
            })?;
        Ok(record.highscore)
    }

    async fn write(&self, score: GameScore) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|error| self.io_error(error))?;
            }
        }

        let contents =
            serde_json::to_vec(&HighScore::new(score)).map_err(|error| StoreError::Malformed {
                path: self.path.clone(),
                reason: error.to_string(),
            })?;

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, contents)
            .await
            .map_err(|error| self.io_error(error))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|error| self.io_error(error))?;
        Ok(())
    }
}
