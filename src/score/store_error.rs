use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        path: PathBuf,
        reason: String,
    },
    Unavailable {
        reason: String,
    },
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to access {}: {}", path.display(), source)
            }
            Self::Malformed { path, reason } => {
                write!(f, "malformed score file {}: {}", path.display(), reason)
            }
            Self::Unavailable { reason } => write!(f, "score store is unavailable: {}", reason),
        }
    }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
