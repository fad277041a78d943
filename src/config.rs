use std::path::{Path, PathBuf};

use rocket::figment::providers::{Env, Format, Serialized, Toml};
use rocket::figment::{Figment, Profile};
use rocket::fs::relative;
use rocket::serde::{Deserialize, Serialize};

/// Arcade settings, read from the same figment as Rocket's own configuration:
/// entry point defaults, then `Rocket.toml`, then `ROCKET_*` environment variables,
/// then command line flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ArcadeConfig {
    /// Root of the per-game `templates/` and `static/` directories.
    pub assets_dir: PathBuf,
    /// Root of the per-game score files. Defaults to `assets_dir`, so every
    /// entry point resolves the same `<game>/highscore.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_dir: Option<PathBuf>,
    /// Show request details in error responses.
    #[serde(default)]
    pub debug: bool,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(relative!("assets")),
            score_dir: None,
            debug: false,
        }
    }
}

impl ArcadeConfig {
    pub fn score_dir(&self) -> &Path {
        self.score_dir.as_deref().unwrap_or(&self.assets_dir)
    }
}

/// Rocket's standard figment with an entry point specific default port.
pub fn figment(default_port: u16) -> Figment {
    Figment::from(rocket::Config::default())
        .merge(Serialized::defaults(ArcadeConfig::default()))
        .merge(Serialized::default("port", default_port))
        .merge(Toml::file(Env::var_or("ROCKET_CONFIG", "Rocket.toml")).nested())
        .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]).global())
        .select(Profile::from_env_or(
            "ROCKET_PROFILE",
            rocket::Config::DEFAULT_PROFILE,
        ))
}

#[derive(Debug)]
pub enum LaunchError {
    Config(rocket::figment::Error),
    Rocket(Box<rocket::Error>),
}

impl std::error::Error for LaunchError {}

impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "invalid configuration: {}", error),
            Self::Rocket(error) => write!(f, "server failed: {}", error),
        }
    }
}

impl From<rocket::figment::Error> for LaunchError {
    fn from(error: rocket::figment::Error) -> Self {
        Self::Config(error)
    }
}

impl From<rocket::Error> for LaunchError {
    fn from(error: rocket::Error) -> Self {
        Self::Rocket(Box::new(error))
    }
}
