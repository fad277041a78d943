use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rocket::fairing::AdHoc;
use rocket::fs::FileServer;
use rocket::{catchers, Build, Rocket};

use crate::config::ArcadeConfig;
use crate::games::{self, RouteGroup};
use crate::score::{self, FileScoreStore, ScoreKeeper, ScoreStore};

mod catcher;
mod guard;

pub use guard::*;

/// One route group bound to a URL prefix.
#[derive(Debug)]
pub struct Mount {
    prefix: String,
    group: &'static RouteGroup,
    keeper: Option<Arc<ScoreKeeper>>,
}

impl Mount {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn group(&self) -> &'static RouteGroup {
        self.group
    }

    pub fn keeper(&self) -> Option<&ScoreKeeper> {
        self.keeper.as_deref()
    }

    /// The path the group's landing page is served from.
    pub fn landing_uri(&self) -> String {
        self.prefix.clone()
    }

    /// The path the group's static subtree is served from.
    pub fn static_uri(&self) -> String {
        join_paths(&self.prefix, self.group.static_url_path)
    }
}

/// The set of mounted groups, managed as Rocket state and consulted by the
/// request guards to find which group owns a route.
#[derive(Debug, Default)]
pub struct Arcade {
    mounts: Vec<Mount>,
}

impl Arcade {
    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    /// The first group registered under `prefix`.
    pub fn find(&self, prefix: &str) -> Option<&Mount> {
        let prefix = normalize_prefix(prefix);
        self.mounts.iter().find(|mount| mount.prefix == prefix)
    }
}

/// Composes route groups under URL prefixes into one Rocket instance.
///
/// Groups are mounted in registration order. A scoring game gets one
/// [`ScoreKeeper`] no matter how many prefixes it is registered under.
pub struct Aggregator {
    config: ArcadeConfig,
    arcade: Arcade,
    keepers: HashMap<&'static str, Arc<ScoreKeeper>>,
}

impl Aggregator {
    pub fn new(config: ArcadeConfig) -> Self {
        Self {
            config,
            arcade: Arcade::default(),
            keepers: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    /// Keeps `group`'s score in `store` instead of its score file, for every
    /// prefix the game is registered under, before or after this call.
    pub fn with_store(mut self, group: &'static RouteGroup, store: impl ScoreStore + 'static) -> Self {
        let keeper = Arc::new(ScoreKeeper::new(group.name, store));
        for mount in &mut self.arcade.mounts {
            if mount.group.name == group.name && mount.keeper.is_some() {
                mount.keeper = Some(Arc::clone(&keeper));
            }
        }
        self.keepers.insert(group.name, keeper);
        self
    }

    /// Registers `group` under `prefix`. Scoring groups persist to
    /// `<score_dir>/<name>/highscore.json` unless given a store with [`Self::with_store`].
    pub fn register(mut self, prefix: &str, group: &'static RouteGroup) -> Self {
        let keeper = if group.scoring {
            let score_dir = self.config.score_dir();
            let keeper = self.keepers.entry(group.name).or_insert_with(|| {
                Arc::new(ScoreKeeper::new(
                    group.name,
                    FileScoreStore::for_game(score_dir, group.name),
                ))
            });
            Some(Arc::clone(keeper))
        } else {
            None
        };

        self.arcade.mounts.push(Mount {
            prefix: normalize_prefix(prefix),
            group,
            keeper,
        });
        self
    }

    pub fn arcade(&self) -> &Arcade {
        &self.arcade
    }

    /// Mounts every registered group onto `rocket` and hands over the state
    /// the handlers need.
    pub fn mount(self, mut rocket: Rocket<Build>) -> Rocket<Build> {
        let mut prefixes = HashSet::new();
        for mount in &self.arcade.mounts {
            if !prefixes.insert(mount.prefix.as_str()) {
                log::warn!(
                    "prefix {} is already registered; {} will collide",
                    mount.prefix,
                    mount.group.name
                );
            }

            rocket = rocket.mount(mount.prefix.as_str(), games::routes());

            let static_dir = mount.group.static_dir(&self.config.assets_dir);
            if static_dir.is_dir() {
                let static_uri = mount.static_uri();
                rocket = rocket.mount(static_uri.as_str(), FileServer::from(static_dir));
            } else {
                log::warn!(
                    "{}: no static directory at {}",
                    mount.group.name,
                    static_dir.display()
                );
            }

            if mount.keeper.is_some() {
                rocket = rocket.mount(mount.prefix.as_str(), score::api::routes());
            }
        }

        let banner = self
            .arcade
            .mounts
            .iter()
            .map(|mount| format!("{} -> {}", mount.group.name, mount.prefix))
            .collect::<Vec<_>>()
            .join(", ");

        rocket
            .register("/", catchers![catcher::internal_error])
            .attach(AdHoc::on_liftoff("Arcade banner", move |rocket| {
                let banner = banner.clone();
                Box::pin(async move {
                    let config = rocket.config();
                    log::info!(
                        "arcade listening on http://{}:{} ({})",
                        config.address,
                        config.port,
                        banner
                    );
                })
            }))
            .manage(self.config)
            .manage(self.arcade)
    }
}

/// `/snake/` and `snake` both become `/snake`; the root stays `/`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}", trimmed)
    }
}

fn join_paths(prefix: &str, path: &str) -> String {
    if prefix == "/" {
        path.to_owned()
    } else {
        format!("{}{}", prefix, path)
    }
}
