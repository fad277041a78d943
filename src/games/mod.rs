use std::path::{Path, PathBuf};

use minijinja::context;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::Serialize;
use rocket::{get, routes, Route, State};

use crate::aggregator::{Arcade, Mount, MountedGroup};
use crate::config::ArcadeConfig;

/// A mountable bundle of a landing page and a static asset subtree.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteGroup {
    pub name: &'static str,
    pub title: &'static str,
    pub template: &'static str,
    /// Where the static subtree is served, relative to the group's prefix.
    /// Front-end pages reference these paths literally.
    pub static_url_path: &'static str,
    pub scoring: bool,
}

impl RouteGroup {
    pub fn landing_page(&self, assets_dir: &Path) -> PathBuf {
        assets_dir
            .join(self.name)
            .join("templates")
            .join(self.template)
    }

    pub fn static_dir(&self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(self.name).join("static")
    }
}

pub const HOME: RouteGroup = RouteGroup {
    name: "home",
    title: "Neon Arcade",
    template: "index.html",
    static_url_path: "/static",
    scoring: false,
};

pub const FIGHTER: RouteGroup = RouteGroup {
    name: "fighter",
    title: "Neon Fighter",
    template: "fighter.html",
    static_url_path: "/fighter/static",
    scoring: false,
};

pub const HOCKEY: RouteGroup = RouteGroup {
    name: "hockey",
    title: "Neon Hockey",
    template: "hockey.html",
    static_url_path: "/hockey/static",
    scoring: false,
};

pub const JUMPER: RouteGroup = RouteGroup {
    name: "jumper",
    title: "Neon Jumper",
    template: "jumper.html",
    static_url_path: "/jumper/static",
    scoring: false,
};

pub const PONG: RouteGroup = RouteGroup {
    name: "pong",
    title: "Neon Pong",
    template: "pong.html",
    static_url_path: "/pong/static",
    scoring: false,
};

pub const RACER: RouteGroup = RouteGroup {
    name: "racer",
    title: "Neon Racer",
    template: "racer.html",
    static_url_path: "/static/racer",
    scoring: false,
};

pub const SHOOTER: RouteGroup = RouteGroup {
    name: "shooter",
    title: "Neon Shooter",
    template: "shooter.html",
    static_url_path: "/shooter/static",
    scoring: false,
};

pub const SNAKE: RouteGroup = RouteGroup {
    name: "snake",
    title: "Neon Snake",
    template: "snake.html",
    static_url_path: "/snake/static",
    scoring: true,
};

/// Every game, in the order the arcade lists them.
pub static GAMES: [&RouteGroup; 7] = [&SNAKE, &PONG, &HOCKEY, &SHOOTER, &RACER, &FIGHTER, &JUMPER];

pub fn find(name: &str) -> Option<&'static RouteGroup> {
    std::iter::once(&HOME)
        .chain(GAMES.iter().copied())
        .find(|group| group.name == name)
}

/// A link from a landing page to another mounted game.
#[derive(Serialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct GameLink {
    pub name: &'static str,
    pub title: &'static str,
    pub uri: String,
}

/// Renders a landing page template for the group at `mount`.
///
/// Templates see `static_url` (the group's mounted asset path), `prefix`, and
/// `games`, the games mounted in `arcade` in registration order.
pub fn render_landing(template: &str, mount: &Mount, arcade: &Arcade) -> Result<String, minijinja::Error> {
    let games: Vec<GameLink> = arcade
        .mounts()
        .iter()
        .filter(|other| other.group() != &HOME)
        .map(|other| GameLink {
            name: other.group().name,
            title: other.group().title,
            uri: other.landing_uri(),
        })
        .collect();

    let env = minijinja::Environment::new();
    env.render_str(
        template,
        context! {
            static_url => mount.static_uri(),
            prefix => mount.prefix(),
            games => games,
        },
    )
}

/// Serves the landing page of whichever group owns this mount.
#[get("/")]
pub async fn landing(
    group: MountedGroup<'_>,
    arcade: &State<Arcade>,
    config: &State<ArcadeConfig>,
) -> Result<RawHtml<String>, Status> {
    let name = group.group().name;
    let page = group.group().landing_page(&config.assets_dir);
    let template = tokio::fs::read_to_string(&page).await.map_err(|error| {
        log::warn!("{}: landing page {} unavailable: {}", name, page.display(), error);
        Status::NotFound
    })?;

    render_landing(&template, group.mount(), arcade).map(RawHtml).map_err(|error| {
        log::error!("{}: failed to render {}: {}", name, page.display(), error);
        Status::InternalServerError
    })
}

pub fn routes() -> Vec<Route> {
    routes![landing]
}
