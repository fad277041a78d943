//! The three ways of running the arcade.

use rocket::figment::Figment;
use rocket::{Build, Rocket};

use crate::aggregator::Aggregator;
use crate::config::{ArcadeConfig, LaunchError};
use crate::games::{self, HOME, SNAKE};

pub const SUPER_APP_PORT: u16 = 8080;
pub const HOME_PORT: u16 = 8000;
pub const SNAKE_PORT: u16 = 5001;

/// Every game under its own prefix with the home page at the root.
pub fn super_app(aggregator: Aggregator) -> Aggregator {
    games::GAMES
        .iter()
        .copied()
        .fold(aggregator.register("/", &HOME), |aggregator, game| {
            aggregator.register(&format!("/{}", game.name), game)
        })
}

/// Just the home page.
pub fn home_app(aggregator: Aggregator) -> Aggregator {
    aggregator.register("/", &HOME)
}

/// Just snake, at the root. Shares its score file with the super app.
pub fn snake_app(aggregator: Aggregator) -> Aggregator {
    aggregator.register("/", &SNAKE)
}

/// Builds a Rocket instance from `figment` with the groups `layout` registers.
pub fn build(
    figment: Figment,
    layout: fn(Aggregator) -> Aggregator,
) -> Result<Rocket<Build>, LaunchError> {
    let config: ArcadeConfig = figment.extract()?;
    let aggregator = layout(Aggregator::new(config));
    Ok(aggregator.mount(rocket::custom(figment)))
}

/// Parses the command line, then builds and runs one entry point until shutdown.
pub async fn run(default_port: u16, layout: fn(Aggregator) -> Aggregator) -> Result<(), LaunchError> {
    use clap::Parser;

    dotenv::dotenv().ok();
    let args = crate::cli::Args::parse();
    let figment = args.apply(crate::config::figment(default_port));

    build(figment, layout)?.launch().await?;
    Ok(())
}
