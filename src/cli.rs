use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use rocket::figment::providers::Serialized;
use rocket::figment::Figment;

/// Flags shared by every arcade entry point.
#[derive(Parser, Debug)]
#[command(about = "Neon arcade game server")]
pub struct Args {
    /// Port to bind (overrides ROCKET_PORT and Rocket.toml)
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub address: Option<IpAddr>,

    /// Show request details in error responses and log verbosely
    #[arg(long)]
    pub debug: bool,

    /// Directory holding each game's templates/ and static/
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Directory holding each game's highscore.json
    #[arg(long)]
    pub score_dir: Option<PathBuf>,
}

impl Args {
    /// Layers these flags over `figment`.
    pub fn apply(&self, mut figment: Figment) -> Figment {
        if let Some(port) = self.port {
            figment = figment.merge(Serialized::global("port", port));
        }
        if let Some(address) = self.address {
            figment = figment.merge(Serialized::global("address", address));
        }
        if let Some(assets_dir) = &self.assets_dir {
            figment = figment.merge(Serialized::global("assets_dir", assets_dir));
        }
        if let Some(score_dir) = &self.score_dir {
            figment = figment.merge(Serialized::global("score_dir", score_dir));
        }
        if self.debug {
            figment = figment
                .merge(Serialized::global("debug", true))
                .merge(Serialized::global("log_level", "debug"));
        }
        figment
    }
}
