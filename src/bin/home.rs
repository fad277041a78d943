use neon_arcade::apps;
use neon_arcade::config::LaunchError;

#[rocket::main]
async fn main() -> Result<(), LaunchError> {
    apps::run(apps::HOME_PORT, apps::home_app).await
}
