use neon_arcade::apps;
use neon_arcade::config::LaunchError;

#[rocket::main]
async fn main() -> Result<(), LaunchError> {
    apps::run(apps::SNAKE_PORT, apps::snake_app).await
}
