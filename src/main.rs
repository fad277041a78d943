use neon_arcade::apps;
use neon_arcade::config::LaunchError;

#[rocket::main]
async fn main() -> Result<(), LaunchError> {
    apps::run(apps::SUPER_APP_PORT, apps::super_app).await
}
