use rocket::serde::json::Json;
use rocket::{get, post, routes, Route};

use super::{HighScore, ScoreReport, Submission};
use crate::aggregator::GroupScore;

/// Fetches the current high score of the game that owns this mount.
#[get("/api/score")]
pub async fn get_score(score: GroupScore<'_>) -> Json<HighScore> {
    Json(HighScore::new(score.keeper().load().await))
}

/// Submits a candidate score.
/// A body that is missing, not JSON, or lacks an integer `score` counts as a score of zero.
#[post("/api/score", data = "<submission>")]
pub async fn submit_score(
    score: GroupScore<'_>,
    submission: Option<Json<Submission>>,
) -> Json<ScoreReport> {
    let submission = submission.map(|json| json.0).unwrap_or_default();
    Json(score.keeper().submit(submission.score).await)
}

pub fn routes() -> Vec<Route> {
    routes![get_score, submit_score]
}
