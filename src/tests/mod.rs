use std::path::Path;

use rocket::{
    error::ErrorKind,
    figment::{providers::Serialized, Figment},
    get,
    http::{ContentType, Status},
    local::asynchronous::{Client, LocalResponse},
    routes,
    serde::json::{json, Value},
};
use tempfile::{tempdir, TempDir};

use crate::{
    aggregator::Aggregator,
    apps,
    config::{self, ArcadeConfig},
    games::{HOCKEY, HOME, PONG, SNAKE},
    score::MemoryScoreStore,
};

fn test_figment(score_dir: &Path) -> Figment {
    config::figment(apps::SUPER_APP_PORT).merge(Serialized::global("score_dir", score_dir))
}

async fn spawn_client(score_dir: &Path, layout: fn(Aggregator) -> Aggregator) -> Client {
    let rocket = apps::build(test_figment(score_dir), layout).expect("valid configuration");
    Client::tracked(rocket).await.expect("valid rocket instance")
}

/// The full arcade, keeping scores in a fresh temporary directory.
async fn spawn_arcade() -> (Client, TempDir) {
    let dir = tempdir().expect("tempdir");
    let client = spawn_client(dir.path(), apps::super_app).await;
    (client, dir)
}

async fn deserialize_response(response: LocalResponse<'_>) -> Value {
    response.into_json::<Value>().await.expect("json response")
}

async fn get_score(client: &Client, uri: &str) -> Value {
    let response = client.get(uri).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    deserialize_response(response).await
}

async fn post_score(client: &Client, uri: &str, body: Value) -> Value {
    let response = client.post(uri).json(&body).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    deserialize_response(response).await
}

fn report(is_new_record: bool, highscore: i64) -> Value {
    json!({ "success": true, "is_new_record": is_new_record, "highscore": highscore })
}

const SNAKE_SCORE: &str = "/snake/api/score";

#[rocket::async_test]
async fn fresh_store_reports_zero() {
    let (client, _dir) = spawn_arcade().await;
    assert_eq!(get_score(&client, SNAKE_SCORE).await, json!({ "highscore": 0 }));
}

/// Record, non-record, then read back.
#[rocket::async_test]
async fn record_then_lower_score() {
    let (client, dir) = spawn_arcade().await;

    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 10 })).await;
    assert_eq!(response, report(true, 10));

    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 7 })).await;
    assert_eq!(response, report(false, 10));

    assert_eq!(get_score(&client, SNAKE_SCORE).await, json!({ "highscore": 10 }));

    // The on-disk document keeps the exact key name.
    let stored = std::fs::read_to_string(dir.path().join("snake").join("highscore.json")).unwrap();
    let stored: Value = rocket::serde::json::serde_json::from_str(&stored).unwrap();
    assert_eq!(stored, json!({ "highscore": 10 }));
}

#[rocket::async_test]
async fn increasing_scores_are_both_records() {
    for (first, second) in [(1, 2), (3, 4), (5, 1000)] {
        let dir = tempdir().expect("tempdir");
        let client = spawn_client(dir.path(), apps::snake_app).await;

        let response = post_score(&client, "/api/score", json!({ "score": first })).await;
        assert_eq!(response, report(true, first));
        let response = post_score(&client, "/api/score", json!({ "score": second })).await;
        assert_eq!(response, report(true, second));
    }
}

/// The comparison is strict, so zero never beats an empty store.
#[rocket::async_test]
async fn zero_on_an_empty_store_is_not_a_record() {
    let (client, _dir) = spawn_arcade().await;

    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 0 })).await;
    assert_eq!(response, report(false, 0));
    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 1 })).await;
    assert_eq!(response, report(true, 1));
}

#[rocket::async_test]
async fn decreasing_scores_keep_the_first() {
    let (client, _dir) = spawn_arcade().await;

    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 50 })).await;
    assert_eq!(response, report(true, 50));
    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 49 })).await;
    assert_eq!(response, report(false, 50));
}

#[rocket::async_test]
async fn same_score_twice_is_one_record() {
    let (client, _dir) = spawn_arcade().await;

    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 33 })).await;
    assert_eq!(response, report(true, 33));
    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 33 })).await;
    assert_eq!(response, report(false, 33));
}

/// Submissions without a usable score count as zero instead of being rejected.
#[rocket::async_test]
async fn malformed_submissions_count_as_zero() {
    let (client, _dir) = spawn_arcade().await;
    post_score(&client, SNAKE_SCORE, json!({ "score": 4 })).await;

    let response = post_score(&client, SNAKE_SCORE, json!({})).await;
    assert_eq!(response, report(false, 4));

    let response = post_score(&client, SNAKE_SCORE, json!({ "score": "lots" })).await;
    assert_eq!(response, report(false, 4));

    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 12.0 })).await;
    assert_eq!(response, report(false, 4));

    for body in ["", "score=99", "{\"score\": "] {
        let response = client
            .post(SNAKE_SCORE)
            .header(ContentType::JSON)
            .body(body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok, "body {:?}", body);
        assert_eq!(deserialize_response(response).await, report(false, 4));
    }
}

#[rocket::async_test]
async fn missing_score_on_an_empty_store_matches_zero() {
    let (client, _dir) = spawn_arcade().await;
    let missing = post_score(&client, SNAKE_SCORE, json!({})).await;
    let zero = post_score(&client, SNAKE_SCORE, json!({ "score": 0 })).await;
    assert_eq!(missing, zero);
    assert_eq!(missing, report(false, 0));
}

#[rocket::async_test]
async fn corrupt_score_file_reads_as_zero_and_is_replaced() {
    let dir = tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("snake")).unwrap();
    std::fs::write(dir.path().join("snake").join("highscore.json"), "{oops").unwrap();

    let client = spawn_client(dir.path(), apps::super_app).await;
    assert_eq!(get_score(&client, SNAKE_SCORE).await, json!({ "highscore": 0 }));

    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 5 })).await;
    assert_eq!(response, report(true, 5));
    assert_eq!(get_score(&client, SNAKE_SCORE).await, json!({ "highscore": 5 }));
}

#[rocket::async_test]
async fn storage_failure_is_not_a_record() {
    let rocket = Aggregator::new(ArcadeConfig::default())
        .with_store(&SNAKE, MemoryScoreStore::read_only(Some(3)))
        .register("/snake", &SNAKE)
        .mount(rocket::custom(config::figment(apps::SUPER_APP_PORT)));
    let client = Client::tracked(rocket).await.expect("valid rocket instance");

    let response = post_score(&client, SNAKE_SCORE, json!({ "score": 90 })).await;
    assert_eq!(response, report(false, 3));
}

#[rocket::async_test]
async fn every_prefix_serves_its_landing_page() {
    let (client, _dir) = spawn_arcade().await;
    let arcade = apps::super_app(Aggregator::new(ArcadeConfig::default()));

    for mount in arcade.arcade().mounts() {
        let uri = mount.landing_uri();
        let response = client.get(uri.as_str()).dispatch().await;
        assert_eq!(response.status(), Status::Ok, "landing page of {}", mount.prefix());
        assert_eq!(response.content_type(), Some(ContentType::HTML));

        let page = response.into_string().await.unwrap();
        let stylesheet = format!("{}/style.css", mount.static_uri());
        assert!(page.contains(&stylesheet), "{} links {}", mount.prefix(), stylesheet);
    }
}

#[rocket::async_test]
async fn landing_pages_accept_a_trailing_slash() {
    let (client, _dir) = spawn_arcade().await;

    for uri in ["/snake/", "/racer/"] {
        let response = client.get(uri).dispatch().await;
        assert_eq!(response.status(), Status::Ok, "{}", uri);
    }
}

#[rocket::async_test]
async fn home_page_links_every_mounted_game() {
    let (client, _dir) = spawn_arcade().await;

    let page = client.get("/").dispatch().await.into_string().await.unwrap();
    for game in crate::games::GAMES {
        let link = format!(r#"<a href="/{}">{}</a>"#, game.name, game.title);
        assert!(page.contains(&link), "home page lacks {}", link);
    }
}

#[rocket::async_test]
async fn duplicate_prefixes_refuse_to_launch() {
    let rocket = Aggregator::new(ArcadeConfig::default())
        .register("/pong", &PONG)
        .register("/pong", &HOCKEY)
        .mount(rocket::custom(config::figment(apps::SUPER_APP_PORT)));

    match Client::tracked(rocket).await {
        Ok(_) => panic!("two groups at /pong should collide"),
        Err(error) => assert!(matches!(error.kind(), ErrorKind::Collisions(_))),
    }
}

#[rocket::async_test]
async fn static_assets_do_not_collide() {
    let (client, _dir) = spawn_arcade().await;
    let arcade = apps::super_app(Aggregator::new(ArcadeConfig::default()));

    let mut served: Vec<(String, String)> = Vec::new();
    for mount in arcade.arcade().mounts() {
        let uri = format!("{}/style.css", mount.static_uri());
        let response = client.get(uri.as_str()).dispatch().await;
        assert_eq!(response.status(), Status::Ok, "{}", uri);
        let body = response.into_string().await.unwrap();

        for (other_uri, other_body) in &served {
            assert_ne!(&uri, other_uri);
            assert_ne!(&body, other_body, "{} and {} serve the same file", uri, other_uri);
        }
        served.push((uri, body));
    }
    assert_eq!(served.len(), 8);
}

#[rocket::async_test]
async fn games_without_scores_have_no_score_api() {
    let (client, _dir) = spawn_arcade().await;

    for uri in ["/pong/api/score", "/racer/api/score", "/api/score"] {
        let response = client.get(uri).dispatch().await;
        assert_eq!(response.status(), Status::NotFound, "{}", uri);
    }

    let response = client.get("/tetris").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn standalone_snake_shares_the_arcade_record() {
    let dir = tempdir().expect("tempdir");

    let arcade = spawn_client(dir.path(), apps::super_app).await;
    post_score(&arcade, SNAKE_SCORE, json!({ "score": 64 })).await;

    let snake = spawn_client(dir.path(), apps::snake_app).await;
    assert_eq!(get_score(&snake, "/api/score").await, json!({ "highscore": 64 }));

    let response = snake.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let page = response.into_string().await.unwrap();
    assert!(page.contains("/snake/static/style.css"));
}

#[rocket::async_test]
async fn standalone_home_serves_only_the_home_page() {
    let dir = tempdir().expect("tempdir");
    let client = spawn_client(dir.path(), apps::home_app).await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let page = response.into_string().await.unwrap();
    assert!(page.contains("Neon Arcade"));
    assert!(page.contains("No games are mounted here."));

    let response = client.get("/static/style.css").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let response = client.get(SNAKE_SCORE).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[get("/boom")]
fn boom() -> Status {
    Status::InternalServerError
}

async fn internal_error_body(debug: bool) -> String {
    let figment = config::figment(apps::SUPER_APP_PORT).merge(Serialized::global("debug", debug));
    let config: ArcadeConfig = figment.extract().unwrap();
    let rocket = Aggregator::new(config)
        .register("/", &HOME)
        .mount(rocket::custom(figment))
        .mount("/", routes![boom]);
    let client = Client::tracked(rocket).await.expect("valid rocket instance");

    let response = client.get("/boom").dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);
    response.into_string().await.unwrap()
}

#[rocket::async_test]
async fn debug_flag_shows_error_details() {
    assert_eq!(
        internal_error_body(true).await,
        "internal server error while handling GET /boom"
    );
    assert_eq!(internal_error_body(false).await, "internal server error");
}
