//! End-to-end tests for the HTTP API.
//!
//! Each test gets its own SQLite file in a temp dir and drives the router
//! with tower's `oneshot`, so no TCP binding is needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use club_handicaps::api::handlers::AppState;
use club_handicaps::api::routes::create_router;
use club_handicaps::config::AppConfig;
use club_handicaps::database::{self, DbPool};
use club_handicaps::services::setup::SetupService;

const TOKEN: &str = "test-token";

struct TestApp {
    _dir: TempDir,
    pool: DbPool,
}

impl TestApp {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("club.db");
        let pool = database::create_pool(path.to_str().unwrap()).expect("create pool");
        SetupService::new(pool.clone(), AppConfig::default())
            .run()
            .expect("set up database");
        Self { _dir: dir, pool }
    }

    fn router(&self) -> axum::Router {
        create_router(Arc::new(AppState {
            pool: self.pool.clone(),
            admin_token: TOKEN.to_string(),
        }))
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn write(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {TOKEN}"))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn add_player(&self, first: &str, last: &str, handicap: &str) -> i64 {
        let (status, json) = self
            .write(
                "POST",
                "/api/players",
                json!({ "firstName": first, "lastName": last, "handicap": handicap }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        json["playerId"].as_i64().unwrap()
    }

    /// The four players every scenario starts with.
    async fn add_club(&self) -> [i64; 4] {
        [
            self.add_player("Tony", "Abbott", "18.0").await,
            self.add_player("Ben", "Chifley", "19.0").await,
            self.add_player("John", "Curtin", "41.0").await,
            self.add_player("Kevin", "Dudd", "27.0").await,
        ]
    }

    async fn game_type_id(&self, name: &str) -> i64 {
        let (_, json) = self.get("/api/game-types").await;
        json.as_array()
            .unwrap()
            .iter()
            .find(|t| t["name"] == name)
            .and_then(|t| t["gameTypeId"].as_i64())
            .unwrap_or_else(|| panic!("game type {name} missing"))
    }
}

fn stringball_rules() -> Value {
    json!({
        "level1": 15, "level1Result": "-2",
        "level2Min": 13, "level2Max": 14, "level2Result": "-1.0",
        "level3Min": 11, "level3Max": 12, "level3Result": "-0.5",
        "level4": 10, "level4Result": "0.3"
    })
}

fn row<'a>(players: &'a Value, display_name: &str) -> &'a Value {
    players
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["displayName"] == display_name)
        .unwrap_or_else(|| panic!("{display_name} not listed"))
}

fn assert_player(players: &Value, name: &str, handicap: &str, playing: i64, date: &str, change: &str) {
    let player = row(players, name);
    assert_eq!(player["handicap"], handicap, "{name}");
    assert_eq!(player["playingHandicap"], playing, "{name}");
    assert_eq!(player["latestGame"], date, "{name}");
    assert_eq!(player["latestHandicapChange"], change, "{name}");
}

// ── GET /health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_200() {
    let app = TestApp::new();
    let (status, json) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OK");
}

// ── POST /api/games ──────────────────────────────────────────────────

#[tokio::test]
async fn record_stroke_game() {
    let app = TestApp::new();
    let [abbott, chifley, curtin, dudd] = app.add_club().await;
    let stroke = app.game_type_id("Stroke").await;

    let (status, json) = app
        .write(
            "POST",
            "/api/games",
            json!({
                "gameDate": "2017-07-29",
                "gameTypeId": stroke,
                "scores": [
                    { "playerId": abbott, "score": 74 },
                    { "playerId": chifley, "score": 72 },
                    { "playerId": curtin, "score": 70 },
                    { "playerId": dudd, "score": 69 },
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["results"].as_array().unwrap().len(), 4);

    let (_, players) = app.get("/api/players").await;
    assert_player(&players, "Abbott, Tony", "18.3", 18, "2017-07-29", "0.3");
    assert_player(&players, "Chifley, Ben", "18.5", 18, "2017-07-29", "-0.5");
    assert_player(&players, "Curtin, John", "40.0", 40, "2017-07-29", "-1.0");
    assert_player(&players, "Dudd, Kevin", "25.0", 25, "2017-07-29", "-2.0");
}

#[tokio::test]
async fn record_stableford_game() {
    let app = TestApp::new();
    let [abbott, chifley, curtin, dudd] = app.add_club().await;
    let stableford = app.game_type_id("Stableford").await;

    let (status, _) = app
        .write(
            "POST",
            "/api/games",
            json!({
                "gameDate": "2017-06-20",
                "gameTypeId": stableford,
                "scores": [
                    { "playerId": abbott, "score": 41 },
                    { "playerId": chifley, "score": 39 },
                    { "playerId": curtin, "score": 37 },
                    { "playerId": dudd, "score": 36 },
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, players) = app.get("/api/players").await;
    assert_player(&players, "Abbott, Tony", "16.0", 16, "2017-06-20", "-2.0");
    assert_player(&players, "Chifley, Ben", "18.0", 18, "2017-06-20", "-1.0");
    assert_player(&players, "Curtin, John", "40.5", 40, "2017-06-20", "-0.5");
    assert_player(&players, "Dudd, Kevin", "27.3", 27, "2017-06-20", "0.3");
}

#[tokio::test]
async fn players_who_sat_out_are_unchanged() {
    let app = TestApp::new();
    let [abbott, chifley, _, _] = app.add_club().await;
    let stroke = app.game_type_id("Stroke").await;

    let (status, json) = app
        .write(
            "POST",
            "/api/games",
            json!({
                "gameDate": "2017-07-29",
                "gameTypeId": stroke,
                "scores": [
                    { "playerId": abbott, "score": 74 },
                    { "playerId": chifley, "score": 0 },
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["results"].as_array().unwrap().len(), 1);

    let (_, players) = app.get("/api/players").await;
    let chifley = row(&players, "Chifley, Ben");
    assert_eq!(chifley["handicap"], "19.0");
    assert_eq!(chifley["latestGame"], Value::Null);
}

#[tokio::test]
async fn recording_requires_token() {
    let app = TestApp::new();
    let request = Request::post("/api/games")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "gameDate": "2017-07-29", "gameTypeId": 1, "scores": [] }).to_string(),
        ))
        .unwrap();

    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_game_type_is_404() {
    let app = TestApp::new();
    let [abbott, ..] = app.add_club().await;

    let (status, _) = app
        .write(
            "POST",
            "/api/games",
            json!({
                "gameDate": "2017-07-29",
                "gameTypeId": 999,
                "scores": [{ "playerId": abbott, "score": 74 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn score_outside_every_level_rejects_the_game() {
    let app = TestApp::new();
    let [abbott, chifley, ..] = app.add_club().await;

    // Stringball with nothing between 12 and 14.
    let mut rules = stringball_rules();
    rules["level2Min"] = json!(14);
    let (status, created) = app
        .write(
            "POST",
            "/api/game-types",
            json!({ "name": "Gapped", "rules": rules }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let gapped = created["gameTypeId"].as_i64().unwrap();

    let (status, _) = app
        .write(
            "POST",
            "/api/games",
            json!({
                "gameDate": "2017-07-29",
                "gameTypeId": gapped,
                "scores": [
                    { "playerId": abbott, "score": 15 },
                    { "playerId": chifley, "score": 13 },
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, players) = app.get("/api/players").await;
    assert_eq!(row(&players, "Abbott, Tony")["handicap"], "18.0");
    assert_eq!(row(&players, "Abbott, Tony")["latestGame"], Value::Null);
    let (_, games) = app.get("/api/games").await;
    assert!(games.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn inactive_player_and_negative_score_are_rejected() {
    let app = TestApp::new();
    let [abbott, chifley, ..] = app.add_club().await;
    let stroke = app.game_type_id("Stroke").await;

    let (status, _) = app
        .write(
            "POST",
            "/api/games",
            json!({
                "gameDate": "2017-07-29",
                "gameTypeId": stroke,
                "scores": [
                    { "playerId": abbott, "score": 74 },
                    { "playerId": chifley, "score": -1 },
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .write(
            "PUT",
            &format!("/api/players/{chifley}"),
            json!({ "firstName": "Ben", "lastName": "Chifley", "handicap": "19.0", "active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .write(
            "POST",
            "/api/games",
            json!({
                "gameDate": "2017-07-29",
                "gameTypeId": stroke,
                "scores": [
                    { "playerId": abbott, "score": 74 },
                    { "playerId": chifley, "score": 72 },
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, players) = app.get("/api/players").await;
    assert_eq!(row(&players, "Abbott, Tony")["handicap"], "18.0");
}

// ── GET /api/games, GET /api/players/:id, PUT /api/scores/:id ────────

#[tokio::test]
async fn game_history_and_score_correction() {
    let app = TestApp::new();
    let [abbott, ..] = app.add_club().await;
    let stroke = app.game_type_id("Stroke").await;
    let stableford = app.game_type_id("Stableford").await;

    for (date, game_type, score) in [
        ("2017-06-20", stableford, 41),
        ("2017-07-29", stroke, 74),
    ] {
        let (status, _) = app
            .write(
                "POST",
                "/api/games",
                json!({
                    "gameDate": date,
                    "gameTypeId": game_type,
                    "scores": [{ "playerId": abbott, "score": score }]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, games) = app.get("/api/games").await;
    let games = games.as_array().unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0]["gameDate"], "2017-07-29");
    assert_eq!(games[0]["gameType"], "Stroke");
    assert_eq!(games[0]["playerCount"], 1);

    let (status, detail) = app.get(&format!("/api/players/{abbott}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["player"]["handicap"], "16.3");
    let history = detail["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["gameType"], "Stroke");
    assert_eq!(history[1]["handicapChange"], "-2.0");

    let score_id = history[0]["scoreId"].as_i64().unwrap();
    let (status, corrected) = app
        .write("PUT", &format!("/api/scores/{score_id}"), json!({ "score": 75 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(corrected["score"], 75);

    let (_, detail) = app.get(&format!("/api/players/{abbott}")).await;
    assert_eq!(detail["history"][0]["score"], 75);
    assert_eq!(detail["player"]["handicap"], "16.3");

    for bad in [0, -4] {
        let (status, _) = app
            .write("PUT", &format!("/api/scores/{score_id}"), json!({ "score": bad }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "score {bad}");
    }
    let (_, detail) = app.get(&format!("/api/players/{abbott}")).await;
    assert_eq!(detail["history"][0]["score"], 75);
}

#[tokio::test]
async fn missing_player_is_404() {
    let app = TestApp::new();
    let (status, _) = app.get("/api/players/4242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── PUT /api/players/:id ─────────────────────────────────────────────

#[tokio::test]
async fn deactivated_player_moves_to_inactive_list() {
    let app = TestApp::new();
    let [abbott, ..] = app.add_club().await;

    let (status, _) = app
        .write(
            "PUT",
            &format!("/api/players/{abbott}"),
            json!({ "firstName": "Tony", "lastName": "Abbott", "handicap": "18.0", "active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, active) = app.get("/api/players").await;
    let (_, inactive) = app.get("/api/players/inactive").await;
    assert_eq!(active.as_array().unwrap().len(), 3);
    assert_eq!(inactive[0]["displayName"], "Abbott, Tony");
}

#[tokio::test]
async fn players_are_listed_by_surname() {
    let app = TestApp::new();
    app.add_player("Kevin", "Dudd", "27.0").await;
    app.add_player("Tony", "Abbott", "18.0").await;

    let (_, players) = app.get("/api/players").await;
    let names: Vec<&str> = players
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["lastName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Abbott", "Dudd"]);
}

#[tokio::test]
async fn blank_names_are_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .write(
            "POST",
            "/api/players",
            json!({ "firstName": "  ", "lastName": "Abbott", "handicap": "18.0" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── /api/game-types ──────────────────────────────────────────────────

#[tokio::test]
async fn default_game_types_are_listed() {
    let app = TestApp::new();
    let (status, json) = app.get("/api/game-types").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Stroke", "Stableford"]);
    assert_eq!(json[0]["direction"], "lowerIsBetter");
    assert_eq!(json[1]["direction"], "higherIsBetter");
}

#[tokio::test]
async fn create_game_type() {
    let app = TestApp::new();
    let (status, json) = app
        .write(
            "POST",
            "/api/game-types",
            json!({ "name": "Stringball", "rules": stringball_rules() }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["name"], "Stringball");

    let (_, types) = app.get("/api/game-types").await;
    assert!(types.as_array().unwrap().iter().any(|t| t["name"] == "Stringball"));

    let (status, _) = app
        .write(
            "POST",
            "/api/game-types",
            json!({ "name": "Stringball", "rules": stringball_rules() }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn rename_game_type() {
    let app = TestApp::new();
    let stableford = app.game_type_id("Stableford").await;

    let (_, types) = app.get("/api/game-types").await;
    let rules = types[1]["rules"].clone();
    let (status, _) = app
        .write(
            "PUT",
            &format!("/api/game-types/{stableford}"),
            json!({ "name": "Stringball", "rules": rules }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, types) = app.get("/api/game-types").await;
    let names: Vec<&str> = types
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Stringball"));
    assert!(!names.contains(&"Stableford"));
}

#[tokio::test]
async fn overlapping_table_is_rejected() {
    let app = TestApp::new();
    let mut rules = stringball_rules();
    rules["level3Max"] = json!(13);

    let (status, _) = app
        .write(
            "POST",
            "/api/game-types",
            json!({ "name": "Broken", "rules": rules }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── /api/grades ──────────────────────────────────────────────────────

#[tokio::test]
async fn grades_group_active_players() {
    let app = TestApp::new();
    app.add_club().await;

    let (status, grades) = app.get("/api/grades").await;
    assert_eq!(status, StatusCode::OK);

    let grades = grades.as_array().unwrap();
    assert_eq!(grades.len(), 4);
    let labels: Vec<&str> = grades.iter().map(|g| g["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["A", "B", "C", "D"]);

    let count = |idx: usize| grades[idx]["players"].as_array().unwrap().len();
    assert_eq!(count(0), 0);
    assert_eq!(count(1), 2);
    assert_eq!(count(2), 1);
    assert_eq!(count(3), 1);
    assert_eq!(grades[1]["players"][0]["lastName"], "Abbott");
    assert_eq!(grades[1]["players"][1]["lastName"], "Chifley");
}

#[tokio::test]
async fn grade_config_can_be_replaced() {
    let app = TestApp::new();
    app.add_club().await;

    let (status, _) = app
        .write("PUT", "/api/grades/config", json!({ "boundaries": ["20", "10"] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = app
        .write("PUT", "/api/grades/config", json!({ "boundaries": ["18.5"] }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["boundaries"], json!(["18.5"]));

    let (_, config) = app.get("/api/grades/config").await;
    assert_eq!(config["boundaries"], json!(["18.5"]));

    let (_, grades) = app.get("/api/grades").await;
    assert_eq!(grades.as_array().unwrap().len(), 2);
    assert_eq!(grades[0]["players"].as_array().unwrap().len(), 1);
    assert_eq!(grades[1]["players"].as_array().unwrap().len(), 3);
}
