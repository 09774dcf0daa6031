use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use std::time::Instant;

use crate::api::handlers::{
    game_types::{create_game_type, get_game_types, update_game_type},
    games::{get_games, record_game, update_score},
    grades::{get_grade_config, get_grades, update_grade_config},
    health,
    players::{create_player, get_inactive_players, get_player_detail, get_players, update_player},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/players", get(get_players).post(create_player))
        .route("/api/players/inactive", get(get_inactive_players))
        .route("/api/players/:id", get(get_player_detail).put(update_player))
        .route("/api/games", get(get_games).post(record_game))
        .route("/api/scores/:id", put(update_score))
        .route("/api/game-types", get(get_game_types).post(create_game_type))
        .route("/api/game-types/:id", put(update_game_type))
        .route("/api/grades", get(get_grades))
        .route("/api/grades/config", get(get_grade_config).put(update_grade_config))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    log::info!(
        "{} {} -> {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
