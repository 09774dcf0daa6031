use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use super::{bad_request, connection_error, not_found, query_error, AppState};
use crate::api::models::{
    GameListItem, RecordGameRequest, RecordGameResponse, ScoreItem, UpdateScoreRequest,
};
use crate::database;
use crate::services::recording::{RecordError, RecordingService, ScoreEntry};

pub async fn get_games(State(state): State<Arc<AppState>>) -> Response {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match database::games::list_summaries(&conn) {
        Ok(rows) => {
            let games: Vec<GameListItem> = rows.into_iter().map(Into::into).collect();
            Json(games).into_response()
        }
        Err(e) => query_error(e),
    }
}

pub async fn record_game(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<RecordGameRequest>,
) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }

    let entries: Vec<ScoreEntry> = request
        .scores
        .iter()
        .map(|entry| ScoreEntry {
            player_id: entry.player_id,
            score: entry.score,
        })
        .collect();

    let service = RecordingService::new(state.pool.clone());
    match service.record_game(request.game_date, request.game_type_id, &entries) {
        Ok(recorded) => {
            (StatusCode::CREATED, Json(RecordGameResponse::from(recorded))).into_response()
        }
        Err(e) => record_error_response(e),
    }
}

fn record_error_response(error: RecordError) -> Response {
    if error.is_not_found() {
        return not_found(error.to_string());
    }
    if error.is_invalid_input() {
        log::warn!("Game not recorded: {}", error);
        return bad_request(format!("There was an error in the data provided: {}", error));
    }

    log::error!("Failed to save game: {:?}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "There was an error saving the game.",
    )
        .into_response()
}

/// Corrects a recorded score. Handicaps are left as they were.
pub async fn update_score(
    State(state): State<Arc<AppState>>,
    Path(score_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateScoreRequest>,
) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }

    if request.score <= 0 {
        return bad_request("score must be positive");
    }

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match database::scores::update_score(&conn, score_id, request.score) {
        Ok(Some(score)) => Json(ScoreItem {
            score_id: score.id,
            game_id: score.game_id,
            player_id: score.player_id,
            score: score.score,
            handicap_change: score.handicap_change,
        })
        .into_response(),
        Ok(None) => not_found(format!("Score {} not found", score_id)),
        Err(e) => query_error(e),
    }
}
