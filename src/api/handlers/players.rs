use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use super::{connection_error, not_found, query_error, require_name, AppState};
use crate::api::models::{
    NewPlayerRequest, PlayerDetail, PlayerListItem, ScoreHistoryItem, UpdatePlayerRequest,
};
use crate::database::{self, NewPlayer, PlayerUpdate};

pub async fn get_players(State(state): State<Arc<AppState>>) -> Response {
    list_players(&state, true)
}

pub async fn get_inactive_players(State(state): State<Arc<AppState>>) -> Response {
    list_players(&state, false)
}

fn list_players(state: &AppState, active: bool) -> Response {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match database::players::list_by_status(&conn, active) {
        Ok(players) => {
            let items: Vec<PlayerListItem> = players.into_iter().map(Into::into).collect();
            Json(items).into_response()
        }
        Err(e) => query_error(e),
    }
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<NewPlayerRequest>,
) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }

    let new_player = match (
        require_name(&request.first_name, "firstName"),
        require_name(&request.last_name, "lastName"),
    ) {
        (Ok(first_name), Ok(last_name)) => NewPlayer {
            first_name,
            last_name,
            handicap: request.handicap,
        },
        (Err(rejection), _) | (_, Err(rejection)) => return rejection,
    };

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match database::players::insert_player(&conn, &new_player) {
        Ok(player) => {
            log::info!("Added player {} {}", player.first_name, player.last_name);
            (StatusCode::CREATED, Json(PlayerListItem::from(player))).into_response()
        }
        Err(e) => query_error(e),
    }
}

pub async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdatePlayerRequest>,
) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }

    let update = match (
        require_name(&request.first_name, "firstName"),
        require_name(&request.last_name, "lastName"),
    ) {
        (Ok(first_name), Ok(last_name)) => PlayerUpdate {
            first_name,
            last_name,
            handicap: request.handicap,
            active: request.active,
        },
        (Err(rejection), _) | (_, Err(rejection)) => return rejection,
    };

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match database::players::update_player(&conn, player_id, &update) {
        Ok(Some(player)) => Json(PlayerListItem::from(player)).into_response(),
        Ok(None) => not_found(format!("Player {} not found", player_id)),
        Err(e) => query_error(e),
    }
}

/// A player with their game history, most recent game first.
pub async fn get_player_detail(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
) -> Response {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    let player = match database::players::find_by_id(&conn, player_id) {
        Ok(Some(player)) => player,
        Ok(None) => return not_found(format!("Player {} not found", player_id)),
        Err(e) => return query_error(e),
    };

    let history = match database::scores::history_for_player(&conn, player_id) {
        Ok(rows) => rows.into_iter().map(ScoreHistoryItem::from).collect(),
        Err(e) => return query_error(e),
    };

    Json(PlayerDetail {
        player: player.into(),
        history,
    })
    .into_response()
}
