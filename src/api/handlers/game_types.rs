use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use super::{bad_request, connection_error, not_found, query_error, require_name, AppState};
use crate::api::models::{GameTypeItem, GameTypeRequest};
use crate::database;

pub async fn get_game_types(State(state): State<Arc<AppState>>) -> Response {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match database::game_types::list_active(&conn) {
        Ok(game_types) => {
            let items: Vec<GameTypeItem> = game_types.into_iter().map(Into::into).collect();
            Json(items).into_response()
        }
        Err(e) => query_error(e),
    }
}

/// Checks the name and scoring table shared by create and edit.
fn validate(request: &GameTypeRequest) -> Result<String, Response> {
    let name = require_name(&request.name, "name")?;
    request
        .rules
        .to_rules()
        .map_err(|e| bad_request(format!("Invalid scoring table: {}", e)))?;
    Ok(name)
}

fn name_taken(name: &str) -> Response {
    (
        StatusCode::CONFLICT,
        format!("A game type named {} already exists", name),
    )
        .into_response()
}

pub async fn create_game_type(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<GameTypeRequest>,
) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }
    let name = match validate(&request) {
        Ok(name) => name,
        Err(rejection) => return rejection,
    };

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match database::game_types::find_by_name(&conn, &name) {
        Ok(Some(_)) => return name_taken(&name),
        Ok(None) => {}
        Err(e) => return query_error(e),
    }

    match database::game_types::insert_game_type(&conn, &name, &request.rules) {
        Ok(game_type) => {
            log::info!("Added game type {}", game_type.name);
            (StatusCode::CREATED, Json(GameTypeItem::from(game_type))).into_response()
        }
        Err(e) if database::is_unique_violation(&e) => name_taken(&name),
        Err(e) => query_error(e),
    }
}

pub async fn update_game_type(
    State(state): State<Arc<AppState>>,
    Path(game_type_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<GameTypeRequest>,
) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }
    let name = match validate(&request) {
        Ok(name) => name,
        Err(rejection) => return rejection,
    };

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    let existing = match database::game_types::find_by_id(&conn, game_type_id) {
        Ok(Some(game_type)) => game_type,
        Ok(None) => return not_found(format!("Game type {} not found", game_type_id)),
        Err(e) => return query_error(e),
    };

    match database::game_types::find_by_name(&conn, &name) {
        Ok(Some(other)) if other.id != game_type_id => return name_taken(&name),
        Ok(_) => {}
        Err(e) => return query_error(e),
    }

    let active = request.active.unwrap_or(existing.active);
    match database::game_types::update_game_type(&conn, game_type_id, &name, &request.rules, active)
    {
        Ok(Some(game_type)) => Json(GameTypeItem::from(game_type)).into_response(),
        Ok(None) => not_found(format!("Game type {} not found", game_type_id)),
        Err(e) if database::is_unique_violation(&e) => name_taken(&name),
        Err(e) => query_error(e),
    }
}
