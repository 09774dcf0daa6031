use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Json, Response},
};
use rusqlite::Connection;
use std::sync::Arc;

use super::{bad_request, connection_error, query_error, AppState};
use crate::api::models::{GradeConfigRequest, GradeConfigResponse, GradeItem};
use crate::database;
use crate::handicap::GradeBoundaries;
use crate::services::grading;

pub async fn get_grades(State(state): State<Arc<AppState>>) -> Response {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match grading::graded_players(&conn) {
        Ok(buckets) => {
            let grades: Vec<GradeItem> = buckets.into_iter().map(Into::into).collect();
            Json(grades).into_response()
        }
        Err(e) => query_error(e),
    }
}

pub async fn get_grade_config(State(state): State<Arc<AppState>>) -> Response {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match database::grades::load_boundaries(&conn) {
        Ok(boundaries) => Json(GradeConfigResponse {
            boundaries: boundaries.as_slice().to_vec(),
        })
        .into_response(),
        Err(e) => query_error(e),
    }
}

pub async fn update_grade_config(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<GradeConfigRequest>,
) -> Response {
    if let Err(rejection) = state.authorize(&headers) {
        return rejection;
    }

    let boundaries = match GradeBoundaries::new(request.boundaries) {
        Ok(boundaries) => boundaries,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return connection_error(),
    };

    match save_boundaries(&mut conn, &boundaries) {
        Ok(()) => {
            log::info!("Grade boundaries set to {:?}", boundaries.as_slice());
            Json(GradeConfigResponse {
                boundaries: boundaries.as_slice().to_vec(),
            })
            .into_response()
        }
        Err(e) => query_error(e),
    }
}

fn save_boundaries(conn: &mut Connection, boundaries: &GradeBoundaries) -> anyhow::Result<()> {
    let tx = conn.transaction()?;
    database::grades::replace_boundaries(&tx, boundaries)?;
    tx.commit()?;
    Ok(())
}
