use anyhow::Result;
use rusqlite::Connection;

use crate::database::{self, Player};
use crate::handicap::{self, GradeBucket};

/// Active players split into the configured grades.
pub fn graded_players(conn: &Connection) -> Result<Vec<GradeBucket<Player>>> {
    let players = database::players::list_active(conn)?;
    let boundaries = database::grades::load_boundaries(conn)?;
    log::debug!(
        "Grading {} players into {} grades",
        players.len(),
        boundaries.grade_count()
    );

    Ok(handicap::grade_players(&players, &boundaries))
}
