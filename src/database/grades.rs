use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::decimal_column;
use crate::handicap::GradeBoundaries;

pub fn load_boundaries(conn: &Connection) -> Result<GradeBoundaries> {
    let sql = "SELECT max_handicap FROM grade_boundaries ORDER BY position";

    let mut stmt = conn.prepare(sql)?;
    let bounds = stmt
        .query_map([], |row| decimal_column(row, 0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    GradeBoundaries::new(bounds).context("Stored grade boundaries are invalid")
}

/// Replaces the stored boundaries. Callers run this inside a transaction.
pub fn replace_boundaries(conn: &Connection, boundaries: &GradeBoundaries) -> Result<()> {
    conn.execute("DELETE FROM grade_boundaries", [])
        .context("Failed to clear grade boundaries")?;

    for (position, bound) in boundaries.as_slice().iter().enumerate() {
        conn.execute(
            "INSERT INTO grade_boundaries (position, max_handicap) VALUES (?1, ?2)",
            params![position as i64, bound.to_string()],
        )
        .with_context(|| format!("Failed to store grade boundary {}", position + 1))?;
    }

    Ok(())
}
