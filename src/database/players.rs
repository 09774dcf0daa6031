use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{decimal_column, optional_decimal_column, NewPlayer, Player, PlayerUpdate};
use crate::handicap::HandicapChange;

const PLAYER_COLUMNS: &str =
    "id, first_name, last_name, handicap, latest_handicap_change, latest_game, active, created_at";

pub fn insert_player(conn: &Connection, player: &NewPlayer) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (first_name, last_name, handicap) VALUES (?1, ?2, ?3) RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            player.first_name,
            player.last_name,
            player.handicap.to_string()
        ],
        parse_player_row,
    )
    .context("Failed to insert new player")
}

pub fn update_player(conn: &Connection, id: i64, update: &PlayerUpdate) -> Result<Option<Player>> {
    let sql = format!(
        "UPDATE players SET first_name = ?1, last_name = ?2, handicap = ?3, active = ?4 WHERE id = ?5 RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            update.first_name,
            update.last_name,
            update.handicap.to_string(),
            update.active,
            id
        ],
        parse_player_row,
    )
    .optional()
    .context("Failed to update player")
}

/// Stores the outcome of a recorded game on the player.
pub fn apply_handicap_change(
    conn: &Connection,
    id: i64,
    change: &HandicapChange,
    game_date: NaiveDate,
) -> Result<()> {
    let sql = "UPDATE players SET handicap = ?1, latest_handicap_change = ?2, latest_game = ?3 WHERE id = ?4";

    let updated = conn
        .execute(
            sql,
            params![
                change.new_handicap.to_string(),
                change.delta.to_string(),
                game_date,
                id
            ],
        )
        .context("Failed to apply handicap change")?;

    if updated == 0 {
        anyhow::bail!("Player {} disappeared while applying handicap change", id);
    }
    Ok(())
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        handicap: decimal_column(row, 3)?,
        latest_handicap_change: optional_decimal_column(row, 4)?,
        latest_game: row.get(5)?,
        active: row.get(6)?,
        created_at: row.get(7)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

/// Players with the given active flag, ordered by surname.
pub fn list_by_status(conn: &Connection, active: bool) -> Result<Vec<Player>> {
    let sql = format!(
        "SELECT {PLAYER_COLUMNS} FROM players WHERE active = ?1 ORDER BY last_name, first_name, id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![active], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_active(conn: &Connection) -> Result<Vec<Player>> {
    list_by_status(conn, true)
}
