use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{decimal_column, GameType};
use crate::handicap::RuleTable;

const GAME_TYPE_COLUMNS: &str = "id, name, level_1, level_1_result, level_2_min, level_2_max, level_2_result, level_3_min, level_3_max, level_3_result, level_4, level_4_result, active, created_at";

pub fn insert_game_type(conn: &Connection, name: &str, rules: &RuleTable) -> Result<GameType> {
    let sql = format!(
        "INSERT INTO game_types (name, level_1, level_1_result, level_2_min, level_2_max, level_2_result, level_3_min, level_3_max, level_3_result, level_4, level_4_result) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) RETURNING {GAME_TYPE_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            name,
            rules.level_1,
            rules.level_1_result.to_string(),
            rules.level_2_min,
            rules.level_2_max,
            rules.level_2_result.to_string(),
            rules.level_3_min,
            rules.level_3_max,
            rules.level_3_result.to_string(),
            rules.level_4,
            rules.level_4_result.to_string(),
        ],
        parse_game_type_row,
    )
    .with_context(|| format!("Failed to insert game type {}", name))
}

pub fn update_game_type(
    conn: &Connection,
    id: i64,
    name: &str,
    rules: &RuleTable,
    active: bool,
) -> Result<Option<GameType>> {
    let sql = format!(
        "UPDATE game_types SET name = ?1, level_1 = ?2, level_1_result = ?3, level_2_min = ?4, level_2_max = ?5, level_2_result = ?6, level_3_min = ?7, level_3_max = ?8, level_3_result = ?9, level_4 = ?10, level_4_result = ?11, active = ?12 WHERE id = ?13 RETURNING {GAME_TYPE_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            name,
            rules.level_1,
            rules.level_1_result.to_string(),
            rules.level_2_min,
            rules.level_2_max,
            rules.level_2_result.to_string(),
            rules.level_3_min,
            rules.level_3_max,
            rules.level_3_result.to_string(),
            rules.level_4,
            rules.level_4_result.to_string(),
            active,
            id,
        ],
        parse_game_type_row,
    )
    .optional()
    .with_context(|| format!("Failed to update game type {}", id))
}

fn parse_game_type_row(row: &rusqlite::Row) -> rusqlite::Result<GameType> {
    Ok(GameType {
        id: row.get(0)?,
        name: row.get(1)?,
        rules: RuleTable {
            level_1: row.get(2)?,
            level_1_result: decimal_column(row, 3)?,
            level_2_min: row.get(4)?,
            level_2_max: row.get(5)?,
            level_2_result: decimal_column(row, 6)?,
            level_3_min: row.get(7)?,
            level_3_max: row.get(8)?,
            level_3_result: decimal_column(row, 9)?,
            level_4: row.get(10)?,
            level_4_result: decimal_column(row, 11)?,
        },
        active: row.get(12)?,
        created_at: row.get(13)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<GameType>> {
    let sql = format!("SELECT {GAME_TYPE_COLUMNS} FROM game_types WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_game_type_row)
        .optional()
        .context("Failed to query game type by id")
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<GameType>> {
    let sql = format!("SELECT {GAME_TYPE_COLUMNS} FROM game_types WHERE name = ?1");

    conn.query_row(&sql, params![name], parse_game_type_row)
        .optional()
        .context("Failed to query game type by name")
}

/// Active game types in the order they were created.
pub fn list_active(conn: &Connection) -> Result<Vec<GameType>> {
    let sql = format!(
        "SELECT {GAME_TYPE_COLUMNS} FROM game_types WHERE active = 1 ORDER BY created_at, id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_game_type_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
