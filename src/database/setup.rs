use anyhow::{Context, Result};
use rusqlite::{params, Connection};

const REQUIRED_TABLES: [&str; 5] = [
    "players",
    "game_types",
    "games",
    "game_scores",
    "grade_boundaries",
];

/// Drops and recreates every table. All data is lost.
pub fn reset_database(conn: &Connection) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute schema statement {}", idx + 1))?;
    }

    log::info!("Database schema reset ({} statements)", statements.len());
    Ok(())
}

/// True when every table the service needs is present.
pub fn is_initialized(conn: &Connection) -> Result<bool> {
    let sql = "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";

    for table in REQUIRED_TABLES {
        let count: i64 = conn
            .query_row(sql, params![table], |row| row.get(0))
            .with_context(|| format!("Failed to look up table {}", table))?;
        if count == 0 {
            log::debug!("Table {} is missing", table);
            return Ok(false);
        }
    }

    Ok(true)
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
