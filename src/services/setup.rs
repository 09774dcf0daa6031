use anyhow::{Context, Result};
use log::info;

use crate::config::game_types::default_game_types;
use crate::config::AppConfig;
use crate::database::{self, DbPool};
use crate::handicap::GradeBoundaries;

/// Builds a fresh database with the default game types and grades.
pub struct SetupService {
    pool: DbPool,
    config: AppConfig,
}

impl SetupService {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    pub fn run(&self) -> Result<()> {
        info!("=== Preparing handicap database ===");

        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction().context("Failed to start setup transaction")?;

        database::setup::reset_database(&tx)?;
        info!("  → Schema created");

        for game_type in default_game_types() {
            let rules = game_type.rule_table();
            rules
                .to_rules()
                .with_context(|| format!("Default game type {} is invalid", game_type.name))?;
            database::game_types::insert_game_type(&tx, game_type.name, &rules)?;
            info!("  → Added game type {}", game_type.name);
        }

        let boundaries = GradeBoundaries::new(self.config.grades.default_boundaries.clone())
            .context("Default grade boundaries are invalid")?;
        database::grades::replace_boundaries(&tx, &boundaries)?;
        info!("  → Stored {} grade boundaries", boundaries.as_slice().len());

        tx.commit().context("Failed to commit database setup")?;
        info!("=== Setup Complete ===");
        Ok(())
    }
}
