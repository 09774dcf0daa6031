use std::collections::HashSet;

use anyhow::Context;
use chrono::NaiveDate;
use log::{debug, info, warn};
use rusqlite::{Connection, TransactionBehavior};
use thiserror::Error;

use crate::database::{self, DbPool, Game, GameType, Player};
use crate::handicap::{self, HandicapChange, HandicapError, RulesError, Score};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("game type {0} does not exist or is inactive")]
    UnknownGameType(i64),
    #[error("player {0} does not exist")]
    UnknownPlayer(i64),
    #[error("player {0} is inactive")]
    InactivePlayer(i64),
    #[error("player {0} appears more than once in this game")]
    DuplicatePlayer(i64),
    #[error("player {player_id} has an invalid score of {score}")]
    InvalidScore { player_id: i64, score: Score },
    #[error("no scores were entered")]
    NoScores,
    #[error("game type {name} has an invalid scoring table: {source}")]
    InvalidRules {
        name: String,
        #[source]
        source: RulesError,
    },
    #[error("player {player_id}: {source}")]
    Handicap {
        player_id: i64,
        #[source]
        source: HandicapError,
    },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl RecordError {
    /// Whether the caller sent something unusable, as opposed to a storage fault.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            RecordError::Storage(_) | RecordError::UnknownGameType(_) | RecordError::UnknownPlayer(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecordError::UnknownGameType(_) | RecordError::UnknownPlayer(_)
        )
    }
}

/// One row of the score sheet. A missing or zero score means the player sat out.
#[derive(Debug, Clone, Copy)]
pub struct ScoreEntry {
    pub player_id: i64,
    pub score: Option<Score>,
}

#[derive(Debug, Clone)]
pub struct AppliedScore {
    pub player: Player,
    pub score: Score,
    pub change: HandicapChange,
}

#[derive(Debug, Clone)]
pub struct RecordedGame {
    pub game: Game,
    pub game_type_name: String,
    pub scores: Vec<AppliedScore>,
}

pub struct RecordingService {
    pool: DbPool,
}

impl RecordingService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Records a game and moves every participant's handicap.
    ///
    /// All changes are computed before anything is written, and the writes
    /// share one transaction: either the game, its scores and every player
    /// update are stored, or none of them are.
    pub fn record_game(
        &self,
        game_date: NaiveDate,
        game_type_id: i64,
        entries: &[ScoreEntry],
    ) -> Result<RecordedGame, RecordError> {
        let played = filter_played(entries)?;
        if played.is_empty() {
            return Err(RecordError::NoScores);
        }

        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start game transaction")?;

        let game_type = load_game_type(&tx, game_type_id)?;
        let rules = game_type
            .rules
            .to_rules()
            .map_err(|source| RecordError::InvalidRules {
                name: game_type.name.clone(),
                source,
            })?;

        let mut pending = Vec::with_capacity(played.len());
        for (player_id, score) in played {
            let player = load_active_player(&tx, player_id)?;
            let change = handicap::calculate_handicap(player.handicap, score, &rules)
                .map_err(|source| RecordError::Handicap { player_id, source })?;
            debug!(
                "{} {}: {} -> {} ({})",
                player.first_name, player.last_name, player.handicap, change.new_handicap, change.delta
            );
            pending.push((player, score, change));
        }

        let game = database::games::insert_game(&tx, game_date, game_type.id)?;
        let mut scores = Vec::with_capacity(pending.len());
        for (mut player, score, change) in pending {
            database::scores::insert_score(&tx, game.id, player.id, score, change.delta)?;
            database::players::apply_handicap_change(&tx, player.id, &change, game_date)?;

            player.handicap = change.new_handicap;
            player.latest_handicap_change = Some(change.delta);
            player.latest_game = Some(game_date);
            scores.push(AppliedScore {
                player,
                score,
                change,
            });
        }

        tx.commit().context("Failed to commit game")?;
        info!(
            "Recorded {} game on {} with {} scores",
            game_type.name,
            game_date,
            scores.len()
        );

        Ok(RecordedGame {
            game,
            game_type_name: game_type.name,
            scores,
        })
    }
}

fn filter_played(entries: &[ScoreEntry]) -> Result<Vec<(i64, Score)>, RecordError> {
    let mut seen = HashSet::new();
    let mut played = Vec::new();

    for entry in entries {
        if !seen.insert(entry.player_id) {
            return Err(RecordError::DuplicatePlayer(entry.player_id));
        }

        match entry.score {
            None | Some(0) => continue,
            Some(score) if score < 0 => {
                return Err(RecordError::InvalidScore {
                    player_id: entry.player_id,
                    score,
                });
            }
            Some(score) => played.push((entry.player_id, score)),
        }
    }

    Ok(played)
}

fn load_game_type(conn: &Connection, id: i64) -> Result<GameType, RecordError> {
    match database::game_types::find_by_id(conn, id)? {
        Some(game_type) if game_type.active => Ok(game_type),
        Some(_) => {
            warn!("Refusing to record a game for inactive game type {}", id);
            Err(RecordError::UnknownGameType(id))
        }
        None => Err(RecordError::UnknownGameType(id)),
    }
}

fn load_active_player(conn: &Connection, id: i64) -> Result<Player, RecordError> {
    let player = database::players::find_by_id(conn, id)?.ok_or(RecordError::UnknownPlayer(id))?;
    if !player.active {
        return Err(RecordError::InactivePlayer(id));
    }
    Ok(player)
}
