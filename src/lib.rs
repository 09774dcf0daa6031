pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod handicap;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::handicap::playing_handicap;
use crate::services::server::ServerService;
use crate::services::setup::SetupService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: Option<u16>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_setup() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database.path)?;
    let service = SetupService::new(pool, config);
    service.run()
}

pub fn handle_grades() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database.path)?;
    let conn = database::get_connection(&pool)?;
    let grades = services::grading::graded_players(&conn)?;

    for grade in grades {
        let range = match (grade.lower, grade.upper) {
            (None, Some(upper)) => format!("up to {}", upper),
            (Some(lower), Some(upper)) => format!("over {} up to {}", lower, upper),
            (Some(lower), None) => format!("over {}", lower),
            (None, None) => "all handicaps".to_string(),
        };
        println!(
            "{} {}",
            format!("{} Grade", grade.label).bold().green(),
            format!("({})", range).dimmed()
        );

        if grade.players.is_empty() {
            println!("  {}", "no players".dimmed());
        }
        for player in &grade.players {
            println!(
                "  {:<28} {:>6} {:>4}",
                format!("{}, {}", player.last_name, player.first_name),
                player.handicap.to_string(),
                playing_handicap(player.handicap)
            );
        }
    }

    Ok(())
}
