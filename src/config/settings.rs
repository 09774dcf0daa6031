use anyhow::{Context, Result};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "club_handicaps.db".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Used when `serve` is started without `--port`.
    pub port: u16,
    /// Bearer token required by routes that change data.
    pub admin_token: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            admin_token: None,
        }
    }
}

impl ServerSettings {
    pub fn resolve_port(&self, requested: Option<u16>) -> u16 {
        requested.unwrap_or(self.port)
    }

    pub fn require_admin_token(&self) -> Result<&str> {
        self.admin_token
            .as_deref()
            .context("ADMIN_TOKEN must be set before the server can accept changes")
    }
}

#[derive(Debug, Clone)]
pub struct GradeSettings {
    /// Written to the database by `setup`; afterwards the stored list wins.
    pub default_boundaries: Vec<Decimal>,
}

impl Default for GradeSettings {
    fn default() -> Self {
        Self {
            default_boundaries: vec![Decimal::new(120, 1), Decimal::new(200, 1), Decimal::new(300, 1)],
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub grades: GradeSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseSettings::default(),
            server: ServerSettings::default(),
            grades: GradeSettings::default(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `DATABASE_PATH` and `ADMIN_TOKEN`.
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.database.path = path;
        }
        if let Ok(token) = std::env::var("ADMIN_TOKEN") {
            if token.trim().is_empty() {
                log::warn!("ADMIN_TOKEN is empty and will be ignored");
            } else {
                config.server.admin_token = Some(token);
            }
        }
        config
    }
}
