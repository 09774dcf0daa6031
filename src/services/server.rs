use anyhow::Result;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::database;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: Option<u16>, config: AppConfig) -> Self {
        let port = config.server.resolve_port(port);
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let admin_token = self.config.server.require_admin_token()?.to_string();
        let pool = database::create_pool(&self.config.database.path)?;

        {
            let conn = database::get_connection(&pool)?;
            if !database::setup::is_initialized(&conn)? {
                warn!(
                    "Database {} has no schema yet; run `setup` first",
                    self.config.database.path
                );
            }
        }

        let state = Arc::new(AppState {
            pool,
            admin_token,
        });

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
