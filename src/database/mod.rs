pub mod connection;
pub mod game_types;
pub mod games;
pub mod grades;
pub mod models;
pub mod players;
pub mod scores;
pub mod setup;

pub use connection::{create_pool, get_connection, is_unique_violation, DbConn, DbPool};
pub use models::*;
