pub mod game_types;
pub mod settings;

pub use settings::AppConfig;
