pub mod grading;
pub mod recording;
pub mod server;
pub mod setup;
