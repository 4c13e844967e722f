pub mod config;
pub mod setup;
pub mod state;
pub mod types;
