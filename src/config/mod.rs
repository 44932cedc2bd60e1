/// Database connection and table creation
pub mod database;

/// Application settings from config.toml and the environment
pub mod settings;
