pub mod analyze;
pub mod config;
pub mod record;
pub mod setup;
