pub mod change;
pub mod commands;
pub mod config;
pub mod utils;
