// cli/src/cli/mod.rs
pub mod commands;
pub mod handlers;
