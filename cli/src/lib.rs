// cli/src/lib.rs
pub mod cli;
