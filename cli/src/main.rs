// cli/src/main.rs

// Entry point for the vitals data-entry CLI. Parses arguments and dispatches
// to the handlers in `cli::handlers`.

use anyhow::Result;
use clap::Parser;
use coretemp_cli::cli::commands::CliArgs;
use coretemp_cli::cli::handlers::run;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    run(args).await
}
