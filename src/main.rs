use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use price_calculator::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    if matches!(args.command, cli::Commands::Version) {
        println!("price-calc v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = config::load_config(args.config.as_deref())?;
    init_tracing(&cfg.logging);

    // Dispatch to appropriate command handler
    match args.command {
        cli::Commands::Quote(quote) => {
            commands::quote::execute(&cfg, &quote).await?;
        }
        cli::Commands::Rate {
            base,
            target,
            amount,
            offline,
        } => {
            commands::rate::execute(&cfg, base, target, amount, offline).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&cfg)?,
        },
        // Printed before configuration is loaded
        cli::Commands::Version => {}
    }

    Ok(())
}
