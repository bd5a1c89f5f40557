use clap::Parser;
use std::process;

mod api;
mod assistant;
mod cli;
mod commands;
mod config;
mod constants;
mod context;
mod display;
mod error;
mod git;
mod prompt;
mod utils;

use cli::{Cli, Commands};
use display::ui;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    utils::debug::set_enabled(cli.verbose);
    utils::debug::set_quiet(cli.quiet);

    // Load configuration
    let config = match config::manager::AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            ui::warning(&format!("Failed to load config: {:#}", e));
            config::manager::AppConfig::default()
        }
    };

    let ctx = context::AppContext::new(config.settings());

    let result = match cli.command {
        Commands::Review(args) => commands::review::handle(&ctx, args),
        Commands::Errors(args) => commands::errors::handle(&ctx, args).await,
        Commands::Auth(args) => commands::auth::handle(&ctx, args).await,
        Commands::Config(args) => commands::config::handle(&ctx, args),
    };

    if let Err(e) = result {
        ui::error(&format!("{:#}", e));
        process::exit(1);
    }
}
